//! Operation executor binding
//!
//! The operations provider owns every transport concern: once the routing
//! layer has settled on a replica URL, the provider turns it into a bound
//! executor the caller's operation runs against. Two execution surfaces are
//! offered, a lighter-weight one for simple query/ping traffic and a fully
//! featured one for the complete operation set.

/// Factory binding a selected replica URL to request executors
///
/// A `None` from either binding call means the provider is not configured
/// for the deployment it was asked about; the facade surfaces that as a
/// fatal error and never retries it.
pub trait OperationsProvider: Send + Sync {
    /// Lighter-weight execution surface
    type Basic: Send;

    /// Fully featured execution surface
    type Full: Send;

    /// Bind a basic executor to `url`, write-capable when requested
    fn basic_executor(&self, url: &str, write_capable: bool) -> Option<Self::Basic>;

    /// Bind a full executor to `url`, write-capable when requested
    fn executor(&self, url: &str, write_capable: bool) -> Option<Self::Full>;
}
