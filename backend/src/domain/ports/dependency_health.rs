//! Port for dependencies the readiness check consults.

/// A dependency that can report whether it is able to serve requests.
///
/// Checks run on every readiness check, so they must not block.
#[cfg_attr(test, mockall::automock)]
pub trait DependencyHealth: Send + Sync {
    /// Stable key used in the readiness report.
    fn name(&self) -> &'static str;

    /// `true` while the dependency can serve reads and writes.
    fn is_healthy(&self) -> bool;
}
