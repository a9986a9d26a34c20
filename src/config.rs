//! Materialization options.
//!
//! Threaded explicitly through [`mount`](crate::mount) calls so the core
//! carries no module-level state.

/// Configuration for materialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountConfig {
    /// Whether to stash the applied property map on each created element
    /// for inspection tooling. Observational only.
    pub debug: bool,
}

impl MountConfig {
    /// Development config (debug side channel on).
    pub const DEV: Self = Self { debug: true };

    /// Production config (no side channel).
    pub const PROD: Self = Self { debug: false };

    /// Create a new config.
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }
}

impl Default for MountConfig {
    fn default() -> Self {
        Self::PROD
    }
}
