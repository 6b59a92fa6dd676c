//! Logging handle passed through bundling calls.
//!
//! The library never installs a logger. Callers hand a [`BundleLogger`] to each
//! bundling call; every record emitted during that call goes through the `log`
//! facade under the handle's target, so hosts can route or filter one bundle's
//! output without touching process-wide state.

use std::fmt;

/// Target used when no explicit target is given.
pub const DEFAULT_TARGET: &str = "kodegen_bundler_notebook::bundle";

/// Scoped logging handle for a single bundling call.
#[derive(Clone, Debug)]
pub struct BundleLogger {
    target: String,
}

impl Default for BundleLogger {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET)
    }
}

impl BundleLogger {
    /// Creates a handle that logs under `target`.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Returns the log target.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Logs a per-member detail at `debug` level.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        log::debug!(target: self.target.as_str(), "{}", args);
    }

    /// Logs a bundle-level event at `info` level.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        log::info!(target: self.target.as_str(), "{}", args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target() {
        assert_eq!(BundleLogger::default().target(), DEFAULT_TARGET);
    }

    #[test]
    fn custom_target_is_kept() {
        let log = BundleLogger::new("notebook-server::publish");
        assert_eq!(log.target(), "notebook-server::publish");
        log.debug(format_args!("added buffer: {}", "manifest.json"));
    }
}
