// logging.rs - Explicit logging context passed to pipeline components

use std::fmt::Display;

const ROOT_TARGET: &str = "kmersig";

/// Logging handle carried by every component.
///
/// Wraps the `log` facade with a scope that becomes the record target, so
/// `RUST_LOG=kmersig::reader=debug` narrows output to one component. Cheap
/// to clone and `Send`, so a copy travels with each worker unit.
#[derive(Debug, Clone)]
pub struct Logger {
    target: String,
}

impl Logger {
    /// Install the `env_logger` backend and return the root logger.
    ///
    /// Call once at process start. `RUST_LOG` overrides the default level.
    pub fn init(verbose: bool) -> Self {
        let level = if verbose { "debug" } else { "info" };
        // A second init (tests, embedding) keeps the first backend
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
            .format_timestamp_secs()
            .try_init();
        Self::root()
    }

    /// Logger without installing a backend; records go wherever `log` points.
    pub fn root() -> Self {
        Self {
            target: ROOT_TARGET.to_string(),
        }
    }

    /// Child logger for a named component, e.g. `kmersig::reader`.
    pub fn scoped(&self, component: &str) -> Self {
        Self {
            target: format!("{}::{}", self.target, component),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn debug(&self, message: impl Display) {
        log::debug!(target: self.target.as_str(), "{}", message);
    }

    pub fn info(&self, message: impl Display) {
        log::info!(target: self.target.as_str(), "{}", message);
    }

    pub fn warn(&self, message: impl Display) {
        log::warn!(target: self.target.as_str(), "{}", message);
    }

    pub fn error(&self, message: impl Display) {
        log::error!(target: self.target.as_str(), "{}", message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_targets() {
        let root = Logger::root();
        assert_eq!(root.target(), "kmersig");

        let reader = root.scoped("reader");
        assert_eq!(reader.target(), "kmersig::reader");
        assert_eq!(reader.scoped("file").target(), "kmersig::reader::file");
    }
}
