//! Ingestion service configuration.
//!
//! An explicit, immutable value passed at construction.  All settings
//! have defaults so the service can be built with `IoConfig::default()`.

/// Configuration for [`IoService`](crate::IoService).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IoConfig {
    /// Upper bound, in bytes, for `file_contents` reads into memory.
    /// Objects larger than this fail with `ContentsTooLarge` before any
    /// bytes are read.
    /// Env: `REDAKT_IO_MAX_CONTENTS_SIZE`
    /// Default: `None` (unbounded).
    pub max_contents_size: Option<u64>,
}

impl IoConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("REDAKT_IO_MAX_CONTENTS_SIZE") {
            match val.parse::<u64>() {
                Ok(n) => config.max_contents_size = Some(n),
                Err(_) => {
                    tracing::warn!(
                        value = %val,
                        "invalid REDAKT_IO_MAX_CONTENTS_SIZE, using default"
                    );
                }
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded() {
        assert_eq!(IoConfig::default().max_contents_size, None);
    }
}
