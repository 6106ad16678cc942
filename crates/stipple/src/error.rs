//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid sampler or importance configuration, malformed grids, and runs that cannot complete.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_message_is_prefixed() {
        let err = Error::InvalidConfig("sigma must be > 0".into());
        assert_eq!(err.to_string(), "invalid configuration: sigma must be > 0");
    }

    #[test]
    fn invalid_grid_message_is_prefixed() {
        let err = Error::InvalidGrid("shape mismatch".into());
        assert_eq!(err.to_string(), "invalid grid: shape mismatch");
    }

    #[test]
    fn other_message_is_verbatim() {
        let err = Error::Other("no selectable cell left".into());
        assert_eq!(err.to_string(), "no selectable cell left");
    }
}
