use thiserror::Error;

/// Library error type for gallery-page operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured slide track has no slides; every carousel operation
    /// requires at least one.
    #[error("slide track is empty")]
    EmptyTrack,

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),
}
