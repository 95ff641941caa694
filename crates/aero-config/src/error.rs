//! Errors raised while loading or persisting simulator configuration.

/// Failure modes of the RON config round trip.
///
/// Every variant carries the underlying cause; none of them are recoverable
/// mid-flight, so the binary reports them and exits before spawning a
/// vehicle.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read simulator config: {0}")]
    ReadError(#[source] std::io::Error),

    /// The config file or its directory could not be written.
    #[error("failed to write simulator config: {0}")]
    WriteError(#[source] std::io::Error),

    /// The file's RON content does not describe a valid `SimConfig`.
    #[error("failed to parse simulator config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// The in-memory config could not be serialized to RON.
    #[error("failed to serialize simulator config: {0}")]
    SerializeError(#[source] ron::Error),
}
