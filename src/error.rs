/// Error types for payload decoding and configuration
///
/// None of the payload errors are fatal: the ingestion loop drops the offending
/// payload and keeps listening.
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("missing start/stop marker or payload too short")]
    BadFraming,
    #[error("parity check failed")]
    BadParity,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("not a mode code or number: {0:?}")]
    UnparseableNumber(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("sample received before channel and filter were set")]
    MissingChannelOrFilter,
    #[error("average received before a channel was set")]
    MissingChannel,
}

/// Any reason a single payload was dropped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Context(#[from] ContextError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid broker URL: {0}")]
    BrokerUrl(String),
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}
