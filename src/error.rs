/// Failure while parsing or reprinting one module. The driver turns these
/// into a warning and returns the source unchanged.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("parse error at {lo}..{hi}: {message}")]
    Parse { message: String, lo: u32, hi: u32 },

    #[error("cannot apply patch at {lo}..{hi}: {reason}")]
    Patch { lo: u32, hi: u32, reason: String },
}

/// Build misconfiguration. These propagate to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown parseModule `{0}`")]
    UnknownParser(String),

    #[error("invalid loader query `{query}`: {reason}")]
    InvalidQuery { query: String, reason: String },

    #[error("invalid loader options: {0}")]
    InvalidOption(#[from] serde_json::Error),
}
