use thiserror::Error;

/// Failure to pull raw data out of the request, as opposed to a parameter being invalid.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read request body: {reason}")]
    BodyRead { reason: String },

    #[error("request body exceed the limit {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("invalid json body: {source}")]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },

    #[error("json body must be an object")]
    NotJsonObject,

    #[error("invalid form body: {source}")]
    InvalidForm {
        #[from]
        source: serde_urlencoded::de::Error,
    },
}

impl ExtractError {
    pub fn body_read<S: ToString>(str: S) -> Self {
        Self::BodyRead { reason: str.to_string() }
    }

    pub fn body_too_large(limit: usize) -> Self {
        Self::BodyTooLarge { limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(ExtractError::body_read("reset").to_string(), "failed to read request body: reset");
        assert_eq!(ExtractError::body_too_large(16).to_string(), "request body exceed the limit 16 bytes");
        assert_eq!(ExtractError::NotJsonObject.to_string(), "json body must be an object");
    }

    #[test]
    fn from_json_error() {
        let json_error = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let error: ExtractError = json_error.into();
        assert!(matches!(error, ExtractError::InvalidJson { .. }));
    }
}
