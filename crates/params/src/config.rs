use serde::Deserialize;

const DEFAULT_MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Limits and policies applied while extracting parameters from one request.
///
/// Deserializable with every field optional, so it can live inside an application's
/// own configuration file.
///
/// # Example
/// ```
/// use micro_params::ContextConfig;
///
/// let config = ContextConfig::builder().max_body_size(64 * 1024).build();
/// assert_eq!(config.max_body_size(), 64 * 1024);
/// assert!(config.strict_form_content_type());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    max_body_size: usize,
    strict_form_content_type: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self { max_body_size: DEFAULT_MAX_BODY_SIZE, strict_form_content_type: true }
    }
}

impl ContextConfig {
    pub fn builder() -> ContextConfigBuilder {
        ContextConfigBuilder::new()
    }

    /// Upper bound on the request body read for form and JSON parameters.
    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    /// When set, form parameters are only read from `application/x-www-form-urlencoded` bodies.
    pub fn strict_form_content_type(&self) -> bool {
        self.strict_form_content_type
    }
}

#[derive(Debug)]
pub struct ContextConfigBuilder {
    config: ContextConfig,
}

impl ContextConfigBuilder {
    fn new() -> Self {
        Self { config: ContextConfig::default() }
    }

    #[must_use]
    pub fn max_body_size(mut self, max_body_size: usize) -> Self {
        self.config.max_body_size = max_body_size;
        self
    }

    #[must_use]
    pub fn strict_form_content_type(mut self, strict: bool) -> Self {
        self.config.strict_form_content_type = strict;
        self
    }

    pub fn build(self) -> ContextConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ContextConfig::default();
        assert_eq!(config.max_body_size(), 2 * 1024 * 1024);
        assert!(config.strict_form_content_type());
    }

    #[test]
    fn deserialize_partial() {
        let config: ContextConfig = serde_json::from_str(r#"{"max_body_size": 1024}"#).unwrap();
        assert_eq!(config.max_body_size(), 1024);
        assert!(config.strict_form_content_type());

        let config: ContextConfig = serde_json::from_str(r#"{"strict_form_content_type": false}"#).unwrap();
        assert_eq!(config, ContextConfig::builder().strict_form_content_type(false).build());
    }
}
