//! Bridge configuration.
//!
//! The matching policy for content types lives here so the request path
//! (multipart detection) and the response path (text vs binary) can never
//! disagree about a payload.

/// Default execution mode passed to the application handler.
pub const DEFAULT_MODE: &str = "production";

/// Media types whose bodies are passed as text rather than base64.
pub const DEFAULT_TEXT_MEDIA_TYPES: [&str; 3] = ["text/", "application/json", "application/xml"];

/// Media type whose base64 request bodies stay raw bytes.
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// How a content type header is compared against a configured media type.
///
/// Comparison is done on the ASCII-lowercased header value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchRule {
    /// The media type appears anywhere in the header value.
    #[default]
    Contains,
    /// The header value starts with the media type.
    Prefix,
}

impl MatchRule {
    #[must_use]
    pub fn matches(self, content_type: &str, media_type: &str) -> bool {
        let content_type = content_type.trim_start().to_ascii_lowercase();
        let media_type = media_type.to_ascii_lowercase();
        match self {
            Self::Contains => content_type.contains(&media_type),
            Self::Prefix => content_type.starts_with(&media_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Opaque label handed to the application on every invocation.
    pub mode: String,
    pub match_rule: MatchRule,
    pub text_media_types: Vec<String>,
    pub multipart_media_type: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODE)
    }
}

impl BridgeConfig {
    #[must_use]
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            match_rule: MatchRule::default(),
            text_media_types: DEFAULT_TEXT_MEDIA_TYPES.iter().map(ToString::to_string).collect(),
            multipart_media_type: MULTIPART_FORM_DATA.to_string(),
        }
    }

    #[must_use]
    pub const fn with_match_rule(mut self, match_rule: MatchRule) -> Self {
        self.match_rule = match_rule;
        self
    }

    /// Replaces the list of media types treated as text.
    #[must_use]
    pub fn with_text_media_types<I, S>(mut self, media_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_media_types = media_types.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a body with this content type is text. No content type means
    /// binary.
    #[must_use]
    pub fn is_textual(&self, content_type: Option<&str>) -> bool {
        content_type.is_some_and(|content_type| {
            self.text_media_types
                .iter()
                .any(|media_type| self.match_rule.matches(content_type, media_type))
        })
    }

    #[must_use]
    pub fn is_multipart(&self, content_type: Option<&str>) -> bool {
        content_type.is_some_and(|content_type| {
            self.match_rule
                .matches(content_type, &self.multipart_media_type)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_textual_types() {
        let config = BridgeConfig::default();
        assert!(config.is_textual(Some("text/plain")));
        assert!(config.is_textual(Some("text/html; charset=utf-8")));
        assert!(config.is_textual(Some("application/json")));
        assert!(config.is_textual(Some("application/xml")));
        assert!(!config.is_textual(Some("image/png")));
        assert!(!config.is_textual(Some("application/octet-stream")));
        assert!(!config.is_textual(None));
    }

    #[test]
    fn test_contains_matches_parameters_and_vendor_types() {
        let config = BridgeConfig::default();
        assert!(config.is_textual(Some("application/problem+json; application/json")));
        assert!(config.is_textual(Some("Application/JSON; charset=utf-8")));
    }

    #[test]
    fn test_prefix_rule() {
        let config = BridgeConfig::default().with_match_rule(MatchRule::Prefix);
        assert!(config.is_textual(Some("text/csv")));
        assert!(config.is_textual(Some("application/json; charset=utf-8")));
        assert!(!config.is_textual(Some("application/vnd.api+json; x=application/json")));
        assert!(config.is_multipart(Some("multipart/form-data; boundary=x")));
        assert!(!config.is_multipart(Some("x; multipart/form-data")));
    }

    #[test]
    fn test_custom_text_media_types() {
        let config = BridgeConfig::new("development")
            .with_text_media_types(["text/", "application/javascript"]);
        assert_eq!(config.mode, "development");
        assert!(config.is_textual(Some("application/javascript")));
        assert!(!config.is_textual(Some("application/json")));
    }

    #[test]
    fn test_multipart_detection() {
        let config = BridgeConfig::default();
        assert!(config.is_multipart(Some("multipart/form-data; boundary=----x")));
        assert!(!config.is_multipart(Some("multipart/mixed")));
        assert!(!config.is_multipart(None));
    }
}
