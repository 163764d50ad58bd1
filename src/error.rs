use serde_json::Value;
use thiserror::Error;

/// Text placed in the `details` field of every HTTP failure.
pub const BLOCKED_DETAILS: &str = "Zillow blocked request";

/// Every way a scrape can end without a photo list.
///
/// The `Display` text of each variant is exactly the `error` string written
/// to standard output.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The input does not mention the required domain; nothing was fetched
    #[error("Invalid Zillow URL")]
    InvalidUrl,

    /// Non-success status or transport failure
    #[error("HTTP Error: {message}")]
    Http { message: String },

    /// The `__NEXT_DATA__` script is absent (layout change or bot check page)
    #[error("Structure changed or CAPTCHA")]
    MissingDataAnchor,

    /// The anchor text is not valid JSON
    #[error("Failed to parse JSON data")]
    MalformedPayload(#[source] serde_json::Error),

    /// The payload parsed but had an unexpected shape somewhere along the path
    #[error("{message}")]
    Extraction { message: String },
}

impl ScrapeError {
    /// Extra context reported next to the error message, if any.
    pub fn details(&self) -> Option<&'static str> {
        match self {
            ScrapeError::Http { .. } => Some(BLOCKED_DETAILS),
            _ => None,
        }
    }

    /// Build an extraction failure for a value of the wrong JSON type.
    pub fn unexpected_type(path: &str, expected: &str, found: &Value) -> Self {
        ScrapeError::Extraction {
            message: format!(
                "expected {} at `{}`, found {}",
                expected,
                path,
                json_type_name(found)
            ),
        }
    }

    /// Build an extraction failure for a key that must be present.
    pub fn missing_key(path: &str, key: &str) -> Self {
        ScrapeError::Extraction {
            message: format!("missing key `{}` at `{}`", key, path),
        }
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        ScrapeError::Http {
            message: err.to_string(),
        }
    }
}

/// Name of a JSON value's type, as used in extraction messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_matches_output_messages() {
        assert_eq!(ScrapeError::InvalidUrl.to_string(), "Invalid Zillow URL");
        assert_eq!(
            ScrapeError::MissingDataAnchor.to_string(),
            "Structure changed or CAPTCHA"
        );

        let parse_err = serde_json::from_str::<Value>("{").unwrap_err();
        assert_eq!(
            ScrapeError::MalformedPayload(parse_err).to_string(),
            "Failed to parse JSON data"
        );

        let http = ScrapeError::Http {
            message: "403 Forbidden".to_string(),
        };
        assert_eq!(http.to_string(), "HTTP Error: 403 Forbidden");
    }

    #[test]
    fn test_only_http_errors_carry_details() {
        let http = ScrapeError::Http {
            message: "boom".to_string(),
        };
        assert_eq!(http.details(), Some(BLOCKED_DETAILS));
        assert_eq!(ScrapeError::InvalidUrl.details(), None);
        assert_eq!(ScrapeError::MissingDataAnchor.details(), None);
    }

    #[test]
    fn test_unexpected_type_message() {
        let err = ScrapeError::unexpected_type("props.pageProps", "an object", &json!([1, 2]));
        assert_eq!(
            err.to_string(),
            "expected an object at `props.pageProps`, found array"
        );
    }
}
