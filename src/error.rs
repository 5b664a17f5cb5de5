use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid participant name \"{input}\" (expected \"First Last\")")]
    InvalidName { input: String },

    #[error("Message {index}: missing required field \"{field}\"")]
    MissingField { index: usize, field: &'static str },

    #[error("Message {index}: timestamp {value} is out of range")]
    InvalidTimestamp { index: usize, value: i64 },

    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Conversation has no messages")]
    EmptyConversation,

    #[error("Invalid time span: last message predates first")]
    NegativeSpan,

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display_name() {
        let e = AppError::InvalidName {
            input: "Cher".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Invalid participant name "Cher" (expected "First Last")"#
        );
    }

    #[test]
    fn app_error_display_missing_field() {
        let e = AppError::MissingField {
            index: 3,
            field: "timestamp",
        };
        assert_eq!(
            e.to_string(),
            "Message 3: missing required field \"timestamp\""
        );
    }

    #[test]
    fn app_error_display_date() {
        let e = AppError::InvalidDate {
            input: "abc".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Invalid date "abc" (expected YYYYMMDD or YYYY-MM-DD)"#
        );
    }

    #[test]
    fn app_error_display_timezone() {
        let e = AppError::InvalidTimezone {
            input: "Mars/Olympus".to_string(),
        };
        assert_eq!(e.to_string(), "Invalid timezone: Mars/Olympus");
    }

    #[test]
    fn app_error_display_empty() {
        assert_eq!(
            AppError::EmptyConversation.to_string(),
            "Conversation has no messages"
        );
    }
}
