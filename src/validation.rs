use crate::error::{Result, SmsRelayError};
use crate::models::SendSmsRequest;

/// Error text returned when the dispatch request is missing required fields
pub const MISSING_FIELDS_ERROR: &str = "Sender name and message are required!";

/// Validation utilities for the dispatch path
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate a send request before any gateway or store call.
    ///
    /// `sender_name` and `message` must be present and non-empty. The
    /// phone number is deliberately not validated here; a bad number
    /// surfaces as a gateway failure.
    pub fn validate_send_request(request: &SendSmsRequest) -> Result<()> {
        if Self::is_missing(request.sender_name.as_deref())
            || Self::is_missing(request.message.as_deref())
        {
            return Err(SmsRelayError::Validation(MISSING_FIELDS_ERROR.to_string()));
        }

        Ok(())
    }

    /// True when a field is absent or the empty string.
    ///
    /// Whitespace-only values count as present.
    #[must_use]
    pub fn is_missing(value: Option<&str>) -> bool {
        value.map_or(true, str::is_empty)
    }
}
