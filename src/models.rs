//! Data models for message relaying and storage
//!
//! This module contains all data structures used throughout the application,
//! including stored message records and the HTTP request/response payloads.

use serde::{Deserialize, Serialize};

/// Timestamp layout used for both the message body and the stored `date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A stored message row, outbound or inbound
///
/// The schema carries no direction flag: inbound replies collapse
/// `sender_name` and `phone_number` to the caller's number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Name of the message sender
    pub sender_name: String,
    /// Destination (outbound) or origin (inbound) phone number
    pub phone_number: String,
    /// Message text content
    pub message_body: String,
    /// Timestamp as formatted UTC text
    pub date: String,
}

/// Data for creating a new message record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessageRecord {
    /// Name of the message sender
    pub sender_name: String,
    /// Destination (outbound) or origin (inbound) phone number
    pub phone_number: String,
    /// Message text content
    pub message_body: String,
    /// Timestamp as formatted UTC text
    pub date: String,
}

/// Receipt returned by the gateway for a successful send
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentSms {
    /// Provider-assigned message identifier
    pub sid: String,
}

/// Request body for `POST /send-sms`
///
/// Fields are optional so that absent keys reach validation instead of
/// failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendSmsRequest {
    /// Destination phone number, passed to the gateway unvalidated
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Display name embedded in the composed body
    #[serde(default)]
    pub sender_name: Option<String>,
    /// Message content
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body for `POST /send-sms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendSmsResponse {
    /// Whether the send-and-persist flow completed
    pub success: bool,
    /// Provider-assigned message identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_sid: Option<String>,
    /// Conversation identifier (the provider sid)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation: Option<String>,
    /// Error description when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendSmsResponse {
    /// Build the success payload from a gateway receipt
    #[must_use]
    pub fn sent(receipt: &SentSms) -> Self {
        Self {
            success: true,
            message_sid: Some(receipt.sid.clone()),
            conversation: Some(receipt.sid.clone()),
            error: None,
        }
    }

    /// Build the failure payload carrying an error description
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message_sid: None,
            conversation: None,
            error: Some(error.into()),
        }
    }
}

/// Form payload of the provider-initiated reply webhook
///
/// Field names follow the provider's webhook format; absent fields are
/// stored as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundReply {
    /// Phone number the reply came from
    #[serde(rename = "From", default)]
    pub from: Option<String>,
    /// Reply text, stored verbatim
    #[serde(rename = "Body", default)]
    pub body: Option<String>,
}
