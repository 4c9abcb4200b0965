//! SMS Relay - Outbound Messaging and Conversation Log
//!
//! A Rust web backend that relays outbound SMS through a third-party
//! messaging gateway, logs sent and received messages in a hosted store,
//! and renders a simple conversation view.
//!
//! # Features
//!
//! - Dispatch outbound SMS via the Twilio REST API
//! - Persist every sent and received message in Supabase
//! - Accept the provider's reply webhook
//! - Render landing and conversation pages

/// Configuration management
pub mod config;
/// Error types
pub mod error;
/// Outbound SMS gateway client
pub mod gateway;
/// HTTP routes and router assembly
pub mod handlers;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// HTML page rendering
pub mod render;
/// Relay orchestration
pub mod service;
/// Hosted message store client
pub mod store;
/// Input validation
pub mod validation;

// Re-export key components for easier access
pub use error::{Result, SmsRelayError};
pub use models::{InboundReply, MessageRecord, NewMessageRecord, SendSmsRequest, SendSmsResponse, SentSms};
pub use service::RelayService;
