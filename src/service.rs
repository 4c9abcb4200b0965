//! Relay orchestration.
//!
//! `RelayService` owns the three flows of the backend: dispatch an outbound
//! SMS, record an inbound reply, and list the stored conversation. The
//! gateway and store are injected so the flows are testable without a live
//! network.

use std::sync::Arc;

use chrono::{Local, Utc};
use tracing::{error, info};

use crate::error::{Result, SmsRelayError};
use crate::gateway::SmsGateway;
use crate::logging::OperationTimer;
use crate::metrics;
use crate::models::{InboundReply, MessageRecord, NewMessageRecord, SendSmsRequest, SentSms, DATE_FORMAT};
use crate::store::MessageStore;
use crate::validation::InputValidator;

/// Compose the outbound message body in the fixed three-line layout.
///
/// The layout (including the space before each newline) is part of the wire
/// format and must not change.
#[must_use]
pub fn compose_message_body(sender_name: &str, date: &str, message: &str) -> String {
    format!("FROM: {sender_name} \nDATE: {date} \nMESSAGE: {message}")
}

/// Stateless orchestrator over the gateway and store collaborators
pub struct RelayService {
    gateway: Arc<dyn SmsGateway>,
    store: Arc<dyn MessageStore>,
}

impl RelayService {
    /// Build a service from injected collaborators.
    #[must_use]
    pub fn new(gateway: Arc<dyn SmsGateway>, store: Arc<dyn MessageStore>) -> Self {
        Self { gateway, store }
    }

    /// Dispatch one outbound message: validate, compose, send, persist.
    ///
    /// The send and the insert are two independent calls with no rollback:
    /// an insert failure after a successful send leaves the SMS delivered
    /// but unrecorded, and is reported as [`SmsRelayError::StoreWrite`].
    pub async fn dispatch(&self, request: &SendSmsRequest) -> Result<SentSms> {
        InputValidator::validate_send_request(request)?;

        let sender_name = request.sender_name.as_deref().unwrap_or_default();
        let message = request.message.as_deref().unwrap_or_default();
        let phone_number = request.phone_number.as_deref().unwrap_or_default();

        // Send-time timestamp, local clock, second precision
        let message_date = Local::now().format(DATE_FORMAT).to_string();
        let message_body = compose_message_body(sender_name, &message_date, message);

        let timer = OperationTimer::new("dispatch");

        let receipt = match self.gateway.send_sms(phone_number, &message_body).await {
            Ok(receipt) => receipt,
            Err(e) => {
                metrics::record_send(false);
                return Err(e);
            }
        };
        metrics::record_send(true);

        // The stored timestamp is computed independently of the one embedded
        // in the body; the two are not guaranteed identical.
        let record = NewMessageRecord {
            sender_name: sender_name.to_string(),
            phone_number: phone_number.to_string(),
            message_body,
            date: Utc::now().format(DATE_FORMAT).to_string(),
        };

        let inserted = match self.store.insert_message(record).await {
            Ok(rows) => rows,
            Err(e) => {
                metrics::record_store_write(false);
                return Err(e);
            }
        };
        if inserted.is_empty() {
            metrics::record_store_write(false);
            return Err(SmsRelayError::StoreWrite(
                "store reported no inserted data".to_string(),
            ));
        }
        metrics::record_store_write(true);

        info!(sid = %receipt.sid, "Message dispatched and recorded");
        timer.finish();

        Ok(receipt)
    }

    /// Record a provider-initiated reply.
    ///
    /// The caller's number doubles as the sender name; absent webhook fields
    /// are stored as empty strings.
    pub async fn record_reply(&self, reply: &InboundReply) -> Result<()> {
        let from = reply.from.clone().unwrap_or_default();
        let body = reply.body.clone().unwrap_or_default();

        let record = NewMessageRecord {
            sender_name: from.clone(),
            phone_number: from,
            message_body: body,
            date: Utc::now().format(DATE_FORMAT).to_string(),
        };

        let inserted = match self.store.insert_message(record).await {
            Ok(rows) => rows,
            Err(e) => {
                metrics::record_reply(false);
                return Err(e);
            }
        };
        if inserted.is_empty() {
            metrics::record_reply(false);
            return Err(SmsRelayError::StoreWrite(
                "store reported no inserted data".to_string(),
            ));
        }
        metrics::record_reply(true);

        Ok(())
    }

    /// Fetch all stored records for the conversation view.
    ///
    /// A read failure degrades to an empty list; it is logged and never
    /// surfaced to the caller.
    pub async fn list_messages(&self) -> Vec<MessageRecord> {
        match self.store.list_messages().await {
            Ok(messages) => {
                metrics::record_store_read(true, messages.len());
                messages
            }
            Err(e) => {
                error!("Error fetching messages from store: {e}");
                metrics::record_store_read(false, 0);
                Vec::new()
            }
        }
    }
}
