//! Metrics collection.
//!
//! Service-level counters recorded through the `metrics` facade. Without an
//! installed recorder the macros are no-ops, so an exporter can be wired in
//! by the binary without touching this module.

use metrics::{counter, histogram};

/// Gateway sends that were accepted
pub const MESSAGES_SENT: &str = "sms_relay_messages_sent_total";
/// Gateway sends that failed
pub const SEND_FAILURES: &str = "sms_relay_send_failures_total";
/// Records the store confirmed as written
pub const STORE_WRITES: &str = "sms_relay_store_writes_total";
/// Store inserts that failed or reported no data
pub const STORE_WRITE_FAILURES: &str = "sms_relay_store_write_failures_total";
/// Inbound replies recorded
pub const REPLIES_RECORDED: &str = "sms_relay_replies_recorded_total";
/// Inbound replies that could not be recorded
pub const REPLY_FAILURES: &str = "sms_relay_reply_failures_total";
/// Successful conversation reads
pub const STORE_READS: &str = "sms_relay_store_reads_total";
/// Conversation reads that degraded to an empty list
pub const STORE_READ_FAILURES: &str = "sms_relay_store_read_failures_total";
/// Records returned per conversation read
pub const LISTED_MESSAGES: &str = "sms_relay_listed_messages";

/// Record the outcome of one gateway send call
pub fn record_send(success: bool) {
    if success {
        counter!(MESSAGES_SENT).increment(1);
    } else {
        counter!(SEND_FAILURES).increment(1);
    }
}

/// Record the outcome of one outbound-record insert
pub fn record_store_write(success: bool) {
    if success {
        counter!(STORE_WRITES).increment(1);
    } else {
        counter!(STORE_WRITE_FAILURES).increment(1);
    }
}

/// Record the outcome of one inbound-reply insert
pub fn record_reply(success: bool) {
    if success {
        counter!(REPLIES_RECORDED).increment(1);
    } else {
        counter!(REPLY_FAILURES).increment(1);
    }
}

/// Record the outcome of one conversation read
#[allow(clippy::cast_precision_loss)]
pub fn record_store_read(success: bool, count: usize) {
    if success {
        counter!(STORE_READS).increment(1);
        histogram!(LISTED_MESSAGES).record(count as f64);
    } else {
        counter!(STORE_READ_FAILURES).increment(1);
    }
}
