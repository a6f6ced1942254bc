//! A single delivery request.

use chrono::{DateTime, Utc};

/// One email delivery request, possibly time-deferred.
///
/// Consumed exactly once by [`crate::Scheduler::deliver`]. Jobs are held in
/// memory only: there is no durability guarantee for a pending deferred
/// send.
#[derive(Debug, Clone)]
pub struct EmailJob {
    /// Recipient address.
    pub recipient: String,
    /// Message subject.
    pub subject: String,
    /// Plain-text message body.
    pub body: String,
    /// Attachment content.
    pub attachment_bytes: Vec<u8>,
    /// File name the attachment carries.
    pub attachment_name: String,
    /// When to send. Absent, past or present values send immediately.
    pub send_at: Option<DateTime<Utc>>,
}

impl EmailJob {
    /// Create an immediate-send job.
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        attachment_bytes: Vec<u8>,
        attachment_name: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
            attachment_bytes,
            attachment_name: attachment_name.into(),
            send_at: None,
        }
    }

    /// Defer the send until a wall-clock instant.
    pub fn scheduled_at(mut self, send_at: DateTime<Utc>) -> Self {
        self.send_at = Some(send_at);
        self
    }
}
