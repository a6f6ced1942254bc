//! Delivery scheduler: immediate or deferred single-shot SMTP submission.

use crate::config::{MailConfig, SENDER_NAME};
use crate::error::Result;
use crate::job::EmailJob;

use chrono::{DateTime, Utc};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::time::Duration;
use tracing::{debug, info};

/// Receipt for a completed delivery.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// When the relay accepted the message.
    pub sent_at: DateTime<Utc>,
    /// How long the deferred wait lasted; zero for immediate sends.
    pub waited: Duration,
}

/// Submits [`EmailJob`]s to the configured relay.
pub struct Scheduler {
    config: MailConfig,
}

impl Scheduler {
    /// Create a scheduler for a relay configuration.
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    /// Deliver one job.
    ///
    /// A future `send_at` blocks the calling thread until that instant;
    /// there is no cancellation hook once the wait begins, and a process
    /// exit abandons the job. Past or absent `send_at` sends immediately.
    ///
    /// Exactly one connection attempt is made: STARTTLS negotiation,
    /// credential login, transmission. Any failure surfaces as a
    /// [`crate::MailError`] with the underlying cause; the attachment bytes
    /// remain untouched and the job can be rebuilt and resent.
    pub fn deliver(&self, job: EmailJob) -> Result<Delivery> {
        let waited = match job.send_at {
            Some(at) => wait_until(at),
            None => Duration::ZERO,
        };

        let message = self.build_message(&job)?;
        let mailer = SmtpTransport::starttls_relay(&self.config.server)?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.from_address.clone(),
                self.config.password.clone(),
            ))
            .build();
        mailer.send(&message)?;

        info!(
            recipient = %job.recipient,
            attachment = %job.attachment_name,
            waited_ms = waited.as_millis() as u64,
            "message accepted by relay"
        );
        Ok(Delivery {
            sent_at: Utc::now(),
            waited,
        })
    }

    fn build_message(&self, job: &EmailJob) -> Result<Message> {
        let from = Mailbox::new(
            Some(SENDER_NAME.to_string()),
            self.config.from_address.parse()?,
        );
        let to: Mailbox = job.recipient.parse()?;

        let attachment = Attachment::new(job.attachment_name.clone()).body(
            job.attachment_bytes.clone(),
            ContentType::parse("application/pdf")?,
        );
        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(job.subject.clone())
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(job.body.clone()))
                    .singlepart(attachment),
            )?;
        Ok(message)
    }
}

/// Remaining wait from `now` until `at`; zero when `at` is not in the
/// future.
fn delay_until(now: DateTime<Utc>, at: DateTime<Utc>) -> Duration {
    (at - now).to_std().unwrap_or(Duration::ZERO)
}

/// Block the calling thread until `at`, returning the time actually waited.
fn wait_until(at: DateTime<Utc>) -> Duration {
    let delay = delay_until(Utc::now(), at);
    if !delay.is_zero() {
        debug!(delay_ms = delay.as_millis() as u64, "deferring send");
        std::thread::sleep(delay);
    }
    delay
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use std::time::Instant;

    fn test_config() -> MailConfig {
        MailConfig {
            from_address: "reports@example.com".to_string(),
            password: "secret".to_string(),
            server: "smtp.example.com".to_string(),
            port: 587,
        }
    }

    fn test_job() -> EmailJob {
        EmailJob::new(
            "management@example.com",
            "Data Analysis Report",
            "Please find attached the data analysis report.",
            b"%PDF-1.3 fake".to_vec(),
            "data_analysis_report.pdf",
        )
    }

    #[test]
    fn delay_is_zero_for_past_and_present_instants() {
        let now = Utc::now();
        assert_eq!(delay_until(now, now), Duration::ZERO);
        assert_eq!(delay_until(now, now - TimeDelta::seconds(5)), Duration::ZERO);
    }

    #[test]
    fn delay_matches_remaining_time_for_future_instants() {
        let now = Utc::now();
        let delay = delay_until(now, now + TimeDelta::seconds(2));
        assert_eq!(delay, Duration::from_secs(2));
    }

    #[test]
    fn wait_blocks_until_the_scheduled_instant() {
        let target = Utc::now() + TimeDelta::milliseconds(200);
        let start = Instant::now();
        let waited = wait_until(target);
        // sleep() guarantees at least the remaining duration.
        assert!(start.elapsed() >= Duration::from_millis(150));
        assert!(waited > Duration::ZERO);
    }

    #[test]
    fn past_instants_do_not_wait() {
        let target = Utc::now() - TimeDelta::seconds(30);
        let start = Instant::now();
        let waited = wait_until(target);
        assert_eq!(waited, Duration::ZERO);
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn message_is_multipart_with_named_pdf_attachment() {
        let scheduler = Scheduler::new(test_config());
        let message = scheduler.build_message(&test_job()).unwrap();
        let rendered = String::from_utf8_lossy(&message.formatted()).to_string();

        assert!(rendered.contains("multipart/mixed"));
        assert!(rendered.contains("Content-Disposition: attachment"));
        assert!(rendered.contains("data_analysis_report.pdf"));
        assert!(rendered.contains("application/pdf"));
        assert!(rendered.contains("management@example.com"));
    }

    #[test]
    fn invalid_recipient_fails_before_any_connection() {
        let scheduler = Scheduler::new(test_config());
        let mut job = test_job();
        job.recipient = "not an address".to_string();
        let err = scheduler.build_message(&job).unwrap_err();
        assert!(matches!(err, crate::MailError::Address(_)));
    }
}
