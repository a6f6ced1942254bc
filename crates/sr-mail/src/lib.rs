//! Deferred email delivery of generated reports.
//!
//! Builds a multipart message (plain-text body plus one binary attachment)
//! and submits it to a configured SMTP relay over STARTTLS with credential
//! authentication. A job may carry a future send time; delivery then blocks
//! the calling thread until that instant.
//!
//! One connection attempt, no retry: the relay either accepts the message
//! atomically or the call fails with a typed error. Jobs are not persisted;
//! if the process terminates before a deferred send, the job is lost.
//!
//! # Example
//!
//! ```no_run
//! use sr_mail::{EmailJob, MailConfig, Scheduler};
//!
//! let scheduler = Scheduler::new(MailConfig::from_env().unwrap());
//! let job = EmailJob::new(
//!     "management@example.com",
//!     "Data Analysis Report",
//!     "Please find attached the data analysis report.",
//!     std::fs::read("data_analysis_report.pdf").unwrap(),
//!     "data_analysis_report.pdf",
//! );
//! scheduler.deliver(job).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod job;
pub mod scheduler;

pub use config::MailConfig;
pub use error::{MailError, Result};
pub use job::EmailJob;
pub use scheduler::{Delivery, Scheduler};
