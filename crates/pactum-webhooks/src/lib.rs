//! Webhook delivery retries for Pactum.
//!
//! A triggered webhook is delivered by a job that, on failure, re-enqueues
//! itself with an increasing delay drawn from a fixed backoff table, then
//! gives up permanently once the table is exhausted. All job state travels
//! in the payload — nothing in memory has to survive the delay, so the job
//! can re-enter through any worker process.
//!
//! # Key Types
//!
//! - [`TriggeredWebhook`] / [`WebhookJob`] — the delivery target and the
//!   payload carried across re-enqueues
//! - [`WebhookDelivery`] / [`JobScheduler`] — the external boundaries
//!   (synchronous-style delivery call, opaque delayed queue)
//! - [`WebhookJobRunner`] — the retry state machine
//! - [`spawn_delivery_worker`] — tokio-backed scheduler for in-process use

pub mod error;
pub mod job;
pub mod runner;
pub mod runtime;
pub mod traits;

pub use error::{DeliveryError, SchedulerError};
pub use job::{
    DeliveryTarget, JobOutcome, TriggeredWebhook, WebhookExecutionResult, WebhookJob,
    BACKOFF_SECONDS,
};
pub use runner::WebhookJobRunner;
pub use runtime::{spawn_delivery_worker, WebhookQueue};
pub use traits::{JobScheduler, WebhookDelivery};
