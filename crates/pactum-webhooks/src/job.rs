use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Retry delays in seconds, indexed by consecutive failure count.
///
/// 10s, 1m, 2m, 5m, 10m, 20m — just over 38 minutes of patience before a
/// webhook is abandoned.
pub const BACKOFF_SECONDS: [u64; 6] = [10, 60, 120, 300, 600, 1200];

/// Where and how a webhook delivery is made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryTarget {
    pub method: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// A pending notification delivery, tied to a specific event and target.
///
/// Owned by the event layer; this crate only references it and threads it
/// through retries unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeredWebhook {
    pub webhook_uuid: Uuid,
    pub target: DeliveryTarget,
}

/// The payload carried across re-enqueues.
///
/// All retry state lives here: the external queue preserves the fields
/// exactly, so a retry can execute in any process with no surviving
/// in-memory object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookJob {
    pub triggered_webhook: TriggeredWebhook,
    pub error_count: u32,
}

impl WebhookJob {
    /// A fresh job for a newly triggered webhook.
    pub fn new(triggered_webhook: TriggeredWebhook) -> Self {
        Self {
            triggered_webhook,
            error_count: 0,
        }
    }

    /// The same job with one more recorded failure.
    pub fn after_failure(&self) -> Self {
        Self {
            triggered_webhook: self.triggered_webhook.clone(),
            error_count: self.error_count + 1,
        }
    }
}

/// What a completed delivery call reported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookExecutionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WebhookExecutionResult {
    pub fn success() -> Self {
        Self {
            success: true,
            status: Some(200),
            message: None,
        }
    }

    pub fn failure(status: u16) -> Self {
        Self {
            success: false,
            status: Some(status),
            message: None,
        }
    }
}

/// Terminal report of one `perform` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobOutcome {
    /// Delivery reported success; the chain ends here.
    Succeeded,
    /// Delivery failed; a retry was handed to the scheduler.
    RetryScheduled {
        delay: Duration,
        next_error_count: u32,
    },
    /// The retry budget is spent (or the queue is gone). Nothing further
    /// will happen for this webhook; the failure is visible only in logs.
    PermanentlyFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triggered() -> TriggeredWebhook {
        TriggeredWebhook {
            webhook_uuid: Uuid::now_v7(),
            target: DeliveryTarget {
                method: "POST".into(),
                url: "https://ci.example.com/hook".into(),
                body: None,
            },
        }
    }

    #[test]
    fn backoff_table_totals_just_over_38_minutes() {
        assert_eq!(BACKOFF_SECONDS.iter().sum::<u64>(), 2290);
    }

    #[test]
    fn after_failure_increments_only_the_error_count() {
        let job = WebhookJob::new(triggered());
        let retried = job.after_failure();
        assert_eq!(retried.error_count, 1);
        assert_eq!(retried.triggered_webhook, job.triggered_webhook);
    }

    #[test]
    fn job_payload_survives_a_queue_round_trip() {
        // The external queue sees the job as opaque data; every field must
        // survive serialization exactly.
        let job = WebhookJob::new(triggered()).after_failure();
        let json = serde_json::to_string(&job).unwrap();
        let back: WebhookJob = serde_json::from_str(&json).unwrap();
        assert_eq!(back, job);
    }
}
