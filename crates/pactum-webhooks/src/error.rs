/// A failure raised by the delivery call itself, as opposed to a delivery
/// that completed and reported an unsuccessful result. Both funnel into the
/// same retry decision.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The delivery target could not be reached.
    #[error("delivery transport error: {0}")]
    Transport(String),

    /// The delivery call violated its own contract (bad target, oversized
    /// payload, and so on).
    #[error("delivery rejected: {0}")]
    Rejected(String),
}

/// Errors from the scheduling boundary.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// The queue has shut down; no further jobs can be enqueued.
    #[error("job queue is closed")]
    QueueClosed,
}
