use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the verification matrix: a pact publication joined with the
/// verification result for it, if any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub consumer_name: String,
    pub provider_name: String,
    pub consumer_version_number: String,
    pub provider_version_number: Option<String>,
    /// `None` when the pact has not been verified yet.
    pub success: Option<bool>,
    pub pact_created_at: DateTime<Utc>,
    pub verification_executed_at: Option<DateTime<Utc>>,
    pub verification_number: Option<u64>,
}

/// The rolled-up deployability verdict.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploySummary {
    /// `Some(true)` — all verifications published and successful.
    /// `Some(false)` — at least one failed.
    /// `None` — no matching rows, or a verification is missing.
    pub deployable: Option<bool>,
    pub reason: String,
}

const REASON_NO_RESULTS: &str = "No results matched the given query";
const REASON_ALL_SUCCESSFUL: &str = "All verification results are published and successful";
const REASON_FAILED: &str = "One or more verifications have failed";
const REASON_MISSING: &str = "Missing one or more verification results";

/// Roll matrix rows up into the tri-state deployability verdict.
pub fn summarize(rows: &[MatrixRow]) -> DeploySummary {
    let deployable = deployable(rows);
    let reason = if rows.is_empty() {
        REASON_NO_RESULTS
    } else {
        match deployable {
            Some(true) => REASON_ALL_SUCCESSFUL,
            Some(false) => REASON_FAILED,
            None => REASON_MISSING,
        }
    };
    DeploySummary {
        deployable,
        reason: reason.to_string(),
    }
}

fn deployable(rows: &[MatrixRow]) -> Option<bool> {
    if rows.is_empty() {
        return None;
    }
    if rows.iter().any(|row| row.success.is_none()) {
        return None;
    }
    Some(rows.iter().all(|row| row.success == Some(true)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(success: Option<bool>) -> MatrixRow {
        MatrixRow {
            consumer_name: "Frontend".into(),
            provider_name: "Accounts".into(),
            consumer_version_number: "1.0.0".into(),
            provider_version_number: success.map(|_| "2.0.0".into()),
            success,
            pact_created_at: Utc::now(),
            verification_executed_at: success.map(|_| Utc::now()),
            verification_number: success.map(|_| 1),
        }
    }

    #[test]
    fn no_rows_is_unanswerable() {
        let summary = summarize(&[]);
        assert_eq!(summary.deployable, None);
        assert_eq!(summary.reason, "No results matched the given query");
    }

    #[test]
    fn missing_verification_is_unanswerable() {
        let summary = summarize(&[row(Some(true)), row(None)]);
        assert_eq!(summary.deployable, None);
        assert_eq!(summary.reason, "Missing one or more verification results");
    }

    #[test]
    fn all_successful_is_deployable() {
        let summary = summarize(&[row(Some(true)), row(Some(true))]);
        assert_eq!(summary.deployable, Some(true));
        assert_eq!(
            summary.reason,
            "All verification results are published and successful"
        );
    }

    #[test]
    fn any_failure_blocks_deployment() {
        let summary = summarize(&[row(Some(true)), row(Some(false))]);
        assert_eq!(summary.deployable, Some(false));
        assert_eq!(summary.reason, "One or more verifications have failed");
    }

    #[test]
    fn a_missing_result_outranks_a_failure() {
        // An unanswered verification makes the verdict unknown even when a
        // failure is already present.
        let summary = summarize(&[row(Some(false)), row(None)]);
        assert_eq!(summary.deployable, None);
        assert_eq!(summary.reason, "Missing one or more verification results");
    }
}
