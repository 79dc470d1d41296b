use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::access::OperatorId;

/// Identifier wrapper for marketplace trainers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrainerId(pub i64);

impl std::fmt::Display for TrainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The independently tracked compliance documents gating a trainer's
/// eligibility to work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceDocument {
    Safesport,
    W9,
    #[serde(rename = "background")]
    BackgroundCheck,
}

impl ComplianceDocument {
    pub const fn label(self) -> &'static str {
        match self {
            ComplianceDocument::Safesport => "safesport",
            ComplianceDocument::W9 => "w9",
            ComplianceDocument::BackgroundCheck => "background",
        }
    }
}

/// Compliance state carried per trainer.
///
/// `is_verified` is an explicit operator gate; it is never derived from the
/// three document flags. Background-check requests have no timestamp column,
/// so only SafeSport and W-9 requests leave a mark on the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerComplianceRecord {
    pub trainer_id: TrainerId,
    pub first_name: String,
    pub email: Option<String>,
    pub safesport_verified: bool,
    pub w9_submitted: bool,
    pub background_verified: bool,
    pub is_verified: bool,
    pub safesport_requested_at: Option<DateTime<Utc>>,
    pub w9_requested_at: Option<DateTime<Utc>>,
}

impl TrainerComplianceRecord {
    pub fn new(trainer_id: TrainerId, first_name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            trainer_id,
            first_name: first_name.into(),
            email,
            safesport_verified: false,
            w9_submitted: false,
            background_verified: false,
            is_verified: false,
            safesport_requested_at: None,
            w9_requested_at: None,
        }
    }

    pub fn status_view(&self) -> TrainerComplianceView {
        TrainerComplianceView {
            trainer_id: self.trainer_id,
            safesport_verified: self.safesport_verified,
            w9_submitted: self.w9_submitted,
            background_verified: self.background_verified,
            is_verified: self.is_verified,
            safesport_requested_at: self.safesport_requested_at,
            w9_requested_at: self.w9_requested_at,
        }
    }
}

/// Verification command payload.
///
/// The three switches are opt-in: when `verified` is true, each switch that is
/// set flips the matching document flag to true. Nothing is ever cleared, not
/// even when `verified` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationUpdate {
    pub verified: bool,
    #[serde(default)]
    pub safesport: bool,
    #[serde(default)]
    pub w9: bool,
    #[serde(default)]
    pub background: bool,
    pub actor: OperatorId,
}

/// Command payload for requesting a compliance document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRequestCommand {
    pub document: ComplianceDocument,
    pub actor: OperatorId,
}

/// Immutable account of one compliance-document request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRequestReceipt {
    pub trainer_id: TrainerId,
    pub document: ComplianceDocument,
    pub recipient: String,
    pub requested_at: DateTime<Utc>,
    /// False for background checks, which have no timestamp column.
    pub recorded: bool,
}

impl ComplianceRequestReceipt {
    pub fn confirmation(&self) -> String {
        format!(
            "{} request sent to {}",
            self.document.label(),
            self.recipient
        )
    }
}

/// Sanitized representation of a trainer's compliance state for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct TrainerComplianceView {
    pub trainer_id: TrainerId,
    pub safesport_verified: bool,
    pub w9_submitted: bool,
    pub background_verified: bool,
    pub is_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safesport_requested_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w9_requested_at: Option<DateTime<Utc>>,
}
