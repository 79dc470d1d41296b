use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::workflows::access::OperatorId;
use crate::workflows::trainers::TrainerId;

/// Identifier assigned to a payout by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PayoutId(pub i64);

impl std::fmt::Display for PayoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payout lifecycle: `pending` on creation, `completed` once a transaction id
/// is recorded. There are no other states and no reverse transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Pending,
    Completed,
}

impl PayoutStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::Completed => "completed",
        }
    }
}

/// Command payload for scheduling a disbursement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayout {
    pub trainer_id: TrainerId,
    pub amount: Decimal,
    /// Opaque label such as "bank_transfer" or "manual".
    pub method: String,
    pub actor: OperatorId,
}

/// Command payload for recording a settled disbursement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletePayout {
    pub transaction_id: String,
    pub actor: OperatorId,
}

/// Durable payout row. `transaction_id` and `completed_at` are only ever set
/// together, on completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutRecord {
    pub payout_id: PayoutId,
    pub trainer_id: TrainerId,
    pub amount: Decimal,
    pub method: String,
    pub status: PayoutStatus,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_by: OperatorId,
}

impl PayoutRecord {
    pub fn status_view(&self) -> PayoutView {
        PayoutView {
            payout_id: self.payout_id,
            trainer_id: self.trainer_id,
            amount: self.amount,
            method: self.method.clone(),
            status: self.status.label(),
            transaction_id: self.transaction_id.clone(),
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }
}

/// Sanitized representation of a payout for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct PayoutView {
    pub payout_id: PayoutId,
    pub trainer_id: TrainerId,
    pub amount: Decimal,
    pub method: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}
