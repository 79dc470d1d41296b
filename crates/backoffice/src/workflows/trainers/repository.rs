use super::domain::{TrainerComplianceRecord, TrainerId};

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Trainer profiles are created elsewhere in the marketplace; this workflow
/// only reads and updates the compliance slice of them, so there is no
/// `insert` here.
pub trait TrainerRepository: Send + Sync {
    fn fetch(&self, id: TrainerId) -> Result<Option<TrainerComplianceRecord>, RepositoryError>;
    fn update(&self, record: TrainerComplianceRecord) -> Result<(), RepositoryError>;
    /// Trainers still awaiting the verification gate, for the outstanding
    /// compliance screen.
    fn unverified(&self, limit: usize) -> Result<Vec<TrainerComplianceRecord>, RepositoryError>;
}

/// Error enumeration for trainer storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("trainer record not found")]
    NotFound,
    #[error("trainer store unavailable: {0}")]
    Unavailable(String),
}
