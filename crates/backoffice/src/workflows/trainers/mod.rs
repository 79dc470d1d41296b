//! Trainer compliance workflow: document request dispatch and the
//! operator-controlled verification gate.

pub mod domain;
pub mod notices;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ComplianceDocument, ComplianceRequestCommand, ComplianceRequestReceipt,
    TrainerComplianceRecord, TrainerComplianceView, TrainerId, VerificationUpdate,
};
pub use notices::{DeliveryError, EmailNotice, NoticeCatalog, NoticeMailer, NoticeTemplate};
pub use repository::{RepositoryError, TrainerRepository};
pub use router::{compliance_router, ComplianceRouterState};
pub use service::{ComplianceServiceError, TrainerComplianceService};
