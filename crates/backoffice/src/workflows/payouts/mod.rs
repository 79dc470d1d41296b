//! Payout lifecycle workflow: operator-scheduled disbursements and their
//! settlement records, plus the CSV statement export.

pub mod domain;
pub mod export;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CompletePayout, NewPayout, PayoutId, PayoutRecord, PayoutStatus, PayoutView,
};
pub use export::{statement_to_string, write_statement};
pub use repository::{PayoutInsert, PayoutRepository, RepositoryError};
pub use router::{payout_router, PayoutRouterState};
pub use service::{PayoutService, PayoutServiceError};
