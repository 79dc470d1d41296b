use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    ComplianceDocument, ComplianceRequestReceipt, TrainerComplianceRecord, TrainerComplianceView,
    TrainerId, VerificationUpdate,
};
use super::notices::{DeliveryError, NoticeCatalog, NoticeMailer};
use super::repository::{RepositoryError, TrainerRepository};
use crate::workflows::access::OperatorId;

/// Service composing the trainer store, the notice catalog, and the mailer.
pub struct TrainerComplianceService<R, M> {
    repository: Arc<R>,
    mailer: Arc<M>,
    catalog: NoticeCatalog,
}

impl<R, M> TrainerComplianceService<R, M>
where
    R: TrainerRepository + 'static,
    M: NoticeMailer + 'static,
{
    pub fn new(repository: Arc<R>, mailer: Arc<M>, catalog: NoticeCatalog) -> Self {
        Self {
            repository,
            mailer,
            catalog,
        }
    }

    /// Send one compliance-document request to the trainer and record when it
    /// went out.
    ///
    /// The timestamp is only written after the mailer accepts the notice, so a
    /// delivery failure leaves the record untouched. Background-check requests
    /// are sent but never stamped; the record has no column for them.
    pub fn request_document(
        &self,
        trainer_id: TrainerId,
        document: ComplianceDocument,
        actor: OperatorId,
    ) -> Result<ComplianceRequestReceipt, ComplianceServiceError> {
        let mut record = self
            .repository
            .fetch(trainer_id)?
            .ok_or(RepositoryError::NotFound)?;

        let recipient = match record.email.as_deref() {
            Some(address) if !address.trim().is_empty() => address.trim().to_string(),
            _ => return Err(ComplianceServiceError::NoContactAddress(trainer_id)),
        };

        let notice = self
            .catalog
            .render(document, &record.first_name)
            .addressed_to(recipient.clone());

        if let Err(err) = self.mailer.send(notice) {
            warn!(trainer = trainer_id.0, document = document.label(), %err, "compliance notice undeliverable");
            return Err(ComplianceServiceError::Delivery(err));
        }

        let requested_at = Utc::now();
        let recorded = match document {
            ComplianceDocument::Safesport => {
                record.safesport_requested_at = Some(requested_at);
                true
            }
            ComplianceDocument::W9 => {
                record.w9_requested_at = Some(requested_at);
                true
            }
            ComplianceDocument::BackgroundCheck => false,
        };
        if recorded {
            self.repository.update(record)?;
        }

        info!(
            trainer = trainer_id.0,
            document = document.label(),
            operator = actor.0,
            "compliance document requested"
        );

        Ok(ComplianceRequestReceipt {
            trainer_id,
            document,
            recipient,
            requested_at,
            recorded,
        })
    }

    /// Apply an operator's verification decision.
    pub fn mark_verified(
        &self,
        trainer_id: TrainerId,
        update: VerificationUpdate,
    ) -> Result<TrainerComplianceView, ComplianceServiceError> {
        let mut record = self
            .repository
            .fetch(trainer_id)?
            .ok_or(RepositoryError::NotFound)?;

        record.is_verified = update.verified;
        if update.verified {
            if update.safesport {
                record.safesport_verified = true;
            }
            if update.w9 {
                record.w9_submitted = true;
            }
            if update.background {
                record.background_verified = true;
            }
        }

        self.repository.update(record.clone())?;

        info!(
            trainer = trainer_id.0,
            verified = update.verified,
            operator = update.actor.0,
            "trainer verification updated"
        );

        Ok(record.status_view())
    }

    /// Fetch a trainer's compliance state for API responses.
    pub fn compliance_view(
        &self,
        trainer_id: TrainerId,
    ) -> Result<TrainerComplianceView, ComplianceServiceError> {
        let record = self
            .repository
            .fetch(trainer_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record.status_view())
    }

    /// Trainers still awaiting verification, for the outstanding-compliance screen.
    pub fn outstanding(
        &self,
        limit: usize,
    ) -> Result<Vec<TrainerComplianceView>, ComplianceServiceError> {
        let records = self.repository.unverified(limit)?;
        Ok(records
            .iter()
            .map(TrainerComplianceRecord::status_view)
            .collect())
    }
}

/// Error raised by the compliance service.
#[derive(Debug, thiserror::Error)]
pub enum ComplianceServiceError {
    #[error("trainer {0} has no contact address on file")]
    NoContactAddress(TrainerId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
