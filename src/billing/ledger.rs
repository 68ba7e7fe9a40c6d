//! Billing document ledger.

use tracing::info;

use crate::catalog::OrderedCollection;
use crate::config::BillingConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{BillingDocument, BillingStatus, Contract, TariffDefinition};

use super::{MeterReadingLog, simulate_billing};

/// Numbers billing documents and tracks their lifecycle.
///
/// Simulations are not stored; only invoicing adds a document to the ledger.
/// A stored document moves from `Invoiced` to `Cancelled` and never back.
#[derive(Debug, Clone, Default)]
pub struct BillingLedger {
    documents: OrderedCollection<BillingDocument>,
}

impl BillingLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id the next document will get: `R001`, `R002`, ...
    pub fn next_document_id(&self) -> String {
        format!("R{:03}", self.documents.len() + 1)
    }

    /// Runs a billing simulation numbered with the next document id.
    pub fn simulate<'a, I>(
        &self,
        contract: &Contract,
        readings: &MeterReadingLog,
        tariffs: I,
        config: &BillingConfig,
    ) -> EngineResult<BillingDocument>
    where
        I: IntoIterator<Item = &'a TariffDefinition>,
    {
        simulate_billing(self.next_document_id(), contract, readings, tariffs, config)
    }

    /// Turns a simulation into an invoice and stores it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDocumentState` if the document is not a simulation or
    /// its id is already taken.
    pub fn invoice(&mut self, mut document: BillingDocument) -> EngineResult<&BillingDocument> {
        if document.status != BillingStatus::Simulation {
            return Err(EngineError::InvalidDocumentState {
                document_id: document.id,
                message: format!("only simulations can be invoiced, status is {:?}", document.status),
            });
        }
        if self.get(&document.id).is_some() {
            return Err(EngineError::InvalidDocumentState {
                document_id: document.id,
                message: "a document with this id is already invoiced".to_string(),
            });
        }

        document.status = BillingStatus::Invoiced;
        info!(
            document_id = %document.id,
            contract_id = %document.contract_id,
            total_amount = %document.total_amount,
            "Billing document invoiced"
        );
        let index = self.documents.add(document);
        Ok(&self.documents.as_slice()[index])
    }

    /// Cancels an invoiced document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDocumentState` if no document has this id or it is
    /// already cancelled.
    pub fn cancel(&mut self, document_id: &str) -> EngineResult<()> {
        let index = self
            .documents
            .position(|d| d.id == document_id)
            .ok_or_else(|| EngineError::InvalidDocumentState {
                document_id: document_id.to_string(),
                message: "no such document".to_string(),
            })?;

        self.documents.update_at(index, |document| {
            if document.status != BillingStatus::Invoiced {
                return Err(EngineError::InvalidDocumentState {
                    document_id: document.id.clone(),
                    message: format!(
                        "only invoiced documents can be cancelled, status is {:?}",
                        document.status
                    ),
                });
            }
            document.status = BillingStatus::Cancelled;
            Ok(())
        })?;

        info!(document_id, "Billing document cancelled");
        Ok(())
    }

    /// Looks up a stored document.
    pub fn get(&self, document_id: &str) -> Option<&BillingDocument> {
        self.documents.iter().find(|d| d.id == document_id)
    }

    /// Returns the stored documents in invoicing order.
    pub fn documents(&self) -> &[BillingDocument] {
        self.documents.as_slice()
    }
}
