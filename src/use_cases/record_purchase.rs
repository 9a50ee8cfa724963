//! Record purchase use case.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{NewPurchase, Purchase, PurchaseStatus};
use crate::error::AppError;
use crate::ports::{PurchaseRepository, ResellerRepository};

pub const RESELLER_NOT_FOUND_MESSAGE: &str = "Revendedor não encontrado";

/// Validated purchase data as sent by the reseller.
#[derive(Debug, Clone)]
pub struct PurchaseRequest {
    pub cpf: String,
    pub code: String,
    pub amount: String,
    pub date: String,
}

pub struct RecordPurchase {
    resellers: Arc<dyn ResellerRepository>,
    purchases: Arc<dyn PurchaseRepository>,
    auto_approved_cpfs: HashSet<String>,
}

impl RecordPurchase {
    pub fn new(
        resellers: Arc<dyn ResellerRepository>,
        purchases: Arc<dyn PurchaseRepository>,
        auto_approved_cpfs: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            resellers,
            purchases,
            auto_approved_cpfs: auto_approved_cpfs.into_iter().collect(),
        }
    }

    /// Purchases start pending validation unless the reseller is on the
    /// auto-approval list.
    pub fn initial_status(&self, cpf: &str) -> PurchaseStatus {
        if self.auto_approved_cpfs.contains(cpf) {
            PurchaseStatus::Approved
        } else {
            PurchaseStatus::PendingValidation
        }
    }

    pub async fn execute(&self, request: PurchaseRequest) -> Result<Purchase, AppError> {
        tracing::debug!(cpf = %request.cpf, code = %request.code, "Recording purchase");

        let reseller = self.resellers.find_by_cpf(&request.cpf).await.map_err(|e| {
            tracing::error!("Error getting reseller: {}", e);
            e
        })?;
        if reseller.is_none() {
            tracing::error!(cpf = %request.cpf, "Reseller not found");
            return Err(AppError::NotFound(RESELLER_NOT_FOUND_MESSAGE.to_string()));
        }

        let status = self.initial_status(&request.cpf);
        let purchase = self
            .purchases
            .insert(&NewPurchase {
                cpf: request.cpf,
                code: request.code,
                amount: request.amount,
                date: request.date,
                status,
            })
            .await
            .map_err(|e| {
                tracing::error!("Error creating purchase: {}", e);
                e
            })?;

        tracing::info!(id = purchase.id, status = %purchase.status, "Purchase created");
        Ok(purchase)
    }
}
