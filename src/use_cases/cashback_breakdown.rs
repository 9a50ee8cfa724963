//! Cashback breakdown use case.
//! Sums every purchase of a reseller, picks one tier for that total and
//! spreads it over the individual purchases.

use bigdecimal::BigDecimal;
use std::sync::Arc;

use crate::domain::money::parse_amount;
use crate::domain::{CashbackError, PurchaseView, TierClassifier};
use crate::ports::{PurchaseRepository, ResellerRepository};

pub struct CashbackBreakdown {
    resellers: Arc<dyn ResellerRepository>,
    purchases: Arc<dyn PurchaseRepository>,
    classifier: TierClassifier,
}

impl CashbackBreakdown {
    pub fn new(
        resellers: Arc<dyn ResellerRepository>,
        purchases: Arc<dyn PurchaseRepository>,
        classifier: TierClassifier,
    ) -> Self {
        Self {
            resellers,
            purchases,
            classifier,
        }
    }

    /// Purchases of `cpf` in store order, each with its cashback share.
    ///
    /// The tier comes from the sum of all purchases, so adding a purchase can
    /// change the cashback shown for the others.
    pub async fn execute(&self, cpf: Option<&str>) -> Result<Vec<PurchaseView>, CashbackError> {
        let cpf = match cpf.map(str::trim) {
            Some(cpf) if !cpf.is_empty() => cpf,
            _ => {
                tracing::error!("Error validating parameters: CPF not supplied");
                return Err(CashbackError::MissingIdentifier);
            }
        };

        tracing::debug!(cpf = %cpf, "Retrieving reseller");
        if self.resellers.find_by_cpf(cpf).await?.is_none() {
            tracing::error!(cpf = %cpf, "Reseller not found");
            return Err(CashbackError::ResellerNotFound(cpf.to_string()));
        }

        tracing::debug!(cpf = %cpf, "Retrieving purchases");
        let purchases = self.purchases.find_by_cpf(cpf).await?;
        if purchases.is_empty() {
            tracing::error!(cpf = %cpf, "Purchases not found");
            return Err(CashbackError::NoPurchasesFound(cpf.to_string()));
        }

        let zero = BigDecimal::from(0);
        let amounts = purchases
            .iter()
            .map(|purchase| {
                parse_amount(&purchase.amount)
                    .filter(|amount| *amount >= zero)
                    .ok_or_else(|| {
                        tracing::error!(
                            purchase_id = purchase.id,
                            amount = %purchase.amount,
                            "Stored purchase amount is not a non-negative number"
                        );
                        CashbackError::InvalidValue(purchase.amount.clone())
                    })
            })
            .collect::<Result<Vec<BigDecimal>, _>>()?;

        let total = amounts
            .iter()
            .fold(zero, |acc, amount| acc + amount);
        tracing::debug!(cpf = %cpf, total = %total, "Calculated total amount");

        let classification = self.classifier.classify(Some(&total))?;

        let views = purchases
            .into_iter()
            .zip(amounts.iter())
            .enumerate()
            .map(|(index, (purchase, amount))| {
                let cashback = classification.allocate(amount);
                tracing::debug!(
                    item = index + 1,
                    percentage = %cashback.percentage,
                    amount = %cashback.amount,
                    "Calculated item cashback"
                );
                PurchaseView::new(purchase, cashback)
            })
            .collect();

        Ok(views)
    }
}
