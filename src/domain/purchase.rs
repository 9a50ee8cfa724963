//! Purchase domain entity.
//! Amount and date are kept as the text the reseller sent; only the cashback
//! calculation gives the amount a numeric meaning.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::cashback::CashbackAllocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseStatus {
    #[serde(rename = "Em validação")]
    PendingValidation,
    #[serde(rename = "Aprovado")]
    Approved,
}

impl PurchaseStatus {
    pub const ALL: [PurchaseStatus; 2] = [PurchaseStatus::PendingValidation, PurchaseStatus::Approved];

    pub fn as_str(self) -> &'static str {
        match self {
            PurchaseStatus::PendingValidation => "Em validação",
            PurchaseStatus::Approved => "Aprovado",
        }
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        PurchaseStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| format!("unknown purchase status: {}", value))
    }
}

/// A stored purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Purchase {
    pub id: i64,
    pub cpf: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "valor")]
    pub amount: String,
    #[serde(rename = "data")]
    pub date: String,
    pub status: PurchaseStatus,
}

/// Purchase ready to be stored. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub cpf: String,
    pub code: String,
    pub amount: String,
    pub date: String,
    pub status: PurchaseStatus,
}

/// A purchase as shown to the reseller: no row id, no CPF, plus its cashback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseView {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "valor")]
    pub amount: String,
    #[serde(rename = "data")]
    pub date: String,
    pub status: PurchaseStatus,
    pub cashback: CashbackAllocation,
}

impl PurchaseView {
    pub fn new(purchase: Purchase, cashback: CashbackAllocation) -> Self {
        Self {
            code: purchase.code,
            amount: purchase.amount,
            date: purchase.date,
            status: purchase.status,
            cashback,
        }
    }
}
