//! Cashback tiers and the classifier that picks one for a purchase total.

use bigdecimal::BigDecimal;
use serde::Serialize;
use thiserror::Error;

use crate::domain::money::{parse_amount, percentage_of};
use crate::ports::RepositoryError;

#[derive(Error, Debug)]
pub enum CashbackError {
    #[error("CPF não informado")]
    MissingIdentifier,

    #[error("Revendedor não encontrado: {0}")]
    ResellerNotFound(String),

    #[error("Compras não encontradas para o CPF {0}")]
    NoPurchasesFound(String),

    #[error("Valor não informado")]
    MissingValue,

    #[error("Valor informado é inválido: {0}")]
    InvalidValue(String),

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Ten,
    Fifteen,
    Twenty,
}

impl Tier {
    pub fn percentage(self) -> u32 {
        match self {
            Tier::Ten => 10,
            Tier::Fifteen => 15,
            Tier::Twenty => 20,
        }
    }
}

/// Cashback share attached to a purchase. Both fields are text on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashbackAllocation {
    #[serde(rename = "percentual")]
    pub percentage: String,
    #[serde(rename = "valor")]
    pub amount: String,
}

/// Result of classifying a total: the tier plus the cashback on that total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub tier: Tier,
    pub amount: String,
}

impl Classification {
    pub fn percentage(&self) -> u32 {
        self.tier.percentage()
    }

    /// Applies this classification's percentage to a single purchase amount.
    pub fn allocate(&self, item_amount: &BigDecimal) -> CashbackAllocation {
        CashbackAllocation {
            percentage: self.percentage().to_string(),
            amount: percentage_of(item_amount, self.percentage()),
        }
    }
}

/// Maps a total to a tier. Ceilings are inclusive:
/// `total <= ten_percent_ceiling` is 10%, up to and including
/// `fifteen_percent_ceiling` is 15%, anything above is 20%.
#[derive(Debug, Clone)]
pub struct TierClassifier {
    ten_percent_ceiling: BigDecimal,
    fifteen_percent_ceiling: BigDecimal,
}

impl Default for TierClassifier {
    fn default() -> Self {
        Self::new(BigDecimal::from(1000), BigDecimal::from(1500))
    }
}

impl TierClassifier {
    pub fn new(ten_percent_ceiling: BigDecimal, fifteen_percent_ceiling: BigDecimal) -> Self {
        Self {
            ten_percent_ceiling,
            fifteen_percent_ceiling,
        }
    }

    pub fn tier_for(&self, total: &BigDecimal) -> Tier {
        if total <= &self.ten_percent_ceiling {
            Tier::Ten
        } else if total <= &self.fifteen_percent_ceiling {
            Tier::Fifteen
        } else {
            Tier::Twenty
        }
    }

    /// Classifies a total. A zero total counts as not supplied; a negative
    /// one is invalid.
    pub fn classify(&self, total: Option<&BigDecimal>) -> Result<Classification, CashbackError> {
        let zero = BigDecimal::from(0);
        let total = match total {
            Some(total) if *total != zero => total,
            _ => {
                tracing::error!("Error validating parameters: total not supplied");
                return Err(CashbackError::MissingValue);
            }
        };
        if *total < zero {
            tracing::error!(total = %total, "Error validating parameters: negative total");
            return Err(CashbackError::InvalidValue(total.to_string()));
        }

        let tier = self.tier_for(total);
        let amount = percentage_of(total, tier.percentage());
        tracing::debug!(
            percentage = tier.percentage(),
            amount = %amount,
            "Cashback calculated"
        );

        Ok(Classification { tier, amount })
    }

    /// Classifies a total given as comma-decimal text.
    pub fn classify_text(&self, raw: Option<&str>) -> Result<Classification, CashbackError> {
        let raw = match raw.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(CashbackError::MissingValue),
        };
        let total = parse_amount(raw).ok_or_else(|| {
            tracing::error!(value = %raw, "Error validating parameters: invalid total");
            CashbackError::InvalidValue(raw.to_string())
        })?;
        self.classify(Some(&total))
    }
}
