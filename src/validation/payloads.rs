//! Request bodies and the field rules each must satisfy before it is handed
//! to a use case. Every field is optional at the JSON level so a missing
//! field produces the rule's message instead of a generic decode error.

use bigdecimal::BigDecimal;
use serde::Deserialize;

use super::{
    fits, is_present, is_valid_cpf, is_valid_email, sanitize_string, validate_fields, FieldRule,
    ValidationError, AMOUNT_MAX_LEN, CODE_MAX_LEN, DATE_MAX_LEN, EMAIL_MAX_LEN, NAME_MAX_LEN,
};
use crate::domain::money::parse_amount;
use crate::use_cases::{Credentials, PurchaseRequest, ResellerRegistration};

pub const INVALID_CPF: &str = "CPF inválido - deve conter 11 dígitos sem pontos e traços";

fn check_cpf(cpf: Option<&str>) -> Result<(), String> {
    match cpf {
        Some(cpf) if is_valid_cpf(cpf) => Ok(()),
        _ => Err(INVALID_CPF.to_string()),
    }
}

fn check_text(value: Option<&str>, max_len: usize, message: &str) -> Result<(), String> {
    if is_present(value) && fits(value, max_len) {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

/// Non-negative comma-decimal number, e.g. "1234,56".
fn check_amount(amount: Option<&str>) -> Result<(), String> {
    match amount.and_then(parse_amount) {
        Some(value) if value >= BigDecimal::from(0) => Ok(()),
        _ => Err("Valor inválido".to_string()),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ResellerPayload {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "senha")]
    pub password: Option<String>,
}

const RESELLER_RULES: &[FieldRule<ResellerPayload>] = &[
    FieldRule {
        field: "nome",
        check: |p| check_text(p.name.as_deref(), NAME_MAX_LEN, "Nome inválido"),
    },
    FieldRule {
        field: "cpf",
        check: |p| check_cpf(p.cpf.as_deref()),
    },
    FieldRule {
        field: "email",
        check: |p| match p.email.as_deref() {
            Some(email) if fits(Some(email), EMAIL_MAX_LEN) && is_valid_email(email) => Ok(()),
            _ => Err("E-mail inválido".to_string()),
        },
    },
    FieldRule {
        field: "senha",
        check: |p| match p.password.as_deref() {
            Some(password) if !password.is_empty() => Ok(()),
            _ => Err("Senha inválida".to_string()),
        },
    },
];

impl ResellerPayload {
    pub fn validate(self) -> Result<ResellerRegistration, ValidationError> {
        validate_fields(&self, RESELLER_RULES)?;
        Ok(ResellerRegistration {
            cpf: self.cpf.unwrap_or_default(),
            name: sanitize_string(&self.name.unwrap_or_default()),
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PurchasePayload {
    #[serde(rename = "codigo")]
    pub code: Option<String>,
    pub cpf: Option<String>,
    #[serde(rename = "valor")]
    pub amount: Option<String>,
    #[serde(rename = "data")]
    pub date: Option<String>,
}

const PURCHASE_RULES: &[FieldRule<PurchasePayload>] = &[
    FieldRule {
        field: "codigo",
        check: |p| check_text(p.code.as_deref(), CODE_MAX_LEN, "Código inválido"),
    },
    FieldRule {
        field: "cpf",
        check: |p| check_cpf(p.cpf.as_deref()),
    },
    FieldRule {
        field: "valor",
        check: |p| {
            check_text(p.amount.as_deref(), AMOUNT_MAX_LEN, "Valor inválido")?;
            check_amount(p.amount.as_deref())
        },
    },
    FieldRule {
        field: "data",
        check: |p| check_text(p.date.as_deref(), DATE_MAX_LEN, "Data inválida"),
    },
];

impl PurchasePayload {
    pub fn validate(self) -> Result<PurchaseRequest, ValidationError> {
        validate_fields(&self, PURCHASE_RULES)?;
        Ok(PurchaseRequest {
            cpf: self.cpf.unwrap_or_default(),
            code: sanitize_string(&self.code.unwrap_or_default()),
            amount: sanitize_string(&self.amount.unwrap_or_default()),
            date: sanitize_string(&self.date.unwrap_or_default()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginPayload {
    pub cpf: Option<String>,
    #[serde(rename = "senha")]
    pub password: Option<String>,
}

const LOGIN_RULES: &[FieldRule<LoginPayload>] = &[
    FieldRule {
        field: "cpf",
        check: |p| {
            if is_present(p.cpf.as_deref()) {
                Ok(())
            } else {
                Err("CPF é obrigatório".to_string())
            }
        },
    },
    FieldRule {
        field: "senha",
        check: |p| match p.password.as_deref() {
            Some(password) if !password.is_empty() => Ok(()),
            _ => Err("Senha é obrigatória".to_string()),
        },
    },
];

impl LoginPayload {
    pub fn validate(self) -> Result<Credentials, ValidationError> {
        validate_fields(&self, LOGIN_RULES)?;
        Ok(Credentials {
            cpf: self.cpf.unwrap_or_default().trim().to_string(),
            password: self.password.unwrap_or_default(),
        })
    }
}
