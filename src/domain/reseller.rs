//! Reseller domain entity.

use serde::Serialize;

/// A registered reseller, keyed by CPF.
#[derive(Debug, Clone, Serialize)]
pub struct Reseller {
    pub cpf: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Reseller ready to be stored; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewReseller {
    pub cpf: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl From<NewReseller> for Reseller {
    fn from(new: NewReseller) -> Self {
        Self {
            cpf: new.cpf,
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
        }
    }
}
