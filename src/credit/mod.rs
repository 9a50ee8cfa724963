//! Client for the external service that reports a reseller's accumulated
//! cashback credit.

pub mod client;

pub use client::{CreditApiClient, CreditApiError};
