//! Bank account payloads.

use serde::{Deserialize, Serialize};

/// A customer's virtual account as returned by `/bank-accounts`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: i64,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub agency_number: Option<String>,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub pix_key: Option<String>,
    #[serde(default)]
    pub pix_key_type: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBankAccountRequest {
    pub customer_id: i64,
}

/// Owner of a destination account, shown before a transfer is confirmed.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipientInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub agency_number: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub pix_key: Option<String>,
    #[serde(default)]
    pub pix_key_type: Option<String>,
}
