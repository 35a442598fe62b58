//! PIX key payloads.

use crate::app_lib::AppError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PixKeyType {
    #[default]
    Cpf,
    Email,
    Phone,
    Random,
}

impl PixKeyType {
    pub const ALL: [PixKeyType; 4] = [
        PixKeyType::Cpf,
        PixKeyType::Email,
        PixKeyType::Phone,
        PixKeyType::Random,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PixKeyType::Cpf => "CPF",
            PixKeyType::Email => "EMAIL",
            PixKeyType::Phone => "PHONE",
            PixKeyType::Random => "RANDOM",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PixKey {
    pub id: i64,
    pub pix_key: String,
    pub key_type: PixKeyType,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PixKeyRequest {
    pub bank_account_id: i64,
    pub pix_key: String,
    pub key_type: PixKeyType,
}

impl PixKeyRequest {
    pub fn new(bank_account_id: i64, pix_key: &str, key_type: PixKeyType) -> Result<Self, AppError> {
        let pix_key = pix_key.trim();
        if pix_key.is_empty() {
            return Err(AppError::Validation("PIX key is required.".to_string()));
        }
        Ok(Self {
            bank_account_id,
            pix_key: pix_key.to_string(),
            key_type,
        })
    }
}
