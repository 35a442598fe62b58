//! Company payloads and the checks the backend applies to them.

use crate::app_lib::AppError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const CONVENIO_TYPES: [&str; 2] = ["PUBLIC", "PRIVATE"];

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    #[serde(default)]
    pub keycloak_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cnpj: String,
    #[serde(default)]
    pub responsible: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, rename = "type")]
    pub convenio_type: String,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CompanyRequest {
    pub name: String,
    pub cnpj: String,
    pub responsible: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub convenio_type: String,
}

impl Default for CompanyRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            cnpj: String::new(),
            responsible: String::new(),
            email: String::new(),
            phone: String::new(),
            convenio_type: CONVENIO_TYPES[0].to_string(),
        }
    }
}

impl From<&Company> for CompanyRequest {
    fn from(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            cnpj: company.cnpj.clone(),
            responsible: company.responsible.clone(),
            email: company.email.clone(),
            phone: company.phone.clone(),
            convenio_type: company.convenio_type.clone(),
        }
    }
}

impl CompanyRequest {
    /// Trims fields, strips CNPJ punctuation and rejects what the backend would.
    pub fn normalized(&self) -> Result<Self, AppError> {
        let request = Self {
            name: self.name.trim().to_string(),
            cnpj: self.cnpj.chars().filter(char::is_ascii_digit).collect(),
            responsible: self.responsible.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            convenio_type: self.convenio_type.trim().to_uppercase(),
        };

        require(&request.name, "Company name is required.")?;
        require(&request.responsible, "Responsible name is required.")?;
        require(&request.email, "Email is required.")?;
        require(&request.phone, "Phone is required.")?;
        require(&request.convenio_type, "Agreement type is required.")?;
        if request.cnpj.len() != 14 {
            return Err(AppError::Validation(
                "CNPJ must contain 14 digits.".to_string(),
            ));
        }
        if !is_email(&request.email) {
            return Err(AppError::Validation("Invalid email.".to_string()));
        }
        Ok(request)
    }
}

pub(crate) fn require(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::Validation(message.to_string()))
    } else {
        Ok(())
    }
}

pub(crate) fn is_email(value: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::{Company, CompanyRequest};
    use crate::app_lib::AppError;
    use serde_json::json;

    fn request() -> CompanyRequest {
        CompanyRequest {
            name: " Prefeitura de Recife ".to_string(),
            cnpj: "12.345.678/0001-90".to_string(),
            responsible: "Maria".to_string(),
            email: "rh@recife.gov.br".to_string(),
            phone: "81999990000".to_string(),
            convenio_type: "public".to_string(),
        }
    }

    #[test]
    fn normalized_strips_cnpj_punctuation() {
        let normalized = request().normalized().unwrap_or_default();
        assert_eq!(normalized.cnpj, "12345678000190");
        assert_eq!(normalized.name, "Prefeitura de Recife");
        assert_eq!(normalized.convenio_type, "PUBLIC");
    }

    #[test]
    fn short_cnpj_is_rejected() {
        let mut invalid = request();
        invalid.cnpj = "123".to_string();
        assert_eq!(
            invalid.normalized(),
            Err(AppError::Validation("CNPJ must contain 14 digits.".to_string()))
        );
    }

    #[test]
    fn bad_email_is_rejected() {
        let mut invalid = request();
        invalid.email = "not-an-email".to_string();
        assert!(invalid.normalized().is_err());
    }

    #[test]
    fn type_field_uses_wire_name() {
        let company: Company = serde_json::from_value(json!({
            "id": 3,
            "name": "Acme",
            "type": "PRIVATE",
            "keycloakId": "kc-3"
        }))
        .unwrap_or_default();
        assert_eq!(company.convenio_type, "PRIVATE");
        let wire = serde_json::to_value(CompanyRequest::from(&company)).unwrap_or_default();
        assert_eq!(wire["type"], "PRIVATE");
    }
}
