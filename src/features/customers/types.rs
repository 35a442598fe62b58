//! Customer payloads. Request validation mirrors the backend's constraints so
//! forms fail before a round trip.

use crate::{
    app_lib::AppError,
    features::companies::types::{is_email, require},
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static CPF_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d{3}\.\d{3}\.\d{3}-\d{2}|\d{11})$").ok());
static PHONE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").ok());

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    #[serde(default)]
    pub keycloak_id: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub street_number: Option<f64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub virtual_account_number: Option<String>,
    #[serde(default)]
    pub virtual_agency_number: Option<String>,
    #[serde(default)]
    pub virtual_balance: Option<f64>,
    #[serde(default)]
    pub salary: Option<f64>,
}

impl Customer {
    /// Whether the identity-provider account is enabled. Unknown counts as enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    pub company_id: Option<i64>,
    pub occupation: String,
    pub street: String,
    pub street_number: Option<i64>,
    pub city: String,
    pub neighborhood: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub salary: f64,
}

impl Default for CustomerRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            cpf: String::new(),
            email: String::new(),
            phone: String::new(),
            birth_date: None,
            company_id: None,
            occupation: String::new(),
            street: String::new(),
            street_number: None,
            city: String::new(),
            neighborhood: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: "Brasil".to_string(),
            salary: 0.0,
        }
    }
}

impl From<&Customer> for CustomerRequest {
    fn from(customer: &Customer) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        #[allow(clippy::cast_possible_truncation)]
        let street_number = customer.street_number.map(|number| number as i64);
        Self {
            name: customer.name.clone(),
            cpf: customer.cpf.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            birth_date: customer.birth_date.clone(),
            company_id: customer.company_id,
            occupation: text(&customer.occupation),
            street: text(&customer.street),
            street_number,
            city: text(&customer.city),
            neighborhood: text(&customer.neighborhood),
            state: text(&customer.state),
            zip_code: text(&customer.zip_code),
            country: text(&customer.country),
            salary: customer.salary.unwrap_or_default(),
        }
    }
}

impl CustomerRequest {
    /// Rejects requests the backend would refuse, first failure wins.
    pub fn validate(&self) -> Result<(), AppError> {
        require(&self.name, "Name is required.")?;
        require(&self.cpf, "CPF is required.")?;
        if !matches(&CPF_PATTERN, self.cpf.trim()) {
            return Err(AppError::Validation(
                "Invalid CPF. Use XXX.XXX.XXX-XX or digits only.".to_string(),
            ));
        }
        require(&self.email, "Email is required.")?;
        if !is_email(self.email.trim()) {
            return Err(AppError::Validation("Invalid email.".to_string()));
        }
        require(&self.phone, "Phone is required.")?;
        if !matches(&PHONE_PATTERN, self.phone.trim()) {
            return Err(AppError::Validation(
                "Invalid phone. Use 10 to 15 digits.".to_string(),
            ));
        }
        if self.company_id.is_none() {
            return Err(AppError::Validation(
                "Partner company is required.".to_string(),
            ));
        }
        require(&self.occupation, "Occupation is required.")?;
        require(&self.street, "Street is required.")?;
        if !self.street_number.is_some_and(|number| number >= 1) {
            return Err(AppError::Validation(
                "Street number must be positive.".to_string(),
            ));
        }
        require(&self.city, "City is required.")?;
        require(&self.neighborhood, "Neighborhood is required.")?;
        require(&self.state, "State is required.")?;
        require(&self.zip_code, "ZIP code is required.")?;
        require(&self.country, "Country is required.")?;
        if self.salary <= 0.0 || !self.salary.is_finite() {
            return Err(AppError::Validation(
                "Salary must be positive.".to_string(),
            ));
        }
        Ok(())
    }
}

fn matches(pattern: &LazyLock<Option<Regex>>, value: &str) -> bool {
    pattern.as_ref().is_some_and(|regex| regex.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::{Customer, CustomerRequest};
    use crate::app_lib::AppError;

    fn valid() -> CustomerRequest {
        CustomerRequest {
            name: "João Silva".to_string(),
            cpf: "123.456.789-09".to_string(),
            email: "joao@example.com".to_string(),
            phone: "+5581999990000".to_string(),
            company_id: Some(3),
            occupation: "Nurse".to_string(),
            street: "Rua A".to_string(),
            street_number: Some(10),
            city: "Recife".to_string(),
            neighborhood: "Boa Vista".to_string(),
            state: "PE".to_string(),
            zip_code: "50000-000".to_string(),
            salary: 3500.0,
            ..CustomerRequest::default()
        }
    }

    #[test]
    fn valid_request_passes() {
        assert_eq!(valid().validate(), Ok(()));
        let digits_only = CustomerRequest {
            cpf: "12345678909".to_string(),
            ..valid()
        };
        assert_eq!(digits_only.validate(), Ok(()));
    }

    #[test]
    fn malformed_cpf_is_rejected() {
        let request = CustomerRequest {
            cpf: "123.456.789".to_string(),
            ..valid()
        };
        assert!(matches!(request.validate(), Err(AppError::Validation(m)) if m.contains("CPF")));
    }

    #[test]
    fn short_phone_is_rejected() {
        let request = CustomerRequest {
            phone: "12345".to_string(),
            ..valid()
        };
        assert!(matches!(request.validate(), Err(AppError::Validation(m)) if m.contains("phone")));
    }

    #[test]
    fn street_number_must_be_positive() {
        let request = CustomerRequest {
            street_number: Some(0),
            ..valid()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn missing_company_is_rejected() {
        let request = CustomerRequest {
            company_id: None,
            ..valid()
        };
        assert_eq!(
            request.validate(),
            Err(AppError::Validation("Partner company is required.".to_string()))
        );
    }

    #[test]
    fn enabled_defaults_to_true() {
        assert!(Customer::default().is_enabled());
        let disabled = Customer {
            enabled: Some(false),
            ..Customer::default()
        };
        assert!(!disabled.is_enabled());
    }
}
