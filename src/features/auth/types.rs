//! Role-scoped profile loaded after login.

use crate::features::{companies::Company, customers::Customer};

/// Backend record of the signed-in user: a customer for clients, a company
/// for company users.
#[derive(Clone, Debug, PartialEq)]
pub enum UserProfile {
    Customer(Customer),
    Company(Company),
}

impl UserProfile {
    #[must_use]
    pub fn id(&self) -> i64 {
        match self {
            UserProfile::Customer(customer) => customer.id,
            UserProfile::Company(company) => company.id,
        }
    }

    #[must_use]
    pub fn customer(&self) -> Option<&Customer> {
        match self {
            UserProfile::Customer(customer) => Some(customer),
            UserProfile::Company(_) => None,
        }
    }

    #[must_use]
    pub fn company_id(&self) -> Option<i64> {
        match self {
            UserProfile::Customer(customer) => customer.company_id,
            UserProfile::Company(company) => Some(company.id),
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            UserProfile::Customer(customer) => &customer.name,
            UserProfile::Company(company) => &company.name,
        }
    }

    #[must_use]
    pub fn virtual_account_number(&self) -> Option<&str> {
        self.customer()
            .and_then(|customer| customer.virtual_account_number.as_deref())
            .filter(|number| !number.trim().is_empty())
    }

    #[must_use]
    pub fn virtual_agency_number(&self) -> Option<&str> {
        self.customer()
            .and_then(|customer| customer.virtual_agency_number.as_deref())
            .filter(|number| !number.trim().is_empty())
    }

    /// Customers without a virtual account must open one before banking.
    #[must_use]
    pub fn needs_bank_account(&self) -> bool {
        self.customer().is_some() && self.virtual_account_number().is_none()
    }
}

/// Which backend record represents the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileKind {
    Customer,
    Company,
}

impl ProfileKind {
    /// Client is checked before company, so a user holding both loads the
    /// customer record.
    #[must_use]
    pub fn for_roles(has_client: bool, has_company: bool) -> Option<Self> {
        if has_client {
            Some(ProfileKind::Customer)
        } else if has_company {
            Some(ProfileKind::Company)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ProfileKind, UserProfile};
    use crate::features::{companies::Company, customers::Customer};

    #[test]
    fn customers_without_account_need_one() {
        let customer = Customer {
            id: 42,
            virtual_account_number: Some("  ".to_string()),
            ..Customer::default()
        };
        assert!(UserProfile::Customer(customer).needs_bank_account());

        let opened = Customer {
            id: 42,
            virtual_account_number: Some("12345-6".to_string()),
            ..Customer::default()
        };
        assert!(!UserProfile::Customer(opened).needs_bank_account());
        assert!(!UserProfile::Company(Company::default()).needs_bank_account());
    }

    #[test]
    fn deposit_coordinates_ignore_blank_values() {
        let customer = Customer {
            id: 42,
            virtual_agency_number: Some("0001".to_string()),
            virtual_account_number: Some("12345-6".to_string()),
            ..Customer::default()
        };
        let profile = UserProfile::Customer(customer);
        assert_eq!(profile.virtual_agency_number(), Some("0001"));
        assert_eq!(profile.virtual_account_number(), Some("12345-6"));

        let blank = UserProfile::Customer(Customer {
            virtual_agency_number: Some(" ".to_string()),
            ..Customer::default()
        });
        assert_eq!(blank.virtual_agency_number(), None);
        assert_eq!(UserProfile::Company(Company::default()).virtual_agency_number(), None);
    }

    #[test]
    fn client_is_checked_before_company() {
        assert_eq!(ProfileKind::for_roles(true, true), Some(ProfileKind::Customer));
        assert_eq!(ProfileKind::for_roles(false, true), Some(ProfileKind::Company));
        assert_eq!(ProfileKind::for_roles(false, false), None);
    }
}
