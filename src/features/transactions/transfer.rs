//! Transfer form rules: local validation, the generated description and the
//! request body for each method.

use crate::{
    app_lib::{AppError, format::format_brl, format::parse_amount},
    features::{
        bank_accounts::types::{BankAccount, RecipientInfo},
        transactions::types::TransactionRequest,
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransferMethod {
    /// Agency and account number of another customer.
    #[default]
    Account,
    Pix,
    /// Deposit into the user's own account.
    Deposit,
}

impl TransferMethod {
    pub const ALL: [TransferMethod; 3] = [
        TransferMethod::Account,
        TransferMethod::Pix,
        TransferMethod::Deposit,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TransferMethod::Account => "Agency and account",
            TransferMethod::Pix => "PIX key",
            TransferMethod::Deposit => "Deposit",
        }
    }

    /// Whether the method moves money out of the account.
    #[must_use]
    pub fn debits_balance(self) -> bool {
        !matches!(self, TransferMethod::Deposit)
    }

    /// Whether a recipient lookup and confirmation precede the request.
    #[must_use]
    pub fn needs_recipient(self) -> bool {
        self.debits_balance()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransferForm {
    pub method: TransferMethod,
    pub agency_number: String,
    pub account_number: String,
    pub pix_key: String,
    pub amount: String,
    pub accepted_terms: bool,
}

impl TransferForm {
    /// Checks the form against the current balance and returns the amount.
    pub fn validate(&self, balance: f64) -> Result<f64, AppError> {
        if !self.accepted_terms {
            return Err(AppError::Validation(
                "You must accept the terms of use.".to_string(),
            ));
        }
        let amount = parse_amount(&self.amount)
            .filter(|value| *value > 0.0)
            .ok_or_else(|| {
                AppError::Validation("Enter a valid amount greater than zero.".to_string())
            })?;
        match self.method {
            TransferMethod::Account
                if self.agency_number.trim().is_empty() || self.account_number.trim().is_empty() =>
            {
                return Err(AppError::Validation(
                    "Agency and account are required.".to_string(),
                ));
            }
            TransferMethod::Pix if self.pix_key.trim().is_empty() => {
                return Err(AppError::Validation("PIX key is required.".to_string()));
            }
            _ => {}
        }
        if self.method.debits_balance() && amount > balance {
            return Err(AppError::Validation(format!(
                "Insufficient balance. Your balance is {}",
                format_brl(balance)
            )));
        }
        Ok(amount)
    }

    /// Text stored with the transaction.
    #[must_use]
    pub fn describe(&self, amount: f64, recipient: Option<&RecipientInfo>) -> String {
        let value = format_brl(amount);
        let name = recipient.map_or("", |info| info.name.as_str());
        match self.method {
            TransferMethod::Account => {
                let agency = recipient
                    .and_then(|info| info.agency_number.as_deref())
                    .unwrap_or(self.agency_number.trim());
                let account = recipient
                    .and_then(|info| info.account_number.as_deref())
                    .unwrap_or(self.account_number.trim());
                format!("Transfer of {value} to agency {agency} account {account} of {name}")
            }
            TransferMethod::Pix => format!(
                "Transfer of {value} via PIX key \"{}\" to {name}",
                self.pix_key.trim()
            ),
            TransferMethod::Deposit => format!("Deposit of {value} into your account"),
        }
    }

    /// Request body for the chosen method. Deposits target the user's own
    /// virtual agency and account.
    pub fn request(
        &self,
        amount: f64,
        description: String,
        own_account: &BankAccount,
        own_agency: Option<&str>,
        own_account_number: Option<&str>,
    ) -> Result<TransactionRequest, AppError> {
        let request = match self.method {
            TransferMethod::Account => TransactionRequest {
                amount,
                description,
                from_account_id: Some(own_account.id),
                agency_number: Some(self.agency_number.trim().to_string()),
                account_number: Some(self.account_number.trim().to_string()),
                pix_key: None,
            },
            TransferMethod::Pix => TransactionRequest {
                amount,
                description,
                from_account_id: Some(own_account.id),
                pix_key: Some(self.pix_key.trim().to_string()),
                ..TransactionRequest::default()
            },
            TransferMethod::Deposit => {
                let agency = own_agency
                    .or(own_account.agency_number.as_deref())
                    .ok_or_else(|| AppError::Validation("Your account has no agency.".to_string()))?;
                let account = own_account_number
                    .or(own_account.account_number.as_deref())
                    .ok_or_else(|| {
                        AppError::Validation("Your account has no account number.".to_string())
                    })?;
                TransactionRequest {
                    amount,
                    description,
                    agency_number: Some(agency.to_string()),
                    account_number: Some(account.to_string()),
                    ..TransactionRequest::default()
                }
            }
        };
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::{TransferForm, TransferMethod};
    use crate::app_lib::AppError;
    use crate::features::bank_accounts::types::{BankAccount, RecipientInfo};

    fn form(method: TransferMethod, amount: &str) -> TransferForm {
        TransferForm {
            method,
            agency_number: "0001".to_string(),
            account_number: "555".to_string(),
            pix_key: "ana@example.com".to_string(),
            amount: amount.to_string(),
            accepted_terms: true,
        }
    }

    #[test]
    fn terms_must_be_accepted_first() {
        let mut pending = form(TransferMethod::Pix, "abc");
        pending.accepted_terms = false;
        assert_eq!(
            pending.validate(100.0),
            Err(AppError::Validation("You must accept the terms of use.".to_string()))
        );
    }

    #[test]
    fn amount_must_be_positive() {
        assert!(form(TransferMethod::Account, "0").validate(100.0).is_err());
        assert!(form(TransferMethod::Account, "-5").validate(100.0).is_err());
        assert!(form(TransferMethod::Account, "x").validate(100.0).is_err());
        assert_eq!(form(TransferMethod::Account, "10,50").validate(100.0), Ok(10.5));
    }

    #[test]
    fn balance_limits_debits_but_not_deposits() {
        assert_eq!(
            form(TransferMethod::Pix, "150").validate(100.5),
            Err(AppError::Validation(
                "Insufficient balance. Your balance is R$ 100,50".to_string()
            ))
        );
        assert_eq!(form(TransferMethod::Deposit, "150").validate(100.5), Ok(150.0));
    }

    #[test]
    fn descriptions_name_the_recipient() {
        let recipient = RecipientInfo {
            name: "Ana".to_string(),
            agency_number: Some("0001".to_string()),
            account_number: Some("555".to_string()),
            ..RecipientInfo::default()
        };
        assert_eq!(
            form(TransferMethod::Account, "10").describe(10.0, Some(&recipient)),
            "Transfer of R$ 10,00 to agency 0001 account 555 of Ana"
        );
        assert_eq!(
            form(TransferMethod::Pix, "10").describe(10.0, Some(&recipient)),
            "Transfer of R$ 10,00 via PIX key \"ana@example.com\" to Ana"
        );
        assert_eq!(
            form(TransferMethod::Deposit, "10").describe(10.0, None),
            "Deposit of R$ 10,00 into your account"
        );
    }

    #[test]
    fn deposit_targets_own_account() -> anyhow::Result<()> {
        let own = BankAccount {
            id: 7,
            agency_number: Some("0001".to_string()),
            account_number: Some("12345-6".to_string()),
            ..BankAccount::default()
        };
        let request = form(TransferMethod::Deposit, "10").request(
            10.0,
            "d".to_string(),
            &own,
            None,
            None,
        )?;
        assert_eq!(request.from_account_id, None);
        assert_eq!(request.account_number.as_deref(), Some("12345-6"));

        let pix = form(TransferMethod::Pix, "10").request(10.0, "p".to_string(), &own, None, None)?;
        assert_eq!(pix.from_account_id, Some(7));
        assert_eq!(pix.agency_number, None);
        Ok(())
    }
}
