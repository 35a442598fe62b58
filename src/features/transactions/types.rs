//! Transaction payloads and how statement rows are presented.

use serde::{Deserialize, Serialize};

/// Kind of money movement. Values the client does not know are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Pix,
    Deposit,
    Transfer,
    LoanDisbursement,
    BillPayment,
    LoanInstallmentPayment,
    Payment,
    Other(String),
}

impl TransactionType {
    /// Known kinds, in the order the statement filter lists them.
    pub const KNOWN: [TransactionType; 7] = [
        TransactionType::Pix,
        TransactionType::Deposit,
        TransactionType::Transfer,
        TransactionType::LoanDisbursement,
        TransactionType::BillPayment,
        TransactionType::LoanInstallmentPayment,
        TransactionType::Payment,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Pix => "PIX",
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Transfer => "TRANSFER",
            TransactionType::LoanDisbursement => "LOAN_DISBURSEMENT",
            TransactionType::BillPayment => "BILL_PAYMENT",
            TransactionType::LoanInstallmentPayment => "LOAN_INSTALLMENT_PAYMENT",
            TransactionType::Payment => "PAYMENT",
            TransactionType::Other(raw) => raw,
        }
    }

    /// Material Symbols icon for the statement row.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            TransactionType::Pix | TransactionType::Transfer => "swap_horiz",
            TransactionType::Deposit => "account_balance_wallet",
            TransactionType::BillPayment | TransactionType::Payment => "payment",
            TransactionType::LoanInstallmentPayment => "monetization_on",
            TransactionType::LoanDisbursement | TransactionType::Other(_) => "attach_money",
        }
    }

    /// Human label: the wire name with underscores as spaces.
    #[must_use]
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl From<String> for TransactionType {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "PIX" => TransactionType::Pix,
            "DEPOSIT" => TransactionType::Deposit,
            "TRANSFER" => TransactionType::Transfer,
            "LOAN_DISBURSEMENT" => TransactionType::LoanDisbursement,
            "BILL_PAYMENT" => TransactionType::BillPayment,
            "LOAN_INSTALLMENT_PAYMENT" => TransactionType::LoanInstallmentPayment,
            "PAYMENT" => TransactionType::Payment,
            _ => TransactionType::Other(raw),
        }
    }
}

impl From<TransactionType> for String {
    fn from(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
    Other(String),
}

impl TransactionStatus {
    pub const KNOWN: [TransactionStatus; 3] = [
        TransactionStatus::Completed,
        TransactionStatus::Pending,
        TransactionStatus::Failed,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Failed => "Failed",
            TransactionStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for TransactionStatus {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "COMPLETED" => TransactionStatus::Completed,
            "PENDING" => TransactionStatus::Pending,
            "FAILED" => TransactionStatus::Failed,
            _ => TransactionStatus::Other(raw),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    #[serde(default)]
    pub from_account_id: Option<i64>,
    #[serde(default)]
    pub to_account_id: Option<i64>,
    #[serde(default)]
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub status: Option<TransactionStatus>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Transaction {
    /// Money entering `account_id`: no destination or the destination is this
    /// account. Installment payments are always debits.
    #[must_use]
    pub fn is_credit(&self, account_id: i64) -> bool {
        let inbound = self.to_account_id.is_none_or(|to| to == account_id);
        inbound && self.kind != TransactionType::LoanInstallmentPayment
    }

    /// Description if present, otherwise the type label.
    #[must_use]
    pub fn label(&self) -> String {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map_or_else(|| self.kind.label(), str::to_string)
    }
}

/// Body for every transaction-creating endpoint. Only the fields relevant to
/// the chosen method are sent.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub amount: f64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_account_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pix_key: Option<String>,
}

/// Statement filter; `None` fields are left out of the query string.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct StatementQuery {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    pub page: u32,
    pub size: u32,
}

#[cfg(test)]
mod tests {
    use super::{Transaction, TransactionStatus, TransactionType};
    use serde_json::json;

    fn transaction(kind: &str, to: Option<i64>) -> Transaction {
        Transaction {
            id: 1,
            from_account_id: Some(3),
            to_account_id: to,
            amount: 10.0,
            kind: TransactionType::from(kind.to_string()),
            status: None,
            description: None,
            created_at: None,
        }
    }

    #[test]
    fn icons_follow_type() {
        assert_eq!(TransactionType::Pix.icon(), "swap_horiz");
        assert_eq!(TransactionType::Transfer.icon(), "swap_horiz");
        assert_eq!(TransactionType::Deposit.icon(), "account_balance_wallet");
        assert_eq!(TransactionType::LoanInstallmentPayment.icon(), "monetization_on");
        assert_eq!(TransactionType::Payment.icon(), "payment");
        assert_eq!(
            TransactionType::from("CASHBACK".to_string()).icon(),
            "attach_money"
        );
    }

    #[test]
    fn unknown_type_survives_round_trip() -> anyhow::Result<()> {
        let row: Transaction = serde_json::from_value(json!({
            "id": 5,
            "amount": 1.5,
            "type": "CASHBACK",
            "status": "REVERSED"
        }))?;
        assert_eq!(row.kind, TransactionType::Other("CASHBACK".to_string()));
        assert_eq!(row.status.as_ref().map(TransactionStatus::label), Some("REVERSED"));
        assert_eq!(serde_json::to_value(&row.kind)?, json!("CASHBACK"));
        Ok(())
    }

    #[test]
    fn credit_rule() {
        assert!(transaction("DEPOSIT", None).is_credit(7));
        assert!(transaction("PIX", Some(7)).is_credit(7));
        assert!(!transaction("PIX", Some(8)).is_credit(7));
        assert!(!transaction("LOAN_INSTALLMENT_PAYMENT", None).is_credit(7));
    }

    #[test]
    fn label_falls_back_to_type() {
        let mut row = transaction("LOAN_DISBURSEMENT", None);
        assert_eq!(row.label(), "LOAN DISBURSEMENT");
        row.description = Some("Loan #3".to_string());
        assert_eq!(row.label(), "Loan #3");
    }

    #[test]
    fn status_labels() {
        assert_eq!(TransactionStatus::Completed.label(), "Completed");
        assert_eq!(
            TransactionStatus::from("PENDING".to_string()),
            TransactionStatus::Pending
        );
    }
}
