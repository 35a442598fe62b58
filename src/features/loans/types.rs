//! Loan proposal payloads.

use crate::app_lib::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Agreement type sent with every client simulation.
pub const CONVENIO_TYPE: &str = "Prefeitura";
/// Monthly interest rate offered to clients.
pub const MONTHLY_INTEREST_RATE: f64 = 0.02;
/// The backend solves for the installment value.
pub const SIMULATION_MODE: &str = "VALOR_PARCELA";

pub const MIN_AMOUNT: f64 = 100.0;
/// Upper bound of the amount slider when the margin is unknown.
pub const DEFAULT_MAX_AMOUNT: f64 = 1000.0;
pub const AMOUNT_STEP: f64 = 50.0;
pub const MIN_TERM_MONTHS: u32 = 6;
pub const MAX_TERM_MONTHS: u32 = 96;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum LoanStatus {
    Simulated,
    PendingSignature,
    Signed,
    UnderReview,
    Approved,
    Rejected,
    Paid,
    Canceled,
    Other(String),
}

impl LoanStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            LoanStatus::Simulated => "SIMULATED",
            LoanStatus::PendingSignature => "PENDING_SIGNATURE",
            LoanStatus::Signed => "SIGNED",
            LoanStatus::UnderReview => "UNDER_REVIEW",
            LoanStatus::Approved => "APPROVED",
            LoanStatus::Rejected => "REJECTED",
            LoanStatus::Paid => "PAID",
            LoanStatus::Canceled => "CANCELED",
            LoanStatus::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            LoanStatus::Simulated => "Simulated",
            LoanStatus::PendingSignature => "Pending signature",
            LoanStatus::Signed => "Signed",
            LoanStatus::UnderReview => "Under review",
            LoanStatus::Approved => "Approved",
            LoanStatus::Rejected => "Rejected",
            LoanStatus::Paid => "Disbursed",
            LoanStatus::Canceled => "Canceled",
            LoanStatus::Other(raw) => raw,
        }
    }

    /// Tailwind badge colors for the status chip.
    #[must_use]
    pub fn badge_class(&self) -> &'static str {
        match self {
            LoanStatus::PendingSignature => "bg-yellow-100 text-yellow-800",
            LoanStatus::Signed => "bg-sky-100 text-sky-800",
            LoanStatus::UnderReview => "bg-purple-100 text-purple-800",
            LoanStatus::Approved => "bg-blue-100 text-blue-800",
            LoanStatus::Paid => "bg-green-100 text-green-800",
            LoanStatus::Rejected => "bg-red-100 text-red-800",
            _ => "bg-gray-100 text-gray-800",
        }
    }

    /// CCB step available to the borrower in this status.
    #[must_use]
    pub fn client_document(&self) -> Option<CcbDocument> {
        match self {
            LoanStatus::Simulated => Some(CcbDocument::Generate),
            LoanStatus::PendingSignature => Some(CcbDocument::Sign),
            LoanStatus::Signed => Some(CcbDocument::Signed),
            _ => None,
        }
    }

    /// Only signed proposals can be disbursed or canceled by an administrator.
    #[must_use]
    pub fn can_settle(&self) -> bool {
        matches!(self, LoanStatus::Signed)
    }
}

impl From<String> for LoanStatus {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "SIMULATED" => LoanStatus::Simulated,
            "PENDING_SIGNATURE" => LoanStatus::PendingSignature,
            "SIGNED" => LoanStatus::Signed,
            "UNDER_REVIEW" => LoanStatus::UnderReview,
            "APPROVED" => LoanStatus::Approved,
            "REJECTED" => LoanStatus::Rejected,
            "PAID" => LoanStatus::Paid,
            "CANCELED" => LoanStatus::Canceled,
            _ => LoanStatus::Other(raw),
        }
    }
}

impl From<LoanStatus> for String {
    fn from(status: LoanStatus) -> Self {
        match status {
            LoanStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// CCB PDF produced by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CcbDocument {
    /// Generates the contract for a simulated proposal.
    Generate,
    /// Signs a generated contract.
    Sign,
    /// Downloads the signed contract.
    Signed,
}

impl CcbDocument {
    #[must_use]
    pub fn path(self, proposal_id: i64) -> String {
        let suffix = match self {
            CcbDocument::Generate => "ccb-generate",
            CcbDocument::Sign => "ccb-sign",
            CcbDocument::Signed => "ccb",
        };
        format!("/loan-proposals/{proposal_id}/{suffix}")
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CcbDocument::Generate => "Generate CCB",
            CcbDocument::Sign => "Sign CCB",
            CcbDocument::Signed => "Download signed CCB",
        }
    }

    #[must_use]
    pub fn file_name(self, proposal_id: i64) -> String {
        match self {
            CcbDocument::Generate => format!("ccb_generated_{proposal_id}.pdf"),
            CcbDocument::Sign | CcbDocument::Signed => format!("ccb_signed_{proposal_id}.pdf"),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanInstallment {
    pub id: i64,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub paid_value: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanProposal {
    pub id: i64,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub requested_amount: f64,
    #[serde(default)]
    pub term_in_months: Option<u32>,
    pub status: LoanStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub installment_value: Option<f64>,
    #[serde(default)]
    pub total_payment: Option<f64>,
    #[serde(default)]
    pub financed_amount: Option<f64>,
    #[serde(default)]
    pub monthly_rate: Option<f64>,
    #[serde(default)]
    pub number_of_installments: Option<u32>,
    #[serde(default)]
    pub installments: Vec<LoanInstallment>,
}

impl LoanProposal {
    /// Installments can be paid once the loan was disbursed.
    #[must_use]
    pub fn installment_payable(&self, installment: &LoanInstallment) -> bool {
        self.status == LoanStatus::Paid && !installment.paid
    }

    /// Marks an installment as paid with its full value.
    pub fn mark_paid(&mut self, installment_id: i64) {
        if let Some(installment) = self
            .installments
            .iter_mut()
            .find(|installment| installment.id == installment_id)
        {
            installment.paid = true;
            installment.paid_value = Some(installment.value);
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub customer_id: i64,
    pub company_id: i64,
    pub requested_amount: f64,
    pub available_limit: f64,
    pub term_in_months: u32,
    pub convenio_type: String,
    pub monthly_interest_rate: f64,
    pub first_installment_date: String,
    pub modo_simulacao: String,
}

impl SimulationRequest {
    /// Builds a client simulation; refuses when no margin is available.
    pub fn new(
        customer_id: i64,
        company_id: i64,
        requested_amount: f64,
        term_in_months: u32,
        available_limit: f64,
        first_installment_date: String,
    ) -> Result<Self, AppError> {
        if available_limit <= 0.0 {
            return Err(AppError::Validation(
                "Cannot simulate: you have no available margin.".to_string(),
            ));
        }
        if !(MIN_TERM_MONTHS..=MAX_TERM_MONTHS).contains(&term_in_months) {
            return Err(AppError::Validation(format!(
                "Term must be between {MIN_TERM_MONTHS} and {MAX_TERM_MONTHS} months."
            )));
        }
        if requested_amount < MIN_AMOUNT || !requested_amount.is_finite() {
            return Err(AppError::Validation(format!(
                "Amount must be at least {MIN_AMOUNT:.0}."
            )));
        }
        Ok(Self {
            customer_id,
            company_id,
            requested_amount,
            available_limit,
            term_in_months,
            convenio_type: CONVENIO_TYPE.to_string(),
            monthly_interest_rate: MONTHLY_INTEREST_RATE,
            first_installment_date,
            modo_simulacao: SIMULATION_MODE.to_string(),
        })
    }
}

/// Backend simulation. Fields the client does not read are kept so the
/// contract request can echo them back.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    #[serde(default)]
    pub installment_value: f64,
    #[serde(default)]
    pub total_payment: f64,
    #[serde(default)]
    pub financed_amount: f64,
    #[serde(default)]
    pub number_of_installments: Option<u32>,
    #[serde(default)]
    pub first_installment_date: Option<String>,
    #[serde(default)]
    pub last_installment_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SimulationResult {
    #[must_use]
    pub fn exceeds_margin(&self, margin: f64) -> bool {
        self.installment_value > margin
    }

    /// Contract body: the simulation overlaid with the request, keeping the
    /// first installment date the backend computed.
    pub fn contract_payload(&self, request: &SimulationRequest) -> Result<Value, AppError> {
        let encode = |value: Value| match value {
            Value::Object(map) => Ok(map),
            _ => Err(AppError::Serialization(
                "Contract payload must be an object".to_string(),
            )),
        };
        let to_value = |value: Result<Value, serde_json::Error>| {
            value.map_err(|err| AppError::Serialization(err.to_string()))
        };

        let mut payload = encode(to_value(serde_json::to_value(self))?)?;
        payload.extend(encode(to_value(serde_json::to_value(request))?)?);
        if let Some(date) = &self.first_installment_date {
            payload.insert(
                "firstInstallmentDate".to_string(),
                Value::String(date.clone()),
            );
        }
        Ok(Value::Object(payload))
    }
}
