//! Payroll-deducted loan proposals: simulation, contracting, CCB documents and
//! installment payments. Amortization math lives in the backend.

pub mod client;
pub mod types;

pub use types::{CcbDocument, LoanProposal, LoanStatus, SimulationRequest, SimulationResult};
