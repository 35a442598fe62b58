//! Partner companies (convênios) managed by administrators.

pub mod client;
pub mod types;

pub use types::{Company, CompanyRequest};
