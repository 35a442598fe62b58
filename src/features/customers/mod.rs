//! Customers: company employees who can borrow and hold a virtual account.

pub mod client;
pub mod types;

pub use types::{Customer, CustomerRequest};
