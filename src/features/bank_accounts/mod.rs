//! Bank accounts: the client's own account and recipient lookups for transfers.

pub mod client;
pub mod types;

pub use types::{BankAccount, RecipientInfo};
