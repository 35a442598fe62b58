//! Transactions: transfers, PIX, deposits and the paged account statement.

pub mod client;
pub mod transfer;
pub mod types;

pub use transfer::{TransferForm, TransferMethod};
pub use types::{Transaction, TransactionStatus, TransactionType};
