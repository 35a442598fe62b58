//! PIX keys registered on the client's account.

pub mod client;
pub mod types;

pub use types::{PixKey, PixKeyRequest, PixKeyType};
