//! Domain features of the CrediFlow client: the auth session core and one
//! typed client per backend resource. Pages import these modules so view code
//! stays focused on rendering while endpoint paths and payload shapes live in
//! one place. Authorization is enforced by the backend; nothing here is a
//! security boundary.

pub mod auth;
pub mod bank_accounts;
pub mod companies;
pub mod customers;
pub mod loans;
pub mod pix_keys;
pub mod transactions;
