mod dashboard;
mod loan_form;
mod loan_list;
mod pix_keys;
mod statement;
mod transfer;

pub(crate) use dashboard::ClientDashboardPage;
pub(crate) use loan_form::LoansPage;
pub(crate) use statement::StatementPage;
pub(crate) use transfer::TransferPage;
