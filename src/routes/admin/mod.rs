mod company_form;
mod dashboard;
mod proposals;

pub(crate) use company_form::CompanyFormPage;
pub(crate) use dashboard::AdminDashboardPage;
pub(crate) use proposals::ProposalsPage;
