mod dashboard;
mod employee_form;
mod employees;

pub(crate) use dashboard::CompanyDashboardPage;
pub(crate) use employee_form::EmployeeFormPage;
pub(crate) use employees::EmployeesPage;
