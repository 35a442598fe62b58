//! Layout components shared across dashboard routes.

mod dashboard_layout;
mod sidebar;

pub(crate) use dashboard_layout::DashboardLayout;
pub(crate) use sidebar::Sidebar;
