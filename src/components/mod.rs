//! Shared UI components exported for routes and features.

mod installments;
pub(crate) mod layout;
pub(crate) mod ui;
mod welcome_dialog;

pub(crate) use ui::{
    Alert, AlertKind, Button, ButtonVariant, NoAccess, Pager, SelectField, Spinner, TextField,
    ToastProvider, use_toast,
};
pub(crate) use installments::InstallmentTable;
pub(crate) use welcome_dialog::WelcomeDialog;
