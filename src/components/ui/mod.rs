mod alert;
mod button;
mod field;
mod no_access;
mod pager;
mod spinner;
mod toast;

pub(crate) use alert::{Alert, AlertKind};
pub(crate) use button::{Button, ButtonVariant};
pub(crate) use field::{SelectField, TextField};
pub(crate) use no_access::NoAccess;
pub(crate) use pager::Pager;
pub(crate) use spinner::Spinner;
pub(crate) use toast::{ToastProvider, use_toast};
