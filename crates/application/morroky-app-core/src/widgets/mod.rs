pub mod confirm;
pub mod toast;

pub use confirm::{ConfirmCallback, ConfirmDialog, ConfirmOptions};
pub use toast::{Toast, ToastKind, ToastState};
