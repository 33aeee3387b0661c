//! Notification layer: toasts, the loading indicator and connectivity notices.

mod connectivity;
mod loading;
mod toast;

pub use connectivity::{ConnectivityChange, ConnectivityTracker, LOST_MESSAGE, RESTORED_MESSAGE};
pub use loading::LoadingIndicator;
pub use toast::{Toast, ToastKind, ToastPhase, ToastStack, DISMISS_AFTER, ENTER_DELAY, EXIT_DURATION};
