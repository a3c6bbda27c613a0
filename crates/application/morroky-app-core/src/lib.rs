pub mod adapters;
pub mod app_core;
pub mod copy;
pub mod dom;
pub mod domain;
pub mod history;
pub mod kernel;
pub mod markup;
pub mod ports;
pub mod route;
pub mod router;
pub mod screens;
pub mod widgets;

pub use app_core::*;
pub use dom::{Container, DomEvent, EventKind, EventTarget};
pub use domain::{AppState, ScreenId, UserType};
pub use history::MemoryHistory;
pub use kernel::{App, Surface};
pub use ports::*;
pub use route::{Route, RouteError};
pub use router::{MountKey, Router};
pub use screens::{AppMessage, Outcome, Screen, ScreenContext, ScreenEvent, Services, Spawner};
pub use widgets::{ConfirmDialog, ConfirmOptions, Toast, ToastKind, ToastState};
