//! Screen contract, the per-mount context and the screen registry.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use morroky_core::{AuthChange, LocationCatalog};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, Notify};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::app_core::AppStore;
use crate::dom::{Container, DomEvent};
use crate::domain::{AppState, ScreenId};
use crate::ports::{AuthPort, MerchantsPort, StoragePort};
use crate::widgets::{ConfirmDialog, Toast};

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod gateway;
pub mod landing_editor;
pub mod merchant;
pub mod product_detail;
pub mod product_landing;
pub mod registration;
pub mod welcome;
pub mod world;

pub use admin::{AdminEvent, AdminScreen};
pub use auth::{AuthEvent, AuthScreen};
pub use dashboard::{DashboardEvent, DashboardScreen};
pub use gateway::GatewayScreen;
pub use landing_editor::{EditorEvent, LandingEditorScreen};
pub use merchant::{MerchantEvent, MerchantScreen};
pub use product_detail::ProductDetailScreen;
pub use product_landing::{ProductEvent, ProductLandingScreen};
pub use registration::{RegistrationEvent, RegistrationModal};
pub use welcome::{WelcomeEvent, WelcomeScreen};
pub use world::{WorldEvent, WorldScreen};

/// The backend facades handed to every screen.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthPort>,
    pub merchants: Arc<dyn MerchantsPort>,
    pub storage: Arc<dyn StoragePort>,
}

/// Result of a background task, posted back to the screen that started it.
#[derive(Debug)]
pub enum ScreenEvent {
    Auth(AuthEvent),
    World(WorldEvent),
    Registration(RegistrationEvent),
    Merchant(MerchantEvent),
    Admin(AdminEvent),
    Dashboard(DashboardEvent),
    Editor(EditorEvent),
    Product(ProductEvent),
    Welcome(WelcomeEvent),
}

macro_rules! screen_event_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for ScreenEvent {
                fn from(ev: $ty) -> Self {
                    ScreenEvent::$variant(ev)
                }
            }
        )*
    };
}

screen_event_from!(
    Auth(AuthEvent),
    World(WorldEvent),
    Registration(RegistrationEvent),
    Merchant(MerchantEvent),
    Admin(AdminEvent),
    Dashboard(DashboardEvent),
    Editor(EditorEvent),
    Product(ProductEvent),
    Welcome(WelcomeEvent),
);

#[derive(Debug)]
pub struct Outcome {
    pub mount_id: Uuid,
    pub event: ScreenEvent,
}

/// Everything that reaches the UI loop from outside it.
#[derive(Debug)]
pub enum AppMessage {
    Outcome(Outcome),
    Auth(AuthChange),
}

/// Counts tasks that have not reported back yet.
#[derive(Debug, Default)]
pub struct InFlight {
    count: AtomicUsize,
    idle: Notify,
}

impl InFlight {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Fires when a task finishes. Enable it before reading [`Self::count`]
    /// to avoid missing a wakeup.
    pub fn notified(&self) -> tokio::sync::futures::Notified<'_> {
        self.idle.notified()
    }
}

struct InFlightGuard(Arc<InFlight>);

impl InFlightGuard {
    fn new(in_flight: Arc<InFlight>) -> Self {
        in_flight.count.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.count.fetch_sub(1, Ordering::SeqCst);
        self.0.idle.notify_waiters();
    }
}

/// Runs service calls for one mounted screen instance. Results are tagged
/// with the mount id; disposal cancels whatever is still running.
#[derive(Clone)]
pub struct Spawner {
    mount_id: Uuid,
    tx: mpsc::UnboundedSender<AppMessage>,
    runtime: Handle,
    cancel: CancellationToken,
    in_flight: Arc<InFlight>,
}

impl Spawner {
    pub fn new(
        mount_id: Uuid,
        tx: mpsc::UnboundedSender<AppMessage>,
        runtime: Handle,
        in_flight: Arc<InFlight>,
    ) -> Self {
        Self {
            mount_id,
            tx,
            runtime,
            cancel: CancellationToken::new(),
            in_flight,
        }
    }

    pub fn mount_id(&self) -> Uuid {
        self.mount_id
    }

    pub fn spawn<F, E>(&self, fut: F)
    where
        F: Future<Output = E> + Send + 'static,
        E: Into<ScreenEvent> + Send + 'static,
    {
        let guard = InFlightGuard::new(self.in_flight.clone());
        let tx = self.tx.clone();
        let cancel = self.cancel.clone();
        let mount_id = self.mount_id;
        self.runtime.spawn(async move {
            let _guard = guard;
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(%mount_id, "screen task cancelled");
                }
                event = fut => {
                    let event = event.into();
                    if tx.send(AppMessage::Outcome(Outcome { mount_id, event })).is_err() {
                        tracing::debug!(%mount_id, "application gone, dropping outcome");
                    }
                }
            }
        });
    }

    /// Queues `event` for the next tick without running anything.
    pub fn post(&self, event: impl Into<ScreenEvent>) {
        let outcome = Outcome {
            mount_id: self.mount_id,
            event: event.into(),
        };
        if self.tx.send(AppMessage::Outcome(outcome)).is_err() {
            tracing::debug!(mount_id = %self.mount_id, "application gone, dropping event");
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// What a mounted screen may touch. Built by the router for each mount.
#[derive(Clone)]
pub struct ScreenContext {
    pub store: AppStore,
    pub toast: Toast,
    pub confirm: ConfirmDialog,
    pub services: Services,
    pub container: Container,
    pub spawner: Spawner,
    pub catalog: Arc<LocationCatalog>,
}

pub trait Screen: Send {
    fn id(&self) -> ScreenId;

    /// Markup for the current local state.
    fn template(&self) -> String;

    fn mount(&mut self, ctx: &ScreenContext) {
        self.render(ctx);
    }

    fn handle_dom_event(&mut self, ev: &DomEvent, ctx: &ScreenContext);

    fn handle_outcome(&mut self, event: ScreenEvent, _ctx: &ScreenContext) {
        tracing::debug!(screen = %self.id(), ?event, "unexpected outcome");
    }

    /// Called instead of a remount when the state changed but the mount
    /// identity did not.
    fn on_app_state(&mut self, _state: &AppState, _ctx: &ScreenContext) {}

    fn dispose(&mut self) {}

    fn render(&self, ctx: &ScreenContext) {
        ctx.container.set_html(self.template());
    }

    fn update(&mut self, ctx: &ScreenContext, f: impl FnOnce(&mut Self))
    where
        Self: Sized,
    {
        f(self);
        self.render(ctx);
    }
}

/// Builds the screen registered for `id`.
pub fn create(id: ScreenId, state: &AppState) -> Box<dyn Screen> {
    match id {
        ScreenId::Gateway => Box::new(GatewayScreen::new(state)),
        ScreenId::Auth => Box::new(AuthScreen::new()),
        ScreenId::World => Box::new(WorldScreen::new(state)),
        ScreenId::Merchant => Box::new(MerchantScreen::new(state)),
        ScreenId::Admin => Box::new(AdminScreen::new()),
        ScreenId::MerchantDashboard => Box::new(DashboardScreen::new(state)),
        ScreenId::LandingPageEditor => Box::new(LandingEditorScreen::new(state)),
        ScreenId::ProductLanding => Box::new(ProductLandingScreen::new(state)),
        ScreenId::ProductDetail => Box::new(ProductDetailScreen::new(state)),
        ScreenId::MerchantWelcome => Box::new(WelcomeScreen::new()),
    }
}

/// Message shown to the user for a failed call: the innermost cause, which
/// carries the provider's own text.
pub(crate) fn error_text(err: &anyhow::Error) -> String {
    err.root_cause().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_builds_the_requested_screen() {
        let state = AppState::default();
        for id in ScreenId::ALL {
            assert_eq!(create(id, &state).id(), id);
        }
    }

    #[test]
    fn error_text_is_innermost_cause() {
        let err = anyhow::anyhow!("Access Denied").context("list merchants");
        assert_eq!(error_text(&err), "Access Denied");
    }
}
