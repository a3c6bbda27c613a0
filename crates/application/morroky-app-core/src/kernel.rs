use std::sync::Arc;

use anyhow::Context;
use morroky_core::{AuthChange, LocationCatalog};
use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::app_core::{AppStore, StatePatch};
use crate::dom::{Container, DomEvent};
use crate::history::MemoryHistory;
use crate::router::{Router, RouterEnv};
use crate::screens::{AppMessage, InFlight, Services};
use crate::widgets::{ConfirmDialog, Toast};

/// The mount points events can be delegated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Root,
    Toast,
    Confirm,
}

/// The application context: created once at entry and kept for the whole
/// session.
pub struct App {
    pub store: AppStore,
    router: Router,
    toast: Toast,
    confirm: ConfirmDialog,
    services: Services,
    history: Arc<MemoryHistory>,
    root: Container,
    runtime: Handle,
    in_flight: Arc<InFlight>,
    tx: mpsc::UnboundedSender<AppMessage>,
    rx: mpsc::UnboundedReceiver<AppMessage>,
    auth_forwarder: Option<JoinHandle<()>>,
}

impl App {
    /// Must be called from within a tokio runtime.
    pub fn new(services: Services, history: Arc<MemoryHistory>) -> anyhow::Result<Self> {
        Self::with_catalog(services, history, LocationCatalog::derb_omar())
    }

    pub fn with_catalog(
        services: Services,
        history: Arc<MemoryHistory>,
        catalog: LocationCatalog,
    ) -> anyhow::Result<Self> {
        let runtime = Handle::try_current().context("application started outside a tokio runtime")?;
        let (tx, rx) = mpsc::unbounded_channel();
        let store = AppStore::default();
        let root = Container::new();
        let toast = Toast::new(Container::new(), runtime.clone());
        let confirm = ConfirmDialog::new(Container::new());
        let in_flight = Arc::new(InFlight::default());

        let env = RouterEnv {
            store: store.clone(),
            toast: toast.clone(),
            confirm: confirm.clone(),
            services: services.clone(),
            container: root.clone(),
            catalog: Arc::new(catalog),
            tx: tx.clone(),
            runtime: runtime.clone(),
            in_flight: in_flight.clone(),
        };
        let router = Router::new(env, history.clone());

        Ok(Self {
            store,
            router,
            toast,
            confirm,
            services,
            history,
            root,
            runtime,
            in_flight,
            tx,
            rx,
            auth_forwarder: None,
        })
    }

    /// Mounts the screen for the current location and starts following
    /// auth changes.
    pub fn boot(&mut self) {
        self.router.init();
        if self.auth_forwarder.is_none() {
            let changes = self.services.auth.auth_changes();
            let tx = self.tx.clone();
            self.auth_forwarder = Some(self.runtime.spawn(forward_auth_changes(changes, tx)));
        }
    }

    pub fn dispatch(&self, surface: Surface, ev: DomEvent) {
        // Escape reaches the dialog wherever focus is.
        if ev.is_key("Escape") && self.confirm.handle_dom_event(&ev) {
            return;
        }
        match surface {
            Surface::Root => self.router.dispatch(&ev),
            Surface::Toast => {
                self.toast.handle_dom_event(&ev);
            }
            Surface::Confirm => {
                self.confirm.handle_dom_event(&ev);
            }
        }
    }

    /// Applies every message that has arrived so far.
    pub fn tick(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg);
        }
    }

    /// Ticks until no task is running and no message is waiting.
    pub async fn settle(&mut self) {
        loop {
            self.tick();
            let in_flight = self.in_flight.clone();
            let notified = in_flight.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if in_flight.count() == 0 && self.rx.is_empty() {
                return;
            }
            let msg = tokio::select! {
                msg = self.rx.recv() => msg,
                _ = &mut notified => None,
            };
            if let Some(msg) = msg {
                self.apply(msg);
            }
        }
    }

    fn apply(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Outcome(outcome) => self.router.deliver(outcome),
            AppMessage::Auth(change) => {
                tracing::info!(event = change.event_name(), "auth state changed");
                self.store
                    .set_state(StatePatch::default().with_current_user(change.user().cloned()));
            }
        }
    }

    pub fn back(&self) -> bool {
        let moved = self.history.back();
        if moved {
            self.router.handle_popstate();
        }
        moved
    }

    pub fn forward(&self) -> bool {
        let moved = self.history.forward();
        if moved {
            self.router.handle_popstate();
        }
        moved
    }

    pub fn root_html(&self) -> String {
        self.root.html()
    }

    pub fn root(&self) -> &Container {
        &self.root
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn confirm(&self) -> &ConfirmDialog {
        &self.confirm
    }

    pub fn history(&self) -> &MemoryHistory {
        &self.history
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<AppMessage> {
        self.tx.clone()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(task) = self.auth_forwarder.take() {
            task.abort();
        }
    }
}

async fn forward_auth_changes(
    mut changes: broadcast::Receiver<AuthChange>,
    tx: mpsc::UnboundedSender<AppMessage>,
) {
    loop {
        match changes.recv().await {
            Ok(change) => {
                if tx.send(AppMessage::Auth(change)).is_err() {
                    return;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "auth listener lagged");
            }
            Err(broadcast::error::RecvError::Closed) => return,
        }
    }
}
