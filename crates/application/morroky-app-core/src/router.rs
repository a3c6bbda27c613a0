//! Owns the root container: keeps exactly one screen mounted for the
//! current state and keeps the location in step with it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use morroky_core::LocationCatalog;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::app_core::{AppStore, Subscription};
use crate::dom::{Container, DomEvent};
use crate::domain::{AppState, ScreenId};
use crate::ports::HistoryPort;
use crate::route::Route;
use crate::screens::{self, AppMessage, InFlight, Outcome, Screen, ScreenContext, Services, Spawner};
use crate::widgets::{ConfirmDialog, Toast};

/// Identity of a mounted screen: the screen plus the parameters it was
/// built from. Equal keys never remount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountKey {
    pub screen: ScreenId,
    pub params: Vec<Option<String>>,
}

impl MountKey {
    pub fn for_state(state: &AppState) -> Self {
        let params = match state.screen {
            ScreenId::Merchant => vec![state.selected_merchant_id.clone()],
            ScreenId::MerchantDashboard => vec![state.merchant_id.clone()],
            ScreenId::LandingPageEditor => vec![state.merchant_id.clone(), state.product_id.clone()],
            ScreenId::ProductLanding | ScreenId::ProductDetail => vec![state.product_id.clone()],
            _ => Vec::new(),
        };
        Self {
            screen: state.screen,
            params,
        }
    }
}

/// Shared pieces every screen context is built from.
#[derive(Clone)]
pub struct RouterEnv {
    pub store: AppStore,
    pub toast: Toast,
    pub confirm: ConfirmDialog,
    pub services: Services,
    pub container: Container,
    pub catalog: Arc<LocationCatalog>,
    pub tx: mpsc::UnboundedSender<AppMessage>,
    pub runtime: Handle,
    pub in_flight: Arc<InFlight>,
}

impl RouterEnv {
    fn context(&self) -> ScreenContext {
        ScreenContext {
            store: self.store.clone(),
            toast: self.toast.clone(),
            confirm: self.confirm.clone(),
            services: self.services.clone(),
            container: self.container.clone(),
            spawner: Spawner::new(
                Uuid::new_v4(),
                self.tx.clone(),
                self.runtime.clone(),
                self.in_flight.clone(),
            ),
            catalog: self.catalog.clone(),
        }
    }
}

struct Mounted {
    key: MountKey,
    screen: Box<dyn Screen>,
    ctx: ScreenContext,
}

struct RouterCore {
    env: RouterEnv,
    history: Arc<dyn HistoryPort>,
    mounted: Option<Mounted>,
    mount_count: u64,
}

impl RouterCore {
    fn navigate(&mut self, state: &AppState) {
        let key = MountKey::for_state(state);
        if let Some(current) = self.mounted.as_mut() {
            if current.key == key {
                current.screen.on_app_state(state, &current.ctx);
                return;
            }
        }

        if let Some(mut old) = self.mounted.take() {
            tracing::debug!(from = %old.key.screen, to = %key.screen, "unmounting screen");
            old.screen.dispose();
            old.ctx.spawner.cancel();
        }
        self.env.container.clear();
        self.sync_location(state);

        let ctx = self.env.context();
        let mut screen = screens::create(state.screen, state);
        tracing::debug!(screen = %key.screen, params = ?key.params, mount_id = %ctx.spawner.mount_id(), "mounting screen");
        screen.mount(&ctx);
        self.mount_count += 1;
        self.mounted = Some(Mounted { key, screen, ctx });
    }

    /// Pushes the canonical path for `state` unless the location already
    /// resolves to it.
    fn sync_location(&self, state: &AppState) {
        let Some(route) = Route::for_state(state) else {
            return;
        };
        if Route::resolve(&self.history.current_path()) != route {
            self.history.push(&route.to_path());
        }
    }
}

struct RouterShared {
    core: Mutex<RouterCore>,
    pending: Mutex<VecDeque<AppState>>,
    subscription: Mutex<Option<Subscription>>,
}

impl RouterShared {
    fn enqueue(&self, state: AppState) {
        lock(&self.pending).push_back(state);
    }

    fn next_pending(&self) -> Option<AppState> {
        lock(&self.pending).pop_front()
    }

    fn has_pending(&self) -> bool {
        !lock(&self.pending).is_empty()
    }

    /// Applies queued navigations in order. A call made while the router is
    /// already busy leaves the queue to the running pump.
    fn pump(&self) {
        loop {
            let mut core = match self.core.try_lock() {
                Ok(core) => core,
                Err(TryLockError::Poisoned(p)) => p.into_inner(),
                Err(TryLockError::WouldBlock) => return,
            };
            while let Some(state) = self.next_pending() {
                core.navigate(&state);
            }
            drop(core);
            if !self.has_pending() {
                return;
            }
        }
    }
}

pub struct Router {
    shared: Arc<RouterShared>,
}

impl Router {
    pub fn new(env: RouterEnv, history: Arc<dyn HistoryPort>) -> Self {
        Self {
            shared: Arc::new(RouterShared {
                core: Mutex::new(RouterCore {
                    env,
                    history,
                    mounted: None,
                    mount_count: 0,
                }),
                pending: Mutex::new(VecDeque::new()),
                subscription: Mutex::new(None),
            }),
        }
    }

    /// Resolves the current location into the store, then starts following
    /// the store. The subscription's replay performs the first mount.
    pub fn init(&self) {
        let (store, path) = {
            let core = lock(&self.shared.core);
            (core.env.store.clone(), core.history.current_path())
        };
        let route = Route::resolve(&path);
        tracing::debug!(%path, ?route, "initial route");
        store.set_state(route.patch());

        let weak = Arc::downgrade(&self.shared);
        let subscription = store.subscribe(move |state| {
            if let Some(shared) = weak.upgrade() {
                shared.enqueue(state.clone());
                shared.pump();
            }
        });
        if let Some(old) = lock(&self.shared.subscription).replace(subscription) {
            old.unsubscribe();
        }
    }

    /// Back/forward moved the location; bring the state along.
    pub fn handle_popstate(&self) {
        let (store, path) = {
            let core = lock(&self.shared.core);
            (core.env.store.clone(), core.history.current_path())
        };
        let route = Route::resolve(&path);
        tracing::debug!(%path, ?route, "popstate");
        store.set_state(route.patch());
    }

    /// Delegates a root-container event to the mounted screen.
    pub fn dispatch(&self, ev: &DomEvent) {
        {
            let mut core = lock(&self.shared.core);
            if let Some(m) = core.mounted.as_mut() {
                m.screen.handle_dom_event(ev, &m.ctx);
            }
        }
        self.shared.pump();
    }

    /// Hands a task result to the screen that started it. Results for an
    /// instance that is no longer mounted are dropped.
    pub fn deliver(&self, outcome: Outcome) {
        {
            let mut core = lock(&self.shared.core);
            match core.mounted.as_mut() {
                Some(m) if m.ctx.spawner.mount_id() == outcome.mount_id => {
                    m.screen.handle_outcome(outcome.event, &m.ctx);
                }
                _ => {
                    tracing::debug!(mount_id = %outcome.mount_id, event = ?outcome.event, "discarding stale outcome");
                }
            }
        }
        self.shared.pump();
    }

    pub fn current_screen(&self) -> Option<ScreenId> {
        lock(&self.shared.core).mounted.as_ref().map(|m| m.key.screen)
    }

    pub fn mounted_key(&self) -> Option<MountKey> {
        lock(&self.shared.core).mounted.as_ref().map(|m| m.key.clone())
    }

    pub fn mounted_id(&self) -> Option<Uuid> {
        lock(&self.shared.core)
            .mounted
            .as_ref()
            .map(|m| m.ctx.spawner.mount_id())
    }

    /// Number of mounts since creation.
    pub fn mount_count(&self) -> u64 {
        lock(&self.shared.core).mount_count
    }
}

impl Drop for Router {
    fn drop(&mut self) {
        if let Some(subscription) = lock(&self.shared.subscription).take() {
            subscription.unsubscribe();
        }
        let mut core = lock(&self.shared.core);
        if let Some(mut m) = core.mounted.take() {
            m.screen.dispose();
            m.ctx.spawner.cancel();
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
