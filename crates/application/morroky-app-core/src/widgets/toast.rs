use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::dom::{Container, DomEvent};
use crate::markup::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn classes(&self) -> &'static str {
        match self {
            ToastKind::Success => "bg-green-500 border-green-600",
            ToastKind::Error => "bg-red-500 border-red-600",
            ToastKind::Info => "bg-blue-500 border-blue-600",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✕",
            ToastKind::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastState {
    pub visible: bool,
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
}

impl Default for ToastState {
    fn default() -> Self {
        Self {
            visible: false,
            message: String::new(),
            kind: ToastKind::Success,
            duration: default_duration(),
        }
    }
}

struct Inner {
    state: ToastState,
    container: Container,
    /// Bumped by every `show`; a timer only hides the toast it was started for.
    generation: u64,
    timer: Option<JoinHandle<()>>,
    hide_events: u64,
}

impl Inner {
    fn render(&self) {
        self.container.set_html(template(&self.state));
    }

    fn hide(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        if self.state.visible {
            self.state.visible = false;
            self.hide_events += 1;
        }
        self.render();
    }
}

/// The single toast of an application context.
#[derive(Clone)]
pub struct Toast {
    inner: Arc<Mutex<Inner>>,
    runtime: Handle,
}

pub fn default_duration() -> Duration {
    Duration::from_millis(morroky_config::DEFAULT_TOAST_DURATION_MS)
}

impl Toast {
    pub fn new(container: Container, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: ToastState::default(),
                container,
                generation: 0,
                timer: None,
                hide_events: 0,
            })),
            runtime,
        }
    }

    /// Shows `message` and schedules one auto-hide after `duration`. A pending
    /// auto-hide from an earlier call is cancelled.
    pub fn show(&self, message: impl Into<String>, kind: ToastKind, duration: Duration) {
        let generation = {
            let mut inner = self.lock();
            if let Some(timer) = inner.timer.take() {
                timer.abort();
            }
            inner.generation += 1;
            inner.state = ToastState {
                visible: true,
                message: message.into(),
                kind,
                duration,
            };
            inner.render();
            inner.generation
        };

        let weak = Arc::downgrade(&self.inner);
        let timer = self.runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(inner) = weak.upgrade() {
                expire(&inner, generation);
            }
        });

        let mut inner = self.lock();
        if inner.generation == generation {
            inner.timer = Some(timer);
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Success, default_duration());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Error, default_duration());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Info, default_duration());
    }

    pub fn hide(&self) {
        self.lock().hide();
    }

    pub fn state(&self) -> ToastState {
        self.lock().state.clone()
    }

    /// How many times the toast went from visible to hidden.
    pub fn hide_events(&self) -> u64 {
        self.lock().hide_events
    }

    pub fn container(&self) -> Container {
        self.lock().container.clone()
    }

    /// The close button hides the toast. Returns whether the event was used.
    pub fn handle_dom_event(&self, ev: &DomEvent) -> bool {
        if ev.is_click() && ev.target_is("toast-close") {
            self.hide();
            return true;
        }
        false
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn expire(inner: &Mutex<Inner>, generation: u64) {
    let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
    if inner.generation != generation {
        return;
    }
    // Detach rather than abort: this is the timer task itself.
    inner.timer = None;
    inner.hide();
}

fn template(state: &ToastState) -> String {
    if !state.visible {
        return String::new();
    }
    format!(
        r#"<div class="fixed top-4 left-1/2 transform -translate-x-1/2 z-50 animate-fade-in-down" role="status">
  <div class="flex items-center gap-3 {} text-white px-6 py-4 rounded-xl shadow-lg border-l-4 min-w-80 max-w-md">
    <div class="text-2xl">{}</div>
    <div class="flex-1 text-sm font-medium whitespace-pre-line">{}</div>
    <button id="toast-close" class="text-white/80 hover:text-white text-xl">&times;</button>
  </div>
</div>"#,
        state.kind.classes(),
        state.kind.icon(),
        escape_html(&state.message)
    )
}
