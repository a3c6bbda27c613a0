use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::copy;
use crate::dom::{Container, DomEvent};
use crate::markup::escape_html;

pub type ConfirmCallback = Box<dyn FnOnce() + Send + 'static>;

pub struct ConfirmOptions {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub on_confirm: Option<ConfirmCallback>,
    pub on_cancel: Option<ConfirmCallback>,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            confirm_text: copy::CONFIRM_YES.to_string(),
            cancel_text: copy::CONFIRM_CANCEL.to_string(),
            on_confirm: None,
            on_cancel: None,
        }
    }
}

impl ConfirmOptions {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn on_confirm(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.on_confirm = Some(Box::new(f));
        self
    }

    pub fn on_cancel(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.on_cancel = Some(Box::new(f));
        self
    }

    pub fn labels(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_text = confirm.into();
        self.cancel_text = cancel.into();
        self
    }
}

struct Inner {
    visible: bool,
    title: String,
    message: String,
    confirm_text: String,
    cancel_text: String,
    on_confirm: Option<ConfirmCallback>,
    on_cancel: Option<ConfirmCallback>,
    container: Container,
}

impl Inner {
    fn render(&self) {
        self.container.set_html(self.template());
    }

    fn close(&mut self) {
        self.visible = false;
        self.on_confirm = None;
        self.on_cancel = None;
        self.render();
    }

    fn template(&self) -> String {
        if !self.visible {
            return String::new();
        }
        let title = if self.title.is_empty() {
            String::new()
        } else {
            format!(
                r#"<h3 class="text-xl font-bold text-gray-900 mb-2">{}</h3>"#,
                escape_html(&self.title)
            )
        };
        format!(
            r#"<div id="confirm-backdrop" class="fixed inset-0 bg-black/50 z-50 flex items-center justify-center p-4 animate-fade-in">
  <div class="confirm-body bg-white rounded-3xl shadow-2xl max-w-md w-full p-6 rtl">
    <div class="text-center">
      <div class="w-16 h-16 bg-yellow-100 rounded-full mx-auto flex items-center justify-center mb-4"><span class="text-3xl">⚠️</span></div>
      {title}
      <p class="text-gray-600 mb-6">{}</p>
      <div class="flex gap-3">
        <button class="confirm-cancel-btn flex-1 bg-gray-200 text-gray-800 font-bold py-3 rounded-xl">{}</button>
        <button class="confirm-ok-btn flex-1 bg-morroky-red text-white font-bold py-3 rounded-xl">{}</button>
      </div>
    </div>
  </div>
</div>"#,
            escape_html(&self.message),
            escape_html(&self.cancel_text),
            escape_html(&self.confirm_text)
        )
    }
}

/// The single modal confirmation dialog of an application context.
#[derive(Clone)]
pub struct ConfirmDialog {
    inner: Arc<Mutex<Inner>>,
}

impl ConfirmDialog {
    pub fn new(container: Container) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                visible: false,
                title: String::new(),
                message: String::new(),
                confirm_text: copy::CONFIRM_YES.to_string(),
                cancel_text: copy::CONFIRM_CANCEL.to_string(),
                on_confirm: None,
                on_cancel: None,
                container,
            })),
        }
    }

    /// Opens the dialog. Callbacks of a dialog still open are discarded.
    pub fn show(&self, options: ConfirmOptions) {
        let mut inner = self.lock();
        inner.visible = true;
        inner.title = options.title;
        inner.message = options.message;
        inner.confirm_text = options.confirm_text;
        inner.cancel_text = options.cancel_text;
        inner.on_confirm = options.on_confirm;
        inner.on_cancel = options.on_cancel;
        inner.render();
    }

    /// Hides the dialog, then runs `on_confirm`. The callback runs after the
    /// dialog is closed, so it may open a new one. This reverses the
    /// run-then-hide order of the web client on purpose.
    pub fn confirm(&self) {
        let callback = {
            let mut inner = self.lock();
            if !inner.visible {
                return;
            }
            let callback = inner.on_confirm.take();
            inner.close();
            callback
        };
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Hides the dialog, then runs `on_cancel`. Same deliberate ordering as
    /// [`ConfirmDialog::confirm`].
    pub fn cancel(&self) {
        let callback = {
            let mut inner = self.lock();
            if !inner.visible {
                return;
            }
            let callback = inner.on_cancel.take();
            inner.close();
            callback
        };
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Closes without running either callback.
    pub fn hide(&self) {
        self.lock().close();
    }

    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    pub fn message(&self) -> String {
        self.lock().message.clone()
    }

    pub fn container(&self) -> Container {
        self.lock().container.clone()
    }

    /// Buttons, backdrop clicks and Escape. Clicks inside the dialog body are
    /// swallowed. Returns whether the event was used.
    pub fn handle_dom_event(&self, ev: &DomEvent) -> bool {
        if !self.is_visible() {
            return false;
        }
        if ev.is_key("Escape") {
            self.cancel();
            return true;
        }
        if !ev.is_click() {
            return false;
        }
        if ev.has_class("confirm-ok-btn") {
            self.confirm();
        } else if ev.has_class("confirm-cancel-btn") || ev.target_is("confirm-backdrop") {
            self.cancel();
        }
        true
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
