//! Headless stand-in for the page: containers hold rendered markup and
//! user input arrives as delegated events.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use morroky_core::UploadFile;

/// A mount point. Clones share the same content.
#[derive(Debug, Clone, Default)]
pub struct Container {
    html: Arc<Mutex<String>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_html(&self, html: impl Into<String>) {
        *self.html.lock().unwrap_or_else(PoisonError::into_inner) = html.into();
    }

    pub fn clear(&self) {
        self.set_html(String::new());
    }

    pub fn html(&self) -> String {
        self.html.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_empty(&self) -> bool {
        self.html.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.html.lock().unwrap_or_else(PoisonError::into_inner).contains(needle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Submit,
    Change,
    KeyDown(String),
}

/// The element an event was delegated from: its id, classes and `data-*`
/// attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTarget {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: EventKind,
    pub target: EventTarget,
    /// Named form fields (for submit) or the changed control's value under
    /// `value` (for change).
    pub form: BTreeMap<String, String>,
    pub files: Vec<(String, UploadFile)>,
}

impl DomEvent {
    fn new(kind: EventKind) -> Self {
        Self {
            kind,
            target: EventTarget::default(),
            form: BTreeMap::new(),
            files: Vec::new(),
        }
    }

    /// Click on the element with `id`.
    pub fn click(id: &str) -> Self {
        Self::new(EventKind::Click).with_id(id)
    }

    /// Click on an element identified only by a class.
    pub fn click_class(class: &str) -> Self {
        Self::new(EventKind::Click).with_class(class)
    }

    pub fn submit(form_id: &str) -> Self {
        Self::new(EventKind::Submit).with_id(form_id)
    }

    pub fn change(id: &str, value: impl Into<String>) -> Self {
        Self::new(EventKind::Change).with_id(id).with_field("value", value)
    }

    pub fn key(key: &str) -> Self {
        Self::new(EventKind::KeyDown(key.to_string()))
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.target.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.target.classes.push(class.to_string());
        self
    }

    pub fn with_data(mut self, key: &str, value: impl Into<String>) -> Self {
        self.target.data.insert(key.to_string(), value.into());
        self
    }

    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.form.insert(name.to_string(), value.into());
        self
    }

    pub fn with_file(mut self, field: &str, file: UploadFile) -> Self {
        self.files.push((field.to_string(), file));
        self
    }

    pub fn is_click(&self) -> bool {
        self.kind == EventKind::Click
    }

    pub fn is_submit(&self) -> bool {
        self.kind == EventKind::Submit
    }

    pub fn is_change(&self) -> bool {
        self.kind == EventKind::Change
    }

    pub fn is_key(&self, key: &str) -> bool {
        matches!(&self.kind, EventKind::KeyDown(k) if k == key)
    }

    pub fn target_id(&self) -> Option<&str> {
        self.target.id.as_deref()
    }

    pub fn target_is(&self, id: &str) -> bool {
        self.target_id() == Some(id)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.target.classes.iter().any(|c| c == class)
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.target.data.get(key).map(String::as_str)
    }

    /// Trimmed field value; empty when the field is absent.
    pub fn field(&self, name: &str) -> &str {
        self.form.get(name).map(|v| v.trim()).unwrap_or_default()
    }

    pub fn value(&self) -> &str {
        self.field("value")
    }

    pub fn file(&self, field: &str) -> Option<&UploadFile> {
        self.files.iter().find(|(f, _)| f == field).map(|(_, file)| file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_content() {
        let a = Container::new();
        let b = a.clone();
        a.set_html("<p>x</p>");
        assert_eq!(b.html(), "<p>x</p>");
        b.clear();
        assert!(a.is_empty());
    }

    #[test]
    fn event_accessors() {
        let ev = DomEvent::click_class("merchant-card").with_data("id", "m1");
        assert!(ev.is_click());
        assert!(ev.has_class("merchant-card"));
        assert_eq!(ev.data("id"), Some("m1"));
        assert_eq!(ev.target_id(), None);

        let ev = DomEvent::submit("auth-form").with_field("email", "  a@b.ma ");
        assert_eq!(ev.field("email"), "a@b.ma");
        assert_eq!(ev.field("password"), "");
        assert!(DomEvent::key("Escape").is_key("Escape"));
    }
}
