//! Markup helpers shared by the screens and widgets.

use crate::copy;

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Spinner shown while a screen waits for its first data.
pub fn loading_view(message: &str) -> String {
    format!(
        r#"<div class="min-h-screen flex items-center justify-center bg-gray-50 rtl" data-state="loading">
  <div class="text-center">
    <div class="inline-block w-8 h-8 border-4 border-morroky-red border-t-transparent rounded-full animate-spin mb-4"></div>
    <p class="text-gray-500 font-bold">{}</p>
  </div>
</div>"#,
        escape_html(message)
    )
}

/// The access-denied / not-found view with its single recovery button.
pub fn denied_view(title: &str, body: &str, button_id: &str, button_label: &str) -> String {
    format!(
        r#"<div class="min-h-screen flex items-center justify-center bg-gray-50 rtl" data-state="error">
  <div class="text-center p-12 bg-white rounded-3xl shadow-xl max-w-md">
    <h2 class="text-2xl font-black text-red-600 mb-4">{}</h2>
    <p class="text-gray-600 mb-6">{}</p>
    <button id="{}" class="bg-morroky-dark text-white px-8 py-3 rounded-2xl font-bold">{}</button>
  </div>
</div>"#,
        escape_html(title),
        escape_html(body),
        button_id,
        escape_html(button_label)
    )
}

/// `<option>` list with a leading placeholder; `selected` is marked.
pub fn options(placeholder: &str, items: &[morroky_core::SelectOption], selected: &str) -> String {
    let mut out = format!(r#"<option value="">{}</option>"#, escape_html(placeholder));
    for item in items {
        let mark = if item.id == selected { " selected" } else { "" };
        out.push_str(&format!(
            r#"<option value="{}"{mark}>{}</option>"#,
            escape_html(&item.id),
            escape_html(&item.name)
        ));
    }
    out
}

pub fn price(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0} {}", copy::CURRENCY)
    } else {
        format!("{value:.2} {}", copy::CURRENCY)
    }
}

pub fn image_or_placeholder(url: Option<&str>, size: &str) -> String {
    match url.filter(|u| !u.is_empty()) {
        Some(u) => escape_html(u),
        None => format!("https://placehold.co/{size}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b onclick="x">&'"#),
            "&lt;b onclick=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn prices_drop_zero_fraction() {
        assert_eq!(price(120.0), format!("120 {}", copy::CURRENCY));
        assert_eq!(price(99.5), format!("99.50 {}", copy::CURRENCY));
    }
}
