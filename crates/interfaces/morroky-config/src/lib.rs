//! Central configuration constants for runtime limits and defaults.

/// Default time a toast stays on screen, in milliseconds.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3_000;

/// Minimum accepted password length on sign-up and sign-in.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Number of image slots a product carries.
pub const PRODUCT_IMAGE_SLOTS: usize = 4;

/// Largest image the client will hand to storage. 10 MiB.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// File extensions accepted for image uploads (lowercase).
pub const ACCEPTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Storage bucket holding logos, backgrounds and product pictures.
pub const IMAGE_BUCKET: &str = "image";

pub const MERCHANTS_TABLE: &str = "merchants";
pub const PRODUCTS_TABLE: &str = "products";

/// The only market the registration flow currently serves.
pub const DEFAULT_CITY: &str = "الدار البيضاء";
pub const DEFAULT_MARKET: &str = "درب عمر";

/// Country prefix substituted for the leading zero of local phone numbers.
pub const PHONE_COUNTRY_PREFIX: &str = "212";

pub const ENV_BAAS_URL: &str = "MORROKY_BAAS_URL";
pub const ENV_BAAS_ANON_KEY: &str = "MORROKY_BAAS_ANON_KEY";

/// Connection settings for the backend-as-a-service project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaasConfig {
    pub url: String,
    pub anon_key: String,
}

impl BaasConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Reads `MORROKY_BAAS_URL` and `MORROKY_BAAS_ANON_KEY`. Returns `None`
    /// when either is missing or blank.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var(ENV_BAAS_URL).ok()?;
        let key = std::env::var(ENV_BAAS_ANON_KEY).ok()?;
        if url.trim().is_empty() || key.trim().is_empty() {
            return None;
        }
        Some(Self::new(url.trim(), key.trim()))
    }
}

/// Convenience check used by every upload path.
pub fn is_accepted_image(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| ACCEPTED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        let cfg = BaasConfig::new("https://demo.example.co/", "k");
        assert_eq!(cfg.url, "https://demo.example.co");
    }

    #[test]
    fn image_extension_check_is_case_insensitive() {
        assert!(is_accepted_image("logo.PNG"));
        assert!(is_accepted_image("a.b.jpeg"));
        assert!(!is_accepted_image("notes.txt"));
        assert!(!is_accepted_image("no-extension"));
    }
}
