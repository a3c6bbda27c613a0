use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod images;
pub mod location;

pub use catalog::{LocationCatalog, SelectOption, OTHER_ID, OTHER_LABEL};
pub use images::{append_image, normalize_image_slots};
pub use location::Location;

pub type MerchantId = String;
pub type ProductId = String;
pub type UserId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MerchantStatus {
    #[default]
    Pending,
    Verified,
}

impl MerchantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MerchantStatus::Pending => "pending",
            MerchantStatus::Verified => "verified",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Merchant {
    pub id: MerchantId,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: MerchantStatus,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub background_url: Option<String>,
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub rejection_reasons: Vec<String>,
}

impl Merchant {
    /// WhatsApp-ready number: the leading local `0` becomes the country prefix.
    pub fn whatsapp_number(&self) -> Option<String> {
        let phone = self.phone.as_deref()?.trim();
        if phone.is_empty() {
            return None;
        }
        let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
        Some(match digits.strip_prefix('0') {
            Some(rest) => format!("{}{rest}", morroky_config::PHONE_COUNTRY_PREFIX),
            None => digits,
        })
    }
}

/// Registration payload. The backend assigns the id; status is always pending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMerchant {
    pub name: String,
    pub phone: String,
    pub location: Location,
    pub status: MerchantStatus,
    pub owner_id: Option<UserId>,
}

impl NewMerchant {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            location,
            status: MerchantStatus::Pending,
            owner_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LandingPageConfig {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Product {
    pub id: ProductId,
    pub merchant_id: MerchantId,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<Option<String>>,
    #[serde(default)]
    pub landing_page_config: Option<LandingPageConfig>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Images in slot order, skipping empty slots. Falls back to the legacy
    /// single `image_url` column.
    pub fn images(&self) -> Vec<&str> {
        let slots: Vec<&str> = self
            .image_urls
            .iter()
            .filter_map(|u| u.as_deref())
            .filter(|u| !u.is_empty())
            .collect();
        if !slots.is_empty() {
            return slots;
        }
        self.image_url.as_deref().into_iter().collect()
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.images().first().copied()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub merchant_id: MerchantId,
    pub name: String,
    pub price: f64,
    pub image_urls: Vec<Option<String>>,
}

impl NewProduct {
    pub fn new(merchant_id: impl Into<String>, name: impl Into<String>, price: f64, images: Vec<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            name: name.into(),
            price,
            image_urls: normalize_image_slots(images.into_iter().map(Some).collect()),
        }
    }
}

/// Exact-match filters for merchant listings. Blank values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MerchantFilter {
    pub street_id: Option<String>,
    pub kissaria_id: Option<String>,
    pub alley: Option<String>,
    pub status: Option<MerchantStatus>,
}

impl MerchantFilter {
    pub fn verified() -> Self {
        Self {
            status: Some(MerchantStatus::Verified),
            ..Default::default()
        }
    }

    /// Active `(column, value)` pairs in a stable order. Location fields are
    /// addressed inside the JSON `location` column.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(status) = self.status {
            out.push(("status", status.as_str().to_string()));
        }
        let location = [
            ("location->>streetId", &self.street_id),
            ("location->>kissariaId", &self.kissaria_id),
            ("location->>alley", &self.alley),
        ];
        for (column, value) in location {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                out.push((column, v.to_string()));
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChange {
    SignedIn(AuthUser),
    SignedOut,
}

impl AuthChange {
    /// Wire name used by the auth provider.
    pub fn event_name(&self) -> &'static str {
        match self {
            AuthChange::SignedIn(_) => "SIGNED_IN",
            AuthChange::SignedOut => "SIGNED_OUT",
        }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            AuthChange::SignedIn(u) => Some(u),
            AuthChange::SignedOut => None,
        }
    }
}

/// A file picked by the user, as handed to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Lowercase extension, `bin` when the name has none.
    pub fn extension(&self) -> String {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| "bin".to_string())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
