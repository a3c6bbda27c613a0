use std::collections::BTreeMap;
use std::fmt;

use morroky_core::{AuthUser, MerchantId, ProductId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenId {
    #[default]
    Gateway,
    Auth,
    World,
    Merchant,
    Admin,
    MerchantDashboard,
    LandingPageEditor,
    ProductLanding,
    ProductDetail,
    MerchantWelcome,
}

impl ScreenId {
    pub const ALL: [ScreenId; 10] = [
        ScreenId::Gateway,
        ScreenId::Auth,
        ScreenId::World,
        ScreenId::Merchant,
        ScreenId::Admin,
        ScreenId::MerchantDashboard,
        ScreenId::LandingPageEditor,
        ScreenId::ProductLanding,
        ScreenId::ProductDetail,
        ScreenId::MerchantWelcome,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenId::Gateway => "gateway",
            ScreenId::Auth => "auth",
            ScreenId::World => "world",
            ScreenId::Merchant => "merchant",
            ScreenId::Admin => "admin",
            ScreenId::MerchantDashboard => "merchant-dashboard",
            ScreenId::LandingPageEditor => "landing-page-editor",
            ScreenId::ProductLanding => "product-landing",
            ScreenId::ProductDetail => "product-detail",
            ScreenId::MerchantWelcome => "merchant-welcome",
        }
    }

    /// Unknown names land on the gateway instead of failing.
    pub fn parse_or_default(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == name)
            .unwrap_or_else(|| {
                tracing::debug!(name, "unknown screen name, using gateway");
                ScreenId::Gateway
            })
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Buyer,
    Merchant,
}

/// The single observable application state. Screen parameters are optional;
/// a screen that needs one and finds it missing degrades instead of failing.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AppState {
    pub screen: ScreenId,
    pub user_type: Option<UserType>,
    pub merchant_id: Option<MerchantId>,
    pub product_id: Option<ProductId>,
    pub selected_merchant_id: Option<MerchantId>,
    pub show_registration: bool,
    pub current_user: Option<AuthUser>,
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl AppState {
    pub fn is_signed_in(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extras.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_names_round_trip_and_unknown_falls_back() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::parse_or_default(id.as_str()), id);
        }
        assert_eq!(ScreenId::parse_or_default("settings"), ScreenId::Gateway);
        assert_eq!(ScreenId::parse_or_default(""), ScreenId::Gateway);
    }

    #[test]
    fn serde_uses_kebab_names() {
        let json = serde_json::to_string(&ScreenId::LandingPageEditor).unwrap();
        assert_eq!(json, "\"landing-page-editor\"");
    }

    #[test]
    fn initial_state_is_gateway() {
        let state = AppState::default();
        assert_eq!(state.screen, ScreenId::Gateway);
        assert!(!state.show_registration);
        assert!(!state.is_signed_in());
    }
}
