use std::collections::BTreeMap;

use morroky_core::{AuthUser, MerchantId, ProductId};
use serde_json::Value;

use crate::domain::{ScreenId, UserType};

/// A partial [`AppState`](crate::domain::AppState). `None` leaves a field
/// alone; for optional fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePatch {
    pub screen: Option<ScreenId>,
    pub user_type: Option<Option<UserType>>,
    pub merchant_id: Option<Option<MerchantId>>,
    pub product_id: Option<Option<ProductId>>,
    pub selected_merchant_id: Option<Option<MerchantId>>,
    pub show_registration: Option<bool>,
    pub current_user: Option<Option<AuthUser>>,
    /// `None` removes the key.
    pub extras: BTreeMap<String, Option<Value>>,
}

impl StatePatch {
    pub fn screen(screen: ScreenId) -> Self {
        Self {
            screen: Some(screen),
            ..Default::default()
        }
    }

    pub fn with_user_type(mut self, user_type: UserType) -> Self {
        self.user_type = Some(Some(user_type));
        self
    }

    pub fn with_merchant_id(mut self, id: impl Into<MerchantId>) -> Self {
        self.merchant_id = Some(Some(id.into()));
        self
    }

    pub fn clear_merchant_id(mut self) -> Self {
        self.merchant_id = Some(None);
        self
    }

    pub fn with_product_id(mut self, id: impl Into<ProductId>) -> Self {
        self.product_id = Some(Some(id.into()));
        self
    }

    pub fn clear_product_id(mut self) -> Self {
        self.product_id = Some(None);
        self
    }

    pub fn clear_selected_merchant_id(mut self) -> Self {
        self.selected_merchant_id = Some(None);
        self
    }

    pub fn with_selected_merchant_id(mut self, id: impl Into<MerchantId>) -> Self {
        self.selected_merchant_id = Some(Some(id.into()));
        self
    }

    pub fn with_show_registration(mut self, show: bool) -> Self {
        self.show_registration = Some(show);
        self
    }

    pub fn with_current_user(mut self, user: Option<AuthUser>) -> Self {
        self.current_user = Some(user);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extras.insert(key.into(), Some(value));
        self
    }

    pub fn without_extra(mut self, key: impl Into<String>) -> Self {
        self.extras.insert(key.into(), None);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
