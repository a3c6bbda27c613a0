use crate::domain::AppState;

use super::patch::StatePatch;

/// Shallow merge: every field the patch names replaces the current value.
pub fn reduce(mut state: AppState, patch: StatePatch) -> AppState {
    let StatePatch {
        screen,
        user_type,
        merchant_id,
        product_id,
        selected_merchant_id,
        show_registration,
        current_user,
        extras,
    } = patch;

    if let Some(screen) = screen {
        state.screen = screen;
    }
    if let Some(v) = user_type {
        state.user_type = v;
    }
    if let Some(v) = merchant_id {
        state.merchant_id = v;
    }
    if let Some(v) = product_id {
        state.product_id = v;
    }
    if let Some(v) = selected_merchant_id {
        state.selected_merchant_id = v;
    }
    if let Some(v) = show_registration {
        state.show_registration = v;
    }
    if let Some(v) = current_user {
        state.current_user = v;
    }
    for (key, value) in extras {
        match value {
            Some(value) => {
                state.extras.insert(key, value);
            }
            None => {
                state.extras.remove(&key);
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ScreenId, UserType};
    use serde_json::json;

    #[test]
    fn untouched_fields_survive_the_merge() {
        let state = AppState {
            merchant_id: Some("m1".into()),
            user_type: Some(UserType::Merchant),
            ..Default::default()
        };
        let next = reduce(state, StatePatch::screen(ScreenId::World));
        assert_eq!(next.screen, ScreenId::World);
        assert_eq!(next.merchant_id.as_deref(), Some("m1"));
        assert_eq!(next.user_type, Some(UserType::Merchant));
    }

    #[test]
    fn optional_fields_can_be_cleared() {
        let state = AppState {
            merchant_id: Some("m1".into()),
            ..Default::default()
        };
        let next = reduce(state, StatePatch::default().clear_merchant_id());
        assert_eq!(next.merchant_id, None);
    }

    #[test]
    fn extras_insert_and_remove() {
        let state = reduce(
            AppState::default(),
            StatePatch::default().with_extra("tab", json!("products")),
        );
        assert_eq!(state.extra("tab"), Some(&json!("products")));
        let state = reduce(state, StatePatch::default().without_extra("tab"));
        assert!(state.extras.is_empty());
    }
}
