use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use morroky_app_core::{AppStore, ScreenId, StatePatch, UserType};

#[test]
fn subscriber_sees_current_state_on_subscribe() {
    let store = AppStore::default();
    store.set_state(StatePatch::screen(ScreenId::World));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen2 = seen.clone();
    store.subscribe(move |s| seen2.lock().unwrap().push(s.screen));

    assert_eq!(*seen.lock().unwrap(), vec![ScreenId::World]);
}

#[test]
fn one_change_notifies_each_subscriber_once() {
    let store = AppStore::default();
    let a = Arc::new(AtomicUsize::new(0));
    let b = Arc::new(AtomicUsize::new(0));
    let (a2, b2) = (a.clone(), b.clone());
    store.subscribe(move |_| {
        a2.fetch_add(1, Ordering::SeqCst);
    });
    store.subscribe(move |_| {
        b2.fetch_add(1, Ordering::SeqCst);
    });

    store.set_state(StatePatch::screen(ScreenId::World).with_user_type(UserType::Buyer));

    // One replay plus one change.
    assert_eq!(a.load(Ordering::SeqCst), 2);
    assert_eq!(b.load(Ordering::SeqCst), 2);
}

#[test]
fn patch_that_changes_nothing_is_silent() {
    let store = AppStore::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let calls2 = calls.clone();
    store.subscribe(move |_| {
        calls2.fetch_add(1, Ordering::SeqCst);
    });

    assert!(!store.set_state(StatePatch::screen(ScreenId::Gateway)));
    assert!(!store.set_state(StatePatch::default()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn merge_keeps_fields_the_patch_does_not_name() {
    let store = AppStore::default();
    store.set_state(StatePatch::screen(ScreenId::MerchantDashboard).with_merchant_id("m1"));
    store.set_state(StatePatch::default().with_user_type(UserType::Merchant));

    let state = store.state();
    assert_eq!(state.screen, ScreenId::MerchantDashboard);
    assert_eq!(state.merchant_id.as_deref(), Some("m1"));
    assert_eq!(state.user_type, Some(UserType::Merchant));
}

#[test]
fn unsubscribe_is_idempotent_and_stops_delivery() {
    let store = AppStore::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let calls2 = calls.clone();
    let sub = store.subscribe(move |_| {
        calls2.fetch_add(1, Ordering::SeqCst);
    });

    sub.unsubscribe();
    sub.unsubscribe();
    store.set_state(StatePatch::screen(ScreenId::World));

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn unsubscribe_after_store_is_gone_is_harmless() {
    let store = AppStore::default();
    let sub = store.subscribe(|_| {});
    drop(store);
    sub.unsubscribe();
}

#[test]
fn panicking_subscriber_does_not_starve_the_others() {
    let store = AppStore::default();
    store.subscribe(|s| {
        if s.screen == ScreenId::World {
            panic!("subscriber blew up");
        }
    });
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen2 = seen.clone();
    store.subscribe(move |s| seen2.lock().unwrap().push(s.screen));

    store.set_state(StatePatch::screen(ScreenId::World));
    store.set_state(StatePatch::screen(ScreenId::Auth));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![ScreenId::Gateway, ScreenId::World, ScreenId::Auth]
    );
    assert_eq!(store.state().screen, ScreenId::Auth);
}

#[test]
fn change_made_inside_a_subscriber_is_seen_in_order_by_everyone() {
    let store = AppStore::default();
    let redirect = store.clone();
    store.subscribe(move |s| {
        if s.screen == ScreenId::ProductLanding && s.product_id.is_none() {
            redirect.set_state(StatePatch::screen(ScreenId::Gateway));
        }
    });
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen2 = seen.clone();
    store.subscribe(move |s| seen2.lock().unwrap().push(s.screen));

    store.set_state(StatePatch::screen(ScreenId::ProductLanding));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![ScreenId::Gateway, ScreenId::ProductLanding, ScreenId::Gateway]
    );
    assert_eq!(store.state().screen, ScreenId::Gateway);
}

#[test]
fn subscriber_removed_mid_fanout_is_skipped() {
    let store = AppStore::default();
    let victim: Arc<Mutex<Option<morroky_app_core::Subscription>>> = Arc::new(Mutex::new(None));
    let victim2 = victim.clone();
    store.subscribe(move |s| {
        if s.screen == ScreenId::World {
            if let Some(sub) = victim2.lock().unwrap().as_ref() {
                sub.unsubscribe();
            }
        }
    });
    let calls = Arc::new(AtomicUsize::new(0));
    let calls2 = calls.clone();
    let sub = store.subscribe(move |_| {
        calls2.fetch_add(1, Ordering::SeqCst);
    });
    *victim.lock().unwrap() = Some(sub);

    store.set_state(StatePatch::screen(ScreenId::World));

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
