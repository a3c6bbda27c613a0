mod common;

use common::{boot_at, png, FakeBackend, GOOD_PASSWORD};
use morroky_app_core::screens::{AdminEvent, DashboardEvent};
use morroky_app_core::{
    copy, AppMessage, DomEvent, HistoryPort, Outcome, ScreenId, StatePatch, Surface, ToastKind,
};
use morroky_core::{AuthUser, MerchantStatus, UploadFile};

fn sign_in_event(email: &str, password: &str) -> DomEvent {
    DomEvent::submit("auth-form")
        .with_field("email", email)
        .with_field("password", password)
}

#[tokio::test]
async fn admin_refused_by_the_backend_shows_access_denied() {
    let backend = FakeBackend::seeded();
    backend.fail_with("Access Denied");
    let mut app = boot_at("/admin", &backend).await;

    assert!(app.root().contains(copy::DENIED_TITLE));
    assert!(app.root().contains("btn-logout"));
    assert!(!app.root().contains(copy::ADMIN_TITLE));

    app.dispatch(Surface::Root, DomEvent::click("btn-logout"));
    app.settle().await;
    assert_eq!(backend.count("sign_out"), 1);
    assert_eq!(app.router().current_screen(), Some(ScreenId::Gateway));
    assert_eq!(app.store.state().current_user, None);
}

#[tokio::test]
async fn admin_verifies_a_pending_shop() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/admin", &backend).await;
    assert!(app.root().contains("Attente"));

    app.dispatch(
        Surface::Root,
        DomEvent::click_class("btn-verify").with_data("id", "m3"),
    );
    app.settle().await;

    assert_eq!(backend.count("verify_merchant"), 1);
    assert_eq!(backend.count("pending_merchants"), 2);
    let m3 = backend.merchants.lock().unwrap()[2].clone();
    assert_eq!(m3.status, MerchantStatus::Verified);
    assert_eq!(app.toast().state().message, copy::ADMIN_VERIFIED_OK);
}

#[tokio::test]
async fn admin_ignores_lists_from_before_the_latest_reload() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/admin", &backend).await;
    let mount_id = app.router().mounted_id().unwrap();
    let all = backend.merchants.lock().unwrap().clone();
    let (before_pending, before_verified): (Vec<_>, Vec<_>) = all
        .into_iter()
        .partition(|m| m.status == MerchantStatus::Pending);

    app.dispatch(
        Surface::Root,
        DomEvent::click_class("btn-verify").with_data("id", "m3"),
    );
    app.settle().await;
    assert!(!app.root().contains("btn-verify"));

    // Lists fetched on mount arrive after the post-verify reload.
    app.sender()
        .send(AppMessage::Outcome(Outcome {
            mount_id,
            event: AdminEvent::Loaded {
                seq: 1,
                result: Ok((before_pending, before_verified)),
            }
            .into(),
        }))
        .unwrap();
    app.tick();

    assert!(!app.root().contains("btn-verify"));
}

#[tokio::test]
async fn dashboard_for_a_shop_the_user_cannot_see_is_denied() {
    let backend = FakeBackend::seeded();
    let app = boot_at("/manage/ghost", &backend).await;

    assert!(app.root().contains(copy::DASH_DENIED_TITLE));
    assert!(app.root().contains("btn-logout"));
    assert!(!app.root().contains("add-product-form"));
}

#[tokio::test]
async fn delete_waits_for_confirmation() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/manage/m1", &backend).await;

    app.dispatch(
        Surface::Root,
        DomEvent::click_class("delete-product-btn").with_data("product-id", "p1"),
    );
    app.settle().await;
    assert!(app.confirm().is_visible());
    assert_eq!(app.confirm().message(), copy::DASH_DELETE_MESSAGE);
    assert_eq!(backend.count("delete_product"), 0);

    // Clicks inside the dialog body do nothing.
    app.dispatch(Surface::Confirm, DomEvent::click_class("confirm-body"));
    assert!(app.confirm().is_visible());

    app.dispatch(Surface::Confirm, DomEvent::click_class("confirm-ok-btn"));
    app.settle().await;

    assert!(!app.confirm().is_visible());
    assert!(app.confirm().container().is_empty());
    assert_eq!(backend.count("delete_product"), 1);
    assert_eq!(app.toast().state().message, copy::DASH_PRODUCT_DELETED);
    assert!(!app.root().contains("Caftan"));
    assert!(app.root().contains("Babouche"));
}

#[tokio::test]
async fn deleted_product_stays_gone_when_an_older_load_lands_late() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/manage/m1", &backend).await;
    let mount_id = app.router().mounted_id().unwrap();
    let merchant = backend.merchants.lock().unwrap()[0].clone();
    let before: Vec<_> = backend
        .products
        .lock()
        .unwrap()
        .iter()
        .filter(|p| p.merchant_id == "m1")
        .cloned()
        .collect();

    app.dispatch(
        Surface::Root,
        DomEvent::click_class("delete-product-btn").with_data("product-id", "p1"),
    );
    app.dispatch(Surface::Confirm, DomEvent::click_class("confirm-ok-btn"));
    app.settle().await;
    assert!(!app.root().contains("Caftan"));

    app.sender()
        .send(AppMessage::Outcome(Outcome {
            mount_id,
            event: DashboardEvent::Loaded {
                seq: 1,
                result: Ok((Some(merchant), before)),
            }
            .into(),
        }))
        .unwrap();
    app.tick();

    assert!(!app.root().contains("Caftan"));
    assert!(app.root().contains("Babouche"));
}

#[tokio::test]
async fn escape_cancels_a_pending_delete() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/manage/m1", &backend).await;

    app.dispatch(
        Surface::Root,
        DomEvent::click_class("delete-product-btn").with_data("product-id", "p1"),
    );
    app.dispatch(Surface::Root, DomEvent::key("Escape"));
    app.settle().await;

    assert!(!app.confirm().is_visible());
    assert_eq!(backend.count("delete_product"), 0);
    assert!(app.root().contains("Caftan"));
}

#[tokio::test]
async fn adding_a_product_uploads_staged_images_first() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/manage/m1", &backend).await;

    app.dispatch(
        Surface::Root,
        DomEvent::change("prod-image-0", "C:\\fakepath\\kaftan.png")
            .with_file("prod-image-0", png("kaftan.png")),
    );
    app.dispatch(
        Surface::Root,
        DomEvent::submit("add-product-form")
            .with_field("prod-name", "Jellaba")
            .with_field("prod-price", "320"),
    );
    app.settle().await;

    let uploads = backend.uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    assert!(uploads[0].contains("m1"));
    assert_eq!(backend.count("add_product"), 1);
    assert_eq!(app.toast().state().message, copy::DASH_PRODUCT_ADDED);
    assert!(app.root().contains("Jellaba"));
    assert!(!app.root().contains("busy-overlay"));
}

#[tokio::test]
async fn product_needs_at_least_one_image() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/manage/m1", &backend).await;

    app.dispatch(
        Surface::Root,
        DomEvent::submit("add-product-form")
            .with_field("prod-name", "Jellaba")
            .with_field("prod-price", "320"),
    );
    app.settle().await;

    assert_eq!(app.toast().state().message, copy::DASH_NEED_IMAGE);
    assert_eq!(app.toast().state().kind, ToastKind::Error);
    assert_eq!(backend.count("add_product"), 0);
}

#[tokio::test]
async fn non_image_files_never_reach_storage() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/manage/m1", &backend).await;

    let notes = UploadFile::new("notes.txt", "text/plain", b"hello".to_vec());
    app.dispatch(
        Surface::Root,
        DomEvent::change("logo-input", "notes.txt").with_file("logo-input", notes),
    );
    app.settle().await;

    assert_eq!(app.toast().state().message, copy::UNSUPPORTED_IMAGE);
    assert_eq!(backend.count("upload_image"), 0);
}

#[tokio::test]
async fn logo_upload_updates_the_merchant() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/manage/m1", &backend).await;

    app.dispatch(
        Surface::Root,
        DomEvent::change("logo-input", "logo.png").with_file("logo-input", png("logo.png")),
    );
    app.settle().await;

    assert_eq!(backend.count("update_merchant_logo"), 1);
    let logo = backend.merchants.lock().unwrap()[0].logo_url.clone();
    assert!(logo.unwrap().ends_with("logo.png"));
    assert_eq!(app.toast().state().message, copy::DASH_IMAGE_UPDATED);
}

#[tokio::test]
async fn wrong_password_is_reported_without_leaving_the_form() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/auth", &backend).await;

    app.dispatch(Surface::Root, sign_in_event("amal@souk.ma", "wrong-one"));
    app.settle().await;

    let toast = app.toast().state();
    assert_eq!(toast.message, copy::AUTH_BAD_CREDENTIALS);
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(app.router().current_screen(), Some(ScreenId::Auth));
    assert!(app.root().contains(copy::AUTH_BAD_CREDENTIALS));
}

#[tokio::test]
async fn short_password_is_rejected_before_calling_the_backend() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/auth", &backend).await;

    app.dispatch(Surface::Root, sign_in_event("amal@souk.ma", "123"));
    app.settle().await;

    assert_eq!(app.toast().state().message, copy::AUTH_PASSWORD_TOO_SHORT);
    assert_eq!(backend.count("sign_in"), 0);
}

#[tokio::test]
async fn signing_in_with_a_shop_opens_its_dashboard() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/auth", &backend).await;

    app.dispatch(Surface::Root, sign_in_event("amal@souk.ma", GOOD_PASSWORD));
    app.settle().await;

    let state = app.store.state();
    assert_eq!(state.screen, ScreenId::MerchantDashboard);
    assert_eq!(state.merchant_id.as_deref(), Some("m1"));
    assert_eq!(state.current_user.map(|u| u.id).as_deref(), Some("owner-m1"));
    assert_eq!(app.history().current_path(), "/manage/m1");
    assert!(app.root().contains("Caftan"));
}

#[tokio::test]
async fn gateway_opens_registration_when_asked_and_registers_the_shop() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/", &backend).await;

    app.store.set_state(
        StatePatch::default()
            .with_current_user(Some(AuthUser {
                id: "u9".to_string(),
                email: None,
            }))
            .with_show_registration(true),
    );
    app.settle().await;
    assert!(app.root().contains("registration-form"));
    assert!(!app.store.state().show_registration);

    app.dispatch(Surface::Root, DomEvent::submit("registration-form").with_field("name", "Dar Amal"));
    assert_eq!(app.toast().state().message, copy::REG_MISSING_FIELDS);
    assert_eq!(backend.count("register_merchant"), 0);

    app.dispatch(
        Surface::Root,
        DomEvent::submit("registration-form")
            .with_field("name", "Dar Amal")
            .with_field("phone", "0600000000")
            .with_field("loc-street", "omar-khayam")
            .with_field("loc-kissaria", "k1")
            .with_field("loc-alley", "A")
            .with_field("loc-shopNumber", "7"),
    );
    app.settle().await;

    assert_eq!(backend.count("register_merchant"), 1);
    let created = backend.merchants.lock().unwrap().last().cloned().unwrap();
    assert_eq!(created.owner_id.as_deref(), Some("u9"));
    assert_eq!(created.status, MerchantStatus::Pending);
    assert_eq!(app.toast().state().message, copy::REG_SENT);
    assert_eq!(app.router().current_screen(), Some(ScreenId::MerchantDashboard));
    assert_eq!(app.store.state().merchant_id.as_deref(), Some("m-new"));
}

#[tokio::test]
async fn landing_editor_refuses_another_merchants_product() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/manage/m1", &backend).await;

    app.store.set_state(
        StatePatch::screen(ScreenId::LandingPageEditor)
            .with_merchant_id("m1")
            .with_product_id("p9"),
    );
    app.settle().await;

    assert!(app.root().contains(copy::EDITOR_DENIED_BODY));
    assert!(app.root().contains("back-to-dashboard"));
}

#[tokio::test]
async fn landing_editor_saves_the_page() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/manage/m1", &backend).await;

    app.dispatch(Surface::Root, DomEvent::click("create-landing-page-btn"));
    app.dispatch(
        Surface::Root,
        DomEvent::click_class("lp-product-item").with_data("product-id", "p1"),
    );
    app.settle().await;
    assert_eq!(app.router().current_screen(), Some(ScreenId::LandingPageEditor));

    app.dispatch(
        Surface::Root,
        DomEvent::submit("landing-page-form")
            .with_field("lp-headline", "Caftan fait main")
            .with_field("lp-description", "Brode a Fes"),
    );
    app.settle().await;

    assert_eq!(app.toast().state().message, copy::EDITOR_SAVED);
    let saved = backend.products.lock().unwrap()[0].landing_page_config.clone().unwrap();
    assert_eq!(saved.headline, "Caftan fait main");
}

#[tokio::test]
async fn product_landing_takes_an_order() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/product/p2", &backend).await;
    assert!(app.root().contains("Babouche"));

    app.dispatch(Surface::Root, DomEvent::click("buy-now-btn"));
    assert_eq!(app.toast().state().message, copy::PRODUCT_ORDER_RECEIVED);

    app.dispatch(Surface::Root, DomEvent::click("btn-back"));
    app.settle().await;
    assert_eq!(app.router().current_screen(), Some(ScreenId::World));
}
