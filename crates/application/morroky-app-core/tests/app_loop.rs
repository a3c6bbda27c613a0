mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{boot_at, services, FakeBackend};
use morroky_app_core::screens::{DashboardEvent, WorldEvent};
use morroky_app_core::{App, AppMessage, DomEvent, MemoryHistory, Outcome, ScreenId, Surface};
use morroky_core::{AuthChange, AuthUser, Merchant};

#[tokio::test]
async fn outcome_for_an_unmounted_screen_is_dropped() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/world", &backend).await;
    let world_mount = app.router().mounted_id().unwrap();

    app.dispatch(Surface::Root, DomEvent::click("btn-back"));
    app.settle().await;
    assert_eq!(app.router().current_screen(), Some(ScreenId::Gateway));
    let gateway_html = app.root_html();

    app.sender()
        .send(AppMessage::Outcome(Outcome {
            mount_id: world_mount,
            event: WorldEvent::Loaded {
                seq: 1,
                result: Ok(vec![Merchant {
                    id: "late".to_string(),
                    name: "Retardataire".to_string(),
                    ..Merchant::default()
                }]),
            }
            .into(),
        }))
        .unwrap();
    app.tick();

    assert_eq!(app.root_html(), gateway_html);
    assert!(!app.root().contains("Retardataire"));
}

#[tokio::test]
async fn outcome_of_the_wrong_kind_is_ignored_by_the_mounted_screen() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/world", &backend).await;
    let mount_id = app.router().mounted_id().unwrap();
    let before = app.root_html();

    app.sender()
        .send(AppMessage::Outcome(Outcome {
            mount_id,
            event: DashboardEvent::SignedOut.into(),
        }))
        .unwrap();
    app.tick();

    assert_eq!(app.router().current_screen(), Some(ScreenId::World));
    assert_eq!(app.root_html(), before);
}

#[tokio::test]
async fn auth_changes_reach_the_state() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/", &backend).await;

    backend
        .auth_tx
        .send(AuthChange::SignedIn(AuthUser {
            id: "u1".to_string(),
            email: Some("amal@souk.ma".to_string()),
        }))
        .unwrap();

    let user = tokio::time::timeout(Duration::from_secs(1), async {
        loop {
            app.tick();
            if let Some(user) = app.store.state().current_user {
                return user;
            }
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("auth change forwarded");
    assert_eq!(user.id, "u1");

    backend.auth_tx.send(AuthChange::SignedOut).unwrap();
    tokio::time::timeout(Duration::from_secs(1), async {
        while app.store.state().current_user.is_some() {
            app.tick();
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("sign out forwarded");
}

#[tokio::test]
async fn settle_returns_at_once_when_nothing_is_running() {
    let backend = FakeBackend::seeded();
    let mut app = boot_at("/", &backend).await;
    tokio::time::timeout(Duration::from_millis(100), app.settle())
        .await
        .expect("idle app settles");
}

#[tokio::test]
async fn app_refuses_to_start_outside_a_runtime() {
    let backend = FakeBackend::seeded();
    let services = services(&backend);
    let result = std::thread::spawn(move || {
        App::new(services, Arc::new(MemoryHistory::new("/"))).map(|_| ())
    })
    .join()
    .unwrap();
    assert!(result.is_err());
}
