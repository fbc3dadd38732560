//! Registration and login through the in-memory application.

use crate::in_memory::helpers::{TestApp, app, register};
use rstest::rstest;
use std::sync::Arc;
use tasktree::account::adapters::hasher::Argon2PasswordHasher;
use tasktree::account::services::{AccountServiceError, RegisterUserRequest};
use tasktree::app::InMemoryTodoApp;
use tasktree::error::ErrorKind;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_users_can_log_in(app: TestApp) {
    let heidi = register(&app, "heidi").await.expect("heidi registers");

    let authenticated = app
        .accounts()
        .authenticate("heidi", "correct horse")
        .await
        .expect("login succeeds");
    let resolved = app
        .accounts()
        .find_user(heidi.id())
        .await
        .expect("session resolves");

    assert_eq!(authenticated.id(), heidi.id());
    assert_eq!(resolved, heidi);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_is_rejected(app: TestApp) {
    register(&app, "ivan").await.expect("ivan registers");

    let result = app.accounts().authenticate("ivan", "battery staple").await;

    assert!(matches!(result, Err(AccountServiceError::InvalidCredentials)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn usernames_are_unique(app: TestApp) {
    register(&app, "judy").await.expect("judy registers");

    let result = app
        .accounts()
        .register(RegisterUserRequest::new(
            "judy",
            "another@example.com",
            "secret",
        ))
        .await;

    assert_eq!(result.err().map(|err| err.kind()), Some(ErrorKind::Validation));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn argon2_backed_app_registers_and_authenticates() {
    let app = InMemoryTodoApp::in_memory(Arc::new(Argon2PasswordHasher::new()));
    let kate = app
        .accounts()
        .register(RegisterUserRequest::new(
            "kate",
            "kate@example.com",
            "correct horse",
        ))
        .await
        .expect("kate registers");

    assert!(kate.password_hash().as_str().starts_with("$argon2id$"));
    let authenticated = app
        .accounts()
        .authenticate("kate", "correct horse")
        .await
        .expect("login succeeds");
    assert_eq!(authenticated.id(), kate.id());
    let rejected = app.accounts().authenticate("kate", "battery staple").await;
    assert!(matches!(rejected, Err(AccountServiceError::InvalidCredentials)));
}
