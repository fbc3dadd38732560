//! User persistence and uniqueness against `PostgreSQL`.

use crate::postgres::helpers::{prepared_stores, user_named};
use rstest::rstest;
use tasktree::account::{
    domain::{EmailAddress, PasswordHash, User, Username},
    ports::{UserRepository, UserRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_users_are_found_by_every_key() {
    let Some(stores) = prepared_stores().await.expect("database prepared") else {
        return;
    };
    let user = user_named("lookup").expect("valid user");
    stores.users.store(&user).await.expect("user stored");

    let by_id = stores.users.find_by_id(user.id()).await.expect("query");
    let by_name = stores
        .users
        .find_by_username(user.username())
        .await
        .expect("query");
    let by_email = stores.users.find_by_email(user.email()).await.expect("query");

    assert_eq!(by_id.as_ref(), Some(&user));
    assert_eq!(by_name.as_ref(), Some(&user));
    assert_eq!(by_email, Some(user));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_maps_to_constraint_error() {
    let Some(stores) = prepared_stores().await.expect("database prepared") else {
        return;
    };
    let original = user_named("taken").expect("valid user");
    stores.users.store(&original).await.expect("user stored");
    let clash = User::register(
        Username::new("taken").expect("valid username"),
        EmailAddress::new("different@example.com").expect("valid email"),
        PasswordHash::new("hash").expect("valid hash"),
    );

    let result = stores.users.store(&clash).await;

    assert!(matches!(result, Err(UserRepositoryError::DuplicateUsername(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_maps_to_constraint_error() {
    let Some(stores) = prepared_stores().await.expect("database prepared") else {
        return;
    };
    let original = user_named("first").expect("valid user");
    stores.users.store(&original).await.expect("user stored");
    let clash = User::register(
        Username::new("second").expect("valid username"),
        EmailAddress::new("first@example.com").expect("valid email"),
        PasswordHash::new("hash").expect("valid hash"),
    );

    let result = stores.users.store(&clash).await;

    assert!(matches!(result, Err(UserRepositoryError::DuplicateEmail(_))));
}
