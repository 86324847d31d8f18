//! Conformance cases for the flat `users/{userId}` scope.
//!
//! Reads are public. Creates require any authenticated identity, since the
//! document id is server-assigned. Updates require the subject to match the
//! document id. Deletes are denied for everyone.

use firetest_wire::document::DocumentPayload;
use firetest_wire::value::Value;

use super::helpers::*;

// ============================================================================
// Access Matrix
// ============================================================================

/// ## Summary
/// Anyone can read a profile, with or without an identity.
#[test_log::test(tokio::test)]
async fn read_is_public() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = users_scope().expect("users scope");
    matrix::verify(env, &scope, Op::Read)
        .await
        .expect("Failed to run users read cases");
}

/// ## Summary
/// Creating a profile requires an identity; anonymous creates are denied.
#[test_log::test(tokio::test)]
async fn create_requires_authentication() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = users_scope().expect("users scope");
    matrix::verify(env, &scope, Op::Create)
        .await
        .expect("Failed to run users create cases");
}

/// ## Summary
/// Only the subject may update their own profile.
#[test_log::test(tokio::test)]
async fn update_is_owner_scoped() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = users_scope().expect("users scope");
    matrix::verify(env, &scope, Op::Update)
        .await
        .expect("Failed to run users update cases");
}

/// ## Summary
/// Nobody may delete a profile, not even its owner.
#[test_log::test(tokio::test)]
async fn delete_is_denied_for_everyone() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = users_scope().expect("users scope");
    matrix::verify(env, &scope, Op::Delete)
        .await
        .expect("Failed to run users delete cases");
}

// ============================================================================
// Concrete Scenarios
// ============================================================================

/// ## Summary
/// The subject updates their own profile and the new name sticks.
#[test_log::test(tokio::test)]
async fn owner_update_persists_the_new_name() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = users_scope().expect("users scope");
    seed_scope(env, &scope)
        .await
        .expect("Failed to seed users fixture");

    let owner = env
        .authenticated_context(TEST_USER_ID)
        .expect("Failed to build authenticated client");

    let updated = assert_allowed(owner.update_document(&scope.fixture_doc, &scope.update).await);
    assert_eq!(
        updated.field("name").and_then(Value::as_str),
        Some("authenticated user name")
    );

    // An independent read confirms the write actually persisted.
    let profile = assert_allowed(owner.get_document(&scope.fixture_doc).await);
    assert_eq!(
        profile.field("name").and_then(Value::as_str),
        Some("authenticated user name")
    );
}

/// ## Summary
/// An update without an identity is denied and leaves the profile alone.
#[test_log::test(tokio::test)]
async fn anonymous_update_changes_nothing() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = users_scope().expect("users scope");
    seed_scope(env, &scope)
        .await
        .expect("Failed to seed users fixture");

    let anonymous = env
        .unauthenticated_context()
        .expect("Failed to build unauthenticated client");

    assert_denied(
        anonymous
            .update_document(&scope.fixture_doc, &scope.update)
            .await,
    );

    // Public read confirms the seeded value survived the denied write.
    let profile = assert_allowed(anonymous.get_document(&scope.fixture_doc).await);
    assert_eq!(
        profile.field("name").and_then(Value::as_str),
        Some("initial user name")
    );
}

/// ## Summary
/// An authenticated create lands under a server-assigned id, distinct from
/// the subject's uid.
#[test_log::test(tokio::test)]
async fn authenticated_create_gets_a_server_assigned_id() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = users_scope().expect("users scope");

    let owner = env
        .authenticated_context(TEST_USER_ID)
        .expect("Failed to build authenticated client");

    let created = assert_allowed(owner.create_document(&scope.collection, &scope.create).await);

    assert!(!created.id().is_empty());
    assert_ne!(created.id(), TEST_USER_ID);
    assert_eq!(
        created.field("name").and_then(Value::as_str),
        Some("authenticated user name")
    );
}

/// ## Summary
/// An anonymous create is denied regardless of the payload it carries.
#[test_log::test(tokio::test)]
async fn anonymous_create_is_denied() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = users_scope().expect("users scope");
    let payload =
        DocumentPayload::new().field("name", Value::string("unauthenticated user name"));

    let anonymous = env
        .unauthenticated_context()
        .expect("Failed to build unauthenticated client");

    assert_denied(anonymous.create_document(&scope.collection, &payload).await);
}
