//! Conformance cases for the nested `users/{userId}/tweets/{tweetId}` scope.
//!
//! Reads are public. Creates, updates, and deletes are allowed only when
//! the subject's uid matches the user segment of the parent path.

use firetest_wire::value::Value;

use super::helpers::*;

// ============================================================================
// Access Matrix
// ============================================================================

/// ## Summary
/// Anyone can read a nested tweet, with or without an identity.
#[test_log::test(tokio::test)]
async fn read_is_public() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = user_tweets_scope().expect("user tweets scope");
    matrix::verify(env, &scope, Op::Read)
        .await
        .expect("Failed to run user tweets read cases");
}

/// ## Summary
/// Only the user in the parent path may create tweets under it.
#[test_log::test(tokio::test)]
async fn create_is_owner_scoped() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = user_tweets_scope().expect("user tweets scope");
    matrix::verify(env, &scope, Op::Create)
        .await
        .expect("Failed to run user tweets create cases");
}

/// ## Summary
/// Only the user in the parent path may update tweets under it.
#[test_log::test(tokio::test)]
async fn update_is_owner_scoped() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = user_tweets_scope().expect("user tweets scope");
    matrix::verify(env, &scope, Op::Update)
        .await
        .expect("Failed to run user tweets update cases");
}

/// ## Summary
/// Only the user in the parent path may delete tweets under it.
#[test_log::test(tokio::test)]
async fn delete_is_owner_scoped() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = user_tweets_scope().expect("user tweets scope");
    matrix::verify(env, &scope, Op::Delete)
        .await
        .expect("Failed to run user tweets delete cases");
}

// ============================================================================
// Concrete Scenarios
// ============================================================================

/// ## Summary
/// The subject deletes their own nested tweet, and it is gone afterwards.
#[test_log::test(tokio::test)]
async fn owner_delete_removes_the_tweet() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = user_tweets_scope().expect("user tweets scope");
    seed_scope(env, &scope)
        .await
        .expect("Failed to seed user tweets fixture");

    let owner = env
        .authenticated_context(TEST_USER_ID)
        .expect("Failed to build authenticated client");

    assert_allowed(owner.delete_document(&scope.fixture_doc).await);

    // The follow-up read fails because the document is gone, not because
    // reading was denied.
    let missing = owner.get_document(&scope.fixture_doc).await;
    assert!(
        matches!(missing, Err(ref e) if !e.is_permission_denied()),
        "expected a missing document, got {missing:?}"
    );
}

/// ## Summary
/// An anonymous delete is denied and the tweet stays readable.
#[test_log::test(tokio::test)]
async fn anonymous_delete_leaves_the_tweet_in_place() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = user_tweets_scope().expect("user tweets scope");
    seed_scope(env, &scope)
        .await
        .expect("Failed to seed user tweets fixture");

    let anonymous = env
        .unauthenticated_context()
        .expect("Failed to build unauthenticated client");

    assert_denied(anonymous.delete_document(&scope.fixture_doc).await);

    let tweet = assert_allowed(anonymous.get_document(&scope.fixture_doc).await);
    assert_eq!(
        tweet.field("text").and_then(Value::as_str),
        Some("hello, this is my tweet.")
    );
}

/// ## Summary
/// A subject update rewrites the tweet text in place.
#[test_log::test(tokio::test)]
async fn owner_update_rewrites_the_text() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = user_tweets_scope().expect("user tweets scope");
    seed_scope(env, &scope)
        .await
        .expect("Failed to seed user tweets fixture");

    let owner = env
        .authenticated_context(TEST_USER_ID)
        .expect("Failed to build authenticated client");

    let updated = assert_allowed(owner.update_document(&scope.fixture_doc, &scope.update).await);
    assert_eq!(
        updated.field("text").and_then(Value::as_str),
        Some("hello, this is my updated tweet.")
    );

    let tweet = assert_allowed(owner.get_document(&scope.fixture_doc).await);
    assert_eq!(
        tweet.field("text").and_then(Value::as_str),
        Some("hello, this is my updated tweet.")
    );
}

/// ## Summary
/// Outcomes survive a full wipe and re-seed of the emulator's store.
#[test_log::test(tokio::test)]
async fn outcomes_are_stable_across_clear_and_reseed() {
    let Some(env) = test_env().await else { return };
    let _guard = case_lock().await;

    let scope = user_tweets_scope().expect("user tweets scope");

    matrix::verify(env, &scope, Op::Delete)
        .await
        .expect("Failed to run the first delete pass");

    env.clear_documents()
        .await
        .expect("Failed to clear documents");

    // Same table, same outcomes: the decisions depend on the ruleset, not
    // on leftover state.
    matrix::verify(env, &scope, Op::Delete)
        .await
        .expect("Failed to run the delete pass after the wipe");
    matrix::verify(env, &scope, Op::Read)
        .await
        .expect("Failed to run the read pass after the wipe");
}
