//! Fixture documents shared across the suite, and the document scopes
//! built from them.
//!
//! Three scopes are covered: the flat `users` collection, the flat `tweets`
//! collection, and the `tweets` subcollection nested under a user. Every
//! scope seeds one well-known fixture document so that read, update, and
//! delete cases have a stable target.

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use firetest_wire::document::DocumentPayload;
use firetest_wire::path::CollectionPath;
use firetest_wire::value::Value;

use crate::env::RulesTestEnv;
use crate::matrix::{AccessTable, ActorDecisions, Decision, ScopeSpec};

/// Subject uid every authenticated case acts as.
pub const TEST_USER_ID: &str = "Test-User";

/// Fixed id of the seeded flat tweet. Matching the subject uid is
/// deliberate: the flat scope must stay closed even when the ids line up.
pub const TEST_TWEET_ID: &str = "Test-User";

/// Fixed id of the seeded nested tweet.
pub const TEST_USER_TWEET_ID: &str = "Test-User-Tweet";

/// Creation instant recorded on the seeded flat tweet.
pub const TWEET_CREATED_AT: &str = "2022-11-11T15:30:00Z";

// ============================================================================
// Payloads
// ============================================================================

/// The profile document every `users` case starts from.
#[must_use]
pub fn initial_user() -> DocumentPayload {
    DocumentPayload::new().field("name", Value::string("initial user name"))
}

/// The flat tweet every `tweets` case starts from.
///
/// ## Errors
/// Returns an error if the fixture timestamp constant fails to parse.
pub fn initial_tweet() -> anyhow::Result<DocumentPayload> {
    Ok(DocumentPayload::new()
        .field("text", Value::string("initial tweet"))
        .field("userId", Value::string("test-user"))
        .field("createdAt", Value::timestamp(tweet_created_at()?)))
}

/// A flat tweet for create attempts, stamped with the current time.
#[must_use]
pub fn new_tweet() -> DocumentPayload {
    DocumentPayload::new()
        .field("text", Value::string("new tweet"))
        .field("userId", Value::string("test-user"))
        .field("createdAt", Value::timestamp(Utc::now()))
}

/// The nested tweet every `users/{uid}/tweets` case starts from.
#[must_use]
pub fn initial_user_tweet() -> DocumentPayload {
    DocumentPayload::new().field("text", Value::string("hello, this is my tweet."))
}

/// Parses [`TWEET_CREATED_AT`].
///
/// ## Errors
/// Returns an error if the constant is not valid RFC 3339.
pub fn tweet_created_at() -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(TWEET_CREATED_AT)
        .context("Fixture timestamp is not valid RFC 3339")?
        .with_timezone(&Utc))
}

// ============================================================================
// Scopes
// ============================================================================

/// ## Summary
/// The flat `users/{userId}` scope: public reads, authenticated creates,
/// owner-scoped updates, no deletes for anyone.
///
/// ## Errors
/// Returns an error if a fixture path fails to parse.
pub fn users_scope() -> anyhow::Result<ScopeSpec> {
    let collection = CollectionPath::parse("users")?;
    let fixture_doc = collection.doc(TEST_USER_ID)?;

    Ok(ScopeSpec {
        name: "users",
        collection,
        fixture_doc,
        seed: initial_user(),
        create: DocumentPayload::new().field("name", Value::string("authenticated user name")),
        update: DocumentPayload::new().field("name", Value::string("authenticated user name")),
        subject_uid: TEST_USER_ID,
        table: AccessTable {
            read: ActorDecisions::both(Decision::Allow),
            create: ActorDecisions::owner_only(),
            update: ActorDecisions::owner_only(),
            delete: ActorDecisions::both(Decision::Deny),
        },
    })
}

/// ## Summary
/// The flat `tweets/{tweetId}` scope: public reads, every write denied.
/// The stored `userId` field grants nothing.
///
/// ## Errors
/// Returns an error if a fixture path or the fixture timestamp fails to
/// parse.
pub fn tweets_scope() -> anyhow::Result<ScopeSpec> {
    let collection = CollectionPath::parse("tweets")?;
    let fixture_doc = collection.doc(TEST_TWEET_ID)?;

    Ok(ScopeSpec {
        name: "tweets",
        collection,
        fixture_doc,
        seed: initial_tweet()?,
        create: new_tweet(),
        update: DocumentPayload::new().field("text", Value::string("updated tweet")),
        subject_uid: TEST_USER_ID,
        table: AccessTable {
            read: ActorDecisions::both(Decision::Allow),
            create: ActorDecisions::both(Decision::Deny),
            update: ActorDecisions::both(Decision::Deny),
            delete: ActorDecisions::both(Decision::Deny),
        },
    })
}

/// ## Summary
/// The nested `users/{userId}/tweets/{tweetId}` scope: public reads, writes
/// allowed only when the subject matches the user in the parent path.
///
/// ## Errors
/// Returns an error if a fixture path fails to parse.
pub fn user_tweets_scope() -> anyhow::Result<ScopeSpec> {
    let collection = CollectionPath::parse("users")?
        .doc(TEST_USER_ID)?
        .collection("tweets")?;
    let fixture_doc = collection.doc(TEST_USER_TWEET_ID)?;

    Ok(ScopeSpec {
        name: "user tweets",
        collection,
        fixture_doc,
        seed: initial_user_tweet(),
        create: DocumentPayload::new()
            .field("text", Value::string("hello, this is my new tweet.")),
        update: DocumentPayload::new()
            .field("text", Value::string("hello, this is my updated tweet.")),
        subject_uid: TEST_USER_ID,
        table: AccessTable {
            read: ActorDecisions::both(Decision::Allow),
            create: ActorDecisions::owner_only(),
            update: ActorDecisions::owner_only(),
            delete: ActorDecisions::owner_only(),
        },
    })
}

// ============================================================================
// Seeding
// ============================================================================

/// ## Summary
/// Seeds the scope's fixture document through the bypass client.
///
/// ## Errors
/// Returns an error if the privileged write fails. A seeding failure is a
/// setup error, never a rules outcome.
pub async fn seed_scope(env: &RulesTestEnv, scope: &ScopeSpec) -> anyhow::Result<()> {
    let path = scope.fixture_doc.clone();
    let payload = scope.seed.clone();

    env.with_rules_disabled(|bypass| async move {
        bypass
            .set_document(&path, &payload)
            .await
            .with_context(|| format!("Failed to seed fixture '{path}'"))?;
        Ok(())
    })
    .await
}

// ============================================================================
// Tests
// ============================================================================
