//! Table-driven execution of the per-scope access matrix.
//!
//! Every scope carries an [`AccessTable`] naming the decision the rules are
//! expected to produce for each (operation, actor) pair. [`verify`] runs one
//! operation for every actor against a freshly seeded fixture and checks the
//! observed outcomes against that table.

use firetest_client::client::FirestoreClient;
use firetest_client::error::ClientResult;
use firetest_wire::document::DocumentPayload;
use firetest_wire::path::{CollectionPath, DocumentPath};

use crate::check;
use crate::env::RulesTestEnv;
use crate::fixtures::seed_scope;

/// Document operation under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Read,
    Create,
    Update,
    Delete,
}

impl Op {
    pub const ALL: [Self; 4] = [Self::Read, Self::Create, Self::Update, Self::Delete];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Identity an operation runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    /// Authenticated as the scope's subject uid.
    Owner,
    /// No identity at all.
    Anonymous,
}

impl Actor {
    pub const ALL: [Self; 2] = [Self::Owner, Self::Anonymous];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Anonymous => "anonymous",
        }
    }
}

/// Expected rules outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Expected decisions for one operation, per actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorDecisions {
    pub owner: Decision,
    pub anonymous: Decision,
}

impl ActorDecisions {
    /// The same decision for every actor.
    #[must_use]
    pub const fn both(decision: Decision) -> Self {
        Self {
            owner: decision,
            anonymous: decision,
        }
    }

    /// Allowed for the owner, denied for everyone else.
    #[must_use]
    pub const fn owner_only() -> Self {
        Self {
            owner: Decision::Allow,
            anonymous: Decision::Deny,
        }
    }

    #[must_use]
    pub const fn decision_for(self, actor: Actor) -> Decision {
        match actor {
            Actor::Owner => self.owner,
            Actor::Anonymous => self.anonymous,
        }
    }
}

/// The full oracle for one scope: the expected decision per (op, actor).
#[derive(Debug, Clone, Copy)]
pub struct AccessTable {
    pub read: ActorDecisions,
    pub create: ActorDecisions,
    pub update: ActorDecisions,
    pub delete: ActorDecisions,
}

impl AccessTable {
    #[must_use]
    pub const fn expected(self, op: Op, actor: Actor) -> Decision {
        let row = match op {
            Op::Read => self.read,
            Op::Create => self.create,
            Op::Update => self.update,
            Op::Delete => self.delete,
        };
        row.decision_for(actor)
    }
}

/// A document scope under test: where its fixture lives, what payloads its
/// writes carry, and the outcomes the rules are expected to produce.
#[derive(Debug, Clone)]
pub struct ScopeSpec {
    pub name: &'static str,
    pub collection: CollectionPath,
    pub fixture_doc: DocumentPath,
    pub seed: DocumentPayload,
    pub create: DocumentPayload,
    pub update: DocumentPayload,
    pub subject_uid: &'static str,
    pub table: AccessTable,
}

/// ## Summary
/// Runs `op` for every actor against a freshly seeded fixture and checks
/// each outcome against the scope's table. The owner acts first, so a
/// shared-policy bug shows up on the strongest identity.
///
/// ## Errors
/// Returns an error when setup fails: seeding or client construction.
///
/// ## Panics
/// Panics when an observed outcome contradicts the table.
pub async fn verify(env: &RulesTestEnv, scope: &ScopeSpec, op: Op) -> anyhow::Result<()> {
    for actor in Actor::ALL {
        // Re-seed before each actor; an allowed write by the previous actor
        // must not change what the next one sees.
        seed_scope(env, scope).await?;

        let client = match actor {
            Actor::Owner => env.authenticated_context(scope.subject_uid)?,
            Actor::Anonymous => env.unauthenticated_context()?,
        };

        let outcome = perform(&client, scope, op).await;
        let expected = scope.table.expected(op, actor);

        if let Err(failure) = check::check_decision(expected, outcome) {
            panic!(
                "{} {} as {}: {failure}",
                scope.name,
                op.as_str(),
                actor.as_str()
            );
        }
    }

    Ok(())
}

/// Executes one operation with the scope's payloads, discarding any result
/// body.
async fn perform(client: &FirestoreClient, scope: &ScopeSpec, op: Op) -> ClientResult<()> {
    match op {
        Op::Read => client.get_document(&scope.fixture_doc).await.map(|_| ()),
        Op::Create => client
            .create_document(&scope.collection, &scope.create)
            .await
            .map(|_| ()),
        Op::Update => client
            .update_document(&scope.fixture_doc, &scope.update)
            .await
            .map(|_| ()),
        Op::Delete => client.delete_document(&scope.fixture_doc).await,
    }
}

// ============================================================================
// Tests
// ============================================================================
