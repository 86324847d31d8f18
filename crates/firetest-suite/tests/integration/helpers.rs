#![allow(clippy::unused_async, clippy::expect_used, dead_code)]
//! Shared harness for the conformance cases.
//!
//! Provides:
//! - One-time environment bootstrap (configuration plus rules deployment)
//! - An emulator reachability probe that fails the run up front when
//!   nothing is listening
//! - A case lock, since all cases share one emulator project and its
//!   fixture documents
//!
//! ## Emulator Requirement
//! The cases need a running Firestore emulator. By default an unreachable
//! emulator aborts every case with the connection error before any fixture
//! is touched; set `FIRETEST_ALLOW_SKIP=1` to skip the cases instead on
//! machines that never run one.
//!
//! ## Case Isolation
//! Every case re-seeds the fixtures it touches, so ordering does not
//! matter, but two cases mutating the same document at once would. The
//! lock serializes cases within this binary.

use std::time::Duration;

use firetest_core::config::load_config;
use firetest_suite::env::{RulesTestEnv, probe_emulator};
use tokio::sync::{Mutex, MutexGuard, OnceCell};

// Re-export what every case file needs.
pub use firetest_suite::check::{assert_allowed, assert_denied};
pub use firetest_suite::fixtures::{
    self, TEST_USER_ID, seed_scope, tweets_scope, user_tweets_scope, users_scope,
};
pub use firetest_suite::matrix::{self, Op};

/// Opt-in escape hatch: set to `1` to skip the cases instead of failing
/// them when no emulator is reachable.
const ALLOW_SKIP_VAR: &str = "FIRETEST_ALLOW_SKIP";

/// Shared environment, bootstrapped once per binary. `None` means no
/// emulator was reachable and skipping was explicitly allowed.
static TEST_ENV: OnceCell<Option<RulesTestEnv>> = OnceCell::const_new();

/// Serializes cases within this binary.
static CASE_LOCK: Mutex<()> = Mutex::const_new(());

/// How long the reachability probe waits before declaring the emulator
/// absent.
const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// ## Summary
/// Returns the shared environment, bootstrapping it on first use.
///
/// An unreachable emulator is fatal unless [`ALLOW_SKIP_VAR`] opts into
/// skipping, and failures past the probe are fatal unconditionally: a
/// configuration or rules-deployment problem must fail the run, never
/// shrink it.
///
/// ## Panics
/// Panics with the connection error when no emulator answers at the
/// configured address, and on any bootstrap failure.
pub async fn test_env() -> Option<&'static RulesTestEnv> {
    TEST_ENV
        .get_or_init(|| async {
            let settings = load_config().expect("Failed to load configuration");
            let address = settings.emulator.address();

            if let Err(error) = probe_emulator(&address, PROBE_TIMEOUT).await {
                assert!(
                    skip_allowed(),
                    "{error:#}. Start one (`firebase emulators:start --only firestore`) \
                     or set {ALLOW_SKIP_VAR}=1 to skip the conformance cases."
                );
                eprintln!("[RulesTestEnv] Skipping conformance cases - {error:#}");
                return None;
            }

            let env = RulesTestEnv::initialize_with(settings)
                .await
                .expect("Failed to bootstrap the rules test environment");
            Some(env)
        })
        .await
        .as_ref()
}

/// Takes the case lock; hold the guard for the whole case body.
pub async fn case_lock() -> MutexGuard<'static, ()> {
    CASE_LOCK.lock().await
}

fn skip_allowed() -> bool {
    std::env::var(ALLOW_SKIP_VAR).is_ok_and(|value| value == "1")
}
