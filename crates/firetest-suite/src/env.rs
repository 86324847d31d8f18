//! Bootstrap of the shared rules-test environment.

use std::time::Duration;

use anyhow::{Context as _, anyhow};
use firetest_client::admin::EmulatorAdmin;
use firetest_client::auth::Credential;
use firetest_client::client::FirestoreClient;
use firetest_client::error::ClientResult;
use firetest_core::config::{Settings, load_config};

/// A bootstrapped environment: loaded configuration plus a deployed ruleset.
///
/// Construction is fail-fast. If the rules file cannot be read or the
/// emulator rejects the deployment, no environment exists and no case runs
/// against unknown policy.
pub struct RulesTestEnv {
    settings: Settings,
    admin: EmulatorAdmin,
}

impl RulesTestEnv {
    /// ## Summary
    /// Loads configuration, reads the configured rules file, and deploys it
    /// to the emulator.
    ///
    /// ## Errors
    /// Returns an error if configuration loading, reading the rules file,
    /// or the deployment fails.
    pub async fn initialize() -> anyhow::Result<Self> {
        let settings = load_config()?;
        Self::initialize_with(settings).await
    }

    /// ## Summary
    /// Bootstraps against already-loaded settings.
    ///
    /// ## Errors
    /// Returns an error if reading the rules file or the deployment fails.
    pub async fn initialize_with(settings: Settings) -> anyhow::Result<Self> {
        let rules = read_rules_file(&settings.project.rules_file).await?;

        let admin = EmulatorAdmin::new(&settings)?;
        admin
            .load_rules(&rules)
            .await
            .context("Failed to deploy security rules to the emulator")?;

        tracing::info!(
            project = %settings.project.id,
            emulator = %settings.emulator.address(),
            "Security rules deployed"
        );

        Ok(Self { settings, admin })
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// ## Summary
    /// Builds a client authenticated as the end user `uid`.
    ///
    /// ## Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn authenticated_context(&self, uid: &str) -> ClientResult<FirestoreClient> {
        FirestoreClient::new(&self.settings, Credential::user(uid))
    }

    /// ## Summary
    /// Builds a client that carries no identity at all.
    ///
    /// ## Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn unauthenticated_context(&self) -> ClientResult<FirestoreClient> {
        FirestoreClient::new(&self.settings, Credential::Anonymous)
    }

    /// ## Summary
    /// Runs `action` with a client that bypasses rules evaluation.
    ///
    /// The bypass client never escapes the closure, which keeps privileged
    /// writes confined to fixture setup.
    ///
    /// ## Errors
    /// Returns an error if the client cannot be constructed or `action`
    /// fails.
    pub async fn with_rules_disabled<T, Fut>(
        &self,
        action: impl FnOnce(FirestoreClient) -> Fut,
    ) -> anyhow::Result<T>
    where
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let bypass = FirestoreClient::new(&self.settings, Credential::Owner)?;
        action(bypass).await
    }

    /// ## Summary
    /// Wipes every document in the project's database.
    ///
    /// ## Errors
    /// Returns an error if the emulator request fails.
    pub async fn clear_documents(&self) -> ClientResult<()> {
        self.admin.clear_documents().await
    }
}

/// ## Summary
/// Checks that something accepts TCP connections at `address` within
/// `timeout`.
///
/// ## Errors
/// Returns an error naming the address when the connection is refused or
/// times out.
pub async fn probe_emulator(address: &str, timeout: Duration) -> anyhow::Result<()> {
    match tokio::time::timeout(timeout, tokio::net::TcpStream::connect(address)).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(error)) => {
            Err(error).with_context(|| format!("No Firestore emulator reachable at {address}"))
        }
        Err(_) => Err(anyhow!(
            "No Firestore emulator reachable at {address}: connection attempt timed out after {timeout:?}"
        )),
    }
}

/// Reads the rules file at `path`, falling back to the workspace root when
/// the relative path does not resolve (`cargo test` runs member binaries
/// with the member directory as cwd).
async fn read_rules_file(path: &str) -> anyhow::Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(rules) => Ok(rules),
        Err(original) => {
            let fallback = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("../..")
                .join(path);
            if let Ok(rules) = tokio::fs::read_to_string(&fallback).await {
                return Ok(rules);
            }
            Err(anyhow::Error::new(original)
                .context(format!("Failed to read rules file at '{path}'")))
        }
    }
}
