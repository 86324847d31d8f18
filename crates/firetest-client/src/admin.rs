//! Emulator admin surface: rules deployment and store wipes.
//!
//! These endpoints sit outside the documents surface, take no identity, and
//! exist only on the emulator.

use firetest_core::config::Settings;
use firetest_core::constants::{
    DEFAULT_DATABASE_DOCUMENTS_COMPONENT, EMULATOR_ROUTE_PREFIX, PROJECTS_ROUTE_COMPONENT,
};
use serde::Serialize;

use crate::client::expect_success;
use crate::error::ClientResult;

/// Client for the emulator's project admin endpoints.
pub struct EmulatorAdmin {
    http: reqwest::Client,
    project_base: String,
}

#[derive(Debug, Serialize)]
struct RulesUpdate<'a> {
    rules: Ruleset<'a>,
}

#[derive(Debug, Serialize)]
struct Ruleset<'a> {
    files: Vec<RulesFile<'a>>,
}

#[derive(Debug, Serialize)]
struct RulesFile<'a> {
    name: &'a str,
    content: &'a str,
}

impl EmulatorAdmin {
    /// ## Summary
    /// Builds an admin client for the configured emulator and project.
    ///
    /// ## Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(settings: &Settings) -> ClientResult<Self> {
        let http = reqwest::Client::builder().build()?;
        let project_base = format!(
            "{}{EMULATOR_ROUTE_PREFIX}/{PROJECTS_ROUTE_COMPONENT}/{}",
            settings.emulator.origin(),
            settings.project.id,
        );

        Ok(Self { http, project_base })
    }

    /// ## Summary
    /// Replaces the project's active security rules with `content`.
    ///
    /// ## Errors
    /// Returns an error if the emulator rejects the ruleset (compile errors
    /// surface here) or the request fails.
    pub async fn load_rules(&self, content: &str) -> ClientResult<()> {
        let url = format!("{}:securityRules", self.project_base);
        let body = RulesUpdate {
            rules: Ruleset {
                files: vec![RulesFile {
                    name: "firestore.rules",
                    content,
                }],
            },
        };

        tracing::debug!(url = %url, "Uploading security rules");
        let response = self.http.put(&url).json(&body).send().await?;
        expect_success(response).await
    }

    /// ## Summary
    /// Deletes every document in the project's default database.
    ///
    /// ## Errors
    /// Returns an error if the request fails or the emulator refuses.
    pub async fn clear_documents(&self) -> ClientResult<()> {
        let url = format!("{}/{DEFAULT_DATABASE_DOCUMENTS_COMPONENT}", self.project_base);

        tracing::debug!(url = %url, "Clearing documents");
        let response = self.http.delete(&url).send().await?;
        expect_success(response).await
    }
}
