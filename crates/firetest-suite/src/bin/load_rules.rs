use firetest_core::config::load_config;
use firetest_suite::env::RulesTestEnv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

/// Deploys the configured security rules to the emulator and exits.
///
/// Useful for refreshing the emulator's ruleset after editing the rules
/// file, without running any test cases.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let env = RulesTestEnv::initialize_with(config).await?;

    tracing::info!(
        project = %env.settings().project.id,
        rules_file = %env.settings().project.rules_file,
        "Rules deployed; emulator ready for conformance runs"
    );

    Ok(())
}
