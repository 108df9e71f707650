//! # Describo Dashboard Shell
//!
//! Boots the dashboard state layer outside a browser: loads configuration,
//! wires the state holders, restores the session, loads the stores and
//! reports what a UI would render.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load `DashboardConfig` (defaults, `dashboard.toml`, environment)
//! 3. Build the state holders (mock backend, file session storage)
//! 4. `init()`: restore session and load stores concurrently
//! 5. Resolve each requested path through the route guard
//!
//! ## Environment
//! - `DESCRIBO_CONFIG`: explicit path of `dashboard.toml`
//! - `RUST_LOG`: log filter (default `info,describo=debug`)

use std::path::PathBuf;

use anyhow::Context;
use describo_core::routing::Navigation;
use describo_state::{Dashboard, DashboardConfig, InitReport};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// What one boot of the shell produced.
#[derive(Debug)]
pub struct BootSummary {
    pub report: InitReport,
    pub navigations: Vec<(String, Navigation)>,
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,describo=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Loads configuration from `DESCRIBO_CONFIG` or the platform config dir.
pub fn load_config() -> anyhow::Result<DashboardConfig> {
    let path = std::env::var("DESCRIBO_CONFIG").ok().map(PathBuf::from);
    let config = DashboardConfig::load(path).context("Failed to load dashboard config")?;
    let base_url = config.api.base_url()?;
    info!(
        base_url = %base_url,
        auth_ms = config.latency.auth_ms,
        "Configuration loaded"
    );
    Ok(config)
}

/// Boots a dashboard and resolves `paths` against the restored session.
pub async fn boot(dashboard: &Dashboard, paths: &[String]) -> BootSummary {
    let report = dashboard.init().await;

    let navigations = paths
        .iter()
        .map(|path| {
            let navigation = dashboard.navigate(path);
            info!(path = %path, target = %navigation.target(), "Route resolved");
            (path.clone(), navigation)
        })
        .collect();

    BootSummary {
        report,
        navigations,
    }
}

/// Runs the shell: config, wiring, boot, and a JSON snapshot on stdout.
pub async fn run(paths: Vec<String>) -> anyhow::Result<()> {
    let config = load_config()?;
    let dashboard =
        Dashboard::from_config(&config).context("Failed to open session storage")?;

    let summary = boot(&dashboard, &paths).await;

    let snapshot = serde_json::json!({
        "session": dashboard.session.snapshot(),
        "stores": dashboard.stores.snapshot(),
        "navigations": summary
            .navigations
            .iter()
            .map(|(path, navigation)| serde_json::json!({ "path": path, "navigation": navigation }))
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    info!(
        session_restored = summary.report.session_restored,
        stores_loaded = summary.report.stores_loaded,
        "Dashboard ready"
    );
    Ok(())
}
