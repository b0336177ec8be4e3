// CullTracker - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading (CLI flags override config values)
// 3. Logging initialisation (debug mode support)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::ui::...` etc.
pub use culltracker::app;
pub use culltracker::core;
pub use culltracker::platform;
pub use culltracker::ui;
pub use culltracker::util;

use clap::Parser;
use std::path::PathBuf;

/// CullTracker - Fishing tournament weigh-in tracker.
///
/// Records the weight of each tagged fish, tracks culls, and keeps a
/// running best-five total for the tournament.
#[derive(Parser, Debug)]
#[command(name = "CullTracker", version, about)]
struct Cli {
    /// Directory containing config.toml (defaults to the platform config dir).
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Default weight format for new tournaments: "decimal" or "lbs_oz".
    #[arg(short = 'u', long = "unit")]
    unit: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = platform::config::PlatformPaths::resolve();
    let config_dir = cli
        .config_dir
        .as_deref()
        .unwrap_or(&platform_paths.config_dir);

    // Config is read before logging so its level and file can take effect;
    // warnings are buffered and emitted once the subscriber is installed.
    let (mut config, mut warnings) = platform::config::load_config(config_dir);

    if let Some(ref raw) = cli.unit {
        match core::model::UnitMode::parse_strict(raw) {
            Some(unit) => config.default_unit = unit,
            None => warnings.push(format!(
                "--unit '{raw}' is not recognised (expected 'decimal' or 'lbs_oz'); \
                 using '{}'",
                config.default_unit
            )),
        }
    }

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %config_dir.display(),
        "CullTracker starting"
    );

    for warning in &warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    tracing::info!(
        unit = %config.default_unit,
        tags = config.tags.len(),
        "Ready to launch GUI"
    );

    let state = app::state::AppState::new(&config, platform_paths.export_dir.clone(), cli.debug);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([720.0, 820.0])
            .with_min_inner_size([480.0, 500.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(gui::CullTrackerApp::new(&cc.egui_ctx, state)))),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch CullTracker GUI: {e}");
        std::process::exit(1);
    }
}
