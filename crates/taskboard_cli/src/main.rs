//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskboard_core` linkage.
//! - Drive one controller round-trip against an in-memory slot store.
//!
//! Usage: `taskboard_cli [config.json]`

use log::{info, warn};
use std::process::ExitCode;
use taskboard_core::{
    init_logging_from_config, AppConfig, DisplayModel, MemorySlotStore, RenderTargetMissing,
    Surface, TaskController,
};

/// Prints each rendered list to stdout.
struct StdoutSurface;

impl Surface for StdoutSurface {
    fn replace_list(&mut self, model: &DisplayModel) -> Result<(), RenderTargetMissing> {
        if model.is_empty() {
            println!("  (no tasks)");
        }
        for item in model.items() {
            let mark = if item.completed { "x" } else { " " };
            println!(
                "  [{mark}] {} ({}) {}",
                item.title, item.created_date, item.description_preview
            );
        }
        Ok(())
    }
}

fn load_config() -> Result<AppConfig, String> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(AppConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .map_err(|err| format!("failed to read config `{path}`: {err}"))?;
    AppConfig::from_json_str(&text).map_err(|err| format!("invalid config `{path}`: {err}"))
}

fn main() -> ExitCode {
    println!("taskboard_core ping={}", taskboard_core::ping());
    println!("taskboard_core version={}", taskboard_core::core_version());

    let config = match load_config() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(message) = init_logging_from_config(&config) {
        eprintln!("logging disabled: {message}");
    }

    let store = match config.storage_quota_bytes {
        Some(quota) => MemorySlotStore::with_quota(quota),
        None => MemorySlotStore::new(),
    };
    let mut controller = TaskController::start(store, StdoutSurface, &config);

    let form = controller.form_mut();
    form.title = "Try taskboard".to_string();
    form.description = "Created by the smoke probe".to_string();
    let Some(task) = controller.submit() else {
        warn!("event=cli_smoke module=cli status=error stage=submit");
        eprintln!("submit failed");
        return ExitCode::FAILURE;
    };
    if controller.toggle(&task.id).is_none() {
        warn!("event=cli_smoke module=cli status=error stage=toggle");
        eprintln!("toggle failed");
        return ExitCode::FAILURE;
    }

    if let Some(notification) = controller.notification() {
        println!("notification[{}]={}", notification.kind.as_str(), notification.message);
    }
    println!("tasks={}", controller.repository().len());
    info!("event=cli_smoke module=cli status=ok");
    ExitCode::SUCCESS
}
