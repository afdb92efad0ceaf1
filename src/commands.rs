use crate::{emit_success, OutputMode};
use gvkreg::config::load_config;
use gvkreg::ui::{self, Icons};
use gvkreg::watcher::ConfigWatcher;
use gvkreg::{Error, FrameworkRegistry, GroupVersionKind, SharedRegistry};
use owo_colors::OwoColorize;
use std::path::Path;
use std::sync::Arc;

/// Load the config file into a fresh registry, returning the rejected entry count.
fn load_registry(path: &Path) -> anyhow::Result<(FrameworkRegistry, usize)> {
    let Some(config) = load_config(Some(path))? else {
        anyhow::bail!("config not found at {}", path.display());
    };

    let (registry, outcome) = FrameworkRegistry::from_batch(config.external_frameworks);
    let rejected = match outcome {
        Ok(()) => 0,
        Err(Error::BatchPartialFailure { count }) => count,
        Err(e) => return Err(e.into()),
    };
    Ok((registry, rejected))
}

pub fn run_validate(output_mode: OutputMode, config: &Path) -> anyhow::Result<()> {
    let (registry, rejected) = load_registry(config)?;

    if output_mode.is_human() {
        ui::header(&format!("Validating {}", config.display()));
        ui::summary_row("Registered:", &registry.len().to_string());
        ui::summary_row("Rejected:", &rejected.to_string());
        if rejected == 0 {
            ui::success("Configuration is valid");
        }
    } else {
        let data = serde_json::json!({
            "config": config.display().to_string(),
            "registered": registry.len(),
            "rejected": rejected,
        });
        emit_success(output_mode, "validate", data)?;
    }

    if rejected > 0 {
        return Err(Error::BatchPartialFailure { count: rejected }.into());
    }
    Ok(())
}

pub fn run_list(output_mode: OutputMode, config: &Path) -> anyhow::Result<()> {
    let (registry, rejected) = load_registry(config)?;
    let adapters = registry.list_all();

    if output_mode.is_human() {
        ui::header(&format!("Adapters in {}", config.display()));
        if adapters.is_empty() {
            println!("{}", ui::dim("No adapters registered"));
        } else {
            println!("{}", ui::adapter_table(&adapters));
        }
        if rejected > 0 {
            ui::warn(&format!("{} entries rejected (see logs for details)", rejected));
        }
    } else {
        let mut gvks: Vec<&GroupVersionKind> = adapters.iter().map(|a| a.gvk()).collect();
        gvks.sort();
        let data = serde_json::json!({
            "adapters": gvks,
            "rejected": rejected,
        });
        emit_success(output_mode, "list", data)?;
    }
    Ok(())
}

pub fn run_lookup(output_mode: OutputMode, config: &Path, kind: &str) -> anyhow::Result<()> {
    let gvk = GroupVersionKind::parse_kind_arg(kind)?;
    let (registry, _) = load_registry(config)?;
    let adapter = registry.lookup(&gvk);

    if output_mode.is_human() {
        match adapter {
            Some(adapter) => ui::success(&format!("Adapter registered for {}", adapter.gvk())),
            None => println!(
                "{} {}",
                Icons::SEARCH,
                format!("No adapter registered for {}", gvk).style(ui::theme().dim.clone())
            ),
        }
    } else {
        let data = serde_json::json!({
            "gvk": gvk,
            "key": gvk.canonical(),
            "registered": adapter.is_some(),
        });
        emit_success(output_mode, "lookup", data)?;
    }
    Ok(())
}

pub fn run_watch(config: &Path) -> anyhow::Result<()> {
    let registry = Arc::new(SharedRegistry::new());
    let watcher = ConfigWatcher::new(config.to_path_buf(), Arc::clone(&registry));

    match watcher.reload() {
        Ok(()) => {}
        Err(Error::BatchPartialFailure { count }) => {
            ui::warn(&format!("{} entries rejected (see logs for details)", count))
        }
        Err(e) => ui::warn(&format!("Initial load failed: {}", e)),
    }
    ui::info("Adapters", &registry.snapshot().len().to_string());

    watcher.run()
}
