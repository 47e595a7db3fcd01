mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::SalaryDashApp;
use clap::Parser;
use config::{Cli, Command, FilterArgs, GuiArgs};
use data::cache::DatasetCache;
use data::export::export_csv;
use data::report::render;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let cache = DatasetCache::new(cli.candidates());
    let command = cli
        .command
        .unwrap_or_else(|| Command::Gui(GuiArgs::default()));

    match command {
        Command::Gui(args) => run_gui(cache, args),
        Command::Summary(filters) => run_summary(cache, &filters),
        Command::Export { filters, out } => run_export(cache, &filters, out),
    }
}

fn run_gui(cache: DatasetCache, args: GuiArgs) -> anyhow::Result<()> {
    let mut state = AppState::new(cache, args.top_n);
    state.reload();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "DS Jobs – Mini Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(SalaryDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard exited with an error: {e}"))
}

fn run_summary(mut cache: DatasetCache, filters: &FilterArgs) -> anyhow::Result<()> {
    let dataset = cache.get()?;
    let report = render(&dataset, &filters.criteria(), filters.top_n);
    if report.is_empty() {
        log::warn!("No rows match your filters.");
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_export(mut cache: DatasetCache, filters: &FilterArgs, out: PathBuf) -> anyhow::Result<()> {
    let dataset = cache.get()?;
    let report = render(&dataset, &filters.criteria(), filters.top_n);
    let view = report.view(&dataset);
    let bytes = export_csv(&view)?;
    std::fs::write(&out, bytes).with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {} rows to {}", view.len(), out.display());
    Ok(())
}
