use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::export::EXPORT_FILE_NAME;
use crate::data::summary::{SummaryResult, TOP_N_OPTIONS};
use crate::state::{experience_options, remote_options, AppState};
use crate::ui::format;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / title bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
            if ui.button("Reload from disk").clicked() {
                state.force_reload();
                ui.close_menu();
            }
            let can_export = state.report.as_ref().is_some_and(|r| !r.is_empty());
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("Data Science Jobs — Mini Salary Dashboard");
        ui.separator();

        if let Some(ds) = &state.dataset {
            let years = ds.years();
            let span = match (years.first(), years.last()) {
                (Some(first), Some(last)) => format!("Years {first}–{last}"),
                _ => "No years".to_string(),
            };
            ui.label(format!("{} rows • {span}", format::count(ds.len())));
            if let Some(source) = state.cache.source() {
                ui.label(RichText::new(source.display().to_string()).weak());
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Controls row
// ---------------------------------------------------------------------------

fn selector(ui: &mut Ui, id: &str, label: &str, current: &mut String, options: &[String]) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(current.as_str())
            .show_ui(ui, |ui: &mut Ui| {
                for opt in options {
                    ui.selectable_value(current, opt.clone(), opt);
                }
            });
    });
}

/// Render the four selectors.  Recomputes the report when any changes.
pub fn controls(ui: &mut Ui, state: &mut AppState) {
    let before = state.selection.clone();
    let years = state.year_options();

    ui.horizontal(|ui: &mut Ui| {
        selector(ui, "year", "Year", &mut state.selection.year, &years);
        selector(
            ui,
            "experience",
            "Experience",
            &mut state.selection.experience,
            &experience_options(),
        );
        selector(
            ui,
            "remote",
            "Remote",
            &mut state.selection.remote,
            &remote_options(),
        );
        ui.vertical(|ui: &mut Ui| {
            ui.label("Top N titles");
            egui::ComboBox::from_id_salt("top_n")
                .selected_text(state.selection.top_n.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for n in TOP_N_OPTIONS {
                        ui.selectable_value(&mut state.selection.top_n, n, n.to_string());
                    }
                });
        });
    });

    if state.selection != before {
        log::debug!("Selection changed: {:?}", state.selection);
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// KPI cards
// ---------------------------------------------------------------------------

fn kpi(ui: &mut Ui, label: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(22.0).strong());
    });
}

pub fn kpi_cards(ui: &mut Ui, summary: &SummaryResult) {
    ui.columns(4, |cols: &mut [Ui]| {
        kpi(&mut cols[0], "Rows (filtered)", format::count(summary.row_count));
        kpi(
            &mut cols[1],
            "Median salary (USD)",
            format::money(summary.median_salary),
        );
        kpi(
            &mut cols[2],
            "Average salary (USD)",
            format::money(summary.mean_salary),
        );
        kpi(
            &mut cols[3],
            "Remote (100%) share",
            format::share(summary.remote_share),
        );
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download filtered CSV")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match state.export_to(&path) {
            Ok(rows) => {
                state.status_message = None;
                log::info!("Saved {rows} rows");
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
