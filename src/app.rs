use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryDashApp {
    pub state: AppState,
}

impl SalaryDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SalaryDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu + title ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: controls, KPIs, charts, data ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    let msg = self
                        .state
                        .status_message
                        .clone()
                        .unwrap_or_else(|| "No dataset loaded.".to_string());
                    ui.heading(RichText::new(msg).color(Color32::RED));
                });
                return;
            }

            panels::controls(ui, &mut self.state);
            ui.add_space(8.0);

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &mut self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let (Some(dataset), Some(report)) = (state.dataset.clone(), state.report.as_ref()) else {
        return;
    };

    panels::kpi_cards(ui, &report.summary);
    ui.add_space(8.0);

    if report.is_empty() {
        ui.label(RichText::new("No rows match your filters.").color(Color32::YELLOW));
        return;
    }

    ui.columns(2, |cols: &mut [Ui]| {
        plot::salary_histogram(&mut cols[0], report);
        plot::experience_box_plot(&mut cols[1], report);
    });
    ui.add_space(8.0);
    ui.columns(2, |cols: &mut [Ui]| {
        plot::top_titles_chart(&mut cols[0], report);
        plot::remote_strip_plot(&mut cols[1], report, state.color_map.as_ref());
    });
    ui.add_space(8.0);

    let view = report.view(&dataset);
    let mut export_clicked = false;
    egui::CollapsingHeader::new(RichText::new("Data (filtered)").strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            table::filtered_table(ui, &view);
            ui.add_space(4.0);
            export_clicked = ui.button("Download filtered CSV").clicked();
        });

    if export_clicked {
        panels::save_file_dialog(state);
    }
}
