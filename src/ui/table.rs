use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::export::normalized_cells;
use crate::data::filter::FilteredView;

const ROW_HEIGHT: f32 = 18.0;

/// Scrollable table of the filtered rows with every source column.
pub fn filtered_table(ui: &mut Ui, view: &FilteredView<'_>) {
    let dataset = view.dataset();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .min_scrolled_height(0.0)
        .max_scroll_height(320.0)
        .columns(Column::auto().at_least(60.0).clip(true), dataset.headers.len())
        .header(20.0, |mut header| {
            for name in &dataset.headers {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, view.len(), |mut row| {
                let Some(record) = view.get(row.index()) else {
                    return;
                };
                for cell in normalized_cells(dataset, record) {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
