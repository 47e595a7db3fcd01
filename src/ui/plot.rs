use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::report::Report;

const CHART_HEIGHT: f32 = 280.0;

/// Tick label for category axes: the label whose index sits on the tick.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Deterministic horizontal jitter in `[-0.3, 0.3]` for the strip plot.
fn jitter(i: usize) -> f64 {
    let h = (i as u64).wrapping_mul(2654435761) % 1000;
    (h as f64 / 1000.0 - 0.5) * 0.6
}

// ---------------------------------------------------------------------------
// Salary histogram
// ---------------------------------------------------------------------------

pub fn salary_histogram(ui: &mut Ui, report: &Report) {
    ui.strong("Salary distribution");
    let bars: Vec<Bar> = report
        .histogram
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width().max(1.0))
                .name(format!("${:.0} – ${:.0}", bin.start, bin.end))
        })
        .collect();

    Plot::new("salary_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label("Salary (USD)")
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}

// ---------------------------------------------------------------------------
// Box plot by experience
// ---------------------------------------------------------------------------

pub fn experience_box_plot(ui: &mut Ui, report: &Report) {
    ui.strong("Salary by experience");
    let labels: Vec<String> = report.boxes.iter().map(|b| b.label.clone()).collect();

    let elems: Vec<BoxElem> = report
        .boxes
        .iter()
        .enumerate()
        .map(|(i, b)| {
            BoxElem::new(
                i as f64,
                BoxSpread::new(b.lower_whisker, b.q1, b.median, b.q3, b.upper_whisker),
            )
            .name(&b.label)
            .box_width(0.5)
        })
        .collect();

    let outliers: PlotPoints = report
        .boxes
        .iter()
        .enumerate()
        .flat_map(|(i, b)| b.outliers.iter().map(move |&v| [i as f64, v]))
        .collect();

    Plot::new("experience_box_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Experience")
        .y_axis_label("Salary (USD)")
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(elems).color(Color32::LIGHT_GREEN));
            plot_ui.points(
                Points::new(outliers)
                    .radius(2.5)
                    .color(Color32::LIGHT_RED)
                    .name("outliers"),
            );
        });
}

// ---------------------------------------------------------------------------
// Top job titles
// ---------------------------------------------------------------------------

pub fn top_titles_chart(ui: &mut Ui, report: &Report) {
    ui.strong("Top job titles");
    let titles = &report.summary.top_titles;
    let n = titles.len();

    // Most frequent title at the top of the axis.
    let mut labels = vec![String::new(); n];
    let bars: Vec<Bar> = titles
        .iter()
        .enumerate()
        .map(|(rank, t)| {
            let pos = n - 1 - rank;
            labels[pos] = t.job_title.clone();
            Bar::new(pos as f64, t.count as f64)
                .width(0.7)
                .name(&t.job_title)
        })
        .collect();

    Plot::new("top_titles_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Count")
        .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .horizontal()
                    .color(Color32::from_rgb(255, 170, 60)),
            );
        });
}

// ---------------------------------------------------------------------------
// Remote strip plot
// ---------------------------------------------------------------------------

pub fn remote_strip_plot(ui: &mut Ui, report: &Report, color_map: Option<&ColorMap>) {
    ui.strong("Salary by remote ratio");
    let strip = &report.strip;
    let categories = strip.categories.clone();

    Plot::new("remote_strip_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Remote ratio")
        .y_axis_label("Salary (USD)")
        .x_axis_formatter(move |mark, _range| category_label(&categories, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for series in &strip.series {
                let points: PlotPoints = strip
                    .points
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| &p.experience == series)
                    .filter_map(|(i, p)| {
                        let x = strip.category_index(&p.remote)? as f64 + jitter(i);
                        Some([x, p.salary_in_usd])
                    })
                    .collect();

                let color = color_map
                    .map(|cm| cm.color_for(series))
                    .unwrap_or(Color32::LIGHT_BLUE);

                plot_ui.points(Points::new(points).radius(2.0).color(color).name(series));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integer_ticks() {
        let labels = vec!["Entry".to_string(), "Mid".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Entry");
        assert_eq!(category_label(&labels, 1.0), "Mid");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn jitter_stays_within_band() {
        assert!((0..500).map(jitter).all(|j| (-0.3..=0.3).contains(&j)));
    }
}
