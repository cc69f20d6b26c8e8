use std::f64::consts::TAU;

use eframe::egui::Color32;

use crate::color::{ColorMap, FAILURE_COLOR, SUCCESS_COLOR, generate_palette};
use crate::data::query::{
    CorrelationPoint, FAILURE_LABEL, OutcomeDistribution, SUCCESS_LABEL, SiteSelection,
};

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of the whole pie, in `0.0..=1.0`.
    pub fraction: f64,
    pub color: Color32,
}

/// Drawable pie chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PieFigure {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieFigure {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Turn an outcome distribution into pie slices.
pub fn pie_figure(distribution: &OutcomeDistribution, selection: &SiteSelection) -> PieFigure {
    let title = match selection {
        SiteSelection::All => "Total Successful Launches by Site".to_string(),
        SiteSelection::Site(site) => format!("Launch Outcomes for {site}"),
    };

    let total: usize = distribution.values().sum();
    let palette = generate_palette(distribution.len());

    let slices = distribution
        .iter()
        .zip(palette)
        .filter(|((_, count), _)| **count > 0)
        .map(|((label, &count), site_color)| {
            let color = match (selection, label.as_str()) {
                (SiteSelection::Site(_), SUCCESS_LABEL) => SUCCESS_COLOR,
                (SiteSelection::Site(_), FAILURE_LABEL) => FAILURE_COLOR,
                _ => site_color,
            };
            PieSlice {
                label: label.clone(),
                count,
                fraction: count as f64 / total as f64,
                color,
            }
        })
        .collect();

    PieFigure { title, slices }
}

/// Split a pie wedge into convex fan pieces, each at most `max_step` radians
/// wide. Points are on the unit circle, counter-clockwise from `start`, with
/// the centre first.
pub fn wedge_polygons(start: f64, sweep: f64, max_step: f64) -> Vec<Vec<[f64; 2]>> {
    if sweep <= 0.0 || max_step <= 0.0 {
        return Vec::new();
    }
    let pieces = (sweep / max_step).ceil().max(1.0) as usize;
    let step = sweep / pieces as f64;
    // Arc resolution inside each piece.
    let arc_points = ((step / TAU) * 64.0).ceil().max(2.0) as usize;

    (0..pieces)
        .map(|p| {
            let a0 = start + step * p as f64;
            let mut poly = Vec::with_capacity(arc_points + 2);
            poly.push([0.0, 0.0]);
            for k in 0..=arc_points {
                let a = a0 + step * k as f64 / arc_points as f64;
                poly.push([a.cos(), a.sin()]);
            }
            poly
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub category: String,
    pub color: Color32,
    /// `[payload_kg, class]` pairs, class being 0.0 or 1.0.
    pub points: Vec<[f64; 2]>,
}

/// Drawable payload/outcome scatter chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterFigure {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<ScatterSeries>,
}

impl ScatterFigure {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Group correlation points into one series per booster category, in order
/// of first appearance.
pub fn scatter_figure(
    points: &[CorrelationPoint],
    selection: &SiteSelection,
    colors: &ColorMap,
) -> ScatterFigure {
    let title = match selection {
        SiteSelection::All => "Payload vs. Outcome for All Sites".to_string(),
        SiteSelection::Site(site) => format!("Payload vs. Outcome for {site}"),
    };

    let mut series: Vec<ScatterSeries> = Vec::new();
    for p in points {
        let xy = [p.payload_mass_kg, if p.success { 1.0 } else { 0.0 }];
        match series.iter_mut().find(|s| s.category == p.booster_category) {
            Some(s) => s.points.push(xy),
            None => series.push(ScatterSeries {
                category: p.booster_category.clone(),
                color: colors.color_for(&p.booster_category),
                points: vec![xy],
            }),
        }
    }

    ScatterFigure {
        title,
        x_label: "Payload Mass (kg)",
        y_label: "class",
        series,
    }
}
