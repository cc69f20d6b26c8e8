//! Reactive wiring between the controls and the two charts.
//!
//! A control change is an explicit [`ControlChange`] event. [`Session::apply`]
//! stores it in the session's [`SelectionState`], invalidates the charts,
//! re-runs both queries and hands back one [`ChartEvent`] per chart. The
//! whole cycle runs synchronously, so a caller never sees a stale chart.

use std::sync::Arc;

use crate::charts::{PieFigure, ScatterFigure, pie_figure, scatter_figure};
use crate::color::ColorMap;
use crate::data::model::LaunchDataset;
use crate::data::query::{
    CorrelationPoint, PayloadRange, SiteSelection, compute_filtered_correlation,
    compute_outcome_distribution,
};
use crate::state::SelectionState;

// ---------------------------------------------------------------------------
// Dependency graph
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    SiteDropdown,
    PayloadSlider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartId {
    SuccessPie,
    PayloadScatter,
}

pub const CHARTS: [ChartId; 2] = [ChartId::SuccessPie, ChartId::PayloadScatter];

/// Declared input edges of a chart.
pub fn inputs_of(chart: ChartId) -> &'static [Control] {
    match chart {
        ChartId::SuccessPie => &[Control::SiteDropdown],
        ChartId::PayloadScatter => &[Control::SiteDropdown, Control::PayloadSlider],
    }
}

/// Charts reading a control.
pub fn dependents_of(control: Control) -> Vec<ChartId> {
    CHARTS
        .into_iter()
        .filter(|chart| inputs_of(*chart).contains(&control))
        .collect()
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A user edit of one bound control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlChange {
    Site(SiteSelection),
    PayloadRange(PayloadRange),
}

impl ControlChange {
    pub fn control(&self) -> Control {
        match self {
            ControlChange::Site(_) => Control::SiteDropdown,
            ControlChange::PayloadRange(_) => Control::PayloadSlider,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStatus {
    Stale,
    Rendered,
}

/// A chart was re-rendered. The new figure is read from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartEvent {
    pub chart: ChartId,
    /// Session revision that produced the figure.
    pub revision: u64,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One mounted dashboard view: its selection and rendered charts.
pub struct Session {
    dataset: Arc<LaunchDataset>,
    colors: ColorMap,
    selection: SelectionState,
    revision: u64,
    pie: PieFigure,
    pie_status: ChartStatus,
    scatter: ScatterFigure,
    scatter_status: ChartStatus,
    points: Vec<CorrelationPoint>,
}

impl Session {
    /// Mount with the default selection and render both charts once.
    /// Returns the session and the initial chart events.
    pub fn mount(dataset: Arc<LaunchDataset>) -> (Self, Vec<ChartEvent>) {
        let colors = ColorMap::new(dataset.booster_categories());
        let selection = SelectionState::defaults(&dataset);

        let mut session = Session {
            dataset,
            colors,
            selection,
            revision: 0,
            pie: PieFigure::default(),
            pie_status: ChartStatus::Stale,
            scatter: ScatterFigure::default(),
            scatter_status: ChartStatus::Stale,
            points: Vec::new(),
        };
        let events = session.recompute();
        (session, events)
    }

    /// Apply a control change and recompute every chart.
    pub fn apply(&mut self, change: ControlChange) -> Vec<ChartEvent> {
        log::debug!(
            "{:?} changed ({:?}), dependents {:?}",
            change.control(),
            change,
            dependents_of(change.control())
        );

        match change {
            ControlChange::Site(site) => self.selection.site = site,
            ControlChange::PayloadRange(range) => self.selection.payload_range = range,
        }

        self.revision += 1;
        self.pie_status = ChartStatus::Stale;
        self.scatter_status = ChartStatus::Stale;
        self.recompute()
    }

    fn recompute(&mut self) -> Vec<ChartEvent> {
        let site = &self.selection.site;

        let distribution = compute_outcome_distribution(&self.dataset, site);
        self.pie = pie_figure(&distribution, site);
        self.pie_status = ChartStatus::Rendered;

        self.points =
            compute_filtered_correlation(&self.dataset, site, self.selection.payload_range);
        self.scatter = scatter_figure(&self.points, site, &self.colors);
        self.scatter_status = ChartStatus::Rendered;

        CHARTS
            .into_iter()
            .map(|chart| ChartEvent {
                chart,
                revision: self.revision,
            })
            .collect()
    }

    pub fn status(&self, chart: ChartId) -> ChartStatus {
        match chart {
            ChartId::SuccessPie => self.pie_status,
            ChartId::PayloadScatter => self.scatter_status,
        }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pie(&self) -> &PieFigure {
        &self.pie
    }

    pub fn scatter(&self) -> &ScatterFigure {
        &self.scatter
    }

    /// Launches currently plotted in the scatter chart.
    pub fn visible_points(&self) -> &[CorrelationPoint] {
        &self.points
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }
}
