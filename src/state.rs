use std::sync::Arc;

use crate::binding::{ChartEvent, ControlChange, Session};
use crate::data::model::LaunchDataset;
use crate::data::query::{PayloadRange, SiteSelection};
use crate::view_model::DashboardLayout;

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// Current control values of one session. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub site: SiteSelection,
    pub payload_range: PayloadRange,
}

impl SelectionState {
    /// All sites, full payload range.
    pub fn defaults(dataset: &LaunchDataset) -> Self {
        Self {
            site: SiteSelection::All,
            payload_range: PayloadRange::full(dataset.payload_bounds()),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Controls, built once from the dataset.
    pub layout: DashboardLayout,

    /// Selection and rendered charts.
    pub session: Session,

    /// Text typed into the site dropdown's search box.
    pub site_search: String,

    /// Whether the launch table below the charts is shown.
    pub show_table: bool,
}

impl AppState {
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        let layout = DashboardLayout::new(&dataset);
        let (session, events) = Session::mount(dataset);
        log_events(&events);

        Self {
            layout,
            session,
            site_search: String::new(),
            show_table: true,
        }
    }

    /// Forward a control change to the session.
    pub fn dispatch(&mut self, change: ControlChange) {
        let events = self.session.apply(change);
        log_events(&events);
    }

    /// Select a site by its dropdown value.
    pub fn select_site(&mut self, value: &str) {
        let site = SiteSelection::from_value(value);
        if site != self.session.selection().site {
            self.site_search.clear();
            self.dispatch(ControlChange::Site(site));
        }
    }

    /// Set the payload range; ends are snapped to the slider steps.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        let range = self.layout.payload_slider.normalize(low, high);
        if range != self.session.selection().payload_range {
            self.dispatch(ControlChange::PayloadRange(range));
        }
    }

    /// Back to all sites and the full payload range.
    pub fn reset(&mut self) {
        let defaults = SelectionState::defaults(self.session.dataset());
        self.site_search.clear();
        if defaults.site != self.session.selection().site {
            self.dispatch(ControlChange::Site(defaults.site));
        }
        if defaults.payload_range != self.session.selection().payload_range {
            self.dispatch(ControlChange::PayloadRange(defaults.payload_range));
        }
    }
}

fn log_events(events: &[ChartEvent]) {
    for event in events {
        log::trace!("{:?} rendered at revision {}", event.chart, event.revision);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn state() -> AppState {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", false, 0.0, "v1.0"),
            LaunchRecord::new("KSC LC-39A", true, 2500.0, "FT"),
            LaunchRecord::new("VAFB SLC-4E", true, 9600.0, "B4"),
        ])
        .unwrap();
        AppState::new(Arc::new(ds))
    }

    #[test]
    fn unchanged_values_do_not_recompute() {
        let mut state = state();
        state.select_site("ALL");
        state.set_payload_range(0.0, 9600.0);
        assert_eq!(state.session.revision(), 0);
    }

    #[test]
    fn payload_range_is_snapped() {
        let mut state = state();
        state.set_payload_range(2400.0, 7100.0);
        assert_eq!(
            state.session.selection().payload_range,
            PayloadRange::new(2000.0, 7000.0)
        );
        assert_eq!(state.session.visible_points().len(), 1);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = state();
        state.select_site("KSC LC-39A");
        state.set_payload_range(1000.0, 3000.0);
        state.site_search.push_str("ksc");
        state.reset();

        assert_eq!(
            state.session.selection(),
            &SelectionState::defaults(state.session.dataset())
        );
        assert!(state.site_search.is_empty());
        assert_eq!(state.session.visible_points().len(), 3);
    }
}
