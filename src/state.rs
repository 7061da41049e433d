use std::collections::BTreeMap;

use crate::chart::ChartSpec;
use crate::dashboard::DashContext;
use crate::dashboard::graph::{ControlId, ControlState, OutputId, ReactiveGraph};
use crate::data::filter::{PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Control events
// ---------------------------------------------------------------------------

/// A change of one control's value, emitted by the widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SiteSelected(SiteSelection),
    PayloadRangeChanged(PayloadRange),
}

impl ControlEvent {
    pub fn control(&self) -> ControlId {
        match self {
            ControlEvent::SiteSelected(_) => ControlId::SiteDropdown,
            ControlEvent::PayloadRangeChanged(_) => ControlId::PayloadSlider,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset and derived colour maps.
    pub context: DashContext,

    /// Current control values.
    pub controls: ControlState,

    /// Latest chart for each output placeholder.
    pub outputs: BTreeMap<OutputId, ChartSpec>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    graph: ReactiveGraph,
}

impl AppState {
    /// Ingest the startup dataset and render every output once.
    pub fn new(context: DashContext) -> Self {
        let controls = ControlState::initial(&context);
        let graph = ReactiveGraph::standard();
        let outputs = graph.evaluate_all(&context, &controls).into_iter().collect();
        Self {
            context,
            controls,
            outputs,
            status_message: None,
            graph,
        }
    }

    pub fn output(&self, id: OutputId) -> Option<&ChartSpec> {
        self.outputs.get(&id)
    }

    /// Apply one control change and recompute the outputs that depend on it.
    /// Returns the outputs that were recomputed; an event carrying the
    /// current value is a no-op.
    pub fn apply(&mut self, event: ControlEvent) -> Vec<OutputId> {
        let control = event.control();
        let changed = match event {
            ControlEvent::SiteSelected(site) => {
                if let SiteSelection::Site(name) = &site {
                    if !self.context.dataset().has_site(name) {
                        log::warn!("Unknown launch site '{name}'; charts will be empty");
                    }
                }
                let changed = self.controls.site != site;
                self.controls.site = site;
                changed
            }
            ControlEvent::PayloadRangeChanged(range) => {
                let changed = self.controls.payload != range;
                self.controls.payload = range;
                changed
            }
        };
        if !changed {
            return Vec::new();
        }

        let updates = self.graph.on_change(control, &self.context, &self.controls);
        let ids: Vec<OutputId> = updates.iter().map(|(id, _)| *id).collect();
        log::debug!("{control} changed; recomputed {ids:?}");
        self.outputs.extend(updates);
        ids
    }

    /// Apply a frame's worth of events in order.
    pub fn apply_all(&mut self, events: impl IntoIterator<Item = ControlEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Number of launches plotted on the scatter chart.
    pub fn visible_points(&self) -> usize {
        match self.output(OutputId::SuccessPayloadScatterChart) {
            Some(ChartSpec::Scatter(s)) => s.point_count(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::fixture;

    fn state() -> AppState {
        AppState::new(DashContext::new(fixture()))
    }

    #[test]
    fn both_outputs_rendered_at_startup() {
        let s = state();
        assert!(s.output(OutputId::SuccessPieChart).is_some());
        assert!(s.output(OutputId::SuccessPayloadScatterChart).is_some());
        assert_eq!(s.visible_points(), 10);
    }

    #[test]
    fn site_event_updates_both_charts() {
        let mut s = state();
        let ids = s.apply(ControlEvent::SiteSelected(SiteSelection::Site("KSC LC-39A".into())));
        assert_eq!(ids, OutputId::ALL.to_vec());
        assert_eq!(
            s.output(OutputId::SuccessPieChart).map(ChartSpec::title),
            Some("Proportion of successful and failed launches in KSC LC-39A")
        );
        assert_eq!(s.visible_points(), 3);
    }

    #[test]
    fn slider_event_leaves_pie_untouched() {
        let mut s = state();
        let pie_before = s.output(OutputId::SuccessPieChart).cloned();
        let ids = s.apply(ControlEvent::PayloadRangeChanged(PayloadRange::new(2000.0, 6000.0)));
        assert_eq!(ids, vec![OutputId::SuccessPayloadScatterChart]);
        assert_eq!(s.output(OutputId::SuccessPieChart).cloned(), pie_before);
        // 2490, 2490, 3170, 4428.5, 5300
        assert_eq!(s.visible_points(), 5);
    }

    #[test]
    fn unknown_site_empties_both_charts() {
        let mut s = state();
        let ids = s.apply(ControlEvent::SiteSelected(SiteSelection::Site("Boca Chica".into())));
        assert_eq!(ids, OutputId::ALL.to_vec());
        for id in OutputId::ALL {
            assert!(s.output(id).is_some_and(ChartSpec::is_empty), "{id} not empty");
        }
        assert_eq!(s.visible_points(), 0);

        // Moving the slider while an unknown site is selected keeps the scatter empty.
        s.apply(ControlEvent::PayloadRangeChanged(PayloadRange::new(0.0, 1000.0)));
        assert_eq!(s.visible_points(), 0);
    }

    #[test]
    fn repeated_value_is_a_no_op() {
        let mut s = state();
        assert!(s.apply(ControlEvent::SiteSelected(SiteSelection::All)).is_empty());
    }

    #[test]
    fn events_apply_in_order() {
        let mut s = state();
        s.apply_all([
            ControlEvent::SiteSelected(SiteSelection::Site("CCAFS LC-40".into())),
            ControlEvent::PayloadRangeChanged(PayloadRange::new(500.0, 1000.0)),
        ]);
        assert_eq!(s.controls.site, SiteSelection::Site("CCAFS LC-40".into()));
        // 525, 677
        assert_eq!(s.visible_points(), 2);
    }
}
