//! Reactive update engine.
//!
//! ```text
//!   control change ──► ReactiveGraph ──► rules ──► ChartSpec per output
//!                           ▲                ▲
//!                     ControlState      DashContext (immutable)
//! ```

pub mod graph;
pub mod rules;

use crate::color::ColorMap;
use crate::data::model::{LaunchDataset, Outcome};

/// Everything the update rules read: the loaded dataset and the colour maps
/// derived from it. Built once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct DashContext {
    dataset: LaunchDataset,
    site_colors: ColorMap,
    outcome_colors: ColorMap,
    booster_colors: ColorMap,
}

impl DashContext {
    pub fn new(dataset: LaunchDataset) -> Self {
        let site_colors = ColorMap::new(dataset.sites());
        let outcome_colors = ColorMap::new(
            [Outcome::Failure, Outcome::Success].map(|o| o.to_string()),
        );
        let booster_colors = ColorMap::new(dataset.booster_versions());
        DashContext {
            dataset,
            site_colors,
            outcome_colors,
            booster_colors,
        }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn site_colors(&self) -> &ColorMap {
        &self.site_colors
    }

    pub fn outcome_colors(&self) -> &ColorMap {
        &self.outcome_colors
    }

    pub fn booster_colors(&self) -> &ColorMap {
        &self.booster_colors
    }
}
