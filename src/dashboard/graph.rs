use std::fmt;

use crate::chart::ChartSpec;
use crate::data::filter::{PayloadRange, SiteSelection};

use super::DashContext;
use super::rules;

// ---------------------------------------------------------------------------
// Named inputs and outputs
// ---------------------------------------------------------------------------

/// Interactive controls whose value changes trigger recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlId {
    SiteDropdown,
    PayloadSlider,
}

impl ControlId {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlId::SiteDropdown => "site-dropdown",
            ControlId::PayloadSlider => "payload-slider",
        }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chart placeholders filled by the update rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputId {
    SuccessPieChart,
    SuccessPayloadScatterChart,
}

impl OutputId {
    pub const ALL: [OutputId; 2] = [OutputId::SuccessPieChart, OutputId::SuccessPayloadScatterChart];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputId::SuccessPieChart => "success-pie-chart",
            OutputId::SuccessPayloadScatterChart => "success-payload-scatter-chart",
        }
    }
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Control values
// ---------------------------------------------------------------------------

/// Current value of every control.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl ControlState {
    /// Startup values: every site, the dataset's full payload span.
    pub fn initial(ctx: &DashContext) -> Self {
        ControlState {
            site: SiteSelection::All,
            payload: PayloadRange::of_dataset(ctx.dataset()),
        }
    }
}

// ---------------------------------------------------------------------------
// Update rules and the dependency table
// ---------------------------------------------------------------------------

pub type RuleFn = fn(&DashContext, &ControlState) -> ChartSpec;

/// A pure function from the controls it reads to one output.
#[derive(Clone)]
pub struct UpdateRule {
    pub output: OutputId,
    pub inputs: &'static [ControlId],
    eval: RuleFn,
}

impl UpdateRule {
    pub fn new(output: OutputId, inputs: &'static [ControlId], eval: RuleFn) -> Self {
        UpdateRule { output, inputs, eval }
    }

    pub fn depends_on(&self, control: ControlId) -> bool {
        self.inputs.contains(&control)
    }

    pub fn evaluate(&self, ctx: &DashContext, state: &ControlState) -> ChartSpec {
        (self.eval)(ctx, state)
    }
}

impl fmt::Debug for UpdateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateRule")
            .field("output", &self.output)
            .field("inputs", &self.inputs)
            .finish()
    }
}

/// Explicit mapping from controls to the rules that consume them.
#[derive(Debug, Clone)]
pub struct ReactiveGraph {
    rules: Vec<UpdateRule>,
}

impl Default for ReactiveGraph {
    fn default() -> Self {
        Self::standard()
    }
}

impl ReactiveGraph {
    /// The dashboard's two rules:
    ///
    /// | output                          | inputs                            |
    /// |---------------------------------|-----------------------------------|
    /// | `success-pie-chart`             | `site-dropdown`                   |
    /// | `success-payload-scatter-chart` | `site-dropdown`, `payload-slider` |
    pub fn standard() -> Self {
        ReactiveGraph {
            rules: vec![
                UpdateRule::new(
                    OutputId::SuccessPieChart,
                    &[ControlId::SiteDropdown],
                    |ctx, state| rules::pie_chart(ctx, &state.site),
                ),
                UpdateRule::new(
                    OutputId::SuccessPayloadScatterChart,
                    &[ControlId::SiteDropdown, ControlId::PayloadSlider],
                    |ctx, state| rules::scatter_chart(ctx, &state.site, &state.payload),
                ),
            ],
        }
    }

    /// Rules that read `control`, in declaration order.
    pub fn rules_for(&self, control: ControlId) -> impl Iterator<Item = &UpdateRule> {
        self.rules.iter().filter(move |r| r.depends_on(control))
    }

    /// Re-run only the rules depending on `control`.
    pub fn on_change(
        &self,
        control: ControlId,
        ctx: &DashContext,
        state: &ControlState,
    ) -> Vec<(OutputId, ChartSpec)> {
        self.rules_for(control)
            .map(|r| (r.output, r.evaluate(ctx, state)))
            .collect()
    }

    /// Run every rule, as for the first render.
    pub fn evaluate_all(&self, ctx: &DashContext, state: &ControlState) -> Vec<(OutputId, ChartSpec)> {
        self.rules
            .iter()
            .map(|r| (r.output, r.evaluate(ctx, state)))
            .collect()
    }
}
