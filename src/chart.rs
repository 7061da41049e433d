use serde::Serialize;

use crate::color::{BACKGROUND, Rgb};

// ---------------------------------------------------------------------------
// ChartSpec – declarative chart description returned by update rules
// ---------------------------------------------------------------------------

/// A renderer-independent chart description. Built fresh by every rule
/// invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie(PieChart),
    Scatter(ScatterChart),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie(p) => &p.title,
            ChartSpec::Scatter(s) => &s.title,
        }
    }

    /// True when the chart has no slices / no points.
    pub fn is_empty(&self) -> bool {
        match self {
            ChartSpec::Pie(p) => p.slices.is_empty(),
            ChartSpec::Scatter(s) => s.point_count() == 0,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
    pub background: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    pub color: Rgb,
}

impl PieChart {
    pub fn new(title: impl Into<String>, slices: Vec<PieSlice>) -> Self {
        PieChart {
            title: title.into(),
            slices,
            background: BACKGROUND,
        }
    }

    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Slice share of the whole, in `[0, 1]`. Zero for an empty pie.
    pub fn fraction(&self, slice: &PieSlice) -> f64 {
        match self.total() {
            0 => 0.0,
            total => slice.value as f64 / total as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// One series per colour key, in legend order.
    pub series: Vec<ScatterSeries>,
    pub background: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub color: Rgb,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub hover: String,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn points(&self) -> impl Iterator<Item = (&ScatterSeries, &ScatterPoint)> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(move |p| (s, p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pie_fractions_sum_to_one() {
        let pie = PieChart::new(
            "t",
            vec![
                PieSlice { label: "a".into(), value: 3, color: Rgb::new(1, 2, 3) },
                PieSlice { label: "b".into(), value: 1, color: Rgb::new(4, 5, 6) },
            ],
        );
        assert_eq!(pie.total(), 4);
        let sum: f64 = pie.slices.iter().map(|s| pie.fraction(s)).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_pie_has_zero_fraction() {
        let pie = PieChart::new("t", Vec::new());
        let ghost = PieSlice { label: "x".into(), value: 0, color: Rgb::new(0, 0, 0) };
        assert_eq!(pie.fraction(&ghost), 0.0);
        assert!(ChartSpec::Pie(pie).is_empty());
    }

    #[test]
    fn json_is_tagged_by_chart_type() {
        let spec = ChartSpec::Pie(PieChart::new("Launches", Vec::new()));
        let json: serde_json::Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();
        assert_eq!(json["type"], "pie");
        assert_eq!(json["title"], "Launches");
        assert_eq!(json["background"], "#faf0dc");
    }
}
