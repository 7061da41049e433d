use std::collections::BTreeMap;

use crate::chart::{ChartSpec, PieChart, PieSlice, ScatterChart, ScatterPoint, ScatterSeries};
use crate::color::BACKGROUND;
use crate::data::columns;
use crate::data::filter::{PayloadRange, SiteSelection, at_site, in_payload_range};
use crate::data::model::{LaunchRecord, Outcome};

use super::DashContext;

pub const PIE_ALL_SITES_TITLE: &str = "Launch success rate by Launch Site";
pub const SCATTER_TITLE: &str = "Correlation between Payload mass and Success";

// ---------------------------------------------------------------------------
// Pie chart: success counts
// ---------------------------------------------------------------------------

/// Success summary for the selected site.
///
/// * `All` → one slice per site holding at least one success, valued by that
///   site's success count, in site order.
/// * A site → one slice per outcome class present at the site (failure
///   before success), valued by launch count.
///
/// A site absent from the dataset yields a pie with no slices.
pub fn pie_chart(ctx: &DashContext, site: &SiteSelection) -> ChartSpec {
    let dataset = ctx.dataset();
    let pie = match site {
        SiteSelection::All => {
            let mut successes: BTreeMap<&str, u64> = BTreeMap::new();
            for rec in dataset.records().iter().filter(|r| r.outcome.is_success()) {
                *successes.entry(rec.site.as_str()).or_default() += 1;
            }
            let slices = dataset
                .sites()
                .iter()
                .filter_map(|s| {
                    successes.get(s.as_str()).map(|&value| PieSlice {
                        label: s.clone(),
                        value,
                        color: ctx.site_colors().color_for(s),
                    })
                })
                .collect();
            PieChart::new(PIE_ALL_SITES_TITLE, slices)
        }
        SiteSelection::Site(name) => {
            let mut by_class: BTreeMap<Outcome, u64> = BTreeMap::new();
            for rec in at_site(dataset, site) {
                *by_class.entry(rec.outcome).or_default() += 1;
            }
            let slices = by_class
                .into_iter()
                .map(|(outcome, value)| {
                    let label = outcome.to_string();
                    PieSlice {
                        color: ctx.outcome_colors().color_for(&label),
                        label,
                        value,
                    }
                })
                .collect();
            PieChart::new(
                format!("Proportion of successful and failed launches in {name}"),
                slices,
            )
        }
    };
    ChartSpec::Pie(pie)
}

// ---------------------------------------------------------------------------
// Scatter chart: payload vs. outcome
// ---------------------------------------------------------------------------

/// One point per launch at the selected site(s) whose payload lies in
/// `range` (inclusive), grouped into one series per booster version.
pub fn scatter_chart(ctx: &DashContext, site: &SiteSelection, range: &PayloadRange) -> ChartSpec {
    let mut by_booster: BTreeMap<&str, Vec<ScatterPoint>> = BTreeMap::new();
    for rec in in_payload_range(ctx.dataset(), site, range) {
        by_booster
            .entry(rec.booster_version.as_str())
            .or_default()
            .push(point(rec));
    }

    let series = by_booster
        .into_iter()
        .map(|(booster, points)| ScatterSeries {
            name: booster.to_string(),
            color: ctx.booster_colors().color_for(booster),
            points,
        })
        .collect();

    let title = match site {
        SiteSelection::All => SCATTER_TITLE.to_string(),
        SiteSelection::Site(name) => format!("{SCATTER_TITLE} in {name}"),
    };

    ChartSpec::Scatter(ScatterChart {
        title,
        x_label: columns::PAYLOAD_MASS.to_string(),
        y_label: columns::CLASS.to_string(),
        series,
        background: BACKGROUND,
    })
}

fn point(rec: &LaunchRecord) -> ScatterPoint {
    let hover = match rec.flight_number {
        Some(n) => format!(
            "{} (flight {n})\n{} kg · {}",
            rec.booster_version, rec.payload_mass, rec.outcome
        ),
        None => format!("{}\n{} kg · {}", rec.booster_version, rec.payload_mass, rec.outcome),
    };
    ScatterPoint {
        x: rec.payload_mass,
        y: f64::from(rec.outcome.class()),
        hover,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::fixture;

    fn ctx() -> DashContext {
        DashContext::new(fixture())
    }

    fn pie(spec: ChartSpec) -> PieChart {
        match spec {
            ChartSpec::Pie(p) => p,
            other => panic!("expected pie, got {other:?}"),
        }
    }

    fn scatter(spec: ChartSpec) -> ScatterChart {
        match spec {
            ChartSpec::Scatter(s) => s,
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[test]
    fn site_pie_sums_to_site_launch_count() {
        let ctx = ctx();
        for site in ctx.dataset().sites() {
            let sel = SiteSelection::Site(site.clone());
            let expected = at_site(ctx.dataset(), &sel).count() as u64;
            assert_eq!(pie(pie_chart(&ctx, &sel)).total(), expected, "site {site}");
        }
    }

    #[test]
    fn all_sites_pie_has_one_slice_per_successful_site() {
        let ctx = ctx();
        let p = pie(pie_chart(&ctx, &SiteSelection::All));
        assert_eq!(p.title, PIE_ALL_SITES_TITLE);
        // CCAFS SLC-40 has no success in the fixture.
        let labels: Vec<&str> = p.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        let values: Vec<u64> = p.slices.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![2, 1, 2]);
    }

    #[test]
    fn ccafs_pie_has_failure_and_success_slices() {
        let ctx = ctx();
        let p = pie(pie_chart(&ctx, &SiteSelection::Site("CCAFS LC-40".into())));
        assert_eq!(p.slices.len(), 2);
        assert_eq!(p.slices[0].label, "Failure");
        assert_eq!(p.slices[0].value, 2);
        assert_eq!(p.slices[1].label, "Success");
        assert_eq!(p.slices[1].value, 2);
        assert_eq!(p.total(), 4);
        assert_eq!(
            p.title,
            "Proportion of successful and failed launches in CCAFS LC-40"
        );
    }

    #[test]
    fn unknown_site_gives_empty_charts() {
        let ctx = ctx();
        let sel = SiteSelection::Site("Boca Chica".into());
        assert!(pie_chart(&ctx, &sel).is_empty());
        assert!(scatter_chart(&ctx, &sel, &PayloadRange::new(0.0, 10000.0)).is_empty());
    }

    #[test]
    fn scatter_counts_match_filter() {
        let ctx = ctx();
        let ranges = [(0.0, 10000.0), (500.0, 2490.0), (2490.0, 2490.0), (6000.0, 9000.0)];
        let mut sites = vec![SiteSelection::All];
        sites.extend(ctx.dataset().sites().iter().cloned().map(SiteSelection::Site));
        for (lo, hi) in ranges {
            let range = PayloadRange::new(lo, hi);
            for sel in &sites {
                let expected = ctx
                    .dataset()
                    .records()
                    .iter()
                    .filter(|r| lo <= r.payload_mass && r.payload_mass <= hi && sel.matches(r))
                    .count();
                let s = scatter(scatter_chart(&ctx, sel, &range));
                assert_eq!(s.point_count(), expected, "{sel} [{lo}, {hi}]");
            }
        }
    }

    #[test]
    fn full_range_returns_every_row_coloured_by_booster() {
        let ctx = ctx();
        let s = scatter(scatter_chart(
            &ctx,
            &SiteSelection::All,
            &PayloadRange::new(0.0, 10000.0),
        ));
        assert_eq!(s.title, SCATTER_TITLE);
        assert_eq!(s.point_count(), ctx.dataset().len());
        assert_eq!(s.series.len(), ctx.dataset().booster_versions().len());
        for series in &s.series {
            assert_eq!(series.color, ctx.booster_colors().color_for(&series.name));
        }
        let names: Vec<&str> = s.series.iter().map(|x| x.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn degenerate_range_keeps_only_exact_payload() {
        let ctx = ctx();
        let min = ctx.dataset().min_payload();
        let s = scatter(scatter_chart(
            &ctx,
            &SiteSelection::All,
            &PayloadRange::new(min, min),
        ));
        assert!(s.point_count() > 0);
        assert!(s.points().all(|(_, p)| p.x == min));
    }

    #[test]
    fn scatter_points_encode_outcome_class() {
        let ctx = ctx();
        let sel = SiteSelection::Site("VAFB SLC-4E".into());
        let s = scatter(scatter_chart(&ctx, &sel, &PayloadRange::new(0.0, 10000.0)));
        assert_eq!(s.title, format!("{SCATTER_TITLE} in VAFB SLC-4E"));
        let mut ys: Vec<(f64, f64)> = s.points().map(|(_, p)| (p.x, p.y)).collect();
        ys.sort_by(|a, b| a.0.total_cmp(&b.0));
        assert_eq!(ys, vec![(500.0, 0.0), (9600.0, 1.0)]);
    }

    #[test]
    fn rules_are_idempotent() {
        let ctx = ctx();
        let sel = SiteSelection::Site("KSC LC-39A".into());
        let range = PayloadRange::new(1000.0, 6000.0);
        assert_eq!(pie_chart(&ctx, &sel), pie_chart(&ctx, &sel));
        assert_eq!(
            scatter_chart(&ctx, &sel, &range),
            scatter_chart(&ctx, &sel, &range)
        );
    }
}
