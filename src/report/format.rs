//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the splitting/evaluation code stays clean and testable
//! - output changes are localized

use crate::domain::{DataSource, RiskCategory};
use crate::fit::BaselineResult;
use crate::split::SplitIndices;

use super::{ExperimentReport, SweepReport};

fn format_source(source: &DataSource) -> String {
    match source {
        DataSource::Csv { path, target_column } => format!("{} (target `{target_column}`)", path.display()),
        DataSource::Synthetic { rows, seed } => format!("synthetic (rows={rows}, seed={seed})"),
    }
}

/// One line per partition with counts and shares.
pub fn format_split_summary(indices: &SplitIndices, random_state: u64) -> String {
    let n = indices.total().max(1) as f64;
    let mut out = String::new();
    out.push_str(&format!("Split (random_state={random_state}, n={}):\n", indices.total()));
    for (name, len) in [
        ("train", indices.train.len()),
        ("validate", indices.validate.len()),
        ("test", indices.test.len()),
    ] {
        out.push_str(&format!("  {name:<9} {len:>7}  ({:>5.1}%)\n", 100.0 * len as f64 / n));
    }
    out
}

/// Risk category per input value, as a two-column table.
pub fn format_bucket_table(values: &[f64], categories: &[RiskCategory]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>10}  {:>4}  {}\n", "los_days", "risk", "label"));
    for (v, c) in values.iter().zip(categories) {
        out.push_str(&format!("{v:>10.2}  {:>4}  {}\n", c.code(), c.label()));
    }
    out
}

fn format_results_table(results: &[BaselineResult], best: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  {:<10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "estimator", "train", "validate", "refit", "test", "risk_f1"
    ));
    for r in results {
        let chosen = if Some(r.estimator.as_str()) == best { "*" } else { " " };
        let risk = r
            .test_risk_agreement
            .map(|v| format!("{v:.4}"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{chosen} {:<10} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10}\n",
            r.estimator, r.train_score, r.validate_score, r.refit_score, r.test_score, risk
        ));
    }
    out
}

/// Format the full experiment summary.
pub fn format_experiment(report: &ExperimentReport) -> String {
    let mut out = String::new();

    out.push_str("=== los - length-of-stay baselines ===\n");
    out.push_str(&format!("Data: {}\n", format_source(&report.config.source)));
    out.push_str(&format!(
        "Rows: n={} (skipped {}) | task={:?} | metric={}\n",
        report.rows,
        report.rows_skipped,
        report.config.task,
        report.metric.display_name()
    ));
    out.push_str(&format!(
        "Split: train={} validate={} test={} (random_state={})\n",
        report.sizes.train, report.sizes.validate, report.sizes.test, report.config.random_state
    ));

    out.push_str("Risk categories:");
    for (c, n) in RiskCategory::ALL.iter().zip(report.category_counts) {
        out.push_str(&format!(" {}={n}", c.code()));
    }
    out.push('\n');

    out.push_str("\nBaselines:\n");
    out.push_str(&format_results_table(&report.results, report.best.as_deref()));
    out
}

/// Format a seed sweep: sizes and test score per seed.
pub fn format_sweep(report: &SweepReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== los sweep (n={}, metric={}) ===\n",
        report.rows,
        report.metric.display_name()
    ));
    for o in &report.outcomes {
        let scores: Vec<String> = o
            .results
            .iter()
            .map(|r| format!("{}={:.4}", r.estimator, r.test_score))
            .collect();
        out.push_str(&format!(
            "seed {:>6}: {}/{}/{}  {}\n",
            o.random_state,
            o.train_rows,
            o.validate_rows,
            o.test_rows,
            scores.join(" ")
        ));
    }
    let verdict = if report.sizes_are_seed_invariant() { "identical" } else { "VARY" };
    out.push_str(&format!("Partition sizes across seeds: {verdict}\n"));
    out
}
