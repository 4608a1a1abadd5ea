//! Plain-text rendering of dashboard views for the terminal.

use adcost_core::AdvertisingRecord;
use adcost_generator::CostSummary;
use adcost_reporting::aggregate::GroupedMeans;
use adcost_reporting::{DashboardSnapshot, PivotTable};

const PLACEHOLDER: &str = "n/a";

/// Format an optional scalar, using a placeholder for undefined values.
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => PLACEHOLDER.to_string(),
    }
}

fn heading(title: &str) {
    println!();
    println!("== {title} ==");
}

pub fn print_preview(records: &[AdvertisingRecord]) {
    if records.is_empty() {
        println!("  (no data)");
        return;
    }
    println!(
        "  {:<10}  {:<14}  {:<22}  {:<26}  {:>4}  {:>6}  {:>10}  {:>10}",
        "date", "channel", "program_type", "time_slot", "sec", "rating", "cost_rub", "cpt_rub"
    );
    for r in records {
        println!(
            "  {:<10}  {:<14}  {:<22}  {:<26}  {:>4}  {:>6.2}  {:>10}  {:>10.2}",
            r.date.to_string(),
            r.channel,
            r.program_type,
            r.time_slot,
            r.duration_sec,
            r.rating,
            r.cost_rub,
            r.cpt_rub
        );
    }
}

pub fn print_cost_summary(summary: &CostSummary) {
    heading("cost_rub distribution");
    println!("  count  {}", summary.count);
    for (label, value) in [
        ("mean", summary.mean),
        ("std", summary.std),
        ("min", summary.min),
        ("25%", summary.p25),
        ("50%", summary.median),
        ("75%", summary.p75),
        ("max", summary.max),
    ] {
        println!("  {label:<5}  {}", fmt_opt(value, 2));
    }
}

fn print_means(title: &str, means: &GroupedMeans, decimals: usize) {
    heading(title);
    if means.is_empty() {
        println!("  (no data)");
        return;
    }
    for entry in &means.entries {
        println!(
            "  {:<28}  {:>14}  ({} rows)",
            entry.key.to_string(),
            fmt_opt(Some(entry.mean), decimals),
            entry.count
        );
    }
}

fn print_pivot(title: &str, pivot: &PivotTable) {
    heading(title);
    if pivot.is_empty() {
        println!("  (no data)");
        return;
    }
    print!("  {:<22}", format!("{} \\ {}", pivot.row_dimension, pivot.column_dimension));
    for column in &pivot.column_keys {
        print!("  {:>26}", column.to_string());
    }
    println!();
    for (row, cells) in pivot.row_keys.iter().zip(pivot.matrix()) {
        print!("  {:<22}", row.to_string());
        for cell in cells {
            print!("  {:>26}", fmt_opt(cell, 0));
        }
        println!();
    }
}

pub fn print_snapshot(snapshot: &DashboardSnapshot) {
    println!(
        "Snapshot {} at {}",
        snapshot.snapshot_id,
        snapshot.generated_at.to_rfc3339()
    );

    heading("Base table (first rows)");
    print_preview(&snapshot.base_preview);

    heading("Filtered table (first rows)");
    print_preview(&snapshot.filtered_preview);
    println!(
        "  Records after filtering: {} of {}",
        snapshot.filtered_records, snapshot.total_records
    );

    heading("Headline");
    let h = &snapshot.headline;
    println!("  Mean cost    {} ₽", fmt_opt(h.mean_cost_rub, 0));
    println!("  Mean rating  {}", fmt_opt(h.mean_rating, 2));
    println!("  Mean CPT     {} ₽", fmt_opt(h.mean_cpt_rub, 2));
    println!("  Contracts    {}", h.records);

    print_pivot("Pivot: mean cost_rub", &snapshot.pivot);

    heading("Cost statistics by channel");
    if snapshot.channel_stats.is_empty() {
        println!("  (no data)");
    }
    for s in &snapshot.channel_stats {
        println!(
            "  {:<14}  mean {:>12.2}  median {:>12.2}  min {:>9}  max {:>9}  rating {:>5.2}  cpt {:>9.2}",
            s.channel,
            s.mean_cost_rub,
            s.median_cost_rub,
            s.min_cost_rub,
            s.max_cost_rub,
            s.mean_rating,
            s.mean_cpt_rub
        );
    }

    print_means("Mean cost by time slot", &snapshot.cost_by_time_slot, 0);
    print_means("Mean cost by channel", &snapshot.cost_by_channel, 0);

    heading("Rating vs cost sample");
    println!("  {} points", snapshot.scatter.len());

    heading("Seasonality: mean cost by month");
    if snapshot.cost_by_month.is_empty() {
        println!("  (no data)");
    }
    for point in &snapshot.cost_by_month {
        println!("  {:<4}  {:>14.0}", point.label, point.mean_cost_rub);
    }

    print_pivot("Heatmap: channel × time slot", &snapshot.heatmap);
    print_means("Mean cost by duration", &snapshot.cost_by_duration, 0);
    print_means("Mean CPT by advertiser type", &snapshot.cpt_by_advertiser, 2);
}
