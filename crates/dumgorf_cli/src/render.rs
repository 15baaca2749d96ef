//! Plain-text rendering of core results.

use std::fmt::Write;

use dumgorf::dice::{Distribution, DistributionMethod, RollResult};
use dumgorf::loot::{LootTable, SimulationResult, STREAK_LENGTHS};
use dumgorf::registry::{ToolManifest, ToolStatus};
use dumgorf::sort_steps::SortStep;

const BAR_WIDTH: usize = 40;

fn bar(fraction: f64) -> String {
    let n = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(n)
}

fn status_label(status: ToolStatus) -> &'static str {
    match status {
        ToolStatus::Stable => "stable",
        ToolStatus::Beta => "beta",
        ToolStatus::ComingSoon => "coming-soon",
    }
}

pub fn tools<'a>(tools: impl Iterator<Item = &'a ToolManifest>) -> String {
    let mut out = String::new();
    for t in tools {
        let _ = writeln!(
            out,
            "{:>2}  {:<11} {:<16} {:<7} {:<11} {}{}",
            t.order,
            t.id,
            t.title,
            status_label(t.status),
            t.category.id(),
            t.route,
            if t.computes_locally() { "  *" } else { "" },
        );
    }
    out.push_str("\n* computed by this crate\n");
    out
}

pub fn distribution(notation: &str, dist: &Distribution) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{notation}");
    if dist.method() == DistributionMethod::NormalApprox {
        out.push_str("(normal approximation)\n");
    }
    let peak = dist.max_probability();
    for (value, p) in dist.iter() {
        let scaled = if peak > 0.0 { p / peak } else { 0.0 };
        let _ = writeln!(out, "{value:>6} {:>7.3}% {}", p * 100.0, bar(scaled));
    }
    let _ = writeln!(out, "mean {:.2}", dist.mean());
    out
}

pub fn roll(notation: &str, roll: &RollResult, modifier: i32) -> String {
    let rolls: Vec<String> = roll.rolls.iter().map(|r| r.to_string()).collect();
    let mut out = format!("{notation} -> {}\n", roll.total);
    let _ = write!(out, "Rolls: [{}]", rolls.join(", "));
    match modifier {
        0 => out.push('\n'),
        m if m > 0 => {
            let _ = writeln!(out, " +{m}");
        }
        m => {
            let _ = writeln!(out, " {m}");
        }
    }
    let _ = writeln!(
        out,
        "Range: {} - {} | Average: {:.1}",
        roll.min, roll.max, roll.average
    );
    out
}

pub fn histogram(seed_hash: i32, values: &[f64], buckets: &[u32]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Seed hash: {seed_hash}");
    let first: Vec<String> = values.iter().take(5).map(|v| format!("{v:.4}")).collect();
    let _ = writeln!(out, "First 5 values: {}", first.join(", "));
    let _ = writeln!(out, "Distribution ({} samples)", values.len());
    let peak = buckets.iter().copied().max().unwrap_or(0).max(1) as f64;
    let width = 1.0 / buckets.len().max(1) as f64;
    for (i, &count) in buckets.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:.2}-{:.2} {:>5} {}",
            i as f64 * width,
            (i + 1) as f64 * width,
            count,
            bar(count as f64 / peak)
        );
    }
    out
}

pub fn loot(label: &str, table: &LootTable, sim: &SimulationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{label}");
    for (idx, item) in table.items().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:<20} {:>6}w / {:>5.1}% / {}g",
            item.name,
            item.weight,
            table.probability(idx) * 100.0,
            item.value.unwrap_or(0.0)
        );
    }
    let _ = writeln!(
        out,
        "EV: {:.1}g | Std Dev: {:.1}g",
        table.expected_value(),
        table.std_dev()
    );

    let _ = writeln!(out, "\nSimulation ({} runs)", sim.runs);
    let peak = sim.counts.iter().copied().max().unwrap_or(0).max(1) as f64;
    for (idx, name) in sim.names.iter().enumerate() {
        let count = sim.counts[idx];
        let _ = writeln!(
            out,
            "  {:<20} {:>7} ({:>5.1}%) {}",
            name,
            count,
            sim.frequency(idx) * 100.0,
            bar(count as f64 / peak)
        );
    }
    let _ = writeln!(
        out,
        "Total: {}g | Avg per run: {:.1}g | Min: {}g | Max: {}g",
        sim.total_value,
        sim.average_value(),
        sim.min_value,
        sim.max_value
    );

    let rare = table.rarest();
    let _ = writeln!(
        out,
        "\nBad Streak: {} (drop rate: {:.1}%)",
        rare.name,
        table.probability(table.len() - 1) * 100.0
    );
    for n in STREAK_LENGTHS {
        let _ = writeln!(
            out,
            "  {n:>3} misses: {:.2}%",
            table.bad_streak_probability(n) * 100.0
        );
    }
    out
}

pub fn sort_step<T: std::fmt::Display>(index: usize, step: &SortStep<T>) -> String {
    let values: Vec<String> = step.array.iter().map(|v| v.to_string()).collect();
    format!(
        "{index:>4}  ({:>2},{:>2}) {}  [{}]",
        step.compared.0,
        step.compared.1,
        if step.swapped { "swap" } else { "    " },
        values.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dumgorf::dice::distribution as dice_distribution;
    use dumgorf::loot::LootPreset;
    use dumgorf::sort_steps::{sort_steps, SortAlgorithm};

    #[test]
    fn bars_scale_to_width() {
        assert_eq!(bar(1.0).len(), BAR_WIDTH);
        assert_eq!(bar(0.0), "");
        assert_eq!(bar(7.0).len(), BAR_WIDTH);
    }

    #[test]
    fn distribution_lists_every_outcome() {
        let text = distribution("2d6", &dice_distribution(2, 6, 0).unwrap());
        // header + 11 outcomes + mean
        assert_eq!(text.lines().count(), 13);
        assert!(text.contains("mean 7.00"));
        assert!(!text.contains("approximation"));
    }

    #[test]
    fn loot_report_mentions_rarest_item() {
        let table = LootPreset::BasicChest.table();
        let sim = table.simulate(100, Some(1));
        let text = loot("Basic Chest", &table, &sim);
        assert!(text.contains("Bad Streak: Legendary Scroll"));
        assert!(text.contains("EV: 117.5g"));
    }

    #[test]
    fn sort_step_line_marks_swaps() {
        let step = sort_steps(SortAlgorithm::Bubble, &[2, 1]).next().unwrap();
        assert_eq!(sort_step(1, &step), "   1  ( 0, 1) swap  [1, 2]");
    }
}
