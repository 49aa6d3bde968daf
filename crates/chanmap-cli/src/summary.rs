use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use chanmap_map::RuleLibrary;
use chanmap_map::rules::Refinement;
use chanmap_model::{ConfidenceBand, Match, MatchSummary};
use chanmap_report::{format_confidence, ranked};

use chanmap_cli::commands::{ExportOutcome, MatchOutcome};

pub fn print_match_summary(outcome: &MatchOutcome, top: usize) {
    let summary = &outcome.summary;
    println!("Match table: {}", outcome.output.display());
    if let Some(path) = &outcome.json {
        println!("JSON: {}", path.display());
    }
    println!(
        "Metric: {}{}",
        outcome.options.metric.label(),
        if outcome.options.generic_fallback {
            ""
        } else {
            " (rules only)"
        }
    );

    let mut totals = Table::new();
    totals.set_header(vec![
        header_cell("Schema"),
        header_cell("Channels"),
        header_cell("Matched"),
        header_cell("Coverage"),
    ]);
    apply_summary_table_style(&mut totals);
    align_column(&mut totals, 1, CellAlignment::Right);
    align_column(&mut totals, 2, CellAlignment::Right);
    align_column(&mut totals, 3, CellAlignment::Right);
    totals.add_row(vec![
        Cell::new("Source"),
        Cell::new(summary.source_count),
        Cell::new(summary.unique_sources),
        coverage_cell(summary.source_coverage()),
    ]);
    totals.add_row(vec![
        Cell::new("Target"),
        Cell::new(summary.target_count),
        Cell::new(summary.unique_targets),
        coverage_cell(summary.target_coverage()),
    ]);
    totals.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(summary.total_matches).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{totals}");

    if summary.total_matches == 0 {
        println!("No matches found.");
        return;
    }
    println!();
    println!("{}", distribution_table(summary));
    println!();
    println!("Top {} matches:", top.min(summary.total_matches));
    println!("{}", top_matches_table(outcome.matches.as_slice(), top));
}

fn distribution_table(summary: &MatchSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Confidence"),
        header_cell("Count"),
        header_cell("Match Type"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let bands: Vec<(ConfidenceBand, usize)> = ConfidenceBand::DESCENDING
        .into_iter()
        .map(|band| (band, summary.band_count(band)))
        .collect();
    let types = summary.types_by_count();
    for row in 0..bands.len().max(types.len()) {
        let (band_label, band_count) = match bands.get(row) {
            Some((band, count)) => (Cell::new(band.label()), count_cell(*count)),
            None => (Cell::new(""), Cell::new("")),
        };
        let (type_label, type_count) = match types.get(row) {
            Some((match_type, count)) => (type_cell(match_type.label()), count_cell(*count)),
            None => (Cell::new(""), Cell::new("")),
        };
        table.add_row(vec![band_label, band_count, type_label, type_count]);
    }
    table
}

fn top_matches_table(matches: &[Match], top: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Target"),
        header_cell("Conf"),
        header_cell("Type"),
        header_cell("Notes"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for m in ranked(matches).into_iter().take(top) {
        table.add_row(vec![
            Cell::new(&m.source_name),
            Cell::new(&m.target_name).fg(Color::Blue),
            confidence_cell(m.confidence),
            type_cell(m.match_type.label()),
            Cell::new(&m.note),
        ]);
    }
    table
}

pub fn print_export_summary(outcome: &ExportOutcome) {
    let (resolution, summary, output) = match outcome {
        ExportOutcome::Exported {
            resolution,
            summary,
            output,
        } => (resolution, summary, output),
        ExportOutcome::Empty { threshold, message } => {
            println!("Threshold: {threshold}");
            println!("{message}; nothing exported.");
            return;
        }
    };
    println!("Export: {}", output.display());
    if let Some(path) = &summary.skipped_path {
        println!("Skipped matches: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Export"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Threshold"),
        Cell::new(format_confidence(resolution.threshold)),
    ]);
    table.add_row(vec![Cell::new("Unique matches kept"), Cell::new(summary.kept)]);
    table.add_row(vec![
        Cell::new("Duplicate targets skipped"),
        warn_count_cell(summary.skipped),
    ]);
    table.add_row(vec![
        Cell::new("Columns written"),
        Cell::new(summary.columns_written),
    ]);
    table.add_row(vec![Cell::new("Data rows"), Cell::new(summary.data_rows)]);
    table.add_row(vec![
        Cell::new("Targets missing from data"),
        warn_count_cell(summary.missing_targets.len()),
    ]);
    println!("{table}");

    if !resolution.skipped.is_empty() {
        let mut skipped = Table::new();
        skipped.set_header(vec![
            header_cell("Skipped Source"),
            header_cell("Target"),
            header_cell("Conf"),
            header_cell("Reason"),
        ]);
        apply_table_style(&mut skipped);
        align_column(&mut skipped, 2, CellAlignment::Right);
        for entry in &resolution.skipped {
            skipped.add_row(vec![
                Cell::new(&entry.matched.source_name).fg(Color::DarkGrey),
                Cell::new(&entry.matched.target_name),
                confidence_cell(entry.matched.confidence),
                Cell::new(entry.reason).fg(Color::Yellow),
            ]);
        }
        println!();
        println!("{skipped}");
    }
}

pub fn print_rules(library: &RuleLibrary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Family"),
        header_cell("Source Patterns"),
        header_cell("Targets"),
        header_cell("Refinement"),
    ]);
    apply_table_style(&mut table);
    for rule in library.rules() {
        let targets = rule
            .targets
            .listing()
            .into_iter()
            .map(|(target, confidence)| format!("{target} ({})", format_confidence(confidence)))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            type_cell(rule.family.match_type().label()),
            Cell::new(rule.sources.join(" | ")),
            Cell::new(targets),
            refinement_cell(rule.refinement),
        ]);
    }
    println!("{table}");
    println!("{} rules", library.rules().len());
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn type_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Blue)
}

fn coverage_cell(percent: f64) -> Cell {
    Cell::new(format!("{percent:.1}%"))
}

fn confidence_cell(confidence: f32) -> Cell {
    let cell = Cell::new(format!("{confidence:.2}"));
    match ConfidenceBand::of(confidence) {
        ConfidenceBand::Perfect => cell.fg(Color::Green).add_attribute(Attribute::Bold),
        ConfidenceBand::VeryHigh | ConfidenceBand::High => cell.fg(Color::Green),
        ConfidenceBand::Moderate => cell.fg(Color::Yellow),
        ConfidenceBand::Low => cell.fg(Color::DarkGrey),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn warn_count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn refinement_cell(refinement: Refinement) -> Cell {
    match refinement {
        Refinement::None => dim_cell("-"),
        Refinement::EulerFrame => Cell::new("Euler / body-fixed"),
        Refinement::PeakSensor => Cell::new("peak sensor"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
