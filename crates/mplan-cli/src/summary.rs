use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use mplan_model::{Issue, Severity};
use mplan_validate::{AutoCreatedSummary, CampaignResolution, RuleDescriptor};
use mplan_cli::pipeline::ValidationRun;

pub fn print_summary(run: &ValidationRun) {
    println!("Source: {}", run.source);
    println!("Mode: {}", mode_label(run));
    if !run.unmapped_columns.is_empty() {
        println!("Unmapped columns: {}", run.unmapped_columns.join(", "));
    }

    let summary = &run.summary;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Rows with issues"),
        header_cell("Critical"),
        header_cell("Warnings"),
        header_cell("Suggestions"),
        header_cell("Import"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 5, CellAlignment::Center);
    table.add_row(vec![
        Cell::new(run.rows),
        Cell::new(summary.unique_row_count),
        count_cell(summary.critical, Color::Red),
        count_cell(summary.warning, Color::Yellow),
        count_cell(summary.suggestion, Color::Blue),
        import_cell(summary.can_import),
    ]);
    println!("{table}");

    print_issue_table(&run.issues);
    if let Some(created) = &run.auto_created {
        print_created(created);
    }
}

fn mode_label(run: &ValidationRun) -> &'static str {
    match run.mode {
        mplan_model::ValidationMode::Strict => "strict",
        mplan_model::ValidationMode::AutoCreate => "auto-create",
    }
}

fn print_issue_table(issues: &[Issue]) {
    if issues.is_empty() {
        return;
    }
    let mut ordered: Vec<&Issue> = issues.iter().collect();
    ordered.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then(a.row_index.cmp(&b.row_index))
    });
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Severity"),
        header_cell("Field"),
        header_cell("Rule"),
        header_cell("Value"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Center);
    for issue in ordered {
        table.add_row(vec![
            Cell::new(issue.row_index + 1),
            severity_cell(issue.severity),
            Cell::new(&issue.field),
            dim_or(&issue.rule_id),
            dim_or(&issue.current_value),
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn print_created(created: &AutoCreatedSummary) {
    if created.total_created == 0 {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Id"), header_cell("Campaign")]);
    apply_table_style(&mut table);
    for entry in &created.campaigns {
        table.add_row(vec![Cell::new(entry.id), Cell::new(&entry.name)]);
    }
    println!();
    println!("Campaigns created for review: {}", created.total_created);
    println!("{table}");
}

pub fn print_rules(rules: &[RuleDescriptor]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Rule"),
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Severity"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, rule) in rules.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&rule.id),
            Cell::new(&rule.field),
            Cell::new(rule.kind),
            severity_cell(rule.severity),
            Cell::new(&rule.message),
        ]);
    }
    println!("{table}");
}

pub fn print_resolutions(resolutions: &[CampaignResolution]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Campaign"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    for resolution in resolutions {
        let status = if resolution.created {
            Cell::new("created (pending review)").fg(Color::Green)
        } else {
            dim_cell("existing")
        };
        table.add_row(vec![
            Cell::new(resolution.id),
            Cell::new(&resolution.name),
            status,
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
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
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(180);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Fixed(32)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Critical => Cell::new("CRITICAL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
        Severity::Suggestion => Cell::new("HINT").fg(Color::Blue),
    }
}

fn import_cell(can_import: bool) -> Cell {
    if can_import {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        Cell::new("✗").fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_or(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
