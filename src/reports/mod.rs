use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use payforge::config::BinaryConfig;
use payforge::engine::{CalculationResult, Scheme};
use payforge::error::PfResult;
use payforge::plan::{PlanIssue, RankTable, Severity};
use strum::IntoEnumIterator;

/// Rounding happens here and nowhere else.
pub fn money(v: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, v)
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_result(r: &CalculationResult, dp: usize) {
    // Binary
    let b = &r.binary;
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Binary").add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);
    table.add_row(vec![Cell::new("Weaker leg"), Cell::new(money(b.weaker_leg, dp))]);
    table.add_row(vec![Cell::new("Potential cycles"), Cell::new(b.potential_cycles)]);
    table.add_row(vec![Cell::new("Max allowed cycles"), Cell::new(b.max_allowed_cycles)]);
    table.add_row(vec![Cell::new("Paid cycles"), Cell::new(b.actual_cycles)]);
    table.add_row(vec![Cell::new("Cycle earnings"), Cell::new(money(b.cycle_earnings, dp))]);
    table.add_row(vec![
        Cell::new("Sponsor bonus"),
        Cell::new(money(b.sponsor_bonus_earnings, dp)),
    ]);
    table.add_row(vec![
        Cell::new("Carry (L / R)"),
        Cell::new(format!("{} / {}", money(b.left_carry, dp), money(b.right_carry, dp))),
    ]);
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(money(b.total, dp)).fg(Color::Cyan),
    ]);
    align_right(&mut table, 1..=1);
    println!("\n{}", table);

    // Network + leadership share the per-level layout
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Level").add_attribute(Attribute::Bold),
        Cell::new("Referrals"),
        Cell::new("Rate %"),
        Cell::new("Network"),
        Cell::new("Leaders"),
        Cell::new("Override %"),
        Cell::new("Leadership"),
    ]);
    for (n, l) in r.network.levels.iter().zip(r.leadership.levels.iter()) {
        table.add_row(vec![
            Cell::new(n.level),
            Cell::new(n.count),
            Cell::new(n.rate_percent),
            Cell::new(money(n.earnings, dp)),
            Cell::new(l.count),
            Cell::new(l.rate_percent),
            Cell::new(money(l.earnings, dp)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(money(r.network.total, dp)).fg(Color::Cyan),
        Cell::new(""),
        Cell::new(""),
        Cell::new(money(r.leadership.total, dp)).fg(Color::Cyan),
    ]);
    align_right(&mut table, 1..=6);
    println!("\n{}", table);

    // Stair-step
    let s = &r.stair_step;
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Stair-Step").add_attribute(Attribute::Bold),
        Cell::new("Downline"),
        Cell::new("Sales"),
        Cell::new("Diff %"),
        Cell::new("Earnings"),
    ]);
    let current = s.current_step_name.as_deref().unwrap_or("(not configured)");
    table.add_row(vec![
        Cell::new(format!("Personal @ {} ({}%)", current, s.current_percentage)),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(money(s.personal_earnings, dp)),
    ]);
    for d in &s.differentials {
        let diff_cell = Cell::new(d.differential_percent);
        table.add_row(vec![
            Cell::new(format!("Step {} {}", d.step_number, d.step_name)),
            Cell::new(d.downline_count),
            Cell::new(money(d.downline_sales, dp)),
            if d.differential_percent < 0.0 {
                diff_cell.fg(Color::Red)
            } else {
                diff_cell
            },
            Cell::new(money(d.earnings, dp)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(money(s.total(), dp)).fg(Color::Cyan),
    ]);
    align_right(&mut table, 1..=4);
    println!("\n{}", table);

    if let (Some(next), Some(remaining)) = (s.progress.next_step, s.progress.remaining_to_next) {
        println!(
            "Next step: {} ({} more in team sales)",
            next,
            money(remaining, dp)
        );
    }

    // Summary
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Scheme").add_attribute(Attribute::Bold),
        Cell::new("Earnings"),
    ]);
    for scheme in Scheme::iter() {
        let cell = Cell::new(money(r.scheme_total(scheme), dp));
        table.add_row(vec![
            Cell::new(scheme.to_string()),
            if r.failed(scheme) {
                cell.fg(Color::Red)
            } else {
                cell
            },
        ]);
    }
    table.add_row(vec![
        Cell::new("grand_total").add_attribute(Attribute::Bold),
        Cell::new(money(r.grand_total, dp))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    align_right(&mut table, 1..=1);
    println!("\n{}", table);

    for f in &r.failures {
        println!("❌ {}: {}", f.scheme, f.message);
    }
    for w in &r.warnings {
        println!("⚠️  {}", w);
    }
}

pub fn print_batch_summary(results: &[PfResult<CalculationResult>], dp: usize) {
    let mut table = new_table();
    let mut header = vec![Cell::new("#").add_attribute(Attribute::Bold)];
    header.extend(Scheme::iter().map(|s| Cell::new(s.to_string())));
    header.push(Cell::new("Total").fg(Color::Cyan));
    header.push(Cell::new("Notes"));
    table.set_header(header);

    for (i, res) in results.iter().enumerate() {
        let mut row = vec![Cell::new(i + 1)];
        match res {
            Ok(r) => {
                row.extend(Scheme::iter().map(|s| Cell::new(money(r.scheme_total(s), dp))));
                row.push(Cell::new(money(r.grand_total, dp)).fg(Color::Cyan));
                row.push(Cell::new(format!(
                    "{} failed, {} warnings",
                    r.failures.len(),
                    r.warnings.len()
                )));
            }
            Err(e) => {
                row.extend(Scheme::iter().map(|_| Cell::new("-")));
                row.push(Cell::new("-"));
                row.push(Cell::new(e.to_string()).fg(Color::Red));
            }
        }
        table.add_row(row);
    }
    align_right(&mut table, 1..=5);
    println!("\n{}", table);
}

pub struct SweepRow {
    pub multiplier: f64,
    pub referrals: f64,
    pub network_total: f64,
    pub grand_total: f64,
}

pub fn print_sweep(rows: &[SweepRow], dp: usize) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Multiplier").add_attribute(Attribute::Bold),
        Cell::new("Referrals"),
        Cell::new("Network"),
        Cell::new("Total").fg(Color::Cyan),
    ]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.multiplier),
            Cell::new(row.referrals),
            Cell::new(money(row.network_total, dp)),
            Cell::new(money(row.grand_total, dp)).fg(Color::Cyan),
        ]);
    }
    align_right(&mut table, 0..=3);
    println!("\n{}", table);
}

pub fn print_autofill(multiplier: f64, counts: &[f64]) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(format!("Level (x{})", multiplier)).add_attribute(Attribute::Bold),
        Cell::new("Referrals"),
    ]);
    for (i, c) in counts.iter().enumerate() {
        table.add_row(vec![Cell::new(i + 1), Cell::new(c)]);
    }
    align_right(&mut table, 1..=1);
    println!("\n{}", table);
}

pub fn print_rank_table(ranks: &RankTable, binary: &BinaryConfig) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Step").add_attribute(Attribute::Bold),
        Cell::new("Name"),
        Cell::new("Commission %"),
        Cell::new("Sales Quota"),
    ]);
    for s in ranks.steps() {
        table.add_row(vec![
            Cell::new(s.step_number),
            Cell::new(&s.step_name),
            Cell::new(s.commission_percentage),
            Cell::new(money(s.sales_quota, 2)),
        ]);
    }
    align_right(&mut table, 2..=3);
    println!("\n{}", table);

    println!(
        "Binary: cycle {} pays {}, max {}/day, sponsor bonus {}%",
        binary.cycle_amount,
        binary.cycle_commission,
        binary.max_cycles_per_day,
        binary.sponsor_bonus_percent
    );
}

pub fn print_issues(issues: &[PlanIssue]) {
    if issues.is_empty() {
        println!("✅ Plan is clean.");
        return;
    }
    for issue in issues {
        match issue.severity {
            Severity::Error => println!("❌ [{}] {}", issue.severity, issue.message),
            Severity::Warning => println!("⚠️  [{}] {}", issue.severity, issue.message),
        }
    }
}
