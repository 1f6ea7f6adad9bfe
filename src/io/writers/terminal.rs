use crate::aggregation::{MatrixCell, RiskMatrix, TrendPoint};
use crate::dashboard::{DashboardSummary, DashboardView};
use crate::gamification::GamificationProfile;
use crate::io::output::OutputWriter;
use crate::scoring::{RiskScore, ScoredRisk, SeverityTier};
use colored::*;
use comfy_table::{Cell, Color, Table};
use std::io::Write;

const RULE: &str = "═══════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────";

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn section(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", title.bold())?;
        writeln!(self.writer, "{THIN_RULE}")?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_dashboard(&mut self, view: &DashboardView) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", RULE.cyan())?;
        writeln!(self.writer, "{}", "        RISK POSTURE DASHBOARD".bold().cyan())?;
        writeln!(self.writer, "{}", RULE.cyan())?;

        self.section("Summary")?;
        write!(self.writer, "{}", format_summary(&view.summary))?;

        self.section("Risk Matrix (probability × impact)")?;
        writeln!(self.writer, "{}", matrix_table(&view.matrix))?;

        self.section("Top Risks")?;
        if view.top_risks.is_empty() {
            writeln!(self.writer, "No risks recorded")?;
        } else {
            writeln!(self.writer, "{}", top_risks_table(&view.top_risks))?;
        }

        self.section("Posture Trend")?;
        if view.trend.is_empty() {
            writeln!(self.writer, "No history")?;
        } else {
            writeln!(self.writer, "{}", trend_table(&view.trend))?;
        }

        if let Some(profile) = &view.profile {
            self.section("Profile")?;
            write!(self.writer, "{}", format_profile(profile))?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_score(&mut self, score: &RiskScore) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "Score: {} ({})",
            score.score,
            colored_tier(score.tier)
        )?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_profile(&mut self, profile: &GamificationProfile) -> anyhow::Result<()> {
        write!(self.writer, "{}", format_profile(profile))?;
        self.writer.flush()?;
        Ok(())
    }
}

fn tier_color(tier: SeverityTier) -> Color {
    match tier {
        SeverityTier::Critical => Color::Red,
        SeverityTier::High => Color::Magenta,
        SeverityTier::Medium => Color::Yellow,
        SeverityTier::Low => Color::Green,
    }
}

fn colored_tier(tier: SeverityTier) -> ColoredString {
    paint_tier(tier.label(), tier)
}

fn paint_tier(text: &str, tier: SeverityTier) -> ColoredString {
    match tier {
        SeverityTier::Critical => text.red().bold(),
        SeverityTier::High => text.magenta(),
        SeverityTier::Medium => text.yellow(),
        SeverityTier::Low => text.green(),
    }
}

pub fn format_summary(summary: &DashboardSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Global score: {:.2} over {} unresolved risk(s)\n",
        summary.global_score, summary.unresolved_risks
    ));
    output.push_str(&format!(
        "Risks: {} total, {} resolved, {} high or above\n",
        summary.total_risks, summary.mitigated_risks, summary.high_or_above
    ));
    output.push_str(&format!(
        "Mitigations: {}  Assets: {}\n",
        summary.total_mitigations, summary.total_assets
    ));
    for tier in SeverityTier::ALL {
        let count = summary.by_severity.get(&tier).copied().unwrap_or(0);
        // Pad before colouring; escape codes would count towards the width.
        let label = paint_tier(&format!("{:<9}", tier.label()), tier);
        output.push_str(&format!("  {} {}\n", label, count));
    }
    if !summary.mitigation_candidates.is_empty() {
        output.push_str(&format!(
            "Ready to close: {}\n",
            summary.mitigation_candidates.join(", ")
        ));
    }
    output
}

/// Probability 5 on the top row, impact 1 to 5 left to right.
pub fn matrix_table(matrix: &RiskMatrix) -> Table {
    let mut table = Table::new();
    let mut header = vec![Cell::new("P \\ I")];
    header.extend((1..=5).map(Cell::new));
    table.set_header(header);

    let grid = matrix.grid();
    for row in grid.chunks(5) {
        let probability = row.first().map(|cell| cell.probability).unwrap_or_default();
        let mut cells = vec![Cell::new(probability)];
        cells.extend(row.iter().map(matrix_cell));
        table.add_row(cells);
    }
    table
}

fn matrix_cell(cell: &MatrixCell) -> Cell {
    let content = if cell.count == 0 {
        "·".to_string()
    } else {
        cell.count.to_string()
    };
    Cell::new(content).fg(tier_color(cell.tier))
}

pub fn top_risks_table(risks: &[ScoredRisk]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "#", "ID", "Title", "Score", "Tier", "Status", "Exposure", "Owner",
    ]);
    for (rank, item) in risks.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&item.risk.id),
            Cell::new(&item.risk.title),
            Cell::new(item.score()),
            Cell::new(item.tier.label()).fg(tier_color(item.tier)),
            Cell::new(item.risk.status),
            Cell::new(format!("{:.2}", item.exposure)),
            Cell::new(item.risk.owner.as_deref().unwrap_or("-")),
        ]);
    }
    table
}

pub fn trend_table(points: &[TrendPoint]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Score"]);
    for point in points {
        table.add_row(vec![
            Cell::new(point.date.format("%Y-%m-%d")),
            Cell::new(format!("{:.2}", point.score)),
        ]);
    }
    table
}

pub fn format_profile(profile: &GamificationProfile) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{} · Level {} · {} XP\n",
        profile.user_id.bold(),
        profile.level,
        profile.total_xp
    ));
    output.push_str(&format!(
        "Next level at {} XP ({:.1}%) {}\n",
        profile.next_level_xp,
        profile.progress_percent,
        progress_bar(profile.progress_percent, 20)
    ));
    output.push_str(&format!(
        "Risks managed: {}  Mitigations done: {}\n",
        profile.risks_managed, profile.mitigations_done
    ));
    for badge in &profile.badges {
        let marker = if badge.unlocked {
            "✓".green()
        } else {
            "·".dimmed()
        };
        output.push_str(&format!("  {} {} - {}\n", marker, badge.name, badge.description));
    }
    output
}

fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
