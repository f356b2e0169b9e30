use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::aggregate::{Aggregation, PartnerStats, ProcessedMatch, team_number};

pub struct ExportReport {
    pub match_rows: usize,
    pub partner_rows: usize,
}

pub fn workbook_filename(target: &str) -> String {
    format!("tba_{target}_matches.xlsx")
}

/// Write the two-sheet workbook. Headers are always present, so an empty
/// aggregation still yields header-only sheets.
pub fn export_workbook(path: &Path, aggregation: &Aggregation) -> Result<ExportReport> {
    let mut match_rows = vec![
        [
            "Match Key",
            "Event Key",
            "Comp Level",
            "Match Number",
            "Set Number",
            "Matches Played",
            "Year",
            "Teammate 1",
            "Teammate 2",
            "Teammate 3",
            "Opponent 1",
            "Opponent 2",
            "Opponent 3",
            "Result",
            "Wins",
            "Losses",
            "Record",
            "Win/Loss Ratio",
            "Wins Above Even",
        ]
        .map(str::to_string)
        .to_vec(),
    ];
    for row in &aggregation.matches {
        match_rows.push(match_row(row));
    }

    let mut stats_rows = vec![
        [
            "Team Key",
            "Matches With",
            "On Alliance With",
            "Opposing",
            "Wins With",
            "Losses With",
            "Ties With",
            "Wins Against",
            "Losses Against",
            "Ties Against",
        ]
        .map(str::to_string)
        .to_vec(),
    ];
    for (key, stats) in sorted_partners(aggregation) {
        stats_rows.push(partner_row(key, stats));
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Matches")?;
        write_rows(sheet, &match_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Team Stats")?;
        write_rows(sheet, &stats_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        match_rows: match_rows.len().saturating_sub(1),
        partner_rows: stats_rows.len().saturating_sub(1),
    })
}

// Stats rows come out ordered by team number; keys with a non-numeric suffix
// sort after the numeric ones.
fn sorted_partners(aggregation: &Aggregation) -> Vec<(&String, &PartnerStats)> {
    let mut partners: Vec<(&String, &PartnerStats)> = aggregation.partners.iter().collect();
    partners.sort_by(|(a, _), (b, _)| {
        let a_num = team_number(a).unwrap_or(u32::MAX);
        let b_num = team_number(b).unwrap_or(u32::MAX);
        a_num.cmp(&b_num).then_with(|| a.cmp(b))
    });
    partners
}

fn match_row(row: &ProcessedMatch) -> Vec<String> {
    vec![
        row.match_key.clone(),
        row.event_key.clone(),
        row.comp_level.as_str().to_string(),
        row.match_number.to_string(),
        opt_to_string(row.set_number),
        row.matches_played.to_string(),
        opt_to_string(row.year),
        opt_to_string(row.teammates[0].as_deref()),
        opt_to_string(row.teammates[1].as_deref()),
        opt_to_string(row.teammates[2].as_deref()),
        opt_to_string(row.opponents[0].as_deref()),
        opt_to_string(row.opponents[1].as_deref()),
        opt_to_string(row.opponents[2].as_deref()),
        row.outcome.as_str().to_string(),
        row.wins.to_string(),
        row.losses.to_string(),
        format!("{:.3}", row.record),
        format!("{:.3}", row.win_loss_ratio),
        row.wins_above_even.to_string(),
    ]
}

fn partner_row(key: &str, stats: &PartnerStats) -> Vec<String> {
    vec![
        key.to_string(),
        stats.matches_with.to_string(),
        stats.on_alliance_with.to_string(),
        stats.opposing.to_string(),
        stats.wins_with.to_string(),
        stats.losses_with.to_string(),
        stats.ties_with.to_string(),
        stats.wins_against.to_string(),
        stats.losses_against.to_string(),
        stats.ties_against.to_string(),
    ]
}

fn opt_to_string<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
