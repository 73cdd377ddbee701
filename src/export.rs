use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::aggregate::{ChartRow, TeamPerformance};
use crate::cascade::PlayerDetail;
use crate::dashboard::Dashboard;

#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub sheets: usize,
    pub rows: usize,
}

pub fn export_tables(path: &Path, dashboard: &Dashboard) -> Result<ExportReport> {
    let tables = dashboard.tables();
    let mut report = ExportReport::default();
    let mut workbook = Workbook::new();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("TeamPerformance")?;
        write_team_performance(sheet, &tables.team_performance)?;
        report.sheets += 1;
        report.rows += tables.team_performance.len();
    }

    let chart_sheets: [(&str, &str, &str, &[ChartRow]); 9] = [
        ("PlayerOfTheMatch", "Player", "Awards", &tables.top_player_of_the_match),
        ("TopScorers", "Player", "Season Total", &tables.top_scorers),
        ("ScorerPeaks", "Player", "Best Innings", &tables.top_scorer_peaks),
        ("TossWinCorrelation", "Team", "Wins After Toss %", &tables.toss_win_correlation),
        ("TossWinners", "Team", "Toss Wins", &tables.toss_winner_frequency),
        ("BestBowling", "Best Bowling", "Matches", &tables.best_bowling_frequency),
        ("Venues", "Venue", "Matches", &tables.venue_frequency),
        ("TossDecisions", "Decision", "Matches", &tables.toss_decision_distribution),
        ("WinMargins", "Won By", "Matches", &tables.win_margin_distribution),
    ];
    for (name, label_header, value_header, rows) in chart_sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        write_chart_rows(sheet, label_header, value_header, rows)?;
        report.sheets += 1;
        report.rows += rows.len();
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Players")?;
        let mut rows = Vec::with_capacity(dashboard.dataset().players().len() + 1);
        let mut header = vec!["Name".to_string(), "Team".to_string(), "Url".to_string()];
        let mut body = Vec::new();
        for record in dashboard.dataset().players() {
            let detail = PlayerDetail::from_record(record);
            if header.len() == 3 {
                header.extend(
                    detail
                        .cards
                        .iter()
                        .flat_map(|c| c.lines.iter())
                        .map(|l| l.label.to_string()),
                );
            }
            let mut row = vec![
                record.name.clone(),
                record.team.clone(),
                record.profile_url.clone(),
            ];
            row.extend(
                detail
                    .cards
                    .into_iter()
                    .flat_map(|c| c.lines.into_iter())
                    .map(|l| l.value),
            );
            body.push(row);
        }
        rows.push(header);
        rows.extend(body);
        write_rows(sheet, &rows)?;
        report.sheets += 1;
        report.rows += rows.len() - 1;
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Info")?;
        let ds = dashboard.dataset();
        let rows = vec![
            vec![
                "Generated".to_string(),
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            ],
            vec!["Matches".to_string(), ds.matches().len().to_string()],
            vec!["Players".to_string(), ds.players().len().to_string()],
            vec!["Teams".to_string(), ds.teams().len().to_string()],
            vec!["Top limit".to_string(), tables.top_limit.to_string()],
        ];
        write_rows(sheet, &rows)?;
        report.sheets += 1;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(report)
}

fn write_team_performance(worksheet: &mut Worksheet, rows: &[TeamPerformance]) -> Result<()> {
    let header = ["Team", "Matches Played", "Matches Won", "Win %"];
    for (col_idx, title) in header.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *title)?;
    }
    for (idx, r) in rows.iter().enumerate() {
        let row_idx = idx as u32 + 1;
        worksheet
            .write_string(row_idx, 0, &r.team)
            .with_context(|| format!("write cell ({row_idx},0)"))?;
        for (col_idx, value) in team_performance_numbers(r).into_iter().enumerate() {
            let col_idx = col_idx as u16 + 1;
            worksheet
                .write_number(row_idx, col_idx, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

fn team_performance_numbers(r: &TeamPerformance) -> [f64; 3] {
    [
        f64::from(r.matches_played),
        f64::from(r.matches_won),
        f64::from(r.win_percentage),
    ]
}

fn write_chart_rows(
    worksheet: &mut Worksheet,
    label_header: &str,
    value_header: &str,
    rows: &[ChartRow],
) -> Result<()> {
    worksheet.write_string(0, 0, label_header)?;
    worksheet.write_string(0, 1, value_header)?;
    for (idx, row) in rows.iter().enumerate() {
        let row_idx = idx as u32 + 1;
        worksheet
            .write_string(row_idx, 0, &row.label)
            .with_context(|| format!("write cell ({row_idx},0)"))?;
        worksheet
            .write_number(row_idx, 1, f64::from(row.value))
            .with_context(|| format!("write cell ({row_idx},1)"))?;
    }
    Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_performance_cells_are_numeric() {
        let row = TeamPerformance {
            team: "Gujarat Titans".to_string(),
            matches_played: 4,
            matches_won: 3,
            win_percentage: 75,
        };
        assert_eq!(team_performance_numbers(&row), [4.0, 3.0, 75.0]);

        let mut sheet = Worksheet::new();
        write_team_performance(&mut sheet, &[row]).unwrap();
    }
}
