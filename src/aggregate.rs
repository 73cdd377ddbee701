use std::collections::HashMap;

use serde::Serialize;

use crate::dataset::{Dataset, TeamId, WinMethod};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRow {
    pub label: String,
    pub value: u32,
}

impl ChartRow {
    pub fn new(label: impl Into<String>, value: u32) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamPerformance {
    pub team: TeamId,
    pub matches_played: u32,
    pub matches_won: u32,
    pub win_percentage: u32,
}

pub fn team_performance(dataset: &Dataset) -> Vec<TeamPerformance> {
    let mut rows: Vec<TeamPerformance> = candidate_teams(dataset)
        .into_iter()
        .filter_map(|team| {
            let mut played = 0u32;
            let mut won = 0u32;
            for m in dataset.matches() {
                if m.involves(team) {
                    played += 1;
                }
                if m.match_winner.as_deref() == Some(team) {
                    won += 1;
                }
            }
            let win_percentage = percentage(won, played)?;
            Some(TeamPerformance {
                team: team.to_string(),
                matches_played: played,
                matches_won: won,
                win_percentage,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.win_percentage.cmp(&a.win_percentage));
    rows
}

pub fn top_player_of_the_match(dataset: &Dataset, limit: usize) -> Vec<ChartRow> {
    let keys = dataset
        .matches()
        .iter()
        .filter_map(|m| m.player_of_the_match.as_deref());
    top(tally(keys.map(|k| (k, 1)), Fold::Sum), limit)
}

// Sum, not best innings.
pub fn top_scorers(dataset: &Dataset, limit: usize) -> Vec<ChartRow> {
    top(tally(scorer_innings(dataset), Fold::Sum), limit)
}

pub fn top_scorer_peaks(dataset: &Dataset, limit: usize) -> Vec<ChartRow> {
    top(tally(scorer_innings(dataset), Fold::Max), limit)
}

pub fn toss_win_correlation(dataset: &Dataset) -> Vec<ChartRow> {
    let mut rows: Vec<ChartRow> = candidate_teams(dataset)
        .into_iter()
        .filter_map(|team| {
            let mut wins = 0u32;
            let mut toss_and_win = 0u32;
            for m in dataset.matches() {
                if m.match_winner.as_deref() != Some(team) {
                    continue;
                }
                wins += 1;
                if m.toss_winner == team {
                    toss_and_win += 1;
                }
            }
            percentage(toss_and_win, wins).map(|pct| ChartRow::new(team, pct))
        })
        .collect();
    rows.sort_by(|a, b| b.value.cmp(&a.value));
    rows
}

/// Keyed on the descriptor text exactly as recorded.
pub fn best_bowling_frequency(dataset: &Dataset, limit: usize) -> Vec<ChartRow> {
    let keys = dataset
        .matches()
        .iter()
        .filter_map(|m| m.best_bowling.as_deref());
    top(tally(keys.map(|k| (k, 1)), Fold::Sum), limit)
}

pub fn venue_frequency(dataset: &Dataset) -> Vec<ChartRow> {
    let keys = dataset.matches().iter().map(|m| m.venue.as_str());
    sorted(tally(keys.map(|k| (k, 1)), Fold::Sum))
}

pub fn toss_winner_frequency(dataset: &Dataset) -> Vec<ChartRow> {
    let keys = dataset.matches().iter().map(|m| m.toss_winner.as_str());
    sorted(tally(keys.map(|k| (k, 1)), Fold::Sum))
}

pub fn toss_decision_distribution(dataset: &Dataset) -> Vec<ChartRow> {
    let keys = dataset.matches().iter().map(|m| m.toss_decision.label());
    sorted(tally(keys.map(|k| (k, 1)), Fold::Sum))
}

/// No-result rows carry no margin type and are left out.
pub fn win_margin_distribution(dataset: &Dataset) -> Vec<ChartRow> {
    let keys = dataset
        .matches()
        .iter()
        .filter_map(|m| m.won_by.map(WinMethod::label));
    sorted(tally(keys.map(|k| (k, 1)), Fold::Sum))
}

pub fn matches_played_rows(rows: &[TeamPerformance]) -> Vec<ChartRow> {
    rows.iter()
        .map(|r| ChartRow::new(&r.team, r.matches_played))
        .collect()
}

pub fn matches_won_rows(rows: &[TeamPerformance]) -> Vec<ChartRow> {
    rows.iter()
        .map(|r| ChartRow::new(&r.team, r.matches_won))
        .collect()
}

pub fn win_percentage_rows(rows: &[TeamPerformance]) -> Vec<ChartRow> {
    rows.iter()
        .map(|r| ChartRow::new(&r.team, r.win_percentage))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTables {
    pub top_limit: usize,
    pub team_performance: Vec<TeamPerformance>,
    pub top_player_of_the_match: Vec<ChartRow>,
    pub top_scorers: Vec<ChartRow>,
    pub top_scorer_peaks: Vec<ChartRow>,
    pub toss_win_correlation: Vec<ChartRow>,
    pub best_bowling_frequency: Vec<ChartRow>,
    pub venue_frequency: Vec<ChartRow>,
    pub toss_winner_frequency: Vec<ChartRow>,
    pub toss_decision_distribution: Vec<ChartRow>,
    pub win_margin_distribution: Vec<ChartRow>,
}

impl SummaryTables {
    pub fn compute(dataset: &Dataset, top_limit: usize) -> Self {
        Self {
            top_limit,
            team_performance: team_performance(dataset),
            top_player_of_the_match: top_player_of_the_match(dataset, top_limit),
            top_scorers: top_scorers(dataset, top_limit),
            top_scorer_peaks: top_scorer_peaks(dataset, top_limit),
            toss_win_correlation: toss_win_correlation(dataset),
            best_bowling_frequency: best_bowling_frequency(dataset, top_limit),
            venue_frequency: venue_frequency(dataset),
            toss_winner_frequency: toss_winner_frequency(dataset),
            toss_decision_distribution: toss_decision_distribution(dataset),
            win_margin_distribution: win_margin_distribution(dataset),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Fold {
    Sum,
    Max,
}

// Player-table teams first, then match-only teams in first-seen order.
fn candidate_teams(dataset: &Dataset) -> Vec<&str> {
    let mut out: Vec<&str> = dataset.teams().iter().map(String::as_str).collect();
    for m in dataset.matches() {
        for team in [m.team1.as_str(), m.team2.as_str()] {
            if !out.contains(&team) {
                out.push(team);
            }
        }
    }
    out
}

fn scorer_innings(dataset: &Dataset) -> impl Iterator<Item = (&str, u32)> {
    dataset
        .matches()
        .iter()
        .filter_map(|m| m.top_scorer.as_deref().map(|p| (p, m.high_score)))
}

fn tally<'a>(items: impl Iterator<Item = (&'a str, u32)>, fold: Fold) -> Vec<ChartRow> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<ChartRow> = Vec::new();
    for (key, value) in items {
        match index.get(key) {
            Some(&idx) => {
                let row = &mut out[idx];
                row.value = match fold {
                    Fold::Sum => row.value.saturating_add(value),
                    Fold::Max => row.value.max(value),
                };
            }
            None => {
                index.insert(key, out.len());
                out.push(ChartRow::new(key, value));
            }
        }
    }
    out
}

fn sorted(mut rows: Vec<ChartRow>) -> Vec<ChartRow> {
    // `sort_by` is stable, which is what keeps first-seen order on ties.
    rows.sort_by(|a, b| b.value.cmp(&a.value));
    rows
}

fn top(rows: Vec<ChartRow>, limit: usize) -> Vec<ChartRow> {
    let mut rows = sorted(rows);
    rows.truncate(limit);
    rows
}

fn percentage(part: u32, whole: u32) -> Option<u32> {
    if whole == 0 {
        return None;
    }
    Some((u64::from(part) * 100 / u64::from(whole)) as u32)
}

#[cfg(test)]
mod tests {
    use super::{Fold, percentage, tally};

    #[test]
    fn percentage_truncates() {
        assert_eq!(percentage(7, 10), Some(70));
        assert_eq!(percentage(2, 3), Some(66));
        assert_eq!(percentage(29, 100), Some(29));
        assert_eq!(percentage(0, 4), Some(0));
        assert_eq!(percentage(1, 0), None);
    }

    #[test]
    fn tally_keeps_first_seen_order() {
        let rows = tally(
            [("b", 1), ("a", 5), ("b", 2), ("c", 1), ("a", 1)].into_iter(),
            Fold::Sum,
        );
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["b", "a", "c"]);
        assert_eq!(rows[0].value, 3);
        assert_eq!(rows[1].value, 6);

        let peaks = tally([("a", 5), ("a", 9), ("a", 2)].into_iter(), Fold::Max);
        assert_eq!(peaks[0].value, 9);
    }
}
