use std::collections::VecDeque;

use crate::aggregate::{self, ChartRow};
use crate::dashboard::Dashboard;
use crate::error::InvalidSelectionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Teams,
    Players,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTab {
    MatchesPlayed,
    MatchesWon,
    WinPercentage,
    PlayerOfTheMatch,
    TopScorers,
    ScorerPeaks,
    TossWinCorrelation,
    TossWinners,
    BestBowling,
    Venues,
    TossDecisions,
    WinMargins,
}

impl ChartTab {
    pub const ALL: [ChartTab; 12] = [
        ChartTab::MatchesPlayed,
        ChartTab::MatchesWon,
        ChartTab::WinPercentage,
        ChartTab::PlayerOfTheMatch,
        ChartTab::TopScorers,
        ChartTab::ScorerPeaks,
        ChartTab::TossWinCorrelation,
        ChartTab::TossWinners,
        ChartTab::BestBowling,
        ChartTab::Venues,
        ChartTab::TossDecisions,
        ChartTab::WinMargins,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.index();
        if idx == 0 {
            Self::ALL[Self::ALL.len() - 1]
        } else {
            Self::ALL[idx - 1]
        }
    }
}

pub fn chart_title(tab: ChartTab) -> &'static str {
    match tab {
        ChartTab::MatchesPlayed => "Matches Played",
        ChartTab::MatchesWon => "Matches Won",
        ChartTab::WinPercentage => "Win Percentage by Team",
        ChartTab::PlayerOfTheMatch => "Most Player of the Match Awards",
        ChartTab::TopScorers => "Top Scorers (season total)",
        ChartTab::ScorerPeaks => "Top Scorers (best innings)",
        ChartTab::TossWinCorrelation => "Wins After Winning the Toss (%)",
        ChartTab::TossWinners => "Most Toss Wins",
        ChartTab::BestBowling => "Best Bowling Performances",
        ChartTab::Venues => "Matches per Venue",
        ChartTab::TossDecisions => "Toss Decisions",
        ChartTab::WinMargins => "Winning Margin Type",
    }
}

/// Terminal state wrapped around one dashboard session.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
    pub focus: Focus,
    pub team_cursor: usize,
    pub chart: ChartTab,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        let team_cursor = dashboard
            .team_list()
            .iter()
            .position(|t| t == &dashboard.selection_state().selected_team)
            .unwrap_or(0);
        let ds = dashboard.dataset();
        let loaded = format!(
            "[INFO] Loaded {} matches, {} players, {} teams",
            ds.matches().len(),
            ds.players().len(),
            ds.teams().len()
        );
        let orphans = ds
            .teams_without_matches()
            .into_iter()
            .map(|team| format!("[WARN] {team} has players but no matches"))
            .collect::<Vec<_>>();

        let mut state = Self {
            dashboard,
            focus: Focus::Teams,
            team_cursor,
            chart: ChartTab::MatchesPlayed,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        };
        state.push_log(loaded);
        for msg in orphans {
            state.push_log(msg);
        }
        state
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Teams => Focus::Players,
            Focus::Players => Focus::Teams,
        };
    }

    pub fn player_cursor(&self) -> Option<usize> {
        let selected = self.dashboard.selection_state().selected_player.as_deref()?;
        self.dashboard
            .current_player_list()
            .iter()
            .position(|p| p == selected)
    }

    pub fn select_next(&mut self) {
        match self.focus {
            Focus::Teams => {
                let total = self.dashboard.team_list().len();
                if total == 0 {
                    return;
                }
                self.select_team_at((self.team_cursor + 1) % total);
            }
            Focus::Players => {
                let total = self.dashboard.current_player_list().len();
                if total == 0 {
                    return;
                }
                let next = self.player_cursor().map(|i| (i + 1) % total).unwrap_or(0);
                self.select_player_at(next);
            }
        }
    }

    pub fn select_prev(&mut self) {
        match self.focus {
            Focus::Teams => {
                let total = self.dashboard.team_list().len();
                if total == 0 {
                    return;
                }
                let prev = if self.team_cursor == 0 {
                    total - 1
                } else {
                    self.team_cursor - 1
                };
                self.select_team_at(prev);
            }
            Focus::Players => {
                let total = self.dashboard.current_player_list().len();
                if total == 0 {
                    return;
                }
                let prev = match self.player_cursor() {
                    Some(0) | None => total - 1,
                    Some(i) => i - 1,
                };
                self.select_player_at(prev);
            }
        }
    }

    pub fn select_team_at(&mut self, idx: usize) {
        let Some(team) = self.dashboard.team_list().get(idx).cloned() else {
            return;
        };
        if self.select_team(&team).is_ok() {
            self.team_cursor = idx;
        }
    }

    pub fn select_player_at(&mut self, idx: usize) {
        let Some(player) = self.dashboard.current_player_list().get(idx).cloned() else {
            return;
        };
        let _ = self.select_player(&player);
    }

    pub fn select_team(&mut self, team: &str) -> Result<(), InvalidSelectionError> {
        match self.dashboard.select_team(team) {
            Ok(()) => {
                if let Some(idx) = self.dashboard.team_list().iter().position(|t| t == team) {
                    self.team_cursor = idx;
                }
                let count = self.dashboard.current_player_list().len();
                let msg = match self.dashboard.selection_state().selected_player.as_deref() {
                    Some(player) => format!("[INFO] {team}: {count} players, showing {player}"),
                    None => format!("[INFO] {team}: no players listed"),
                };
                self.push_log(msg);
                Ok(())
            }
            Err(err) => {
                self.push_log(format!("[WARN] {err}"));
                Err(err)
            }
        }
    }

    pub fn select_player(&mut self, player: &str) -> Result<(), InvalidSelectionError> {
        match self.dashboard.select_player(player) {
            Ok(()) => {
                self.push_log(format!("[INFO] Showing {player}"));
                Ok(())
            }
            Err(err) => {
                self.push_log(format!("[WARN] {err}"));
                Err(err)
            }
        }
    }

    pub fn cycle_chart_next(&mut self) {
        self.chart = self.chart.next();
    }

    pub fn cycle_chart_prev(&mut self) {
        self.chart = self.chart.prev();
    }

    pub fn chart_rows(&self) -> Vec<ChartRow> {
        let tables = self.dashboard.tables();
        match self.chart {
            ChartTab::MatchesPlayed => aggregate::matches_played_rows(&tables.team_performance),
            ChartTab::MatchesWon => aggregate::matches_won_rows(&tables.team_performance),
            ChartTab::WinPercentage => aggregate::win_percentage_rows(&tables.team_performance),
            ChartTab::PlayerOfTheMatch => tables.top_player_of_the_match.clone(),
            ChartTab::TopScorers => tables.top_scorers.clone(),
            ChartTab::ScorerPeaks => tables.top_scorer_peaks.clone(),
            ChartTab::TossWinCorrelation => tables.toss_win_correlation.clone(),
            ChartTab::TossWinners => tables.toss_winner_frequency.clone(),
            ChartTab::BestBowling => tables.best_bowling_frequency.clone(),
            ChartTab::Venues => tables.venue_frequency.clone(),
            ChartTab::TossDecisions => tables.toss_decision_distribution.clone(),
            ChartTab::WinMargins => tables.win_margin_distribution.clone(),
        }
    }
}
