use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::dataset::{Dataset, PlayerId, PlayerRecord, TeamId};
use crate::error::InvalidSelectionError;

pub const NO_PLAYER_TEXT: &str = "Select a player to see performance.";
pub const NO_PROFILE_TEXT: &str = "Select a player to see URL.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub selected_team: TeamId,
    pub selected_player: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    TeamSelected { team: TeamId },
    TeamAndPlayerSelected { team: TeamId, player: PlayerId },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub lines: Vec<StatLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerDetail {
    pub record: PlayerRecord,
    pub profile_url: String,
    pub cards: Vec<StatCard>,
}

impl PlayerDetail {
    pub fn from_record(record: &PlayerRecord) -> Self {
        let p = record;
        let cards = vec![
            StatCard {
                title: "Batting",
                lines: vec![
                    line("Runs Scored", metric(p.runs_scored)),
                    line("Batting Average", metric(p.batting_avg)),
                    line("Batting Strike Rate", metric(p.batting_strike_rate)),
                    line("Centuries", metric(p.centuries)),
                    line("Half-centuries", metric(p.half_centuries)),
                ],
            },
            StatCard {
                title: "Boundaries & Fielding",
                lines: vec![
                    line("Fours", metric(p.fours)),
                    line("Sixes", metric(p.sixes)),
                    line("Catches Taken", metric(p.catches_taken)),
                    line("Stumpings Made", metric(p.stumpings_made)),
                    line("Ducks", metric(p.ducks)),
                ],
            },
            StatCard {
                title: "Bowling",
                lines: vec![
                    line("Overs Bowled", metric(p.overs_bowled)),
                    line("Maidens", metric(p.maidens)),
                    line("Runs Conceded", metric(p.runs_conceded)),
                    line("Wickets Taken", metric(p.wickets_taken)),
                    line(
                        "Best Bowling",
                        p.best_bowling_figures
                            .clone()
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                ],
            },
            StatCard {
                title: "Bowling Rates",
                lines: vec![
                    line("Bowling Average", metric(p.bowling_avg)),
                    line("Economy Rate", metric(p.economy_rate)),
                    line("Bowling Strike Rate", metric(p.bowling_strike_rate)),
                ],
            },
        ];
        Self {
            record: record.clone(),
            profile_url: record.profile_url.clone(),
            cards,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlayerDetailView {
    Player(PlayerDetail),
    NoPlayerSelected,
}

impl PlayerDetailView {
    pub fn profile_text(&self) -> &str {
        match self {
            PlayerDetailView::Player(detail) => &detail.profile_url,
            PlayerDetailView::NoPlayerSelected => NO_PROFILE_TEXT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectionCascade {
    dataset: Arc<Dataset>,
    state: SelectionState,
    players: Vec<PlayerId>,
}

impl SelectionCascade {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        // A validated dataset has at least one player, hence one team.
        let team = dataset.teams().first().cloned().unwrap_or_default();
        let (state, players) = Self::team_transition(&dataset, team);
        Self {
            dataset,
            state,
            players,
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selection(&self) -> Selection {
        let team = self.state.selected_team.clone();
        match &self.state.selected_player {
            Some(player) => Selection::TeamAndPlayerSelected {
                team,
                player: player.clone(),
            },
            None => Selection::TeamSelected { team },
        }
    }

    pub fn selected_team(&self) -> &str {
        &self.state.selected_team
    }

    pub fn selected_player(&self) -> Option<&str> {
        self.state.selected_player.as_deref()
    }

    pub fn player_list(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn select_team(&mut self, team: &str) -> Result<(), InvalidSelectionError> {
        if !self.dataset.has_team(team) {
            return Err(InvalidSelectionError::UnknownTeam {
                team: team.to_string(),
            });
        }
        let (state, players) = Self::team_transition(&self.dataset, team.to_string());
        debug!(
            team = %state.selected_team,
            players = players.len(),
            player = ?state.selected_player,
            "team selected"
        );
        self.state = state;
        self.players = players;
        Ok(())
    }

    pub fn select_player(&mut self, player: &str) -> Result<(), InvalidSelectionError> {
        if !self.players.iter().any(|p| p == player) {
            return Err(InvalidSelectionError::PlayerNotOnTeam {
                player: player.to_string(),
                team: self.state.selected_team.clone(),
            });
        }
        debug!(team = %self.state.selected_team, player, "player selected");
        self.state.selected_player = Some(player.to_string());
        Ok(())
    }

    pub fn player_detail(&self) -> PlayerDetailView {
        self.state
            .selected_player
            .as_deref()
            .and_then(|name| self.dataset.player(name))
            .map(|record| PlayerDetailView::Player(PlayerDetail::from_record(record)))
            .unwrap_or(PlayerDetailView::NoPlayerSelected)
    }

    // Built off to the side so select_team commits team and players together.
    fn team_transition(dataset: &Dataset, team: TeamId) -> (SelectionState, Vec<PlayerId>) {
        let players: Vec<PlayerId> = dataset.players_on(&team).map(|p| p.name.clone()).collect();
        let selected_player = players.first().cloned();
        (
            SelectionState {
                selected_team: team,
                selected_player,
            },
            players,
        )
    }
}

fn line(label: &'static str, value: String) -> StatLine {
    StatLine { label, value }
}

fn metric(value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v}"),
    }
}
