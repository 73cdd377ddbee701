use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{DataLoadError, DatasetKind};

pub type TeamId = String;
pub type PlayerId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TossDecision {
    Bat,
    Field,
}

impl TossDecision {
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim().to_ascii_lowercase();
        match s.as_str() {
            "bat" | "batting" => Some(TossDecision::Bat),
            "field" | "fielding" | "bowl" | "bowling" => Some(TossDecision::Field),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TossDecision::Bat => "Bat",
            TossDecision::Field => "Field",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WinMethod {
    Runs,
    Wickets,
    Other,
}

impl WinMethod {
    /// Anything that is not runs or wickets (a tie, a super over) is `Other`.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim().to_ascii_lowercase();
        match s.as_str() {
            "runs" => WinMethod::Runs,
            "wickets" => WinMethod::Wickets,
            _ => WinMethod::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WinMethod::Runs => "Runs",
            WinMethod::Wickets => "Wickets",
            WinMethod::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub team1: TeamId,
    pub team2: TeamId,
    pub match_winner: Option<TeamId>,
    pub toss_winner: TeamId,
    pub toss_decision: TossDecision,
    /// `None` on no-result rows.
    pub won_by: Option<WinMethod>,
    pub venue: String,
    pub player_of_the_match: Option<PlayerId>,
    pub top_scorer: Option<PlayerId>,
    pub high_score: u32,
    pub best_bowling: Option<String>,
}

impl MatchRecord {
    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub name: PlayerId,
    pub team: TeamId,
    pub profile_url: String,

    pub runs_scored: Option<f64>,
    pub batting_avg: Option<f64>,
    pub batting_strike_rate: Option<f64>,
    pub centuries: Option<f64>,
    pub half_centuries: Option<f64>,
    pub fours: Option<f64>,
    pub sixes: Option<f64>,
    pub ducks: Option<f64>,

    pub catches_taken: Option<f64>,
    pub stumpings_made: Option<f64>,

    pub overs_bowled: Option<f64>,
    pub maidens: Option<f64>,
    pub runs_conceded: Option<f64>,
    pub wickets_taken: Option<f64>,
    pub best_bowling_figures: Option<String>,
    pub bowling_avg: Option<f64>,
    pub economy_rate: Option<f64>,
    pub bowling_strike_rate: Option<f64>,
}

impl PlayerRecord {
    /// A record with identity fields only and every metric unavailable.
    pub fn bare(name: impl Into<String>, team: impl Into<String>, profile_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
            profile_url: profile_url.into(),
            runs_scored: None,
            batting_avg: None,
            batting_strike_rate: None,
            centuries: None,
            half_centuries: None,
            fours: None,
            sixes: None,
            ducks: None,
            catches_taken: None,
            stumpings_made: None,
            overs_bowled: None,
            maidens: None,
            runs_conceded: None,
            wickets_taken: None,
            best_bowling_figures: None,
            bowling_avg: None,
            economy_rate: None,
            bowling_strike_rate: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    matches: Vec<MatchRecord>,
    players: Vec<PlayerRecord>,
    teams: Vec<TeamId>,
    player_index: HashMap<PlayerId, usize>,
}

impl Dataset {
    pub fn new(matches: Vec<MatchRecord>, players: Vec<PlayerRecord>) -> Result<Self, DataLoadError> {
        if matches.is_empty() {
            return Err(DataLoadError::Empty {
                dataset: DatasetKind::Matches,
            });
        }
        if players.is_empty() {
            return Err(DataLoadError::Empty {
                dataset: DatasetKind::Players,
            });
        }

        for (idx, m) in matches.iter().enumerate() {
            let row = idx + 1;
            if m.team1 == m.team2 {
                return Err(DataLoadError::SameTeams {
                    row,
                    team: m.team1.clone(),
                });
            }
            if let Some(winner) = &m.match_winner
                && !m.involves(winner)
            {
                return Err(DataLoadError::WinnerNotPlaying {
                    row,
                    winner: winner.clone(),
                });
            }
        }

        let mut player_index = HashMap::with_capacity(players.len());
        let mut teams = Vec::new();
        let mut seen_teams = HashSet::new();
        for (idx, p) in players.iter().enumerate() {
            if player_index.insert(p.name.clone(), idx).is_some() {
                return Err(DataLoadError::DuplicatePlayer {
                    row: idx + 1,
                    name: p.name.clone(),
                });
            }
            if seen_teams.insert(p.team.as_str()) {
                teams.push(p.team.clone());
            }
        }

        let dataset = Self {
            matches,
            players,
            teams,
            player_index,
        };
        for team in dataset.teams_without_matches() {
            warn!(team = %team, "team has players but never appears in match data");
        }
        info!(
            matches = dataset.matches.len(),
            players = dataset.players.len(),
            teams = dataset.teams.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    /// Distinct teams from the player table, in first-seen order.
    pub fn teams(&self) -> &[TeamId] {
        &self.teams
    }

    pub fn has_team(&self, team: &str) -> bool {
        self.teams.iter().any(|t| t == team)
    }

    pub fn player(&self, name: &str) -> Option<&PlayerRecord> {
        self.player_index.get(name).map(|&idx| &self.players[idx])
    }

    pub fn players_on(&self, team: &str) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter().filter(move |p| p.team == team)
    }

    pub fn teams_without_matches(&self) -> Vec<&TeamId> {
        self.teams
            .iter()
            .filter(|t| !self.matches.iter().any(|m| m.involves(t)))
            .collect()
    }
}
