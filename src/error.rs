use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Matches,
    Players,
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetKind::Matches => f.write_str("matches"),
            DatasetKind::Players => f.write_str("players"),
        }
    }
}

/// `row` is the 1-based data row, header excluded.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{dataset} csv is malformed: {source}")]
    Csv {
        dataset: DatasetKind,
        #[source]
        source: csv::Error,
    },
    #[error("{dataset} dataset is empty")]
    Empty { dataset: DatasetKind },
    #[error("{dataset} row {row}: missing required field `{field}`")]
    MissingField {
        dataset: DatasetKind,
        row: usize,
        field: &'static str,
    },
    #[error("{dataset} row {row}: invalid value {value:?} for `{field}`")]
    InvalidField {
        dataset: DatasetKind,
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("matches row {row}: team1 and team2 are both {team:?}")]
    SameTeams { row: usize, team: String },
    #[error("matches row {row}: winner {winner:?} did not play in the match")]
    WinnerNotPlaying { row: usize, winner: String },
    #[error("players row {row}: duplicate player name {name:?}")]
    DuplicatePlayer { row: usize, name: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidSelectionError {
    #[error("unknown team {team:?}")]
    UnknownTeam { team: String },
    #[error("player {player:?} is not on team {team:?}")]
    PlayerNotOnTeam { player: String, team: String },
}
