use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::dataset::{Dataset, MatchRecord, PlayerRecord, TossDecision, WinMethod};
use crate::error::{DataLoadError, DatasetKind};

// Column names follow the IPL 2022 match and player season exports.
#[derive(Debug, Deserialize)]
struct MatchRow {
    #[serde(default)]
    team1: Option<String>,
    #[serde(default)]
    team2: Option<String>,
    #[serde(default)]
    match_winner: Option<String>,
    #[serde(default)]
    toss_winner: Option<String>,
    #[serde(default)]
    toss_decision: Option<String>,
    #[serde(default)]
    won_by: Option<String>,
    #[serde(default)]
    venue: Option<String>,
    #[serde(default)]
    player_of_the_match: Option<String>,
    #[serde(default)]
    top_scorer: Option<String>,
    #[serde(default)]
    highscore: Option<String>,
    #[serde(default)]
    best_bowling: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlayerRow {
    #[serde(default, rename = "Name")]
    name: Option<String>,
    #[serde(default, rename = "Team")]
    team: Option<String>,
    #[serde(default, rename = "Url")]
    url: Option<String>,
    #[serde(default, rename = "RunsScored")]
    runs_scored: Option<String>,
    #[serde(default, rename = "BattingAVG")]
    batting_avg: Option<String>,
    #[serde(default, rename = "BattingS/R")]
    batting_sr: Option<String>,
    #[serde(default, rename = "100s")]
    centuries: Option<String>,
    #[serde(default, rename = "50s")]
    half_centuries: Option<String>,
    #[serde(default, rename = "4s")]
    fours: Option<String>,
    #[serde(default, rename = "6s")]
    sixes: Option<String>,
    #[serde(default, rename = "CatchesTaken")]
    catches_taken: Option<String>,
    #[serde(default, rename = "StumpingsMade")]
    stumpings_made: Option<String>,
    #[serde(default, rename = "Ducks")]
    ducks: Option<String>,
    #[serde(default, rename = "Overs")]
    overs: Option<String>,
    #[serde(default, rename = "Maidens")]
    maidens: Option<String>,
    #[serde(default, rename = "RunsConceded")]
    runs_conceded: Option<String>,
    #[serde(default, rename = "Wickets")]
    wickets: Option<String>,
    #[serde(default, rename = "Best")]
    best: Option<String>,
    #[serde(default, rename = "BowlingAVG")]
    bowling_avg: Option<String>,
    #[serde(default, rename = "EconomyRate")]
    economy_rate: Option<String>,
    #[serde(default, rename = "S/R")]
    bowling_sr: Option<String>,
}

pub fn load_matches(path: &Path) -> Result<Vec<MatchRecord>, DataLoadError> {
    read_matches(open(path)?)
}

pub fn load_players(path: &Path) -> Result<Vec<PlayerRecord>, DataLoadError> {
    read_players(open(path)?)
}

pub fn load_dataset(matches: &Path, players: &Path) -> Result<Dataset, DataLoadError> {
    let matches = load_matches(matches)?;
    let players = load_players(players)?;
    Dataset::new(matches, players)
}

pub fn read_matches<R: Read>(reader: R) -> Result<Vec<MatchRecord>, DataLoadError> {
    let dataset = DatasetKind::Matches;
    let mut rdr = csv_reader(reader);
    let mut out = Vec::new();
    for (idx, result) in rdr.deserialize::<MatchRow>().enumerate() {
        let row = idx + 1;
        let raw = result.map_err(|source| DataLoadError::Csv { dataset, source })?;
        out.push(match_from_row(raw, row)?);
    }
    if out.is_empty() {
        return Err(DataLoadError::Empty { dataset });
    }
    Ok(out)
}

pub fn read_players<R: Read>(reader: R) -> Result<Vec<PlayerRecord>, DataLoadError> {
    let dataset = DatasetKind::Players;
    let mut rdr = csv_reader(reader);
    let mut out = Vec::new();
    for (idx, result) in rdr.deserialize::<PlayerRow>().enumerate() {
        let row = idx + 1;
        let raw = result.map_err(|source| DataLoadError::Csv { dataset, source })?;
        out.push(player_from_row(raw, row)?);
    }
    if out.is_empty() {
        return Err(DataLoadError::Empty { dataset });
    }
    Ok(out)
}

fn open(path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn match_from_row(raw: MatchRow, row: usize) -> Result<MatchRecord, DataLoadError> {
    let dataset = DatasetKind::Matches;
    let team1 = required(raw.team1, dataset, row, "team1")?;
    let team2 = required(raw.team2, dataset, row, "team2")?;
    let toss_winner = required(raw.toss_winner, dataset, row, "toss_winner")?;
    let venue = required(raw.venue, dataset, row, "venue")?;

    let decision_raw = required(raw.toss_decision, dataset, row, "toss_decision")?;
    let Some(toss_decision) = TossDecision::parse(&decision_raw) else {
        return Err(DataLoadError::InvalidField {
            dataset,
            row,
            field: "toss_decision",
            value: decision_raw,
        });
    };

    let won_by = optional(raw.won_by).map(|s| WinMethod::parse(&s));

    let top_scorer = optional(raw.top_scorer);
    let high_score = match (optional(raw.highscore), &top_scorer) {
        (Some(value), _) => parse_count(&value).ok_or(DataLoadError::InvalidField {
            dataset,
            row,
            field: "highscore",
            value,
        })?,
        // A top scorer without a score cannot feed the scorer totals.
        (None, Some(_)) => {
            return Err(DataLoadError::MissingField {
                dataset,
                row,
                field: "highscore",
            });
        }
        (None, None) => 0,
    };

    Ok(MatchRecord {
        team1,
        team2,
        match_winner: optional(raw.match_winner),
        toss_winner,
        toss_decision,
        won_by,
        venue,
        player_of_the_match: optional(raw.player_of_the_match),
        top_scorer,
        high_score,
        best_bowling: optional(raw.best_bowling),
    })
}

fn player_from_row(raw: PlayerRow, row: usize) -> Result<PlayerRecord, DataLoadError> {
    let dataset = DatasetKind::Players;
    let metric = |value: Option<String>, field: &'static str| {
        parse_metric(value).map_err(|value| DataLoadError::InvalidField {
            dataset,
            row,
            field,
            value,
        })
    };

    Ok(PlayerRecord {
        name: required(raw.name, dataset, row, "Name")?,
        team: required(raw.team, dataset, row, "Team")?,
        profile_url: optional(raw.url).unwrap_or_default(),
        runs_scored: metric(raw.runs_scored, "RunsScored")?,
        batting_avg: metric(raw.batting_avg, "BattingAVG")?,
        batting_strike_rate: metric(raw.batting_sr, "BattingS/R")?,
        centuries: metric(raw.centuries, "100s")?,
        half_centuries: metric(raw.half_centuries, "50s")?,
        fours: metric(raw.fours, "4s")?,
        sixes: metric(raw.sixes, "6s")?,
        ducks: metric(raw.ducks, "Ducks")?,
        catches_taken: metric(raw.catches_taken, "CatchesTaken")?,
        stumpings_made: metric(raw.stumpings_made, "StumpingsMade")?,
        overs_bowled: metric(raw.overs, "Overs")?,
        maidens: metric(raw.maidens, "Maidens")?,
        runs_conceded: metric(raw.runs_conceded, "RunsConceded")?,
        wickets_taken: metric(raw.wickets, "Wickets")?,
        best_bowling_figures: optional(raw.best).filter(|s| s != "-"),
        bowling_avg: metric(raw.bowling_avg, "BowlingAVG")?,
        economy_rate: metric(raw.economy_rate, "EconomyRate")?,
        bowling_strike_rate: metric(raw.bowling_sr, "S/R")?,
    })
}

fn required(
    value: Option<String>,
    dataset: DatasetKind,
    row: usize,
    field: &'static str,
) -> Result<String, DataLoadError> {
    optional(value).ok_or(DataLoadError::MissingField {
        dataset,
        row,
        field,
    })
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_count(raw: &str) -> Option<u32> {
    if let Ok(v) = raw.parse::<u32>() {
        return Some(v);
    }
    // Spreadsheet round-trips sometimes turn 72 into 72.0.
    let v = raw.parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) {
        Some(v as u32)
    } else {
        None
    }
}

/// Blank and `-` mean "not available"; anything else must be numeric.
fn parse_metric(value: Option<String>) -> Result<Option<f64>, String> {
    let Some(raw) = optional(value) else {
        return Ok(None);
    };
    if raw == "-" {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(raw),
    }
}
