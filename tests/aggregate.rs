use std::path::PathBuf;

use ipl_dashboard::aggregate::{
    self, ChartRow, SummaryTables, best_bowling_frequency, team_performance,
    top_player_of_the_match, top_scorer_peaks, top_scorers, toss_decision_distribution,
    toss_win_correlation, toss_winner_frequency, venue_frequency, win_margin_distribution,
};
use ipl_dashboard::dataset::{Dataset, MatchRecord, PlayerRecord, TossDecision, WinMethod};
use ipl_dashboard::loader::load_dataset;

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn fixture_dataset() -> Dataset {
    load_dataset(&fixture_path("matches.csv"), &fixture_path("players.csv"))
        .expect("fixtures should load")
}

fn labels(rows: &[ChartRow]) -> Vec<&str> {
    rows.iter().map(|r| r.label.as_str()).collect()
}

fn values(rows: &[ChartRow]) -> Vec<u32> {
    rows.iter().map(|r| r.value).collect()
}

fn game(team1: &str, team2: &str, winner: Option<&str>) -> MatchRecord {
    MatchRecord {
        team1: team1.to_string(),
        team2: team2.to_string(),
        match_winner: winner.map(str::to_string),
        toss_winner: team1.to_string(),
        toss_decision: TossDecision::Bat,
        won_by: Some(WinMethod::Runs),
        venue: "Wankhede Stadium, Mumbai".to_string(),
        player_of_the_match: None,
        top_scorer: None,
        high_score: 0,
        best_bowling: None,
    }
}

#[test]
fn team_performance_from_fixture() {
    let ds = fixture_dataset();
    let rows = team_performance(&ds);
    let teams: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
    // Mumbai and Lucknow tie on 33%; Mumbai comes first in the team list.
    assert_eq!(
        teams,
        [
            "Gujarat Titans",
            "Mumbai Indians",
            "Lucknow Super Giants",
            "Rajasthan Royals"
        ]
    );

    let gt = &rows[0];
    assert_eq!((gt.matches_played, gt.matches_won, gt.win_percentage), (4, 3, 75));
    let mi = &rows[1];
    assert_eq!((mi.matches_played, mi.matches_won, mi.win_percentage), (3, 1, 33));
    let rr = &rows[3];
    assert_eq!((rr.matches_played, rr.matches_won, rr.win_percentage), (4, 1, 25));
}

#[test]
fn team_performance_invariants_hold() {
    let ds = fixture_dataset();
    let rows = team_performance(&ds);
    for r in &rows {
        assert!(r.matches_played > 0);
        assert!(r.matches_won <= r.matches_played);
        assert_eq!(r.win_percentage, 100 * r.matches_won / r.matches_played);
    }
    for pair in rows.windows(2) {
        assert!(pair[0].win_percentage >= pair[1].win_percentage);
    }
}

#[test]
fn ten_played_seven_won_is_seventy_percent() {
    let mut matches = Vec::new();
    for i in 0..10 {
        let winner = if i < 7 { "Mumbai" } else { "Chennai" };
        if i % 2 == 0 {
            matches.push(game("Mumbai", "Chennai", Some(winner)));
        } else {
            matches.push(game("Chennai", "Mumbai", Some(winner)));
        }
    }
    let players = vec![
        PlayerRecord::bare("A", "Mumbai", ""),
        PlayerRecord::bare("B", "Chennai", ""),
    ];
    let ds = Dataset::new(matches, players).unwrap();
    let rows = team_performance(&ds);
    let mumbai = rows.iter().find(|r| r.team == "Mumbai").unwrap();
    assert_eq!(mumbai.matches_played, 10);
    assert_eq!(mumbai.matches_won, 7);
    assert_eq!(mumbai.win_percentage, 70);
    assert_eq!(rows[0].team, "Mumbai");
}

#[test]
fn percentage_is_truncated_not_rounded() {
    // 2 of 3 is 66.67%; 1 of 3 is 33.33%.
    let matches = vec![
        game("X", "Y", Some("X")),
        game("X", "Y", Some("X")),
        game("Y", "X", Some("Y")),
    ];
    let ds = Dataset::new(matches, vec![PlayerRecord::bare("P", "X", "")]).unwrap();
    let rows = team_performance(&ds);
    assert_eq!(rows[0].win_percentage, 66);
    assert_eq!(rows[1].win_percentage, 33);
}

#[test]
fn teams_without_matches_are_left_out() {
    let matches = vec![game("X", "Y", None)];
    let players = vec![
        PlayerRecord::bare("P1", "Z", ""),
        PlayerRecord::bare("P2", "X", ""),
    ];
    let ds = Dataset::new(matches, players).unwrap();
    let rows = team_performance(&ds);
    let teams: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(teams, ["X", "Y"]);
    assert!(rows.iter().all(|r| r.matches_won == 0 && r.win_percentage == 0));
    assert!(toss_win_correlation(&ds).is_empty());
}

#[test]
fn player_of_the_match_ties_keep_first_seen_order() {
    let ds = fixture_dataset();
    let rows = top_player_of_the_match(&ds, 3);
    assert_eq!(labels(&rows), ["Hardik Pandya", "Jos Buttler", "Shubman Gill"]);
    assert_eq!(values(&rows), [2, 1, 1]);
}

#[test]
fn top_scorers_sum_innings() {
    let ds = fixture_dataset();
    let rows = top_scorers(&ds, 10);
    assert_eq!(labels(&rows), ["Jos Buttler", "Shubman Gill", "KL Rahul"]);
    assert_eq!(values(&rows), [243, 115, 103]);

    let limited = top_scorers(&ds, 2);
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].value, 89 + 100 + 54);
}

#[test]
fn scorer_peaks_use_best_innings() {
    let ds = fixture_dataset();
    let rows = top_scorer_peaks(&ds, 5);
    assert_eq!(labels(&rows), ["KL Rahul", "Jos Buttler", "Shubman Gill"]);
    assert_eq!(values(&rows), [103, 100, 63]);
}

#[test]
fn toss_win_correlation_from_fixture() {
    let ds = fixture_dataset();
    let rows = toss_win_correlation(&ds);
    assert_eq!(
        labels(&rows),
        [
            "Mumbai Indians",
            "Lucknow Super Giants",
            "Gujarat Titans",
            "Rajasthan Royals"
        ]
    );
    assert_eq!(values(&rows), [100, 100, 33, 0]);
}

#[test]
fn best_bowling_groups_on_raw_descriptor() {
    let ds = fixture_dataset();
    let rows = best_bowling_frequency(&ds, 5);
    assert_eq!(
        labels(&rows),
        ["Mohammed Shami", "Rashid Khan", "Yuzvendra Chahal", "Avesh Khan"]
    );
    assert_eq!(values(&rows), [2, 2, 1, 1]);

    let mut a = game("X", "Y", Some("X"));
    a.best_bowling = Some("3/20".to_string());
    let mut b = game("Y", "X", Some("Y"));
    b.best_bowling = Some("3/20".to_string());
    let mut c = game("X", "Y", Some("X"));
    c.best_bowling = Some("3/20*".to_string());
    let ds = Dataset::new(vec![a, b, c], vec![PlayerRecord::bare("P", "X", "")]).unwrap();
    let rows = best_bowling_frequency(&ds, 5);
    assert_eq!(labels(&rows), ["3/20", "3/20*"]);
    assert_eq!(values(&rows), [2, 1]);
}

#[test]
fn categorical_distributions() {
    let ds = fixture_dataset();

    let venues = venue_frequency(&ds);
    assert_eq!(
        labels(&venues),
        [
            "Wankhede Stadium, Mumbai",
            "Brabourne Stadium, Mumbai",
            "Dr DY Patil Sports Academy, Mumbai"
        ]
    );
    assert_eq!(values(&venues), [3, 2, 2]);

    let decisions = toss_decision_distribution(&ds);
    assert_eq!(labels(&decisions), ["Bat", "Field"]);
    assert_eq!(values(&decisions), [4, 3]);

    // The no-result row has no margin type.
    let margins = win_margin_distribution(&ds);
    assert_eq!(labels(&margins), ["Runs", "Wickets"]);
    assert_eq!(values(&margins), [4, 2]);

    let toss = toss_winner_frequency(&ds);
    assert_eq!(
        labels(&toss),
        [
            "Mumbai Indians",
            "Lucknow Super Giants",
            "Rajasthan Royals",
            "Gujarat Titans"
        ]
    );
    assert_eq!(values(&toss), [2, 2, 2, 1]);
}

#[test]
fn win_margins_skip_no_result_but_keep_other() {
    let mut tie = game("X", "Y", Some("X"));
    tie.won_by = Some(WinMethod::Other);
    let mut washout = game("Y", "X", None);
    washout.won_by = None;
    let runs = game("X", "Y", Some("Y"));
    let ds = Dataset::new(vec![tie, washout, runs], vec![PlayerRecord::bare("P", "X", "")]).unwrap();

    let margins = win_margin_distribution(&ds);
    assert_eq!(labels(&margins), ["Other", "Runs"]);
    assert_eq!(values(&margins), [1, 1]);
    assert_eq!(values(&margins).iter().sum::<u32>(), 2);
}

#[test]
fn top_n_never_pads() {
    let ds = fixture_dataset();
    assert_eq!(top_player_of_the_match(&ds, 50).len(), 5);
    assert_eq!(best_bowling_frequency(&ds, 50).len(), 4);
    assert!(top_scorers(&ds, 0).is_empty());
}

#[test]
fn summary_tables_match_individual_functions() {
    let ds = fixture_dataset();
    let tables = SummaryTables::compute(&ds, 3);
    assert_eq!(tables.top_limit, 3);
    assert_eq!(tables.team_performance, team_performance(&ds));
    assert_eq!(tables.top_scorers, top_scorers(&ds, 3));
    assert_eq!(tables.best_bowling_frequency, best_bowling_frequency(&ds, 3));
    assert_eq!(tables.top_player_of_the_match.len(), 3);

    let pct = aggregate::win_percentage_rows(&tables.team_performance);
    assert_eq!(pct[0], ChartRow::new("Gujarat Titans", 75));
    let played = aggregate::matches_played_rows(&tables.team_performance);
    assert_eq!(values(&played), [4, 3, 3, 4]);
}
