use std::path::PathBuf;

use ipl_dashboard::aggregate::ChartRow;
use ipl_dashboard::dashboard::Dashboard;
use ipl_dashboard::state::{AppState, ChartTab, Focus, chart_title};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn fixture_state() -> AppState {
    let dashboard = Dashboard::load(
        &fixture_path("matches.csv"),
        &fixture_path("players.csv"),
        5,
    )
    .expect("fixtures should load");
    AppState::new(dashboard)
}

#[test]
fn new_state_starts_on_first_team_and_logs_load() {
    let state = fixture_state();
    assert_eq!(state.team_cursor, 0);
    assert_eq!(state.focus, Focus::Teams);
    assert_eq!(state.chart, ChartTab::MatchesPlayed);
    assert_eq!(state.player_cursor(), Some(0));
    assert_eq!(
        state.logs.front().map(String::as_str),
        Some("[INFO] Loaded 7 matches, 8 players, 4 teams")
    );
}

#[test]
fn moving_team_cursor_cascades_to_players() {
    let mut state = fixture_state();
    state.select_next();
    assert_eq!(state.team_cursor, 1);
    assert_eq!(
        state.dashboard.selection_state().selected_team,
        "Rajasthan Royals"
    );
    assert_eq!(
        state.dashboard.selection_state().selected_player.as_deref(),
        Some("Jos Buttler")
    );
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[INFO] Rajasthan Royals: 2 players, showing Jos Buttler")
    );

    state.select_prev();
    state.select_prev();
    assert_eq!(state.team_cursor, 3);
    assert_eq!(
        state.dashboard.selection_state().selected_team,
        "Lucknow Super Giants"
    );
}

#[test]
fn player_cursor_wraps_within_team() {
    let mut state = fixture_state();
    state.toggle_focus();
    assert_eq!(state.focus, Focus::Players);

    state.select_next();
    state.select_next();
    assert_eq!(state.player_cursor(), Some(2));
    assert_eq!(
        state.dashboard.selection_state().selected_player.as_deref(),
        Some("Rashid Khan")
    );

    state.select_next();
    assert_eq!(state.player_cursor(), Some(0));

    state.select_prev();
    assert_eq!(state.player_cursor(), Some(2));
    assert_eq!(
        state.dashboard.selection_state().selected_team,
        "Gujarat Titans"
    );
}

#[test]
fn rejected_selection_is_logged_and_ignored() {
    let mut state = fixture_state();
    assert!(state.select_team("Delhi Capitals").is_err());
    assert!(state.logs.back().unwrap().starts_with("[WARN]"));
    assert_eq!(state.team_cursor, 0);

    assert!(state.select_player("KL Rahul").is_err());
    assert!(state.logs.back().unwrap().contains("KL Rahul"));
    assert_eq!(
        state.dashboard.selection_state().selected_player.as_deref(),
        Some("Hardik Pandya")
    );
}

#[test]
fn select_team_by_name_moves_cursor() {
    let mut state = fixture_state();
    state.select_team("Mumbai Indians").unwrap();
    assert_eq!(state.team_cursor, 2);
    assert_eq!(state.dashboard.current_player_list(), ["Tim David"]);
}

#[test]
fn log_ring_is_bounded() {
    let mut state = fixture_state();
    for i in 0..250 {
        state.push_log(format!("[INFO] line {i}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] line 249"));
}

#[test]
fn chart_tabs_wrap_both_ways() {
    assert_eq!(ChartTab::WinMargins.next(), ChartTab::MatchesPlayed);
    assert_eq!(ChartTab::MatchesPlayed.prev(), ChartTab::WinMargins);
    assert_eq!(ChartTab::MatchesWon.prev(), ChartTab::MatchesPlayed);

    let mut state = fixture_state();
    for _ in 0..ChartTab::ALL.len() {
        state.cycle_chart_next();
    }
    assert_eq!(state.chart, ChartTab::MatchesPlayed);
    state.cycle_chart_prev();
    assert_eq!(state.chart, ChartTab::WinMargins);
}

#[test]
fn chart_rows_follow_selected_tab() {
    let mut state = fixture_state();
    state.chart = ChartTab::WinPercentage;
    let rows = state.chart_rows();
    assert_eq!(rows[0], ChartRow::new("Gujarat Titans", 75));
    assert_eq!(rows.len(), 4);

    state.chart = ChartTab::TossDecisions;
    assert_eq!(
        state.chart_rows(),
        [ChartRow::new("Bat", 4), ChartRow::new("Field", 3)]
    );

    for tab in ChartTab::ALL {
        assert!(!chart_title(tab).is_empty());
    }
}
