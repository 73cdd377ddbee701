use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ipl_dashboard::aggregate::ChartRow;
use ipl_dashboard::config::{Config, load_env_files};
use ipl_dashboard::dashboard::Dashboard;
use ipl_dashboard::export::export_tables;

/// Print every derived table of an IPL season without the terminal UI.
#[derive(Parser, Debug)]
#[command(name = "ipl_report", version, about)]
struct Cli {
    #[command(flatten)]
    config: Config,

    /// Print the tables as one JSON document instead of text
    #[arg(long)]
    json: bool,

    /// Also write the tables to this workbook
    #[arg(long)]
    xlsx: Option<PathBuf>,
}

fn main() -> Result<()> {
    load_env_files();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.config.validate()?;

    let dashboard = Dashboard::load(
        &cli.config.matches,
        &cli.config.players,
        cli.config.top_limit,
    )
    .context("unable to load IPL datasets")?;

    if cli.json {
        let json = serde_json::to_string_pretty(dashboard.tables())
            .context("unable to serialise summary tables")?;
        println!("{json}");
    } else {
        print_tables(&dashboard);
    }

    if let Some(path) = &cli.xlsx {
        let report = export_tables(path, &dashboard)?;
        info!(
            sheets = report.sheets,
            rows = report.rows,
            path = %path.display(),
            "workbook written"
        );
    }

    Ok(())
}

fn print_tables(dashboard: &Dashboard) {
    let tables = dashboard.tables();

    println!("Team performance");
    println!("{:<32} {:>7} {:>5} {:>5}", "team", "played", "won", "win%");
    for r in &tables.team_performance {
        println!(
            "{:<32} {:>7} {:>5} {:>4}%",
            r.team, r.matches_played, r.matches_won, r.win_percentage
        );
    }

    print_rows("Most player of the match awards", &tables.top_player_of_the_match);
    print_rows("Top scorers (season total)", &tables.top_scorers);
    print_rows("Top scorers (best innings)", &tables.top_scorer_peaks);
    print_rows("Wins after winning the toss (%)", &tables.toss_win_correlation);
    print_rows("Most toss wins", &tables.toss_winner_frequency);
    print_rows("Best bowling performances", &tables.best_bowling_frequency);
    print_rows("Matches per venue", &tables.venue_frequency);
    print_rows("Toss decisions", &tables.toss_decision_distribution);
    print_rows("Winning margin type", &tables.win_margin_distribution);
}

fn print_rows(title: &str, rows: &[ChartRow]) {
    println!();
    println!("{title}");
    if rows.is_empty() {
        println!("  (none)");
        return;
    }
    for row in rows {
        println!("  {:<40} {:>6}", row.label, row.value);
    }
}
