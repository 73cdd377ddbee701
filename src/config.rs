use std::path::PathBuf;

use clap::Args;

/// Data sources and table sizing shared by every binary.
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// Match results CSV
    #[arg(long, env = "IPL_MATCHES_CSV", default_value = "IPL_Matches_2022.csv")]
    pub matches: PathBuf,

    /// Player season statistics CSV
    #[arg(long, env = "IPL_PLAYERS_CSV", default_value = "IPL_Data.csv")]
    pub players: PathBuf,

    /// Rows kept in "top N" tables
    #[arg(long, env = "IPL_TOP_LIMIT", default_value = "5")]
    pub top_limit: usize,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.top_limit == 0 {
            anyhow::bail!("top_limit must be at least 1");
        }
        Ok(())
    }
}

/// `.env.local` wins over `.env`; both are optional.
pub fn load_env_files() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}
