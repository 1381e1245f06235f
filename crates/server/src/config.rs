use clap::Parser;
use gfl_engine::EngineConfig;
use std::path::PathBuf;
use std::time::Duration;

fn duration(s: &str) -> Result<Duration, String> {
    gfl_core::parse_duration(s).ok_or_else(|| format!("invalid duration: {}", s))
}

/// Runtime configuration. Every cadence and timeout the system uses is
/// a flag; defaults mirror the constants in gfl-core.
#[derive(Debug, Parser)]
#[command(name = "gridfall", about = "Shared-board connect-four game server")]
pub struct Config {
    /// Address to bind; falls back to BIND_ADDR, then localhost.
    #[arg(long)]
    pub bind: Option<String>,
    /// Score persistence path; omit to keep scores in memory only.
    #[arg(long)]
    pub storage: Option<PathBuf>,
    /// Fixed board height.
    #[arg(long, default_value_t = gfl_core::BOARD_ROWS)]
    pub rows: usize,
    /// Column count before the first resize tick.
    #[arg(long, default_value_t = gfl_core::INITIAL_COLUMNS)]
    pub columns: usize,
    /// Largest faction-size difference a join may leave behind.
    #[arg(long, default_value_t = gfl_core::MAX_FACTION_IMBALANCE)]
    pub max_imbalance: usize,
    /// Idle span after which players are evicted.
    #[arg(long, value_parser = duration, default_value = "30m")]
    pub inactive_timeout: Duration,
    /// Age after which disabled columns are wiped.
    #[arg(long, value_parser = duration, default_value = "30s")]
    pub clear_timeout: Duration,
    /// Queue drain cadence.
    #[arg(long, value_parser = duration, default_value = "5s")]
    pub queue_tick: Duration,
    /// Inactive-player sweep cadence.
    #[arg(long, value_parser = duration, default_value = "1m")]
    pub cleanup_tick: Duration,
    /// Disabled-column sweep cadence.
    #[arg(long, value_parser = duration, default_value = "10s")]
    pub clear_tick: Duration,
    /// Board resize cadence.
    #[arg(long, value_parser = duration, default_value = "30s")]
    pub resize_tick: Duration,
    /// Score flush cadence.
    #[arg(long, value_parser = duration, default_value = "15m")]
    pub store_tick: Duration,
}

impl Config {
    pub fn bind(&self) -> String {
        self.bind
            .clone()
            .or_else(|| std::env::var("BIND_ADDR").ok())
            .unwrap_or_else(|| "127.0.0.1:8080".to_string())
    }
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            rows: self.rows,
            columns: self.columns,
            inactive_timeout: self.inactive_timeout,
            clear_timeout: self.clear_timeout,
            max_imbalance: self.max_imbalance,
        }
    }
}
