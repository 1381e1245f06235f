//! Core type aliases, identity, and configuration constants for gridfall.
//!
//! This crate provides the foundational types and tunable parameters
//! used throughout the gridfall workspace.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Accumulated player score, persisted across sessions.
pub type Score = i64;
/// Column or row index into the board.
pub type Position = usize;

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Marker for player identity. Players are known to the user directory,
/// the active-player registry, and every piece and queue entry by the
/// same `ID<Player>`.
pub enum Player {}

/// The one identity key shared across the workspace.
pub type PlayerId = ID<Player>;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Cast ID<T> to ID<U> while preserving the underlying UUID.
    /// Useful for converting between marker types.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

// IDs cross the wire inside diff events, serialized as their bare UUID.
impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// BOARD PARAMETERS
// ============================================================================
/// Column count of a freshly created board, before any resize tick.
pub const INITIAL_COLUMNS: usize = 7;
/// Fixed board height. Columns never hold more rows than this.
pub const BOARD_ROWS: usize = 6;
/// Connected same-faction run length that scores.
pub const WIN_LENGTH: usize = 4;

// ============================================================================
// RESIZE POLICY
// Target column count is max(active, PLAYER_FLOOR) * COLUMNS_PER_PLAYER
// + COLUMNS_PADDING, recomputed every resize tick.
// ============================================================================
/// Active-player count is never taken below this when sizing the board.
pub const PLAYER_FLOOR: usize = 2;
/// Columns granted per active player.
pub const COLUMNS_PER_PLAYER: usize = 3;
/// Flat padding on top of the per-player allotment.
pub const COLUMNS_PADDING: usize = 1;

// ============================================================================
// TIMEOUTS
// ============================================================================
use std::time::Duration;

/// Players idle longer than this are evicted by the cleanup tick.
pub const INACTIVE_TIMEOUT: Duration = Duration::from_secs(30 * 60);
/// Disabled columns older than this are wiped by the clear tick.
pub const CLEAR_TIMEOUT: Duration = Duration::from_secs(30);
/// Largest faction-size difference a join may leave behind.
pub const MAX_FACTION_IMBALANCE: usize = 2;

// ============================================================================
// TICK CADENCES
// Default intervals for the background jobs; all overridable at startup.
// ============================================================================
/// One pending placement is drained onto the board per interval.
pub const QUEUE_TICK_INTERVAL: Duration = Duration::from_secs(5);
/// Inactive-player eviction sweep.
pub const CLEANUP_TICK_INTERVAL: Duration = Duration::from_secs(60);
/// Disabled-column wipe sweep.
pub const CLEAR_TICK_INTERVAL: Duration = Duration::from_secs(10);
/// Board resize against the active-player count.
pub const RESIZE_TICK_INTERVAL: Duration = Duration::from_secs(30);
/// Score flush to disk.
pub const STORE_TICK_INTERVAL: Duration = Duration::from_secs(15 * 60);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Parse duration string like "30s", "5m", "2h", "1d" into Duration.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let (num, unit) = s.split_at(s.len().saturating_sub(1));
    let value: u64 = num.parse().ok()?;
    match unit {
        "s" => Some(Duration::from_secs(value)),
        "m" => Some(Duration::from_secs(value * 60)),
        "h" => Some(Duration::from_secs(value * 3600)),
        "d" => Some(Duration::from_secs(value * 86400)),
        _ => None,
    }
}

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn ids_are_distinct() {
        let a = PlayerId::default();
        let b = PlayerId::default();
        assert_ne!(a, b);
        assert_eq!(a, PlayerId::from(a.inner()));
    }
    #[test]
    fn id_casts_preserve_uuid() {
        enum Other {}
        let a = PlayerId::default();
        let b: ID<Other> = a.cast();
        assert_eq!(a.inner(), b.inner());
    }
    #[test]
    fn durations_parse() {
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("5m"), Some(Duration::from_secs(300)));
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(7200)));
        assert_eq!(parse_duration("1d"), Some(Duration::from_secs(86400)));
        assert_eq!(parse_duration("7x"), None);
        assert_eq!(parse_duration(""), None);
    }
}
