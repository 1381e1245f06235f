use gfl_board::Faction;
use gfl_core::PlayerId;
use gfl_core::Position;

/// Rejection reasons for mutating game operations.
///
/// Every variant is raised before any state change; a caller seeing one
/// of these knows the engine is exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// The caller is not known to the user directory.
    UnknownUser(PlayerId),
    /// The caller never joined (or was evicted) and must start playing first.
    NotPlaying,
    /// Column index beyond the current board width.
    OutOfBounds(Position),
    /// Column is disabled pending its clear cycle.
    ColumnDisabled(Position),
    /// Column already holds a full stack of rows.
    ColumnFull(Position),
    /// The caller already has a pending placement somewhere on the board.
    AlreadyQueued,
    /// Joining this faction would unbalance the teams beyond the limit.
    Unbalanced(Faction),
    /// Score storage failed mid-operation; the tick was aborted.
    Storage(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownUser(id) => write!(f, "user {} not found in storage", id),
            Self::NotPlaying => write!(f, "caller is not actively playing"),
            Self::OutOfBounds(col) => write!(f, "column {} out of bounds", col),
            Self::ColumnDisabled(col) => write!(f, "column {} is disabled", col),
            Self::ColumnFull(col) => write!(f, "column {} is full", col),
            Self::AlreadyQueued => write!(f, "caller already has a placement enqueued"),
            Self::Unbalanced(faction) => {
                write!(f, "joining {} would unbalance the factions", faction)
            }
            Self::Storage(reason) => write!(f, "score storage failure: {}", reason),
        }
    }
}

impl std::error::Error for GameError {}
