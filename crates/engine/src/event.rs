use gfl_board::Column;
use gfl_board::Faction;
use gfl_board::Piece;
use gfl_board::QueueEntry;
use gfl_board::detect::Spot;
use gfl_core::PlayerId;
use gfl_core::Position;
use gfl_core::Score;
use serde::Serialize;
use std::collections::BTreeMap;

/// Incremental description of one state change, broadcast to every
/// subscriber. Doubles as the WebSocket wire format, serialized as a
/// tagged JSON object.
///
/// `FullState` is only ever the first item a subscriber sees — a
/// synthetic snapshot reconstructed at subscribe time — never a
/// response to a mutation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdateEvent {
    /// Complete board reconstruction for late subscribers.
    FullState {
        columns: Vec<ColumnState>,
        number_of_rows: usize,
        players: BTreeMap<String, PlayerState>,
    },
    /// A player joined, changed, or left the game.
    PlayerChanged {
        player: PlayerId,
        action: PlayerAction,
        #[serde(skip_serializing_if = "Option::is_none")]
        state: Option<PlayerState>,
    },
    /// Pieces were placed on the board or claimed by a winning run.
    PieceChanged { pieces: Vec<PieceState> },
    /// Pending placements were appended to column queues.
    QueueChanged { pieces: Vec<QueueState> },
    /// Columns were added, deleted, disabled, or cleared.
    ColumnsChanged {
        positions: Vec<Position>,
        action: ColumnAction,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    Join,
    Update,
    Disconnect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceAction {
    Place,
    Score,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnAction {
    Add,
    Delete,
    Disable,
    Clear,
}

/// A player as shown to clients.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerState {
    pub display_name: String,
    pub faction: Faction,
    pub score: Score,
}

/// One cell of a column snapshot — a placed piece or a queued entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellState {
    pub owner: PlayerId,
    pub faction: Faction,
    pub scored: bool,
}

/// One column of a `FullState` snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnState {
    pub pieces: Vec<CellState>,
    pub queue: Vec<CellState>,
    pub disabled: bool,
}

/// A placed or scored piece inside a `PieceChanged` diff.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieceState {
    pub column: Position,
    pub row: Position,
    pub faction: Faction,
    pub owner: PlayerId,
    pub scored: bool,
    pub action: PieceAction,
}

/// A pending placement inside a `QueueChanged` diff.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueueState {
    pub column: Position,
    pub faction: Faction,
    pub owner: PlayerId,
}

impl From<&Piece> for CellState {
    fn from(piece: &Piece) -> Self {
        Self {
            owner: piece.owner(),
            faction: piece.faction(),
            scored: piece.scored(),
        }
    }
}

impl From<&QueueEntry> for CellState {
    fn from(entry: &QueueEntry) -> Self {
        Self {
            owner: entry.owner(),
            faction: entry.faction(),
            scored: false,
        }
    }
}

impl From<&Column> for ColumnState {
    fn from(column: &Column) -> Self {
        Self {
            pieces: column.rows().iter().map(CellState::from).collect(),
            queue: column.queue().map(CellState::from).collect(),
            disabled: column.is_disabled(),
        }
    }
}

impl PieceState {
    /// A freshly drained piece landing in its row.
    pub fn placed(column: Position, row: Position, piece: &Piece) -> Self {
        Self {
            column,
            row,
            faction: piece.faction(),
            owner: piece.owner(),
            scored: piece.scored(),
            action: PieceAction::Place,
        }
    }
    /// A piece claimed by a winning run.
    pub fn scored(spot: &Spot) -> Self {
        Self {
            column: spot.column,
            row: spot.row,
            faction: spot.piece.faction(),
            owner: spot.piece.owner(),
            scored: true,
            action: PieceAction::Score,
        }
    }
}

impl UpdateEvent {
    pub fn player(player: PlayerId, action: PlayerAction, state: Option<PlayerState>) -> Self {
        Self::PlayerChanged {
            player,
            action,
            state,
        }
    }
    pub fn pieces(pieces: Vec<PieceState>) -> Self {
        Self::PieceChanged { pieces }
    }
    pub fn queued(pieces: Vec<QueueState>) -> Self {
        Self::QueueChanged { pieces }
    }
    pub fn columns(positions: Vec<Position>, action: ColumnAction) -> Self {
        Self::ColumnsChanged { positions, action }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize update event")
    }
}

impl std::fmt::Display for UpdateEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::FullState {
                columns, players, ..
            } => write!(
                f,
                "full state ({} columns, {} players)",
                columns.len(),
                players.len()
            ),
            Self::PlayerChanged { player, action, .. } => {
                write!(f, "player {} {:?}", player, action)
            }
            Self::PieceChanged { pieces } => write!(f, "{} pieces changed", pieces.len()),
            Self::QueueChanged { pieces } => write!(f, "{} placements queued", pieces.len()),
            Self::ColumnsChanged { positions, action } => {
                write!(f, "columns {:?} {:?}", positions, action)
            }
        }
    }
}
