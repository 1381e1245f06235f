use super::Column;
use super::Piece;
use gfl_core::PlayerId;
use gfl_core::Position;

/// The shared playing field: an elastic sequence of columns with a
/// fixed height. Column count changes only through the resize routine;
/// rows never exceed the height.
#[derive(Debug, Clone)]
pub struct Board {
    columns: Vec<Column>,
    rows: usize,
}

impl Board {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns: (0..columns).map(|_| Column::default()).collect(),
            rows,
        }
    }
    /// Fixed board height.
    pub fn rows(&self) -> usize {
        self.rows
    }
    /// Current column count.
    pub fn width(&self) -> usize {
        self.columns.len()
    }
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
    pub fn column(&self, index: Position) -> Option<&Column> {
        self.columns.get(index)
    }
    pub fn column_mut(&mut self, index: Position) -> Option<&mut Column> {
        self.columns.get_mut(index)
    }
    pub fn piece(&self, column: Position, row: Position) -> Option<&Piece> {
        self.columns.get(column).and_then(|c| c.piece(row))
    }
    /// A column at `rows` held pieces is out of capacity.
    pub fn is_full(&self, column: Position) -> bool {
        self.columns
            .get(column)
            .map(|c| c.height() >= self.rows)
            .unwrap_or(true)
    }
    /// Whether a player has a pending placement anywhere on the board.
    /// At most one queue entry per player exists across all columns.
    pub fn has_pending(&self, owner: PlayerId) -> bool {
        self.columns
            .iter()
            .any(|c| c.queue().any(|e| e.owner() == owner))
    }
    /// Indices of columns whose queue holds at least one entry.
    pub fn queued_columns(&self) -> Vec<Position> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.has_queue())
            .map(|(i, _)| i)
            .collect()
    }
    /// Every placed piece with its coordinate.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Position, &Piece)> {
        self.columns
            .iter()
            .enumerate()
            .flat_map(|(col, c)| c.rows().iter().enumerate().map(move |(row, p)| (col, row, p)))
    }
    /// Prepends `n` empty columns; existing indices shift up by `n`.
    pub fn grow_head(&mut self, n: usize) {
        self.columns.splice(0..0, (0..n).map(|_| Column::default()));
    }
    /// Appends `n` empty columns.
    pub fn grow_tail(&mut self, n: usize) {
        self.columns.extend((0..n).map(|_| Column::default()));
    }
    /// Drops the first `n` columns.
    pub fn trim_head(&mut self, n: usize) {
        self.columns.drain(0..n.min(self.columns.len()));
    }
    /// Drops the last `n` columns.
    pub fn trim_tail(&mut self, n: usize) {
        let keep = self.columns.len().saturating_sub(n);
        self.columns.truncate(keep);
    }
}
