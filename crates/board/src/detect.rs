//! Connected-run win detection.
//!
//! Pure and deterministic: walks outward from a freshly placed cell,
//! merges opposite-direction runs, and reports every piece of every
//! axis that reaches the winning length. Safe to call against a
//! defensive snapshot of the board.

use super::Board;
use super::Faction;
use super::Piece;
use gfl_core::Position;
use gfl_core::WIN_LENGTH;

/// A piece pinned to its board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spot {
    pub column: Position,
    pub row: Position,
    pub piece: Piece,
}

/// Compass directions over the board, row 0 at the bottom.
///
/// ```text
///  |-----| < rows-1 / width-1
///  |o    |
///  |* o *|
///  |-----|
///  ^
/// 0/0
/// ```
///
/// Ordering matters: the direction at index `i + 4` is the opposite of
/// the one at index `i`, which is how runs get paired into axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    const fn all() -> [Self; 8] {
        [
            Self::North,
            Self::NorthEast,
            Self::East,
            Self::SouthEast,
            Self::South,
            Self::SouthWest,
            Self::West,
            Self::NorthWest,
        ]
    }
    /// (row, column) step.
    const fn step(&self) -> (isize, isize) {
        match self {
            Self::North => (1, 0),
            Self::NorthEast => (1, 1),
            Self::East => (0, 1),
            Self::SouthEast => (-1, 1),
            Self::South => (-1, 0),
            Self::SouthWest => (-1, -1),
            Self::West => (0, -1),
            Self::NorthWest => (1, -1),
        }
    }
}

/// Walks from the given cell in one direction, collecting the run of
/// same-faction, not-yet-scored pieces. The starting cell is included.
fn run(board: &Board, column: Position, row: Position, faction: Faction, direction: Direction) -> Vec<Spot> {
    let (dr, dc) = direction.step();
    let mut spots = Vec::new();
    let mut row = row as isize;
    let mut col = column as isize;
    while row >= 0 && col >= 0 {
        match board.piece(col as Position, row as Position) {
            Some(piece) if !piece.scored() && piece.faction() == faction => {
                spots.push(Spot {
                    column: col as Position,
                    row: row as Position,
                    piece: *piece,
                });
            }
            _ => break,
        }
        row += dr;
        col += dc;
    }
    spots
}

/// Returns the connected run of same-faction pieces through a freshly
/// placed cell if any axis reaches the winning length, else empty.
///
/// The placed coordinate must reference an occupied, unscored cell;
/// anything else is a caller error. Opposite-direction runs are summed
/// minus the shared placed cell, so runs merge across the placed gap
/// and the full connected run is returned, not just the first four. A
/// lone qualifying cell is never a win.
pub fn winning_run(board: &Board, column: Position, row: Position) -> Vec<Spot> {
    let placed = board
        .piece(column, row)
        .expect("placed coordinate references an occupied cell");
    let faction = placed.faction();
    let runs = Direction::all().map(|d| run(board, column, row, faction, d));
    let mut winners = vec![Spot {
        column,
        row,
        piece: *placed,
    }];
    for axis in 0..4 {
        let ahead = &runs[axis];
        let behind = &runs[axis + 4];
        // both runs include the placed cell, counted once
        if ahead.len() + behind.len() >= WIN_LENGTH + 1 {
            winners.extend(ahead.iter().skip(1));
            winners.extend(behind.iter().skip(1));
        }
    }
    match winners.len() {
        0 | 1 => Vec::new(),
        _ => winners,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfl_core::PlayerId;

    /// Builds a board from sparse (column, row, faction) cells. Cells
    /// must stack from the bottom within each column, as they would on
    /// a live board.
    fn board_with(width: usize, rows: usize, cells: &[(Position, Position, Faction)]) -> Board {
        let owner = PlayerId::default();
        let mut board = Board::new(width, rows);
        for col in 0..width {
            let mut stack: Vec<_> = cells.iter().filter(|(c, _, _)| *c == col).collect();
            stack.sort_by_key(|(_, row, _)| *row);
            for (i, (_, row, faction)) in stack.iter().enumerate() {
                assert_eq!(i, *row, "fixture cells must stack from the bottom");
                board.column_mut(col).unwrap().place(Piece::new(owner, *faction));
            }
        }
        board
    }

    fn coordinates(mut spots: Vec<Spot>) -> Vec<(Position, Position)> {
        spots.sort_by_key(|s| (s.column, s.row));
        spots.iter().map(|s| (s.column, s.row)).collect()
    }

    use Faction::Red;
    use Faction::Yellow;

    /// ```text
    ///  +--------------------+
    ///  |   r r . r r r   y  |
    ///  +--------------------+
    /// ```
    fn horizontal() -> Vec<(Position, Position, Faction)> {
        vec![
            (1, 0, Red),
            (2, 0, Red),
            (4, 0, Red),
            (5, 0, Red),
            (6, 0, Red),
            (8, 0, Yellow),
        ]
    }

    /// ```text
    ///  +------+
    ///  | r    |
    ///  | r  y |
    ///  | r  y |
    ///  +------+
    /// ```
    fn vertical() -> Vec<(Position, Position, Faction)> {
        vec![
            (0, 0, Red),
            (0, 1, Red),
            (0, 2, Red),
            (1, 0, Yellow),
            (1, 1, Yellow),
        ]
    }

    /// ```text
    ///  +-------------+
    ///  | y y r . r y |
    ///  | y r y r r r |
    ///  | y r r y y r |
    ///  +-------------+
    /// ```
    fn diagonal() -> Vec<(Position, Position, Faction)> {
        vec![
            (0, 0, Yellow),
            (0, 1, Yellow),
            (0, 2, Yellow),
            (1, 0, Red),
            (1, 1, Red),
            (1, 2, Yellow),
            (2, 0, Red),
            (2, 1, Yellow),
            (2, 2, Red),
            (3, 0, Yellow),
            (3, 1, Red),
            (4, 0, Yellow),
            (4, 1, Red),
            (4, 2, Red),
            (5, 0, Red),
            (5, 1, Red),
            (5, 2, Yellow),
        ]
    }

    fn detect(
        fixture: Vec<(Position, Position, Faction)>,
        placed: (Position, Position, Faction),
    ) -> Vec<Spot> {
        let mut cells = fixture;
        cells.push(placed);
        let board = board_with(21, 6, &cells);
        winning_run(&board, placed.0, placed.1)
    }

    #[test]
    fn merges_runs_across_the_placed_gap() {
        let spots = detect(horizontal(), (3, 0, Red));
        assert_eq!(
            coordinates(spots),
            (1..=6).map(|c| (c, 0)).collect::<Vec<_>>()
        );
    }
    #[test]
    fn finds_plain_horizontal_run() {
        let spots = detect(horizontal(), (7, 0, Red));
        assert_eq!(
            coordinates(spots),
            (4..=7).map(|c| (c, 0)).collect::<Vec<_>>()
        );
    }
    #[test]
    fn finds_vertical_run() {
        let spots = detect(vertical(), (0, 3, Red));
        assert_eq!(
            coordinates(spots),
            (0..=3).map(|r| (0, r)).collect::<Vec<_>>()
        );
    }
    #[test]
    fn unions_two_axes_through_one_cell() {
        let spots = detect(diagonal(), (0, 3, Yellow));
        assert_eq!(
            coordinates(spots),
            vec![(0, 0), (0, 1), (0, 2), (0, 3), (1, 2), (2, 1), (3, 0)]
        );
    }
    #[test]
    fn finds_rising_diagonal() {
        let spots = detect(diagonal(), (5, 3, Red));
        assert_eq!(coordinates(spots), vec![(2, 0), (3, 1), (4, 2), (5, 3)]);
    }
    #[test]
    fn rejects_wrong_faction_bridge() {
        assert!(detect(horizontal(), (3, 0, Yellow)).is_empty());
    }
    #[test]
    fn rejects_short_runs() {
        assert!(detect(horizontal(), (0, 0, Red)).is_empty());
        assert!(detect(vertical(), (0, 3, Yellow)).is_empty());
        assert!(detect(vertical(), (1, 2, Yellow)).is_empty());
        assert!(detect(diagonal(), (0, 3, Red)).is_empty());
        assert!(detect(diagonal(), (5, 3, Yellow)).is_empty());
    }
    #[test]
    fn ignores_already_scored_pieces() {
        let owner = PlayerId::default();
        let mut board = Board::new(7, 6);
        for col in 1..=3 {
            board.column_mut(col).unwrap().place(Piece::new(owner, Red));
        }
        board.column_mut(2).unwrap().score(0);
        board.column_mut(4).unwrap().place(Piece::new(owner, Red));
        assert!(winning_run(&board, 4, 0).is_empty());
    }
    #[test]
    fn symmetric_under_point_reflection() {
        // a fully stacked 4x4 block stays a valid board when rotated
        let mut cells = Vec::new();
        for col in 0..4 {
            for row in 0..4 {
                let faction = if col <= row { Red } else { Yellow };
                cells.push((col, row, faction));
            }
        }
        let board = board_with(4, 4, &cells);
        let rotated = board_with(
            4,
            4,
            &cells
                .iter()
                .map(|(c, r, f)| (3 - c, 3 - r, *f))
                .collect::<Vec<_>>(),
        );
        let spots = coordinates(winning_run(&board, 1, 1));
        let mirrored: Vec<_> = coordinates(winning_run(&rotated, 2, 2))
            .into_iter()
            .map(|(c, r)| (3 - c, 3 - r))
            .rev()
            .collect();
        assert_eq!(spots, (0..4).map(|i| (i, i)).collect::<Vec<_>>());
        assert_eq!(mirrored, spots);
    }
}
