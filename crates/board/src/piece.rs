use super::Faction;
use gfl_core::PlayerId;

/// A placed cell. Created by a drain tick from the head of a column
/// queue; never moves once placed. The only mutation it ever sees is
/// the scored flag flipping to true when a winning run claims it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    owner: PlayerId,
    faction: Faction,
    scored: bool,
}

impl Piece {
    pub fn new(owner: PlayerId, faction: Faction) -> Self {
        Self {
            owner,
            faction,
            scored: false,
        }
    }
    pub fn owner(&self) -> PlayerId {
        self.owner
    }
    pub fn faction(&self) -> Faction {
        self.faction
    }
    pub fn scored(&self) -> bool {
        self.scored
    }
    /// Claims this piece for a winning run.
    pub fn score(&mut self) {
        self.scored = true;
    }
}

/// A pending placement. Entries wait in a column's FIFO queue until a
/// drain tick converts one of them into a [`Piece`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEntry {
    owner: PlayerId,
    faction: Faction,
}

impl QueueEntry {
    pub fn new(owner: PlayerId, faction: Faction) -> Self {
        Self { owner, faction }
    }
    pub fn owner(&self) -> PlayerId {
        self.owner
    }
    pub fn faction(&self) -> Faction {
        self.faction
    }
    /// The piece this entry becomes when drained.
    pub fn place(self) -> Piece {
        Piece::new(self.owner, self.faction)
    }
}
