use gfl_core::PlayerId;
use gfl_core::Score;

/// A player's persisted standing at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSnapshot {
    pub display_name: String,
    pub score: Score,
}

/// Narrow interface onto persistent score storage.
///
/// The engine never persists anything itself: it reads snapshots when
/// a player joins and requests increments when a run scores. Both
/// calls happen under the engine lock, so implementations must be
/// fast and independently synchronized.
pub trait Scoreboard: Send + Sync {
    /// Snapshot for a known user, None for strangers.
    fn lookup(&self, id: PlayerId) -> Option<ScoreSnapshot>;
    /// Applies `f` to the stored score and returns the updated
    /// snapshot, None when the user is unknown to storage.
    fn update_score(&self, id: PlayerId, f: &dyn Fn(Score) -> Score) -> Option<ScoreSnapshot>;
}

impl<S: Scoreboard + ?Sized> Scoreboard for std::sync::Arc<S> {
    fn lookup(&self, id: PlayerId) -> Option<ScoreSnapshot> {
        (**self).lookup(id)
    }
    fn update_score(&self, id: PlayerId, f: &dyn Fn(Score) -> Score) -> Option<ScoreSnapshot> {
        (**self).update_score(id, f)
    }
}
