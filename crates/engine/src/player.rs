use super::PlayerState;
use super::ScoreSnapshot;
use gfl_board::Faction;
use gfl_core::Score;
use std::time::Duration;
use std::time::SystemTime;

/// A player currently associated with a faction and considered
/// connected. Created on join, refreshed on every action, evicted by
/// the cleanup tick once idle past the inactivity timeout.
#[derive(Debug, Clone)]
pub struct ActivePlayer {
    last_active: SystemTime,
    faction: Faction,
    display_name: String,
    score: Score,
}

impl ActivePlayer {
    pub fn new(faction: Faction, snapshot: ScoreSnapshot) -> Self {
        Self {
            last_active: SystemTime::now(),
            faction,
            display_name: snapshot.display_name,
            score: snapshot.score,
        }
    }
    pub fn faction(&self) -> Faction {
        self.faction
    }
    pub fn score(&self) -> Score {
        self.score
    }
    /// Marks the player active now, optionally switching faction.
    pub fn touch(&mut self, faction: Option<Faction>) {
        self.last_active = SystemTime::now();
        if let Some(faction) = faction {
            self.faction = faction;
        }
    }
    /// Adopts a fresh storage snapshot after a score credit.
    pub fn sync(&mut self, snapshot: ScoreSnapshot) {
        self.display_name = snapshot.display_name;
        self.score = snapshot.score;
    }
    /// How long the player has been idle as of `now`.
    pub fn idle(&self, now: SystemTime) -> Duration {
        now.duration_since(self.last_active).unwrap_or_default()
    }
    pub fn state(&self) -> PlayerState {
        PlayerState {
            display_name: self.display_name.clone(),
            faction: self.faction,
            score: self.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(score: Score) -> ScoreSnapshot {
        ScoreSnapshot {
            display_name: "Player One".to_string(),
            score,
        }
    }

    #[test]
    fn fresh_players_are_not_idle() {
        let player = ActivePlayer::new(Faction::Red, snapshot(0));
        assert!(player.idle(SystemTime::now()) < Duration::from_secs(1));
    }
    #[test]
    fn touch_switches_faction() {
        let mut player = ActivePlayer::new(Faction::Red, snapshot(0));
        player.touch(Some(Faction::Yellow));
        assert_eq!(player.faction(), Faction::Yellow);
        player.touch(None);
        assert_eq!(player.faction(), Faction::Yellow);
    }
    #[test]
    fn sync_adopts_snapshot() {
        let mut player = ActivePlayer::new(Faction::Red, snapshot(2));
        player.sync(snapshot(14));
        assert_eq!(player.score(), 14);
        assert_eq!(player.state().score, 14);
    }
}
