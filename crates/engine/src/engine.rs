use super::*;
use gfl_board::Board;
use gfl_board::Faction;
use gfl_board::QueueEntry;
use gfl_board::detect;
use gfl_board::resize;
use gfl_core::COLUMNS_PADDING;
use gfl_core::COLUMNS_PER_PLAYER;
use gfl_core::PLAYER_FLOOR;
use gfl_core::PlayerId;
use gfl_core::Position;
use gfl_core::Score;
use rand::seq::IndexedRandom;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;
use std::time::SystemTime;
use tokio::sync::mpsc::UnboundedReceiver;

/// Board shape, timeouts, and join policy. Everything here is
/// configuration, not structure: cadence lives with the scheduler.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fixed board height.
    pub rows: usize,
    /// Column count before the first resize tick.
    pub columns: usize,
    /// Idle span after which the cleanup tick evicts a player.
    pub inactive_timeout: Duration,
    /// Age after which the clear tick wipes a disabled column.
    pub clear_timeout: Duration,
    /// Largest faction-size difference a join may leave behind.
    pub max_imbalance: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: gfl_core::BOARD_ROWS,
            columns: gfl_core::INITIAL_COLUMNS,
            inactive_timeout: gfl_core::INACTIVE_TIMEOUT,
            clear_timeout: gfl_core::CLEAR_TIMEOUT,
            max_imbalance: gfl_core::MAX_FACTION_IMBALANCE,
        }
    }
}

/// Everything behind the lock: the board, the active-player registry,
/// and the subscriber list. Exclusively owned by the engine; diffs
/// leave as immutable value copies.
struct State {
    board: Board,
    players: HashMap<PlayerId, ActivePlayer>,
    publisher: Publisher,
}

impl State {
    fn publish(&mut self, event: UpdateEvent) {
        self.publisher.publish(event);
    }
    /// Reconstructs the synthetic snapshot handed to new subscribers.
    fn full_state(&self) -> UpdateEvent {
        UpdateEvent::FullState {
            columns: self.board.columns().iter().map(ColumnState::from).collect(),
            number_of_rows: self.board.rows(),
            players: self
                .players
                .iter()
                .map(|(id, p)| (id.to_string(), p.state()))
                .collect(),
        }
    }
}

/// The single authoritative game instance.
///
/// Every mutating operation — request-driven or timer-driven — runs
/// start to finish under one lock, so cross-cutting invariants (one
/// pending placement per player, faction balance, queue/row
/// consistency) hold at every observable point. Nothing awaits while
/// the lock is held: score storage is in-memory and fan-out is
/// fire-and-forget.
pub struct Engine<S> {
    config: EngineConfig,
    scores: S,
    state: Mutex<State>,
}

impl<S: Scoreboard> Engine<S> {
    pub fn new(config: EngineConfig, scores: S) -> Self {
        let state = State {
            board: Board::new(config.columns, config.rows),
            players: HashMap::new(),
            publisher: Publisher::default(),
        };
        Self {
            config,
            scores,
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("engine lock poisoned")
    }

    /// Number of currently active players.
    pub fn active_players(&self) -> usize {
        self.lock().players.len()
    }

    /// Registers the caller as an active player of the given faction,
    /// fetching their score from storage on first join. Re-joining
    /// refreshes activity and may switch faction, subject to the same
    /// balance policy.
    pub fn start_playing(&self, player: PlayerId, faction: Faction) -> Result<(), GameError> {
        let mut state = self.lock();
        let allies = Self::faction_size(&state, faction, player);
        let rivals = Self::faction_size(&state, faction.rival(), player);
        if allies >= rivals + self.config.max_imbalance {
            return Err(GameError::Unbalanced(faction));
        }
        match state.players.get_mut(&player) {
            Some(active) => active.touch(Some(faction)),
            None => {
                let snapshot = self
                    .scores
                    .lookup(player)
                    .ok_or(GameError::UnknownUser(player))?;
                state
                    .players
                    .insert(player, ActivePlayer::new(faction, snapshot));
                log::info!("[engine] player {} joined as {}", player, faction);
            }
        }
        let joined = state.players[&player].state();
        state.publish(UpdateEvent::player(player, PlayerAction::Join, Some(joined)));
        Ok(())
    }

    /// Removes the caller from the active registry. Pieces and queue
    /// entries they own stay on the board. Unknown callers are a no-op.
    pub fn stop_playing(&self, player: PlayerId) {
        let mut state = self.lock();
        if state.players.remove(&player).is_some() {
            log::info!("[engine] player {} left", player);
            state.publish(UpdateEvent::player(player, PlayerAction::Disconnect, None));
        }
    }

    /// Appends a pending placement to the target column's queue. The
    /// entry is converted into a piece by a later drain tick, never
    /// immediately.
    pub fn place_piece(&self, player: PlayerId, column: Position) -> Result<(), GameError> {
        let mut state = self.lock();
        if column >= state.board.width() {
            return Err(GameError::OutOfBounds(column));
        }
        let faction = {
            let active = state.players.get_mut(&player).ok_or(GameError::NotPlaying)?;
            active.touch(None);
            active.faction()
        };
        let target = state.board.column(column).expect("column within bounds");
        if target.is_disabled() {
            return Err(GameError::ColumnDisabled(column));
        }
        if state.board.is_full(column) {
            return Err(GameError::ColumnFull(column));
        }
        if state.board.has_pending(player) {
            return Err(GameError::AlreadyQueued);
        }
        let entry = QueueEntry::new(player, faction);
        state
            .board
            .column_mut(column)
            .expect("column within bounds")
            .enqueue(entry);
        state.publish(UpdateEvent::queued(vec![QueueState {
            column,
            faction,
            owner: player,
        }]));
        Ok(())
    }

    /// Drains one pending placement from a uniformly random non-empty
    /// queue — intentionally unfair across columns but unbiased — and
    /// resolves everything that follows from the new piece: near-full
    /// disabling, win detection, score credits, and column disabling.
    pub fn queue_tick(&self) -> Result<(), GameError> {
        let mut state = self.lock();
        let candidates = state.board.queued_columns();
        let Some(&column) = candidates.choose(&mut rand::rng()) else {
            return Ok(());
        };
        let entry = state
            .board
            .column_mut(column)
            .expect("chosen column exists")
            .dequeue()
            .expect("chosen column has a queue entry");
        let piece = entry.place();
        let row = state
            .board
            .column_mut(column)
            .expect("chosen column exists")
            .place(piece);
        log::debug!("[engine] placed {} piece at ({}, {})", piece.faction(), column, row);
        let mut condemned = Vec::new();
        // the top row never fills: reaching it is the disable trigger
        if row + 1 == self.config.rows - 1 {
            condemned.push(column);
        }
        state.publish(UpdateEvent::pieces(vec![PieceState::placed(
            column, row, &piece,
        )]));
        let winners = detect::winning_run(&state.board, column, row);
        if !winners.is_empty() {
            log::info!("[engine] {} pieces scored through ({}, {})", winners.len(), column, row);
            for spot in &winners {
                state
                    .board
                    .column_mut(spot.column)
                    .expect("winning spot on board")
                    .score(spot.row);
                if !condemned.contains(&spot.column) {
                    condemned.push(spot.column);
                }
            }
            state.publish(UpdateEvent::pieces(
                winners.iter().map(PieceState::scored).collect(),
            ));
            self.credit(&mut state, piece.owner(), &winners)?;
        }
        if !condemned.is_empty() {
            condemned.sort();
            let now = SystemTime::now();
            for &column in &condemned {
                state
                    .board
                    .column_mut(column)
                    .expect("condemned column on board")
                    .disable(now);
            }
            state.publish(UpdateEvent::columns(condemned, ColumnAction::Disable));
        }
        Ok(())
    }

    /// Evicts players idle past the inactivity timeout.
    pub fn cleanup_tick(&self) {
        let mut state = self.lock();
        let now = SystemTime::now();
        let stale: Vec<PlayerId> = state
            .players
            .iter()
            .filter(|(_, p)| p.idle(now) > self.config.inactive_timeout)
            .map(|(id, _)| *id)
            .collect();
        for player in stale {
            state.players.remove(&player);
            log::info!("[engine] evicted inactive player {}", player);
            state.publish(UpdateEvent::player(player, PlayerAction::Disconnect, None));
        }
    }

    /// Wipes disabled columns whose clear timeout has elapsed,
    /// returning them to play empty.
    pub fn clear_tick(&self) {
        let mut state = self.lock();
        let now = SystemTime::now();
        let expired: Vec<Position> = state
            .board
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, c)| match c.disabled_at() {
                Some(at) => now.duration_since(at).unwrap_or_default() > self.config.clear_timeout,
                None => false,
            })
            .map(|(i, _)| i)
            .collect();
        if expired.is_empty() {
            return;
        }
        for &column in &expired {
            state
                .board
                .column_mut(column)
                .expect("expired column on board")
                .reset();
        }
        log::info!("[engine] cleared columns {:?}", expired);
        state.publish(UpdateEvent::columns(expired, ColumnAction::Clear));
    }

    /// Grows or shrinks the board toward the player-derived target
    /// width. Columns that are enabled and hold rows or queue entries
    /// always survive.
    pub fn resize_tick(&self) {
        let mut state = self.lock();
        let target = (state.players.len().max(PLAYER_FLOOR) * COLUMNS_PER_PLAYER
            + COLUMNS_PADDING) as isize;
        let (head, tail) = resize::suggestions(state.board.columns(), target, |c| {
            c.is_enabled() && (c.has_rows() || c.has_queue())
        });
        if (head, tail) == (0, 0) {
            return;
        }
        log::debug!("[engine] resizing toward {} columns (head {}, tail {})", target, head, tail);
        let mut added = Vec::new();
        if head > 0 {
            state.board.grow_head(head as usize);
            added.extend(0..head as usize);
        }
        if tail > 0 {
            let width = state.board.width();
            state.board.grow_tail(tail as usize);
            added.extend(width..width + tail as usize);
        }
        if !added.is_empty() {
            state.publish(UpdateEvent::columns(added, ColumnAction::Add));
        }
        let mut deleted = Vec::new();
        if head < 0 {
            let n = -head as usize;
            state.board.trim_head(n);
            deleted.extend(0..n);
        }
        if tail < 0 {
            for _ in 0..-tail {
                state.board.trim_tail(1);
                deleted.push(state.board.width());
            }
        }
        if !deleted.is_empty() {
            state.publish(UpdateEvent::columns(deleted, ColumnAction::Delete));
        }
    }

    /// Registers an update subscriber. The first item is a synthetic
    /// full snapshot taken under the lock, so nothing can slip between
    /// it and the live diffs that follow.
    pub fn subscribe(&self) -> UnboundedReceiver<UpdateEvent> {
        let mut state = self.lock();
        let snapshot = state.full_state();
        state.publisher.subscribe(snapshot)
    }

    /// Faction head-count excluding one player, so re-joins compare
    /// against the registry as it would look without them.
    fn faction_size(state: &State, faction: Faction, except: PlayerId) -> usize {
        state
            .players
            .iter()
            .filter(|(id, p)| **id != except && p.faction() == faction)
            .count()
    }

    /// Credits a winning run: one point to the placer per winning
    /// piece, one point to each piece's owner per own piece. Updated
    /// snapshots flow back into the registry and out as diffs.
    fn credit(
        &self,
        state: &mut MutexGuard<'_, State>,
        placer: PlayerId,
        winners: &[detect::Spot],
    ) -> Result<(), GameError> {
        let mut credits: BTreeMap<PlayerId, Score> = BTreeMap::new();
        *credits.entry(placer).or_default() += winners.len() as Score;
        for spot in winners {
            *credits.entry(spot.piece.owner()).or_default() += 1;
        }
        for (player, points) in credits {
            let snapshot = self
                .scores
                .update_score(player, &move |score| score + points)
                .ok_or_else(|| {
                    GameError::Storage(format!("scoring player {} missing from storage", player))
                })?;
            if let Some(active) = state.players.get_mut(&player) {
                active.sync(snapshot);
                let updated = active.state();
                state.publish(UpdateEvent::player(player, PlayerAction::Update, Some(updated)));
            }
        }
        Ok(())
    }
}
