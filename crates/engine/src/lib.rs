//! Authoritative game engine for gridfall.
//!
//! One in-memory instance owns the board, the active-player registry,
//! and the subscriber list; every mutating operation — RPC-driven or
//! timer-driven — runs under the same lock and emits minimal diff
//! events instead of full snapshots.
//!
//! ## Core
//!
//! - [`Engine`] — The serialization point for all mutations
//! - [`EngineConfig`] — Board shape, timeouts, and join policy
//! - [`ActivePlayer`] — A connected player's faction, score, and activity
//!
//! ## Diff protocol
//!
//! - [`UpdateEvent`] — Tagged union of state changes; doubles as the wire format
//! - [`Publisher`] — Multicast fan-out with snapshot-on-subscribe
//!
//! ## Collaborators
//!
//! - [`Scoreboard`] — Narrow interface onto persistent score storage
mod engine;
mod error;
mod event;
mod player;
mod publish;
mod scores;

pub use engine::*;
pub use error::*;
pub use event::*;
pub use player::*;
pub use publish::*;
pub use scores::*;
