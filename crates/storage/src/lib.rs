//! User directory and score persistence for gridfall.
//!
//! One in-process store owns every known user and their accumulated
//! score. Board state is deliberately not persisted; scores are the
//! only thing that survives a restart, flushed to a JSON file on a
//! timer and at shutdown.
//!
//! ## Types
//!
//! - [`User`] — Registered or temporary identity
//! - [`Credentials`] — Username and password hash of a registered user
//! - [`UserScore`] — A user together with their persisted score
//! - [`Store`] — The directory itself, independently synchronized
//!
//! The store implements [`gfl_engine::Scoreboard`], which is the only
//! surface the game engine ever touches.
mod error;
mod store;
mod user;

pub use error::*;
pub use store::*;
pub use user::*;
