//! Token issuance, password hashing, and identity extraction.
//!
//! Authentication is stateless: a signed JWT carries the player's
//! identity and display name, and every mutating game call presents it
//! as a Bearer token. Temporary accounts let spectators join without
//! registering and can upgrade later without losing their score.
//!
//! ## Security
//!
//! - [`Crypto`] — JWT signing and verification, Argon2 hashing
//! - [`Claims`] — Token payload: player id, display name, expiry
//! - [`AuthError`] — Credential and account-state failures
//!
//! ## Serving
//!
//! - [`Auth`] — actix-web extractor validating the Bearer header
//! - `handlers` — `/auth` route implementations over the store
mod claims;
mod crypto;
mod dto;
mod error;

pub use claims::*;
pub use crypto::*;
pub use dto::*;
pub use error::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;
