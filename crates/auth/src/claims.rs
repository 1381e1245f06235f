use super::*;
use gfl_core::PlayerId;

/// Token payload. `sub` is the player id shared with the directory and
/// the engine; `tmp` flags temporary accounts so clients can prompt
/// for an upgrade.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid,
    pub usr: String,
    pub tmp: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: PlayerId, display_name: String, temporary: bool) -> Self {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time")
            .as_secs() as i64;
        Self {
            sub: user.inner(),
            usr: display_name,
            tmp: temporary,
            iat: now,
            exp: now + Crypto::duration().as_secs() as i64,
        }
    }
    pub fn expired(&self) -> bool {
        self.exp
            < std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time")
                .as_secs() as i64
    }
    pub fn user(&self) -> PlayerId {
        PlayerId::from(self.sub)
    }
    pub fn display_name(&self) -> &str {
        &self.usr
    }
    pub fn temporary(&self) -> bool {
        self.tmp
    }
}
