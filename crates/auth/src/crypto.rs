use super::*;
use argon2::Argon2;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::password_hash::SaltString;

const ACCESS_TOKEN_DURATION: std::time::Duration = std::time::Duration::from_secs(15 * 60);

/// JWT signing and verification over a shared HS256 secret.
pub struct Crypto {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
}

impl Crypto {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
        }
    }
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| String::default())
                .as_bytes(),
        )
    }
    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), claims, &self.encoding)
            .map_err(|_| AuthError::Token)
    }
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &jsonwebtoken::Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::Token)
    }
    pub const fn duration() -> std::time::Duration {
        ACCESS_TOKEN_DURATION
    }
}

/// Argon2id password hashing with a fresh random salt per call.
pub mod password {
    use super::*;

    fn salt() -> SaltString {
        use rand::Rng;
        let ref mut bytes = [0u8; 16];
        rand::rng().fill(bytes);
        SaltString::encode_b64(bytes).expect("salt")
    }

    pub fn hash(password: &str) -> Result<String, AuthError> {
        Argon2::default()
            .hash_password(password.as_bytes(), &salt())
            .map(|h| h.to_string())
            .map_err(|_| AuthError::Hash)
    }

    pub fn verify(password: &str, hashword: &str) -> bool {
        PasswordHash::new(hashword)
            .ok()
            .as_ref()
            .map(|hash| {
                Argon2::default()
                    .verify_password(password.as_bytes(), hash)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfl_core::PlayerId;

    #[test]
    fn tokens_round_trip() {
        let crypto = Crypto::new(b"test secret");
        let player = PlayerId::default();
        let claims = Claims::new(player, "Kelly".to_string(), false);
        let token = crypto.encode(&claims).unwrap();
        let decoded = crypto.decode(&token).unwrap();
        assert_eq!(decoded.user(), player);
        assert_eq!(decoded.display_name(), "Kelly");
        assert!(!decoded.temporary());
        assert!(!decoded.expired());
    }
    #[test]
    fn foreign_tokens_are_rejected() {
        let ours = Crypto::new(b"ours");
        let theirs = Crypto::new(b"theirs");
        let claims = Claims::new(PlayerId::default(), "Kelly".to_string(), true);
        let token = theirs.encode(&claims).unwrap();
        assert!(ours.decode(&token).is_err());
    }
    #[test]
    fn stale_claims_read_as_expired() {
        let mut claims = Claims::new(PlayerId::default(), "Kelly".to_string(), false);
        claims.exp = claims.iat - 1;
        assert!(claims.expired());
    }
    #[test]
    fn passwords_round_trip() {
        let hashword = password::hash("correct horse battery").unwrap();
        assert!(password::verify("correct horse battery", &hashword));
        assert!(!password::verify("incorrect horse", &hashword));
        assert!(!password::verify("anything", "not a phc string"));
    }
    #[test]
    fn hashes_are_salted() {
        let one = password::hash("same password").unwrap();
        let two = password::hash("same password").unwrap();
        assert_ne!(one, two);
    }
}
