/// Credential and account-state failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A required field was empty or whitespace.
    Blank(&'static str),
    /// Password too short to accept.
    WeakPassword,
    /// Unknown username or wrong password — deliberately indistinct.
    BadCredentials,
    /// Password hashing failed.
    Hash,
    /// Token signing or verification failed.
    Token,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank(field) => write!(f, "{} may not be blank", field),
            Self::WeakPassword => write!(f, "password must be at least 8 characters"),
            Self::BadCredentials => write!(f, "invalid credentials"),
            Self::Hash => write!(f, "could not hash password"),
            Self::Token => write!(f, "invalid token"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Rejects empty or all-whitespace input before it reaches the store.
pub fn require_filled(value: &str, field: &'static str) -> Result<(), AuthError> {
    match value.trim().is_empty() {
        true => Err(AuthError::Blank(field)),
        false => Ok(()),
    }
}
