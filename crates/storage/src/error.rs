use gfl_core::PlayerId;

/// Failures raised by the user directory and score store.
#[derive(Debug)]
pub enum StorageError {
    /// No entry for the given identifier.
    UnknownUser(PlayerId),
    /// The requested username already belongs to another account.
    UsernameTaken(String),
    /// A temporary account was asked for something only registered
    /// accounts can do.
    NotRegistered,
    /// The account is already registered.
    AlreadyRegistered,
    /// Reading or writing the backing file failed.
    Io(std::io::Error),
    /// The backing file held something that is not a score list.
    Codec(serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownUser(id) => write!(f, "no user with identifier {}", id),
            Self::UsernameTaken(name) => write!(f, "username '{}' already in use", name),
            Self::NotRegistered => write!(f, "account is not registered"),
            Self::AlreadyRegistered => write!(f, "account is already registered"),
            Self::Io(e) => write!(f, "storage io failure: {}", e),
            Self::Codec(e) => write!(f, "storage encoding failure: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Codec(e)
    }
}
