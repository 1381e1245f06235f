use super::StorageError;
use super::User;
use super::UserScore;
use gfl_core::PlayerId;
use gfl_core::Score;
use gfl_engine::ScoreSnapshot;
use gfl_engine::Scoreboard;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// The user directory and score store.
///
/// Independently synchronized behind a read/write lock; the engine
/// calls into it while holding its own lock, so every operation here
/// is a short in-memory critical section. Disk is only touched by
/// [`Store::save`] — on the flush tick and at shutdown — and by the
/// load at construction.
pub struct Store {
    path: Option<PathBuf>,
    data: RwLock<HashMap<PlayerId, UserScore>>,
}

impl Store {
    /// Opens the store, loading any previously saved scores. A missing
    /// or unreadable file starts the directory empty; scores are too
    /// low-stakes to refuse boot over.
    pub fn open(path: Option<PathBuf>) -> Self {
        let data = match &path {
            None => {
                log::info!("[store] no storage path provided, scores will not persist");
                HashMap::new()
            }
            Some(path) => match Self::load(path) {
                Ok(scores) => {
                    log::info!("[store] loaded {} scores from {}", scores.len(), path.display());
                    scores
                }
                Err(e) => {
                    log::warn!("[store] starting empty, cannot load {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
        };
        Self {
            path,
            data: RwLock::new(data),
        }
    }

    fn load(path: &PathBuf) -> Result<HashMap<PlayerId, UserScore>, StorageError> {
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let text = std::fs::read_to_string(path)?;
        let parsed: Vec<UserScore> = serde_json::from_str(&text)?;
        Ok(parsed.into_iter().map(|us| (us.user.id(), us)).collect())
    }

    /// Flushes every score to the backing file, if one was configured.
    pub fn save(&self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            log::debug!("[store] no storage path provided, skip writing scores");
            return Ok(());
        };
        let scores: Vec<UserScore> = self.read().values().cloned().collect();
        std::fs::write(path, serde_json::to_string(&scores)?)?;
        log::info!("[store] wrote {} scores to {}", scores.len(), path.display());
        Ok(())
    }

    /// Creates a user from a freshly assigned identifier. The closure
    /// builds the identity; the store enforces username uniqueness and
    /// starts the score at zero.
    pub fn add_user(&self, f: impl FnOnce(PlayerId) -> User) -> Result<User, StorageError> {
        let mut data = self.write();
        let user = f(PlayerId::default());
        Self::require_username_free(&data, &user)?;
        data.insert(user.id(), UserScore { user: user.clone(), score: 0 });
        log::info!("[store] added user {} ({})", user.id(), user.display_name());
        Ok(user)
    }

    /// Rewrites a stored identity. The closure may reject the change;
    /// the store re-checks username uniqueness on the result.
    pub fn update_user(
        &self,
        id: PlayerId,
        f: impl FnOnce(&User) -> Result<User, StorageError>,
    ) -> Result<User, StorageError> {
        let mut data = self.write();
        let entry = data.get(&id).ok_or(StorageError::UnknownUser(id))?;
        let updated = f(&entry.user)?;
        Self::require_username_free(&data, &updated)?;
        let score = entry.score;
        data.insert(id, UserScore { user: updated.clone(), score });
        Ok(updated)
    }

    /// Applies `f` to a stored score and returns the updated record.
    pub fn update_score(
        &self,
        id: PlayerId,
        f: impl FnOnce(Score) -> Score,
    ) -> Result<UserScore, StorageError> {
        let mut data = self.write();
        let entry = data.get_mut(&id).ok_or(StorageError::UnknownUser(id))?;
        entry.score = f(entry.score);
        Ok(entry.clone())
    }

    pub fn get(&self, id: PlayerId) -> Option<UserScore> {
        self.read().get(&id).cloned()
    }

    /// Case-insensitive username lookup over registered accounts. The
    /// filter typically verifies a password.
    pub fn find_user(&self, name: &str, filter: impl Fn(&User) -> bool) -> Option<User> {
        self.read()
            .values()
            .map(|entry| &entry.user)
            .find(|user| {
                user.credentials()
                    .map(|c| c.name.eq_ignore_ascii_case(name))
                    .unwrap_or(false)
                    && filter(user)
            })
            .cloned()
    }

    /// Number of known users, registered and temporary.
    pub fn population(&self) -> usize {
        self.read().len()
    }

    fn require_username_free(
        data: &HashMap<PlayerId, UserScore>,
        user: &User,
    ) -> Result<(), StorageError> {
        let Some(credentials) = user.credentials() else {
            return Ok(());
        };
        let clash = data.values().any(|entry| {
            entry.user.id() != user.id()
                && entry
                    .user
                    .credentials()
                    .map(|c| c.name.eq_ignore_ascii_case(&credentials.name))
                    .unwrap_or(false)
        });
        match clash {
            true => Err(StorageError::UsernameTaken(credentials.name.clone())),
            false => Ok(()),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<PlayerId, UserScore>> {
        self.data.read().expect("store lock poisoned")
    }
    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<PlayerId, UserScore>> {
        self.data.write().expect("store lock poisoned")
    }
}

/// The narrow surface the game engine consumes.
impl Scoreboard for Store {
    fn lookup(&self, id: PlayerId) -> Option<ScoreSnapshot> {
        self.get(id).map(|entry| ScoreSnapshot {
            display_name: entry.user.display_name().to_string(),
            score: entry.score,
        })
    }
    fn update_score(&self, id: PlayerId, f: &dyn Fn(Score) -> Score) -> Option<ScoreSnapshot> {
        Store::update_score(self, id, f).ok().map(|entry| ScoreSnapshot {
            display_name: entry.user.display_name().to_string(),
            score: entry.score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Credentials;

    fn regular(name: &str) -> impl FnOnce(PlayerId) -> User {
        let name = name.to_string();
        move |id| User::Regular {
            id,
            display_name: name.clone(),
            credentials: Credentials {
                name: name.to_lowercase(),
                hashword: "$argon2id$stub".to_string(),
            },
        }
    }

    #[test]
    fn adds_and_finds_users() {
        let store = Store::open(None);
        let user = store.add_user(regular("Kelly")).unwrap();
        assert_eq!(store.get(user.id()).unwrap().score, 0);
        assert_eq!(store.find_user("KELLY", |_| true).unwrap().id(), user.id());
        assert!(store.find_user("nobody", |_| true).is_none());
    }
    #[test]
    fn usernames_are_unique_case_insensitively() {
        let store = Store::open(None);
        store.add_user(regular("Kelly")).unwrap();
        assert!(matches!(
            store.add_user(regular("kElLy")),
            Err(StorageError::UsernameTaken(_))
        ));
    }
    #[test]
    fn temporary_users_skip_the_uniqueness_check() {
        let store = Store::open(None);
        let anonymous = |id| User::Temporary {
            id,
            display_name: "Anonymous".to_string(),
        };
        store.add_user(anonymous).unwrap();
        store.add_user(anonymous).unwrap();
        assert_eq!(store.population(), 2);
    }
    #[test]
    fn scores_accumulate() {
        let store = Store::open(None);
        let user = store.add_user(regular("Kelly")).unwrap();
        store.update_score(user.id(), |score| score + 6).unwrap();
        let updated = store.update_score(user.id(), |score| score + 6).unwrap();
        assert_eq!(updated.score, 12);
        assert!(store.update_score(PlayerId::default(), |s| s).is_err());
    }
    #[test]
    fn update_user_keeps_the_score() {
        let store = Store::open(None);
        let user = store.add_user(regular("Kelly")).unwrap();
        store.update_score(user.id(), |_| 9).unwrap();
        let renamed = store
            .update_user(user.id(), |u| Ok(u.clone().renamed("Kel".to_string())))
            .unwrap();
        assert_eq!(renamed.display_name(), "Kel");
        assert_eq!(store.get(user.id()).unwrap().score, 9);
    }
    #[test]
    fn scoreboard_surface_matches_directory() {
        let store = Store::open(None);
        let user = store.add_user(regular("Kelly")).unwrap();
        let snapshot = Scoreboard::lookup(&store, user.id()).unwrap();
        assert_eq!(snapshot.display_name, "Kelly");
        assert_eq!(snapshot.score, 0);
        let credited = Scoreboard::update_score(&store, user.id(), &|s| s + 3).unwrap();
        assert_eq!(credited.score, 3);
    }
    #[test]
    fn scores_survive_a_round_trip() {
        let path = std::env::temp_dir().join(format!("gridfall-scores-{}.json", PlayerId::default()));
        let store = Store::open(Some(path.clone()));
        let user = store.add_user(regular("Kelly")).unwrap();
        store.update_score(user.id(), |_| 21).unwrap();
        store.save().unwrap();
        let reloaded = Store::open(Some(path.clone()));
        assert_eq!(reloaded.get(user.id()).unwrap().score, 21);
        assert_eq!(reloaded.population(), 1);
        let _ = std::fs::remove_file(path);
    }
    #[test]
    fn corrupt_files_start_empty() {
        let path = std::env::temp_dir().join(format!("gridfall-corrupt-{}.json", PlayerId::default()));
        std::fs::write(&path, "not json at all").unwrap();
        let store = Store::open(Some(path.clone()));
        assert_eq!(store.population(), 0);
        let _ = std::fs::remove_file(path);
    }
}
