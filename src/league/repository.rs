use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use super::{League, Player, StoreError};

/// Durable record of wins, ranked on read.
///
/// Implementations must serialize their read-modify-write of a player's
/// wins so concurrent games never lose a recorded win.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Increments the player's wins, creating them with one win if unknown.
    /// The win is persisted before this returns.
    async fn record_win(&self, name: &str) -> Result<(), StoreError>;

    /// Returns the player's wins, or 0 for a player who never won.
    async fn get_player_score(&self, name: &str) -> Result<u32, StoreError>;

    /// Returns every player sorted by wins descending.
    async fn get_league(&self) -> Result<League, StoreError>;
}

/// In-memory implementation of PlayerStore for development and testing.
/// Data is lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryPlayerStore {
    league: RwLock<League>,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given players
    pub fn with_players(players: Vec<Player>) -> Self {
        Self {
            league: RwLock::new(League::new(players)),
        }
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    #[instrument(skip(self))]
    async fn record_win(&self, name: &str) -> Result<(), StoreError> {
        let mut league = self.league.write().await;
        let wins = league.record_win(name);
        debug!(player = %name, wins = wins, "Recorded win in memory");
        Ok(())
    }

    async fn get_player_score(&self, name: &str) -> Result<u32, StoreError> {
        let league = self.league.read().await;
        Ok(league.find(name).map(|p| p.wins).unwrap_or(0))
    }

    async fn get_league(&self) -> Result<League, StoreError> {
        let league = self.league.read().await;
        Ok(league.ranked())
    }
}

/// PlayerStore backed by a JSON file holding an array of `{"Name", "Wins"}`.
///
/// The league is cached in memory behind a mutex; every win rewrites the
/// whole file through a temporary sibling and an atomic rename.
pub struct FileSystemPlayerStore {
    path: PathBuf,
    league: Mutex<League>,
}

impl FileSystemPlayerStore {
    /// Opens the league file at `path`, creating it when missing.
    /// An empty file is initialised with an empty league.
    #[instrument(skip_all)]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let contents = match tokio::fs::read(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read league file");
                return Err(StoreError::Io(e));
            }
        };

        let store = if contents.iter().all(u8::is_ascii_whitespace) {
            info!(path = %path.display(), "Initialising empty league file");
            let store = Self {
                path,
                league: Mutex::new(League::default()),
            };
            store.persist(&League::default()).await?;
            store
        } else {
            let mut league: League = serde_json::from_slice(&contents).map_err(|e| {
                warn!(error = %e, "League file is not a valid league");
                StoreError::Corrupt(e.to_string())
            })?;
            league.rank();
            info!(path = %path.display(), players = league.len(), "Loaded league file");
            Self {
                path,
                league: Mutex::new(league),
            }
        };

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn persist(&self, league: &League) -> Result<(), StoreError> {
        let json = serde_json::to_vec(league).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let temp_path = self.temp_path();
        let mut file = tokio::fs::File::create(&temp_path).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl PlayerStore for FileSystemPlayerStore {
    #[instrument(skip(self))]
    async fn record_win(&self, name: &str) -> Result<(), StoreError> {
        let mut league = self.league.lock().await;

        // Only adopt the new league once it is on disk.
        let mut updated = league.clone();
        let wins = updated.record_win(name);
        self.persist(&updated).await.map_err(|e| {
            warn!(player = %name, error = %e, "Failed to persist win");
            e
        })?;
        *league = updated;

        debug!(player = %name, wins = wins, "Recorded win in league file");
        Ok(())
    }

    async fn get_player_score(&self, name: &str) -> Result<u32, StoreError> {
        let league = self.league.lock().await;
        Ok(league.find(name).map(|p| p.wins).unwrap_or(0))
    }

    async fn get_league(&self) -> Result<League, StoreError> {
        let league = self.league.lock().await;
        Ok(league.ranked())
    }
}

/// PostgreSQL implementation of PlayerStore
pub struct PostgresPlayerStore {
    pool: PgPool,
}

impl PostgresPlayerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the players table if it does not exist yet
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS players (name TEXT PRIMARY KEY, wins INTEGER NOT NULL DEFAULT 0)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create players table");
            StoreError::Database(e.to_string())
        })?;
        Ok(())
    }
}

#[async_trait]
impl PlayerStore for PostgresPlayerStore {
    #[instrument(skip(self))]
    async fn record_win(&self, name: &str) -> Result<(), StoreError> {
        // Single statement, so concurrent increments cannot be lost.
        sqlx::query(
            "INSERT INTO players (name, wins) VALUES ($1, 1) ON CONFLICT (name) DO UPDATE SET wins = players.wins + 1",
        )
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, player = %name, "Failed to record win in database");
            StoreError::Database(e.to_string())
        })?;

        debug!(player = %name, "Recorded win in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_player_score(&self, name: &str) -> Result<u32, StoreError> {
        let row = sqlx::query("SELECT wins FROM players WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, player = %name, "Failed to fetch player score");
                StoreError::Database(e.to_string())
            })?;

        Ok(row
            .map(|row| row.get::<i32, _>("wins").max(0) as u32)
            .unwrap_or(0))
    }

    #[instrument(skip(self))]
    async fn get_league(&self) -> Result<League, StoreError> {
        let rows = sqlx::query("SELECT name, wins FROM players ORDER BY wins DESC, name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch league");
                StoreError::Database(e.to_string())
            })?;

        Ok(rows
            .into_iter()
            .map(|row| {
                Player::new(
                    row.get::<String, _>("name"),
                    row.get::<i32, _>("wins").max(0) as u32,
                )
            })
            .collect())
    }
}
