use serde::{Deserialize, Serialize};

use super::StoreError;

/// A player and the number of games they have won.
///
/// Serialized with the capitalised field names used by the league file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Wins")]
    pub wins: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, wins: u32) -> Self {
        Self {
            name: name.into(),
            wins,
        }
    }
}

/// Ranked collection of players, unique by name.
///
/// Decoding rejects a list that names the same player twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Player>", into = "Vec<Player>")]
pub struct League(Vec<Player>);

impl League {
    /// Builds a league, merging repeated names by summing their wins.
    pub fn new(players: Vec<Player>) -> Self {
        let mut league = Self(Vec::with_capacity(players.len()));
        for player in players {
            match league.0.iter_mut().find(|p| p.name == player.name) {
                Some(existing) => existing.wins = existing.wins.saturating_add(player.wins),
                None => league.0.push(player),
            }
        }
        league
    }

    pub fn find(&self, name: &str) -> Option<&Player> {
        self.0.iter().find(|p| p.name == name)
    }

    /// Increments the named player's wins, adding them with one win if unknown.
    /// Returns the player's new win count.
    pub fn record_win(&mut self, name: &str) -> u32 {
        match self.0.iter_mut().find(|p| p.name == name) {
            Some(player) => {
                player.wins = player.wins.saturating_add(1);
                player.wins
            }
            None => {
                self.0.push(Player::new(name, 1));
                1
            }
        }
    }

    /// Sorts by wins descending. The sort is stable, so ties keep their order.
    pub fn rank(&mut self) {
        self.0.sort_by(|a, b| b.wins.cmp(&a.wins));
    }

    /// Returns a copy sorted by wins descending.
    pub fn ranked(&self) -> League {
        let mut league = self.clone();
        league.rank();
        league
    }

    pub fn players(&self) -> &[Player] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_players(self) -> Vec<Player> {
        self.0
    }
}

impl FromIterator<Player> for League {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl TryFrom<Vec<Player>> for League {
    type Error = StoreError;

    fn try_from(players: Vec<Player>) -> Result<Self, Self::Error> {
        for (i, player) in players.iter().enumerate() {
            if players[..i].iter().any(|p| p.name == player.name) {
                return Err(StoreError::Corrupt(format!(
                    "player {:?} appears more than once",
                    player.name
                )));
            }
        }
        Ok(Self(players))
    }
}

impl From<League> for Vec<Player> {
    fn from(league: League) -> Self {
        league.0
    }
}
