use std::time::Duration;

/// Chip values of each blind level, in order. The schedule stops after the last.
pub const BLIND_AMOUNTS: [u32; 11] = [100, 200, 300, 400, 500, 600, 800, 1000, 2000, 4000, 8000];

/// Units added to the player count to get the spacing between levels.
pub const DEFAULT_BASE_MINUTES: u32 = 5;

/// Configuration for blind escalation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlindConfig {
    /// Constant added to the player count before scaling by `unit`
    pub base_minutes: u32,
    /// Length of one step of spacing, normally one minute
    pub unit: Duration,
    /// Blind amounts, raised in this order
    pub amounts: Vec<u32>,
}

impl Default for BlindConfig {
    fn default() -> Self {
        Self {
            base_minutes: DEFAULT_BASE_MINUTES,
            unit: Duration::from_secs(60),
            amounts: BLIND_AMOUNTS.to_vec(),
        }
    }
}

impl BlindConfig {
    /// Spacing between consecutive levels: `unit * (base_minutes + players)`.
    /// Returns `None` when there are no players to schedule for, or when the
    /// spacing would be zero and every level would fall due at once.
    pub fn increment_for(&self, number_of_players: i32) -> Option<Duration> {
        let players = u32::try_from(number_of_players).ok().filter(|n| *n > 0)?;
        let steps = self.base_minutes.saturating_add(players);
        let increment = self.unit.checked_mul(steps).unwrap_or(Duration::MAX);
        (!increment.is_zero()).then_some(increment)
    }
}

/// One blind level, due `offset` after the game started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlindLevel {
    pub offset: Duration,
    pub amount: u32,
}

/// Ordered blind levels for one game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlindSchedule {
    levels: Vec<BlindLevel>,
}

impl BlindSchedule {
    /// Computes the schedule for a table of `number_of_players`.
    ///
    /// The first level is due immediately and each following level is one
    /// increment later. A count below one, or a zero `unit`, yields an empty
    /// schedule.
    pub fn for_players(number_of_players: i32, config: &BlindConfig) -> Self {
        let Some(increment) = config.increment_for(number_of_players) else {
            return Self::default();
        };

        let mut offset = Duration::ZERO;
        let levels = config
            .amounts
            .iter()
            .map(|&amount| {
                let level = BlindLevel { offset, amount };
                offset = offset.saturating_add(increment);
                level
            })
            .collect();

        Self { levels }
    }

    pub fn levels(&self) -> &[BlindLevel] {
        &self.levels
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlindLevel> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
