use thiserror::Error;

/// Rejected user input. The message is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Bad value received for number of players, please try again with a number")]
    InvalidPlayerCount,

    #[error("Bad value received for winner, expect format of 'PlayerName wins'")]
    InvalidWinner,
}

const WINS_SUFFIX: &str = " wins";

/// Parses a line holding the number of players
pub fn parse_player_count(line: &str) -> Result<i32, InputError> {
    line.trim()
        .parse::<i32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or(InputError::InvalidPlayerCount)
}

/// Parses a `<name> wins` line into the winner's name
pub fn parse_winner(line: &str) -> Result<String, InputError> {
    let name = line
        .trim_end()
        .strip_suffix(WINS_SUFFIX)
        .ok_or(InputError::InvalidWinner)?;
    parse_winner_name(name)
}

/// Validates a bare winner name
pub fn parse_winner_name(name: &str) -> Result<String, InputError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InputError::InvalidWinner);
    }
    Ok(name.to_string())
}
