// Public API
pub use driver::{Cli, PLAYER_PROMPT};
pub use parser::{parse_player_count, parse_winner, parse_winner_name, InputError};

// Internal modules
mod driver;
mod parser;
