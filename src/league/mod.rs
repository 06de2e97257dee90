pub mod models;
pub mod repository;

mod errors;

pub use errors::StoreError;
pub use models::{League, Player};
pub use repository::{
    FileSystemPlayerStore, InMemoryPlayerStore, PlayerStore, PostgresPlayerStore,
};
