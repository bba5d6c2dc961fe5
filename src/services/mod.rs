// Service exports
pub mod memory;
pub mod postgres;
pub mod preferences;
pub mod recommendations;
pub mod store;

pub use memory::{MemoryStore, NewUser};
pub use postgres::PostgresStore;
pub use preferences::PreferenceService;
pub use recommendations::RecommendationEngine;
pub use store::{PreferenceStore, StoreError, UserDirectory};
