//! Process-local stores. Used by the CLI when no database is configured and
//! by most tests.

pub mod balance;
pub mod catalog;
pub mod cooldown;

pub use balance::InMemoryBalanceRepository;
pub use catalog::InMemoryCatalogRepository;
pub use cooldown::InMemoryCooldownRepository;
