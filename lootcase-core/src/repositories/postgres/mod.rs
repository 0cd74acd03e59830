// src/repositories/postgres/mod.rs

pub mod balance;
pub mod catalog;
pub mod cooldown;

pub use balance::PostgresBalanceRepository;
pub use catalog::PostgresCatalogRepository;
pub use cooldown::PostgresCooldownRepository;
