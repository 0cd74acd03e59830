// src/repositories/mod.rs

pub use lootcase_common::traits::repository_traits::{
    BalanceRepository,
    CatalogRepository,
    CooldownRepository,
};

pub use memory::{
    InMemoryBalanceRepository,
    InMemoryCatalogRepository,
    InMemoryCooldownRepository,
};
pub use postgres::{
    PostgresBalanceRepository,
    PostgresCatalogRepository,
    PostgresCooldownRepository,
};

pub mod memory;
pub mod postgres;
