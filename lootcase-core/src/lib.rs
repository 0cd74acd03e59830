// src/lib.rs

pub mod clock;
pub mod config;
pub mod cooldown;
pub mod db;
pub mod draw;
pub mod repositories;
pub mod seed;
pub mod services;
pub mod test_utils;

pub use db::{Database, DbSettings};
pub use lootcase_common::error::Error;
pub use lootcase_common::models;
pub use lootcase_common::traits;
