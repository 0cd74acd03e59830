pub mod repository_traits;
pub mod runtime_traits;

pub use repository_traits::{BalanceRepository, CatalogRepository, CooldownRepository};
pub use runtime_traits::{Clock, RandomSource};
