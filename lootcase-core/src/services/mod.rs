pub mod catalog_service;
pub mod reward_service;

pub use catalog_service::CatalogService;
pub use reward_service::RewardService;
