// File: lootcase-core/tests/catalog_service_tests.rs

mod helpers;

use std::sync::Arc;

use chrono::Duration;

use lootcase_core::clock::ManualClock;
use lootcase_core::models::{LootCase, Prize, Rarity};
use lootcase_core::repositories::InMemoryCatalogRepository;
use lootcase_core::services::CatalogService;
use lootcase_core::Error;

use helpers::{forty_sixty_case, t0};

fn catalog() -> (CatalogService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(t0()));
    let service = CatalogService::new(Arc::new(InMemoryCatalogRepository::new()), clock.clone());
    (service, clock)
}

#[tokio::test]
async fn active_listing_hides_inactive_and_undrawable_cases() {
    let (catalog, _) = catalog();
    catalog.upsert_case(forty_sixty_case("live")).await.unwrap();
    catalog.upsert_case(forty_sixty_case("off").inactive()).await.unwrap();
    catalog
        .upsert_case(LootCase::new("empty", "Empty", Rarity::Common))
        .await
        .unwrap();
    catalog
        .upsert_case(
            LootCase::new("zeros", "Zeros", Rarity::Common)
                .with_prizes(vec![Prize::new("z", "Zero", Rarity::Common, 1, 0.0)]),
        )
        .await
        .unwrap();

    let ids: Vec<String> = catalog
        .list_active_cases()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec!["live".to_string()]);
    assert_eq!(catalog.list_cases().await.unwrap().len(), 4);
}

#[tokio::test]
async fn prizes_of_returns_the_pool_in_order() {
    let (catalog, _) = catalog();
    catalog.upsert_case(forty_sixty_case("c")).await.unwrap();

    let ids: Vec<String> = catalog.prizes_of("c").await.unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    assert!(matches!(catalog.prizes_of("nope").await, Err(Error::UnknownCase(_))));
}

#[tokio::test]
async fn deleting_a_prize_removes_it_from_every_case() {
    let (catalog, _) = catalog();
    catalog.upsert_case(forty_sixty_case("one")).await.unwrap();
    catalog.upsert_case(forty_sixty_case("two")).await.unwrap();
    assert_eq!(catalog.list_prizes().await.unwrap().len(), 2);

    catalog.delete_prize("a").await.unwrap();

    for id in ["one", "two"] {
        let case = catalog.get_case(id).await.unwrap();
        assert!(!case.contains_prize("a"));
        assert!(case.contains_prize("b"));
    }
    assert!(matches!(catalog.delete_prize("a").await, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn editing_a_prize_updates_embedded_copies() {
    let (catalog, _) = catalog();
    catalog.upsert_case(forty_sixty_case("c")).await.unwrap();

    catalog
        .upsert_prize(Prize::new("a", "Renamed A", Rarity::Epic, 99, 5.0))
        .await
        .unwrap();

    let case = catalog.get_case("c").await.unwrap();
    let a = case.prizes.iter().find(|p| p.id == "a").unwrap();
    assert_eq!(a.name, "Renamed A");
    assert_eq!(a.value, 99);
    assert_eq!(case.total_weight(), 65.0);
}

#[tokio::test]
async fn invalid_records_are_refused() {
    let (catalog, _) = catalog();

    let bad_prize = Prize::new("p", "Bad", Rarity::Common, 1, -1.0);
    assert!(matches!(catalog.upsert_prize(bad_prize).await, Err(Error::InvalidPrize(_))));

    let bad_case = forty_sixty_case("c").with_price(-5);
    assert!(matches!(catalog.upsert_case(bad_case).await, Err(Error::InvalidCase(_))));

    let nameless = LootCase::new("c", " ", Rarity::Common);
    assert!(matches!(catalog.upsert_case(nameless).await, Err(Error::InvalidCase(_))));

    assert!(catalog.list_cases().await.unwrap().is_empty());
}

#[tokio::test]
async fn generated_ids_follow_the_clock_and_never_collide() {
    let (catalog, clock) = catalog();
    let millis = t0().timestamp_millis();

    let first = catalog
        .create_case(LootCase::new("", "First", Rarity::Common))
        .await
        .unwrap();
    assert_eq!(first.id, format!("case_{}", millis));

    let second = catalog
        .create_case(LootCase::new("", "Second", Rarity::Common))
        .await
        .unwrap();
    assert_eq!(second.id, format!("case_{}", millis + 1));

    clock.advance(Duration::seconds(1));
    let prize = catalog
        .create_prize(Prize::new("", "Fresh", Rarity::Rare, 10, 1.0))
        .await
        .unwrap();
    assert_eq!(prize.id, format!("prize_{}", millis + 1000));

    let kept = catalog
        .create_case(LootCase::new("named", "Named", Rarity::Common))
        .await
        .unwrap();
    assert_eq!(kept.id, "named");
}

#[tokio::test]
async fn toggling_and_deleting_cases() {
    let (catalog, _) = catalog();
    catalog.upsert_case(forty_sixty_case("c")).await.unwrap();

    catalog.set_case_active("c", false).await.unwrap();
    assert!(catalog.list_active_cases().await.unwrap().is_empty());
    catalog.set_case_active("c", true).await.unwrap();
    assert_eq!(catalog.list_active_cases().await.unwrap().len(), 1);

    catalog.delete_case("c").await.unwrap();
    assert!(matches!(catalog.get_case("c").await, Err(Error::UnknownCase(_))));
    assert!(matches!(catalog.delete_case("c").await, Err(Error::NotFound(_))));
    assert!(matches!(catalog.set_case_active("c", true).await, Err(Error::NotFound(_))));

    // Prizes outlive the case that introduced them.
    assert_eq!(catalog.list_prizes().await.unwrap().len(), 2);
}

#[tokio::test]
async fn seeding_only_fills_an_empty_catalog() {
    let (catalog, _) = catalog();

    assert_eq!(catalog.seed_default_catalog().await.unwrap(), 3);
    assert_eq!(catalog.seed_default_catalog().await.unwrap(), 0);

    let active: Vec<String> = catalog
        .list_active_cases()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(active, vec!["case_starter".to_string(), "case_rare".to_string()]);
    assert_eq!(catalog.list_prizes().await.unwrap().len(), 6);
}
