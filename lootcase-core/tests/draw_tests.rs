// File: lootcase-core/tests/draw_tests.rs

mod helpers;

use std::collections::HashMap;

use lootcase_core::draw::{draw_prize, draw_weighted, SeededRandom, TierTable};
use lootcase_core::models::{LootCase, Prize, Rarity};
use lootcase_core::test_utils::ScriptedRandom;
use lootcase_core::Error;

use helpers::forty_sixty_case;

#[test]
fn catalog_draw_scenario() {
    let case = forty_sixty_case("c");

    let rng = ScriptedRandom::constant(0.399999);
    assert_eq!(draw_prize(&case, &rng).unwrap().id, "a");

    let rng = ScriptedRandom::constant(0.40);
    assert_eq!(draw_prize(&case, &rng).unwrap().id, "b");
}

#[test]
fn free_case_table_scenario() {
    let table = TierTable::free_case();

    let rng = ScriptedRandom::constant(0.39);
    let prize = table.draw(&rng, "free_case").unwrap();
    assert_eq!(prize.value, 10);
    assert_eq!(prize.rarity, Rarity::Common);

    let rng = ScriptedRandom::constant(0.40);
    assert_eq!(table.draw(&rng, "free_case").unwrap().value, 30);
}

#[test]
fn every_threshold_is_closed_on_the_left() {
    // Cumulative bounds 10, 30, 60, 100 over a total of 100.
    let entries = [("w", 10.0), ("x", 20.0), ("y", 30.0), ("z", 40.0)];
    let eps = 1e-9;

    let cases: &[(f64, &str)] = &[
        (0.0, "w"),
        (0.10 - eps, "w"),
        (0.10, "x"),
        (0.30 - eps, "x"),
        (0.30, "y"),
        (0.60 - eps, "y"),
        (0.60, "z"),
        (1.0 - eps, "z"),
    ];

    for (sample, expected) in cases {
        let rng = ScriptedRandom::constant(*sample);
        let got = draw_weighted(&entries, &rng, "boundaries").unwrap();
        assert_eq!(got, expected, "sample {}", sample);
    }
}

#[test]
fn order_decides_ties_not_ids() {
    let case = LootCase::new("c", "Reordered", Rarity::Common).with_prizes(vec![
        Prize::new("b", "Prize B", Rarity::Rare, 20, 60.0),
        Prize::new("a", "Prize A", Rarity::Common, 10, 40.0),
    ]);

    let rng = ScriptedRandom::constant(0.5);
    assert_eq!(draw_prize(&case, &rng).unwrap().id, "b");
    let rng = ScriptedRandom::constant(0.6);
    assert_eq!(draw_prize(&case, &rng).unwrap().id, "a");
}

#[test]
fn empty_pools_never_return_a_prize() {
    let empty = LootCase::new("empty", "Empty", Rarity::Common);
    let zeros = LootCase::new("zeros", "Zeros", Rarity::Common).with_prizes(vec![
        Prize::new("p", "Nothing", Rarity::Common, 1, 0.0),
        Prize::new("q", "Nothing either", Rarity::Common, 1, 0.0),
    ]);
    let negative = LootCase::new("neg", "Negative", Rarity::Common)
        .with_prizes(vec![Prize::new("p", "Broken", Rarity::Common, 1, -5.0)]);

    for sample in [0.0, 0.5, 0.999] {
        let rng = ScriptedRandom::constant(sample);
        for case in [&empty, &zeros, &negative] {
            match draw_prize(case, &rng) {
                Err(Error::EmptyPool(id)) => assert_eq!(id, case.id),
                other => panic!("expected EmptyPool for '{}', got {:?}", case.id, other),
            }
        }
    }

    let rng = ScriptedRandom::constant(0.5);
    let no_entries: [(&str, f64); 0] = [];
    assert!(matches!(draw_weighted(&no_entries, &rng, "nothing"), Err(Error::EmptyPool(_))));
    assert!(matches!(TierTable::new(Vec::new()).draw(&rng, "t"), Err(Error::EmptyPool(_))));
}

#[test]
fn frequencies_follow_weights() {
    let case = LootCase::new("stats", "Stats", Rarity::Epic).with_prizes(vec![
        Prize::new("common", "Common", Rarity::Common, 1, 50.0),
        Prize::new("rare", "Rare", Rarity::Rare, 1, 30.0),
        Prize::new("epic", "Epic", Rarity::Epic, 1, 20.0),
    ]);
    let rng = SeededRandom::new(0x5eed);
    let draws = 10_000;

    let mut counts: HashMap<String, u32> = HashMap::new();
    for _ in 0..draws {
        let prize = draw_prize(&case, &rng).unwrap();
        *counts.entry(prize.id.clone()).or_default() += 1;
    }

    let total_weight = case.total_weight();
    let chi_square: f64 = case
        .prizes
        .iter()
        .map(|p| {
            let expected = draws as f64 * p.drop_chance / total_weight;
            let observed = *counts.get(&p.id).unwrap_or(&0) as f64;
            (observed - expected).powi(2) / expected
        })
        .sum();

    // Two degrees of freedom, p = 0.001.
    assert!(chi_square < 13.816, "chi-square {} too large: {:?}", chi_square, counts);
}
