//! The mock reward catalog the portal ships with.

use lootcase_common::models::{GlowIntensity, LootCase, Prize, PrizeImage, PrizeKind, Rarity};

pub fn default_prizes() -> Vec<Prize> {
    vec![
        Prize::new("prize_coins_small", "Handful of Coins", Rarity::Common, 25, 50.0)
            .with_image(PrizeImage::Glyph("🪙".to_string()))
            .with_description("A few coins for the shop."),
        Prize::new("prize_coffee", "Coffee Voucher", Rarity::Common, 50, 40.0)
            .with_kind(PrizeKind::Item)
            .with_image(PrizeImage::Glyph("☕".to_string()))
            .with_description("One drink at the office cafe."),
        Prize::new("prize_coins_bag", "Bag of Coins", Rarity::Rare, 100, 25.0)
            .with_image(PrizeImage::Glyph("💰".to_string())),
        Prize::new("prize_xp_boost", "XP Boost", Rarity::Epic, 250, 15.0)
            .with_kind(PrizeKind::Experience)
            .with_image(PrizeImage::Glyph("⚡".to_string()))
            .with_description("Experience towards the next achievement level."),
        Prize::new("prize_gift_card", "Gift Card", Rarity::Legendary, 1000, 8.0)
            .with_kind(PrizeKind::Item)
            .with_image(PrizeImage::Glyph("🎁".to_string())),
        Prize::new("prize_day_off", "Extra Day Off", Rarity::Mythic, 5000, 2.0)
            .with_kind(PrizeKind::Item)
            .with_image(PrizeImage::Glyph("🏝️".to_string()))
            .with_description("One additional paid day off."),
    ]
}

pub fn default_cases() -> Vec<LootCase> {
    let prizes = default_prizes();
    let pick = |ids: &[&str]| -> Vec<Prize> {
        ids.iter()
            .filter_map(|id| prizes.iter().find(|p| p.id == *id).cloned())
            .collect()
    };

    let mut starter = LootCase::new("case_starter", "Starter Case", Rarity::Common)
        .with_cooldown_secs(24 * 3600)
        .with_prizes(pick(&["prize_coins_small", "prize_coffee", "prize_coins_bag"]));
    starter.description = "Free once a day.".to_string();
    starter.glow_intensity = GlowIntensity::Low;

    let mut rare = LootCase::new("case_rare", "Rare Case", Rarity::Rare)
        .with_price(500)
        .with_prizes(pick(&["prize_coins_bag", "prize_xp_boost", "prize_gift_card"]));
    rare.image = PrizeImage::Glyph("🧰".to_string());

    let mut mythic = LootCase::new("case_mythic", "Mythic Case", Rarity::Mythic)
        .with_price(5000)
        .with_prizes(pick(&["prize_gift_card", "prize_day_off"]))
        .inactive();
    mythic.glow_intensity = GlowIntensity::High;

    vec![starter, rare, mythic]
}
