use std::collections::HashMap;

use tracing::debug;

use lootcase_common::models::{CooldownKey, RewardOutcome};
use lootcase_core::cooldown::GateState;
use lootcase_core::draw;
use lootcase_core::Error;

use crate::context::AppContext;
use crate::Command;

pub async fn run(ctx: &AppContext, command: &Command, json: bool) -> Result<(), Error> {
    match command {
        Command::ListCases => list_cases(ctx).await,
        Command::OpenCase { case_id, times } => {
            open_repeatedly(ctx, &CooldownKey::Case(case_id.clone()), *times, json).await
        }
        Command::FreeCase { times } => open_repeatedly(ctx, &CooldownKey::FreeCase, *times, json).await,
        Command::FreeWheel { times } => open_repeatedly(ctx, &CooldownKey::FreeWheel, *times, json).await,
        Command::Status => status(ctx).await,
        Command::Simulate { case_id, draws } => simulate(ctx, case_id, *draws).await,
        Command::SeedCatalog => {
            let written = ctx.catalog.seed_default_catalog().await?;
            println!("Seeded {} cases.", written);
            Ok(())
        }
    }
}

async fn list_cases(ctx: &AppContext) -> Result<(), Error> {
    let cases = ctx.catalog.list_active_cases().await?;
    if cases.is_empty() {
        println!("No cases on offer.");
        return Ok(());
    }
    for case in cases {
        let price = if case.price == 0 { "free".to_string() } else { format!("{} coins", case.price) };
        println!(
            "{} {} [{}] {} | {} prizes worth {} | {}",
            case.image.to_source_string(),
            case.name,
            case.id,
            case.rarity,
            case.prizes.len(),
            case.content_value(),
            price
        );
        for prize in &case.prizes {
            let share = prize.effective_weight() / case.total_weight() * 100.0;
            println!(
                "    {:<20} {:<9} {:>6} {:<10} {:5.1}%",
                prize.name, prize.rarity, prize.value, prize.kind, share
            );
        }
    }
    Ok(())
}

async fn open_once(ctx: &AppContext, key: &CooldownKey) -> Result<RewardOutcome, Error> {
    match key {
        CooldownKey::Case(case_id) => ctx.rewards.open_case(ctx.subject_id, case_id).await,
        CooldownKey::FreeCase => ctx.rewards.open_free_case(ctx.subject_id).await,
        CooldownKey::FreeWheel => ctx.rewards.spin_free_wheel(ctx.subject_id).await,
    }
}

/// User-facing refusals are printed and the loop goes on; anything else stops it.
async fn open_repeatedly(ctx: &AppContext, key: &CooldownKey, times: u32, json: bool) -> Result<(), Error> {
    for attempt in 1..=times {
        match open_once(ctx, key).await {
            Ok(outcome) => print_outcome(&outcome, json)?,
            Err(e) if e.is_user_facing() => println!("#{} refused: {}", attempt, e),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn print_outcome(outcome: &RewardOutcome, json: bool) -> Result<(), Error> {
    if json {
        println!("{}", serde_json::to_string(outcome)?);
        return Ok(());
    }
    let next = match outcome.next_available_at {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "now".to_string(),
    };
    println!(
        "{} => {} ({}, {} {}) | delta {:+} | balance {} | next {}",
        outcome.source,
        outcome.prize.name,
        outcome.prize.rarity,
        outcome.prize.value,
        outcome.prize.kind,
        outcome.balance_delta,
        outcome.new_balance,
        next
    );
    Ok(())
}

fn describe(state: &GateState) -> String {
    match state {
        GateState::Available => "available".to_string(),
        GateState::OnCooldown { remaining } => {
            let secs = remaining.num_seconds();
            format!("on cooldown, {}h {:02}m {:02}s left", secs / 3600, (secs % 3600) / 60, secs % 60)
        }
    }
}

async fn status(ctx: &AppContext) -> Result<(), Error> {
    let balance = ctx.balances.get_balance(ctx.subject_id).await?;
    println!("Subject {} | balance {}", ctx.subject_id, balance);

    let mut keys = vec![CooldownKey::FreeCase, CooldownKey::FreeWheel];
    for case in ctx.catalog.list_active_cases().await? {
        keys.push(CooldownKey::Case(case.id));
    }
    for key in keys {
        let state = ctx.rewards.cooldown_status(ctx.subject_id, &key).await?;
        println!("    {:<24} {}", key, describe(&state));
    }
    Ok(())
}

/// Pure draws against the case pool; shows observed against configured odds.
async fn simulate(ctx: &AppContext, case_id: &str, draws: u32) -> Result<(), Error> {
    let case = ctx.catalog.get_case(case_id).await?;
    let total = case.total_weight();
    debug!("Simulating {} draws from '{}' (total weight {})", draws, case.id, total);

    let mut counts: HashMap<&str, u32> = HashMap::new();
    for _ in 0..draws {
        let prize = draw::draw_prize(&case, &*ctx.rng)?;
        *counts.entry(prize.id.as_str()).or_default() += 1;
    }

    println!("{} draws from {} ({})", draws, case.name, case.id);
    for prize in &case.prizes {
        let hits = counts.get(prize.id.as_str()).copied().unwrap_or(0);
        let observed = f64::from(hits) / f64::from(draws.max(1)) * 100.0;
        let expected = prize.effective_weight() / total * 100.0;
        println!(
            "    {:<20} {:>7} hits {:6.2}% (expected {:6.2}%)",
            prize.name, hits, observed, expected
        );
    }
    Ok(())
}
