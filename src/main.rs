//! Colony Guards - sandbox runner
//!
//! Builds a small colony with a guard tower, enlists guards, scatters
//! hostiles around it and runs the guards for a number of ticks.

use std::path::{Path, PathBuf};

use clap::Parser;
use colony_guards::core::error::{GuardError, Result};
use colony_guards::core::types::{BuildingId, ColonyId, Position, Tick};
use colony_guards::core::GuardConfig;
use colony_guards::entity::{
    ArmorSlot, CreatureAttribute, Enchantments, EntityKind, GuardAgent, Inventory, ItemStack,
};
use colony_guards::guard::{GuardClass, GuardEvent};
use colony_guards::simulation::Garrison;
use colony_guards::world::{BuildingKind, ColonyRegistry, SandboxWorld};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Run colony guards against a sandbox world
#[derive(Parser, Debug)]
#[command(name = "colony-guards")]
#[command(about = "Run colony guards against scattered hostiles in a sandbox world")]
struct Args {
    /// Ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Seed for world layout and every guard's decisions
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Guards to enlist (alternating melee and ranged)
    #[arg(long, default_value_t = 4)]
    guards: usize,

    /// Hostiles to scatter around the colony
    #[arg(long, default_value_t = 8)]
    hostiles: usize,

    /// Guard tunables (TOML); defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the event stream as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct LoggedEvent {
    tick: Tick,
    #[serde(flatten)]
    event: GuardEvent,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("colony_guards=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = load_config(args.config.as_deref()).map_err(|err| {
        tracing::warn!(error = %err, "unusable guard config");
        err
    })?;

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let colony = ColonyId(1);
    let (mut world, tower_id) = build_colony(colony, args.hostiles, &mut rng);
    let tower = world.building(tower_id).ok_or(GuardError::BuildingNotFound(tower_id))?;
    let mut garrison = Garrison::new();

    for i in 0..args.guards {
        let class = if i % 2 == 0 { GuardClass::Melee } else { GuardClass::Ranged };
        let offset = Position::new(i as f64 * 1.5, 0.0, -2.0);
        let agent = GuardAgent::new(format!("guard-{}", i + 1), tower.location + offset)
            .with_level(rng.gen_range(0..4))
            .with_stats(rng.gen_range(1..6), rng.gen_range(1..6))
            .stationed_at(colony, tower.id);
        garrison.enlist(agent, class, config.clone(), args.seed.wrapping_add(i as u64 + 1));
    }

    tracing::info!(
        guards = garrison.len(),
        hostiles = args.hostiles,
        ticks = args.ticks,
        "sandbox starting"
    );

    let mut log = Vec::new();
    let mut attacks = 0usize;
    let mut arrow_hits = 0usize;

    for _ in 0..args.ticks {
        let tick = garrison.current_tick();
        let events = garrison.tick(&mut world);
        arrow_hits += world.step().len();

        attacks += events.iter().filter(|e| e.is_attack()).count();
        if args.json {
            log.extend(events.into_iter().map(|event| LoggedEvent { tick, event }));
        }

        if world.living_count(EntityKind::Hostile) == 0 {
            tracing::info!(tick, "all hostiles down");
            break;
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&log)?);
        return Ok(());
    }

    let summary = garrison.summary();
    println!("=== COLONY GUARDS ===");
    println!("Ticks run:        {}", summary.tick);
    println!("Guards:           {}", summary.guards);
    println!("Attacks:          {} ({} arrows landed)", attacks, arrow_hits);
    println!(
        "Hostiles left:    {}/{}",
        world.living_count(EntityKind::Hostile),
        args.hostiles
    );
    println!("Engaged guards:   {}", summary.engaged);
    println!("States:");
    for (state, count) in &summary.by_state {
        println!("  {:<18} {}", state.name(), count);
    }
    for (agent, machine) in garrison.guards() {
        println!(
            "  {:<10} {:?} lvl {} at ({:.1}, {:.1}) - {} (armor {}/4)",
            agent.name,
            machine.class(),
            agent.experience_level,
            agent.position.x,
            agent.position.z,
            machine.state(),
            agent.armor.worn_count()
        );
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GuardConfig> {
    match path {
        Some(path) => GuardConfig::load(path),
        None => {
            let config = GuardConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// Lay out a colony with a stocked guard tower and scattered hostiles
fn build_colony(colony: ColonyId, hostiles: usize, rng: &mut ChaCha8Rng) -> (SandboxWorld, BuildingId) {
    let mut world = SandboxWorld::new();

    world.add_building(colony, BuildingKind::TownHall, Position::new(0.0, 64.0, 0.0), 2);
    let tower = world.add_building(colony, BuildingKind::GuardTower, Position::new(12.0, 64.0, 0.0), 1);
    world.add_building(colony, BuildingKind::Farm, Position::new(-18.0, 64.0, 10.0), 1);
    world.add_building(colony, BuildingKind::Residence, Position::new(6.0, 64.0, -16.0), 1);
    world.add_building(colony, BuildingKind::Warehouse, Position::new(-8.0, 64.0, -12.0), 1);

    if let Some(storage) = world.storage_mut(tower) {
        *storage = Inventory::with_items(
            27,
            [
                ItemStack::armor("iron helmet", ArmorSlot::Head),
                ItemStack::armor("iron chestplate", ArmorSlot::Chest),
                ItemStack::armor("iron leggings", ArmorSlot::Legs),
                ItemStack::armor("iron boots", ArmorSlot::Feet),
                ItemStack::armor("leather cap", ArmorSlot::Head),
                ItemStack::armor("leather tunic", ArmorSlot::Chest),
                ItemStack::sword("iron sword", 6.0, 250),
                ItemStack::sword("stone sword", 5.0, 131).with_enchantments(Enchantments {
                    smite: 1,
                    ..Default::default()
                }),
                ItemStack::bow(384),
                ItemStack::bow(384).with_enchantments(Enchantments {
                    power: 2,
                    punch: 1,
                    ..Default::default()
                }),
                ItemStack::arrows(64),
            ],
        );
    }

    for _ in 0..hostiles {
        let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        let distance: f64 = rng.gen_range(8.0..35.0);
        let position = Position::new(angle.cos() * distance, 64.0, angle.sin() * distance);
        let creature = match rng.gen_range(0..3) {
            0 => CreatureAttribute::Undead,
            1 => CreatureAttribute::Arthropod,
            _ => CreatureAttribute::Normal,
        };
        world.spawn_creature(EntityKind::Hostile, position, creature);
    }

    (world, tower)
}
