use std::rc::Rc;
use std::time::Duration;

use consumables::collision::Collidable;
use consumables::item::{AimTarget, ItemPhase};
use consumables::notify::TracingNotifier;
use consumables::player::Character;
use consumables::save::SaveManager;
use consumables::stats::StatType;
use consumables::{GameConfig, GameWorld, ItemInput, ItemRegistry};

/// Fixed simulation step (roughly 60 FPS)
const TICK: Duration = Duration::from_millis(16);
/// Simulated time when no length is given
const DEFAULT_RUN_SECS: u64 = 60;
/// How far ahead of the character throws land
const THROW_OFFSET: i32 = 60;

struct Options {
    config_path: Option<String>,
    run_for: Duration,
    persist: bool,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        config_path: None,
        run_for: Duration::from_secs(DEFAULT_RUN_SECS),
        persist: true,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                options.config_path = Some(args.next().ok_or("--config requires a file path")?);
            }
            "--seconds" => {
                let raw = args.next().ok_or("--seconds requires an integer")?;
                let secs = raw
                    .parse::<u64>()
                    .map_err(|err| format!("--seconds must be an integer ({err})"))?;
                options.run_for = Duration::from_secs(secs);
            }
            "--no-save" => options.persist = false,
            path if !path.starts_with("--") && options.config_path.is_none() => {
                options.config_path = Some(path.to_string());
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(options)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let options = parse_args()?;

    let config = match &options.config_path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    tracing::info!(?config, "configuration loaded");

    let items = ItemRegistry::create_default();
    let mut world = GameWorld::new(&config, &items, Rc::new(TracingNotifier));

    if options.persist {
        match SaveManager::default_directory().and_then(SaveManager::new) {
            Ok(store) => {
                tracing::info!(path = %store.save_path().display(), "persisting world potions");
                world = world.with_store(Box::new(store));
                let restored = world.spawner.restore();
                if restored > 0 {
                    tracing::info!(restored, "world potions restored from last run");
                }
            }
            Err(err) => tracing::warn!(%err, "no save directory, potions will not persist"),
        }
    }

    let mut hero = Character::new(
        (config.spawner.map_width / 2) as i32,
        (config.spawner.map_height / 2) as i32,
        16,
        16,
    );
    hero.stats.health.take_damage(40.0);

    let mut now = Duration::ZERO;
    while now < options.run_for {
        now += TICK;

        let moved = step_towards_potion(&world, &mut hero);
        let report = world.tick(now, &mut hero, moved);

        if let Some(item) = &report.collected {
            tracing::info!(item = %item, held = world.inventory.len(), "picked up");
        }
        for event in &report.item_events {
            tracing::debug!(?event, "item event");
        }
        for impact in hero.drain_impacts() {
            tracing::info!(item = %impact.item_id, x = impact.target.x, y = impact.target.y, "throw landed");
        }

        drive_inventory(&mut world, &mut hero, now);
    }

    tracing::info!(
        health = hero.stats.health.current(),
        held = world.inventory.len(),
        in_world = world.spawner.len(),
        "simulation finished"
    );

    Ok(())
}

/// Walks the character one step toward the oldest potion on the map
///
/// Stands still while something is charging so movement-sensitive potions
/// get to finish.
fn step_towards_potion(world: &GameWorld, hero: &mut Character) -> bool {
    let charging = world
        .inventory
        .iter_items()
        .any(|item| matches!(item.phase(), ItemPhase::Charging { .. }));
    if charging {
        return false;
    }

    let Some(potion) = world.spawner.render_query().next() else {
        return false;
    };

    let speed = (hero.stats.effective_stat(StatType::MovementSpeed) as i32).max(1);
    let bounds = hero.get_bounds();
    let dx = (potion.x - bounds.x()).clamp(-speed, speed);
    let dy = (potion.y - bounds.y()).clamp(-speed, speed);
    hero.move_by(dx, dy)
}

/// Uses whatever is selected, and throws anything that ends up aiming
fn drive_inventory(world: &mut GameWorld, hero: &mut Character, now: Duration) {
    let input = match world.inventory.active_item().map(|item| item.phase()) {
        Some(ItemPhase::Idle) => ItemInput::Use,
        Some(ItemPhase::Aiming { .. }) => {
            let (x, y) = (hero.x + THROW_OFFSET, hero.y);
            ItemInput::Confirm(AimTarget::new(x, y))
        }
        _ => return,
    };

    if let Err(err) = world.handle_input(now, hero, input) {
        tracing::debug!(%err, ?input, "input rejected");
    }
}
