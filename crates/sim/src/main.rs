//! Headless battle simulator.
//!
//! Loads content, pits one player combatant against one enemy and plays the
//! battle out: the enemy through its species AI, the player through a small
//! scripted pilot. Status effects tick once per completed round.
mod config;
mod pilot;

use anyhow::{Context, Result};
use battle_content::ContentFactory;
use battle_core::{
    ActionResult, AiRegistry, BattleSession, Catalog, Combatant, CombatantId, Inventory,
    ParticipantSpec, PcgRng, Side,
};
use config::SimConfig;

const PLAYER: CombatantId = CombatantId(1);
const ENEMY: CombatantId = CombatantId(2);

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    tracing::info!(?config, "starting simulation");

    let factory = ContentFactory::new(&config.content_dir);
    let (battle_config, catalog) = factory
        .load_all()
        .with_context(|| format!("loading content from {}", config.content_dir.display()))?;

    let player = spawn(&catalog, &config.player_species, config.level)?;
    let enemy = spawn(&catalog, &config.enemy_species, config.level)?;

    let starting_items = Inventory::new()
        .with_item("potion", 2)
        .with_item("capture_orb", 2);
    let mut session = BattleSession::new(battle_config)
        .with_rng(PcgRng::new(config.seed))
        .with_ai(AiRegistry::from_catalog(&catalog))
        .with_catalog(catalog)
        .with_inventory(Side::Player, starting_items);

    session.start_battle(vec![
        ParticipantSpec::new(PLAYER, Side::Player, player),
        ParticipantSpec::new(ENEMY, Side::Enemy, enemy),
    ])?;

    run(&mut session, config.max_rounds)?;

    match session.result() {
        Some(result) => println!("result: {result}"),
        None => println!("result: unresolved after {} rounds", config.max_rounds),
    }
    for captured in session.storage(Side::Player) {
        println!("captured: {} ({})", captured.fighter.name(), captured.id);
    }

    Ok(())
}

fn spawn(catalog: &Catalog, species: &str, level: u32) -> Result<Combatant> {
    let template = catalog
        .species(species)
        .with_context(|| format!("unknown species '{species}'"))?;
    Ok(Combatant::from_template(template, level))
}

fn run(session: &mut BattleSession, max_rounds: u32) -> Result<()> {
    while session.is_active() && session.round() <= max_rounds {
        let round = session.round();
        let actor = session.current_actor()?;
        let (id, side) = (actor.id, actor.side);

        let result = match side {
            Side::Player => {
                let action = pilot::choose_action(session, id);
                session.perform_action(action)
            }
            Side::Enemy => session.ai_take_turn(id),
        };
        report(session, &result);

        if session.is_active() && session.round() > round {
            for tick in session.process_end_of_turn() {
                tracing::info!(
                    combatant = %tick.target,
                    kind = %tick.kind,
                    damage = tick.damage,
                    healed = tick.healed,
                    "status"
                );
            }
        }
    }
    Ok(())
}

fn report(session: &BattleSession, result: &ActionResult) {
    let name = session
        .participant(result.actor)
        .map_or("captured", |p| p.fighter.name());
    match result.reason {
        None => tracing::info!(
            actor = name,
            action = %result.kind,
            damage = result.damage(),
            chance = result.chance(),
            "ok"
        ),
        Some(reason) => tracing::info!(actor = name, action = %result.kind, %reason, "failed"),
    }
}
