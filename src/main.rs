use anyhow::Context;
use clap::Parser;
use gascraft2d::config::GameConfig;
use gascraft2d::entity::{InputState, MoveInput};
use gascraft2d::persistence::SaveFile;
use gascraft2d::session::GameSession;
use std::path::PathBuf;

/// Fixed simulation step (seconds)
const TICK: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of simulation steps to run
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Hold the walk-right key for the whole run
    #[arg(long)]
    walk: bool,

    /// RON config file
    #[arg(long, default_value = "gascraft2d.ron")]
    config: PathBuf,

    /// Save file path (overrides the config file)
    #[arg(long)]
    save: Option<PathBuf>,

    /// Continue from the save file instead of starting a new world
    #[arg(long)]
    load: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut config = GameConfig::load_or_default(&args.config);
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(path) = args.save {
        config.save_path = path;
    }

    let save_file = SaveFile::new(config.save_path.clone());
    let mut session = GameSession::new(config);

    if args.load {
        match save_file
            .load()
            .with_context(|| format!("Failed to load {}", save_file.path().display()))?
        {
            Some(save) => session.apply_save(&save),
            None => log::info!("Nothing to load, starting a new world"),
        }
    }

    let movement = if args.walk {
        MoveInput::RIGHT
    } else {
        MoveInput::empty()
    };
    let input = InputState::with_movement(movement);

    log::info!("Running {} ticks", args.ticks);
    for _ in 0..args.ticks {
        session.update(TICK, &input);
    }

    let player = session.player();
    log::info!(
        "Player at ({:.1}, {:.1}), tile {:?}, on_ground {}, daylight {:.2}",
        player.position.x,
        player.position.y,
        session.player_block_pos(),
        player.on_ground,
        session.day().daylight()
    );

    save_file
        .save(&session.to_save())
        .with_context(|| format!("Failed to write {}", save_file.path().display()))?;

    Ok(())
}
