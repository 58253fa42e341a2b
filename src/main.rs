use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use macroquad::prelude::*;
use macroquad::window::Conf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use flappy_evo::simulation::clock::FrameClock;
use flappy_evo::simulation::evaluation::Evaluation;
use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::session::Session;
use flappy_evo::simulation::silhouettes::Silhouettes;
use flappy_evo::simulation::training::Trainer;

mod graphics;

use graphics::{Assets, TrainingHud, draw_banner, draw_scene};

/// Most ticks run in one frame after a stall.
const MAX_CATCH_UP: u32 = 4;

#[derive(Debug, Parser)]
#[command(name = "flappy-evo", about = "Flappy bird, played by hand or by evolving agents")]
struct Cli {
    /// JSON file overriding the default parameters.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Seed of the obstacle stream.
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Directory holding the sprite images.
    #[arg(long, global = true)]
    assets: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play with space, arrow up or the mouse.
    Play,
    /// Evolve a population of agents.
    Train {
        /// Train without opening a window.
        #[arg(long)]
        headless: bool,
        /// Iteration cap.
        #[arg(long)]
        generations: Option<usize>,
        /// Agents per generation.
        #[arg(long)]
        population: Option<usize>,
        /// End each generation after this many ticks.
        #[arg(long)]
        tick_limit: Option<u64>,
        /// Use the distance to the lower barrier as third input.
        #[arg(long)]
        distinct_features: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut params = match &cli.config {
        Some(path) => Params::load_from_file(path)?,
        None => Params::default(),
    };
    if let Some(assets) = cli.assets {
        params.asset_dir = assets;
    }

    match cli.command {
        Command::Play => {
            info!(assets = %params.asset_dir.display(), "starting human play");
            run_windowed(params, "Flappy Evo", move |params| play(params, cli.seed));
        }
        Command::Train {
            headless,
            generations,
            population,
            tick_limit,
            distinct_features,
        } => {
            if let Some(generations) = generations {
                params.generations = generations;
            }
            if let Some(population) = population {
                params.population_size = population;
            }
            if tick_limit.is_some() {
                params.tick_limit = tick_limit;
            }
            params.distinct_features |= distinct_features;
            params.validate()?;

            info!(
                population = params.population_size,
                generations = params.generations,
                headless,
                "starting training"
            );

            if headless {
                let silhouettes = Silhouettes::procedural();
                let mut trainer = Trainer::new(&params);
                trainer.run_headless(&params, &silhouettes, cli.seed);
            } else {
                run_windowed(params, "Flappy Evo - training", move |params| {
                    train(params, cli.seed)
                });
            }
        }
    }

    Ok(())
}

/// Opens the game window and runs `game` inside it. Startup failures abort the process.
fn run_windowed<F, Fut>(params: Params, title: &str, game: F)
where
    F: FnOnce(Params) -> Fut + 'static,
    Fut: Future<Output = Result<()>> + 'static,
{
    let conf = Conf {
        window_title: title.to_owned(),
        window_width: params.window_width as i32,
        window_height: params.window_height as i32,
        window_resizable: false,
        ..Default::default()
    };

    macroquad::Window::from_config(conf, async move {
        if let Err(e) = game(params).await {
            error!("{e:#}");
            std::process::exit(1);
        }
    });
}

fn quit_requested() -> bool {
    is_quit_requested() || is_key_pressed(KeyCode::Escape)
}

async fn play(params: Params, seed: Option<u64>) -> Result<()> {
    prevent_quit();
    let (assets, silhouettes) = Assets::load(&params.asset_dir).await?;

    let mut session = Session::new(&params, &silhouettes, seed);
    let mut clock = FrameClock::new(params.ticks_per_second, MAX_CATCH_UP);
    let mut flap = false;

    while !quit_requested() {
        if is_key_pressed(KeyCode::Space)
            || is_key_pressed(KeyCode::Up)
            || is_mouse_button_pressed(MouseButton::Left)
        {
            flap = true;
        }
        if session.is_over() && is_key_pressed(KeyCode::R) {
            session.restart();
            clock.reset();
        }

        for _ in 0..clock.advance(get_frame_time()) {
            session.tick(std::mem::take(&mut flap));
        }

        draw_scene(&assets, &session.scene(), None);
        if session.is_over() {
            draw_banner("Game over - R to restart");
        }

        next_frame().await;
    }

    info!(score = session.score(), "quit");
    Ok(())
}

async fn train(params: Params, seed: Option<u64>) -> Result<()> {
    prevent_quit();
    let (assets, silhouettes) = Assets::load(&params.asset_dir).await?;

    let mut trainer = Trainer::new(&params);
    let mut clock = FrameClock::new(params.ticks_per_second, MAX_CATCH_UP);

    while !trainer.is_done(&params) {
        let generation = trainer.generation();
        let generation_seed = trainer.generation_seed(seed);
        let mut evaluation =
            Evaluation::from_genomes(trainer.genomes_mut(), &params, &silhouettes, generation_seed);
        clock.reset();

        while evaluation.is_running() {
            if quit_requested() {
                info!(generation, "training interrupted");
                return Ok(());
            }

            for _ in 0..clock.advance(get_frame_time()) {
                evaluation.tick();
            }

            let hud = TrainingHud {
                generation,
                alive: evaluation.alive(),
            };
            draw_scene(&assets, &evaluation.scene(), Some(&hud));
            next_frame().await;
        }

        let (score, ticks) = (evaluation.score(), evaluation.ticks());
        trainer.finish_generation(score, ticks, &params);
    }

    if let Some(champion) = trainer.champion() {
        info!(id = champion.id, fitness = champion.fitness, "training finished");
    }
    Ok(())
}
