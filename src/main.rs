//! Danmaku Boss headless runner
//!
//! Drives the simulation at a fixed 60 Hz with scripted menu input and the
//! autopilot flying the player. Frames can be dumped as JSON lines.

#[cfg(not(target_arch = "wasm32"))]
mod runner {
    use std::io;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::Serialize;

    use danmaku_boss::audio::{self, LogAudio};
    use danmaku_boss::renderer::{JsonLinesRenderer, NullRenderer, Renderer};
    use danmaku_boss::sim::{GameState, MatchPhase, Session, TickInput, tick};
    use danmaku_boss::{Difficulty, Tuning};

    fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
        Difficulty::from_str(s)
            .ok_or_else(|| format!("unknown difficulty '{s}' (easy, normal, hard)"))
    }

    #[derive(Parser, Debug)]
    #[command(about = "Run a headless single-boss bullet-hell encounter", version)]
    struct Args {
        /// easy, normal or hard
        #[arg(long, default_value = "normal", value_parser = parse_difficulty)]
        difficulty: Difficulty,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Tick limit (60 per second)
        #[arg(long, default_value_t = 7200)]
        ticks: u64,
        /// JSON tuning file; built-in tables when omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// Continue into the extra stage after the boss falls
        #[arg(long)]
        extra: bool,
        /// Write a JSON frame to stdout every N ticks
        #[arg(long)]
        snapshot_every: Option<u64>,
        /// Print the effective tuning as JSON and exit
        #[arg(long)]
        dump_config: bool,
    }

    #[derive(Serialize, Default)]
    struct RunSummary {
        ticks: u64,
        phase: Option<MatchPhase>,
        difficulty: Option<Difficulty>,
        score: u64,
        lives: u32,
        bombs: u32,
        boss_phase: usize,
        clear_times: Vec<f32>,
        total_clear_secs: f32,
        hits: u32,
        grazes: u32,
    }

    impl RunSummary {
        fn record(&mut self, session: &Session) {
            self.difficulty = Some(session.difficulty);
            self.score = session.score;
            self.lives = session.player.lives;
            self.bombs = session.player.bombs;
            self.boss_phase = session.boss.phase_index;
            self.clear_times = session.boss.clear_times.clone();
            self.total_clear_secs = session.boss.total_clear_secs();
        }
    }

    /// Menu navigation plus autopilot in fights
    fn scripted_input(state: &GameState, target: Difficulty, extra: bool) -> TickInput {
        let mut input = TickInput::default();
        match state.phase {
            MatchPhase::DifficultySelect { cursor } if cursor != target => input.nav_down = true,
            MatchPhase::DifficultySelect { .. } => input.confirm = true,
            MatchPhase::Fight | MatchPhase::ExtraFight => input.autopilot = true,
            MatchPhase::Results if extra => input.extra_stage = true,
            MatchPhase::Results | MatchPhase::GameOver => input.confirm = true,
            MatchPhase::ExtraResults { hold_ticks: 0 } => input.confirm = true,
            _ => {}
        }
        input
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();

        let tuning = match &args.config {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("failed to load tuning from {}", path.display()))?,
            None => Tuning::default(),
        };
        if args.dump_config {
            println!("{}", tuning.to_json()?);
            return Ok(());
        }

        let mut state = GameState::new(tuning, args.seed).context("invalid tuning")?;
        log::info!(
            "Danmaku Boss starting: {} seed {} for up to {} ticks",
            args.difficulty,
            args.seed,
            args.ticks
        );

        let mut renderer: Box<dyn Renderer> = match args.snapshot_every {
            Some(_) => Box::new(JsonLinesRenderer::new(io::stdout().lock())),
            None => Box::new(NullRenderer),
        };
        let mut sink = LogAudio::new();
        let mut summary = RunSummary::default();

        for t in 1..=args.ticks {
            let input = scripted_input(&state, args.difficulty, args.extra);
            tick(&mut state, &input);
            audio::dispatch(&state.events, &mut sink);
            for event in &state.events {
                log::debug!("tick {}: {:?}", t, event);
            }

            if let Some(session) = &state.session {
                summary.record(session);
            }
            if args.snapshot_every.is_some_and(|every| every > 0 && t % every == 0) {
                renderer.draw(&state.snapshot());
            }

            summary.ticks = t;
            summary.phase = Some(state.phase);
            if state.phase == MatchPhase::Exited {
                break;
            }
        }
        drop(renderer);

        summary.hits = sink.hits;
        summary.grazes = sink.grazes;
        println!("{}", serde_json::to_string(&summary)?);
        log::info!("Run finished after {} ticks", summary.ticks);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    runner::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by the embedding page on web targets
}
