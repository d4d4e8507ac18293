use anyhow::Result;
use clap::Parser;
use snake_tui::app::App;
use snake_tui::audio::{AudioSink, NullAudio, TerminalBell};
use snake_tui::game::GameConfig;
use snake_tui::persistence::{DEFAULT_HIGHSCORE_FILE, HighScoreStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_tui")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Side length of the square grid, in cells
    #[arg(long, default_value = "20")]
    grid_size: usize,

    /// Milliseconds between game ticks
    #[arg(long, default_value = "150")]
    tick_ms: u64,

    /// Where the high score is stored
    #[arg(long, default_value = DEFAULT_HIGHSCORE_FILE)]
    highscore_file: PathBuf,

    /// Disable all sound
    #[arg(long)]
    mute: bool,
}

/// Route tracing to a log file when RUST_LOG is set; the TUI owns the
/// terminal, so events must never hit stdout or stderr directly.
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let Ok(file) = std::fs::File::create("snake_tui.log") else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = GameConfig {
        grid_size: cli.grid_size,
        tick_interval_ms: cli.tick_ms,
        ..Default::default()
    };

    let store = HighScoreStore::new(cli.highscore_file);
    let audio: Box<dyn AudioSink> = if cli.mute {
        Box::new(NullAudio)
    } else {
        Box::new(TerminalBell::new(true))
    };

    let mut app = App::new(config, store, audio)?;
    app.run().await
}
