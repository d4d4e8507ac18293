use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::audio::{AudioCue, AudioSink};
use crate::game::{Command, GameConfig, GameEngine, GameError, GameEvent, GameStatus};
use crate::input::{InputHandler, KeyAction};
use crate::persistence::HighScoreStore;
use crate::render::Renderer;

/// The interactive game: one engine, one terminal, one event loop
///
/// All engine mutation happens on this task. Ticks arrive from a fixed
/// interval timer, rendering runs on its own faster timer, and input
/// commands are applied as they arrive, taking effect no later than
/// the next tick.
pub struct App {
    engine: GameEngine,
    renderer: Renderer,
    input_handler: InputHandler,
    store: HighScoreStore,
    audio: Box<dyn AudioSink>,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: GameConfig,
        store: HighScoreStore,
        audio: Box<dyn AudioSink>,
    ) -> Result<Self> {
        let high_score = store.load();
        let engine =
            GameEngine::new(config, high_score).context("Failed to set up the game board")?;

        Ok(Self {
            engine,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            store,
            audio,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_interval = Duration::from_millis(self.engine.config().tick_interval_ms);
        let mut tick_timer = interval(tick_interval);

        // Render at 30 FPS (33ms per frame), independent of the tick
        // cadence, purely for input responsiveness and drawing
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.advance_tick();
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.engine);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Command(command) => self.apply_command(command),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    /// Forward a command to the engine and mirror its side effects
    /// onto the audio sink
    fn apply_command(&mut self, command: Command) {
        let was_game_over = self.engine.status() == GameStatus::GameOver;

        if let Err(err) = self.engine.apply(command) {
            // Only food placement can fail, and only on a full board.
            tracing::warn!(error = %err, "command left the round unplayable");
            return;
        }

        match command {
            Command::Reset => {
                if was_game_over && self.engine.status() == GameStatus::Running {
                    self.audio.resume_music();
                }
            }
            Command::ToggleSound => {
                self.audio.set_enabled(self.engine.sound_enabled());
            }
            Command::SetDirection(_) | Command::TogglePause => {}
        }
    }

    /// Deliver exactly one tick to the engine and react to its events
    fn advance_tick(&mut self) {
        match self.engine.tick() {
            Ok(events) => {
                for event in events {
                    self.handle_game_event(event);
                }
            }
            Err(GameError::BoardFull) => {
                // The engine has already ended the round; treat it like
                // any other game over.
                tracing::warn!("board full, no food placement possible");
                self.audio.play(AudioCue::GameOver);
                self.audio.pause_music();
            }
        }
    }

    fn handle_game_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::FoodEaten => {
                self.audio.play(AudioCue::Eat);
            }
            GameEvent::NewHighScore(value) => {
                // Write-through: persist the moment the record is set.
                // A failed save is logged and the game carries on.
                if let Err(err) = self.store.save(value) {
                    tracing::warn!(
                        path = %self.store.path().display(),
                        error = %err,
                        "failed to persist high score"
                    );
                }
            }
            GameEvent::GameOver => {
                self.audio.play(AudioCue::GameOver);
                self.audio.pause_music();
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::game::Direction;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Sink that records every call, for asserting cue wiring
    #[derive(Default)]
    struct RecordingAudio {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, cue: AudioCue) {
            self.log.borrow_mut().push(format!("play:{cue:?}"));
        }

        fn pause_music(&mut self) {
            self.log.borrow_mut().push("pause_music".to_string());
        }

        fn resume_music(&mut self) {
            self.log.borrow_mut().push("resume_music".to_string());
        }

        fn set_enabled(&mut self, enabled: bool) {
            self.log.borrow_mut().push(format!("enabled:{enabled}"));
        }
    }

    fn test_app(dir: &TempDir) -> (App, Rc<RefCell<Vec<String>>>) {
        let store = HighScoreStore::new(dir.path().join("highscore.json"));
        let audio = RecordingAudio::default();
        let log = Rc::clone(&audio.log);
        let app = App::new(GameConfig::default(), store, Box::new(audio)).unwrap();
        (app, log)
    }

    fn drive_to_game_over(app: &mut App) {
        app.apply_command(Command::SetDirection(Direction::Up));
        while app.engine.status() != GameStatus::GameOver {
            app.advance_tick();
        }
    }

    #[test]
    fn test_app_starts_running() {
        let dir = TempDir::new().unwrap();
        let (app, _log) = test_app(&dir);

        assert_eq!(app.engine.status(), GameStatus::Running);
        assert_eq!(app.engine.high_score(), 0);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_loads_persisted_high_score() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("highscore.json"));
        store.save(9).unwrap();

        let app = App::new(GameConfig::default(), store, Box::new(NullAudio)).unwrap();
        assert_eq!(app.engine.high_score(), 9);
    }

    #[test]
    fn test_new_high_score_is_written_through() {
        let dir = TempDir::new().unwrap();
        let (mut app, _log) = test_app(&dir);

        app.handle_game_event(GameEvent::NewHighScore(3));

        let reloaded = HighScoreStore::new(dir.path().join("highscore.json"));
        assert_eq!(reloaded.load(), 3);
    }

    #[test]
    fn test_failed_save_does_not_panic() {
        let dir = TempDir::new().unwrap();
        // A directory at the file path makes every save fail.
        let path = dir.path().join("highscore.json");
        std::fs::create_dir(&path).unwrap();

        let store = HighScoreStore::new(path);
        let mut app = App::new(GameConfig::default(), store, Box::new(NullAudio)).unwrap();

        app.handle_game_event(GameEvent::NewHighScore(3));
        assert_eq!(app.engine.status(), GameStatus::Running);
    }

    #[test]
    fn test_game_over_cue_and_music_pause() {
        let dir = TempDir::new().unwrap();
        let (mut app, log) = test_app(&dir);

        drive_to_game_over(&mut app);

        let log = log.borrow();
        assert!(log.contains(&"play:GameOver".to_string()));
        assert!(log.contains(&"pause_music".to_string()));
    }

    #[test]
    fn test_reset_after_game_over_resumes_music() {
        let dir = TempDir::new().unwrap();
        let (mut app, log) = test_app(&dir);

        drive_to_game_over(&mut app);
        app.apply_command(Command::Reset);

        assert_eq!(app.engine.status(), GameStatus::Running);
        assert!(log.borrow().contains(&"resume_music".to_string()));
    }

    #[test]
    fn test_reset_while_running_does_not_resume_music() {
        let dir = TempDir::new().unwrap();
        let (mut app, log) = test_app(&dir);

        app.apply_command(Command::Reset);

        assert_eq!(app.engine.status(), GameStatus::Running);
        assert!(!log.borrow().contains(&"resume_music".to_string()));
    }

    #[test]
    fn test_sound_toggle_reaches_audio_sink() {
        let dir = TempDir::new().unwrap();
        let (mut app, log) = test_app(&dir);

        app.apply_command(Command::ToggleSound);
        assert!(!app.engine.sound_enabled());
        assert!(log.borrow().contains(&"enabled:false".to_string()));

        app.apply_command(Command::ToggleSound);
        assert!(app.engine.sound_enabled());
        assert!(log.borrow().contains(&"enabled:true".to_string()));
    }
}
