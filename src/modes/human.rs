use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};
use tracing::{info, warn};

use crate::assets::{AssetBundle, CuePlayer};
use crate::game::{GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    cues: CuePlayer,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, assets: Option<AssetBundle>) -> Result<Self> {
        let mut engine = GameEngine::new(config).context("Failed to create game engine")?;
        let state = engine.reset();

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            cues: CuePlayer::new(assets),
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

        // Ticks follow the engine speed; the timer is re-armed when it changes
        let mut tick_period = self.state.speed;
        let mut tick_timer = speed_timer(tick_period);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    self.handle_stream_item(maybe_event);
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if !self.state.game_over {
                        self.update_game();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
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

            if self.state.speed != tick_period {
                tick_period = self.state.speed;
                tick_timer = speed_timer(tick_period);
            }
        }

        info!(
            rounds = self.metrics.rounds_played,
            high_score = self.metrics.high_score,
            "session ended"
        );

        Ok(())
    }

    /// The input stream ends or fails when the terminal goes away
    fn handle_stream_item(&mut self, item: Option<io::Result<Event>>) {
        match item {
            Some(Ok(event)) => self.handle_event(event),
            Some(Err(err)) => {
                warn!(%err, "terminal input failed");
                self.should_quit = true;
            }
            None => {
                info!("terminal input closed");
                self.should_quit = true;
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => self.state.set_direction(direction),
            KeyAction::Restart => {
                if self.state.game_over {
                    self.reset_game();
                }
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let result = self.engine.step(&mut self.state);

        for event in result.events() {
            if let Err(err) = self.cues.play(event) {
                warn!(%err, ?event, "failed to play cue");
            }
        }

        if result.info.collision_type.is_some() {
            self.metrics.on_round_over(self.state.score);
            info!(
                score = self.state.score,
                length = self.state.snake.len(),
                steps = self.state.steps,
                "game over"
            );
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_round_start();
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

/// First tick one full period from now, then every `period`
fn speed_timer(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mode() -> HumanMode {
        let config = GameConfig {
            seed: Some(3),
            ..GameConfig::default()
        };
        HumanMode::new(config, None).unwrap()
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(!mode.state.game_over);
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.snake.len(), 1);
    }

    #[test]
    fn test_turn_keys_buffer_direction() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.state.pending_direction, Some(Direction::Up));

        // reversal of the current heading is dropped
        mode.handle_event(key(KeyCode::Left));
        assert_eq!(mode.state.pending_direction, Some(Direction::Up));
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut mode = mode();
        mode.state.score = 10;
        mode.handle_event(key(KeyCode::Char('r')));
        assert_eq!(mode.state.score, 10);

        mode.state.game_over = true;
        mode.handle_event(key(KeyCode::Char('r')));
        assert_eq!(mode.state.score, 0);
        assert!(!mode.state.game_over);
    }

    #[test]
    fn test_wall_hit_ends_round() {
        let mut mode = mode();
        mode.state.food = Position::new(0, 0);
        mode.handle_event(key(KeyCode::Up));

        for _ in 0..20 {
            if mode.state.game_over {
                break;
            }
            mode.update_game();
        }

        assert!(mode.state.game_over);
        assert_eq!(mode.metrics.rounds_played, 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(HumanMode::new(GameConfig::new(10, 10), None).is_err());
    }

    #[test]
    fn test_input_stream_end_quits() {
        let mut closed = mode();
        closed.handle_stream_item(Some(Ok(key(KeyCode::Up))));
        assert!(!closed.should_quit);

        closed.handle_stream_item(None);
        assert!(closed.should_quit);

        let mut failed = mode();
        failed.handle_stream_item(Some(Err(io::Error::other("tty gone"))));
        assert!(failed.should_quit);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
