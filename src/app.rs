//! App: terminal init, main loop, drop scheduling and key handling.

use crate::Args;
use crate::game::{GameState, UniformSource};
use crate::input::{Action, key_to_action};
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tachyonfx::Effect;

/// Drop scheduler. Fires when a full interval has elapsed since the last
/// (re)arm; rearming discards any partial interval, so a resume after pause
/// or restart always waits the full drop time first.
struct DropClock {
    last: Instant,
}

impl DropClock {
    fn new(now: Instant) -> Self {
        Self { last: now }
    }

    fn rearm(&mut self, now: Instant) {
        self.last = now;
    }

    fn due(&mut self, now: Instant, interval: Duration) -> bool {
        if now.duration_since(self.last) >= interval {
            self.last = now;
            return true;
        }
        false
    }
}

pub struct App {
    theme: Theme,
    state: GameState,
    source: UniformSource,
    frame_rate: f64,
    drop_clock: DropClock,
    /// TachyonFX fade for the game-over transition (created on first draw).
    game_over_fx: Option<Effect>,
    /// Last time the effect was processed (for delta).
    fx_process_time: Option<Instant>,
}

impl App {
    pub fn new(args: &Args, theme: Theme) -> Self {
        let seed = args.seed.unwrap_or_else(clock_seed);
        let mut source = UniformSource::new(seed);
        let state = GameState::new(&mut source);
        Self {
            theme,
            state,
            source,
            frame_rate: args.frame_rate,
            drop_clock: DropClock::new(Instant::now()),
            game_over_fx: None,
            fx_process_time: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{
                EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
            },
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal);

        // Restore
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let frame_start = Instant::now();
            terminal.draw(|f| {
                crate::ui::draw(
                    f,
                    &self.state,
                    &self.theme,
                    f.area(),
                    &mut self.game_over_fx,
                    &mut self.fx_process_time,
                    frame_start,
                )
            })?;

            let frame_budget = Duration::from_secs_f64(1.0 / self.frame_rate.max(1.0));
            let timeout = frame_budget.saturating_sub(frame_start.elapsed());

            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        // Ignore Release/Repeat from enhanced keyboards.
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        match key_to_action(key) {
                            Action::Quit => return Ok(()),
                            Action::Pause => {
                                self.state = self.state.toggle_pause();
                                self.drop_clock.rearm(Instant::now());
                            }
                            Action::Restart => {
                                self.state = self.state.restart(&mut self.source);
                                self.drop_clock.rearm(Instant::now());
                                self.game_over_fx = None;
                                self.fx_process_time = None;
                            }
                            Action::MoveLeft => {
                                self.state = self.state.move_piece(-1, 0, &mut self.source);
                            }
                            Action::MoveRight => {
                                self.state = self.state.move_piece(1, 0, &mut self.source);
                            }
                            Action::SoftDrop => {
                                self.state = self.state.move_piece(0, 1, &mut self.source);
                            }
                            Action::Rotate => self.state = self.state.rotate(),
                            Action::None => {}
                        }
                    }
                }
            }

            // Automatic drop. The clock stays rearmed while paused or
            // finished, so resuming never inherits a partial interval.
            let now = Instant::now();
            if self.state.paused || self.state.game_over {
                self.drop_clock.rearm(now);
            } else if self.drop_clock.due(now, self.state.drop_interval()) {
                self.state = self.state.drop_one_row(&mut self.source);
            }
        }
    }
}

/// Seed from the system clock's subsecond nanos when --seed is absent.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0)
}
