use std::{thread::sleep, time::Instant};

use crate::config::GameConfig;
use crate::food::FoodSpawner;
use crate::input::{command_for, Command};
use crate::render::Canvas;
use crate::session::{Session, TickReport};
use crate::term::TermManager;
use crate::TermInt;

use anyhow::Result;
use log::{debug, info};

/// How a single game ended from the player's point of view.
enum Ending {
    Replay,
    Quit,
}

pub struct SnakeGame {
    config: GameConfig,
    spawner: FoodSpawner,
    paused: bool,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Result<Self> {
        let bounds = config.bounds;
        let term = TermManager::new((bounds.screen_width() as TermInt, bounds.screen_height() as TermInt))?;
        let spawner = FoodSpawner::new(config.seed, config.food_interval, config.avoid_snake);
        Ok(SnakeGame { config, spawner, paused: false, term })
    }

    /// Takes over the terminal until the player quits, and always gives it
    /// back afterwards.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let result = self.run_games();
        let restored = self.term.restore();
        result.and(restored)
    }

    fn run_games(&mut self) -> Result<()> {
        if !self.show_intro()? {
            return Ok(());
        }

        while let Ending::Replay = self.play()? {
            info!("starting another game");
        }

        Ok(())
    }

    fn show_intro(&mut self) -> Result<bool> {
        let lines = &[
            "W A S D to move",
            "Esc to pause",
            "Q or CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;
        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;

        Ok(command_for(&key) != Command::Quit)
    }

    fn play(&mut self) -> Result<Ending> {
        self.term.clear()?;
        self.paused = false;

        let mut session = Session::start(&self.config, &mut self.spawner);
        self.term.draw(&Canvas::compose(&session))?;

        let mut next_tick = Instant::now() + self.config.tick;

        loop {
            sleep(next_tick.saturating_duration_since(Instant::now()));
            next_tick += self.config.tick;

            // One key per tick, so two quick turns can't fold into a reversal
            if let Some(key) = self.term.poll_key()? {
                match command_for(&key) {
                    Command::Quit => return Ok(Ending::Quit),
                    Command::Pause => self.toggle_pause()?,
                    Command::Steer(dir) if !self.paused => {
                        if session.steer(dir) {
                            debug!("turned {:?}", session.direction());
                        }
                    },
                    _ => {}
                }
            }

            if self.paused {
                next_tick = Instant::now() + self.config.tick;
                continue;
            }

            if let TickReport::Moved { eval, .. } = session.tick() {
                if eval.ate_food {
                    debug!("ate food, length now {}", session.body().len());
                }
            }
            if session.is_over() {
                self.term.draw(&Canvas::compose(&session))?;
                break;
            }

            session.replenish_food(&mut self.spawner);
            self.term.draw(&Canvas::compose(&session))?;
        }

        self.game_over(&session)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self, session: &Session) -> Result<Ending> {
        info!("{:?} after {} ticks", session.outcome(), session.ticks());

        // Drop turns typed just before the crash so they don't dismiss the message
        while self.term.poll_key()?.is_some() {}

        let length = format!("Length: {}", session.body().len());
        self.term.show_message(&[
            "GAME OVER",
            length.as_str(),
            "",
            "Press R to play again,",
            "or any other key to quit."
        ])?;

        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;

        if command_for(&key) == Command::Restart {
            Ok(Ending::Replay)
        } else {
            Ok(Ending::Quit)
        }
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Q to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        debug!("paused: {}", self.paused);
        Ok(())
    }
}
