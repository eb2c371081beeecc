//! The interactive game loop.
//!
//! ```text
//! Session::new() -> ask question -> read line -> Command::parse -> handle
//!                       ^                                            |
//!                       +----------- Flow::Continue -----------------+
//! ```
//!
//! Input and output are plain `BufRead`/`Write` so the whole loop runs in tests
//! with a scripted generator and no feedback delay.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;

use mathmaster_core::{Game, RandomRange, use_hint};
use mathmaster_types::{PlayerProgress, Question};

use crate::commands::{Command, HELP};
use crate::render;
use crate::store::ProgressStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<R> {
    game: Game,
    store: ProgressStore,
    progress: PlayerProgress,
    question: Question,
    rng: R,
    feedback_delay: Duration,
}

impl<R: RandomRange> Session<R> {
    /// Resume the saved player, or start a fresh one.
    pub fn new(
        game: Game,
        store: ProgressStore,
        mut rng: R,
        feedback_delay: Duration,
    ) -> Result<Self> {
        let mut progress = store.load().unwrap_or_else(|| game.fresh_progress());
        let level_count = game.strategy().level_count();
        if progress.clamp_to_levels(level_count) {
            tracing::warn!(
                level_count,
                "Saved progress names levels outside the catalog; dropped them"
            );
        }
        let question = game.next_question(&progress, &mut rng)?;
        Ok(Self {
            game,
            store,
            progress,
            question,
            rng,
            feedback_delay,
        })
    }

    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Drive the loop until `:quit` or end of input. Progress is saved on exit.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        self.greet(out)?;
        self.ask(out)?;
        for line in input.lines() {
            if self.handle(Command::parse(&line?), out)? == Flow::Quit {
                return Ok(());
            }
        }
        self.store.save(&self.progress)
    }

    pub fn handle(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        match command {
            Command::Answer(guess) => {
                let outcome = self.game.answer(&self.progress, &self.question, guess);
                self.commit(outcome.progress.clone())?;
                writeln!(out, "{}", render::outcome(&self.game, &outcome))?;
                out.flush()?;
                if !self.feedback_delay.is_zero() {
                    thread::sleep(self.feedback_delay);
                }
                self.next_question()?;
                self.ask(out)?;
            }
            Command::Levels => writeln!(out, "{}", render::levels(&self.game, &self.progress))?,
            Command::Level(level) => match self.game.select_level(&self.progress, level) {
                Ok(progress) => {
                    self.commit(progress)?;
                    self.next_question()?;
                    self.ask(out)?;
                }
                Err(err) => writeln!(out, "Cannot switch: {err}.")?,
            },
            Command::Hint => match use_hint(&self.progress, &self.question) {
                Ok((progress, hint)) => {
                    let remaining = progress.hints_remaining;
                    self.commit(progress)?;
                    writeln!(out, "{}", render::hint(hint, remaining))?;
                }
                Err(err) => writeln!(out, "No hint: {err}.")?,
            },
            Command::Stats => writeln!(out, "{}", render::stats(&self.game, &self.progress))?,
            Command::Badges => writeln!(out, "{}", render::badges(&self.game, &self.progress))?,
            Command::Name(name) => {
                let mut progress = self.progress.clone();
                progress.player_name = name;
                self.commit(progress)?;
                writeln!(out, "Hello, {}!", self.progress.player_name)?;
            }
            Command::Reset => {
                self.store.clear()?;
                self.progress = self.game.fresh_progress();
                tracing::info!("Progress reset");
                writeln!(out, "Progress erased. Starting over at level 1.")?;
                self.next_question()?;
                self.ask(out)?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => {
                self.store.save(&self.progress)?;
                writeln!(out, "Progress saved. Bye!")?;
                return Ok(Flow::Quit);
            }
            Command::Empty => {}
            Command::Unknown(raw) => {
                writeln!(out, "Didn't understand {raw:?}. Type :help for commands.")?;
            }
        }
        out.flush()?;
        Ok(Flow::Continue)
    }

    fn commit(&mut self, progress: PlayerProgress) -> Result<()> {
        self.progress = progress;
        self.store.save(&self.progress)
    }

    fn next_question(&mut self) -> Result<()> {
        self.question = self.game.next_question(&self.progress, &mut self.rng)?;
        Ok(())
    }

    fn greet(&self, out: &mut impl Write) -> Result<()> {
        if self.progress.player_name.is_empty() {
            writeln!(out, "Welcome to Math Master! Set your name with :name NAME.")?;
        } else {
            writeln!(out, "Welcome back, {}!", self.progress.player_name)?;
        }
        writeln!(out, "Type :help for commands.")?;
        Ok(())
    }

    fn ask(&self, out: &mut impl Write) -> Result<()> {
        let level = self
            .game
            .strategy()
            .level_name(self.progress.current_level)
            .unwrap_or_default();
        writeln!(out)?;
        writeln!(out, "Level {} · {level}", self.progress.current_level)?;
        writeln!(out, "{}", render::question(&self.question))?;
        out.flush()?;
        Ok(())
    }
}
