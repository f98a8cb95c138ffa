use log::{debug, info};

use crate::catalog::PuzzleConfig;
use crate::config::Settings;
use crate::core::definitions::{GameStatus, MatchInterface, MoveError, SetupError};
use crate::core::engine::{Board, Color};
use crate::core::game::{Game, PromotionPolicy};
use crate::core::utils::{parse_pair, Square};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleStatus {
    Playing,
    Check,
    /// Wrong move played; the session resets when the flash runs out.
    Wrong,
    Solved,
    Stalemate,
}

impl PuzzleStatus {
    fn from_game(status: GameStatus) -> PuzzleStatus {
        match status {
            GameStatus::Playing => PuzzleStatus::Playing,
            GameStatus::Check => PuzzleStatus::Check,
            GameStatus::Checkmate => PuzzleStatus::Solved,
            GameStatus::Stalemate => PuzzleStatus::Stalemate,
        }
    }

    pub fn accepts_moves(&self) -> bool {
        matches!(self, PuzzleStatus::Playing | PuzzleStatus::Check)
    }
}

/// A puzzle being played, validated step by step against its solution.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    config: PuzzleConfig,
    settings: Settings,
    start: Game,
    game: Game,
    solution: Vec<(Square, Square)>,
    hint_square: Square,
    step: usize,
    status: PuzzleStatus,
    flash_timer: u32,
    hint_timer: u32,
    correct_timer: u32,
}

impl PuzzleSession {
    pub fn new(config: PuzzleConfig, settings: Settings) -> Result<PuzzleSession, SetupError> {
        let start = Game::from_notation(config.layout)?.with_policy(PromotionPolicy::AutoQueen);
        let solution = config
            .solution
            .iter()
            .map(|(from, to)| parse_pair(from, to))
            .collect::<Result<Vec<_>, _>>()?;
        let hint_square = config.hint_square.parse()?;
        debug!("Loaded puzzle '{}' ({} steps)", config.label, solution.len());
        Ok(PuzzleSession {
            config,
            settings,
            game: start.clone(),
            start,
            solution,
            hint_square,
            step: 0,
            status: PuzzleStatus::Playing,
            flash_timer: 0,
            hint_timer: 0,
            correct_timer: 0,
        })
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn puzzle_status(&self) -> PuzzleStatus {
        self.status
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Back to the starting position, timers cleared.
    pub fn reset(&mut self) {
        self.game = self.start.clone();
        self.step = 0;
        self.status = PuzzleStatus::Playing;
        self.flash_timer = 0;
        self.hint_timer = 0;
        self.correct_timer = 0;
        debug!("Puzzle '{}' reset", self.config.label);
    }

    /// Loads another puzzle in place, keeping the settings.
    pub fn switch(&mut self, config: PuzzleConfig) -> Result<(), SetupError> {
        *self = PuzzleSession::new(config, self.settings)?;
        Ok(())
    }

    /// Whether `from`-`to` is the next expected solution step.
    pub fn matches_step(&self, from: Square, to: Square) -> bool {
        self.solution.get(self.step) == Some(&(from, to))
    }

    pub fn submit(&mut self, from: Square, to: Square) -> Result<PuzzleStatus, MoveError> {
        if !self.status.accepts_moves() {
            return Err(MoveError::GameOver);
        }
        if self.config.free_play {
            let status = self.game.apply(from, to)?;
            self.status = PuzzleStatus::from_game(status);
        } else {
            // compared before the move changes the position
            let correct = self.matches_step(from, to);
            let status = self.game.apply(from, to)?;
            if correct {
                self.step += 1;
                self.correct_timer = self.settings.correct_frames();
                self.status = if self.step >= self.solution.len() {
                    PuzzleStatus::Solved
                } else {
                    PuzzleStatus::from_game(status)
                };
            } else {
                info!("Wrong move {from}-{to} in puzzle '{}'", self.config.label);
                self.status = PuzzleStatus::Wrong;
                self.flash_timer = self.settings.wrong_flash_frames().max(1);
            }
        }
        if self.status == PuzzleStatus::Solved {
            info!("Puzzle '{}' solved: {}", self.config.label, self.config.success_message);
        }
        Ok(self.status)
    }

    /// Advances every timer by one frame.
    pub fn tick(&mut self) {
        self.hint_timer = self.hint_timer.saturating_sub(1);
        self.correct_timer = self.correct_timer.saturating_sub(1);
        if self.status == PuzzleStatus::Wrong && self.flash_timer > 0 {
            self.flash_timer -= 1;
            if self.flash_timer == 0 {
                self.reset();
            }
        }
    }

    pub fn show_hint(&mut self) {
        if self.status != PuzzleStatus::Solved {
            self.hint_timer = self.settings.hint_frames();
        }
    }

    pub fn hint(&self) -> Option<Square> {
        (self.hint_timer > 0).then_some(self.hint_square)
    }

    /// Destination of the last correct step while it is highlighted.
    pub fn correct_highlight(&self) -> Option<Square> {
        if self.config.free_play || self.correct_timer == 0 || self.step == 0 {
            return None;
        }
        self.solution.get(self.step - 1).map(|(_, to)| *to)
    }

    /// Remaining share of the wrong-move flash, from 1.0 down to 0.0.
    pub fn flash_intensity(&self) -> f32 {
        match self.settings.wrong_flash_frames() {
            0 => 0.0,
            total => self.flash_timer as f32 / total as f32,
        }
    }
}

impl MatchInterface for PuzzleSession {
    fn board(&self) -> &Board {
        self.game.board()
    }

    fn status(&self) -> GameStatus {
        self.game.status()
    }

    fn current_player(&self) -> Color {
        self.game.current_player()
    }

    fn last_move(&self) -> Option<(Square, Square)> {
        self.game.last_move()
    }

    fn pending_promotion(&self) -> Option<(Square, Color)> {
        None
    }

    fn possible_moves(&self, square: Square) -> Result<Vec<Square>, MoveError> {
        if self.status.accepts_moves() {
            self.game.possible_moves(square)
        } else {
            Ok(Vec::new())
        }
    }

    fn accepts_moves(&self) -> bool {
        self.status.accepts_moves() && self.game.accepts_moves()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// No puzzle in that direction.
    Unavailable,
    /// The current puzzle is unsolved, the player has to confirm leaving it.
    NeedsConfirmation,
    /// Solved puzzle, the switch happens once the delay runs out.
    Scheduled,
    Switched,
}

#[derive(Clone, Copy, Debug)]
enum PendingSwitch {
    Unconfirmed(usize),
    Delayed { target: usize, frames: u32 },
}

/// Moves between the puzzles of a catalog.
#[derive(Debug, Clone)]
pub struct PuzzleNavigator {
    puzzles: &'static [PuzzleConfig],
    settings: Settings,
    index: usize,
    session: PuzzleSession,
    pending: Option<PendingSwitch>,
}

impl PuzzleNavigator {
    pub fn new(
        puzzles: &'static [PuzzleConfig],
        settings: Settings,
    ) -> Result<PuzzleNavigator, SetupError> {
        let first = puzzles.first().copied().ok_or(SetupError::EmptyCatalog)?;
        Ok(PuzzleNavigator {
            puzzles,
            settings,
            index: 0,
            session: PuzzleSession::new(first, settings)?,
            pending: None,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn session(&self) -> &PuzzleSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PuzzleSession {
        &mut self.session
    }

    pub fn has(&self, direction: Direction) -> bool {
        self.target(direction).is_some()
    }

    fn target(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Previous => self.index.checked_sub(1),
            Direction::Next => Some(self.index + 1).filter(|next| *next < self.puzzles.len()),
        }
    }

    pub fn request(&mut self, direction: Direction) -> Result<NavOutcome, SetupError> {
        let Some(target) = self.target(direction) else {
            return Ok(NavOutcome::Unavailable);
        };
        if self.session.puzzle_status() == PuzzleStatus::Solved {
            let frames = self.settings.nav_frames();
            if frames == 0 {
                self.switch_to(target)?;
                return Ok(NavOutcome::Switched);
            }
            self.pending = Some(PendingSwitch::Delayed { target, frames });
            Ok(NavOutcome::Scheduled)
        } else {
            self.pending = Some(PendingSwitch::Unconfirmed(target));
            Ok(NavOutcome::NeedsConfirmation)
        }
    }

    pub fn awaiting_confirmation(&self) -> bool {
        matches!(self.pending, Some(PendingSwitch::Unconfirmed(_)))
    }

    /// Leaves the unsolved puzzle. Returns whether a switch happened.
    pub fn confirm(&mut self) -> Result<bool, SetupError> {
        match self.pending {
            Some(PendingSwitch::Unconfirmed(target)) => {
                self.switch_to(target)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn stay(&mut self) {
        if self.awaiting_confirmation() {
            self.pending = None;
        }
    }

    pub fn tick(&mut self) -> Result<(), SetupError> {
        self.session.tick();
        if let Some(PendingSwitch::Delayed { target, frames }) = self.pending {
            if frames <= 1 {
                self.switch_to(target)?;
            } else {
                self.pending = Some(PendingSwitch::Delayed {
                    target,
                    frames: frames - 1,
                });
            }
        }
        Ok(())
    }

    fn switch_to(&mut self, target: usize) -> Result<(), SetupError> {
        let config = self.puzzles[target];
        self.session.switch(config)?;
        self.index = target;
        self.pending = None;
        info!("Switched to puzzle '{}'", config.label);
        Ok(())
    }
}
