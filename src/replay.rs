use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::catalog::ReplayScript;
use crate::core::definitions::{MoveError, SetupError};
use crate::core::engine::{Board, PieceKind};
use crate::core::utils::{parse_pair, Square};

/// Position after one ply, with the move that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    /** `None` for the initial position */
    pub last_move: Option<(Square, Square)>,
}

/// Every position of a scripted game, index 0 being the initial one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replay {
    snapshots: Vec<Snapshot>,
}

/// Replays `moves` from the standard start position.
///
/// The script is trusted: moves are executed with full mechanics (en passant,
/// castling, queen promotion) but never checked for legality. Only a move
/// from an empty square is refused.
pub fn build_replay(moves: &[(Square, Square)]) -> Result<Replay, MoveError> {
    let mut board = Board::default();
    let mut en_passant = None;
    let mut snapshots = Vec::with_capacity(moves.len() + 1);
    snapshots.push(Snapshot {
        board,
        last_move: None,
    });
    for &(from, to) in moves {
        let executed = board.execute(from, to, en_passant)?;
        if let Some(square) = executed.promotion {
            board.promote(square, PieceKind::Queen)?;
        }
        en_passant = executed.en_passant_target;
        snapshots.push(Snapshot {
            board,
            last_move: Some((from, to)),
        });
    }
    debug!("Built replay of {} plies", moves.len());
    Ok(Replay { snapshots })
}

impl Replay {
    pub fn from_script(script: &ReplayScript) -> Result<Replay, SetupError> {
        let moves = script
            .plies
            .iter()
            .map(|ply| parse_pair(ply.from, ply.to))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(build_replay(&moves)?)
    }

    /// Number of snapshots, initial position included.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}

/// Read cursor over a built replay and its captions.
#[derive(Clone, Debug)]
pub struct ReplayViewer {
    title: &'static str,
    replay: Replay,
    captions: Vec<&'static str>,
    cursor: usize,
}

impl ReplayViewer {
    pub fn new(script: &ReplayScript) -> Result<ReplayViewer, SetupError> {
        let replay = Replay::from_script(script)?;
        let captions = std::iter::once(script.intro)
            .chain(script.plies.iter().map(|ply| ply.caption))
            .collect();
        info!("Loaded replay '{}' with {} steps", script.title, replay.len());
        Ok(ReplayViewer {
            title: script.title,
            replay,
            captions,
            cursor: 0,
        })
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn replay(&self) -> &Replay {
        &self.replay
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.replay.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replay.is_empty()
    }

    pub fn is_at_start(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor + 1 >= self.replay.len()
    }

    pub fn current(&self) -> &Snapshot {
        &self.replay.snapshots[self.cursor]
    }

    pub fn caption(&self) -> &'static str {
        self.captions.get(self.cursor).copied().unwrap_or_default()
    }

    /// Returns whether the cursor moved.
    pub fn step_forward(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn step_back(&mut self) -> bool {
        if self.is_at_start() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn go_to(&mut self, index: usize) -> Option<&Snapshot> {
        let snapshot = self.replay.snapshots.get(index)?;
        self.cursor = index;
        Some(snapshot)
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}
