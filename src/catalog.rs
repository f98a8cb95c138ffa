//! Static puzzle and replay data shipped with the academy.
//!
//! Everything here is trusted build-time configuration; the tests parse every
//! entry so a typo fails the build pipeline instead of a player's session.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PuzzleConfig {
    pub label: &'static str,
    /// Layout notation with side to move, e.g. `"... w"`.
    pub layout: &'static str,
    /// Expected `(from, to)` steps, both sides included.
    pub solution: &'static [(&'static str, &'static str)],
    pub hint_square: &'static str,
    pub description: &'static str,
    pub success_message: &'static str,
    /// Any legal move is accepted; mate solves it.
    pub free_play: bool,
}

pub const PUZZLES: &[PuzzleConfig] = &[
    PuzzleConfig {
        label: "Fork",
        layout: "2b2k2/1p2q1p1/p4p1p/3pN3/3P4/7P/PP1Q1PP1/6K1 w - - 0 1",
        solution: &[("e5", "g6")],
        hint_square: "e5",
        description: "White to move. Find the winning tactic!",
        success_message: "Ng6+! Royal fork -- Knight attacks King & Queen!",
        free_play: false,
    },
    PuzzleConfig {
        label: "Rook",
        layout: "4r3/1p6/2p2p2/b3k1p1/3p4/1P2p1RP/1BP1P2P/3K4 w - - 0 1",
        solution: &[("g3", "e3"), ("e5", "f5"), ("e3", "e8")],
        hint_square: "g3",
        description: "White to move. Find the 3-move winning combination!",
        success_message: "Rxe3+ Kf5 Rxe8! Rook wins the rook -- excellent combination!",
        free_play: false,
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReplayPly {
    pub from: &'static str,
    pub to: &'static str,
    pub caption: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReplayScript {
    pub title: &'static str,
    /// Caption of the initial position.
    pub intro: &'static str,
    pub plies: &'static [ReplayPly],
}

const fn ply(from: &'static str, to: &'static str, caption: &'static str) -> ReplayPly {
    ReplayPly { from, to, caption }
}

pub const ALEKHINE_FOUR_PAWNS: ReplayScript = ReplayScript {
    title: "Alekhine Defence, Four Pawns Attack",
    intro: "Starting position. White to move.",
    plies: &[
        ply("e2", "e4", "1. e4 -- White claims the centre."),
        ply("g8", "f6", "1... Nf6 -- Alekhine's Defence invites the pawns forward."),
        ply("e4", "e5", "2. e5 -- The pawn chases the knight."),
        ply("f6", "d5", "2... Nd5 -- The knight hops to the centre."),
        ply("d2", "d4", "3. d4 -- Another pawn joins the centre."),
        ply("d7", "d6", "3... d6 -- Black strikes at the pawn chain."),
        ply("c2", "c4", "4. c4 -- The knight is kicked again."),
        ply("d5", "b6", "4... Nb6 -- The knight retreats to b6."),
        ply("f2", "f4", "5. f4 -- The Four Pawns Attack."),
        ply("d6", "e5", "5... dxe5 -- Black trades in the centre."),
        ply("f4", "e5", "6. fxe5 -- White recaptures with the f-pawn."),
        ply("b8", "c6", "6... Nc6 -- Pressure on e5."),
        ply("c1", "e3", "7. Be3 -- The bishop guards d4."),
        ply("c8", "f5", "7... Bf5 -- Black develops actively."),
        ply("b1", "c3", "8. Nc3 -- Development continues."),
        ply("e7", "e6", "8... e6 -- The f8 bishop is freed."),
        ply("g1", "f3", "9. Nf3 -- White completes the kingside pieces."),
        ply("f8", "e7", "9... Be7 -- Black prepares to castle."),
        ply("f1", "e2", "10. Be2 -- White does the same."),
        ply("e8", "g8", "10... O-O -- Black castles king side."),
        ply("e1", "g1", "11. O-O -- White castles king side."),
        ply("f7", "f6", "11... f6 -- Black finally hits the e5 pawn."),
    ],
};
