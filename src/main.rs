use std::env;

use anyhow::{bail, Context, Result};
use chess_academy::catalog::{ALEKHINE_FOUR_PAWNS, PUZZLES};
use chess_academy::config::Settings;
use chess_academy::{
    Board, Game, GameStatus, MatchInterface, PieceKind, PuzzleSession, PuzzleStatus,
    ReplayViewer, Square,
};
use log::info;

const USAGE: &str = "\
usage:
  academy replay                      step through the scripted game
  academy puzzles                     list the puzzles
  academy puzzle <index> <move>...    play moves like e5g6 against a puzzle
  academy play <move>...              free game, promotions as e7e8q";

fn main() -> Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("replay") => replay(),
        Some("puzzles") => {
            for (index, puzzle) in PUZZLES.iter().enumerate() {
                println!("{index}: {} -- {}", puzzle.label, puzzle.description);
            }
            Ok(())
        }
        Some("puzzle") => puzzle(&args[1..]),
        Some("play") => play(&args[1..]),
        _ => {
            println!("{USAGE}");
            Ok(())
        }
    }
}

/// `e2e4` or `e7e8q`.
fn parse_move(token: &str) -> Result<(Square, Square, Option<PieceKind>)> {
    if !token.is_ascii() || !(4..=5).contains(&token.len()) {
        bail!("'{token}' is not a move, expected something like e2e4");
    }
    let from = token[0..2].parse::<Square>().with_context(|| format!("bad move '{token}'"))?;
    let to = token[2..4].parse::<Square>().with_context(|| format!("bad move '{token}'"))?;
    let promotion = match token[4..].chars().next() {
        None => None,
        Some(letter) => Some(
            PieceKind::from_letter(letter)
                .with_context(|| format!("unknown promotion piece '{letter}'"))?,
        ),
    };
    Ok((from, to, promotion))
}

/// Kind a move promotes to: the suffix, a queen by default, nothing when the
/// move doesn't promote. A suffix on a non-promoting move is an error.
fn promotion_for(
    board: &Board,
    from: Square,
    to: Square,
    suffix: Option<PieceKind>,
) -> Result<Option<PieceKind>> {
    if board.is_promotion(from, to) {
        Ok(Some(suffix.unwrap_or(PieceKind::Queen)))
    } else if let Some(kind) = suffix {
        bail!("{from}{to} does not promote, drop the '{}' suffix", kind.letter())
    } else {
        Ok(None)
    }
}

fn replay() -> Result<()> {
    let mut viewer = ReplayViewer::new(&ALEKHINE_FOUR_PAWNS).context("replay script is broken")?;
    println!("{}\n", viewer.title());
    loop {
        let snapshot = viewer.current();
        println!("[{}/{}] {}", viewer.cursor(), viewer.len() - 1, viewer.caption());
        println!("{}\n", snapshot.board);
        if !viewer.step_forward() {
            break;
        }
    }
    Ok(())
}

fn puzzle(args: &[String]) -> Result<()> {
    let index: usize = args
        .first()
        .context("puzzle index missing")?
        .parse()
        .context("puzzle index must be a number")?;
    let config = *PUZZLES.get(index).with_context(|| format!("no puzzle #{index}"))?;
    let mut session =
        PuzzleSession::new(config, Settings::from_env()).context("puzzle layout is broken")?;
    println!("{}: {}\n{}\n", config.label, config.description, session.board());
    for token in &args[1..] {
        let (from, to, suffix) = parse_move(token)?;
        if let Some(kind) = promotion_for(session.board(), from, to, suffix)? {
            if kind != PieceKind::Queen {
                bail!("puzzles always promote to a queen, got {token}");
            }
        }
        let status = session
            .submit(from, to)
            .with_context(|| format!("move {token} rejected"))?;
        println!("{token}: {status:?}\n{}\n", session.board());
    }
    match session.puzzle_status() {
        PuzzleStatus::Solved => println!("{}", config.success_message),
        status => info!("Puzzle left in {status:?} after step {}", session.step()),
    }
    Ok(())
}

fn play(args: &[String]) -> Result<()> {
    let mut game = Game::default();
    for token in args {
        let (from, to, suffix) = parse_move(token)?;
        let promotion = promotion_for(game.board(), from, to, suffix)?;
        let mut status = game
            .apply(from, to)
            .with_context(|| format!("move {token} rejected"))?;
        if let (Some((square, color)), Some(kind)) = (game.pending_promotion(), promotion) {
            info!("{color} pawn on {square} becomes {kind:?}");
            status = game.promote(kind)?;
        }
        println!("{token}: {status:?}");
    }
    println!("{}", game.board());
    match game.status() {
        GameStatus::Checkmate => println!("Checkmate! {} wins!", game.turn().opposite()),
        GameStatus::Stalemate => println!("Stalemate! Draw."),
        GameStatus::Check => println!("{}'s turn -- CHECK!", game.turn()),
        GameStatus::Playing => println!("{}'s turn", game.turn()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn move_tokens() {
        assert_eq!(parse_move("e2e4").unwrap(), (sq("e2"), sq("e4"), None));
        assert_eq!(
            parse_move("e7e8n").unwrap(),
            (sq("e7"), sq("e8"), Some(PieceKind::Knight))
        );
        assert!(parse_move("e2").is_err());
        assert!(parse_move("e2e9").is_err());
        assert!(parse_move("e7e8x").is_err());
    }

    #[test]
    fn promotion_suffix_needs_a_promotion() {
        let board = Board::default();
        assert!(promotion_for(&board, sq("e2"), sq("e4"), Some(PieceKind::Queen)).is_err());
        assert_eq!(promotion_for(&board, sq("e2"), sq("e4"), None).unwrap(), None);

        let board = chess_academy::import("8/P6k/8/8/8/8/8/4K3").unwrap();
        assert_eq!(
            promotion_for(&board, sq("a7"), sq("a8"), None).unwrap(),
            Some(PieceKind::Queen)
        );
        assert_eq!(
            promotion_for(&board, sq("a7"), sq("a8"), Some(PieceKind::Rook)).unwrap(),
            Some(PieceKind::Rook)
        );
    }

    #[test]
    fn play_rejects_stray_suffix() {
        assert!(play(&["e2e4q".to_owned()]).is_err());
        assert!(play(&["e2e4".to_owned(), "e7e5".to_owned()]).is_ok());
    }
}
