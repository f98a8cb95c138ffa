use std::env;

use anyhow::{bail, Context, Result};
use chess_academy::utils::perft;
use chess_academy::{Game, MatchInterface};
use log::info;

/// `perft-debug "<layout> [w|b]" <depth> <expected>`
fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let layout = args.get(1).context("layout missing")?;
    let depth: usize = args
        .get(2)
        .context("depth missing")?
        .parse()
        .context("depth must be a number")?;
    let expected: usize = args
        .get(3)
        .context("expected count missing")?
        .parse()
        .context("expected count must be a number")?;
    let game = Game::from_notation(layout)?;
    info!("Perft {depth} from {layout}, {} to move", game.current_player());
    if depth == 1 {
        for (from, to) in game.board().all_legal_moves(game.turn(), game.en_passant_target())? {
            println!("{from}{to}");
        }
    }
    let result = perft(&game, depth)?;
    println!("{result}");
    if result.all != expected {
        bail!("found {} moves, expected {expected}", result.all);
    }
    Ok(())
}
