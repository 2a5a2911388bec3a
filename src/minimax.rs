use log::{debug, trace};

use crate::game::Game;

/// Depth-bounded minimax. Scores are from the maximizer's side: +1 it wins,
/// -1 its opponent wins, 0 for a draw or anything past the depth limit.
pub(crate) struct Minimax<G: Game> {
    maximizer: G::Player,
}

impl<G: Game> Minimax<G> {
    pub(crate) fn new(maximizer: G::Player) -> Self {
        Self { maximizer }
    }

    /// Best action for `to_move` and its score. Nothing is cached between
    /// calls and `game` is never touched; every branch works on its own clone.
    pub(crate) fn best_move(
        &self,
        game: &G,
        to_move: G::Player,
        depth_limit: usize,
    ) -> anyhow::Result<(i32, Option<G::Action>)> {
        let mut visited = 0;
        let result = self.search(game, to_move, 0, depth_limit, &mut visited)?;
        debug!(
            "searched {} positions for {:?} at depth limit {}",
            visited, to_move, depth_limit
        );
        Ok(result)
    }

    fn search(
        &self,
        game: &G,
        to_move: G::Player,
        depth: usize,
        depth_limit: usize,
        visited: &mut usize,
    ) -> anyhow::Result<(i32, Option<G::Action>)> {
        *visited += 1;

        match game.check_winner() {
            Some(winner) if winner == self.maximizer => return Ok((1, None)),
            Some(_) => return Ok((-1, None)),
            None => {}
        }
        if game.done() || depth >= depth_limit {
            return Ok((0, None));
        }

        // Flipping the sign for the minimizer lets both sides keep the first
        // strictly better score, so row-major order breaks ties either way.
        let sign = if to_move == self.maximizer { 1 } else { -1 };
        let mut best: Option<(i32, G::Action)> = None;
        for action in game.get_available_moves() {
            let mut child = game.clone();
            child.step(action, to_move)?;
            let (score, _) = self.search(&child, G::opponent(to_move), depth + 1, depth_limit, visited)?;
            trace!("depth {} {:?} plays {:?}: {}", depth, to_move, action, score);
            if best.map_or(true, |(best_score, _)| sign * score > sign * best_score) {
                best = Some((score, action));
            }
        }

        Ok(match best {
            Some((score, action)) => (score, Some(action)),
            None => (0, None),
        })
    }
}
