use crate::chess::board::Board;
use crate::chess::piece::Team;
use crate::core::square::Square;

use super::movement::can_move;

/// True iff any piece of the team opposing `team` could move to `target`.
///
/// A piece standing on `target` itself never counts as attacking it.
pub fn is_square_attacked(board: &Board, team: Team, target: Square) -> bool {
    let enemy = team.other();
    board
        .pieces()
        .filter(|(from, p)| p.team() == enemy && *from != target)
        .any(|(from, p)| can_move(p, board, from, target))
}

/// Whether `team`'s king is attacked.
///
/// `None` if `team` has no king on the board, which normal play never produces.
pub fn is_in_check(board: &Board, team: Team) -> Option<bool> {
    let king = board.find_king(team)?;
    Some(is_square_attacked(board, team, king))
}
