use crate::chess::board::Board;
use crate::chess::piece::{Piece, PieceKind};
use crate::core::coord::Coord;
use crate::core::square::Square;

/// True iff `piece`, standing on `from`, may move to `to` on the current `board`.
///
/// The destination's occupant is never checked against the mover's team: the controller rejects
/// self-captures, and check detection relies on friendly destinations counting as attacked.
pub fn can_move(piece: &Piece, board: &Board, from: Square, to: Square) -> bool {
    let d = to.coord() - from.coord();
    use PieceKind::*;
    match piece.kind() {
        Pawn => pawn_can_move(piece, board, from, to, d),
        Knight => {
            let ax = d.x.abs();
            let ay = d.y.abs();
            (ax == 2 && ay == 1) || (ax == 1 && ay == 2)
        }
        Bishop => d.x != 0 && d.x.abs() == d.y.abs() && ray_clear(board, from, d),
        Rook => (d.x == 0) != (d.y == 0) && ray_clear(board, from, d),
        Queen => d.line_step().is_some() && ray_clear(board, from, d),
        King => d.chebyshev_norm() <= 1,
    }
}

fn pawn_can_move(piece: &Piece, board: &Board, from: Square, to: Square, d: Coord) -> bool {
    let forward = piece.team().forward();

    if d.x == 0 {
        if board.is_occupied(to) {
            return false;
        }
        if d.y == forward {
            return true;
        }
        if d.y == 2 * forward && !piece.has_moved() {
            // The square passed over must be empty too.
            return from
                .offset(Coord::new(0, forward))
                .is_some_and(|mid| !board.is_occupied(mid));
        }
        return false;
    }

    // Diagonal steps are capture-only.
    d.x.abs() == 1 && d.y == forward && board.is_occupied(to)
}

/// No piece stands strictly between `from` and `from + d`.
///
/// `d` must lie on a rank, file or diagonal; anything else is reported as blocked.
fn ray_clear(board: &Board, from: Square, d: Coord) -> bool {
    let Some((step, dist)) = d.line_step() else {
        return false;
    };
    (1..dist).all(|i| {
        from.offset(step * i)
            .is_some_and(|sq| !board.is_occupied(sq))
    })
}
