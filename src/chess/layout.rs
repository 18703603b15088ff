use crate::chess::piece::{Piece, PieceKind, Team};
use crate::core::square::Square;

/// Back-rank pieces in placement order, as `(kind, files)`.
///
/// Kings go on the d-file and queens on the e-file.
const BACK_RANK: [(PieceKind, &[i32]); 5] = [
    (PieceKind::King, &[3]),
    (PieceKind::Queen, &[4]),
    (PieceKind::Bishop, &[2, 5]),
    (PieceKind::Knight, &[1, 6]),
    (PieceKind::Rook, &[0, 7]),
];

/// The opening position as an ordered list of placements.
///
/// Order matters to observers: pawns file by file (White before Black on each file), then the
/// back-rank groups of [`BACK_RANK`], White's pieces of a group before Black's.
pub fn standard_setup() -> Vec<(Piece, Square)> {
    let mut out = Vec::with_capacity(32);

    for x in 0..8 {
        push(&mut out, Team::White, PieceKind::Pawn, x, 1);
        push(&mut out, Team::Black, PieceKind::Pawn, x, 6);
    }

    for (kind, files) in BACK_RANK {
        for team in [Team::White, Team::Black] {
            for &x in files {
                push(&mut out, team, kind, x, home_rank(team));
            }
        }
    }

    out
}

#[inline]
fn home_rank(team: Team) -> i32 {
    match team {
        Team::White => 0,
        Team::Black => 7,
    }
}

fn push(out: &mut Vec<(Piece, Square)>, team: Team, kind: PieceKind, x: i32, y: i32) {
    if let Some(sq) = Square::new(x, y) {
        out.push((Piece::new(team, kind), sq));
    }
}
