use chess_engine::chess::board::Board;
use chess_engine::chess::piece::{Piece, PieceKind, Team};
use chess_engine::core::square::Square;
use chess_engine::game::{GameState, IllegalMove};
use chess_engine::promotion::{PendingPromotion, PromotionError};
use chess_engine::save::SaveStore;
use chess_engine::session::{Session, SessionError};

fn sq(x: i32, y: i32) -> Square {
    Square::new(x, y).unwrap()
}

/// A session on the given position, with saves going to a throwaway directory.
fn session_on(
    dir: &tempfile::TempDir,
    pieces: &[(Team, PieceKind, (i32, i32))],
    to_move: Team,
) -> Session {
    let mut board = Board::empty();
    for &(team, kind, (x, y)) in pieces {
        board.set(sq(x, y), Some(Piece::new(team, kind)));
    }
    let mut session = Session::create(SaveStore::new(dir.path()), "promo").unwrap();
    session
        .game_mut()
        .load_state(GameState::new(board, to_move));
    session
}

fn kings() -> Vec<(Team, PieceKind, (i32, i32))> {
    vec![
        (Team::White, PieceKind::King, (0, 0)),
        (Team::Black, PieceKind::King, (7, 4)),
    ]
}

#[test]
fn pawn_on_the_far_rank_holds_the_turn_until_promoted() {
    let dir = tempfile::tempdir().unwrap();
    let mut pieces = kings();
    pieces.push((Team::White, PieceKind::Pawn, (1, 6)));
    pieces.push((Team::Black, PieceKind::Pawn, (6, 6)));
    let mut session = session_on(&dir, &pieces, Team::White);

    session.try_move(sq(1, 6), sq(1, 7)).unwrap();
    assert_eq!(
        session.pending_promotion(),
        Some(PendingPromotion {
            square: sq(1, 7),
            team: Team::White,
        })
    );
    assert_eq!(session.game().current_team(), Team::White);

    assert_eq!(
        session.try_move(sq(6, 6), sq(6, 5)),
        Err(IllegalMove::PromotionPending)
    );
    assert!(matches!(session.save(), Err(SessionError::PromotionPending)));
    assert!(matches!(
        session.promote(PieceKind::King),
        Err(SessionError::Promotion(PromotionError::InvalidKind(
            PieceKind::King
        )))
    ));
    assert!(matches!(
        session.promote(PieceKind::Pawn),
        Err(SessionError::Promotion(PromotionError::InvalidKind(_)))
    ));

    let queen = session.promote(PieceKind::Queen).unwrap();
    assert_eq!(queen, Piece::new(Team::White, PieceKind::Queen));
    assert_eq!(session.game().get_piece(1, 7), Some(&queen));
    assert_eq!(session.pending_promotion(), None);
    assert_eq!(session.game().current_team(), Team::Black);

    session.try_move(sq(6, 6), sq(6, 5)).unwrap();
    session.save().unwrap();
}

#[test]
fn promotion_after_a_capture_and_for_black() {
    let dir = tempfile::tempdir().unwrap();
    let mut pieces = kings();
    pieces.push((Team::Black, PieceKind::Pawn, (5, 1)));
    pieces.push((Team::White, PieceKind::Rook, (6, 0)));
    let mut session = session_on(&dir, &pieces, Team::Black);

    let report = session.try_move(sq(5, 1), sq(6, 0)).unwrap();
    assert_eq!(
        report.captured,
        Some(Piece::new(Team::White, PieceKind::Rook))
    );
    assert_eq!(
        session.pending_promotion().map(|p| p.team),
        Some(Team::Black)
    );
    assert_eq!(session.game().current_team(), Team::Black);

    let knight = session.promote(PieceKind::Knight).unwrap();
    assert_eq!(knight.team(), Team::Black);
    assert_eq!(session.game().current_team(), Team::White);
}

#[test]
fn nothing_to_promote_outside_the_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::create(SaveStore::new(dir.path()), "fresh").unwrap();
    assert!(matches!(
        session.promote(PieceKind::Queen),
        Err(SessionError::Promotion(PromotionError::NothingPending))
    ));

    session.try_move(sq(4, 1), sq(4, 3)).unwrap();
    assert_eq!(session.pending_promotion(), None);
    assert_eq!(session.game().current_team(), Team::Black);
}

#[test]
fn restart_drops_a_pending_promotion() {
    let dir = tempfile::tempdir().unwrap();
    let mut pieces = kings();
    pieces.push((Team::White, PieceKind::Pawn, (3, 6)));
    let mut session = session_on(&dir, &pieces, Team::White);

    session.try_move(sq(3, 6), sq(3, 7)).unwrap();
    assert!(session.pending_promotion().is_some());

    session.restart();
    assert_eq!(session.pending_promotion(), None);
    assert_eq!(session.game().board().count(), 32);
    assert_eq!(session.game().current_team(), Team::White);
}
