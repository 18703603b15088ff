use std::cell::RefCell;
use std::rc::Rc;

use chess_engine::chess::board::Board;
use chess_engine::chess::piece::{Piece, PieceKind, Team};
use chess_engine::core::square::Square;
use chess_engine::game::{BoardEvent, EventLog, Game, GameObserver, GameState};

fn sq(x: i32, y: i32) -> Square {
    Square::new(x, y).unwrap()
}

fn watched(game: &mut Game) -> Rc<RefCell<EventLog>> {
    let log = Rc::new(RefCell::new(EventLog::default()));
    game.subscribe(Box::new(Rc::clone(&log)));
    log
}

#[test]
fn quiet_move_places_then_removes() {
    let mut game = Game::new();
    game.start_new_game();
    let log = watched(&mut game);

    assert!(game.try_move_piece(4, 1, 4, 3));

    let mut moved = Piece::new(Team::White, PieceKind::Pawn);
    moved.on_moved();
    assert_eq!(
        log.borrow_mut().take(),
        vec![
            BoardEvent::Placed {
                piece: moved,
                square: sq(4, 3),
            },
            BoardEvent::Removed {
                piece: Piece::new(Team::White, PieceKind::Pawn),
                square: sq(4, 1),
            },
        ]
    );
}

#[test]
fn capture_announces_the_victim_first() {
    let mut board = Board::empty();
    board.set(sq(4, 0), Some(Piece::new(Team::White, PieceKind::King)));
    board.set(sq(4, 7), Some(Piece::new(Team::Black, PieceKind::King)));
    board.set(sq(0, 0), Some(Piece::new(Team::White, PieceKind::Rook)));
    board.set(sq(0, 5), Some(Piece::new(Team::Black, PieceKind::Knight)));
    let mut game = Game::from_state(GameState::new(board, Team::White));
    let log = watched(&mut game);

    assert!(game.try_move_piece(0, 0, 0, 5));

    let events = log.borrow_mut().take();
    assert_eq!(
        events,
        vec![
            BoardEvent::Removed {
                piece: Piece::new(Team::Black, PieceKind::Knight),
                square: sq(0, 5),
            },
            BoardEvent::Placed {
                piece: Piece::with_moved(Team::White, PieceKind::Rook, true),
                square: sq(0, 5),
            },
            BoardEvent::Removed {
                piece: Piece::new(Team::White, PieceKind::Rook),
                square: sq(0, 0),
            },
        ]
    );
}

#[test]
fn load_is_a_single_event_and_from_state_is_silent() {
    let log = Rc::new(RefCell::new(EventLog::default()));
    let mut game = Game::from_state(GameState::standard());
    game.subscribe(Box::new(Rc::clone(&log)));
    assert!(log.borrow().events.is_empty());

    game.load_state(GameState::standard());
    assert_eq!(log.borrow_mut().take(), vec![BoardEvent::Loaded]);

    game.clear_board();
    assert_eq!(log.borrow_mut().take(), vec![BoardEvent::Cleared]);
    assert_eq!(game.board().count(), 0);
}

#[test]
fn unsubscribed_observers_hear_nothing_more() {
    let mut game = Game::new();
    let log = Rc::new(RefCell::new(EventLog::default()));
    let id = game.subscribe(Box::new(Rc::clone(&log)));
    let other = watched(&mut game);

    assert!(game.unsubscribe(id));
    assert!(!game.unsubscribe(id));
    game.start_new_game();

    assert!(log.borrow().events.is_empty());
    assert_eq!(other.borrow().events.len(), 33);
}

/// Observers can be any type, not just the bundled log.
#[derive(Default)]
struct SquareCounter {
    occupied: usize,
}

impl GameObserver for SquareCounter {
    fn on_event(&mut self, event: &BoardEvent) {
        match event {
            BoardEvent::Placed { .. } => self.occupied += 1,
            BoardEvent::Removed { .. } => self.occupied -= 1,
            BoardEvent::Cleared => self.occupied = 0,
            _ => {}
        }
    }
}

#[test]
fn event_stream_is_enough_to_mirror_the_board() {
    let counter = Rc::new(RefCell::new(SquareCounter::default()));
    let mut game = Game::new();
    game.subscribe(Box::new(Rc::clone(&counter)));
    game.start_new_game();

    let moves = [(4, 1, 4, 3), (3, 6, 3, 4), (4, 3, 3, 4), (4, 7, 3, 6)];
    for (fx, fy, tx, ty) in moves {
        assert!(game.try_move_piece(fx, fy, tx, ty), "{fx},{fy} -> {tx},{ty}");
    }
    assert_eq!(counter.borrow().occupied, game.board().count());
    assert_eq!(game.board().count(), 31);
}
