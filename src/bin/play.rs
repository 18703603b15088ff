use std::io::{self, Write};

use chess_engine::chess::piece::PieceKind;
use chess_engine::config::Config;
use chess_engine::core::square::Square;
use chess_engine::logging::setup_logger;
use chess_engine::save::SaveStore;
use chess_engine::session::Session;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: play <game-name> [--save-dir <dir>] [--new]");
        std::process::exit(2);
    }

    let name = args[1].clone();
    let mut config = Config::from_env();
    let mut create = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--save-dir" => {
                let Some(dir) = args.get(i + 1) else {
                    eprintln!("--save-dir requires a directory argument");
                    std::process::exit(2);
                };
                config = config.with_save_dir(dir);
                i += 2;
            }
            "--new" => {
                create = true;
                i += 1;
            }
            x => {
                eprintln!("Unknown option: {x}");
                std::process::exit(2);
            }
        }
    }

    setup_logger(&config.log_filter);

    let store = SaveStore::new(&config.save_dir);
    let opened = if create {
        Session::create(store.clone(), &name)
    } else {
        Session::open(store.clone(), &name)
    };
    let mut session = match opened {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Could not open game '{name}': {e}");
            print_saved_games(&store);
            std::process::exit(1);
        }
    };

    print_help();

    loop {
        println!();
        println!("{}", session.game().board());

        if let Some(winner) = session.winner() {
            println!("{winner} wins.");
            break;
        }

        let team = session.game().current_team();
        let check = session.game().is_in_check(team).unwrap_or(false);
        match session.pending_promotion() {
            Some(p) => print!("{team} promotes on {} (q/r/b/n) > ", p.square),
            None if check => print!("{team} to move, in check > "),
            None => print!("{team} to move > "),
        }
        io::stdout().flush().ok();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => continue,
            ["help"] => print_help(),
            ["quit"] | ["exit"] => break,
            ["board"] => {}
            ["list"] => print_saved_games(session.store()),
            ["save"] => match session.save() {
                Ok(()) => println!("Saved '{}'.", session.name()),
                Err(e) => println!("Not saved: {e}"),
            },
            ["restart"] => session.restart(),
            ["resign"] => match session.end_game() {
                Ok(winner) => println!("{team} resigns. {winner} wins; save removed."),
                Err(e) => println!("Could not end the game cleanly: {e}"),
            },
            ["promote", kind] | [kind] if session.pending_promotion().is_some() => {
                let Some(kind) = kind.chars().next().and_then(PieceKind::from_letter) else {
                    println!("Choose q, r, b or n.");
                    continue;
                };
                match session.promote(kind) {
                    Ok(piece) => println!("Promoted to {piece}."),
                    Err(e) => println!("{e}"),
                }
            }
            ["move", from, to] | [from, to] => play(&mut session, from, to),
            [mv] if mv.len() == 4 && mv.is_ascii() => play(&mut session, &mv[..2], &mv[2..]),
            _ => println!("Unknown input '{}'. Type 'help' for commands.", line.trim()),
        }
    }
}

fn play(session: &mut Session, from: &str, to: &str) {
    let (from, to) = match (from.parse::<Square>(), to.parse::<Square>()) {
        (Ok(f), Ok(t)) => (f, t),
        (Err(e), _) | (_, Err(e)) => {
            println!("{e}");
            return;
        }
    };
    match session.try_move(from, to) {
        Ok(report) => {
            match report.captured {
                Some(c) => println!("{} {from} takes {c} on {to}.", report.piece),
                None => println!("{} {from} to {to}.", report.piece),
            }
        }
        Err(reason) => println!("Illegal move {from}{to}: {reason}."),
    }
}

fn print_saved_games(store: &SaveStore) {
    match store.list_games() {
        Ok(names) if names.is_empty() => println!("No saved games in {}.", store.dir().display()),
        Ok(names) => {
            println!("Saved games:");
            for n in names {
                println!("  {n}");
            }
        }
        Err(e) => println!("Could not list saved games: {e}"),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  e2e4 | e2 e4 | move e2 e4   move a piece");
    println!("  promote q|r|b|n             choose a promotion piece");
    println!("  save                        save this game");
    println!("  resign                      end the game (the side to move loses)");
    println!("  restart                     start over under the same name");
    println!("  list                        list saved games");
    println!("  board | help | quit");
}
