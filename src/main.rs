//! Hex engine demo CLI
//!
//! Walks the engine through a handful of positions and prints what it
//! chooses, as a quick smoke check of the search stack.

use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use hexorcist::{Board, IterativeDeepeningPlayer, Player, Pos, SearchConfig, Stone};

fn main() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    println!("===========================================");
    println!("        hexorcist engine v0.1.0");
    println!("===========================================\n");

    println!("--- Scenario 1: Opening on 7x7 ---");
    opening_move();

    println!("\n--- Scenario 2: Finish the chain ---");
    winning_move();

    println!("\n--- Scenario 3: Block the bridge ---");
    blocking_move();

    println!("\n--- Scenario 4: Timed move on 11x11 ---");
    timed_move();

    println!("\n===========================================");
    println!("               Done");
    println!("===========================================");
}

fn report(result: &hexorcist::MoveResult) {
    println!(
        "  plays ({}, {})  score {}  depth {}  nodes {}  {} ms",
        result.pos.row, result.pos.col, result.score, result.depth, result.nodes, result.time_ms
    );
}

fn opening_move() {
    let config = SearchConfig {
        max_depth: 3,
        ..SearchConfig::default()
    };
    let mut player = IterativeDeepeningPlayer::with_config(config).expect("valid config");
    let board = Board::new(7);

    let result = player.get_move(&board).expect("empty board has moves");
    print_board(&board);
    report(&result);
}

fn winning_move() {
    let mut board = Board::new(5);
    for row in 0..4 {
        board.set_stone(Pos::new(row, 2), Stone::Black);
    }

    let mut player = IterativeDeepeningPlayer::new().expect("valid config");
    let result = player.get_move(&board).expect("position has moves");

    print_board(&board);
    report(&result);
    println!(
        "  expected (4, 2): {}",
        if result.pos == Pos::new(4, 2) { "PASS" } else { "FAIL" }
    );
}

fn blocking_move() {
    let mut board = Board::new(5);
    for row in 0..3 {
        board.set_stone(Pos::new(row, 2), Stone::Black);
    }
    board.set_to_move(Stone::White);

    let config = SearchConfig {
        max_depth: 2,
        ..SearchConfig::default()
    };
    let mut player = IterativeDeepeningPlayer::with_config(config).expect("valid config");
    let result = player.get_move(&board).expect("position has moves");

    print_board(&board);
    report(&result);
    println!(
        "  lands in Black's bridge region: {}",
        if result.pos.row >= 3 { "PASS" } else { "CHECK" }
    );
}

fn timed_move() {
    let mut player = IterativeDeepeningPlayer::new().expect("valid config");
    let board = Board::new(11);

    let stop = player.stop_handle();
    let timer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(500));
        stop.store(true, Ordering::Release);
    });

    let result = player.get_move(&board).expect("empty board has moves");
    timer.join().expect("timer thread");

    report(&result);
    println!(
        "  legal on input board: {}",
        if board.place(result.pos).is_ok() { "PASS" } else { "FAIL" }
    );
}

fn print_board(board: &Board) {
    let size = board.size();
    print!("     ");
    for col in 0..size {
        print!("{col:2}");
    }
    println!();

    for row in 0..size {
        // Shift each row to hint at the rhombic layout.
        print!("{row:2} {}", " ".repeat(row));
        for col in 0..size {
            let ch = match board.get(Pos::new(row as u8, col as u8)) {
                Stone::Black => " X",
                Stone::White => " O",
                Stone::Empty => " .",
            };
            print!("{ch}");
        }
        println!();
    }
}
