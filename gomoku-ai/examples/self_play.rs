//! AI 自对弈示例
//!
//! 运行方式:
//! ```bash
//! cargo run -p gomoku-ai --example self_play
//!
//! # 指定双方难度和随机开局种子
//! cargo run -p gomoku-ai --example self_play -- hard easy 42
//! ```

use std::env;

use gomoku_ai::{AiEngine, Difficulty, SearchStats};
use gomoku_core::{Game, GameStatus, Position, Side};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// 随机开局的手数（在中心附近落子）
const RANDOM_OPENING_MOVES: usize = 2;

fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let black_difficulty = match args.first() {
        Some(label) => label.parse::<Difficulty>()?,
        None => Difficulty::Medium,
    };
    let white_difficulty = match args.get(1) {
        Some(label) => label.parse::<Difficulty>()?,
        None => Difficulty::Medium,
    };
    let seed = match args.get(2) {
        Some(value) => value.parse::<u64>()?,
        None => 2024,
    };

    println!("=== 五子棋 AI 自对弈 ===");
    println!("黑方: {}  白方: {}  种子: {}\n", black_difficulty, white_difficulty, seed);

    let mut game = Game::default();
    let mut black = AiEngine::from_difficulty(black_difficulty);
    let mut white = AiEngine::from_difficulty(white_difficulty);

    // 1. 随机开局
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let center = game.board().center();
    for _ in 0..RANDOM_OPENING_MOVES {
        loop {
            let row = center.row + rng.gen_range(0..5) - 2;
            let col = center.col + rng.gen_range(0..5) - 2;
            if game.play(Position::new(row, col)).is_ok() {
                break;
            }
        }
    }

    // 2. 双方轮流由 AI 落子
    let mut totals = [SearchStats::default(); 2];
    while game.status() == GameStatus::Playing {
        let side = game.current_turn();
        let engine = match side {
            Side::Black => &mut black,
            Side::White => &mut white,
        };

        let Some(pos) = engine.play_turn(&mut game)? else {
            break;
        };

        let stats = engine.stats();
        let total = &mut totals[side as usize];
        total.nodes_visited += stats.nodes_visited;
        total.pruned_branches += stats.pruned_branches;
        total.elapsed_ms += stats.elapsed_ms;

        println!(
            "{:>3}. {} {}  nodes={} prunes={} {}ms",
            game.board().move_count(),
            side,
            pos,
            stats.nodes_visited,
            stats.pruned_branches,
            stats.elapsed_ms
        );
    }

    // 3. 输出结果
    println!("\n{}", game.board());
    match game.status() {
        GameStatus::Won(side) => {
            println!("结果: {} 胜利", side);
            if let Some(line) = game.win_line() {
                let cells: Vec<String> = line.iter().map(|p| p.to_string()).collect();
                println!("五连: {}", cells.join(" "));
            }
        }
        GameStatus::Draw => println!("结果: 平局"),
        GameStatus::Playing => println!("结果: 未结束"),
    }

    for (side, total) in [Side::Black, Side::White].iter().zip(totals.iter()) {
        println!("{} 统计: {}", side, serde_json::to_string(total)?);
    }

    Ok(())
}
