//! 五子棋核心库
//!
//! 包含:
//! - 阵营、位置、方向等基础类型
//! - 棋盘状态（落子 / 撤销 / 五连判定）
//! - 对局控制（回合轮换、胜负判定、悔棋、玩家 / AI 执子）
//! - AI 难度定义
//! - 错误类型

mod board;
mod constants;
mod difficulty;
mod error;
mod game;
mod stone;

pub use board::{Board, BoardStats, Placement, PlacementGuard};
pub use constants::*;
pub use difficulty::Difficulty;
pub use error::{GomokuError, Result};
pub use game::{Game, GameStats, GameStatus};
pub use stone::{Direction, Position, Side};
