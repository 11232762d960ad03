//! 五子棋 AI 引擎
//!
//! 包含:
//! - 候选点生成（已落子周围的空位，按离中心距离排序并截断）
//! - 基于连子模式的棋局评估函数
//! - 必杀点检查 + Minimax + Alpha-Beta 搜索

mod candidates;
mod evaluate;
mod search;

pub use candidates::{CandidateGenerator, DEFAULT_MAX_CANDIDATES, DEFAULT_SEARCH_RADIUS};
pub use evaluate::{pattern_scores, Evaluator, Pattern, DEFENSE_WEIGHT};
pub use search::{AiConfig, AiEngine, Difficulty, SearchStats, MAX_SEARCH_DEPTH, WIN_SCORE};
