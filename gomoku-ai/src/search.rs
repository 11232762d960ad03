//! 搜索引擎
//!
//! 实现必杀点检查 + 固定深度 Minimax + Alpha-Beta 剪枝

use std::time::Instant;

use gomoku_core::{Board, Game, GomokuError, Position, Result, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::candidates::{CandidateGenerator, DEFAULT_MAX_CANDIDATES, DEFAULT_SEARCH_RADIUS};
use crate::evaluate::{pattern_scores, Evaluator};

// 重导出 Difficulty 以便外部使用
pub use gomoku_core::Difficulty;

/// 允许的最大搜索深度
pub const MAX_SEARCH_DEPTH: u8 = 6;

/// 终局分值（一方五连）
pub const WIN_SCORE: f64 = pattern_scores::FIVE as f64;

/// AI 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    pub max_depth: u8,
    pub search_radius: usize,
    pub max_candidates: usize,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            max_depth: difficulty.depth(),
            search_radius: DEFAULT_SEARCH_RADIUS,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    /// 校验配置（在构造引擎时调用，递归过程中不再检查）
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 || self.max_depth > MAX_SEARCH_DEPTH {
            return Err(GomokuError::InvalidConfig {
                reason: format!(
                    "max_depth must be between 1 and {}, got {}",
                    MAX_SEARCH_DEPTH, self.max_depth
                ),
            });
        }
        if self.search_radius == 0 {
            return Err(GomokuError::InvalidConfig {
                reason: "search_radius must be at least 1".to_string(),
            });
        }
        if self.max_candidates == 0 {
            return Err(GomokuError::InvalidConfig {
                reason: "max_candidates must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

/// 单次搜索的统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// 搜索节点数
    pub nodes_visited: u64,
    /// 剪枝次数
    pub pruned_branches: u64,
    /// 搜索耗时（毫秒）
    pub elapsed_ms: u64,
}

/// 单次搜索的上下文，随递归以引用传递
struct SearchContext {
    side: Side,
    opponent: Side,
    nodes: u64,
    prunes: u64,
}

impl SearchContext {
    fn new(side: Side) -> Self {
        Self {
            side,
            opponent: side.opponent(),
            nodes: 0,
            prunes: 0,
        }
    }
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    generator: CandidateGenerator,
    stats: SearchStats,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "AI 引擎初始化完成: difficulty={}, max_depth={}",
            config.difficulty, config.max_depth
        );
        Ok(Self {
            generator: CandidateGenerator::new(config.search_radius, config.max_candidates),
            config,
            stats: SearchStats::default(),
        })
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let config = AiConfig::from_difficulty(difficulty);
        Self {
            generator: CandidateGenerator::new(config.search_radius, config.max_candidates),
            config,
            stats: SearchStats::default(),
        }
    }

    /// 切换难度（搜索半径与候选上限保持不变）
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
        self.config.max_depth = difficulty.depth();
        info!("AI 难度已更新: {} (max_depth={})", difficulty, self.config.max_depth);
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 最近一次搜索的统计信息
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// 搜索 `side` 的最佳落子点
    ///
    /// 搜索期间会临时修改棋盘，返回时棋盘恢复原状。
    /// 返回 None 表示棋盘已满（平局）。
    pub fn best_move(&mut self, board: &mut Board, side: Side) -> Option<Position> {
        let start = Instant::now();
        let mut ctx = SearchContext::new(side);

        debug!("开始 AI 搜索: side={}, depth={}", side, self.config.max_depth);
        let best = self.search_root(board, &mut ctx);

        self.stats = SearchStats {
            nodes_visited: ctx.nodes,
            pruned_branches: ctx.prunes,
            elapsed_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "AI 搜索完成: best={:?}, nodes={}, prunes={}, time={}ms",
            best, self.stats.nodes_visited, self.stats.pruned_branches, self.stats.elapsed_ms
        );
        best
    }

    /// 为对局的当前方搜索并落子
    ///
    /// 在棋盘副本上搜索，不会触碰对局状态直到真正落子
    pub fn play_turn(&mut self, game: &mut Game) -> Result<Option<Position>> {
        if game.status().is_over() {
            return Err(GomokuError::GameOver);
        }

        let mut scratch = game.board().clone();
        match self.best_move(&mut scratch, game.current_turn()) {
            Some(pos) => {
                game.play(pos)?;
                Ok(Some(pos))
            }
            None => Ok(None),
        }
    }

    /// 轮到 AI 时按对局的难度落子，否则不做任何事
    ///
    /// 玩家执白开局、或玩家落子之后调用
    pub fn respond(&mut self, game: &mut Game) -> Result<Option<Position>> {
        if !game.is_ai_turn() {
            debug!("当前不是 AI 回合，跳过");
            return Ok(None);
        }
        if self.config.difficulty != game.difficulty() {
            self.set_difficulty(game.difficulty());
        }
        self.play_turn(game)
    }

    fn search_root(&self, board: &mut Board, ctx: &mut SearchContext) -> Option<Position> {
        // 第一步：落在中心位置
        if board.is_empty() {
            let center = board.center();
            debug!("首步落子中心 {}", center);
            return Some(center);
        }

        // 第二步：必杀点（己方连五优先于堵对手）
        if let Some(pos) = self.find_critical_move(board, ctx.side) {
            return Some(pos);
        }

        // 第三步：Minimax 搜索
        let candidates = self.generator.generate(board);
        if candidates.is_empty() {
            warn!("没有可用的候选点");
            return None;
        }
        debug!("候选点数量: {}", candidates.len());

        let depth = self.config.max_depth - 1;
        let mut best_move = None;
        let mut best_score = f64::NEG_INFINITY;
        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;

        for pos in candidates {
            let mut child = match board.place(pos, ctx.side) {
                Ok(guard) => guard,
                Err(e) => {
                    warn!("候选点落子失败 {}: {}", pos, e);
                    continue;
                }
            };
            let score = self.minimax(&mut child, ctx, depth, alpha, beta, false);
            drop(child);

            // 严格大于：同分时保留更靠近中心的候选点
            if score > best_score {
                best_score = score;
                best_move = Some(pos);
            }
            alpha = alpha.max(score);
        }

        debug!("最佳分数: {}", best_score);
        best_move
    }

    /// Minimax + Alpha-Beta 剪枝
    fn minimax(
        &self,
        board: &mut Board,
        ctx: &mut SearchContext,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> f64 {
        ctx.nodes += 1;

        // 上一手已经连五
        if let Some(last) = board.last_move() {
            if board.check_line(last.pos, last.side) {
                return if last.side == ctx.side { WIN_SCORE } else { -WIN_SCORE };
            }
        }

        if depth == 0 {
            return Evaluator::evaluate(board, ctx.side, ctx.opponent);
        }

        let candidates = self.generator.generate(board);
        if candidates.is_empty() {
            return 0.0;
        }

        let mover = if maximizing { ctx.side } else { ctx.opponent };
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for pos in candidates {
            let mut child = match board.place(pos, mover) {
                Ok(guard) => guard,
                Err(e) => {
                    warn!("候选点落子失败 {}: {}", pos, e);
                    continue;
                }
            };
            let value = self.minimax(&mut child, ctx, depth - 1, alpha, beta, !maximizing);

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }

            if beta <= alpha {
                ctx.prunes += 1;
                break;
            }
        }

        best
    }

    /// 查找必杀点：先找己方一步连五，再找对手一步连五（必须防守）
    fn find_critical_move(&self, board: &mut Board, side: Side) -> Option<Position> {
        if let Some(pos) = self.find_winning_move(board, side) {
            debug!("发现己方连五点，准备获胜: {}", pos);
            return Some(pos);
        }

        if let Some(pos) = self.find_winning_move(board, side.opponent()) {
            debug!("发现对手连五点，必须防守: {}", pos);
            return Some(pos);
        }

        None
    }

    /// 查找 `player` 能一步连五的位置
    fn find_winning_move(&self, board: &mut Board, player: Side) -> Option<Position> {
        for pos in self.generator.generate(board) {
            let Ok(trial) = board.place(pos, player) else {
                continue;
            };
            if trial.check_line(pos, player) {
                return Some(pos);
            }
        }
        None
    }
}
