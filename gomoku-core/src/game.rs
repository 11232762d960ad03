//! 对局控制
//!
//! 负责回合轮换、胜负与平局判定、悔棋，以及玩家 / AI 执子配置

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::{Board, BoardStats};
use crate::difficulty::Difficulty;
use crate::error::{GomokuError, Result};
use crate::stone::{Position, Side};

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 进行中
    Playing,
    /// 某方五连获胜
    Won(Side),
    /// 棋盘已满，平局
    Draw,
}

impl GameStatus {
    /// 是否已结束
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// 对局统计信息（棋盘计数 + 对局状态）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    #[serde(flatten)]
    pub board: BoardStats,
    pub status: GameStatus,
    pub current_turn: Side,
    pub winner: Option<Side>,
    pub difficulty: Difficulty,
    pub player_side: Side,
    pub ai_side: Side,
}

/// 一局五子棋
#[derive(Debug, Clone)]
pub struct Game {
    /// 长期持有的棋盘
    board: Board,
    /// 当前走子方
    current_turn: Side,
    /// 对局状态
    status: GameStatus,
    /// 获胜的五连坐标（仅在有人获胜时存在）
    win_line: Option<Vec<Position>>,
    /// AI 难度
    difficulty: Difficulty,
    /// 玩家执子
    player_side: Side,
}

impl Game {
    /// 创建指定大小的新对局（黑方先手，玩家执黑，中等难度）
    pub fn new(size: usize) -> Result<Self> {
        Ok(Self::with_board(Board::new(size)?))
    }

    fn with_board(board: Board) -> Self {
        Self {
            board,
            current_turn: Side::Black,
            status: GameStatus::Playing,
            win_line: None,
            difficulty: Difficulty::default(),
            player_side: Side::Black,
        }
    }

    /// 开始新对局：设置难度与玩家执子，清空棋盘
    ///
    /// 黑方总是先手；玩家执白时，开局即轮到 AI（见 [`Game::is_ai_turn`]）
    pub fn start(&mut self, difficulty: Difficulty, player_side: Side) {
        self.difficulty = difficulty;
        self.player_side = player_side;
        self.reset();
        info!("游戏开始: difficulty={}, player={}", difficulty, player_side);
    }

    /// 重新开始（保持棋盘大小、难度与执子）
    pub fn reset(&mut self) {
        self.board = Board::blank(self.board.size());
        self.current_turn = Side::Black;
        self.status = GameStatus::Playing;
        self.win_line = None;
        debug!("棋盘已重置");
    }

    /// 玩家落子，不是玩家回合时拒绝
    pub fn play_player(&mut self, pos: Position) -> Result<GameStatus> {
        if !self.status.is_over() && !self.is_player_turn() {
            warn!("当前不是玩家回合: {}", pos);
            return Err(GomokuError::NotPlayerTurn {
                current: self.current_turn,
            });
        }
        self.play(pos)
    }

    /// 当前方落子
    ///
    /// 成功后依次判断五连、棋盘已满，否则轮到对方
    pub fn play(&mut self, pos: Position) -> Result<GameStatus> {
        if self.status.is_over() {
            warn!("游戏已结束，无法落子: {}", pos);
            return Err(GomokuError::GameOver);
        }

        let side = self.current_turn;
        if let Err(e) = self.board.apply(pos, side) {
            warn!("无效落子位置 {}: {}", pos, e);
            return Err(e);
        }
        debug!("{} 落子 {}，共 {} 手", side, pos, self.board.move_count());

        if let Some((direction, line)) = self.board.find_winning_line(pos, side) {
            info!("游戏结束: {} 胜利，五连在{}方向", side, direction.name());
            self.win_line = Some(line);
            self.status = GameStatus::Won(side);
        } else if self.board.is_full() {
            info!("游戏结束: 平局");
            self.status = GameStatus::Draw;
        } else {
            self.current_turn = side.opponent();
        }

        Ok(self.status)
    }

    /// 悔棋：撤销玩家和 AI 各一步，之后仍轮到玩家
    pub fn undo_round(&mut self) -> Result<()> {
        if self.status.is_over() {
            warn!("游戏已结束，无法悔棋");
            return Err(GomokuError::GameOver);
        }
        if !self.is_player_turn() {
            warn!("AI 回合中无法悔棋");
            return Err(GomokuError::NotPlayerTurn {
                current: self.current_turn,
            });
        }

        let available = self.board.move_count();
        if available < 2 {
            warn!("悔棋需要至少 2 步历史记录，当前 {} 步", available);
            return Err(GomokuError::InsufficientHistory {
                required: 2,
                available,
            });
        }

        let last = self.board.undo().ok_or(GomokuError::EmptyHistory)?;
        let previous = self.board.undo().ok_or(GomokuError::EmptyHistory)?;
        self.current_turn = self.player_side;
        debug!("悔棋成功: {} / {}", previous, last);
        Ok(())
    }

    /// 当前棋盘
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 当前走子方
    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    /// 对局状态
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// 胜者
    pub fn winner(&self) -> Option<Side> {
        match self.status {
            GameStatus::Won(side) => Some(side),
            _ => None,
        }
    }

    /// 获胜的五连坐标
    pub fn win_line(&self) -> Option<&[Position]> {
        self.win_line.as_deref()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn player_side(&self) -> Side {
        self.player_side
    }

    pub fn ai_side(&self) -> Side {
        self.player_side.opponent()
    }

    /// 对局进行中且轮到玩家
    pub fn is_player_turn(&self) -> bool {
        self.status == GameStatus::Playing && self.current_turn == self.player_side
    }

    /// 对局进行中且轮到 AI
    pub fn is_ai_turn(&self) -> bool {
        self.status == GameStatus::Playing && self.current_turn == self.ai_side()
    }

    /// 对局统计信息
    pub fn stats(&self) -> GameStats {
        GameStats {
            board: self.board.stats(),
            status: self.status,
            current_turn: self.current_turn,
            winner: self.winner(),
            difficulty: self.difficulty,
            player_side: self.player_side,
            ai_side: self.ai_side(),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::with_board(Board::default())
    }
}
