//! 错误类型定义

use thiserror::Error;

use crate::stone::Side;

/// 五子棋规则与配置错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GomokuError {
    /// 位置超出棋盘
    #[error("Invalid position: ({row}, {col})")]
    InvalidPosition { row: usize, col: usize },

    /// 位置已有棋子
    #[error("Cell already occupied: ({row}, {col})")]
    CellOccupied { row: usize, col: usize },

    /// 没有可撤销的落子
    #[error("No move to undo")]
    EmptyHistory,

    /// 悔棋所需的历史步数不足
    #[error("Not enough moves to take back: need {required}, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    /// 当前不是玩家回合
    #[error("Not the player's turn: {current} to move")]
    NotPlayerTurn { current: Side },

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,

    /// 无效的棋盘大小
    #[error("Invalid board size: {size} (must be odd, between {min} and {max})")]
    InvalidBoardSize { size: usize, min: usize, max: usize },

    /// 无法识别的难度名称
    #[error("Unknown difficulty: {label}")]
    InvalidDifficulty { label: String },

    /// 无效的 AI 配置
    #[error("Invalid AI config: {reason}")]
    InvalidConfig { reason: String },
}

/// 五子棋操作结果类型
pub type Result<T> = std::result::Result<T, GomokuError>;
