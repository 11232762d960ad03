//! 棋盘与规则常量定义

/// 默认棋盘大小（15x15）
pub const BOARD_SIZE: usize = 15;

/// 允许的最小棋盘大小（至少能容纳一条五连）
pub const MIN_BOARD_SIZE: usize = 5;

/// 允许的最大棋盘大小
pub const MAX_BOARD_SIZE: usize = 25;

/// 获胜所需连子数
pub const WIN_LENGTH: usize = 5;
