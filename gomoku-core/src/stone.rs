//! 棋子阵营、位置与方向定义

use serde::{Deserialize, Serialize};

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 黑方（先手）
    Black,
    /// 白方（后手）
    White,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// 获取显示名称
    pub fn name(&self) -> &'static str {
        match self {
            Side::Black => "黑方",
            Side::White => "白方",
        }
    }

    /// 获取字符表示（用于棋盘文本输出）
    pub fn to_char(&self) -> char {
        match self {
            Side::Black => 'X',
            Side::White => 'O',
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 棋盘位置
///
/// 边界检查由 [`Board`](crate::Board) 负责，因为棋盘大小在构造时才确定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 行
    pub row: usize,
    /// 列
    pub col: usize,
}

impl Position {
    /// 创建新位置
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// 获取偏移后的位置（超出 `size x size` 棋盘时返回 None）
    pub fn offset(&self, dr: i32, dc: i32, size: usize) -> Option<Position> {
        let row = self.row as i32 + dr;
        let col = self.col as i32 + dc;
        if row >= 0 && (row as usize) < size && col >= 0 && (col as usize) < size {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// 曼哈顿距离
    pub fn manhattan_distance(&self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// 连线方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// 水平 →
    Horizontal,
    /// 垂直 ↓
    Vertical,
    /// 右下斜 ↘
    Diagonal,
    /// 左下斜 ↙
    AntiDiagonal,
}

impl Direction {
    /// 四个方向（固定顺序）
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// 方向向量 (dr, dc)
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }

    /// 获取方向名称
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Horizontal => "水平",
            Direction::Vertical => "垂直",
            Direction::Diagonal => "右下斜",
            Direction::AntiDiagonal => "左下斜",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::White.opponent(), Side::Black);
    }

    #[test]
    fn test_position_offset() {
        let pos = Position::new(0, 14);
        assert_eq!(pos.offset(1, -1, 15), Some(Position::new(1, 13)));
        assert_eq!(pos.offset(-1, 0, 15), None);
        assert_eq!(pos.offset(0, 1, 15), None);
    }

    #[test]
    fn test_manhattan_distance() {
        let center = Position::new(7, 7);
        assert_eq!(center.manhattan_distance(center), 0);
        assert_eq!(Position::new(5, 9).manhattan_distance(center), 4);
        assert_eq!(Position::new(0, 0).manhattan_distance(center), 14);
    }

    #[test]
    fn test_direction_deltas() {
        let deltas: Vec<_> = Direction::ALL.iter().map(|d| d.delta()).collect();
        assert_eq!(deltas, vec![(0, 1), (1, 0), (1, 1), (1, -1)]);
    }

    #[test]
    fn test_position_serde() {
        let pos = Position::new(3, 11);
        let json = serde_json::to_string(&pos).unwrap();
        assert_eq!(json, r#"{"row":3,"col":11}"#);
        let decoded: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, pos);
    }
}
