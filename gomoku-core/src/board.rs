//! 棋盘状态
//!
//! 棋盘只通过 `apply` / `undo` 修改，格子状态始终等于落子历史的重放结果

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE, WIN_LENGTH};
use crate::error::{GomokuError, Result};
use crate::stone::{Direction, Position, Side};

/// 一次落子记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// 落子位置
    pub pos: Position,
    /// 落子方
    pub side: Side,
}

impl Placement {
    /// 创建落子记录
    pub fn new(pos: Position, side: Side) -> Self {
        Self { pos, side }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.side, self.pos)
    }
}

/// 棋盘统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStats {
    pub black: usize,
    pub white: usize,
    pub empty: usize,
    pub total_moves: usize,
}

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// 棋盘边长
    size: usize,
    /// size x size 格子，索引为 row * size + col
    cells: Vec<Option<Side>>,
    /// 落子历史（按落子顺序）
    history: Vec<Placement>,
}

impl Board {
    /// 创建指定大小的空棋盘
    ///
    /// 大小必须为奇数，且在 [`MIN_BOARD_SIZE`, `MAX_BOARD_SIZE`] 范围内
    pub fn new(size: usize) -> Result<Self> {
        if size % 2 == 0 || !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(GomokuError::InvalidBoardSize {
                size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        Ok(Self::blank(size))
    }

    /// 不做校验的空棋盘，调用方保证 `size` 合法
    pub(crate) fn blank(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
            history: Vec::with_capacity(size * size),
        }
    }

    /// 棋盘边长
    pub fn size(&self) -> usize {
        self.size
    }

    /// 中心位置
    pub fn center(&self) -> Position {
        Position::new(self.size / 2, self.size / 2)
    }

    /// 检查位置是否在棋盘内
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    /// 获取指定位置的棋子（越界返回 None）
    pub fn get(&self, pos: Position) -> Option<Side> {
        if self.contains(pos) {
            self.cells[self.index(pos)]
        } else {
            None
        }
    }

    /// 检查位置是否可以落子（在棋盘内且为空）
    pub fn is_valid_move(&self, pos: Position) -> bool {
        self.contains(pos) && self.cells[self.index(pos)].is_none()
    }

    /// 落子
    ///
    /// 越界或已有棋子时返回错误，棋盘不做任何修改
    pub fn apply(&mut self, pos: Position, side: Side) -> Result<()> {
        if !self.contains(pos) {
            return Err(GomokuError::InvalidPosition {
                row: pos.row,
                col: pos.col,
            });
        }
        let index = self.index(pos);
        if self.cells[index].is_some() {
            return Err(GomokuError::CellOccupied {
                row: pos.row,
                col: pos.col,
            });
        }
        self.cells[index] = Some(side);
        self.history.push(Placement::new(pos, side));
        Ok(())
    }

    /// 撤销最后一步，返回被撤销的落子
    pub fn undo(&mut self) -> Option<Placement> {
        let last = self.history.pop()?;
        let index = self.index(last.pos);
        self.cells[index] = None;
        Some(last)
    }

    /// 试探性落子，返回的守卫在离开作用域时自动撤销这一步
    pub fn place(&mut self, pos: Position, side: Side) -> Result<PlacementGuard<'_>> {
        self.apply(pos, side)?;
        Ok(PlacementGuard { board: self })
    }

    /// 最后一手
    pub fn last_move(&self) -> Option<Placement> {
        self.history.last().copied()
    }

    /// 落子历史
    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    /// 已落子数
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// 棋盘是否没有任何棋子
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// 棋盘是否已满
    pub fn is_full(&self) -> bool {
        self.history.len() == self.cells.len()
    }

    /// 从 `pos` 出发沿 (dr, dc) 方向统计连续的 `side` 棋子数（不含起点）
    pub fn count_direction(&self, pos: Position, dr: i32, dc: i32, side: Side) -> usize {
        let mut count = 0;
        let mut current = pos.offset(dr, dc, self.size);
        while let Some(p) = current {
            if self.get(p) != Some(side) {
                break;
            }
            count += 1;
            current = p.offset(dr, dc, self.size);
        }
        count
    }

    /// 检查 `pos` 处（视为 `side` 的棋子）是否形成五连
    pub fn check_line(&self, pos: Position, side: Side) -> bool {
        Direction::ALL
            .iter()
            .any(|&direction| self.line_length(pos, side, direction) >= WIN_LENGTH)
    }

    /// 经过 `pos` 的指定方向连子长度（含起点）
    fn line_length(&self, pos: Position, side: Side, direction: Direction) -> usize {
        let (dr, dc) = direction.delta();
        1 + self.count_direction(pos, dr, dc, side) + self.count_direction(pos, -dr, -dc, side)
    }

    /// 获取指定方向的五连坐标（用于高亮显示）
    ///
    /// 从反方向末端排到正方向末端，只保留前 5 个
    pub fn winning_line(&self, pos: Position, side: Side, direction: Direction) -> Vec<Position> {
        let (dr, dc) = direction.delta();

        let mut backward = Vec::new();
        let mut current = pos.offset(-dr, -dc, self.size);
        while let Some(p) = current {
            if self.get(p) != Some(side) {
                break;
            }
            backward.push(p);
            current = p.offset(-dr, -dc, self.size);
        }

        let mut line: Vec<Position> = backward.into_iter().rev().collect();
        line.push(pos);

        let mut current = pos.offset(dr, dc, self.size);
        while let Some(p) = current {
            if self.get(p) != Some(side) {
                break;
            }
            line.push(p);
            current = p.offset(dr, dc, self.size);
        }

        line.truncate(WIN_LENGTH);
        line
    }

    /// 查找经过 `pos` 的五连（按固定方向顺序取第一个）
    pub fn find_winning_line(&self, pos: Position, side: Side) -> Option<(Direction, Vec<Position>)> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.line_length(pos, side, direction) >= WIN_LENGTH)
            .map(|direction| (direction, self.winning_line(pos, side, direction)))
    }

    /// 所有空位（按行优先顺序）
    pub fn empty_positions(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.get(pos).is_none())
            .collect()
    }

    /// 指定阵营的所有棋子位置（按行优先顺序）
    pub fn stones(&self, side: Side) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.get(pos) == Some(side))
            .collect()
    }

    fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Position::new(row, col)))
    }

    /// 获取棋盘统计信息
    pub fn stats(&self) -> BoardStats {
        let black = self.cells.iter().filter(|c| **c == Some(Side::Black)).count();
        let white = self.cells.iter().filter(|c| **c == Some(Side::White)).count();
        BoardStats {
            black,
            white,
            empty: self.cells.len() - black - white,
            total_moves: self.history.len(),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::blank(BOARD_SIZE)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.size {
            let line: String = (0..self.size)
                .map(|col| match self.get(Position::new(row, col)) {
                    Some(side) => side.to_char(),
                    None => '.',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// 试探性落子守卫
///
/// 持有棋盘的独占借用，析构时撤销对应的落子。
/// 嵌套守卫按后进先出顺序撤销，不要在守卫存活期间手动调用 `undo`。
pub struct PlacementGuard<'a> {
    board: &'a mut Board,
}

impl Deref for PlacementGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for PlacementGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for PlacementGuard<'_> {
    fn drop(&mut self) {
        let undone = self.board.undo();
        debug_assert!(undone.is_some(), "placement guard dropped with empty history");
    }
}
