//! 候选点生成
//!
//! 只考虑已有棋子周围若干格内的空位，按离中心的距离排序后截断

use gomoku_core::{Board, Position};

/// 默认搜索半径（已落子周围 2 格）
pub const DEFAULT_SEARCH_RADIUS: usize = 2;

/// 默认候选点数量上限
pub const DEFAULT_MAX_CANDIDATES: usize = 20;

/// 候选点生成器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateGenerator {
    radius: usize,
    max_candidates: usize,
}

impl CandidateGenerator {
    pub fn new(radius: usize, max_candidates: usize) -> Self {
        Self {
            radius,
            max_candidates,
        }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }

    /// 生成候选点
    ///
    /// 空棋盘只返回中心点；否则取所有棋子周围 `radius` 格内的空位（去重，
    /// 保留首次出现的顺序），按到中心的曼哈顿距离稳定排序，最后截断。
    /// 只有棋盘已满时才会返回空列表。
    pub fn generate(&self, board: &Board) -> Vec<Position> {
        if board.is_empty() {
            return vec![board.center()];
        }

        let size = board.size();
        let range = self.radius as i32;
        let mut seen = vec![false; size * size];
        let mut candidates = Vec::new();

        for placement in board.history() {
            for dr in -range..=range {
                for dc in -range..=range {
                    let Some(pos) = placement.pos.offset(dr, dc, size) else {
                        continue;
                    };
                    let index = pos.row * size + pos.col;
                    if board.get(pos).is_none() && !seen[index] {
                        seen[index] = true;
                        candidates.push(pos);
                    }
                }
            }
        }

        let center = board.center();
        candidates.sort_by_key(|pos| pos.manhattan_distance(center));
        candidates.truncate(self.max_candidates);
        candidates
    }
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_RADIUS, DEFAULT_MAX_CANDIDATES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gomoku_core::Side;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_empty_board_returns_center() {
        let generator = CandidateGenerator::default();
        assert_eq!(generator.generate(&Board::default()), vec![pos(7, 7)]);

        let small = Board::new(9).unwrap();
        assert_eq!(generator.generate(&small), vec![pos(4, 4)]);
    }

    #[test]
    fn test_single_stone_neighbourhood() {
        let mut board = Board::default();
        board.apply(pos(7, 7), Side::Black).unwrap();

        let generator = CandidateGenerator::new(2, 100);
        let candidates = generator.generate(&board);
        // 5x5 方块去掉中心
        assert_eq!(candidates.len(), 24);
        assert!(!candidates.contains(&pos(7, 7)));

        // 按距离非递减
        let center = board.center();
        let distances: Vec<_> = candidates.iter().map(|p| p.manhattan_distance(center)).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));

        // 同距离保持首次出现顺序：(6,7) 先于 (7,6)
        assert_eq!(&candidates[..4], &[pos(6, 7), pos(7, 6), pos(7, 8), pos(8, 7)]);
    }

    #[test]
    fn test_truncated_to_cap() {
        let mut board = Board::default();
        board.apply(pos(7, 7), Side::Black).unwrap();
        board.apply(pos(3, 3), Side::White).unwrap();

        let candidates = CandidateGenerator::default().generate(&board);
        assert_eq!(candidates.len(), 20);
        // 远离中心的 (1,1) 被截掉
        assert!(!candidates.contains(&pos(1, 1)));
    }

    #[test]
    fn test_union_has_no_duplicates() {
        let mut board = Board::default();
        board.apply(pos(7, 7), Side::Black).unwrap();
        board.apply(pos(7, 8), Side::White).unwrap();

        let candidates = CandidateGenerator::new(2, 1000).generate(&board);
        let mut deduped = candidates.clone();
        deduped.sort_by_key(|p| (p.row, p.col));
        deduped.dedup();
        assert_eq!(deduped.len(), candidates.len());
        // 5x6 矩形去掉两个棋子
        assert_eq!(candidates.len(), 28);
    }

    #[test]
    fn test_corner_stays_in_bounds() {
        let mut board = Board::default();
        board.apply(pos(0, 0), Side::Black).unwrap();

        let candidates = CandidateGenerator::default().generate(&board);
        assert_eq!(candidates.len(), 8);
        assert!(candidates.iter().all(|p| board.contains(*p)));
    }

    #[test]
    fn test_full_board_has_no_candidates() {
        let mut board = Board::new(5).unwrap();
        let mut side = Side::Black;
        for p in board.empty_positions() {
            board.apply(p, side).unwrap();
            side = side.opponent();
        }
        assert!(CandidateGenerator::default().generate(&board).is_empty());
    }
}
