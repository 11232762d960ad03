//! 棋局评估函数
//!
//! 对某一方的每个棋子、每个方向统计连子数与开放端数，查表累加

use gomoku_core::{Board, Direction, Position, Side};

/// 连子模式分值
pub mod pattern_scores {
    /// 五连
    pub const FIVE: i64 = 100_000;
    /// 活四（两端开放）
    pub const LIVE_FOUR: i64 = 10_000;
    /// 冲四 / 死四
    pub const RUSH_FOUR: i64 = 1_000;
    /// 活三
    pub const LIVE_THREE: i64 = 1_000;
    /// 眠三
    pub const SLEEP_THREE: i64 = 100;
    /// 活二
    pub const LIVE_TWO: i64 = 100;
    /// 眠二
    pub const SLEEP_TWO: i64 = 10;
    /// 单子
    pub const ONE: i64 = 1;
}

/// 防守方得分的折扣系数（略偏进攻）
pub const DEFENSE_WEIGHT: f64 = 0.9;

/// 单个棋子在单个方向上的连子模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    /// 连子数（含起点）
    pub run_length: usize,
    /// 开放端数 (0-2)
    pub open_ends: usize,
}

impl Pattern {
    /// 模式分值
    pub fn score(&self) -> i64 {
        use self::pattern_scores::*;

        match (self.run_length, self.open_ends) {
            (n, _) if n >= 5 => FIVE,
            (4, 2) => LIVE_FOUR,
            (4, _) => RUSH_FOUR,
            (3, 2) => LIVE_THREE,
            (3, 1) => SLEEP_THREE,
            (2, 2) => LIVE_TWO,
            (2, 1) => SLEEP_TWO,
            (1, _) => ONE,
            _ => 0,
        }
    }
}

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 评估棋局：`max_side` 得分减去打折后的 `min_side` 得分
    pub fn evaluate(board: &Board, max_side: Side, min_side: Side) -> f64 {
        Self::score_for(board, max_side) as f64
            - DEFENSE_WEIGHT * Self::score_for(board, min_side) as f64
    }

    /// 某一方的模式总分
    ///
    /// 每条连子会被其中每个棋子各计一次
    pub fn score_for(board: &Board, side: Side) -> i64 {
        board
            .stones(side)
            .into_iter()
            .flat_map(move |pos| {
                Direction::ALL
                    .into_iter()
                    .map(move |direction| Self::pattern_at(board, pos, side, direction))
            })
            .map(|pattern| pattern.score())
            .sum()
    }

    /// 计算 `pos` 处棋子在指定方向上的连子模式
    pub fn pattern_at(board: &Board, pos: Position, side: Side, direction: Direction) -> Pattern {
        let (dr, dc) = direction.delta();
        let mut run_length = 1;
        let mut open_ends = 0;

        for (sr, sc) in [(dr, dc), (-dr, -dc)] {
            let mut current = pos.offset(sr, sc, board.size());
            while let Some(p) = current {
                if board.get(p) != Some(side) {
                    break;
                }
                run_length += 1;
                current = p.offset(sr, sc, board.size());
            }
            // 端点在棋盘内且为空才算开放
            if let Some(end) = current {
                if board.get(end).is_none() {
                    open_ends += 1;
                }
            }
        }

        Pattern {
            run_length,
            open_ends,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn pattern(run_length: usize, open_ends: usize) -> Pattern {
        Pattern {
            run_length,
            open_ends,
        }
    }

    #[test]
    fn test_pattern_score_table() {
        assert_eq!(pattern(5, 0).score(), 100_000);
        assert_eq!(pattern(6, 2).score(), 100_000);
        assert_eq!(pattern(4, 2).score(), 10_000);
        assert_eq!(pattern(4, 1).score(), 1_000);
        assert_eq!(pattern(4, 0).score(), 1_000);
        assert_eq!(pattern(3, 2).score(), 1_000);
        assert_eq!(pattern(3, 1).score(), 100);
        assert_eq!(pattern(3, 0).score(), 0);
        assert_eq!(pattern(2, 2).score(), 100);
        assert_eq!(pattern(2, 1).score(), 10);
        assert_eq!(pattern(2, 0).score(), 0);
        assert_eq!(pattern(1, 0).score(), 1);
        assert_eq!(pattern(1, 2).score(), 1);
    }

    #[test]
    fn test_single_stone() {
        let mut board = Board::default();
        board.apply(pos(7, 7), Side::Black).unwrap();
        // 四个方向各 1 分
        assert_eq!(Evaluator::score_for(&board, Side::Black), 4);
        assert_eq!(Evaluator::score_for(&board, Side::White), 0);
    }

    #[test]
    fn test_open_two_counted_per_stone() {
        let mut board = Board::default();
        board.apply(pos(7, 7), Side::Black).unwrap();
        board.apply(pos(7, 8), Side::Black).unwrap();
        // 每个棋子：水平活二 100 + 其余三个方向单子各 1
        assert_eq!(Evaluator::score_for(&board, Side::Black), 2 * (100 + 3));
    }

    #[test]
    fn test_edge_is_not_open() {
        let mut board = Board::default();
        for col in 0..3 {
            board.apply(pos(0, col), Side::White).unwrap();
        }
        let p = Evaluator::pattern_at(&board, pos(0, 1), Side::White, Direction::Horizontal);
        assert_eq!(p, pattern(3, 1));

        // 垂直方向向上越界，向下开放
        let p = Evaluator::pattern_at(&board, pos(0, 1), Side::White, Direction::Vertical);
        assert_eq!(p, pattern(1, 1));
    }

    #[test]
    fn test_blocked_end() {
        let mut board = Board::default();
        for col in 5..9 {
            board.apply(pos(7, col), Side::Black).unwrap();
        }
        board.apply(pos(7, 4), Side::White).unwrap();
        let p = Evaluator::pattern_at(&board, pos(7, 6), Side::Black, Direction::Horizontal);
        assert_eq!(p, pattern(4, 1));

        board.apply(pos(7, 9), Side::White).unwrap();
        let p = Evaluator::pattern_at(&board, pos(7, 6), Side::Black, Direction::Horizontal);
        assert_eq!(p, pattern(4, 0));
    }

    #[test]
    fn test_evaluate_discount_applied_once() {
        let mut board = Board::default();
        board.apply(pos(7, 7), Side::Black).unwrap();
        board.apply(pos(7, 8), Side::Black).unwrap();
        board.apply(pos(5, 5), Side::White).unwrap();

        let black = Evaluator::score_for(&board, Side::Black);
        let white = Evaluator::score_for(&board, Side::White);
        assert_eq!(black, 206);
        assert_eq!(white, 4);

        let score = Evaluator::evaluate(&board, Side::Black, Side::White);
        assert!((score - (206.0 - 0.9 * 4.0)).abs() < 1e-9);

        let reversed = Evaluator::evaluate(&board, Side::White, Side::Black);
        assert!((reversed - (4.0 - 0.9 * 206.0)).abs() < 1e-9);
        // 折扣不对称，两者不是相反数
        assert!((score + reversed).abs() > 1e-6);
    }

    #[test]
    fn test_live_four_outscores_blocked_four() {
        let mut open = Board::default();
        let mut blocked = Board::default();
        for col in 5..9 {
            open.apply(pos(7, col), Side::Black).unwrap();
            blocked.apply(pos(7, col), Side::Black).unwrap();
        }
        blocked.apply(pos(7, 4), Side::White).unwrap();

        assert!(
            Evaluator::score_for(&open, Side::Black) > Evaluator::score_for(&blocked, Side::Black)
        );
    }
}
