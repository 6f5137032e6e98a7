//! 走法生成
//!
//! 棋子的移动方向由脚下的地砖决定：
//! - 无地砖：上下左右
//! - 黑色地砖：四个斜向
//! - 灰色地砖：八个方向
//!
//! 每次沿一个方向走一步；若相邻格是己方棋子，则连续跳过己方棋子，
//! 落在其后的第一个空格。对方棋子阻挡移动，不能吃子。

use protocol::{Color, Move, Position, TileColor};

use crate::board::GameState;

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 指定格子上可用的移动方向
    pub fn directions(tile: Option<TileColor>) -> &'static [(i8, i8)] {
        match tile {
            None => &ORTHOGONAL,
            Some(TileColor::Black) => &DIAGONAL,
            Some(TileColor::Gray) => &ALL_DIRECTIONS,
        }
    }

    /// 生成指定颜色的所有基础走法（不含地砖放置）
    pub fn generate_base(state: &GameState, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(20);

        for from in state.pieces(color) {
            for &(dx, dy) in Self::directions(state.tile_at(from)) {
                if let Some(to) = Self::landing(state, from, dx, dy, color) {
                    moves.push(Move::new(from, to));
                }
            }
        }

        moves
    }

    /// 生成指定颜色的所有合法走法（每个基础走法 × 可选的地砖放置）
    pub fn generate_legal(state: &GameState, color: Color) -> Vec<Move> {
        let inventory = *state.inventory(color);
        let tiles: Vec<TileColor> = TileColor::ALL
            .into_iter()
            .filter(|&t| inventory.count(t) > 0)
            .collect();

        let base = Self::generate_base(state, color);
        let mut moves = Vec::with_capacity(base.len() * (1 + tiles.len() * 20));

        for mv in base {
            moves.push(mv);
            if tiles.is_empty() {
                continue;
            }

            // 放置判定基于走子之后的棋盘
            let mut after = state.clone();
            after.move_piece(mv.from, mv.to);
            for at in Position::all().filter(|&p| after.cell(p).accepts_tile()) {
                for &tile in &tiles {
                    moves.push(Move::with_tile(mv.from, mv.to, at, tile));
                }
            }
        }

        moves
    }

    /// 沿方向移动的落点；跳过连续的己方棋子
    fn landing(state: &GameState, from: Position, dx: i8, dy: i8, color: Color) -> Option<Position> {
        let mut current = from.offset(dx, dy)?;
        loop {
            match state.piece_at(current) {
                None => return Some(current),
                Some(piece) if piece == color => current = current.offset(dx, dy)?,
                Some(_) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: u8, y: u8) -> Position {
        Position::new_unchecked(x, y)
    }

    #[test]
    fn test_initial_base_moves() {
        let state = GameState::initial();
        let moves = MoveGenerator::generate_base(&state, Color::Black);

        // 横向跳过整排己方棋子后出界，只能向前一步
        assert!(moves.contains(&Move::new(pos(0, 0), pos(0, 1))));
        assert!(moves.iter().all(|m| m.to.y == 1 && m.to.x == m.from.x));
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn test_jump_over_friendly_pieces() {
        let mut state = GameState::empty();
        state.set_piece(pos(0, 0), Some(Color::Black));
        state.set_piece(pos(0, 1), Some(Color::Black));
        state.set_piece(pos(0, 2), Some(Color::Black));

        let moves = MoveGenerator::generate_base(&state, Color::Black);
        assert!(moves.contains(&Move::new(pos(0, 0), pos(0, 3))));
    }

    #[test]
    fn test_opponent_blocks() {
        let mut state = GameState::empty();
        state.set_piece(pos(2, 2), Some(Color::Black));
        state.set_piece(pos(2, 3), Some(Color::White));

        let moves = MoveGenerator::generate_base(&state, Color::Black);
        assert!(!moves.iter().any(|m| m.to == pos(2, 3) || m.to == pos(2, 4)));
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn test_tile_changes_directions() {
        let mut state = GameState::empty();
        state.set_piece(pos(2, 2), Some(Color::Black));

        state.set_tile(pos(2, 2), Some(TileColor::Black));
        let diag = MoveGenerator::generate_base(&state, Color::Black);
        assert_eq!(diag.len(), 4);
        assert!(diag.iter().all(|m| m.to.x != 2 && m.to.y != 2));

        state.set_tile(pos(2, 2), Some(TileColor::Gray));
        assert_eq!(MoveGenerator::generate_base(&state, Color::Black).len(), 8);
    }

    #[test]
    fn test_legal_moves_include_placements() {
        let mut state = GameState::empty();
        state.set_piece(pos(0, 0), Some(Color::Black));

        let moves = MoveGenerator::generate_legal(&state, Color::Black);
        // 两个基础走法；走后 24 个空格，每格 2 种地砖
        assert_eq!(moves.len(), 2 * (1 + 24 * 2));
        let mv = Move::with_tile(pos(0, 0), pos(0, 1), pos(0, 0), TileColor::Gray);
        assert!(moves.contains(&mv), "起点走后可以放置地砖");
        let onto_piece = Move::with_tile(pos(0, 0), pos(0, 1), pos(0, 1), TileColor::Gray);
        assert!(!moves.contains(&onto_piece));
    }

    #[test]
    fn test_no_placements_without_inventory() {
        let mut state = GameState::empty();
        state.set_piece(pos(0, 0), Some(Color::Black));
        let inv = state.inventory_mut(Color::Black);
        inv.black = 0;
        inv.gray = 0;

        let moves = MoveGenerator::generate_legal(&state, Color::Black);
        assert_eq!(moves.len(), 2);
    }
}
