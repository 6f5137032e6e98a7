//! Contrast 规则引擎
//!
//! 服务端与客户端只通过 [`RulesEngine`] 访问规则：
//! 重置局面、查询当前走子方、枚举合法走法、执行走法、判定胜负。
//! [`ContrastRules`] 是随仓库提供的参考实现。

mod board;
mod moves;

use std::fmt::Debug;

use protocol::{Color, Move};
use tracing::trace;

pub use board::{Cell, GameState, TileInventory, INITIAL_BLACK_TILES, INITIAL_GRAY_TILES};
pub use moves::MoveGenerator;

/// 规则引擎
///
/// 引擎拥有棋盘几何、走法合法性与胜负判定；调用方从不自行推算这些信息。
pub trait RulesEngine {
    /// 对局状态
    type State: Clone + PartialEq + Debug + Send;

    /// 创建初始局面
    fn new_state(&self) -> Self::State;

    /// 把局面重置为初始局面
    fn reset(&self, state: &mut Self::State);

    /// 当前走子方
    fn current_player(&self, state: &Self::State) -> Color;

    /// 当前走子方的全部合法走法
    fn legal_moves(&self, state: &Self::State) -> Vec<Move>;

    /// 执行走法并交换走子方；调用方保证走法合法
    fn apply_move(&self, state: &mut Self::State, mv: &Move);

    /// `color` 是否已达成胜利条件
    fn is_win(&self, state: &Self::State, color: Color) -> bool;

    /// `color` 是否无合法走法
    fn is_loss(&self, state: &Self::State, color: Color) -> bool;
}

/// Contrast 参考规则
#[derive(Debug, Clone, Copy, Default)]
pub struct ContrastRules;

impl RulesEngine for ContrastRules {
    type State = GameState;

    fn new_state(&self) -> GameState {
        GameState::initial()
    }

    fn reset(&self, state: &mut GameState) {
        *state = GameState::initial();
    }

    fn current_player(&self, state: &GameState) -> Color {
        state.current_turn
    }

    fn legal_moves(&self, state: &GameState) -> Vec<Move> {
        MoveGenerator::generate_legal(state, state.current_turn)
    }

    fn apply_move(&self, state: &mut GameState, mv: &Move) {
        let mover = state.current_turn;
        state.move_piece(mv.from, mv.to);
        if let Some(placement) = mv.placement {
            if state.inventory_mut(mover).take(placement.tile) {
                state.set_tile(placement.at, Some(placement.tile));
            }
        }
        state.switch_turn();
        trace!(%mv, ?mover, "执行走法");
    }

    fn is_win(&self, state: &GameState, color: Color) -> bool {
        let goal = GameState::goal_row(color);
        state.pieces(color).iter().any(|pos| pos.y == goal)
    }

    fn is_loss(&self, state: &GameState, color: Color) -> bool {
        MoveGenerator::generate_base(state, color).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{Position, TileColor};

    fn pos(x: u8, y: u8) -> Position {
        Position::new_unchecked(x, y)
    }

    #[test]
    fn test_apply_move_switches_turn() {
        let rules = ContrastRules;
        let mut state = rules.new_state();
        assert_eq!(rules.current_player(&state), Color::Black);

        let mv = Move::new(pos(0, 0), pos(0, 1));
        assert!(rules.legal_moves(&state).contains(&mv));
        rules.apply_move(&mut state, &mv);

        assert_eq!(rules.current_player(&state), Color::White);
        assert_eq!(state.piece_at(pos(0, 1)), Some(Color::Black));
    }

    #[test]
    fn test_apply_move_places_tile() {
        let rules = ContrastRules;
        let mut state = rules.new_state();
        let mv = Move::with_tile(pos(1, 0), pos(1, 1), pos(3, 2), TileColor::Gray);
        assert!(rules.legal_moves(&state).contains(&mv));

        rules.apply_move(&mut state, &mv);
        assert_eq!(state.tile_at(pos(3, 2)), Some(TileColor::Gray));
        assert_eq!(state.inventory(Color::Black).gray, 0);
        assert_eq!(state.inventory(Color::White).gray, 1);
    }

    #[test]
    fn test_reset_restores_initial() {
        let rules = ContrastRules;
        let mut state = rules.new_state();
        rules.apply_move(&mut state, &Move::new(pos(2, 0), pos(2, 1)));
        rules.reset(&mut state);
        assert_eq!(state, GameState::initial());
    }

    #[test]
    fn test_win_on_goal_row() {
        let rules = ContrastRules;
        let mut state = GameState::empty();
        state.set_piece(pos(2, 3), Some(Color::Black));
        state.set_piece(pos(0, 4), Some(Color::White));
        assert!(!rules.is_win(&state, Color::Black));

        rules.apply_move(&mut state, &Move::new(pos(2, 3), pos(2, 4)));
        assert!(rules.is_win(&state, Color::Black));
        assert!(!rules.is_win(&state, Color::White));
    }

    #[test]
    fn test_loss_when_no_moves() {
        let rules = ContrastRules;
        let mut state = GameState::empty();
        // 白方被困在角落：两侧被黑方挡住
        state.set_piece(pos(0, 4), Some(Color::White));
        state.set_piece(pos(0, 3), Some(Color::Black));
        state.set_piece(pos(1, 4), Some(Color::Black));
        assert!(rules.is_loss(&state, Color::White));
        assert!(!rules.is_loss(&state, Color::Black));
    }
}
