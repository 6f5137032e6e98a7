//! 测试辅助：可编排结果的规则引擎

use contrast_rules::RulesEngine;
use protocol::{Color, Move, Position, SessionId};

use crate::config::ServerConfig;
use crate::server::{PendingMessages, ServerState};

/// 测试用局面
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedState {
    pub turn: Color,
    /// 当前允许的走法
    pub legal: Vec<Move>,
    /// 已执行的走法
    pub applied: Vec<Move>,
    /// 执行下一步后判定为获胜的一方
    pub winner: Option<Color>,
    /// 无合法走法的一方
    pub stuck: Option<Color>,
    /// 执行走法后不交换走子方
    pub hold_turn: bool,
}

/// 测试用规则：合法走法由局面直接给出，胜负由测试设置
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedRules;

impl ScriptedRules {
    pub fn opening() -> Vec<Move> {
        vec![
            Move::new(Position::new_unchecked(0, 0), Position::new_unchecked(0, 1)),
            Move::new(Position::new_unchecked(0, 4), Position::new_unchecked(0, 3)),
        ]
    }
}

impl RulesEngine for ScriptedRules {
    type State = ScriptedState;

    fn new_state(&self) -> ScriptedState {
        ScriptedState {
            turn: Color::Black,
            legal: Self::opening(),
            applied: Vec::new(),
            winner: None,
            stuck: None,
            hold_turn: false,
        }
    }

    fn reset(&self, state: &mut ScriptedState) {
        *state = self.new_state();
    }

    fn current_player(&self, state: &ScriptedState) -> Color {
        state.turn
    }

    fn legal_moves(&self, state: &ScriptedState) -> Vec<Move> {
        state.legal.clone()
    }

    fn apply_move(&self, state: &mut ScriptedState, mv: &Move) {
        state.applied.push(*mv);
        if !state.hold_turn {
            state.turn = state.turn.opponent();
        }
    }

    fn is_win(&self, state: &ScriptedState, color: Color) -> bool {
        !state.applied.is_empty() && state.winner == Some(color)
    }

    fn is_loss(&self, state: &ScriptedState, color: Color) -> bool {
        state.stuck == Some(color)
    }
}

pub fn scripted_state() -> ServerState<ScriptedRules> {
    ServerState::new(ScriptedRules, &ServerConfig::default())
}

/// 建立会话并丢弃欢迎消息
pub fn connect<R: RulesEngine>(state: &mut ServerState<R>) -> SessionId {
    let mut pending = PendingMessages::new();
    let id = state.sessions.capacity() as u64 + state.sessions.active_count() as u64;
    state
        .handle_connect(id, &mut pending)
        .expect("测试会话容量不足")
}

/// 建立两个会话并在指定房间开局，返回 (黑方, 白方)
pub fn start_match<R: RulesEngine>(
    state: &mut ServerState<R>,
    room_id: protocol::RoomId,
) -> (SessionId, SessionId) {
    let black = connect(state);
    let white = connect(state);
    let mut pending = PendingMessages::new();
    state.handle_line(black, &format!("CREATE {}", room_id), &mut pending);
    state.handle_line(white, &format!("JOIN {}", room_id), &mut pending);
    (black, white)
}
