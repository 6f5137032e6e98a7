//! 客户端对局状态
//!
//! 本地保存一份规则局面，按服务端转发的走法同步更新，
//! 用于显示棋盘和提示合法走法。合法性始终以服务端为准。

use contrast_rules::{ContrastRules, GameState, RulesEngine};
use protocol::{Color, ServerMessage};
use tracing::{debug, warn};

use crate::render::{render_base_moves, render_board};

const LOBBY_HINT: &str = "Returned to Lobby. (LIST, CREATE, JOIN, EXIT)";

/// 客户端对局跟踪
#[derive(Debug, Clone)]
pub struct MatchTracker {
    rules: ContrastRules,
    state: GameState,
    /// 对局中的执子颜色；大厅中为 None
    you: Option<Color>,
}

impl MatchTracker {
    pub fn new() -> Self {
        let rules = ContrastRules;
        Self {
            state: rules.new_state(),
            rules,
            you: None,
        }
    }

    pub fn you(&self) -> Option<Color> {
        self.you
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// 是否轮到本地玩家走子
    pub fn is_my_turn(&self) -> bool {
        self.you == Some(self.rules.current_player(&self.state))
    }

    /// 处理服务端的一行，返回需要显示的文本
    pub fn handle_line(&mut self, line: &str) -> Vec<String> {
        let mut out = Vec::new();
        match ServerMessage::from_line(line) {
            ServerMessage::OpponentMove(mv) | ServerMessage::YourMove(mv) => {
                if self.you.is_none() {
                    warn!(line, "不在对局中却收到走法");
                    out.push(line.to_string());
                    return out;
                }
                self.rules.apply_move(&mut self.state, &mv);
                debug!(%mv, "同步走法");
                out.push(if line.starts_with("OPPONENT_MOVE") {
                    "Opponent moved.".to_string()
                } else {
                    "Move accepted.".to_string()
                });
                out.push(render_board(&self.state, self.you));
                out.extend(self.prompt());
            }
            ServerMessage::Matched { you } | ServerMessage::OpponentFound { you } => {
                out.push(line.to_string());
                self.you = Some(you);
                self.rules.reset(&mut self.state);
                out.push(render_board(&self.state, self.you));
                out.extend(self.prompt());
            }
            ServerMessage::GameOver(outcome) => {
                out.push(line.to_string());
                out.push(if outcome.is_win() {
                    "!!! YOU WIN !!!".to_string()
                } else {
                    "... You Lose ...".to_string()
                });
                self.you = None;
                out.push(LOBBY_HINT.to_string());
            }
            ServerMessage::Error(_) => {
                out.push(line.to_string());
                out.extend(self.prompt());
            }
            _ => out.push(line.to_string()),
        }
        out
    }

    /// 对局中的走子提示
    pub fn prompt(&self) -> Vec<String> {
        if self.you.is_none() {
            return Vec::new();
        }
        if !self.is_my_turn() {
            return vec!["Waiting for opponent...".to_string()];
        }

        let moves = self.rules.legal_moves(&self.state);
        let mut out = vec![render_base_moves(&moves)];
        if !moves.is_empty() {
            out.push("Enter move (e.g. 'a1,a2' or 'a1,a2 b1g'):".to_string());
        }
        out
    }
}

impl Default for MatchTracker {
    fn default() -> Self {
        Self::new()
    }
}
