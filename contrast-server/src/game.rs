//! 对局控制
//!
//! MOVE 命令的处理顺序：定位房间、校验轮次、解析走法、
//! 与规则引擎给出的合法走法比对、执行并转发、判定终局。
//! 任一步失败都不修改局面。当前走子方完全由规则引擎决定。

use contrast_rules::RulesEngine;
use protocol::{GameOutcome, Notation, RoomId, ServerMessage, SessionId};
use tracing::{debug, info};

use crate::error::{Result, ServerError};
use crate::server::{PendingMessages, ServerState};
use crate::session::SessionState;

impl<R: RulesEngine> ServerState<R> {
    /// 处理走子
    pub(crate) fn handle_move(
        &mut self,
        id: SessionId,
        args: &str,
        pending: &mut PendingMessages,
    ) -> Result<()> {
        let session = self.sessions.get(id).ok_or(ServerError::RoomError)?;
        let (room_id, color) = match (session.state, session.color) {
            (SessionState::Playing(room_id), Some(color)) => (room_id, color),
            _ => return Err(ServerError::RoomError),
        };
        let room = self
            .rooms
            .find_by_id_mut(room_id)
            .ok_or(ServerError::RoomError)?;

        if self.rules.current_player(&room.state) != color {
            return Err(ServerError::NotYourTurn);
        }

        let mv = Notation::parse_move(args)?;
        if !self.rules.legal_moves(&room.state).contains(&mv) {
            return Err(ServerError::IllegalMove);
        }

        self.rules.apply_move(&mut room.state, &mv);
        let opponent = room.opponent_of(id);
        pending.send(opponent, ServerMessage::OpponentMove(mv));
        pending.send(id, ServerMessage::YourMove(mv));
        debug!(room_id, session_id = id, %mv, "走子");

        // 无子可走按规则引擎给出的下一走子方判定
        let next = self.rules.current_player(&room.state);
        let outcome = if self.rules.is_win(&room.state, color) {
            Some((GameOutcome::Win, GameOutcome::Lose))
        } else if !self.rules.is_loss(&room.state, next) {
            None
        } else if next == color {
            Some((GameOutcome::LoseNoMoves, GameOutcome::WinOpponentNoMoves))
        } else {
            Some((GameOutcome::WinOpponentNoMoves, GameOutcome::LoseNoMoves))
        };

        if let Some((mine, theirs)) = outcome {
            pending.send(id, ServerMessage::GameOver(mine));
            pending.send(opponent, ServerMessage::GameOver(theirs));
            info!(room_id, session_id = id, opponent, ?mine, "对局结束");
            self.finish_match(room_id, &[id, opponent]);
        }
        Ok(())
    }

    /// 停用房间并让双方回到大厅
    fn finish_match(&mut self, room_id: RoomId, players: &[SessionId]) {
        self.rooms.deactivate(room_id);
        for &player in players {
            if let Some(session) = self.sessions.get_mut(player) {
                session.enter_lobby();
            }
        }
    }
}
