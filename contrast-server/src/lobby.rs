//! 大厅命令处理
//!
//! LIST / SAY / CREATE / JOIN。CREATE 只在会话上登记房间号，
//! 房间对象在 JOIN 配对成功时才从房间表中分配。

use contrast_rules::RulesEngine;
use protocol::{Color, RoomEntry, RoomId, RoomStatus, ServerMessage, SessionId};
use tracing::info;

use crate::error::{Result, ServerError};
use crate::server::{PendingMessages, ServerState};
use crate::session::SessionState;

impl<R: RulesEngine> ServerState<R> {
    /// 列出等待中的房间与进行中的对局
    pub(crate) fn handle_list(&self, id: SessionId, pending: &mut PendingMessages) {
        let waiting = self.sessions.iter().filter_map(|s| match s.state {
            SessionState::Waiting(room_id) => Some(RoomEntry {
                id: room_id,
                status: RoomStatus::Waiting,
            }),
            _ => None,
        });
        let playing = self.rooms.active().map(|room| RoomEntry {
            id: room.id,
            status: RoomStatus::Playing,
        });

        let rooms = waiting.chain(playing).collect();
        pending.send(id, ServerMessage::RoomList { rooms });
    }

    /// 向大厅中的其他会话广播聊天
    pub(crate) fn handle_say(&self, id: SessionId, text: &str, pending: &mut PendingMessages) {
        if text.is_empty() {
            return;
        }
        for session in self.sessions.iter() {
            if session.id != id && session.state == SessionState::Lobby {
                pending.send(
                    session.id,
                    ServerMessage::Chat {
                        from: id,
                        text: text.to_string(),
                    },
                );
            }
        }
    }

    /// 创建房间并等待对手
    pub(crate) fn handle_create(
        &mut self,
        id: SessionId,
        room_id: RoomId,
        pending: &mut PendingMessages,
    ) -> Result<()> {
        // 等待中的会话与进行中的房间共用同一个房间号空间
        let taken = self
            .sessions
            .iter()
            .any(|s| s.state.room_id() == Some(room_id))
            || self.rooms.find_by_id(room_id).is_some();
        if taken {
            return Err(ServerError::RoomExists);
        }

        let session = self.sessions.get_mut(id).ok_or(ServerError::RoomError)?;
        session.wait_in(room_id);
        pending.send(id, ServerMessage::RoomCreated { you: Color::Black });
        info!(session_id = id, room_id, "房间创建，等待对手");
        Ok(())
    }

    /// 加入等待中的房间并开局
    pub(crate) fn handle_join(
        &mut self,
        id: SessionId,
        room_id: RoomId,
        pending: &mut PendingMessages,
    ) -> Result<()> {
        let black = self
            .sessions
            .iter()
            .find(|s| s.id != id && s.state == SessionState::Waiting(room_id))
            .map(|s| s.id)
            .ok_or(ServerError::RoomNotFound)?;

        let room = self.rooms.find_free_slot()?;
        room.id = room_id;
        room.black = black;
        room.white = id;
        room.active = true;
        self.rules.reset(&mut room.state);

        if let Some(session) = self.sessions.get_mut(black) {
            session.start_playing(room_id, Color::Black);
        }
        if let Some(session) = self.sessions.get_mut(id) {
            session.start_playing(room_id, Color::White);
        }

        pending.send(id, ServerMessage::Matched { you: Color::White });
        pending.send(black, ServerMessage::OpponentFound { you: Color::Black });
        info!(room_id, black, white = id, "对局开始");
        Ok(())
    }
}
