//! 服务器主逻辑
//!
//! [`ServerState`] 是纯同步的状态机：网络层把每次读取到的一批命令交给它，
//! 它修改会话表与房间表，并把需要发送的消息与需要关闭的会话记入
//! [`PendingMessages`]，由网络层统一投递。

use protocol::{ClientCommand, GameOutcome, ProtocolError, ServerMessage, SessionId};
use contrast_rules::RulesEngine;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::Result;
use crate::room::RoomRegistry;
use crate::session::{ConnectionId, SessionRegistry, SessionState};

/// 服务器状态
pub struct ServerState<R: RulesEngine> {
    pub rules: R,
    pub sessions: SessionRegistry,
    pub rooms: RoomRegistry<R::State>,
}

/// 待发送的消息
#[derive(Debug, Default)]
pub struct PendingMessages {
    /// 按产生顺序排列的 (目标会话, 消息)
    pub messages: Vec<(SessionId, ServerMessage)>,
    /// 需要关闭连接的会话
    pub closes: Vec<SessionId>,
}

impl PendingMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, session: SessionId, msg: ServerMessage) {
        self.messages.push((session, msg));
    }

    pub fn close(&mut self, session: SessionId) {
        self.closes.push(session);
    }

    /// 取出发给指定会话的所有消息（测试用）
    pub fn take_for(&mut self, session: SessionId) -> Vec<ServerMessage> {
        let (mine, rest): (Vec<_>, Vec<_>) =
            self.messages.drain(..).partition(|(id, _)| *id == session);
        self.messages = rest;
        mine.into_iter().map(|(_, msg)| msg).collect()
    }
}

impl<R: RulesEngine> ServerState<R> {
    pub fn new(rules: R, config: &ServerConfig) -> Self {
        let rooms = RoomRegistry::new(config.max_rooms(), || rules.new_state());
        Self {
            sessions: SessionRegistry::new(config.max_sessions),
            rooms,
            rules,
        }
    }

    /// 处理新连接：分配会话并发送欢迎信息
    pub fn handle_connect(
        &mut self,
        connection: ConnectionId,
        pending: &mut PendingMessages,
    ) -> Result<SessionId> {
        let id = self.sessions.allocate(connection)?;
        pending.send(id, ServerMessage::Welcome);
        info!(session_id = id, connection, "会话建立");
        Ok(id)
    }

    /// 顺序处理一次读取得到的所有命令
    ///
    /// 每条命令都能看到前一条命令造成的修改；会话在批次中途关闭时，其余命令被丢弃。
    pub fn handle_lines<S: AsRef<str>>(
        &mut self,
        id: SessionId,
        lines: &[S],
        pending: &mut PendingMessages,
    ) {
        for line in lines {
            if self.sessions.get(id).is_none() {
                debug!(session_id = id, "会话已关闭，丢弃剩余命令");
                break;
            }
            self.handle_line(id, line.as_ref(), pending);
        }
    }

    /// 处理单条命令
    pub fn handle_line(&mut self, id: SessionId, line: &str, pending: &mut PendingMessages) {
        let Some(session) = self.sessions.get(id) else {
            return;
        };
        let playing = session.state.is_playing();

        let command = match ClientCommand::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return,
            Err(_) if playing => {
                pending.send(id, ServerMessage::UnknownGameCommand);
                return;
            }
            Err(ProtocolError::UnknownCommand) => {
                pending.send(id, ServerMessage::UnknownCommand);
                return;
            }
            Err(e) => {
                pending.send(id, ServerMessage::Error(e.to_string()));
                return;
            }
        };
        debug!(session_id = id, ?command, "收到命令");

        let result = match command {
            ClientCommand::Exit => {
                self.handle_disconnect(id, pending);
                Ok(())
            }
            ClientCommand::Move(args) if playing => self.handle_move(id, &args, pending),
            _ if playing => {
                pending.send(id, ServerMessage::UnknownGameCommand);
                Ok(())
            }
            ClientCommand::Move(_) => {
                pending.send(id, ServerMessage::UnknownCommand);
                Ok(())
            }
            ClientCommand::List => {
                self.handle_list(id, pending);
                Ok(())
            }
            ClientCommand::Say(text) => {
                self.handle_say(id, &text, pending);
                Ok(())
            }
            ClientCommand::Create(room_id) => self.handle_create(id, room_id, pending),
            ClientCommand::Join(room_id) => self.handle_join(id, room_id, pending),
        };

        if let Err(e) = result {
            debug!(session_id = id, error = %e, "请求被拒绝");
            pending.send(id, ServerMessage::Error(e.to_string()));
        }
    }

    /// 处理断线（包括 EXIT）
    ///
    /// 对局中断线判对手获胜；无论之前处于什么状态，会话都被释放。
    pub fn handle_disconnect(&mut self, id: SessionId, pending: &mut PendingMessages) {
        let Some(session) = self.sessions.get(id) else {
            return;
        };

        if let SessionState::Playing(room_id) = session.state {
            match self.rooms.find_by_id(room_id).map(|room| room.opponent_of(id)) {
                Some(opponent) => {
                    pending.send(opponent, ServerMessage::GameOver(GameOutcome::OpponentDisconnected));
                    if let Some(opp) = self.sessions.get_mut(opponent) {
                        opp.enter_lobby();
                    }
                    self.rooms.deactivate(room_id);
                    info!(room_id, winner = opponent, loser = id, "对手断线，对局结束");
                }
                None => warn!(session_id = id, room_id, "断线会话的房间不存在"),
            }
        }

        pending.close(id);
        self.sessions.release(id);
        info!(session_id = id, "会话断开");
    }
}
