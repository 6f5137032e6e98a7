//! 会话管理
//!
//! 固定容量的会话槽位表。槽位下标即 [`SessionId`]，空闲槽位的状态为
//! [`SessionState::Free`]。注册表只负责存储，状态迁移由调用方保证。

use protocol::{Color, RoomId, SessionId};

use crate::error::{Result, ServerError};

/// 连接 ID（每次接受连接单调递增，用于识别过期事件）
pub type ConnectionId = u64;

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 槽位空闲
    Free,
    /// 在大厅
    Lobby,
    /// 已创建房间，等待对手
    Waiting(RoomId),
    /// 对局中
    Playing(RoomId),
}

impl SessionState {
    /// 当前绑定的房间号（仅 Waiting / Playing）
    pub fn room_id(&self) -> Option<RoomId> {
        match self {
            SessionState::Waiting(id) | SessionState::Playing(id) => Some(*id),
            SessionState::Free | SessionState::Lobby => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, SessionState::Playing(_))
    }
}

/// 会话
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    /// 所属连接
    pub connection: Option<ConnectionId>,
    pub state: SessionState,
    /// 执子颜色（Waiting / Playing 时有效）
    pub color: Option<Color>,
}

impl Session {
    fn vacant(id: SessionId) -> Self {
        Self {
            id,
            connection: None,
            state: SessionState::Free,
            color: None,
        }
    }

    /// 回到大厅，清除房间与颜色
    pub fn enter_lobby(&mut self) {
        self.state = SessionState::Lobby;
        self.color = None;
    }

    /// 创建房间并等待（创建者执黑）
    pub fn wait_in(&mut self, room_id: RoomId) {
        self.state = SessionState::Waiting(room_id);
        self.color = Some(Color::Black);
    }

    /// 进入对局
    pub fn start_playing(&mut self, room_id: RoomId, color: Color) {
        self.state = SessionState::Playing(room_id);
        self.color = Some(color);
    }
}

/// 会话注册表
pub struct SessionRegistry {
    slots: Vec<Session>,
}

impl SessionRegistry {
    /// 创建指定容量的注册表
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(Session::vacant).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// 为新连接分配会话，初始状态为大厅
    pub fn allocate(&mut self, connection: ConnectionId) -> Result<SessionId> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.state == SessionState::Free)
            .ok_or(ServerError::SessionCapacity)?;
        slot.connection = Some(connection);
        slot.enter_lobby();
        Ok(slot.id)
    }

    /// 释放会话槽位
    pub fn release(&mut self, id: SessionId) {
        if let Some(slot) = self.slots.get_mut(id) {
            *slot = Session::vacant(id);
        }
    }

    /// 获取活跃会话
    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.slots.get(id).filter(|s| s.state != SessionState::Free)
    }

    /// 获取活跃会话（可变）
    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.slots.get_mut(id).filter(|s| s.state != SessionState::Free)
    }

    /// 按下标顺序遍历活跃会话
    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.slots.iter().filter(|s| s.state != SessionState::Free)
    }

    /// 活跃会话数
    pub fn active_count(&self) -> usize {
        self.iter().count()
    }
}
