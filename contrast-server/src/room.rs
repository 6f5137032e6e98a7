//! 房间系统
//!
//! 固定容量的对局槽位表。房间只在 JOIN 配对成功时启用，
//! 对局结束或断线判负时停用，房间号随之可被重新使用。

use protocol::{RoomId, SessionId};
use tracing::info;

use crate::error::{Result, ServerError};

/// 房间（一局进行中的对局）
#[derive(Debug)]
pub struct Room<S> {
    pub id: RoomId,
    /// 黑方会话（房间创建者）
    pub black: SessionId,
    /// 白方会话（加入者）
    pub white: SessionId,
    /// 规则引擎状态
    pub state: S,
    pub active: bool,
}

impl<S> Room<S> {
    /// 获取对手会话
    pub fn opponent_of(&self, session: SessionId) -> SessionId {
        if session == self.black {
            self.white
        } else {
            self.black
        }
    }

    /// 检查会话是否在房间中
    pub fn has_session(&self, session: SessionId) -> bool {
        self.black == session || self.white == session
    }
}

/// 房间注册表
pub struct RoomRegistry<S> {
    rooms: Vec<Room<S>>,
}

impl<S> RoomRegistry<S> {
    /// 创建指定容量的注册表；每个槽位预先持有一份规则状态
    pub fn new(capacity: usize, mut new_state: impl FnMut() -> S) -> Self {
        let rooms = (0..capacity)
            .map(|_| Room {
                id: 0,
                black: 0,
                white: 0,
                state: new_state(),
                active: false,
            })
            .collect();
        Self { rooms }
    }

    pub fn capacity(&self) -> usize {
        self.rooms.len()
    }

    /// 按房间号查找活跃房间
    pub fn find_by_id(&self, room_id: RoomId) -> Option<&Room<S>> {
        self.rooms.iter().find(|r| r.active && r.id == room_id)
    }

    /// 按房间号查找活跃房间（可变）
    pub fn find_by_id_mut(&mut self, room_id: RoomId) -> Option<&mut Room<S>> {
        self.rooms.iter_mut().find(|r| r.active && r.id == room_id)
    }

    /// 查找空闲槽位
    pub fn find_free_slot(&mut self) -> Result<&mut Room<S>> {
        self.rooms
            .iter_mut()
            .find(|r| !r.active)
            .ok_or(ServerError::RoomCapacity)
    }

    /// 停用房间；不修改双方会话状态
    pub fn deactivate(&mut self, room_id: RoomId) {
        if let Some(room) = self.find_by_id_mut(room_id) {
            room.active = false;
            info!(room_id, "房间关闭");
        }
    }

    /// 按槽位顺序遍历活跃房间
    pub fn active(&self) -> impl Iterator<Item = &Room<S>> {
        self.rooms.iter().filter(|r| r.active)
    }
}
