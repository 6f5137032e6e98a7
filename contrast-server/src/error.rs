//! 服务端错误类型
//!
//! 除 `SessionCapacity` 外，所有错误都只产生一行 `Error: ...` 回复，连接保持打开。

use protocol::ProtocolError;
use thiserror::Error;

/// 服务端请求错误
#[derive(Error, Debug)]
pub enum ServerError {
    /// 会话表已满（接受连接时）
    #[error("Server full")]
    SessionCapacity,

    /// 房间表已满（JOIN 时）
    #[error("Server room capacity full")]
    RoomCapacity,

    /// CREATE 的房间号已被占用
    #[error("Room exists")]
    RoomExists,

    /// JOIN 的房间号不存在
    #[error("Room not found")]
    RoomNotFound,

    /// 对局中找不到所属房间
    #[error("Room error")]
    RoomError,

    /// 不是你的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 走法不在合法走法集合中
    #[error("Illegal move")]
    IllegalMove,

    /// 命令或坐标格式错误
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_user_reason() {
        assert_eq!(ServerError::NotYourTurn.to_string(), "Not your turn");
        assert_eq!(ServerError::RoomCapacity.to_string(), "Server room capacity full");
        assert_eq!(
            ServerError::from(ProtocolError::InvalidCoordinates).to_string(),
            "Invalid coordinates"
        );
    }
}
