//! 错误类型定义

use thiserror::Error;

/// 协议错误类型
///
/// `Display` 文本即发给客户端的错误原因。
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// 未知命令
    #[error("Unknown command")]
    UnknownCommand,

    /// 房间号缺失或不是整数
    #[error("Invalid room id")]
    InvalidRoomId,

    /// 走法格式错误
    #[error("Invalid format. Use 'a1,a2' or 'a1,a2 b1g'")]
    InvalidFormat,

    /// 起点/终点坐标错误
    #[error("Invalid coordinates")]
    InvalidCoordinates,

    /// 放置地砖的坐标错误
    #[error("Invalid tile coordinates")]
    InvalidTileCoordinates,

    /// 地砖颜色错误
    #[error("Invalid tile color (b/g)")]
    InvalidTileColor,

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 连接已关闭
    #[error("Connection closed")]
    ConnectionClosed,

    /// 单行过长
    #[error("Line too long: {len} bytes (max: {max})")]
    LineTooLong { len: usize, max: usize },
}

impl ProtocolError {
    /// 是否为可恢复的请求级错误（连接保持打开）
    pub fn is_request_error(&self) -> bool {
        !matches!(
            self,
            ProtocolError::Io(_) | ProtocolError::ConnectionClosed | ProtocolError::LineTooLong { .. }
        )
    }
}

/// 协议操作结果类型
pub type Result<T> = std::result::Result<T, ProtocolError>;
