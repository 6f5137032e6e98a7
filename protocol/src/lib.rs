//! Contrast 共享协议库
//!
//! 包含:
//! - 颜色、地砖、位置等核心数据结构
//! - 走法定义与记谱解析（数值形式 / 简写形式）
//! - 消息类型定义 (ClientCommand, ServerMessage)
//! - 按行读写的传输层 (LineReader, LineWriter)

mod constants;
mod error;
mod message;
mod moves;
mod notation;
mod piece;
mod transport;

pub use constants::*;
pub use error::{ProtocolError, Result};
pub use message::{
    ClientCommand, GameOutcome, RoomEntry, RoomId, RoomStatus, ServerMessage, SessionId,
};
pub use moves::{Move, TilePlacement};
pub use notation::Notation;
pub use piece::{Color, Position, TileColor};
pub use transport::{LineReader, LineWriter, NetworkConfig};
