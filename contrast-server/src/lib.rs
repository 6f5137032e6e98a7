//! Contrast 对局服务端
//!
//! 包含:
//! - 会话管理
//! - 房间系统
//! - 大厅命令处理
//! - 对局控制（走法校验与转发）
//! - 网络层与主事件循环

pub mod config;
pub mod error;
pub mod game;
pub mod lobby;
pub mod network;
pub mod room;
pub mod server;
pub mod session;

#[cfg(test)]
mod test_support;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use network::Server;
pub use room::{Room, RoomRegistry};
pub use server::{PendingMessages, ServerState};
pub use session::{ConnectionId, Session, SessionRegistry, SessionState};
