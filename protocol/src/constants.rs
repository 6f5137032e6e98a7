//! 协议常量定义

/// 默认监听端口
pub const DEFAULT_PORT: u16 = 10000;

/// 默认监听地址
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// 棋盘宽度（列数 a-e）
pub const BOARD_WIDTH: usize = 5;

/// 棋盘高度（行数 1-5）
pub const BOARD_HEIGHT: usize = 5;

/// 服务端最大会话数
pub const MAX_SESSIONS: usize = 10;

/// 服务端最大房间数
pub const MAX_ROOMS: usize = MAX_SESSIONS / 2;

/// 单行命令最大长度（字节，不含换行）
pub const MAX_LINE_LEN: usize = 256;

/// 单次读取缓冲区大小
pub const READ_BUF_SIZE: usize = 1024;
