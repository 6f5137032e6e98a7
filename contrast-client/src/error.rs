//! 客户端错误类型

use protocol::ProtocolError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// 无法连接服务端
    #[error("无法连接服务端 {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// 读取键盘输入失败
    #[error("读取输入失败: {0}")]
    Input(#[from] std::io::Error),

    /// 与服务端通信失败
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
