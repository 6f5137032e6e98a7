//! 传输层
//!
//! 以换行分隔的文本行读写。读取端按"单次读取"返回一批完整的行，
//! 便于服务端把同一次读取到的多条命令作为一个批次顺序处理。

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{ProtocolError, Result};
use crate::{DEFAULT_HOST, DEFAULT_PORT, MAX_LINE_LEN, READ_BUF_SIZE};

/// 网络配置
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub host: String,
    pub port: u16,
}

impl NetworkConfig {
    /// 指定主机、默认端口
    pub fn with_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
        }
    }

    /// `host:port` 形式的地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::with_host(DEFAULT_HOST)
    }
}

// ============================================================================
// 行编解码
// ============================================================================

/// 行读取器
pub struct LineReader<R> {
    reader: R,
    /// 尚未遇到换行的残余字节
    pending: Vec<u8>,
    /// 已切分但尚未交付的行（`read_line` 使用）
    ready: VecDeque<String>,
    max_line_len: usize,
    /// 已检测到超长行：先交付之前的完整行，下次读取时报告
    overflow: Option<usize>,
}

impl<R: AsyncRead + Unpin + Send> LineReader<R> {
    /// 创建新的行读取器
    pub fn new(reader: R) -> Self {
        Self::with_max_line_len(reader, MAX_LINE_LEN)
    }

    /// 指定单行最大长度
    pub fn with_max_line_len(reader: R, max_line_len: usize) -> Self {
        Self {
            reader,
            pending: Vec::with_capacity(READ_BUF_SIZE),
            ready: VecDeque::new(),
            max_line_len,
            overflow: None,
        }
    }

    /// 执行一次读取，返回本次读取完成的所有行（按到达顺序）
    ///
    /// 可能返回空批次（只读到半行）。读到 EOF 返回 `ConnectionClosed`。
    /// 遇到超长行时，本次已完整的行照常返回，`LineTooLong` 在下一次调用时返回。
    pub async fn read_batch(&mut self) -> Result<Vec<String>> {
        if let Some(len) = self.overflow {
            return Err(self.too_long(len));
        }

        let mut buf = [0u8; READ_BUF_SIZE];
        let n = self.reader.read(&mut buf).await?;
        if n == 0 {
            return Err(ProtocolError::ConnectionClosed);
        }
        self.pending.extend_from_slice(&buf[..n]);

        let mut lines = Vec::new();
        while let Some(idx) = self.pending.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=idx).collect();
            let line = String::from_utf8_lossy(&raw[..idx]);
            let line = line.trim_end_matches('\r');
            if line.len() > self.max_line_len {
                self.overflow = Some(line.len());
                break;
            }
            lines.push(line.to_string());
        }

        if self.overflow.is_none() && self.pending.len() > self.max_line_len {
            self.overflow = Some(self.pending.len());
        }
        if let Some(len) = self.overflow {
            self.pending.clear();
            if lines.is_empty() {
                return Err(self.too_long(len));
            }
        }

        Ok(lines)
    }

    fn too_long(&self, len: usize) -> ProtocolError {
        ProtocolError::LineTooLong {
            len,
            max: self.max_line_len,
        }
    }

    /// 读取下一行
    pub async fn read_line(&mut self) -> Result<String> {
        loop {
            if let Some(line) = self.ready.pop_front() {
                return Ok(line);
            }
            let batch = self.read_batch().await?;
            self.ready.extend(batch);
        }
    }
}

/// 行写入器
pub struct LineWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin + Send> LineWriter<W> {
    /// 创建新的行写入器
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// 写入一行（自动追加换行）
    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// 关闭写方向
    pub async fn shutdown(&mut self) -> Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
