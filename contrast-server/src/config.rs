//! 服务端配置
//!
//! 默认值来自协议常量；若 `<config_dir>/contrast/server.json` 存在则覆盖默认值。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use protocol::{NetworkConfig, MAX_SESSIONS};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 配置文件名
const CONFIG_FILE: &str = "server.json";

/// 服务端配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub network: NetworkConfig,
    /// 最大并发会话数
    pub max_sessions: usize,
}

impl ServerConfig {
    /// 最大并发房间数（会话数的一半）
    pub fn max_rooms(&self) -> usize {
        self.max_sessions / 2
    }

    /// 从默认位置加载；文件不存在时使用默认配置
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// 从指定文件加载
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {:?}", path))?;
        let config: ServerConfig = serde_json::from_str(&content)
            .with_context(|| format!("配置文件格式错误: {:?}", path))?;
        debug!(?path, ?config, "配置已加载");
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            max_sessions: MAX_SESSIONS,
        }
    }
}

/// 默认配置文件路径
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("contrast").join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.network.port, protocol::DEFAULT_PORT);
        assert_eq!(config.max_sessions, 10);
        assert_eq!(config.max_rooms(), 5);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_sessions": 4, "network": {{ "port": 12000 }} }}"#).unwrap();

        let config = ServerConfig::load_from(file.path()).unwrap();
        assert_eq!(config.max_sessions, 4);
        assert_eq!(config.max_rooms(), 2);
        assert_eq!(config.network.port, 12000);
        assert_eq!(config.network.host, protocol::DEFAULT_HOST);
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(ServerConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ServerConfig::load_from(&dir.path().join("absent.json")).is_err());
    }
}
