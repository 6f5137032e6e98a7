//! Contrast 终端客户端
//!
//! 包含:
//! - 终端棋盘渲染
//! - 键盘输入到线路命令的转换
//! - 本地对局状态同步

pub mod error;
pub mod input;
pub mod render;
pub mod session;

use protocol::{ClientCommand, LineReader, LineWriter, NetworkConfig, ProtocolError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, info};

pub use error::{ClientError, Result};
pub use input::{translate, InputAction};
pub use session::MatchTracker;

/// 连接服务端并运行交互循环，直到输入 EXIT 或服务端断开
pub async fn run(host: &str) -> Result<()> {
    let addr = NetworkConfig::with_host(host).addr();
    let stream = TcpStream::connect(&addr)
        .await
        .map_err(|source| ClientError::Connect {
            addr: addr.clone(),
            source,
        })?;
    info!(%addr, "已连接服务端");

    let (read_half, write_half) = stream.into_split();
    let mut server = LineReader::new(read_half);
    let mut writer = LineWriter::new(write_half);
    let mut keyboard = BufReader::new(tokio::io::stdin()).lines();
    let mut tracker = MatchTracker::new();

    println!("Connected. Commands: LIST, CREATE <id>, JOIN <id>, EXIT");

    loop {
        tokio::select! {
            line = server.read_line() => match line {
                Ok(line) => {
                    for text in tracker.handle_line(&line) {
                        println!("{}", text);
                    }
                }
                Err(ProtocolError::ConnectionClosed) => {
                    println!("Server closed the connection.");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            },

            input = keyboard.next_line() => {
                let Some(input) = input? else {
                    debug!("标准输入结束");
                    return quit(&mut writer).await;
                };
                match translate(&input, tracker.is_my_turn()) {
                    InputAction::Send(line) => writer.write_line(&line).await?,
                    InputAction::Reject(reason) => {
                        println!("{}", reason);
                        for text in tracker.prompt() {
                            println!("{}", text);
                        }
                    }
                    InputAction::Quit => return quit(&mut writer).await,
                    InputAction::Ignore => {}
                }
            }
        }
    }
}

async fn quit<W>(writer: &mut LineWriter<W>) -> Result<()>
where
    W: tokio::io::AsyncWrite + Unpin + Send,
{
    println!("Exiting...");
    // 服务端可能已经断开
    let _ = writer.write_line(&ClientCommand::Exit.to_line()).await;
    let _ = writer.shutdown().await;
    Ok(())
}
