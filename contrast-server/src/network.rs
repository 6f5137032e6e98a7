//! 网络层与主事件循环
//!
//! 结构：每个连接一个读任务和一个写任务，所有状态修改集中在主循环。
//!
//! - 读任务每完成一次读取就把得到的整批命令发给主循环，
//!   主循环按批次顺序处理，同一批次内的命令不会与其他连接交错。
//! - 写任务从发件箱取出文本行写入套接字；写入失败只记录日志。
//!   发件箱有界，对端长期不读导致发件箱写满时按断线处理。
//! - 主循环是唯一持有 [`ServerState`] 的地方，用 `select!` 同时等待
//!   新连接与读任务事件。
//!
//! 关闭连接即丢弃 [`ConnectionHandle`]：读任务被中止，写任务发完
//! 剩余消息后关闭写方向。

use std::collections::HashMap;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use contrast_rules::RulesEngine;
use protocol::{LineReader, LineWriter, ServerMessage, SessionId};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::server::{PendingMessages, ServerState};
use crate::session::ConnectionId;

/// 每个连接发件箱可积压的行数
const OUTBOX_CAPACITY: usize = 64;

/// 读任务发往主循环的事件
#[derive(Debug)]
enum ConnectionEvent {
    /// 一次读取得到的完整命令行
    Lines {
        session: SessionId,
        connection: ConnectionId,
        lines: Vec<String>,
    },
    /// 读到 EOF、读取出错或协议违规
    Closed {
        session: SessionId,
        connection: ConnectionId,
    },
}

impl ConnectionEvent {
    fn origin(&self) -> (SessionId, ConnectionId) {
        match self {
            ConnectionEvent::Lines { session, connection, .. }
            | ConnectionEvent::Closed { session, connection } => (*session, *connection),
        }
    }
}

/// 主循环持有的连接句柄
struct ConnectionHandle {
    outbox: mpsc::Sender<String>,
    reader: JoinHandle<()>,
}

impl ConnectionHandle {
    /// 投递一行；仅在发件箱已满时返回 false
    fn send(&self, line: String) -> bool {
        match self.outbox.try_send(line) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => false,
            // 写任务已退出说明对端已断开，断线事件会另行到达
            Err(TrySendError::Closed(_)) => true,
        }
    }
}

impl Drop for ConnectionHandle {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

/// 对局服务器
pub struct Server<R: RulesEngine> {
    listener: TcpListener,
    dispatcher: Dispatcher<R>,
}

/// 主循环中除监听套接字外的全部状态
struct Dispatcher<R: RulesEngine> {
    state: ServerState<R>,
    connections: HashMap<SessionId, ConnectionHandle>,
    next_connection: ConnectionId,
}

impl<R> Server<R>
where
    R: RulesEngine + Send + 'static,
{
    /// 绑定监听地址
    pub async fn bind(config: &ServerConfig, rules: R) -> Result<Self> {
        let addr = config.network.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("无法监听地址: {}", addr))?;
        info!(addr = %listener.local_addr()?, max_sessions = config.max_sessions, "服务器已启动");

        Ok(Self {
            listener,
            dispatcher: Dispatcher {
                state: ServerState::new(rules, config),
                connections: HashMap::new(),
                next_connection: 0,
            },
        })
    }

    /// 实际监听地址（端口为 0 时由系统分配）
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// 运行主循环
    pub async fn run(self) -> Result<()> {
        let Self {
            listener,
            mut dispatcher,
        } = self;
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();

        loop {
            tokio::select! {
                biased;

                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => dispatcher.accept(stream, peer, &events_tx),
                    Err(e) => warn!(error = %e, "接受连接失败"),
                },

                Some(event) = events_rx.recv() => dispatcher.dispatch(event),
            }
        }
    }
}

impl<R: RulesEngine> Dispatcher<R> {
    /// 接受新连接
    fn accept(
        &mut self,
        stream: TcpStream,
        peer: SocketAddr,
        events: &mpsc::UnboundedSender<ConnectionEvent>,
    ) {
        self.next_connection += 1;
        let connection = self.next_connection;

        let mut pending = PendingMessages::new();
        let session = match self.state.handle_connect(connection, &mut pending) {
            Ok(session) => session,
            Err(e) => {
                warn!(%peer, error = %e, "会话已满，拒绝连接");
                tokio::spawn(reject(stream));
                return;
            }
        };

        let (read_half, write_half) = stream.into_split();
        let (outbox_tx, outbox_rx) = mpsc::channel(OUTBOX_CAPACITY);
        tokio::spawn(write_loop(write_half, outbox_rx, session));
        let reader = tokio::spawn(read_loop(read_half, session, connection, events.clone()));

        self.connections.insert(
            session,
            ConnectionHandle {
                outbox: outbox_tx,
                reader,
            },
        );
        info!(session_id = session, %peer, "接受连接");
        self.flush(pending);
    }

    /// 处理读任务事件
    fn dispatch(&mut self, event: ConnectionEvent) {
        let (session, connection) = event.origin();
        let current = self.state.sessions.get(session).and_then(|s| s.connection);
        if current != Some(connection) {
            debug!(session_id = session, connection, "忽略已关闭连接的事件");
            return;
        }

        let mut pending = PendingMessages::new();
        match event {
            ConnectionEvent::Lines { lines, .. } => {
                self.state.handle_lines(session, &lines, &mut pending);
            }
            ConnectionEvent::Closed { .. } => {
                self.state.handle_disconnect(session, &mut pending);
            }
        }
        self.flush(pending);
    }

    /// 投递消息，然后关闭需要关闭的连接
    ///
    /// 发件箱已满的会话按断线处理，由此产生的消息继续投递。
    fn flush(&mut self, mut pending: PendingMessages) {
        loop {
            let mut stalled = Vec::new();
            for (session, msg) in pending.messages {
                if stalled.contains(&session) {
                    continue;
                }
                match self.connections.get(&session) {
                    Some(handle) => {
                        if !handle.send(msg.to_line()) {
                            warn!(session_id = session, "发件箱已满，按断线处理");
                            stalled.push(session);
                        }
                    }
                    None => debug!(session_id = session, "目标会话没有连接，丢弃消息"),
                }
            }
            for session in pending.closes {
                self.connections.remove(&session);
            }
            if stalled.is_empty() {
                return;
            }

            pending = PendingMessages::new();
            for session in stalled {
                self.state.handle_disconnect(session, &mut pending);
            }
        }
    }
}

/// 读任务
async fn read_loop(
    read_half: OwnedReadHalf,
    session: SessionId,
    connection: ConnectionId,
    events: mpsc::UnboundedSender<ConnectionEvent>,
) {
    let mut reader = LineReader::new(read_half);
    loop {
        match reader.read_batch().await {
            Ok(lines) if lines.is_empty() => continue,
            Ok(lines) => {
                let event = ConnectionEvent::Lines {
                    session,
                    connection,
                    lines,
                };
                if events.send(event).is_err() {
                    return;
                }
            }
            Err(e) => {
                debug!(session_id = session, error = %e, "连接读取结束");
                let _ = events.send(ConnectionEvent::Closed {
                    session,
                    connection,
                });
                return;
            }
        }
    }
}

/// 写任务
async fn write_loop(
    write_half: OwnedWriteHalf,
    mut outbox: mpsc::Receiver<String>,
    session: SessionId,
) {
    let mut writer = LineWriter::new(write_half);
    while let Some(line) = outbox.recv().await {
        if let Err(e) = writer.write_line(&line).await {
            debug!(session_id = session, error = %e, "写入失败，对端可能已断开");
            return;
        }
    }
    let _ = writer.shutdown().await;
}

/// 会话已满：通知后立即关闭
async fn reject(stream: TcpStream) {
    let mut writer = LineWriter::new(stream);
    if let Err(e) = writer.write_line(&ServerMessage::ServerFull.to_line()).await {
        debug!(error = %e, "发送 Server full 失败");
    }
    let _ = writer.shutdown().await;
}
