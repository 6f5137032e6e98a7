//! 消息类型定义
//!
//! 线路协议为以换行结尾的 ASCII 文本行。本模块负责在文本行与
//! 类型化消息之间转换，不涉及任何 IO。

use crate::error::{ProtocolError, Result};
use crate::moves::Move;
use crate::piece::{Color, Position, TileColor};

/// 会话 ID（服务端会话槽位下标）
pub type SessionId = usize;

/// 房间 ID（由客户端指定的整数）
pub type RoomId = i32;

/// 客户端发送给服务端的命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    // === 大厅命令 ===
    /// 列出房间
    List,
    /// 向大厅广播聊天（文本可能为空）
    Say(String),
    /// 创建房间并等待对手
    Create(RoomId),
    /// 加入等待中的房间
    Join(RoomId),
    /// 断开连接
    Exit,

    // === 对局命令 ===
    /// 走子，保留原始参数；参数在轮次校验之后才解析
    Move(String),
}

impl ClientCommand {
    /// 解析一行命令
    ///
    /// 空行返回 `Ok(None)`。首个空白分隔的词为命令名，其余为参数。
    pub fn parse(line: &str) -> Result<Option<ClientCommand>> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.trim_end().is_empty() {
            return Ok(None);
        }

        let (name, rest) = trimmed.split_once(char::is_whitespace).unwrap_or((trimmed, ""));

        let cmd = match name {
            "LIST" => ClientCommand::List,
            "SAY" => ClientCommand::Say(rest.to_string()),
            "CREATE" => ClientCommand::Create(Self::parse_room_id(rest)?),
            "JOIN" => ClientCommand::Join(Self::parse_room_id(rest)?),
            "EXIT" => ClientCommand::Exit,
            "MOVE" => ClientCommand::Move(rest.trim().to_string()),
            _ => return Err(ProtocolError::UnknownCommand),
        };
        Ok(Some(cmd))
    }

    fn parse_room_id(rest: &str) -> Result<RoomId> {
        rest.split_whitespace()
            .next()
            .and_then(|tok| tok.parse::<RoomId>().ok())
            .ok_or(ProtocolError::InvalidRoomId)
    }

    /// 格式化为线路文本（不含换行）
    pub fn to_line(&self) -> String {
        match self {
            ClientCommand::List => "LIST".to_string(),
            ClientCommand::Say(text) => format!("SAY {}", text),
            ClientCommand::Create(id) => format!("CREATE {}", id),
            ClientCommand::Join(id) => format!("JOIN {}", id),
            ClientCommand::Exit => "EXIT".to_string(),
            ClientCommand::Move(args) => format!("MOVE {}", args),
        }
    }
}

/// 房间列表中的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Waiting,
    Playing,
}

/// 房间列表条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomEntry {
    pub id: RoomId,
    pub status: RoomStatus,
}

/// 对局结束方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// 己方达成胜利条件
    Win,
    /// 对方无合法走法
    WinOpponentNoMoves,
    /// 对方达成胜利条件
    Lose,
    /// 己方无合法走法
    LoseNoMoves,
    /// 对方断线判负
    OpponentDisconnected,
}

impl GameOutcome {
    /// 是否为己方胜利
    pub fn is_win(&self) -> bool {
        matches!(
            self,
            GameOutcome::Win | GameOutcome::WinOpponentNoMoves | GameOutcome::OpponentDisconnected
        )
    }
}

/// 服务端发送给客户端的消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    // === 连接 ===
    /// 欢迎与帮助
    Welcome,
    /// 会话已满（随后关闭连接）
    ServerFull,

    // === 大厅 ===
    /// 房间已创建，等待对手
    RoomCreated { you: Color },
    /// 加入者收到的开局确认
    Matched { you: Color },
    /// 创建者收到的开局确认
    OpponentFound { you: Color },
    /// 房间列表
    RoomList { rooms: Vec<RoomEntry> },
    /// 大厅聊天
    Chat { from: SessionId, text: String },

    // === 对局 ===
    /// 对手的走法
    OpponentMove(Move),
    /// 己方走法已被接受
    YourMove(Move),
    /// 对局结束
    GameOver(GameOutcome),

    // === 错误 ===
    /// 请求错误
    Error(String),
    /// 未知命令
    UnknownCommand,
    /// 对局中收到非 MOVE 命令
    UnknownGameCommand,

    /// 无法识别的文本（客户端解析用）
    Text(String),
}

impl ServerMessage {
    /// 格式化为线路文本（不含末尾换行，房间列表可能为多行）
    pub fn to_line(&self) -> String {
        match self {
            ServerMessage::Welcome => {
                "Welcome! Cmds: LIST, SAY <msg>, CREATE <id>, JOIN <id>, EXIT".to_string()
            }
            ServerMessage::ServerFull => "Server full.".to_string(),
            ServerMessage::RoomCreated { you } => {
                format!("Room created. Waiting... (You are {})", you)
            }
            ServerMessage::Matched { you } => format!("Matched! Start! (You are {})", you),
            ServerMessage::OpponentFound { you } => {
                format!("Opponent found! Start! (You are {})", you)
            }
            ServerMessage::RoomList { rooms } => {
                let mut out = String::from("Active Rooms:");
                if rooms.is_empty() {
                    out.push_str("\n(None)");
                }
                for room in rooms {
                    let status = match room.status {
                        RoomStatus::Waiting => "Waiting",
                        RoomStatus::Playing => "Playing",
                    };
                    out.push_str(&format!("\n- Room {} ({})", room.id, status));
                }
                out
            }
            ServerMessage::Chat { from, text } => format!("Client {} says: {}", from, text),
            ServerMessage::OpponentMove(mv) => format!("OPPONENT_MOVE {}", mv.to_wire()),
            ServerMessage::YourMove(mv) => format!("YOUR_MOVE {}", mv.to_wire()),
            ServerMessage::GameOver(outcome) => match outcome {
                GameOutcome::Win => "WIN",
                GameOutcome::WinOpponentNoMoves => "WIN (Opponent No Moves)",
                GameOutcome::Lose => "LOSE",
                GameOutcome::LoseNoMoves => "LOSE (No Moves)",
                GameOutcome::OpponentDisconnected => "Opponent disconnected. You Win!",
            }
            .to_string(),
            ServerMessage::Error(reason) => format!("Error: {}", reason),
            ServerMessage::UnknownCommand => "Unknown command.".to_string(),
            ServerMessage::UnknownGameCommand => {
                "Unknown command in game. Use 'MOVE ...'".to_string()
            }
            ServerMessage::Text(text) => text.clone(),
        }
    }

    /// 解析服务端发来的一行（客户端使用）
    ///
    /// 无法识别的行原样作为 `Text` 返回；房间列表等多行消息逐行落入 `Text`。
    pub fn from_line(line: &str) -> ServerMessage {
        let line = line.trim_end_matches(['\r', '\n']);

        if let Some(rest) = line.strip_prefix("OPPONENT_MOVE ") {
            if let Some(mv) = Self::parse_wire_move(rest) {
                return ServerMessage::OpponentMove(mv);
            }
        }
        if let Some(rest) = line.strip_prefix("YOUR_MOVE ") {
            if let Some(mv) = Self::parse_wire_move(rest) {
                return ServerMessage::YourMove(mv);
            }
        }
        if let Some(reason) = line.strip_prefix("Error: ") {
            return ServerMessage::Error(reason.to_string());
        }

        match line {
            "WIN" => return ServerMessage::GameOver(GameOutcome::Win),
            "WIN (Opponent No Moves)" => return ServerMessage::GameOver(GameOutcome::WinOpponentNoMoves),
            "LOSE" => return ServerMessage::GameOver(GameOutcome::Lose),
            "LOSE (No Moves)" => return ServerMessage::GameOver(GameOutcome::LoseNoMoves),
            "Opponent disconnected. You Win!" => {
                return ServerMessage::GameOver(GameOutcome::OpponentDisconnected)
            }
            "Server full." => return ServerMessage::ServerFull,
            "Unknown command." => return ServerMessage::UnknownCommand,
            _ => {}
        }

        let you = if line.ends_with("(You are BLACK)") {
            Some(Color::Black)
        } else if line.ends_with("(You are WHITE)") {
            Some(Color::White)
        } else {
            None
        };
        if let Some(you) = you {
            if line.starts_with("Room created.") {
                return ServerMessage::RoomCreated { you };
            }
            if line.starts_with("Matched!") {
                return ServerMessage::Matched { you };
            }
            if line.starts_with("Opponent found!") {
                return ServerMessage::OpponentFound { you };
            }
        }

        ServerMessage::Text(line.to_string())
    }

    /// 解析八个数值字段；字段由服务端规范化，不做合法性之外的校验
    fn parse_wire_move(fields: &str) -> Option<Move> {
        let values: Vec<i32> = fields
            .split_whitespace()
            .map(|t| t.parse().ok())
            .collect::<Option<Vec<_>>>()?;
        if values.len() != 8 {
            return None;
        }
        let from = Position::from_wire(values[0], values[1])?;
        let to = Position::from_wire(values[2], values[3])?;
        if values[4] == 1 {
            let at = Position::from_wire(values[5], values[6])?;
            let tile = TileColor::from_wire_code(values[7])?;
            Some(Move::with_tile(from, to, at, tile))
        } else {
            Some(Move::new(from, to))
        }
    }
}

impl std::fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_line())
    }
}
