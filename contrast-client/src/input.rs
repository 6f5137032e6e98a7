//! 键盘输入处理
//!
//! 轮到自己走子时，输入被当作走法记谱解析并转换为数值形式的 MOVE 命令；
//! 其余时候原样发送给服务端。

use protocol::{ClientCommand, Notation};

/// 一行键盘输入对应的动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// 发送给服务端的一行
    Send(String),
    /// 本地拒绝（记谱无法解析），附带提示文本
    Reject(String),
    /// 发送 EXIT 并退出
    Quit,
    /// 空行
    Ignore,
}

/// 转换一行键盘输入
pub fn translate(line: &str, my_turn: bool) -> InputAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return InputAction::Ignore;
    }
    if trimmed.split_whitespace().next() == Some("EXIT") {
        return InputAction::Quit;
    }
    if !my_turn {
        return InputAction::Send(trimmed.to_string());
    }

    let args = trimmed.strip_prefix("MOVE").map_or(trimmed, str::trim_start);
    match Notation::parse_move(args) {
        Ok(mv) => InputAction::Send(ClientCommand::Move(mv.to_wire()).to_line()),
        Err(e) => InputAction::Reject(format!("Error: {}", e)),
    }
}
