//! 终端棋盘渲染
//!
//! 格子显示为两个字符：棋子 (`B`/`W`) + 地砖 (`#` 黑 / `%` 灰)。

use std::fmt::Write;

use contrast_rules::GameState;
use protocol::{Color, Move, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// 每行显示的走法数
const MOVES_PER_LINE: usize = 5;

const COLUMN_HEADER: &str = "    a  b  c  d  e";
const ROW_SEPARATOR: &str = "  +--+--+--+--+--+";

/// 渲染棋盘、库存与走子方
pub fn render_board(state: &GameState, you: Option<Color>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", COLUMN_HEADER);
    let _ = writeln!(out, "{}", ROW_SEPARATOR);

    for y in 0..BOARD_HEIGHT as u8 {
        let _ = write!(out, "{} |", y + 1);
        for x in 0..BOARD_WIDTH as u8 {
            let pos = Position::new_unchecked(x, y);
            let piece = state.piece_at(pos).map_or(' ', |c| c.display_char());
            let tile = state.tile_at(pos).map_or(' ', |t| t.display_char());
            let _ = write!(out, "{}{}|", piece, tile);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", ROW_SEPARATOR);
    }

    for color in [Color::Black, Color::White] {
        let inv = state.inventory(color);
        let name = match color {
            Color::Black => "Black(B)",
            Color::White => "White(W)",
        };
        let _ = writeln!(out, "{} Inv: [#]{} [%]{}", name, inv.black, inv.gray);
    }

    let _ = write!(out, "Turn: {}", state.current_turn);
    if let Some(you) = you {
        let _ = write!(out, " (You are {})", you);
    }
    out
}

/// 列出不带地砖放置的基础走法
pub fn render_base_moves(moves: &[Move]) -> String {
    let base: Vec<String> = moves
        .iter()
        .filter(|m| m.placement.is_none())
        .map(|m| m.to_string())
        .collect();
    if base.is_empty() {
        return "  (No legal moves - Pass or Loss)".to_string();
    }

    let mut out = String::from("--- Valid Moves (Base Movement) ---\n");
    for chunk in base.chunks(MOVES_PER_LINE) {
        let _ = writeln!(out, "{}", chunk.join("\t"));
    }
    out.push_str("(Optionally add tile: e.g. '... a1b')");
    out
}
