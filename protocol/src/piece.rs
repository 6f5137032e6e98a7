//! 棋子颜色、地砖与棋盘位置

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH};

/// 玩家颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// 黑方（先手，房间创建者）
    Black,
    /// 白方（后手，加入者）
    White,
}

impl Color {
    /// 获取对方颜色
    pub fn opponent(&self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// 协议中使用的大写名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Black => "BLACK",
            Color::White => "WHITE",
        }
    }

    /// 终端显示字符
    pub fn display_char(&self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 地砖颜色
///
/// 无地砖的格子只能直走；黑色地砖只能斜走；灰色地砖八方向均可。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileColor {
    Black,
    Gray,
}

impl TileColor {
    /// 所有地砖颜色
    pub const ALL: [TileColor; 2] = [TileColor::Black, TileColor::Gray];

    /// 线路编码（0 表示不放置）
    pub fn wire_code(&self) -> i32 {
        match self {
            TileColor::Black => 1,
            TileColor::Gray => 2,
        }
    }

    /// 从线路编码解析
    pub fn from_wire_code(code: i32) -> Option<TileColor> {
        match code {
            1 => Some(TileColor::Black),
            2 => Some(TileColor::Gray),
            _ => None,
        }
    }

    /// 简写记谱中的标记字符
    pub fn notation_char(&self) -> char {
        match self {
            TileColor::Black => 'b',
            TileColor::Gray => 'g',
        }
    }

    /// 从简写标记解析（不区分大小写）
    pub fn from_notation_char(c: char) -> Option<TileColor> {
        match c.to_ascii_lowercase() {
            'b' => Some(TileColor::Black),
            'g' => Some(TileColor::Gray),
            _ => None,
        }
    }

    /// 终端显示字符
    pub fn display_char(&self) -> char {
        match self {
            TileColor::Black => '#',
            TileColor::Gray => '%',
        }
    }
}

/// 棋盘位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 列 (0-4，对应 a-e)
    pub x: u8,
    /// 行 (0-4，对应 1-5)
    pub y: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(x: u8, y: u8) -> Option<Self> {
        if (x as usize) < BOARD_WIDTH && (y as usize) < BOARD_HEIGHT {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// 从有符号整数创建（线路数值格式）
    pub fn from_wire(x: i32, y: i32) -> Option<Self> {
        let x = u8::try_from(x).ok()?;
        let y = u8::try_from(y).ok()?;
        Self::new(x, y)
    }

    /// 获取偏移后的位置
    pub fn offset(&self, dx: i8, dy: i8) -> Option<Position> {
        let new_x = self.x as i8 + dx;
        let new_y = self.y as i8 + dy;
        if new_x >= 0 && (new_x as usize) < BOARD_WIDTH && new_y >= 0 && (new_y as usize) < BOARD_HEIGHT {
            Some(Position {
                x: new_x as u8,
                y: new_y as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.y as usize * BOARD_WIDTH + self.x as usize
    }

    /// 棋盘上所有位置（按行优先）
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_HEIGHT as u8).flat_map(|y| (0..BOARD_WIDTH as u8).map(move |x| Position { x, y }))
    }
}

impl std::fmt::Display for Position {
    /// 格式化为记谱坐标，如 (0,0) -> "a1"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.x) as char, self.y + 1)
    }
}
