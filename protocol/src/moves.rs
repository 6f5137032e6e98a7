//! 走法定义

use serde::{Deserialize, Serialize};

use crate::piece::{Position, TileColor};

/// 走子后附带的地砖放置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePlacement {
    /// 放置位置
    pub at: Position,
    /// 地砖颜色
    pub tile: TileColor,
}

/// 走法
///
/// 两个走法相等当且仅当起点、终点、是否放置地砖相同，
/// 且放置时目标坐标与地砖颜色也相同。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
    /// 地砖放置（可选）
    pub placement: Option<TilePlacement>,
}

impl Move {
    /// 创建不放置地砖的走法
    pub fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            placement: None,
        }
    }

    /// 创建带地砖放置的走法
    pub fn with_tile(from: Position, to: Position, at: Position, tile: TileColor) -> Self {
        Self {
            from,
            to,
            placement: Some(TilePlacement { at, tile }),
        }
    }

    /// 线路上的八个数值字段: sx sy dx dy place tx ty tile
    ///
    /// 不放置地砖时固定为 `0 -1 -1 0`。
    pub fn wire_fields(&self) -> [i32; 8] {
        let (place, tx, ty, tile) = match self.placement {
            Some(p) => (1, p.at.x as i32, p.at.y as i32, p.tile.wire_code()),
            None => (0, -1, -1, 0),
        };
        [
            self.from.x as i32,
            self.from.y as i32,
            self.to.x as i32,
            self.to.y as i32,
            place,
            tx,
            ty,
            tile,
        ]
    }

    /// 格式化为数值字段字符串
    pub fn to_wire(&self) -> String {
        self.wire_fields()
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for Move {
    /// 简写记谱: `a1,a2` 或 `a1,a2 b1g`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.from, self.to)?;
        if let Some(p) = self.placement {
            write!(f, " {}{}", p.at, p.tile.notation_char())?;
        }
        Ok(())
    }
}
