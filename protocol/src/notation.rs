//! 走法记谱解析
//!
//! 支持两种形式:
//! - 数值形式: `sx sy dx dy place tx ty tile`，坐标 0-4，tile 0=无 1=黑 2=灰
//! - 简写形式: `a1,a2` 或 `a1,a2 b1g`，列 a-e，行 1-5，末尾 b/g 为地砖颜色

use crate::error::{ProtocolError, Result};
use crate::moves::Move;
use crate::piece::{Position, TileColor};

/// 数值形式的字段数
const NUMERIC_FIELDS: usize = 8;

/// 记谱解析器
pub struct Notation;

impl Notation {
    /// 解析两字符坐标，如 "a1" -> (0, 0)（列字母不区分大小写）
    pub fn parse_coord(s: &str) -> Option<Position> {
        let mut chars = s.chars();
        let col = chars.next()?.to_ascii_lowercase();
        let row = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='e').contains(&col) || !('1'..='5').contains(&row) {
            return None;
        }
        Some(Position::new_unchecked(col as u8 - b'a', row as u8 - b'1'))
    }

    /// 解析 MOVE 命令参数，自动识别数值形式或简写形式
    pub fn parse_move(args: &str) -> Result<Move> {
        let first = args.split(|c: char| c.is_whitespace() || c == ',').find(|t| !t.is_empty());
        match first {
            None => Err(ProtocolError::InvalidFormat),
            Some(tok) if tok.parse::<i32>().is_ok() => Self::parse_numeric(args),
            Some(_) => Self::parse_shorthand(args),
        }
    }

    /// 解析数值形式
    pub fn parse_numeric(args: &str) -> Result<Move> {
        let values = args
            .split_whitespace()
            .map(|t| t.parse::<i32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| ProtocolError::InvalidFormat)?;
        if values.len() != NUMERIC_FIELDS {
            return Err(ProtocolError::InvalidFormat);
        }

        let from = Position::from_wire(values[0], values[1]).ok_or(ProtocolError::InvalidCoordinates)?;
        let to = Position::from_wire(values[2], values[3]).ok_or(ProtocolError::InvalidCoordinates)?;

        match values[4] {
            // 不放置时忽略地砖字段
            0 => Ok(Move::new(from, to)),
            1 => {
                let at = Position::from_wire(values[5], values[6])
                    .ok_or(ProtocolError::InvalidTileCoordinates)?;
                let tile = TileColor::from_wire_code(values[7]).ok_or(ProtocolError::InvalidTileColor)?;
                Ok(Move::with_tile(from, to, at, tile))
            }
            _ => Err(ProtocolError::InvalidFormat),
        }
    }

    /// 解析简写形式
    pub fn parse_shorthand(args: &str) -> Result<Move> {
        let normalized = args.replace(',', " ");
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        if tokens.len() < 2 || tokens.len() > 3 {
            return Err(ProtocolError::InvalidFormat);
        }

        let from = Self::parse_coord(tokens[0]).ok_or(ProtocolError::InvalidCoordinates)?;
        let to = Self::parse_coord(tokens[1]).ok_or(ProtocolError::InvalidCoordinates)?;

        let Some(tile_part) = tokens.get(2) else {
            return Ok(Move::new(from, to));
        };

        // 地砖部分: 两字符坐标 + 一字符颜色
        let chars: Vec<char> = tile_part.chars().collect();
        if chars.len() != 3 {
            return Err(ProtocolError::InvalidFormat);
        }
        let coord: String = chars[..2].iter().collect();
        let at = Self::parse_coord(&coord).ok_or(ProtocolError::InvalidTileCoordinates)?;
        let tile = TileColor::from_notation_char(chars[2]).ok_or(ProtocolError::InvalidTileColor)?;

        Ok(Move::with_tile(from, to, at, tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: u8, y: u8) -> Position {
        Position::new_unchecked(x, y)
    }

    #[test]
    fn test_parse_coord() {
        assert_eq!(Notation::parse_coord("a1"), Some(pos(0, 0)));
        assert_eq!(Notation::parse_coord("E5"), Some(pos(4, 4)));
        assert_eq!(Notation::parse_coord("f1"), None);
        assert_eq!(Notation::parse_coord("a6"), None);
        assert_eq!(Notation::parse_coord("a"), None);
        assert_eq!(Notation::parse_coord("a12"), None);
    }

    #[test]
    fn test_shorthand_plain() {
        let mv = Notation::parse_move("a1,a2").unwrap();
        assert_eq!(mv, Move::new(pos(0, 0), pos(0, 1)));

        // 逗号两侧允许空白
        let mv = Notation::parse_move("c1 , c2").unwrap();
        assert_eq!(mv, Move::new(pos(2, 0), pos(2, 1)));
    }

    #[test]
    fn test_shorthand_with_tile() {
        let mv = Notation::parse_move("a1,a2 b1g").unwrap();
        assert_eq!(mv, Move::with_tile(pos(0, 0), pos(0, 1), pos(1, 0), TileColor::Gray));
    }

    #[test]
    fn test_shorthand_errors() {
        assert!(matches!(Notation::parse_move("a1"), Err(ProtocolError::InvalidFormat)));
        assert!(matches!(Notation::parse_move(""), Err(ProtocolError::InvalidFormat)));
        assert!(matches!(Notation::parse_move("z1,a2"), Err(ProtocolError::InvalidCoordinates)));
        assert!(matches!(Notation::parse_move("a1,a2 z9b"), Err(ProtocolError::InvalidTileCoordinates)));
        assert!(matches!(Notation::parse_move("a1,a2 b1x"), Err(ProtocolError::InvalidTileColor)));
        assert!(matches!(Notation::parse_move("a1,a2 b1"), Err(ProtocolError::InvalidFormat)));
        assert!(matches!(Notation::parse_move("a1,a2 b1g c3"), Err(ProtocolError::InvalidFormat)));
    }

    #[test]
    fn test_numeric_plain() {
        let mv = Notation::parse_move("0 0 0 1 0 -1 -1 0").unwrap();
        assert_eq!(mv, Move::new(pos(0, 0), pos(0, 1)));

        // place=0 时忽略地砖字段
        let mv = Notation::parse_move("0 0 0 1 0 3 3 2").unwrap();
        assert_eq!(mv.placement, None);
    }

    #[test]
    fn test_numeric_with_tile() {
        let mv = Notation::parse_move("4 0 4 1 1 2 2 1").unwrap();
        assert_eq!(mv, Move::with_tile(pos(4, 0), pos(4, 1), pos(2, 2), TileColor::Black));
    }

    #[test]
    fn test_numeric_errors() {
        assert!(matches!(Notation::parse_move("0 0 0 1"), Err(ProtocolError::InvalidFormat)));
        assert!(matches!(Notation::parse_move("0 0 0 1 0 -1 -1 x"), Err(ProtocolError::InvalidFormat)));
        assert!(matches!(Notation::parse_move("0 0 0 5 0 -1 -1 0"), Err(ProtocolError::InvalidCoordinates)));
        assert!(matches!(Notation::parse_move("0 0 0 1 2 -1 -1 0"), Err(ProtocolError::InvalidFormat)));
        assert!(matches!(Notation::parse_move("0 0 0 1 1 -1 -1 1"), Err(ProtocolError::InvalidTileCoordinates)));
        assert!(matches!(Notation::parse_move("0 0 0 1 1 2 2 0"), Err(ProtocolError::InvalidTileColor)));
    }

    #[test]
    fn test_display_round_trip_shorthand() {
        let mv = Move::with_tile(pos(3, 1), pos(3, 2), pos(0, 4), TileColor::Black);
        assert_eq!(Notation::parse_move(&mv.to_string()).unwrap(), mv);
    }
}
