//! 棋盘状态

use serde::{Deserialize, Serialize};

use protocol::{Color, Position, TileColor, BOARD_HEIGHT, BOARD_WIDTH};

/// 每方初始黑色地砖数
pub const INITIAL_BLACK_TILES: u8 = 3;

/// 每方初始灰色地砖数
pub const INITIAL_GRAY_TILES: u8 = 1;

/// 格子
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// 棋子（如果有）
    pub occupant: Option<Color>,
    /// 地砖（如果有）
    pub tile: Option<TileColor>,
}

impl Cell {
    /// 可放置地砖：无棋子且无地砖
    pub fn accepts_tile(&self) -> bool {
        self.occupant.is_none() && self.tile.is_none()
    }
}

/// 地砖库存
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileInventory {
    pub black: u8,
    pub gray: u8,
}

impl TileInventory {
    /// 初始库存
    pub fn initial() -> Self {
        Self {
            black: INITIAL_BLACK_TILES,
            gray: INITIAL_GRAY_TILES,
        }
    }

    /// 指定颜色的剩余数量
    pub fn count(&self, tile: TileColor) -> u8 {
        match tile {
            TileColor::Black => self.black,
            TileColor::Gray => self.gray,
        }
    }

    /// 取出一块地砖；库存不足返回 false
    pub fn take(&mut self, tile: TileColor) -> bool {
        let slot = match tile {
            TileColor::Black => &mut self.black,
            TileColor::Gray => &mut self.gray,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

/// 对局状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// 5x5 棋盘，索引为 y * 5 + x
    cells: Vec<Cell>,
    black_inventory: TileInventory,
    white_inventory: TileInventory,
    /// 当前走子方
    pub current_turn: Color,
}

impl GameState {
    /// 创建空棋盘（黑方先走，库存为初始值）
    pub fn empty() -> Self {
        Self {
            cells: vec![Cell::default(); BOARD_WIDTH * BOARD_HEIGHT],
            black_inventory: TileInventory::initial(),
            white_inventory: TileInventory::initial(),
            current_turn: Color::Black,
        }
    }

    /// 创建初始局面：黑方占第 1 行，白方占第 5 行
    pub fn initial() -> Self {
        let mut state = Self::empty();
        for x in 0..BOARD_WIDTH as u8 {
            state.set_piece(Position::new_unchecked(x, 0), Some(Color::Black));
            state.set_piece(Position::new_unchecked(x, Self::home_row(Color::White)), Some(Color::White));
        }
        state
    }

    /// 指定颜色的起始行
    pub fn home_row(color: Color) -> u8 {
        match color {
            Color::Black => 0,
            Color::White => (BOARD_HEIGHT - 1) as u8,
        }
    }

    /// 指定颜色的目标行（对方起始行）
    pub fn goal_row(color: Color) -> u8 {
        Self::home_row(color.opponent())
    }

    /// 获取格子
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// 获取指定位置的棋子
    pub fn piece_at(&self, pos: Position) -> Option<Color> {
        self.cell(pos).occupant
    }

    /// 获取指定位置的地砖
    pub fn tile_at(&self, pos: Position) -> Option<TileColor> {
        self.cell(pos).tile
    }

    /// 设置指定位置的棋子
    pub fn set_piece(&mut self, pos: Position, piece: Option<Color>) {
        self.cells[pos.to_index()].occupant = piece;
    }

    /// 设置指定位置的地砖
    pub fn set_tile(&mut self, pos: Position, tile: Option<TileColor>) {
        self.cells[pos.to_index()].tile = tile;
    }

    /// 获取库存
    pub fn inventory(&self, color: Color) -> &TileInventory {
        match color {
            Color::Black => &self.black_inventory,
            Color::White => &self.white_inventory,
        }
    }

    /// 获取库存（可变）
    pub fn inventory_mut(&mut self, color: Color) -> &mut TileInventory {
        match color {
            Color::Black => &mut self.black_inventory,
            Color::White => &mut self.white_inventory,
        }
    }

    /// 移动棋子（不检查规则）
    pub fn move_piece(&mut self, from: Position, to: Position) {
        let piece = self.piece_at(from);
        self.set_piece(from, None);
        self.set_piece(to, piece);
    }

    /// 获取指定颜色的所有棋子位置
    pub fn pieces(&self, color: Color) -> Vec<Position> {
        Position::all().filter(|&pos| self.piece_at(pos) == Some(color)).collect()
    }

    /// 切换走子方
    pub fn switch_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position() {
        let state = GameState::initial();
        assert_eq!(state.pieces(Color::Black).len(), 5);
        assert_eq!(state.pieces(Color::White).len(), 5);
        assert_eq!(state.piece_at(Position::new_unchecked(2, 0)), Some(Color::Black));
        assert_eq!(state.piece_at(Position::new_unchecked(2, 4)), Some(Color::White));
        assert_eq!(state.piece_at(Position::new_unchecked(2, 2)), None);
        assert_eq!(state.current_turn, Color::Black);
        assert_eq!(*state.inventory(Color::White), TileInventory::initial());
    }

    #[test]
    fn test_goal_rows() {
        assert_eq!(GameState::goal_row(Color::Black), 4);
        assert_eq!(GameState::goal_row(Color::White), 0);
    }

    #[test]
    fn test_inventory_take() {
        let mut inv = TileInventory::initial();
        assert!(inv.take(TileColor::Gray));
        assert!(!inv.take(TileColor::Gray));
        assert_eq!(inv.count(TileColor::Gray), 0);
        assert_eq!(inv.count(TileColor::Black), 3);
    }

    #[test]
    fn test_move_piece() {
        let mut state = GameState::initial();
        let from = Position::new_unchecked(0, 0);
        let to = Position::new_unchecked(0, 1);
        state.move_piece(from, to);
        assert_eq!(state.piece_at(from), None);
        assert_eq!(state.piece_at(to), Some(Color::Black));
    }
}
