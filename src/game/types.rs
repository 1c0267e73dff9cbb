//! ゲームの基本型定義モジュール
//! Gessで使用される基本的な型とenum、構造体を定義する。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GessError;

/// 盤面の一辺のマス数
pub const BOARD_SIZE: usize = 20;

/// 盤面の各マスの状態を表現するenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    /// 石が置かれているかチェックする
    pub fn is_stone(self) -> bool {
        !matches!(self, Cell::Empty)
    }

    /// 表示用の1文字シンボル
    /// 空は'_'、黒は'B'、白は'W'
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::Black => 'B',
            Cell::White => 'W',
        }
    }
}

/// ゲームのプレイヤーを表すenum
/// 先手は黒、後手は白
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// 相手プレイヤーを返す
    pub fn opposite(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// プレイヤーを対応するセル状態に変換する
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

/// 20x20盤面上の座標を表す構造体
/// xは列（a-t）、yは行（1-20）に対応し、ともに0-19の範囲で有効
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    /// 範囲チェック付きのコンストラクタ
    /// 盤面の範囲外の座標の場合はNoneを返す
    pub fn new(x: usize, y: usize) -> Option<Coordinate> {
        if x < BOARD_SIZE && y < BOARD_SIZE {
            Some(Coordinate { x, y })
        } else {
            None
        }
    }

    /// 座標が有効範囲内かチェックする
    pub fn is_valid(&self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// 駒の中心として置ける内側の領域（1-18）にあるかチェックする
    pub fn is_interior(&self) -> bool {
        (1..BOARD_SIZE - 1).contains(&self.x) && (1..BOARD_SIZE - 1).contains(&self.y)
    }

    /// 盤端の1マス幅の領域にあるかチェックする
    pub fn is_border(&self) -> bool {
        self.is_valid() && !self.is_interior()
    }

    /// 指定した差分だけずらした座標を返す
    /// 盤外に出る場合はNone
    pub fn offset(self, dx: isize, dy: isize) -> Option<Coordinate> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Coordinate::new(x, y)
    }

    /// 指定方向へdistanceマス進んだ座標を返す
    pub fn step(self, direction: Direction, distance: usize) -> Option<Coordinate> {
        let (dx, dy) = direction.offset();
        let distance = isize::try_from(distance).ok()?;
        self.offset(dx * distance, dy * distance)
    }

    /// "c3"のようなラベルを座標に変換する
    /// 列はa-t、行は1-20のみ受け付ける
    pub fn parse_label(label: &str) -> Result<Coordinate, GessError> {
        let invalid = || GessError::InvalidLabel {
            label: label.to_string(),
        };

        let mut chars = label.chars();
        let column = chars.next().ok_or_else(invalid)?;
        let row = chars.as_str();

        if !('a'..='t').contains(&column) {
            return Err(invalid());
        }
        if row.is_empty() || row.len() > 2 || row.starts_with('0') {
            return Err(invalid());
        }
        if !row.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let row: usize = row.parse().map_err(|_| invalid())?;
        let x = column as usize - 'a' as usize;
        Coordinate::new(x, row.wrapping_sub(1)).ok_or_else(invalid)
    }

    /// 座標をラベル文字列に変換する
    pub fn to_label(&self) -> String {
        debug_assert!(self.is_valid(), "盤外の座標はラベルにできない: {:?}", self);
        let column = (b'a' + self.x as u8) as char;
        format!("{}{}", column, self.y + 1)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_label())
    }
}

impl FromStr for Coordinate {
    type Err = GessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coordinate::parse_label(s)
    }
}

/// 駒の中心から見た8方向
/// 斜め方向の差分は下記offset()の表に従う
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// 方向ごとの単位差分 (dx, dy)
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (1, -1),
            Direction::SouthEast => (-1, 1),
            Direction::SouthWest => (-1, -1),
        }
    }

    /// 単位差分から方向を逆引きする
    pub fn from_offset(dx: isize, dy: isize) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.offset() == (dx, dy))
    }

    /// 配列添字として使う番号
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::NorthEast => "north-east",
            Direction::NorthWest => "north-west",
            Direction::SouthEast => "south-east",
            Direction::SouthWest => "south-west",
        };
        f.write_str(name)
    }
}

/// ゲームの進行状態
/// 盤面上のリングの有無と投了から導出される
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Unfinished,
    BlackWon,
    WhiteWon,
}

impl GameStatus {
    /// 指定プレイヤーの勝利状態を返す
    pub fn won_by(player: Player) -> GameStatus {
        match player {
            Player::Black => GameStatus::BlackWon,
            Player::White => GameStatus::WhiteWon,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Unfinished => None,
            GameStatus::BlackWon => Some(Player::Black),
            GameStatus::WhiteWon => Some(Player::White),
        }
    }

    pub fn is_decided(self) -> bool {
        !matches!(self, GameStatus::Unfinished)
    }
}

/// ゲームの1手を表現する構造体
/// 移動元と移動先、取った相手の石の数、タイムスタンプを保持する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    pub from: Coordinate,
    pub to: Coordinate,
    pub captured: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl MoveRecord {
    /// 新しい手を作成する
    /// タイムスタンプは現在時刻で自動設定される
    pub fn new(player: Player, from: Coordinate, to: Coordinate, captured: usize) -> Self {
        Self {
            player,
            from,
            to,
            captured,
            timestamp: chrono::Utc::now(),
        }
    }
}
