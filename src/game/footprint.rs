//! 駒（3x3のフットプリント）のスナップショットを扱うモジュール
//! 中心マスと周囲8マスの状態を盤面から読み取り、合法性判定の材料を提供する。

use super::board::Board;
use super::types::{Cell, Coordinate, Direction, Player};

/// 中心座標の周囲3x3の読み取り専用スナップショット
/// 盤面を変更した後は作り直す必要がある
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint {
    center: Coordinate,
    center_cell: Cell,
    ring: [Cell; 8],
}

impl Footprint {
    /// 盤面から中心と周囲8マスを読み取ってフットプリントを作る
    ///
    /// 中心は1-18の範囲になければならない。範囲外は呼び出し側のバグとして扱う。
    pub fn new(center: Coordinate, board: &Board) -> Self {
        let mut ring = [Cell::Empty; 8];
        for direction in Direction::ALL {
            ring[direction.index()] = board.cell_at(Self::ring_coordinate(direction, center));
        }

        Self {
            center,
            center_cell: board.cell_at(center),
            ring,
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn center_cell(&self) -> Cell {
        self.center_cell
    }

    /// 中心に石がない（中空の）駒かどうか
    pub fn is_hollow(&self) -> bool {
        !self.center_cell.is_stone()
    }

    /// 駒に相手の石が1つも含まれていないかチェックする
    pub fn ownership_valid(&self, opponent: Player) -> bool {
        let opponent_cell = opponent.to_cell();
        self.center_cell != opponent_cell && self.ring.iter().all(|&cell| cell != opponent_cell)
    }

    /// 指定方向の周囲マスの状態
    pub fn ring_value(&self, direction: Direction) -> Cell {
        self.ring[direction.index()]
    }

    /// 石のある周囲マスを方向とともに列挙する
    pub fn ring_stones(&self) -> impl Iterator<Item = (Direction, Cell)> + '_ {
        Direction::ALL
            .into_iter()
            .map(|direction| (direction, self.ring_value(direction)))
            .filter(|(_, cell)| cell.is_stone())
    }

    /// 指定プレイヤーのリング（中空で周囲8マスすべてが自分の石）かどうか
    pub fn is_ring_of(&self, player: Player) -> bool {
        let own = player.to_cell();
        self.is_hollow() && self.ring.iter().all(|&cell| cell == own)
    }

    /// centerから指定方向に1マス隣の座標
    pub fn ring_coordinate(direction: Direction, center: Coordinate) -> Coordinate {
        assert!(
            center.is_interior(),
            "footprint center {center:?} is outside the playable area"
        );
        let (dx, dy) = direction.offset();
        Coordinate {
            x: center.x.wrapping_add_signed(dx),
            y: center.y.wrapping_add_signed(dy),
        }
    }

    /// 中心を除いた周囲8マスの座標
    pub fn all_footprint_coordinates(&self) -> [Coordinate; 8] {
        Direction::ALL.map(|direction| Self::ring_coordinate(direction, self.center))
    }
}
