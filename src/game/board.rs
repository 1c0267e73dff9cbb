//! Gessの盤面状態を管理するモジュール
//! 20x20グリッドの盤面と石の配置、駒の移動による盤面更新を担当する。

use serde::{Deserialize, Serialize};

use super::footprint::Footprint;
use super::types::{Cell, Coordinate, Direction, Player, BOARD_SIZE};
use crate::config::StampPolicy;
use crate::error::Result;

/// 初期配置
/// 行1（y=0）から行20（y=19）の順、各文字列は列a-tに対応する
const INITIAL_LAYOUT: [&str; BOARD_SIZE] = [
    "____________________",
    "__B_B_BBBBBBBB_B_B__",
    "_BBB_B_BBBB_B_B_BBB_",
    "__B_B_BBBBBBBB_B_B__",
    "____________________",
    "____________________",
    "__B__B__B__B__B__B__",
    "____________________",
    "____________________",
    "____________________",
    "____________________",
    "____________________",
    "____________________",
    "__W__W__W__W__W__W__",
    "____________________",
    "____________________",
    "__W_W_WWWWWWWW_W_W__",
    "_WWW_W_WWWW_W_W_WWW_",
    "__W_W_WWWWWWWW_W_W__",
    "____________________",
];

/// 3x3ブロック内の中心からの差分
#[rustfmt::skip]
const BLOCK_OFFSETS: [(isize, isize); 9] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),  (0, 0),  (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// 20x20のGess盤面を表現する構造体
/// cells[x][y]の順で保持する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// 初期配置の盤面を作成する
    pub fn new() -> Self {
        let mut board = Self::empty();

        for (y, row) in INITIAL_LAYOUT.iter().enumerate() {
            for (x, symbol) in row.chars().enumerate() {
                board.cells[x][y] = match symbol {
                    'B' => Cell::Black,
                    'W' => Cell::White,
                    _ => Cell::Empty,
                };
            }
        }

        board
    }

    /// 石が1つもない盤面を作成する
    pub fn empty() -> Self {
        Board {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// "c3"形式のラベルを座標に変換する
    pub fn parse_label(label: &str) -> Result<Coordinate> {
        Coordinate::parse_label(label)
    }

    /// 指定した位置のセル状態を取得する
    /// 範囲外の座標は呼び出し側のバグなのでパニックする
    pub fn cell_at(&self, coord: Coordinate) -> Cell {
        assert!(coord.is_valid(), "cell access out of range: {coord:?}");
        self.cells[coord.x][coord.y]
    }

    /// 指定した位置にセル状態を設定する
    pub fn set_cell(&mut self, coord: Coordinate, cell: Cell) {
        assert!(coord.is_valid(), "cell access out of range: {coord:?}");
        self.cells[coord.x][coord.y] = cell;
    }

    pub fn is_empty(&self, coord: Coordinate) -> bool {
        !self.cell_at(coord).is_stone()
    }

    /// 指定した中心のフットプリントを生成する
    pub fn footprint(&self, center: Coordinate) -> Footprint {
        Footprint::new(center, self)
    }

    /// 検証済みの着手を盤面に適用する（上書きは石のあるマスのみ）
    pub fn apply_move(&mut self, footprint: &Footprint, destination: Coordinate) {
        self.apply_move_with_policy(footprint, destination, StampPolicy::OccupiedOnly);
    }

    /// 検証済みの着手を盤面に適用する
    ///
    /// 移動元の3x3を空にしてから、移動先に中心の石を書き込み、
    /// 周囲8マスのうち石のあるものだけを移動先に写す。
    /// `FullFootprint`では写す前に移動先の3x3も空にする。
    /// 最後に盤端へはみ出した石を取り除く。
    pub fn apply_move_with_policy(
        &mut self,
        footprint: &Footprint,
        destination: Coordinate,
        policy: StampPolicy,
    ) {
        let center_cell = self.cell_at(footprint.center());

        self.clear_block(footprint.center());
        if policy == StampPolicy::FullFootprint {
            self.clear_block(destination);
        }

        self.set_cell(destination, center_cell);
        for (direction, cell) in footprint.ring_stones() {
            self.set_cell(Footprint::ring_coordinate(direction, destination), cell);
        }

        self.clear_border();
    }

    /// 指定中心の3x3ブロックをすべて空にする
    fn clear_block(&mut self, center: Coordinate) {
        self.set_cell(center, Cell::Empty);
        for direction in Direction::ALL {
            self.set_cell(Footprint::ring_coordinate(direction, center), Cell::Empty);
        }
    }

    /// 盤端のマスに残った石を取り除き、取り除いた数を返す
    pub fn clear_border(&mut self) -> usize {
        let mut removed = 0;
        for x in 0..BOARD_SIZE {
            for y in 0..BOARD_SIZE {
                let coord = Coordinate { x, y };
                if coord.is_border() && self.cells[x][y].is_stone() {
                    self.cells[x][y] = Cell::Empty;
                    removed += 1;
                }
            }
        }
        removed
    }

    /// 指定中心の3x3ブロックの座標（中心を含む9マス）
    pub fn block_coordinates(center: Coordinate) -> impl Iterator<Item = Coordinate> {
        BLOCK_OFFSETS
            .into_iter()
            .filter_map(move |(dx, dy)| center.offset(dx, dy))
    }

    /// 指定プレイヤーの石の数
    pub fn count_stones(&self, player: Player) -> usize {
        let target = player.to_cell();
        self.cells
            .iter()
            .flat_map(|column| column.iter())
            .filter(|&&cell| cell == target)
            .count()
    }

    /// 盤面を1文字シンボルのグリッドに変換する
    /// grid[y][x]の順で、行1が先頭
    pub fn render(&self) -> Vec<Vec<char>> {
        (0..BOARD_SIZE)
            .map(|y| (0..BOARD_SIZE).map(|x| self.cells[x][y].symbol()).collect())
            .collect()
    }

    /// 表示用の盤面文字列を生成する
    /// 行20を上にして列ラベルと行番号を付ける
    pub fn display(&self) -> String {
        let mut result = String::from("    ");
        for x in 0..BOARD_SIZE {
            result.push((b'a' + x as u8) as char);
            result.push(' ');
        }
        result.push('\n');

        for y in (0..BOARD_SIZE).rev() {
            result.push_str(&format!("{:>2}  ", y + 1));
            for x in 0..BOARD_SIZE {
                result.push(self.cells[x][y].symbol());
                result.push(' ');
            }
            result.push('\n');
        }

        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(label: &str) -> Coordinate {
        Coordinate::parse_label(label).unwrap()
    }

    #[test]
    fn test_board_new_initial_state() {
        let board = Board::new();

        assert_eq!(board.cell_at(coord("c3")), Cell::Black);
        assert_eq!(board.cell_at(coord("l3")), Cell::Empty);
        assert_eq!(board.cell_at(coord("l2")), Cell::Black);
        assert_eq!(board.cell_at(coord("c7")), Cell::Black);
        assert_eq!(board.cell_at(coord("c14")), Cell::White);
        assert_eq!(board.cell_at(coord("r17")), Cell::White);
        assert_eq!(board.cell_at(coord("l18")), Cell::Empty);
        assert_eq!(board.cell_at(coord("a1")), Cell::Empty);
        assert_eq!(board.cell_at(coord("t20")), Cell::Empty);
    }

    #[test]
    fn test_board_initial_layout_is_mirrored() {
        let board = Board::new();
        for x in 0..BOARD_SIZE {
            for y in 0..BOARD_SIZE {
                let cell = board.cell_at(Coordinate { x, y });
                let mirrored = board.cell_at(Coordinate { x, y: BOARD_SIZE - 1 - y });
                let expected = match cell {
                    Cell::Black => Cell::White,
                    Cell::White => Cell::Black,
                    Cell::Empty => Cell::Empty,
                };
                assert_eq!(mirrored, expected);
            }
        }
    }

    #[test]
    fn test_board_initial_border_empty() {
        let board = Board::new();
        for x in 0..BOARD_SIZE {
            for y in 0..BOARD_SIZE {
                let c = Coordinate { x, y };
                if c.is_border() {
                    assert!(board.is_empty(c), "{c} should be empty");
                }
            }
        }
    }

    #[test]
    fn test_board_count_stones_initial() {
        let board = Board::new();
        assert_eq!(board.count_stones(Player::Black), 43);
        assert_eq!(board.count_stones(Player::White), 43);
    }

    #[test]
    fn test_board_set_cell() {
        let mut board = Board::empty();
        board.set_cell(coord("j10"), Cell::White);
        assert_eq!(board.cell_at(coord("j10")), Cell::White);
        assert!(!board.is_empty(coord("j10")));
    }

    #[test]
    #[should_panic]
    fn test_board_cell_at_out_of_range_panics() {
        let board = Board::new();
        board.cell_at(Coordinate { x: 20, y: 0 });
    }

    #[test]
    fn test_board_parse_label() {
        assert_eq!(Board::parse_label("c3").unwrap(), Coordinate { x: 2, y: 2 });
        assert!(Board::parse_label("z9").is_err());
    }

    #[test]
    fn test_apply_move_stamps_pattern() {
        let mut board = Board::new();
        let footprint = board.footprint(coord("c3"));
        board.apply_move(&footprint, coord("c6"));

        for label in ["b2", "c2", "d2", "b3", "c3", "d3", "b4", "c4", "d4"] {
            assert_eq!(board.cell_at(coord(label)), Cell::Empty, "{label}");
        }
        for label in ["c6", "c7", "c5", "b6", "d6"] {
            assert_eq!(board.cell_at(coord(label)), Cell::Black, "{label}");
        }
        for label in ["b5", "d5", "b7", "d7"] {
            assert_eq!(board.cell_at(coord(label)), Cell::Empty, "{label}");
        }
    }

    #[test]
    fn test_apply_move_occupied_only_keeps_unrelated_stones() {
        let mut board = Board::empty();
        board.set_cell(coord("e5"), Cell::Black);
        board.set_cell(coord("e6"), Cell::Black);
        board.set_cell(coord("h8"), Cell::White);
        board.set_cell(coord("i9"), Cell::White);

        let footprint = board.footprint(coord("e5"));
        board.apply_move(&footprint, coord("h8"));

        assert_eq!(board.cell_at(coord("h8")), Cell::Black);
        assert_eq!(board.cell_at(coord("h9")), Cell::Black);
        // 空の周囲マスは移動先の石を消さない
        assert_eq!(board.cell_at(coord("i9")), Cell::White);
        assert!(board.is_empty(coord("e5")));
        assert!(board.is_empty(coord("e6")));
    }

    #[test]
    fn test_apply_move_full_footprint_clears_destination() {
        let mut board = Board::empty();
        board.set_cell(coord("e5"), Cell::Black);
        board.set_cell(coord("e6"), Cell::Black);
        board.set_cell(coord("i9"), Cell::White);

        let footprint = board.footprint(coord("e5"));
        board.apply_move_with_policy(&footprint, coord("h8"), StampPolicy::FullFootprint);

        assert_eq!(board.cell_at(coord("h8")), Cell::Black);
        assert_eq!(board.cell_at(coord("h9")), Cell::Black);
        assert!(board.is_empty(coord("i9")));
    }

    #[test]
    fn test_apply_move_removes_stones_on_border() {
        let mut board = Board::empty();
        board.set_cell(coord("e5"), Cell::Black);
        board.set_cell(coord("f5"), Cell::Black);
        board.set_cell(coord("e4"), Cell::Black);

        let footprint = board.footprint(coord("e5"));
        board.apply_move(&footprint, coord("e2"));

        assert_eq!(board.cell_at(coord("e2")), Cell::Black);
        assert_eq!(board.cell_at(coord("f2")), Cell::Black);
        assert!(board.is_empty(coord("e1")));
        assert_eq!(board.count_stones(Player::Black), 2);
    }

    #[test]
    fn test_block_coordinates() {
        let block: Vec<_> = Board::block_coordinates(coord("b2")).collect();
        assert_eq!(block.len(), 9);
        assert!(block.contains(&coord("a1")));
        assert!(block.contains(&coord("c3")));
    }

    #[test]
    fn test_board_render() {
        let board = Board::new();
        let grid = board.render();

        assert_eq!(grid.len(), BOARD_SIZE);
        assert!(grid.iter().all(|row| row.len() == BOARD_SIZE));
        assert_eq!(grid[2][2], 'B');
        assert_eq!(grid[17][17], 'W');
        assert_eq!(grid[0][0], '_');
    }

    #[test]
    fn test_board_display() {
        let board = Board::new();
        let display = board.display();

        assert!(display.starts_with("    a b c"));
        assert!(display.contains("20  _ _"));
        assert!(display.contains(" 3  _ B B B"));
        assert_eq!(display.lines().count(), BOARD_SIZE + 1);
    }
}
