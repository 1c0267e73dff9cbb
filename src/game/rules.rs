//! Gessのルール実装モジュール
//! 着手の合法性判定（範囲、所有、方向、距離、障害物、リング破壊）と
//! リングの検出を担当する。

use super::board::Board;
use super::footprint::Footprint;
use super::types::{Coordinate, Direction, Player, BOARD_SIZE};
use crate::config::StampPolicy;
use crate::error::IllegalMoveReason;

/// 中心に石がない駒が一度に動ける最大距離
pub const HOLLOW_MAX_DISTANCE: usize = 3;

/// Gessのルールを実装する構造体
/// スタティックメソッドのみを提供する
pub struct GessRules;

impl GessRules {
    /// 中心から移動先への方向と距離を求める
    /// 縦横斜めの直線上にない場合や同じマスの場合はNone
    pub fn direction_between(
        center: Coordinate,
        destination: Coordinate,
    ) -> Option<(Direction, usize)> {
        let dx = destination.x as isize - center.x as isize;
        let dy = destination.y as isize - center.y as isize;

        if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
            return None;
        }

        let direction = Direction::from_offset(dx.signum(), dy.signum())?;
        let distance = dx.unsigned_abs().max(dy.unsigned_abs());
        Some((direction, distance))
    }

    /// 着手が合法かどうか
    pub fn is_move_legal(
        board: &Board,
        player: Player,
        center: Coordinate,
        destination: Coordinate,
        footprint: &Footprint,
    ) -> bool {
        Self::validate(
            board,
            player,
            center,
            destination,
            footprint,
            StampPolicy::OccupiedOnly,
        )
        .is_ok()
    }

    /// 範囲チェックの後でフットプリントを作り、残りのチェックを行う
    /// 合法なら移動元のフットプリントを返す
    pub fn check_move(
        board: &Board,
        player: Player,
        center: Coordinate,
        destination: Coordinate,
        policy: StampPolicy,
    ) -> Result<Footprint, IllegalMoveReason> {
        if !center.is_interior() || !destination.is_interior() {
            return Err(IllegalMoveReason::OutOfBounds);
        }

        let footprint = board.footprint(center);
        Self::validate(board, player, center, destination, &footprint, policy)?;
        Ok(footprint)
    }

    /// 合法性チェック本体。最初に失敗したチェックの理由を返す
    pub fn validate(
        board: &Board,
        player: Player,
        center: Coordinate,
        destination: Coordinate,
        footprint: &Footprint,
        policy: StampPolicy,
    ) -> Result<(), IllegalMoveReason> {
        if !center.is_interior() || !destination.is_interior() {
            return Err(IllegalMoveReason::OutOfBounds);
        }

        if !footprint.ownership_valid(player.opposite()) {
            return Err(IllegalMoveReason::ForeignStone);
        }

        let (direction, distance) =
            Self::direction_between(center, destination).ok_or(IllegalMoveReason::NoDirection)?;

        if !footprint.ring_value(direction).is_stone() {
            return Err(IllegalMoveReason::NoStoneInDirection(direction));
        }

        if footprint.is_hollow() && distance > HOLLOW_MAX_DISTANCE {
            return Err(IllegalMoveReason::TooFar {
                distance,
                max: HOLLOW_MAX_DISTANCE,
            });
        }

        if let Some(at) = Self::find_obstruction(board, center, direction, distance) {
            return Err(IllegalMoveReason::Obstructed { at });
        }

        let mut after = board.clone();
        after.apply_move_with_policy(footprint, destination, policy);
        if !Self::has_ring(&after, player) {
            return Err(IllegalMoveReason::BreaksOwnRing);
        }

        Ok(())
    }

    /// 移動経路上の途中の位置で駒に重なる石を探す
    ///
    /// 1ステップ進むごとに新しく重なるのは進行方向側の辺（斜めなら2辺）だけなので、
    /// その辺だけを最終位置の手前まで調べる。最終位置に重なる石は取られる側。
    pub fn find_obstruction(
        board: &Board,
        center: Coordinate,
        direction: Direction,
        distance: usize,
    ) -> Option<Coordinate> {
        debug_assert!(
            center.step(direction, distance).is_some_and(|d| d.is_interior()),
            "移動先が内側の領域にない: {center:?} {direction:?} {distance}"
        );
        let (dx, dy) = direction.offset();

        for step in 1..distance {
            let position = center.step(direction, step)?;
            let obstruction = Board::block_coordinates(position)
                .filter(|cell| {
                    let ox = cell.x as isize - position.x as isize;
                    let oy = cell.y as isize - position.y as isize;
                    (dx != 0 && ox == dx) || (dy != 0 && oy == dy)
                })
                .find(|&cell| !board.is_empty(cell));

            if obstruction.is_some() {
                return obstruction;
            }
        }

        None
    }

    /// 指定プレイヤーのリングの中心をすべて返す
    pub fn ring_centers(board: &Board, player: Player) -> Vec<Coordinate> {
        let mut centers = Vec::new();
        for x in 1..BOARD_SIZE - 1 {
            for y in 1..BOARD_SIZE - 1 {
                let center = Coordinate { x, y };
                if board.footprint(center).is_ring_of(player) {
                    centers.push(center);
                }
            }
        }
        centers
    }

    /// 指定プレイヤーのリングが盤面上に1つ以上あるか
    pub fn has_ring(board: &Board, player: Player) -> bool {
        (1..BOARD_SIZE - 1).any(|x| {
            (1..BOARD_SIZE - 1).any(|y| board.footprint(Coordinate { x, y }).is_ring_of(player))
        })
    }

    /// 指定プレイヤーの合法手を全て取得する
    /// 戻り値は(移動元の中心, 移動先の中心)の組
    pub fn legal_moves(
        board: &Board,
        player: Player,
        policy: StampPolicy,
    ) -> Vec<(Coordinate, Coordinate)> {
        let mut moves = Vec::new();

        for x in 1..BOARD_SIZE - 1 {
            for y in 1..BOARD_SIZE - 1 {
                let center = Coordinate { x, y };
                let footprint = board.footprint(center);
                if !footprint.ownership_valid(player.opposite()) {
                    continue;
                }

                for (direction, _) in footprint.ring_stones() {
                    let mut distance = 1;
                    while let Some(destination) = center.step(direction, distance) {
                        match Self::validate(board, player, center, destination, &footprint, policy) {
                            Ok(()) => moves.push((center, destination)),
                            Err(IllegalMoveReason::BreaksOwnRing) => {}
                            Err(_) => break,
                        }
                        distance += 1;
                    }
                }
            }
        }

        moves
    }
}
