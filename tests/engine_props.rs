//! Property tests for the slide/merge engine and the spawn rule.
//!
//! Invariants covered:
//! - Right/Up/Down are Left seen through a mirror and/or transpose.
//! - Rows (or columns) never influence each other.
//! - Lines without equal neighbours keep their tiles.
//! - Moves preserve the tile sum; a spawn adds exactly 2 or 4.
//! - A spawn changes exactly one formerly-empty cell.
use grid_2048::engine::{
    self, move_down, move_left, move_right, move_up, slide_and_merge_line, Direction, Grid, Tile,
};
use grid_2048::game::on_direction_input;
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn tile() -> impl Strategy<Value = Tile> {
    prop_oneof![
        3 => Just(0u32),
        2 => (1u32..=11).prop_map(|k| 1 << k),
    ]
}

fn grid() -> impl Strategy<Value = Grid> {
    proptest::array::uniform4(proptest::array::uniform4(tile()))
        .prop_map(|rows| Grid::from_rows(rows).unwrap())
}

fn line() -> impl Strategy<Value = Vec<Tile>> {
    proptest::collection::vec(tile(), 0..8)
}

#[test]
fn fixed_point_under_repeated_left() {
    let g = Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    let g = move_left(move_up(move_left(g)));
    assert!(engine::moves_equal(&move_left(g), &g));
}

proptest! {
    #[test]
    fn directions_are_symmetric(g in grid()) {
        prop_assert_eq!(move_right(g), move_left(g.mirror()).mirror());
        prop_assert_eq!(move_up(g), move_left(g.transpose()).transpose());
        prop_assert_eq!(move_down(g), move_right(g.transpose()).transpose());
    }

    #[test]
    fn rows_move_independently(g in grid()) {
        let moved = move_left(g);
        for (row, out) in g.rows().iter().zip(moved.rows().iter()) {
            prop_assert_eq!(slide_and_merge_line(row), out.to_vec());
        }
    }

    #[test]
    fn line_keeps_length_and_sum(l in line()) {
        let out = slide_and_merge_line(&l);
        prop_assert_eq!(out.len(), l.len());
        let before: u64 = l.iter().map(|&v| u64::from(v)).sum();
        let after: u64 = out.iter().map(|&v| u64::from(v)).sum();
        prop_assert_eq!(before, after);
        // Non-zero prefix, zero suffix.
        let nz = out.iter().take_while(|&&v| v != 0).count();
        prop_assert!(out[nz..].iter().all(|&v| v == 0));
    }

    #[test]
    fn line_without_neighbour_pairs_is_conserved(l in line()) {
        let compact: Vec<Tile> = l.iter().copied().filter(|&v| v != 0).collect();
        prop_assume!(compact.windows(2).all(|w| w[0] != w[1]));
        let out = slide_and_merge_line(&l);
        let out_nz: Vec<Tile> = out.into_iter().filter(|&v| v != 0).collect();
        prop_assert_eq!(out_nz, compact);
    }

    #[test]
    fn line_is_idempotent_without_merges(l in line()) {
        let once = slide_and_merge_line(&l);
        let nz: Vec<Tile> = once.iter().copied().filter(|&v| v != 0).collect();
        if nz.windows(2).all(|w| w[0] != w[1]) {
            prop_assert_eq!(slide_and_merge_line(&once), once);
        }
    }

    #[test]
    fn spawn_after_move_adds_two_or_four(g in grid(), seed in any::<u64>(), d in 0usize..4) {
        let dir = Direction::ALL[d];
        let mut rng = StdRng::seed_from_u64(seed);
        let next = on_direction_input(dir, g, &mut rng);
        let moved = g.shift(dir);
        prop_assert_eq!(moved.tile_sum(), g.tile_sum());
        if moved == g {
            prop_assert_eq!(next, g);
        } else {
            let added = next.tile_sum() - g.tile_sum();
            prop_assert!(added == 2 || added == 4);
        }
    }

    #[test]
    fn spawn_touches_one_empty_cell(g in grid(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let placed = engine::place_random_tile(g, &mut rng);
        let diffs: Vec<_> = g
            .cells()
            .zip(placed.cells())
            .filter(|((_, a), (_, b))| a != b)
            .collect();
        if g.count_empty() == 0 {
            prop_assert_eq!(placed, g);
        } else {
            prop_assert_eq!(diffs.len(), 1);
            let ((_, before), (_, after)) = diffs[0];
            prop_assert_eq!(before, 0);
            prop_assert!(after == 2 || after == 4);
        }
    }

    #[test]
    fn moves_never_mutate_input(g in grid()) {
        let copy = g;
        for d in Direction::ALL {
            let _ = engine::shift(g, d);
        }
        prop_assert_eq!(g, copy);
    }
}
