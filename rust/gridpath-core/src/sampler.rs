use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::GridModel;
use crate::models::{Cell, Point};

/// Inclusive cell box to sample from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleArea {
    pub min: Cell,
    pub max: Cell,
}

impl SampleArea {
    /// `[center - radius/2, center + radius/2]` mapped onto the grid and clamped
    /// to its bounds.
    pub fn around(grid: &GridModel, center: Point, radius: f32) -> Self {
        let range = radius / 2.0;
        let min = grid.clamp_world(Point::new(center.x - range, center.y - range));
        let max = grid.clamp_world(Point::new(center.x + range, center.y + range));
        Self { min, max }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }
}

/// Picks a walkable cell uniformly at random, optionally restricted to `area`.
/// `None` when no walkable cell qualifies.
pub fn sample_cell<R: Rng + ?Sized>(grid: &GridModel, area: Option<SampleArea>, rng: &mut R) -> Option<Cell> {
    match area {
        None => {
            let count = grid.open_count();
            if count == 0 {
                return None;
            }
            let pick = rng.gen_range(0..count);
            grid.open_cells().nth(pick).map(|i| grid.cell_of(i))
        }
        Some(area) => {
            let mut candidates = Vec::new();
            for y in area.min.y..=area.max.y {
                for x in area.min.x..=area.max.x {
                    let cell = Cell::new(x, y);
                    if let Some(i) = grid.index(cell) {
                        if !grid.is_collidable(i) {
                            candidates.push(cell);
                        }
                    }
                }
            }
            candidates.choose(rng).copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn checkerboard(w: usize, h: usize) -> GridModel {
        GridModel::build(w, h, 32.0, |x, y| ((x / 32.0) as i32 + (y / 32.0) as i32) % 2 == 1).unwrap()
    }

    #[test]
    fn whole_grid_sampling_never_returns_collidable() {
        let g = checkerboard(6, 6);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let c = sample_cell(&g, None, &mut rng).unwrap();
            assert!(!g.is_collidable(g.index(c).unwrap()), "{c:?} is blocked");
        }
    }

    #[test]
    fn whole_grid_sampling_reaches_every_open_cell() {
        let g = checkerboard(4, 4);
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2_000 {
            seen.insert(sample_cell(&g, None, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), g.open_count());
    }

    #[test]
    fn area_is_clamped_and_inclusive() {
        let g = GridModel::build(5, 5, 32.0, |_, _| false).unwrap();
        let a = SampleArea::around(&g, Point::new(64.0, 64.0), 32.0);
        assert_eq!(a, SampleArea { min: Cell::new(1, 1), max: Cell::new(2, 2) });
        let a = SampleArea::around(&g, Point::new(0.0, 150.0), 400.0);
        assert_eq!(a, SampleArea { min: Cell::new(0, 0), max: Cell::new(4, 4) });
    }

    #[test]
    fn area_sampling_stays_inside_box() {
        let g = checkerboard(10, 10);
        let area = SampleArea::around(&g, Point::new(160.0, 160.0), 96.0);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let c = sample_cell(&g, Some(area), &mut rng).unwrap();
            assert!(area.contains(c));
            assert!(!g.is_collidable(g.index(c).unwrap()));
        }
    }

    #[test]
    fn empty_candidate_set_is_none() {
        let g = GridModel::build(3, 3, 32.0, |_, _| true).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_cell(&g, None, &mut rng), None);
        let area = SampleArea::around(&g, Point::new(48.0, 48.0), 32.0);
        assert_eq!(sample_cell(&g, Some(area), &mut rng), None);
    }
}
