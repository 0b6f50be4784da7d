use crate::grid::GridModel;

/// Axis steps tried from every expanded cell: right, left, down, up.
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// In-bounds 4-connected neighbours of `index`. Rows do not wrap.
pub fn neighbors4(grid: &GridModel, index: usize) -> impl Iterator<Item = usize> + '_ {
    let cell = grid.cell_of(index);
    DIRECTIONS.iter().filter_map(move |&(dx, dy)| {
        let mut next = cell;
        next.x += dx;
        next.y += dy;
        grid.index(next)
    })
}
