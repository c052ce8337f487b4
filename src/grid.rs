use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::N_NEIGHBOURS;
use core::fmt;
use grid_util::point::Point;
use itertools::Itertools;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// [Grid] holds a fixed `rows` x `cols` lattice of [Cell]s in row-major order. Cells are
/// addressed by [Point]s with `x` in `0..cols` and `y` in `0..rows`. In addition to the cells it
/// maintains the 4-connected components of the free cells in a [UnionFind] structure, which
/// answers reachability queries without running a search.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Grid {
    /// Allocates `rows * cols` free cells with cleared search state.
    pub fn new(rows: usize, cols: usize) -> Grid {
        let cells = (0..rows as i32)
            .cartesian_product(0..cols as i32)
            .map(|(y, x)| Cell::new(Point::new(x, y)))
            .collect();
        let mut grid = Grid {
            rows,
            cols,
            cells,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn in_bounds(&self, point: &Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.cols
            && (point.y as usize) < self.rows
    }
    /// Index of an in-bounds point into the row-major cell storage.
    fn get_ix(&self, point: &Point) -> usize {
        point.y as usize * self.cols + point.x as usize
    }
    pub(crate) fn checked_ix(&self, point: &Point) -> Result<usize> {
        if self.in_bounds(point) {
            Ok(self.get_ix(point))
        } else {
            Err(Error::OutOfBounds {
                point: *point,
                cols: self.cols,
                rows: self.rows,
            })
        }
    }
    pub fn cell(&self, point: &Point) -> Option<&Cell> {
        if self.in_bounds(point) {
            Some(&self.cells[self.get_ix(point)])
        } else {
            None
        }
    }
    pub(crate) fn cell_mut(&mut self, point: &Point) -> Option<&mut Cell> {
        if self.in_bounds(point) {
            let ix = self.get_ix(point);
            Some(&mut self.cells[ix])
        } else {
            None
        }
    }
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    /// Out-of-bounds points count as walls.
    pub fn is_wall(&self, point: &Point) -> bool {
        self.cell(point).map_or(true, Cell::is_wall)
    }
    pub fn can_move_to(&self, point: &Point) -> bool {
        !self.is_wall(point)
    }

    /// The in-bounds cells sharing an edge with `point`, always in the order
    /// (x+1, y), (x-1, y), (x, y+1), (x, y-1). The order decides which of several equally good
    /// cells the search expands first, so it must never change.
    pub fn neighbors_of(&self, point: &Point) -> SmallVec<[Point; N_NEIGHBOURS]> {
        [
            Point::new(point.x + 1, point.y),
            Point::new(point.x - 1, point.y),
            Point::new(point.x, point.y + 1),
            Point::new(point.x, point.y - 1),
        ]
        .into_iter()
        .filter(|p| self.in_bounds(p))
        .collect()
    }

    /// Updates the wall flag of a cell. Joins newly connected components and flags the
    /// components as dirty if a component is (potentially) broken apart.
    pub fn set_wall(&mut self, point: &Point, blocked: bool) -> Result<()> {
        let ix = self.checked_ix(point)?;
        if blocked {
            if !self.cells[ix].wall {
                self.components_dirty = true;
            }
        } else {
            for n in self.neighbors_of(point) {
                if self.can_move_to(&n) {
                    let n_ix = self.get_ix(&n);
                    self.components.union(ix, n_ix);
                }
            }
        }
        self.cells[ix].wall = blocked;
        Ok(())
    }

    /// Removes every wall. All cells end up in a single component.
    pub fn clear_walls(&mut self) {
        for cell in &mut self.cells {
            cell.wall = false;
        }
        self.generate_components();
    }

    /// Resets g, h, f and parent of every cell.
    pub fn clear_scratch(&mut self) {
        for cell in &mut self.cells {
            cell.clear_scratch();
        }
    }

    /// True if any cell still carries values written by an earlier search.
    pub fn has_stale_scratch(&self) -> bool {
        self.cells.iter().any(Cell::has_scratch)
    }

    /// Representative index of the 4-connected region holding `point`, or [None] off the grid.
    /// Only meaningful once dirty components have been rebuilt with [update](Self::update).
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.checked_ix(point)
            .ok()
            .map(|ix| self.components.find(ix))
    }
    /// True when both cells lie in the same 4-connected region.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// True when the cells lie in different regions or either one is off the grid.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start) && self.in_bounds(goal) {
            !self.components.equiv(self.get_ix(start), self.get_ix(goal))
        } else {
            true
        }
    }
    /// All free cells on the same component as `point`, in row-major order. Empty if `point`
    /// is a wall or out of bounds.
    pub fn component_cells(&self, point: &Point) -> Vec<Point> {
        if !self.can_move_to(point) {
            return Vec::new();
        }
        let ix = self.get_ix(point);
        self.cells
            .iter()
            .enumerate()
            .filter(|(i, cell)| !cell.wall && self.components.equiv(ix, *i))
            .map(|(_, cell)| cell.pos())
            .collect()
    }

    /// Rebuilds the regions after a wall was placed; cheap when nothing split since the last
    /// rebuild.
    pub fn update(&mut self) {
        if self.components_dirty {
            debug!("Walls changed since the last rebuild, regenerating regions");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free grid neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for ix in 0..self.cells.len() {
            if self.cells[ix].wall {
                continue;
            }
            let point = self.cells[ix].pos();
            // Linking right and down is enough to cover every edge once.
            for n in [Point::new(point.x + 1, point.y), Point::new(point.x, point.y + 1)] {
                if self.can_move_to(&n) {
                    let n_ix = self.get_ix(&n);
                    self.components.union(ix, n_ix);
                }
            }
        }
    }

    /// Checks that consecutive points of `path` share an edge and that no point is a wall.
    pub fn is_contiguous_path(&self, path: &[Point]) -> bool {
        path.iter().all(|p| self.can_move_to(p))
            && path
                .iter()
                .tuple_windows()
                .all(|(a, b)| crate::manhattan_distance(a, b) == 1)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for row in &self.cells.iter().chunks(self.cols.max(1)) {
            let values = row.map(|cell| cell.wall as i32).collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_every_cell_once() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.cells().count(), 12);
        for y in 0..3 {
            for x in 0..4 {
                let p = Point::new(x, y);
                assert_eq!(grid.cell(&p).map(Cell::pos), Some(p));
            }
        }
        assert!(grid.cell(&Point::new(4, 0)).is_none());
        assert!(grid.cell(&Point::new(0, -1)).is_none());
    }

    /// Neighbours are enumerated right, left, down, up and clipped at the border.
    #[test]
    fn neighbour_order_is_fixed() {
        let grid = Grid::new(3, 3);
        let centre: Vec<Point> = grid.neighbors_of(&Point::new(1, 1)).into_iter().collect();
        assert_eq!(
            centre,
            vec![
                Point::new(2, 1),
                Point::new(0, 1),
                Point::new(1, 2),
                Point::new(1, 0)
            ]
        );
        let corner: Vec<Point> = grid.neighbors_of(&Point::new(0, 0)).into_iter().collect();
        assert_eq!(corner, vec![Point::new(1, 0), Point::new(0, 1)]);
        let far_corner: Vec<Point> = grid.neighbors_of(&Point::new(2, 2)).into_iter().collect();
        assert_eq!(far_corner, vec![Point::new(1, 2), Point::new(2, 1)]);
    }

    #[test]
    fn neighbours_include_walls() {
        let mut grid = Grid::new(2, 2);
        grid.set_wall(&Point::new(1, 0), true).unwrap();
        assert_eq!(grid.neighbors_of(&Point::new(0, 0)).len(), 2);
    }

    #[test]
    fn set_wall_out_of_bounds() {
        let mut grid = Grid::new(2, 3);
        let err = grid.set_wall(&Point::new(3, 0), true).unwrap_err();
        assert_eq!(
            err,
            Error::OutOfBounds {
                point: Point::new(3, 0),
                cols: 3,
                rows: 2
            }
        );
    }

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // Corresponds to the following 3x2 grid:
        //  ___
        // | # |
        // | # |
        //  ___
        let mut grid = Grid::new(2, 3);
        grid.set_wall(&Point::new(1, 0), true).unwrap();
        grid.set_wall(&Point::new(1, 1), true).unwrap();
        assert!(grid.components_dirty);
        grid.update();
        assert!(!grid.components_dirty);
        let p1 = Point::new(0, 0);
        let p2 = Point::new(1, 1);
        let p3 = Point::new(0, 1);
        let p4 = Point::new(2, 0);
        assert!(grid.unreachable(&p1, &p2));
        assert!(grid.reachable(&p1, &p3));
        assert!(grid.unreachable(&p1, &p4));
        assert_eq!(grid.component_cells(&p1), vec![p1, p3]);
        assert!(grid.component_cells(&p2).is_empty());
        assert_eq!(grid.get_component(&p1), grid.get_component(&p3));
        assert_ne!(grid.get_component(&p1), grid.get_component(&p4));
    }

    #[test]
    fn component_of_outside_point_is_none() {
        let grid = Grid::new(2, 2);
        assert_eq!(grid.get_component(&Point::new(-1, 0)), None);
        assert_eq!(grid.get_component(&Point::new(0, 2)), None);
        assert!(grid.get_component(&Point::new(1, 1)).is_some());
    }

    /// Removing a wall joins components without a full regeneration.
    #[test]
    fn clearing_a_wall_joins_components() {
        let mut grid = Grid::new(1, 3);
        grid.set_wall(&Point::new(1, 0), true).unwrap();
        grid.update();
        assert!(grid.unreachable(&Point::new(0, 0), &Point::new(2, 0)));
        grid.set_wall(&Point::new(1, 0), false).unwrap();
        assert!(!grid.components_dirty);
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(2, 0)));
    }

    /// Diagonal contact does not connect two cells on a 4-grid.
    #[test]
    fn diagonal_is_not_connected() {
        //  __
        // | #|
        // |# |
        //  __
        let mut grid = Grid::new(2, 2);
        grid.set_wall(&Point::new(1, 0), true).unwrap();
        grid.set_wall(&Point::new(0, 1), true).unwrap();
        grid.update();
        assert!(grid.unreachable(&Point::new(0, 0), &Point::new(1, 1)));
    }

    #[test]
    fn contiguous_path_check() {
        let mut grid = Grid::new(3, 3);
        let path = [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)];
        assert!(grid.is_contiguous_path(&path));
        assert!(!grid.is_contiguous_path(&[Point::new(0, 0), Point::new(1, 1)]));
        grid.set_wall(&Point::new(1, 0), true).unwrap();
        assert!(!grid.is_contiguous_path(&path));
    }

    #[test]
    fn stale_scratch_detection() {
        let mut grid = Grid::new(2, 2);
        assert!(!grid.has_stale_scratch());
        if let Some(cell) = grid.cell_mut(&Point::new(1, 1)) {
            cell.parent = Some(Point::new(1, 0));
        }
        assert!(grid.has_stale_scratch());
        grid.clear_scratch();
        assert!(!grid.has_stale_scratch());
    }

    #[test]
    fn display_marks_walls() {
        let mut grid = Grid::new(2, 2);
        grid.set_wall(&Point::new(1, 0), true).unwrap();
        assert_eq!(grid.to_string(), "Grid:\n[0, 1]\n[0, 0]\n");
    }
}
