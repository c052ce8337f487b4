use grid_util::point::Point;

/// A single square of the [Grid](crate::Grid). Besides its fixed position and wall flag a cell
/// carries the scratch values of the A* search that last touched it: the cost so far `g`, the
/// heuristic estimate `h`, their sum `f` and the cell it was reached from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Point,
    pub(crate) wall: bool,
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) f: i32,
    pub(crate) parent: Option<Point>,
}

impl Cell {
    pub fn new(pos: Point) -> Cell {
        Cell {
            pos,
            wall: false,
            g: 0,
            h: 0,
            f: 0,
            parent: None,
        }
    }
    pub fn pos(&self) -> Point {
        self.pos
    }
    pub fn is_wall(&self) -> bool {
        self.wall
    }
    pub fn g(&self) -> i32 {
        self.g
    }
    pub fn h(&self) -> i32 {
        self.h
    }
    pub fn f(&self) -> i32 {
        self.f
    }
    pub fn parent(&self) -> Option<Point> {
        self.parent
    }

    /// True if a search has written to this cell since the last clear.
    pub fn has_scratch(&self) -> bool {
        self.g != 0 || self.h != 0 || self.f != 0 || self.parent.is_some()
    }

    pub(crate) fn clear_scratch(&mut self) {
        self.g = 0;
        self.h = 0;
        self.f = 0;
        self.parent = None;
    }
}
