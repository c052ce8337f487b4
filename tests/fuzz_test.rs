/// Fuzzes the search by checking for many random grids that a path is found exactly when the end
/// lies on the same connected component as the start, that found paths are shortest, and that an
/// exhaustive search closes precisely the component of the start.
use grid_astar::{Grid, SearchOutcome, Session};
use grid_util::point::Point;
use rand::prelude::*;
use std::collections::{HashSet, VecDeque};

fn random_session(n: usize, rng: &mut StdRng) -> Session {
    let mut session = Session::configure(n, n).unwrap();
    for x in 0..n as i32 {
        for y in 0..n as i32 {
            session.set_wall(Point::new(x, y), rng.gen_bool(0.4)).unwrap();
        }
    }
    session
}

/// Breadth-first edge count between two free cells.
fn bfs_distance(grid: &Grid, start: Point, end: Point) -> Option<usize> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(start);
    queue.push_back((start, 0));
    while let Some((p, d)) = queue.pop_front() {
        if p == end {
            return Some(d);
        }
        for n in grid.neighbors_of(&p) {
            if grid.can_move_to(&n) && seen.insert(n) {
                queue.push_back((n, d + 1));
            }
        }
    }
    None
}

fn visualize_grid(session: &Session) {
    println!("{}", session);
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut session = random_session(N, &mut rng);
        session.set_start(start).unwrap();
        session.set_end(end).unwrap();
        let snapshot = session.clone();

        let mut search = session.run().unwrap();
        let outcome = search.drive(&mut ());
        let grid = search.grid();
        let reachable = grid.reachable(&start, &end);
        // Show the grid if the outcome disagrees with the components
        if outcome.path().is_some() != reachable {
            visualize_grid(&snapshot);
        }
        assert_eq!(outcome.path().is_some(), reachable);
        match &outcome {
            SearchOutcome::Found(path) => {
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&end));
                assert!(grid.is_contiguous_path(path));
                assert_eq!(Some(path.len() - 1), bfs_distance(grid, start, end));
            }
            SearchOutcome::NoPathFound => {
                let closed: HashSet<Point> = search.closed_set().iter().copied().collect();
                let component: HashSet<Point> =
                    search.grid().component_cells(&start).into_iter().collect();
                assert_eq!(closed, component);
            }
            SearchOutcome::Cancelled => panic!("search was never cancelled"),
        }
    }
}

/// Without walls every shortest path is as long as the Manhattan distance.
#[test]
fn fuzz_open_grid_distance() {
    const N: i32 = 8;
    let mut rng = StdRng::seed_from_u64(1);
    let mut session = Session::configure(N as usize, N as usize).unwrap();
    for _ in 0..500 {
        let start = Point::new(rng.gen_range(0..N), rng.gen_range(0..N));
        let end = Point::new(rng.gen_range(0..N), rng.gen_range(0..N));
        session.set_start(start).unwrap();
        session.set_end(end).unwrap();
        let outcome = session.run_with(&mut ()).unwrap();
        let path = outcome.path().unwrap();
        assert_eq!(
            path.len() as i32 - 1,
            grid_astar::manhattan_distance(&start, &end)
        );
        assert!(session.grid().is_contiguous_path(path));
    }
}
