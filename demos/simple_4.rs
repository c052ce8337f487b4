use grid_astar::{SearchOutcome, Session};
use grid_util::point::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() -> grid_astar::Result<()> {
    let mut session = Session::configure(3, 3)?;
    session.set_wall(Point::new(1, 1), true)?;
    session.set_start(Point::new(0, 0))?;
    session.set_end(Point::new(2, 2))?;
    println!("{}", session);
    if let SearchOutcome::Found(path) = session.run_with(&mut ())? {
        println!("Path:");
        for p in path {
            println!("{:?}", p);
        }
    }
    Ok(())
}
