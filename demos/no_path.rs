use grid_astar::{SearchOutcome, SearchStep, Session};
use grid_util::point::Point;

// The start is cut off by a wall, so the search closes every cell on its side and gives up:
//  ___
// |S# |
// | # |
// | #E|
//  ___

fn main() -> grid_astar::Result<()> {
    let mut session = Session::configure(3, 3)?;
    for y in 0..3 {
        session.set_wall(Point::new(1, y), true)?;
    }
    session.set_start(Point::new(0, 0))?;
    session.set_end(Point::new(2, 2))?;
    println!("{}", session);

    let mut search = session.run()?;
    for step in search.by_ref() {
        match step {
            SearchStep::Expanded { visited, .. } => println!("Closed {:?}", visited),
            SearchStep::NoPath => println!("No path found"),
            other => println!("{:?}", other),
        }
    }
    assert_eq!(search.outcome(), Some(&SearchOutcome::NoPathFound));
    println!("{} cells closed", search.closed_set().len());
    Ok(())
}
