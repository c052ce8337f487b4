use grid_astar::{CancelToken, Config, SearchObserver, Session};
use grid_util::point::Point;
use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

// Animates a search on the default 20x20 grid in the terminal. A wall with two gaps forces the
// search to spread out before it finds the way around.
//
// - S / E mark the start and the end
// - # marks a wall
// - o marks open cells, x closed cells and * the final path

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Open,
    Closed,
    Path,
}

/// Presentation state keyed by coordinates, redrawn after every step.
struct TerminalView {
    base: Vec<Vec<char>>,
    marks: HashMap<Point, Mark>,
}

impl TerminalView {
    fn new(session: &Session) -> TerminalView {
        let base = session
            .to_string()
            .lines()
            .map(|line| line.chars().collect())
            .collect();
        TerminalView {
            base,
            marks: HashMap::new(),
        }
    }

    fn draw(&self) {
        let mut out = String::from("\x1b[H");
        for (y, row) in self.base.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                let p = Point::new(x as i32, y as i32);
                let shown = match (c, self.marks.get(&p)) {
                    ('S' | 'E', _) => c,
                    (_, Some(Mark::Path)) => '*',
                    (_, Some(Mark::Closed)) => 'x',
                    (_, Some(Mark::Open)) => 'o',
                    (_, None) => c,
                };
                out.push(shown);
            }
            out.push('\n');
        }
        print!("{}", out);
        let _ = std::io::stdout().flush();
    }
}

impl SearchObserver for TerminalView {
    fn on_visited(&mut self, cell: Point) {
        self.marks.insert(cell, Mark::Closed);
        self.draw();
    }
    fn on_discovered(&mut self, cell: Point) {
        self.marks.insert(cell, Mark::Open);
    }
    fn on_path_found(&mut self, path: &[Point]) {
        for p in path {
            self.marks.insert(*p, Mark::Path);
        }
        self.draw();
        println!("Path of {} cells found", path.len());
    }
    fn on_no_path_found(&mut self) {
        println!("No path found");
    }
    fn on_cancelled(&mut self) {
        println!("Search cancelled");
    }
}

fn main() -> grid_astar::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default().with_step_delay(Duration::from_millis(30));
    let mut session = Session::new(config)?;
    let cols = session.config().cols as i32;
    let rows = session.config().rows as i32;
    for y in 0..rows {
        if y != 2 && y != rows - 3 {
            session.set_wall(Point::new(cols / 2, y), true)?;
        }
    }
    session.set_start(Point::new(2, rows / 2))?;
    session.set_end(Point::new(cols - 3, rows / 2))?;

    let mut view = TerminalView::new(&session);
    print!("\x1b[2J");
    let outcome = session.animate(&mut view, CancelToken::new())?;
    log::info!("Search finished: {:?}", outcome.path().map(<[Point]>::len));
    Ok(())
}
