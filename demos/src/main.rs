//! pathviz: replay a pathfinding run in the terminal.
//!
//! Builds a grid, optionally stamps a maze, runs the chosen algorithm and
//! reveals the visited cells and the path at the configured speed.
//! `RUST_LOG=debug` shows what the engine does.

mod render;

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{cursor, event, execute, terminal};

use pathviz_core::Point;
use pathviz_driver::{Speed, Visualizer, VisualizerConfig};
use pathviz_maze::MazeKind;
use pathviz_paths::{Algorithm, Relaxation};

/// Grid pathfinding visualizer.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// dijkstra, astar, bfs or dfs
    #[arg(short, long, default_value = "dijkstra")]
    algorithm: Algorithm,

    /// random, recursiveDivision, vertical or horizontal
    #[arg(short, long)]
    maze: Option<MazeKind>,

    /// fast, average, slow or milliseconds per visited cell
    #[arg(short, long, default_value = "average")]
    speed: Speed,

    #[arg(long, default_value_t = 25)]
    rows: i32,

    #[arg(long, default_value_t = 50)]
    cols: i32,

    /// Start as ROW,COL
    #[arg(long, value_parser = parse_point, default_value = "10,15")]
    start: Point,

    /// Finish as ROW,COL
    #[arg(long, value_parser = parse_point, default_value = "10,35")]
    finish: Point,

    /// Place a bomb at the centre of the grid
    #[arg(long)]
    bomb: bool,

    /// Only rewrite Dijkstra distances that improve
    #[arg(long)]
    improving: bool,

    /// Maze seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final grid without animating
    #[arg(long)]
    instant: bool,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let row = row.trim().parse::<i32>().map_err(|e| e.to_string())?;
    let col = col.trim().parse::<i32>().map_err(|e| e.to_string())?;
    Ok(Point::new(row, col))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    log::debug!("{args:?}");

    let config = VisualizerConfig {
        rows: args.rows,
        cols: args.cols,
        start: args.start,
        finish: args.finish,
        speed: args.speed,
        algorithm: args.algorithm,
        relaxation: if args.improving {
            Relaxation::Improving
        } else {
            Relaxation::Overwrite
        },
        seed: args.seed,
        ..VisualizerConfig::default()
    };
    let mut viz = Visualizer::new(config)?;
    if args.bomb {
        viz.toggle_bomb()?;
    }
    if let Some(kind) = args.maze {
        viz.generate_maze(kind)?;
    }
    viz.visualize()?;

    if args.instant {
        viz.reveal_all();
        render::print_plain(&mut io::stdout(), &viz)?;
    } else {
        replay(&mut viz)?;
    }

    if let Some(search) = viz.search() {
        match search.cost(viz.grid()) {
            Some(cost) => println!(
                "{}: visited {} cells, path of {} cells, cost {cost}",
                search.algorithm.label(),
                search.visited.len(),
                search.path.len()
            ),
            None => println!(
                "{}: visited {} cells, finish unreachable",
                search.algorithm.label(),
                search.visited.len()
            ),
        }
    }
    Ok(())
}

/// Animate the pending reveals on the alternate screen, then wait for a key.
fn replay(viz: &mut Visualizer) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = (|| -> Result<(), Box<dyn std::error::Error>> {
        render::draw_all(&mut stdout, viz)?;
        let started = Instant::now();
        while let Some(offset) = viz.schedule().peek().map(|e| e.offset) {
            let now = Instant::now();
            if let Some(due) = started.checked_add(Duration::from_millis(offset)) {
                if due > now {
                    thread::sleep(due - now);
                }
            }
            let elapsed = started.elapsed().as_millis() as u64;
            for event in viz.tick(elapsed) {
                render::draw_cell(&mut stdout, viz, event.pos)?;
            }
        }
        // Any key exits.
        loop {
            if let event::Event::Key(_) = event::read()? {
                break;
            }
        }
        Ok(())
    })();

    let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    result
}
