//! Traversal algorithms over a [`Grid`](pathviz_core::Grid).
//!
//! Every search runs inside a [`TraversalContext`], which holds the per-cell
//! scratch state (distance, visited flag, back-link and A* costs) so the
//! grid's layout stays untouched during a run:
//!
//! - **Dijkstra** by distance ([`TraversalContext::dijkstra`])
//! - **A\*** by `g + h` with a Manhattan estimate ([`TraversalContext::astar`])
//! - **BFS** unweighted ([`TraversalContext::bfs`])
//! - **DFS** exploratory ([`TraversalContext::dfs`])
//! - **Flood fill** reachability ([`TraversalContext::flood_fill`])
//!
//! Each search returns the cells in visiting order; the route is recovered
//! afterwards with [`TraversalContext::reconstruct_path`]. [`Algorithm`]
//! selects one by name and [`Algorithm::search`] bundles a full run into a
//! [`Search`].
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, DFS, flood fill |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra, [`path_cost`] |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod algorithm;
mod astar;
mod bfs;
mod cc;
mod context;
mod dfs;
mod dijkstra;
mod distance;
mod path;
mod traits;

pub use algorithm::{Algorithm, ParseAlgorithmError, Search};
pub use context::{Scratch, TraversalContext, UNREACHABLE};
pub use dijkstra::Relaxation;
pub use distance::manhattan;
pub use path::path_cost;
pub use traits::{AstarPather, Pather, WeightedPather};
