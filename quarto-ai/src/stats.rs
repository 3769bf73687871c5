//! Search statistics tracking.

use std::time::Duration;

/// Counters collected over one top-level search.
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Nodes entered, root moves included.
    pub nodes: u64,
    /// Branches cut by the alpha-beta window.
    pub cutoffs: u64,
    /// Probes answered by the transposition table.
    pub table_hits: u64,
    /// Width of the root move list.
    pub root_moves: usize,
    /// Depth budget the search ran with.
    pub depth: i32,
    /// Positions memoized by the end of the search.
    pub table_size: usize,
    pub elapsed: Duration,
}

impl SearchStats {
    /// Nodes per second over the whole search.
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.nodes as f64 / secs
        } else {
            0.0
        }
    }

    /// One-line progress report in the arena log format.
    pub fn print_line(&self) {
        println!(
            "[search] root={} depth={} nodes={} cutoffs={} table_hits={} unique={} rate={:.0}/s time={:.2}s",
            self.root_moves,
            self.depth,
            self.nodes,
            self.cutoffs,
            self.table_hits,
            self.table_size,
            self.rate(),
            self.elapsed.as_secs_f64(),
        );
    }
}
