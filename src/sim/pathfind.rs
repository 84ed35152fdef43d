//! A* over the 4-connected grid
//!
//! Pursuers plan around a blocked set that changes every frame (the snake's
//! body). The goal cell is always enterable even if blocked, since the goal
//! is the head and the head is itself a body cell.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::grid::{Cell, Direction, Grid};

/// Open-set entry. Ordered so that `BinaryHeap` pops the lowest `f` first and
/// breaks ties by discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frontier {
    f: u32,
    g: u32,
    seq: u64,
    cell: Cell,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[inline]
fn manhattan(a: Cell, b: Cell) -> u32 {
    (a - b).abs().element_sum() as u32
}

/// Shortest 4-connected path from `start` to `goal`, both inclusive.
///
/// - Either endpoint off the grid: empty path (hold position).
/// - Goal unreachable: `[start]` (stay put).
pub fn find_path(grid: &Grid, start: Cell, goal: Cell, blocked: &HashSet<Cell>) -> Vec<Cell> {
    if !grid.in_bounds(start) || !grid.in_bounds(goal) {
        return Vec::new();
    }

    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut g_score: HashMap<Cell, u32> = HashMap::new();
    let mut closed: HashSet<Cell> = HashSet::new();
    let mut seq = 0u64;

    g_score.insert(start, 0);
    open.push(Frontier {
        f: manhattan(start, goal),
        g: 0,
        seq,
        cell: start,
    });

    while let Some(Frontier { g, cell, .. }) = open.pop() {
        if !closed.insert(cell) {
            continue;
        }

        if cell == goal {
            let mut path = vec![cell];
            let mut cur = cell;
            while let Some(&prev) = came_from.get(&cur) {
                path.push(prev);
                cur = prev;
            }
            path.reverse();
            return path;
        }

        for dir in Direction::ALL {
            let next = cell + dir.delta();
            if !grid.in_bounds(next) {
                continue;
            }
            if next != goal && blocked.contains(&next) {
                continue;
            }

            let tentative = g + 1;
            if g_score.get(&next).is_some_and(|&known| known <= tentative) {
                continue;
            }
            g_score.insert(next, tentative);
            came_from.insert(next, cell);
            seq += 1;
            open.push(Frontier {
                f: tentative + manhattan(next, goal),
                g: tentative,
                seq,
                cell: next,
            });
        }
    }

    vec![start]
}

/// True when every consecutive pair of cells is 4-adjacent
pub fn is_contiguous(path: &[Cell]) -> bool {
    path.windows(2).all(|w| manhattan(w[0], w[1]) == 1)
}
