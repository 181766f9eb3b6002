//! A best-first search in the style of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
//! Nodes are interned in an [IndexMap] which doubles as the gScore and cameFrom tables, and the
//! open frontier is a [BinaryHeap] of indices into it.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    /// Push order, used as the final tie-break so the expansion order never depends on heap
    /// internals.
    seq: usize,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.seq == other.seq
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lowest estimated cost first, then the deepest node, then the oldest entry.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

fn reverse_path<N, C>(parents: &FxIndexMap<N, (usize, C)>, goal: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut path: Vec<N> = std::iter::successors(Some(goal), |&i| {
        parents.get_index(i).map(|(_, &(p, _))| p)
    })
    .map_while(|i| parents.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// Searches from `start` until a node satisfying `success` is expanded. Returns the path from
/// `start` to that node, both inclusive, and its total cost. `successors` yields neighbours with
/// the cost of moving to them and `heuristic` must never overestimate the remaining cost for the
/// result to be optimal.
pub fn astar_search<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut seq = 0;
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        seq,
        index: 0,
    });
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let (node, &(_, c)) = parents.get_index(index)?;
            if success(node) {
                let path = reverse_path(&parents, index);
                return Some((path, cost));
            }
            // A node is pushed again whenever a cheaper way to it is found. Only the entry
            // carrying the best known cost is expanded; the others are stale.
            if cost > c {
                continue;
            }
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h;
            let n;
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }
            seq += 1;
            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                seq,
                index: n,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A line graph 0 - 1 - 2 - ... - 9 with a shortcut 0 -> 5 of cost 2.
    fn line_successors(n: &u32) -> Vec<(u32, u32)> {
        let mut succ = Vec::new();
        if *n > 0 {
            succ.push((n - 1, 1));
        }
        if *n < 9 {
            succ.push((n + 1, 1));
        }
        if *n == 0 {
            succ.push((5, 2));
        }
        succ
    }

    #[test]
    fn takes_shortcut() {
        let (path, cost) = astar_search(
            &0,
            line_successors,
            |n| 9u32.abs_diff(*n).min(1),
            |n| *n == 9,
        )
        .unwrap();
        assert_eq!(cost, 6);
        assert_eq!(path, vec![0, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn start_is_goal() {
        let (path, cost) = astar_search(&3, line_successors, |_| 0u32, |n| *n == 3).unwrap();
        assert_eq!(cost, 0);
        assert_eq!(path, vec![3]);
    }

    #[test]
    fn exhausted_frontier() {
        let result = astar_search(&0, line_successors, |_| 0u32, |n| *n == 42);
        assert!(result.is_none());
    }
}
