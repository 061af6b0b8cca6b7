// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BinaryHeap;

use crate::{Edge, Graph};

/// Cheapest walk between two nodes, as found by [shortest_path].
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Node ids from the start to the end node, both inclusive.
    pub ids: Vec<i64>,

    /// Sum of the weights of all traversed edges.
    pub cost: f64,
}

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: usize,
    cost: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower costs are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        // Equal costs are ordered by arena position to keep the pop order deterministic.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.at.cmp(&self.at))
    }
}

fn reconstruct_path(g: &Graph, came_from: &[Option<usize>], mut last: usize) -> Vec<i64> {
    let mut path = vec![g.node_at(last).id];

    while let Some(idx) = came_from[last] {
        path.push(g.node_at(idx).id);
        last = idx;
    }

    path.reverse();
    path
}

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the cheapest route between two nodes in the provided graph.
///
/// Returns [None] if either node doesn't exist in the graph, or if there is
/// no route between them. Routing from a node to itself yields a single-node
/// path with zero cost.
///
/// The search stops as soon as the end node is settled. Ties between equally
/// cheap routes are resolved deterministically: repeated calls on the same graph
/// always return the same path.
pub fn shortest_path(g: &Graph, from_id: i64, to_id: i64) -> Option<ShortestPath> {
    let from = g.node_index(from_id)?;
    let to = g.node_index(to_id)?;

    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: Vec<Option<usize>> = vec![None; g.len()];
    let mut known_costs: Vec<f64> = vec![f64::INFINITY; g.len()];
    let mut settled: Vec<bool> = vec![false; g.len()];

    queue.push(QueueItem { at: from, cost: 0.0 });
    known_costs[from] = 0.0;

    while let Some(item) = queue.pop() {
        if item.at == to {
            return Some(ShortestPath {
                ids: reconstruct_path(g, &came_from, to),
                cost: item.cost,
            });
        }

        // Stale items may remain in the queue for already-settled nodes.
        if settled[item.at] {
            continue;
        }
        settled[item.at] = true;

        for &Edge {
            cost: edge_cost,
            to_idx: neighbor,
            ..
        } in g.edges_at(item.at)
        {
            if settled[neighbor] {
                continue;
            }

            let neighbor_cost = item.cost + edge_cost;
            if neighbor_cost < known_costs[neighbor] {
                came_from[neighbor] = Some(item.at);
                known_costs[neighbor] = neighbor_cost;
                queue.push(QueueItem {
                    at: neighbor,
                    cost: neighbor_cost,
                });
            }
        }
    }

    log::trace!("no route from {} to {}", from_id, to_id);
    None
}
