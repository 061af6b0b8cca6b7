// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Helpers for splitting a resolved route into per-floor segments for display.
//!
//! All functions operate on plain node slices and preserve path order;
//! nodes without a `floor` (cross-floor connectors) never belong to any floor.

use crate::Node;

/// Returns the nodes of `path` which lie on the given floor, in path order.
///
/// The result might be non-contiguous in the original path, e.g. when a route
/// leaves a floor and comes back to it later.
pub fn nodes_on_floor(path: &[Node], floor: i64) -> impl Iterator<Item = &Node> {
    path.iter().filter(move |n| n.floor == Some(floor))
}

/// Returns the distinct floors visited by `path`, in the order of first visit.
pub fn floors_visited(path: &[Node]) -> Vec<i64> {
    let mut floors = Vec::default();
    for floor in path.iter().filter_map(|n| n.floor) {
        if !floors.contains(&floor) {
            floors.push(floor);
        }
    }
    floors
}

/// Splits `path` into maximal contiguous runs of nodes sharing the same `floor` value.
///
/// Connector nodes form their own runs with a `None` floor.
pub fn split_by_floor(path: &[Node]) -> Vec<(Option<i64>, &[Node])> {
    path.chunk_by(|a, b| a.floor == b.floor)
        .map(|run| (run[0].floor, run))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> Vec<Node> {
        vec![
            Node::new(1, 0.0, 0.0).with_floor(1),
            Node::new(2, 1.0, 0.0).with_floor(1),
            Node::new(3, 2.0, 0.0),
            Node::new(4, 2.0, 0.0).with_floor(2),
            Node::new(5, 3.0, 0.0).with_floor(2),
            Node::new(6, 3.0, 0.0),
            Node::new(7, 4.0, 0.0).with_floor(1),
        ]
    }

    #[test]
    fn filter_floor() {
        let p = path();
        let ids: Vec<i64> = nodes_on_floor(&p, 1).map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 7]);

        let ids: Vec<i64> = nodes_on_floor(&p, 2).map(|n| n.id).collect();
        assert_eq!(ids, vec![4, 5]);

        assert_eq!(nodes_on_floor(&p, 3).count(), 0);
    }

    #[test]
    fn visited_floors() {
        assert_eq!(floors_visited(&path()), vec![1, 2]);
        assert!(floors_visited(&[]).is_empty());
    }

    #[test]
    fn contiguous_runs() {
        let p = path();
        let runs: Vec<(Option<i64>, Vec<i64>)> = split_by_floor(&p)
            .into_iter()
            .map(|(floor, run)| (floor, run.iter().map(|n| n.id).collect()))
            .collect();

        assert_eq!(
            runs,
            vec![
                (Some(1), vec![1, 2]),
                (None, vec![3]),
                (Some(2), vec![4, 5]),
                (None, vec![6]),
                (Some(1), vec![7]),
            ]
        );
    }
}
