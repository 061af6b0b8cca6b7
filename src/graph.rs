// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::{Entry, HashMap};

use crate::{earth_distance, BuildError, Edge, EdgeRecord, Entrance, Node};

/// Represents the walkable network of a single building as a set of
/// [Nodes](Node), undirected weighted [Edges](Edge) between them,
/// and the building's [Entrances](Entrance).
///
/// Nodes are kept in an arena, in the order they were provided to [Graph::build];
/// adjacency lists refer to their neighbors by arena position. A graph is immutable
/// once built, so it can be freely shared between concurrent queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Vec<Edge>>,
    index: HashMap<i64, usize>,
    entrances: Vec<Entrance>,
}

impl Graph {
    /// Builds a graph from raw node, edge and entrance records.
    ///
    /// Every edge is stored in both directions. Fails if node ids repeat,
    /// an edge references an unknown node or has a negative weight,
    /// no entrances are given, or an entrance references an unknown node.
    pub fn build(
        nodes: Vec<Node>,
        edges: Vec<EdgeRecord>,
        entrances: Vec<Entrance>,
    ) -> Result<Self, BuildError> {
        let mut g = Self {
            nodes: Vec::with_capacity(nodes.len()),
            edges: Vec::with_capacity(nodes.len()),
            index: HashMap::with_capacity(nodes.len()),
            entrances: Vec::default(),
        };

        for node in nodes {
            g.add_node(node)?;
        }

        for edge in &edges {
            g.add_edge(edge)?;
        }

        if entrances.is_empty() {
            return Err(BuildError::NoEntrances);
        }
        if let Some(e) = entrances.iter().find(|e| !g.index.contains_key(&e.node)) {
            return Err(BuildError::UnknownEntranceNode {
                entrance: e.id,
                node: e.node,
            });
        }
        g.entrances = entrances;

        log::debug!(
            "built graph with {} nodes, {} edges and {} entrances",
            g.len(),
            g.edge_count(),
            g.entrances.len(),
        );
        Ok(g)
    }

    fn add_node(&mut self, node: Node) -> Result<(), BuildError> {
        match self.index.entry(node.id) {
            Entry::Occupied(_) => Err(BuildError::DuplicateNode(node.id)),
            Entry::Vacant(e) => {
                e.insert(self.nodes.len());
                self.nodes.push(node);
                self.edges.push(Vec::default());
                Ok(())
            }
        }
    }

    fn add_edge(&mut self, edge: &EdgeRecord) -> Result<(), BuildError> {
        if edge.weight.is_nan() || edge.weight < 0.0 {
            return Err(BuildError::InvalidWeight {
                edge: edge.id,
                weight: edge.weight,
            });
        }

        let from_idx = self.resolve_edge_node(edge, edge.from_id)?;
        let to_idx = self.resolve_edge_node(edge, edge.to_id)?;

        self.edges[from_idx].push(Edge {
            to: edge.to_id,
            cost: edge.weight,
            floor: edge.floor,
            to_idx,
        });
        self.edges[to_idx].push(Edge {
            to: edge.from_id,
            cost: edge.weight,
            floor: edge.floor,
            to_idx: from_idx,
        });
        Ok(())
    }

    fn resolve_edge_node(&self, edge: &EdgeRecord, node_id: i64) -> Result<usize, BuildError> {
        self.index
            .get(&node_id)
            .copied()
            .ok_or(BuildError::UnknownEdgeNode {
                edge: edge.id,
                node: node_id,
            })
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of undirected edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Returns an iterator over all [Nodes](Node) in the graph, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: i64) -> Option<&Node> {
        self.index.get(&id).map(|&idx| &self.nodes[idx])
    }

    /// Gets all outgoing [Edges](Edge) from a node with a given id,
    /// in the order the edges were provided.
    pub fn get_edges(&self, from_id: i64) -> &[Edge] {
        self.index
            .get(&from_id)
            .map(|&idx| self.edges[idx].as_slice())
            .unwrap_or_default()
    }

    /// Gets the cost of the cheapest [Edge] from one node to another.
    /// If such an edge doesn't exist, returns [f64::INFINITY].
    pub fn get_edge(&self, from_id: i64, to_id: i64) -> f64 {
        self.get_edges(from_id)
            .iter()
            .filter(|e| e.to == to_id)
            .map(|e| e.cost)
            .fold(f64::INFINITY, f64::min)
    }

    /// Returns the building [Entrances](Entrance), in the order they were provided.
    /// Never empty.
    pub fn entrances(&self) -> &[Entrance] {
        &self.entrances
    }

    /// Retrieves an [Entrance] with the provided id.
    pub fn find_entrance(&self, id: i64) -> Option<&Entrance> {
        self.entrances.iter().find(|e| e.id == id)
    }

    /// Finds the [Entrance] closest to the given geographic position.
    ///
    /// On ties, the entrance provided first wins.
    pub fn find_nearest_entrance(&self, lat: f64, lng: f64) -> Option<&Entrance> {
        self.entrances
            .iter()
            .map(|e| (earth_distance(lat, lng, e.lat, e.lng), e))
            .fold(None, |best: Option<(f64, &Entrance)>, (dist, e)| match best {
                Some((best_dist, _)) if best_dist <= dist => best,
                _ => Some((dist, e)),
            })
            .map(|(_, e)| e)
    }

    /// Returns all [Nodes](Node) with the given room number, in insertion order.
    pub fn find_nodes_by_room(&self, room_num: i64) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|n| n.room_num == Some(room_num))
            .collect()
    }

    /// Returns all [Nodes](Node) on the given floor, in insertion order.
    pub fn find_nodes_by_floor(&self, floor: i64) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|n| n.floor == Some(floor))
            .collect()
    }

    pub(crate) fn node_index(&self, id: i64) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub(crate) fn node_at(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub(crate) fn edges_at(&self, idx: usize) -> &[Edge] {
        &self.edges[idx]
    }
}
