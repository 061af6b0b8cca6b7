// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Inconsistencies in the input records detected by [Graph::build](crate::Graph::build).
///
/// A graph is never handed out in an inconsistent state; any of these
/// conditions aborts construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// Two node records share the same id.
    #[error("duplicate node: {0}")]
    DuplicateNode(i64),

    /// An edge references a node absent from the node records.
    #[error("edge {edge}: unknown node {node}")]
    UnknownEdgeNode { edge: i64, node: i64 },

    /// An edge has a negative (or NaN) weight.
    #[error("edge {edge}: invalid weight {weight}")]
    InvalidWeight { edge: i64, weight: f64 },

    /// No entrances were provided.
    #[error("no entrances")]
    NoEntrances,

    /// An entrance is attached to a node absent from the node records.
    #[error("entrance {entrance}: unknown node {node}")]
    UnknownEntranceNode { entrance: i64, node: i64 },
}

impl BuildError {
    /// Returns true for errors caused by the entrance configuration,
    /// rather than by the node/edge data.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::NoEntrances | Self::UnknownEntranceNode { .. })
    }
}

/// Reasons why [route_to_room](crate::route_to_room) may fail to produce a route.
///
/// These are ordinary outcomes of a query, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The entrance is attached to a node which doesn't exist in the graph.
    #[error("unknown entrance node: {0}")]
    UnknownEntrance(i64),

    /// No node carries the requested room number.
    #[error("room not found: {0}")]
    RoomNotFound(i64),

    /// The room exists, but none of its nodes can be reached from the entrance.
    #[error("room {room} is unreachable from entrance {entrance}")]
    Unreachable { room: i64, entrance: i64 },
}

impl RouteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownEntrance(_) | Self::RoomNotFound(_))
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }
}
