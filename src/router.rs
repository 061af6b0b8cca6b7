// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::{floor, shortest_path, Entrance, Graph, Node, RouteError, ShortestPath};

/// Cheapest route from an [Entrance] to a room, as found by [route_to_room].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomRoute {
    pub entrance: Entrance,

    /// Resolved nodes, from the entrance's node to the room's node, both inclusive.
    pub nodes: Vec<Node>,

    /// Sum of the weights of all traversed edges.
    pub cost: f64,
}

impl RoomRoute {
    /// Returns the ids of all nodes on the route.
    pub fn ids(&self) -> Vec<i64> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    /// Returns the last node of the route - the chosen door of the room.
    pub fn destination(&self) -> Option<&Node> {
        self.nodes.last()
    }

    /// Returns the nodes of the route which lie on the given floor, in route order.
    pub fn on_floor(&self, floor: i64) -> impl Iterator<Item = &Node> {
        floor::nodes_on_floor(&self.nodes, floor)
    }

    /// Returns the distinct floors visited by the route, in the order of first visit.
    pub fn floors(&self) -> Vec<i64> {
        floor::floors_visited(&self.nodes)
    }
}

/// Finds the cheapest route from `entrance` to any node of the room with the given number.
///
/// Every node carrying `room_num` is a candidate (a room may have multiple doors).
/// The candidate with the lowest total route cost wins; among equally cheap candidates,
/// the one appearing first in the graph wins. Candidates which can't be reached are skipped.
///
/// Returns [RouteError::RoomNotFound] if no node carries `room_num`, and
/// [RouteError::Unreachable] if no candidate can be reached from the entrance.
pub fn route_to_room(g: &Graph, entrance: &Entrance, room_num: i64) -> Result<RoomRoute, RouteError> {
    if g.get_node(entrance.node).is_none() {
        return Err(RouteError::UnknownEntrance(entrance.node));
    }

    let candidates = g.find_nodes_by_room(room_num);
    if candidates.is_empty() {
        return Err(RouteError::RoomNotFound(room_num));
    }

    let mut best: Option<ShortestPath> = None;
    for candidate in candidates {
        match shortest_path(g, entrance.node, candidate.id) {
            Some(path) => {
                if best.as_ref().map_or(true, |b| path.cost < b.cost) {
                    best = Some(path);
                }
            }
            None => log::debug!(
                "room {}: candidate node {} unreachable from entrance {}",
                room_num,
                candidate.id,
                entrance.id,
            ),
        }
    }

    let best = best.ok_or(RouteError::Unreachable {
        room: room_num,
        entrance: entrance.id,
    })?;

    log::debug!(
        "room {}: routed from entrance {} through {} nodes, cost {}",
        room_num,
        entrance.id,
        best.ids.len(),
        best.cost,
    );

    Ok(RoomRoute {
        entrance: entrance.clone(),
        nodes: best
            .ids
            .iter()
            .filter_map(|&id| g.get_node(id).cloned())
            .collect(),
        cost: best.cost,
    })
}

/// Same as [route_to_room], starting from the first entrance of the graph.
pub fn route_to_room_from_default(g: &Graph, room_num: i64) -> Result<RoomRoute, RouteError> {
    // Graph::build guarantees at least one entrance
    let entrance = &g.entrances()[0];
    route_to_room(g, entrance, room_num)
}

/// Same as [route_to_room], starting from the entrance closest to
/// the given geographic position.
pub fn route_to_room_near(
    g: &Graph,
    lat: f64,
    lng: f64,
    room_num: i64,
) -> Result<RoomRoute, RouteError> {
    let entrance = g
        .find_nearest_entrance(lat, lng)
        .unwrap_or(&g.entrances()[0]);
    route_to_room(g, entrance, room_num)
}
