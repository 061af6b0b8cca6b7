// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Indoor wayfinding over building floor-connectivity graphs.
//!
//! A building is described by three collections of records: [Nodes](Node)
//! (room doors, corridor junctions, stair landings), [EdgeRecords](EdgeRecord)
//! (undirected, weighted walkable segments) and [Entrances](Entrance).
//! These are assembled into an immutable [Graph], over which
//! [Dijkstra's algorithm](shortest_path) finds the cheapest walk between two nodes.
//! [route_to_room] resolves a room number to its door nodes and picks the cheapest
//! route from an entrance, possibly spanning multiple floors.
//!
//! # Example
//!
//! ```no_run
//! let g = wayfind::data::load_building(
//!     "path/to/library",
//!     &wayfind::data::Options::default(),
//! ).expect("failed to load the library graph");
//!
//! let entrance = &g.entrances()[0];
//! match wayfind::route_to_room(&g, entrance, 2312) {
//!     Ok(route) => {
//!         for floor in route.floors() {
//!             println!("Floor {}: {:?}", floor, route.on_floor(floor).map(|n| n.id).collect::<Vec<_>>());
//!         }
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod data;
mod dijkstra;
mod distance;
mod error;
pub mod floor;
mod graph;
mod registry;
mod router;

pub use dijkstra::{shortest_path, ShortestPath};
pub use distance::earth_distance;
pub use error::{BuildError, RouteError};
pub use graph::Graph;
pub use registry::{GraphStats, Registry};
pub use router::{route_to_room, route_to_room_from_default, route_to_room_near, RoomRoute};

use serde::{Deserialize, Serialize};

/// Represents a point in the walkable network of a [Graph].
///
/// Nodes without a `floor` are cross-floor connectors (e.g. stair landings
/// spanning a transition) or are unclassified. Several nodes may share
/// the same `room_num` - a room with more than one door.
///
/// Coordinates are kept exactly as provided; no axis flips or other
/// transformations are ever applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: i64,

    #[serde(rename = "type", default)]
    pub kind: Option<i64>,

    #[serde(default)]
    pub room_num: Option<i64>,

    #[serde(default)]
    pub floor: Option<i64>,

    #[serde(default)]
    pub connector_id: Option<i64>,

    #[serde(default)]
    pub name: Option<String>,

    pub x: f64,
    pub y: f64,
}

impl Node {
    /// Creates a bare node at the given position, with no floor or room metadata.
    pub fn new(id: i64, x: f64, y: f64) -> Self {
        Self {
            id,
            kind: None,
            room_num: None,
            floor: None,
            connector_id: None,
            name: None,
            x,
            y,
        }
    }

    pub fn with_floor(mut self, floor: i64) -> Self {
        self.floor = Some(floor);
        self
    }

    pub fn with_room(mut self, room_num: i64) -> Self {
        self.room_num = Some(room_num);
        self
    }
}

/// Raw description of an undirected connection between two [Nodes](Node),
/// as consumed by [Graph::build].
///
/// `weight` must be non-negative; zero-weight edges (co-located nodes) are fine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: i64,
    pub from_id: i64,
    pub to_id: i64,
    pub weight: f64,

    #[serde(default)]
    pub floor: Option<i64>,
}

impl EdgeRecord {
    pub fn new(id: i64, from_id: i64, to_id: i64, weight: f64) -> Self {
        Self {
            id,
            from_id,
            to_id,
            weight,
            floor: None,
        }
    }
}

/// Represents an outgoing connection from a specific [Node] in a [Graph].
///
/// Every [EdgeRecord] is stored as two of those, one in each direction,
/// both with the same cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: i64,
    pub cost: f64,
    pub floor: Option<i64>,

    /// Position of `to` in the graph's node arena.
    pub(crate) to_idx: usize,
}

/// A building access point, attached to a specific [Node].
///
/// `lat` and `lng` are geographic coordinates, unrelated to node `x` and `y`;
/// they are only used for picking the [nearest entrance](Graph::find_nearest_entrance).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entrance {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub node: i64,
}
