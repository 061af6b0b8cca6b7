// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::data::{self, Options};
use crate::Graph;

/// Summary of a single building [Graph].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub entrances: usize,
}

impl From<&Graph> for GraphStats {
    fn from(g: &Graph) -> Self {
        Self {
            nodes: g.len(),
            edges: g.edge_count(),
            entrances: g.entrances().len(),
        }
    }
}

/// Collection of building [Graphs](Graph), keyed by building id.
///
/// Owned by the caller; independent registries never share any state.
#[derive(Debug, Default, Clone)]
pub struct Registry(BTreeMap<String, Graph>);

impl Registry {
    /// Loads every subdirectory of `root` as a building, using the directory
    /// name as the building id (see [data::load_building]).
    ///
    /// Buildings which fail to load are logged and skipped.
    /// Only failures to list `root` itself are returned.
    pub fn load_dir<P: AsRef<Path>>(root: P, options: &Options) -> io::Result<Self> {
        let mut registry = Self::default();

        let mut dirs = fs::read_dir(root.as_ref())?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect::<Vec<_>>();
        dirs.sort();

        for dir in dirs {
            let Some(id) = dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            match data::load_building(&dir, options) {
                Ok(g) => {
                    log::info!(
                        "loaded building {} ({} nodes, {} edges)",
                        id,
                        g.len(),
                        g.edge_count()
                    );
                    registry.insert(id, g);
                }
                Err(e) => log::error!("failed to load building {}: {}", id, e),
            }
        }

        log::info!("registry holds {} building(s)", registry.len());
        Ok(registry)
    }

    /// Adds or replaces a building graph.
    pub fn insert<S: Into<String>>(&mut self, id: S, g: Graph) {
        self.0.insert(id.into(), g);
    }

    /// Retrieves the graph of the building with the given id.
    pub fn get(&self, id: &str) -> Option<&Graph> {
        self.0.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Returns the number of buildings in the registry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the ids of all buildings, in lexicographical order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns [GraphStats] for every building, keyed by building id.
    pub fn stats(&self) -> BTreeMap<&str, GraphStats> {
        self.0
            .iter()
            .map(|(id, g)| (id.as_str(), GraphStats::from(g)))
            .collect()
    }
}
