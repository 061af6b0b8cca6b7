// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading of building records (nodes, edges and entrances) from JSON files.
//!
//! A building directory contains three files: `nodes.json`, `edges.json` and
//! `entrances.json`, each holding an array of the corresponding records.
//! Any of them may be gzip- or bzip2-compressed (`nodes.json.gz`, `nodes.json.bz2`).

use std::fs::File;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::{BuildError, EdgeRecord, Entrance, Graph, Node};

/// Format of the input record files
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    /// (or, when loading a building directory, based on which files exist)
    #[default]
    Unknown,

    /// Force uncompressed JSON
    Json,

    /// Force JSON with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    JsonGz,

    /// Force JSON with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    JsonBz2,
}

impl FileFormat {
    const KNOWN: [FileFormat; 3] = [Self::Json, Self::JsonGz, Self::JsonBz2];

    /// Returns the file name extension used by this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown | Self::Json => "json",
            Self::JsonGz => "json.gz",
            Self::JsonBz2 => "json.bz2",
        }
    }

    /// Guesses the format from the first bytes of the data.
    pub fn detect(head: &[u8]) -> Self {
        if head.starts_with(&[0x1F, 0x8B]) {
            Self::JsonGz
        } else if head.starts_with(b"BZh") {
            Self::JsonBz2
        } else {
            Self::Json
        }
    }
}

/// Additional controls for loading building records.
#[derive(Debug, Default, Clone)]
pub struct Options {
    /// Format of the input files.
    pub file_format: FileFormat,
}

/// Error conditions which may occur when loading a building.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{0}: {1}")]
    Io(PathBuf, #[source] io::Error),

    #[error("{0}: {1}")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("{0}: no {1} file")]
    MissingFile(PathBuf, &'static str),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Parse records from a reader, as per the provided [FileFormat].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn records_from_io<T: DeserializeOwned, R: io::Read>(
    reader: R,
    file_format: FileFormat,
) -> Result<Vec<T>, serde_json::Error> {
    let mut b = io::BufReader::new(reader);

    let file_format = match file_format {
        FileFormat::Unknown => FileFormat::detect(b.fill_buf().map_err(serde_json::Error::io)?),
        f => f,
    };
    log::trace!("reading records as {:?}", file_format);

    match file_format {
        FileFormat::Unknown | FileFormat::Json => serde_json::from_reader(b),

        FileFormat::JsonGz => {
            let d = flate2::read::MultiGzDecoder::new(b);
            serde_json::from_reader(io::BufReader::new(d))
        }

        FileFormat::JsonBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(b);
            serde_json::from_reader(io::BufReader::new(d))
        }
    }
}

/// Parse records from a static buffer, as per the provided [FileFormat].
pub fn records_from_buffer<T: DeserializeOwned>(
    data: &[u8],
    file_format: FileFormat,
) -> Result<Vec<T>, serde_json::Error> {
    match file_format {
        // Fast path is available for in-memory JSON data
        FileFormat::Json => serde_json::from_slice(data),
        FileFormat::Unknown if FileFormat::detect(data) == FileFormat::Json => {
            serde_json::from_slice(data)
        }

        // Wrap the buffer in a cursor and use the IO path
        _ => records_from_io(io::Cursor::new(data), file_format),
    }
}

/// Parse records from a file at the provided path, as per the provided [Options].
pub fn records_from_file<T: DeserializeOwned, P: AsRef<Path>>(
    path: P,
    options: &Options,
) -> Result<Vec<T>, LoadError> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    records_from_io(f, options.file_format).map_err(|e| LoadError::Json(path.to_path_buf(), e))
}

/// Loads `nodes`, `edges` and `entrances` records from a building directory
/// and assembles them into a [Graph].
pub fn load_building<P: AsRef<Path>>(dir: P, options: &Options) -> Result<Graph, LoadError> {
    let dir = dir.as_ref();
    let nodes: Vec<Node> = records_from_file(find_file(dir, "nodes", options)?, options)?;
    let edges: Vec<EdgeRecord> = records_from_file(find_file(dir, "edges", options)?, options)?;
    let entrances: Vec<Entrance> =
        records_from_file(find_file(dir, "entrances", options)?, options)?;

    Ok(Graph::build(nodes, edges, entrances)?)
}

fn find_file(dir: &Path, name: &'static str, options: &Options) -> Result<PathBuf, LoadError> {
    let candidates: &[FileFormat] = match options.file_format {
        FileFormat::Unknown => &FileFormat::KNOWN[..],
        ref f => std::slice::from_ref(f),
    };

    candidates
        .iter()
        .map(|f| dir.join(format!("{}.{}", name, f.extension())))
        .find(|path| path.is_file())
        .ok_or_else(|| LoadError::MissingFile(dir.to_path_buf(), name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route_to_room;

    const NODES: &[u8] = include_bytes!("test_fixtures/library/nodes.json");
    const EDGES: &[u8] = include_bytes!("test_fixtures/library/edges.json");
    const NODES_GZ: &[u8] = include_bytes!("test_fixtures/library-compressed/nodes.json.gz");
    const EDGES_BZ2: &[u8] = include_bytes!("test_fixtures/library-compressed/edges.json.bz2");

    fn fixtures_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("src/data/test_fixtures")
    }

    fn check_library_graph(g: &Graph) {
        //  floor 1                       floor 2
        //  0 ─10─ 1 ─10─ 2 ─2─ 4 ─2─ 5 ─10─ 6 ─5─ 7 (room 2312)
        //         │   (connector)    └──7.07── 8 (room 2312)
        //         5                  9 (room 2400, no edges)
        //         3 (room 1101)
        assert_eq!(g.len(), 10);
        assert_eq!(g.edge_count(), 8);
        assert_eq!(g.entrances().len(), 2);

        let stairs = g.get_node(4).unwrap();
        assert_eq!(stairs.floor, None);
        assert_eq!(stairs.kind, Some(3));
        assert_eq!(stairs.connector_id, Some(1));
        assert_eq!(stairs.name.as_deref(), Some("Main Stairs"));

        let lobby = g.get_node(0).unwrap();
        assert_eq!(lobby.y, 0.0);
        assert_eq!(g.get_node(3).unwrap().y, -5.0);
        assert_eq!(g.get_node(3).unwrap().room_num, Some(1101));
    }

    #[test]
    fn detect_format() {
        assert_eq!(FileFormat::detect(NODES), FileFormat::Json);
        assert_eq!(FileFormat::detect(NODES_GZ), FileFormat::JsonGz);
        assert_eq!(FileFormat::detect(EDGES_BZ2), FileFormat::JsonBz2);
        assert_eq!(FileFormat::detect(b""), FileFormat::Json);
    }

    #[test]
    fn parse_from_buffer() {
        let nodes: Vec<Node> = records_from_buffer(NODES, FileFormat::Json).unwrap();
        assert_eq!(nodes.len(), 10);
        assert_eq!(nodes[0].id, 0);

        let edges: Vec<EdgeRecord> = records_from_buffer(EDGES, FileFormat::Unknown).unwrap();
        assert_eq!(edges.len(), 8);
        assert_eq!(edges[0].from_id, 0);
        assert_eq!(edges[0].to_id, 1);
        assert_eq!(edges[0].floor, Some(1));
    }

    #[test]
    fn parse_compressed_from_buffer() {
        let plain: Vec<Node> = records_from_buffer(NODES, FileFormat::Json).unwrap();

        let gz: Vec<Node> = records_from_buffer(NODES_GZ, FileFormat::JsonGz).unwrap();
        assert_eq!(gz, plain);

        let guessed: Vec<Node> = records_from_buffer(NODES_GZ, FileFormat::Unknown).unwrap();
        assert_eq!(guessed, plain);

        let edges: Vec<EdgeRecord> = records_from_buffer(EDGES_BZ2, FileFormat::Unknown).unwrap();
        assert_eq!(edges.len(), 8);
    }

    #[test]
    fn parse_from_io() {
        let nodes: Vec<Node> =
            records_from_io(io::Cursor::new(NODES_GZ), FileFormat::Unknown).unwrap();
        assert_eq!(nodes.len(), 10);
    }

    #[test]
    fn malformed_records() {
        let r: Result<Vec<Node>, _> = records_from_buffer(b"[{\"id\": 1}]", FileFormat::Json);
        assert!(r.is_err());

        let r: Result<Vec<Node>, _> = records_from_buffer(NODES, FileFormat::JsonGz);
        assert!(r.is_err());
    }

    #[test]
    fn load_plain_building() {
        let g = load_building(fixtures_dir().join("library"), &Options::default()).unwrap();
        check_library_graph(&g);

        let route = route_to_room(&g, &g.entrances()[0], 2312).unwrap();
        assert_eq!(route.ids(), vec![0, 1, 2, 4, 5, 8]);
        assert!((route.cost - 31.07).abs() < 1e-9);
        assert_eq!(route.floors(), vec![1, 2]);
    }

    #[test]
    fn load_compressed_building() {
        let g = load_building(fixtures_dir().join("library-compressed"), &Options::default())
            .unwrap();
        check_library_graph(&g);
    }

    #[test]
    fn forced_format_requires_matching_files() {
        let options = Options {
            file_format: FileFormat::JsonBz2,
        };
        let err = load_building(fixtures_dir().join("library"), &options).unwrap_err();
        assert!(matches!(err, LoadError::MissingFile(_, "nodes")));
    }

    #[test]
    fn missing_directory() {
        let err = load_building(fixtures_dir().join("does-not-exist"), &Options::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingFile(_, "nodes")));
    }

    #[test]
    fn building_without_entrances() {
        let err = load_building(fixtures_dir().join("no-entrances"), &Options::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::Build(BuildError::NoEntrances)));
    }
}
