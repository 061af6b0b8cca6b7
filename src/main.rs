use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::json;
use wayfind;

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] wayfind::data::LoadError);

#[derive(Parser)]
struct Cli {
    /// The directory with nodes, edges and entrances of a building
    building_dir: PathBuf,

    /// Number of the destination room
    room: i64,

    /// Id of the entrance to start from (defaults to the first entrance)
    #[arg(long, conflicts_with = "near")]
    entrance: Option<i64>,

    /// Start from the entrance closest to the given latitude and longitude
    #[arg(long, num_args = 2, value_names = ["LAT", "LNG"], allow_negative_numbers = true)]
    near: Option<Vec<f64>>,

    /// Only output the part of the route on the given floor
    #[arg(long)]
    floor: Option<i64>,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let g = load_graph(&cli.building_dir)?;

    let route = match (cli.entrance, cli.near.as_deref()) {
        (Some(id), _) => {
            let entrance = g
                .find_entrance(id)
                .ok_or_else(|| format!("no entrance with id {}", id))?;
            wayfind::route_to_room(&g, entrance, cli.room)?
        }
        (None, Some(&[lat, lng])) => wayfind::route_to_room_near(&g, lat, lng, cli.room)?,
        _ => wayfind::route_to_room_from_default(&g, cli.room)?,
    };

    let nodes: Vec<&wayfind::Node> = match cli.floor {
        Some(floor) => route.on_floor(floor).collect(),
        None => route.nodes.iter().collect(),
    };

    let collection = json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {
                "room": cli.room,
                "entrance": route.entrance.name,
                "cost": route.cost,
                "floor": cli.floor,
                "nodes": nodes.iter().map(|n| n.id).collect::<Vec<_>>(),
            },
            "geometry": {
                "type": "LineString",
                "coordinates": nodes.iter().map(|n| [n.x, n.y]).collect::<Vec<_>>(),
            },
        }],
    });

    println!("{}", serde_json::to_string_pretty(&collection)?);
    Ok(())
}

fn load_graph<P: AsRef<Path>>(path: P) -> Result<wayfind::Graph, GraphLoadError> {
    let options = wayfind::data::Options::default();
    match wayfind::data::load_building(path.as_ref(), &options) {
        Ok(g) => Ok(g),
        Err(e) => Err(GraphLoadError(PathBuf::from(path.as_ref()), e)),
    }
}
