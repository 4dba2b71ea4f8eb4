// lints
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quadmap::{AreaId, Color, Delta, Map, MapId, Raster};
use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quadmap")]
#[command(about = "Edit versioned quad-tree area maps stored as JSON files")]
struct Args {
    /// map file to work on
    map: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty map file
    New {
        #[arg(long, default_value_t = 0)]
        id: MapId,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Print the map as JSON
    Show {
        /// include every layer's grid and delta log
        #[arg(long)]
        full: bool,
    },
    /// Print a layer's grid, one node per line
    Tree {
        layer: AreaId,
        /// only replay deltas up to this time
        #[arg(long)]
        time: Option<f64>,
    },
    /// Append an empty layer and print its id
    AddLayer { description: String },
    /// Add a legend entry to a layer and print its id
    AddData {
        layer: AreaId,
        description: String,
        /// `#rrggbb`
        color: Color,
    },
    /// Insert a delta, given as a JSON tree with `null` for untouched regions
    AddDelta {
        layer: AreaId,
        time: f64,
        delta: String,
    },
    /// Print the delta that would undo the given one, without applying it
    Undo { layer: AreaId, delta: String },
    /// Draw a layer in its legend colors as a binary PPM image
    Render {
        layer: AreaId,
        out: PathBuf,
        #[arg(long, default_value_t = 256)]
        side: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_env_filter(EnvFilter::from_default_env())
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let stdout = io::stdout();
    run(&args.map, args.command, &mut stdout.lock())
}

fn run(path: &Path, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::New { id, description } => {
            let map = Map::new(id, description);
            map.save(Some(path))
                .with_context(|| format!("writing {}", path.display()))?;
            info!(map = id, path = %path.display(), "created map");
        }
        Command::Show { full } => {
            let map = load(path)?;
            serde_json::to_writer_pretty(&mut *out, &map.to_json(full)?)?;
            writeln!(out)?;
        }
        Command::Tree { layer, time } => {
            let map = load(path)?;
            let layer = map.area_layer(layer)?;
            match time {
                Some(time) => write!(out, "{}", layer.tree_at(time))?,
                None => write!(out, "{}", layer.tree())?,
            }
        }
        Command::AddLayer { description } => {
            let mut map = load(path)?;
            let id = map.add_area_layer(description);
            map.save(None)?;
            writeln!(out, "{id}")?;
        }
        Command::AddData {
            layer,
            description,
            color,
        } => {
            let mut map = load(path)?;
            let id = map.area_layer_mut(layer)?.insert_data(description, color);
            map.save(None)?;
            writeln!(out, "{id}")?;
        }
        Command::AddDelta { layer, time, delta } => {
            let delta = parse_delta(&delta)?;
            let mut map = load(path)?;
            let index = map.area_layer_mut(layer)?.add_delta(time, delta)?;
            map.save(None)?;
            writeln!(out, "{index}")?;
        }
        Command::Undo { layer, delta } => {
            let delta = parse_delta(&delta)?;
            let map = load(path)?;
            let undo = map.area_layer(layer)?.reversal(&delta);
            writeln!(out, "{}", undo.to_json_string()?)?;
        }
        Command::Render {
            layer,
            out: image,
            side,
        } => {
            let map = load(path)?;
            let raster = map.area_layer(layer)?.render(side);
            let file =
                File::create(&image).with_context(|| format!("creating {}", image.display()))?;
            let mut writer = BufWriter::new(file);
            write_ppm(&raster, &mut writer)?;
            writer.flush()?;
            info!(path = %image.display(), side, "rendered layer");
        }
    }
    Ok(())
}

fn load(path: &Path) -> Result<Map> {
    Map::load(path).with_context(|| format!("reading {}", path.display()))
}

fn parse_delta(src: &str) -> Result<Delta<u64>> {
    Delta::from_json_str(src).with_context(|| format!("parsing delta {src}"))
}

fn write_ppm(raster: &Raster, out: &mut impl Write) -> io::Result<()> {
    let side = raster.side();
    write!(out, "P6\n{side} {side}\n255\n")?;
    for color in raster.pixels() {
        out.write_all(&color.to_array())?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use std::fs;
    use std::path::Path;

    use clap::{CommandFactory, Parser};
    use quadmap::{Color, Map, QuadTree};

    use crate::{run, Args, Command};

    #[test]
    fn parse_args() {
        Args::command().debug_assert();
        let args = Args::try_parse_from(["quadmap", "m.json", "add-data", "0", "red", "#ff0000"]).unwrap();
        assert_eq!(args.map, Path::new("m.json"));
        assert!(matches!(
            args.command,
            Command::AddData { layer: 0, color, .. } if color == Color::new(255, 0, 0)
        ));
        assert!(Args::try_parse_from(["quadmap", "m.json", "add-data", "0", "red", "ff0000"]).is_err());
    }

    fn exec(path: &Path, command: Command) -> String {
        let mut out = Vec::new();
        run(path, command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn edit_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        exec(
            &path,
            Command::New {
                id: 3,
                description: "world".into(),
            },
        );
        let layer = exec(
            &path,
            Command::AddLayer {
                description: "claims".into(),
            },
        );
        assert_eq!(layer, "0\n");
        let data = exec(
            &path,
            Command::AddData {
                layer: 0,
                description: "unclaimed".into(),
                color: Color::WHITE,
            },
        );
        assert_eq!(data, "0\n");
        let delta = "[null,[null],[1],[null],[null]]".to_string();
        let undo = exec(
            &path,
            Command::Undo {
                layer: 0,
                delta: delta.clone(),
            },
        );
        assert_eq!(undo, "[null,[null],[0],[null],[null]]\n");
        let index = exec(
            &path,
            Command::AddDelta {
                layer: 0,
                time: 1.0,
                delta,
            },
        );
        assert_eq!(index, "0\n");

        let map = Map::load(&path).unwrap();
        let mut expected = QuadTree::new(0);
        expected.set(1, 0, 1, 1);
        assert_eq!(map.area_layer(0).unwrap().tree(), &expected);

        let tree = exec(&path, Command::Tree { layer: 0, time: Some(0.0) });
        assert_eq!(tree, "=== Tree ===\n0 (0, 0)\n");
    }

    #[test]
    fn render_ppm() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        let image = dir.path().join("layer.ppm");
        let mut map = Map::new(0, "");
        let layer = map.add_area_layer("");
        map.area_layer_mut(layer)
            .unwrap()
            .insert_data("", Color::new(1, 2, 3));
        map.save(Some(path.as_path())).unwrap();

        exec(
            &path,
            Command::Render {
                layer,
                out: image.clone(),
                side: 2,
            },
        );
        let bytes = fs::read(&image).unwrap();
        let (header, pixels) = bytes.split_at(11);
        assert_eq!(header, b"P6\n2 2\n255\n");
        assert_eq!(pixels, [1, 2, 3].repeat(4));
    }

    #[test]
    fn missing_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        Map::new(0, "").save(Some(path.as_path())).unwrap();
        let mut out = Vec::new();
        let err = run(&path, Command::Tree { layer: 4, time: None }, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "area layer 4 not found");
    }
}
