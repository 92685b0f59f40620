use std::fs;
use std::str::FromStr;

use docopt::Docopt;
use log::info;
use mazebuilder::factory::Algorithm;
use mazebuilder::maze::{self, Maze, MazeConfig};
use serde_derive::Deserialize;

const USAGE: &str = "Mazebuilder

Usage:
    mazebuilder_driver -h | --help
    mazebuilder_driver --version
    mazebuilder_driver batch <config-file> [--output=<path>] [--pretty=<n>]
    mazebuilder_driver [binary|sidewinder|dfs] [--rows=<r>] [--columns=<c>] [--height=<h>] [--seed=<s>] [--distances] [--block-id=<b>] [--format=<f>] [--cell-pixels=<n>] [--pretty=<n>] [--output=<path>] [--show-path]

Options:
    -h --help            Show this screen.
    --version            Show the version.
    --rows=<r>           Number of cell rows [default: 10].
    --columns=<c>        Number of cell columns [default: 10].
    --height=<h>         Levels of blocks in the 3D export [default: 1].
    --seed=<s>           Seed of the random engine [default: 0].
    --distances          Show distances from the north west cell, as base 36 text or background colour.
    --block-id=<b>       Block type written to the 3D geometry [default: 1].
    --format=<f>         One of text, text64, obj, obj64, json, png [default: text].
    --cell-pixels=<n>    Side of one cell in pixels for png output [default: 10].
    --pretty=<n>         Spaces per indentation level of json output, 0 is compact [default: 0].
    --output=<path>      Write to this file instead of stdout. Required for png.
    --show-path          Mark the longest path through the maze in text output.
";

#[derive(Debug, Deserialize)]
struct Args {
    cmd_batch: bool,
    arg_config_file: String,
    cmd_binary: bool,
    cmd_sidewinder: bool,
    cmd_dfs: bool,
    flag_rows: usize,
    flag_columns: usize,
    flag_height: usize,
    flag_seed: u64,
    flag_distances: bool,
    flag_block_id: i32,
    flag_format: String,
    flag_cell_pixels: u32,
    flag_pretty: usize,
    flag_output: Option<String>,
    flag_show_path: bool,
}

mod errors {
    use error_chain::error_chain;

    error_chain! {
        links {
            Maze(::mazebuilder::errors::Error, ::mazebuilder::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }

        errors {
            UnknownFormat(name: String) {
                description("unknown output format")
                display("unknown output format '{}'", name)
            }
        }
    }
}
use crate::errors::*;
use error_chain::bail;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Format {
    Text,
    Text64,
    Obj,
    Obj64,
    Json,
    Png,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Format> {
        match s {
            "text" => Ok(Format::Text),
            "text64" => Ok(Format::Text64),
            "obj" => Ok(Format::Obj),
            "obj64" => Ok(Format::Obj64),
            "json" => Ok(Format::Json),
            "png" => Ok(Format::Png),
            _ => bail!(ErrorKind::UnknownFormat(s.to_string())),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let version = Some(format!("mazebuilder_driver {}", env!("CARGO_PKG_VERSION")));
    let args: Args = match Docopt::new(USAGE).and_then(|d| d.version(version).deserialize()) {
        Ok(args) => args,
        Err(e) if e.fatal() => return Err(e.into()),
        Err(e) => e.exit(),
    };

    if args.cmd_batch {
        run_batch(&args)
    } else {
        run_single(&args)
    }
}

fn algorithm_from_args(args: &Args) -> Algorithm {
    if args.cmd_sidewinder {
        Algorithm::Sidewinder
    } else if args.cmd_dfs {
        Algorithm::Dfs
    } else {
        Algorithm::BinaryTree
    }
}

fn run_single(args: &Args) -> Result<()> {
    let format = Format::from_str(&args.flag_format)?;
    if format == Format::Png && args.flag_output.is_none() {
        bail!("png output needs an --output file");
    }

    let config = MazeConfig::default()
        .rows(args.flag_rows)
        .columns(args.flag_columns)
        .height(args.flag_height)
        .seed(args.flag_seed)
        .algorithm(algorithm_from_args(args))
        .distances(args.flag_distances)
        .block_id(args.flag_block_id);
    let mut maze = Maze::new(config);
    maze.init()?;

    let output = args.flag_output.as_ref().map(String::as_str);
    match format {
        Format::Text if args.flag_show_path => write_output(&maze.to_path_str(), output),
        Format::Text => write_output(&maze.to_str(), output),
        Format::Text64 => write_output(&maze.to_str64(), output),
        Format::Obj => write_output(&maze.to_wavefront_obj_str(), output),
        Format::Obj64 => write_output(&maze.to_wavefront_obj_str64(), output),
        Format::Json => write_output(&maze.to_json_str(args.flag_pretty)?, output),
        Format::Png => {
            let path = output.ok_or("png output needs an --output file")?;
            maze.save_png(args.flag_cell_pixels, path)
                .chain_err(|| format!("Failed to write maze image {}", path))?;
            Ok(())
        }
    }
}

fn run_batch(args: &Args) -> Result<()> {
    let input = fs::read_to_string(&args.arg_config_file)
        .chain_err(|| format!("Failed to read batch file {}", args.arg_config_file))?;
    let configs = maze::parse_configs(&input)?;

    // Failed mazes are still exported, `init` has logged why.
    let mazes: Vec<Maze> = configs.into_iter()
        .map(|config| {
            let mut maze = Maze::new(config);
            let _ = maze.init();
            maze
        })
        .collect();
    let generated = mazes.iter().filter(|m| m.is_generated()).count();
    info!("batch: generated {} of {} mazes", generated, mazes.len());

    let json = maze::to_json_array_str(&mazes, args.flag_pretty)?;
    write_output(&json, args.flag_output.as_ref().map(String::as_str))
}

fn write_output(data: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, data).chain_err(|| format!("Failed to write maze to {}", path))?;
            info!("wrote {} bytes to {}", data.len(), path);
        }
        None => print!("{}", data),
    }
    Ok(())
}
