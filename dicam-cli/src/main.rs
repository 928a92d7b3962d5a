//! Command-line interface for dicam
//! This binary converts annotated dicam sources into render-plan JSON files
//! that a drawing frontend replays onto a real canvas.
//!
//! Usage:
//!   dicam `<path>` [--out-dir `<dir>`] [--theme `<name>`] [--config `<file>`]

use clap::{Arg, Command};
use dicam_config::{ConfigError, DicamConfig, Loader};
use dicam_parser::parse;
use dicam_render::{DrawOp, RecordingSurface, Renderer};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    let matches = Command::new("dicam")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting dicam grammar-markup files into render plans")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("A .dicam file, or a directory of .dicam files")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .short('o')
                .help("Directory for the generated .json render plans (default: next to each input)"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .short('t')
                .help("Color theme name (e.g., 'default', 'pastel')"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to a TOML configuration file layered over the defaults"),
        )
        .get_matches();

    let path = matches
        .get_one::<String>("path")
        .expect("path is required");
    let out_dir = matches.get_one::<String>("out-dir").map(PathBuf::from);
    let theme = matches.get_one::<String>("theme");
    let config_file = matches.get_one::<String>("config");

    let config = load_config(config_file, theme).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let inputs = discover_inputs(Path::new(path)).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let mut failures = 0usize;
    for input in &inputs {
        match convert_file(input, out_dir.as_deref(), &config) {
            Ok(output) => println!("- converted {}", output.display()),
            Err(e) => {
                eprintln!("Error converting {}: {}", input.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
}

/// The serialized per-document artifact: the wrapped display lines plus the
/// ordered draw calls that paint them.
#[derive(Debug, Serialize)]
struct RenderPlan {
    lines: Vec<String>,
    ops: Vec<DrawOp>,
}

/// Layer CLI settings over the embedded defaults.
fn load_config(
    config_file: Option<&String>,
    theme: Option<&String>,
) -> Result<DicamConfig, ConvertError> {
    let mut loader = Loader::new();
    if let Some(file) = config_file {
        loader = loader.with_file(file);
    }
    if let Some(theme) = theme {
        loader = loader.set_override("theme", theme.as_str())?;
    }
    Ok(loader.build()?)
}

/// Resolve the input path to the ordered list of sources to convert.
fn discover_inputs(path: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut inputs: Vec<PathBuf> = fs::read_dir(path)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "dicam"))
        .collect();
    inputs.sort();

    if inputs.is_empty() {
        return Err(ConvertError::NoInputs(path.to_path_buf()));
    }
    Ok(inputs)
}

/// Convert one source file and write its render plan. Returns the output path.
fn convert_file(
    input: &Path,
    out_dir: Option<&Path>,
    config: &DicamConfig,
) -> Result<PathBuf, ConvertError> {
    let source = fs::read_to_string(input)?;
    let document = parse(&source)?;

    let renderer = Renderer::new(config)?;
    let mut surface = RecordingSurface::new();
    let lines = renderer.render(&mut surface, &document)?;
    let plan = RenderPlan {
        lines,
        ops: surface.into_ops(),
    };

    let stem = input
        .file_stem()
        .ok_or_else(|| ConvertError::NoInputs(input.to_path_buf()))?;
    let output = match out_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            dir.join(stem).with_extension("json")
        }
        None => input.with_extension("json"),
    };
    fs::write(&output, serde_json::to_string_pretty(&plan)?)?;
    Ok(output)
}

/// Anything that can go wrong while converting one source file.
#[derive(Debug)]
enum ConvertError {
    Io(std::io::Error),
    Parse(dicam_parser::DicamError),
    Render(dicam_render::RenderError),
    Config(ConfigError),
    Serialize(serde_json::Error),
    NoInputs(PathBuf),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Io(e) => write!(f, "{}", e),
            ConvertError::Parse(e) => write!(f, "{}", e),
            ConvertError::Render(e) => write!(f, "{}", e),
            ConvertError::Config(e) => write!(f, "{}", e),
            ConvertError::Serialize(e) => write!(f, "{}", e),
            ConvertError::NoInputs(path) => {
                write!(f, "no .dicam files found in {}", path.display())
            }
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<std::io::Error> for ConvertError {
    fn from(e: std::io::Error) -> Self {
        ConvertError::Io(e)
    }
}

impl From<dicam_parser::DicamError> for ConvertError {
    fn from(e: dicam_parser::DicamError) -> Self {
        ConvertError::Parse(e)
    }
}

impl From<dicam_render::RenderError> for ConvertError {
    fn from(e: dicam_render::RenderError) -> Self {
        ConvertError::Render(e)
    }
}

impl From<ConfigError> for ConvertError {
    fn from(e: ConfigError) -> Self {
        ConvertError::Config(e)
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(e: serde_json::Error) -> Self {
        ConvertError::Serialize(e)
    }
}
