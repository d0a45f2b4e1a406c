// sarf-cli: shared utilities for the command-line tools.
//
// Locates the data directory, reads the flat definition files into a
// MorphologyHandle, and writes mutated definitions back through FileSink.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use sarf_engine::{DefinitionSink, EngineConfig, MorphologyHandle};

/// Optional configuration file inside the data directory.
pub const CONFIG_FILE: &str = "sarf.toml";

/// Environment variable naming the data directory.
pub const DATA_PATH_ENV: &str = "SARF_DATA_PATH";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SARF_LOG";

/// Log filter used when `SARF_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Data directory name under `$HOME`.
const HOME_SUBDIR: &str = ".sarf";

/// Data directory name under the current directory.
const LOCAL_SUBDIR: &str = "data";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// File names of the three definition sources, relative to the data
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    pub roots: String,
    pub schemes: String,
    pub transformations: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            roots: "roots.txt".to_string(),
            schemes: "schemes.txt".to_string(),
            transformations: "transformations.txt".to_string(),
        }
    }
}

/// Contents of `sarf.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub files: DataFiles,
    pub engine: EngineConfig,
}

impl CliConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read `sarf.toml` from `dir`, or the defaults when there is none.
    pub fn load(dir: &Path) -> Result<Self, String> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&text).map_err(|e| format!("invalid {}: {}", path.display(), e))
    }
}

/// A located data directory together with its configuration.
#[derive(Debug, Clone)]
pub struct DataDir {
    pub path: PathBuf,
    pub config: CliConfig,
}

impl DataDir {
    /// Open `path` as a data directory, reading its config if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, String> {
        let path = path.into();
        let config = CliConfig::load(&path)?;
        Ok(Self { path, config })
    }

    pub fn roots_path(&self) -> PathBuf {
        self.path.join(&self.config.files.roots)
    }

    pub fn schemes_path(&self) -> PathBuf {
        self.path.join(&self.config.files.schemes)
    }

    pub fn transformations_path(&self) -> PathBuf {
        self.path.join(&self.config.files.transformations)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Search for the data directory and build a handle from its files.
///
/// Search order:
/// 1. `data_dir` argument (if provided)
/// 2. `SARF_DATA_PATH` environment variable
/// 3. `~/.sarf`
/// 4. `./data`
/// 5. Current working directory
///
/// The first directory containing the schemes file wins.
pub fn load_handle(data_dir: Option<&str>) -> Result<MorphologyHandle, String> {
    let dir = locate_data_dir(data_dir)?;
    open_handle(&dir)
}

/// Find the first search path that holds a schemes file.
pub fn locate_data_dir(data_dir: Option<&str>) -> Result<DataDir, String> {
    let search_paths = build_search_paths(data_dir);

    for path in &search_paths {
        if !path.is_dir() {
            continue;
        }
        let dir = DataDir::open(path)?;
        if dir.schemes_path().is_file() {
            tracing::debug!(path = %dir.path.display(), "using data directory");
            return Ok(dir);
        }
    }

    Err(format!(
        "could not find a schemes file in any of the search paths:\n{}",
        search_paths
            .iter()
            .map(|p| format!("  - {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

/// Build a handle from the files of `dir`, persisting mutations back into
/// the same files.
///
/// The schemes file is required. Missing roots or transformation files
/// leave those stores empty.
pub fn open_handle(dir: &DataDir) -> Result<MorphologyHandle, String> {
    let schemes = read_lines(&dir.schemes_path())?;
    let roots = read_optional_lines(&dir.roots_path())?;
    let transformations = read_optional_lines(&dir.transformations_path())?;

    let mut handle = MorphologyHandle::new(&dir.config.engine, Box::new(FileSink::new(dir)));
    handle.load_roots(roots);
    handle.load_schemes(schemes);
    handle.load_transformations(transformations);
    Ok(handle)
}

/// Read a UTF-8 definition file into lines, dropping a leading byte order
/// mark.
pub fn read_lines(path: &Path) -> Result<Vec<String>, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    Ok(text.lines().map(str::to_string).collect())
}

fn read_optional_lines(path: &Path) -> Result<Vec<String>, String> {
    if !path.is_file() {
        tracing::info!(path = %path.display(), "definition file not found; starting empty");
        return Ok(Vec::new());
    }
    read_lines(path)
}

/// Build the list of directories to search for definition files.
fn build_search_paths(data_dir: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. Explicit path from argument
    if let Some(p) = data_dir {
        paths.push(PathBuf::from(p));
    }

    // 2. SARF_DATA_PATH environment variable
    if let Ok(env_path) = std::env::var(DATA_PATH_ENV) {
        paths.push(PathBuf::from(env_path));
    }

    // 3. Home directory
    if let Some(home) = home_dir() {
        paths.push(home.join(HOME_SUBDIR));
    }

    // 4-5. Local development layouts
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(LOCAL_SUBDIR));
        paths.push(cwd);
    }

    paths
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Sink that rewrites the scheme and transformation files in place.
///
/// Each store writes the full line set to a sibling temporary file and
/// renames it over the target, so readers never see a partial file.
#[derive(Debug, Clone)]
pub struct FileSink {
    schemes: PathBuf,
    transformations: PathBuf,
}

impl FileSink {
    pub fn new(dir: &DataDir) -> Self {
        Self::with_paths(dir.schemes_path(), dir.transformations_path())
    }

    pub fn with_paths(schemes: impl Into<PathBuf>, transformations: impl Into<PathBuf>) -> Self {
        Self {
            schemes: schemes.into(),
            transformations: transformations.into(),
        }
    }
}

impl DefinitionSink for FileSink {
    fn store_schemes(&mut self, lines: &[String]) -> io::Result<()> {
        write_lines(&self.schemes, lines)
    }

    fn store_transformations(&mut self, lines: &[String]) -> io::Result<()> {
        write_lines(&self.transformations, lines)
    }
}

fn write_lines(path: &Path, lines: &[String]) -> io::Result<()> {
    let mut contents = lines.join("\n");
    if !lines.is_empty() {
        contents.push('\n');
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), lines = lines.len(), "definitions written");
    Ok(())
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

/// Parse a `--data-dir=PATH`, `--data-dir PATH` or `-d PATH` argument from
/// command line args.
///
/// Returns `(data_dir, remaining_args)`.
pub fn parse_data_dir(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut data_dir = None;
    let mut remaining = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix("--data-dir=") {
            data_dir = Some(val.to_string());
        } else if arg == "--data-dir" || arg == "-d" {
            match args.get(i + 1) {
                Some(val) => {
                    data_dir = Some(val.clone());
                    skip_next = true;
                }
                None => fatal(&format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (data_dir, remaining)
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

/// Install a stderr subscriber filtered by `SARF_LOG` (default `warn`).
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
