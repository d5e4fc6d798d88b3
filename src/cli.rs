use std::path::PathBuf;

use clap::Parser;

use relpath::path_helper::Separator;
use relpath::yaml_output::OutputFormat;
use relpath::Containment;

/// Express file paths relative to a directory beneath a common root.
#[derive(Parser, Debug)]
#[command(name = "relpath", version, about)]
pub struct Cli {
    /// Common root directory; paths outside it stay absolute
    #[arg(short = 'd', long)]
    pub root: PathBuf,

    /// Relativize against the directory containing this file
    #[arg(long, value_name = "FILE")]
    pub from_file: Option<PathBuf>,

    /// Relativize against this directory (default: the root)
    #[arg(long, value_name = "DIR", conflicts_with = "from_file")]
    pub from_dir: Option<PathBuf>,

    /// Paths to relativize
    pub targets: Vec<PathBuf>,

    /// Also relativize files under the root matching this glob (repeatable)
    #[arg(short = 'g', long = "glob", value_name = "GLOB")]
    pub globs: Vec<String>,

    /// Additional directory names to skip while scanning (repeatable)
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Disable built-in exclusions (.git, node_modules, etc.)
    #[arg(long)]
    pub no_defaults: bool,

    /// How to decide whether a path lies beneath the root. `string-prefix`
    /// also accepts siblings such as /proj-other under /proj and panics
    /// (exit 101) when the reference directory is such a sibling
    #[arg(long, value_enum, default_value_t = Containment::Components)]
    pub containment: Containment,

    /// Separator style for emitted paths
    #[arg(long, value_enum, default_value_t = Separator::Native)]
    pub separator: Separator,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        if self.quiet {
            return Some(log::LevelFilter::Error);
        }
        match self.verbose {
            0 => None,
            1 => Some(log::LevelFilter::Info),
            _ => Some(log::LevelFilter::Debug),
        }
    }
}
