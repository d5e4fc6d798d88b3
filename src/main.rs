mod cli;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use relpath::canonical;
use relpath::error::{CliError, CliResult};
use relpath::exclusion::ExclusionFilter;
use relpath::models::{FileEntry, MetaInfo, OutputEnvelope};
use relpath::patterns::PatternSet;
use relpath::scanner;
use relpath::yaml_output::{self, OutputFormat};
use relpath::RelativeFileNameTransformer;

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let args = cli::Cli::parse();
    init_logging(&args);

    let format = args.format;
    match execute(args) {
        Ok(envelope) => emit(&envelope, format, 0),
        Err(e) => {
            log::error!("{}", e);
            emit(&OutputEnvelope::failure(e), format, 1)
        }
    }
}

fn init_logging(args: &cli::Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = args.log_level() {
        builder.filter_level(level);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn emit(envelope: &OutputEnvelope, format: OutputFormat, code: i32) -> i32 {
    match yaml_output::write_output(envelope, format) {
        Ok(()) => code,
        Err(e) => {
            log::error!("{}", CliError::from(e));
            1
        }
    }
}

fn execute(args: cli::Cli) -> CliResult<OutputEnvelope> {
    if !args.root.is_dir() {
        return Err(CliError::RootNotFound(canonical::display(&args.root)));
    }

    let start = Instant::now();
    let transformer = match (&args.from_file, &args.from_dir) {
        (Some(file), _) => RelativeFileNameTransformer::for_file(&args.root, file),
        (None, Some(dir)) => RelativeFileNameTransformer::for_directory(&args.root, dir),
        (None, None) => RelativeFileNameTransformer::for_directory(&args.root, &args.root),
    }
    .with_containment(args.containment);

    let targets = collect_targets(&args)?;
    log::info!(
        "relativizing {} path(s) against {}",
        targets.len(),
        transformer.current_dir().display()
    );

    let results = transformer.relativize_all(&targets);
    let fallbacks = results.iter().filter(|r| r.is_fallback()).count();

    let separator = args.separator;
    let files: Vec<FileEntry> = targets
        .iter()
        .zip(results)
        .map(|(target, result)| FileEntry {
            path: separator.apply(canonical::display(target)),
            relative: separator.apply(result.path),
            fallback: result.fallback.map(|e| e.to_string()),
        })
        .collect();

    Ok(OutputEnvelope {
        meta: Some(MetaInfo {
            elapsed_ms: start.elapsed().as_millis(),
            files_scanned: files.len(),
            fallbacks,
        }),
        root: Some(separator.apply(canonical::display(transformer.root()))),
        reference: Some(separator.apply(canonical::display(transformer.current_dir()))),
        files: Some(files),
        error: None,
    })
}

/// Explicit targets first, then scanned files. With neither, every file under the root.
fn collect_targets(args: &cli::Cli) -> CliResult<Vec<PathBuf>> {
    let mut targets = args.targets.clone();

    let globs = if args.globs.is_empty() && args.targets.is_empty() {
        vec!["*".to_owned()]
    } else {
        args.globs.clone()
    };

    if !globs.is_empty() {
        let patterns = PatternSet::new(&globs)?;
        let filter = ExclusionFilter::new(&args.exclude, args.no_defaults);
        targets.extend(scanner::find_files(&args.root, &patterns, &filter));
    }

    Ok(targets)
}
