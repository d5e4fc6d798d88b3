use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::exclusion::ExclusionFilter;
use crate::patterns::PatternSet;

/// Files under `root` whose names match `patterns`, sorted case-insensitively.
pub fn find_files(root: &Path, patterns: &PatternSet, filter: &ExclusionFilter) -> Vec<PathBuf> {
    let mut results = Vec::new();
    find_files_recursive(root, patterns, filter, &mut results);
    results.sort_by_cached_key(|p| p.to_string_lossy().to_ascii_lowercase());
    results
}

fn find_files_recursive(
    dir: &Path,
    patterns: &PatternSet,
    filter: &ExclusionFilter,
    results: &mut Vec<PathBuf>,
) {
    let entries = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            log::debug!("skipping {}: {}", dir.display(), e);
            return;
        }
    };

    let mut subdirs = Vec::new();

    for entry in entries.flatten() {
        let ft = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };
        let name = entry.file_name();
        let name_str = name.to_string_lossy();

        if ft.is_file() {
            if patterns.matches_any(&name_str) {
                results.push(entry.path());
            }
        } else if ft.is_dir() && !filter.is_excluded(&name_str) {
            subdirs.push(entry.path());
        }
    }

    let sub_results: Vec<Vec<PathBuf>> = subdirs
        .par_iter()
        .map(|subdir| {
            let mut sub = Vec::new();
            find_files_recursive(subdir, patterns, filter, &mut sub);
            sub
        })
        .collect();

    results.extend(sub_results.into_iter().flatten());
}
