//! Expresses file paths relative to a reference directory beneath a common
//! root, the way IDE project files refer to their sources.
//!
//! Paths that cannot be canonicalized, or that leave the root, come back as
//! absolute paths instead of errors so callers always get a usable string.

use std::path::{Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use rayon::prelude::*;

use crate::canonical;
use crate::error::RelativizeError;

const CURRENT_DIR: &str = ".";
const PARENT_DIR: &str = "..";

/// How "beneath the root" is decided once all paths are canonical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Containment {
    /// Root must be a whole-component prefix of the path.
    #[default]
    Components,
    /// Root must be a leading substring of the path text, so `/proj` also
    /// claims `/proj-other`. Matches what older project generators emitted.
    StringPrefix,
}

impl Containment {
    fn encloses(self, root: &Path, path: &Path) -> bool {
        match self {
            Containment::Components => path.starts_with(root),
            Containment::StringPrefix => path
                .as_os_str()
                .as_encoded_bytes()
                .starts_with(root.as_os_str().as_encoded_bytes()),
        }
    }
}

/// Outcome of [`RelativeFileNameTransformer::relativize`].
#[derive(Debug)]
pub struct Relativized {
    /// Relative path, `.`, or the absolute fallback.
    pub path: String,
    /// Set when `path` is the absolute fallback.
    pub fallback: Option<RelativizeError>,
}

impl Relativized {
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Root and reference directory are fixed at construction; targets vary per
/// call. Cheap to clone and safe to share across threads.
#[derive(Clone, Debug)]
pub struct RelativeFileNameTransformer {
    root: PathBuf,
    current: PathBuf,
    containment: Containment,
}

impl RelativeFileNameTransformer {
    /// Paths will be relative to the directory holding `file`.
    pub fn for_file(root: impl Into<PathBuf>, file: impl AsRef<Path>) -> Self {
        let file = file.as_ref();
        let current = match file.parent() {
            Some(parent) if parent.as_os_str().is_empty() => PathBuf::from(CURRENT_DIR),
            Some(parent) => parent.to_path_buf(),
            None => file.to_path_buf(),
        };
        Self::new(root.into(), current)
    }

    /// Paths will be relative to `dir`.
    pub fn for_directory(root: impl Into<PathBuf>, dir: impl Into<PathBuf>) -> Self {
        Self::new(root.into(), dir.into())
    }

    fn new(root: PathBuf, current: PathBuf) -> Self {
        Self {
            root,
            current,
            containment: Containment::default(),
        }
    }

    pub fn with_containment(mut self, containment: Containment) -> Self {
        self.containment = containment;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn current_dir(&self) -> &Path {
        &self.current
    }

    pub fn containment(&self) -> Containment {
        self.containment
    }

    /// Never fails: out-of-root or unresolvable targets yield their absolute path.
    pub fn transform(&self, file: &Path) -> String {
        self.relativize(file).path
    }

    pub fn relativize(&self, file: &Path) -> Relativized {
        match self.try_transform(file) {
            Ok(path) => Relativized { path, fallback: None },
            Err(err) => {
                log::debug!("{}; using absolute path", err);
                Relativized {
                    path: canonical::display(&canonical::absolute(file)),
                    fallback: Some(err),
                }
            }
        }
    }

    /// Relativizes every target on the rayon pool. Output order follows input order.
    pub fn relativize_all<P>(&self, files: &[P]) -> Vec<Relativized>
    where
        P: AsRef<Path> + Sync,
    {
        files
            .par_iter()
            .map(|file| self.relativize(file.as_ref()))
            .collect()
    }

    pub fn try_transform(&self, file: &Path) -> Result<String, RelativizeError> {
        let root = canonicalize(&self.root)?;
        let current = canonicalize(&self.current)?;
        let target = canonicalize(file)?;

        if !self.containment.encloses(&root, &current) {
            return Err(RelativizeError::ReferenceOutsideRoot { path: current, root });
        }
        if !self.containment.encloses(&root, &target) {
            return Err(RelativizeError::TargetOutsideRoot { path: target, root });
        }

        match self.containment {
            Containment::Components => Ok(join_below(&root, &current, &target)),
            Containment::StringPrefix => Ok(join_legacy(&root, &current, &target)),
        }
    }
}

fn join_below(root: &Path, current: &Path, target: &Path) -> String {
    let tail = tail_below(root, target);
    if current == root {
        return if tail.is_empty() { CURRENT_DIR.to_owned() } else { tail };
    }

    let ascent = ascent_path(current, root);
    if tail.is_empty() {
        ascent
    } else {
        format!("{}{}{}", ascent, MAIN_SEPARATOR, tail)
    }
}

/// Older generators dropped the first character after the root, whatever it
/// was, and glued the ascent straight onto the remainder.
fn join_legacy(root: &Path, current: &Path, target: &Path) -> String {
    let rest = text_after(root, target);
    if current == root {
        let mut chars = rest.chars();
        return match chars.next() {
            Some(_) => chars.as_str().to_owned(),
            None => CURRENT_DIR.to_owned(),
        };
    }
    format!("{}{}", ascent_path(current, root), rest)
}

fn canonicalize(path: &Path) -> Result<PathBuf, RelativizeError> {
    canonical::canonicalize(path).map_err(|source| RelativizeError::Canonicalize {
        path: path.to_path_buf(),
        source,
    })
}

/// Text of `target` after the `root` prefix.
fn text_after(root: &Path, target: &Path) -> String {
    let root = root.to_string_lossy();
    let target = target.to_string_lossy();
    target.get(root.len()..).unwrap_or_default().to_owned()
}

/// Like [`text_after`], without a leading separator.
fn tail_below(root: &Path, target: &Path) -> String {
    let rest = text_after(root, target);
    rest.strip_prefix(MAIN_SEPARATOR).map(str::to_owned).unwrap_or(rest)
}

/// `..` once per directory between `from` and its ancestor `to`.
fn ascent_path(from: &Path, to: &Path) -> String {
    let mut steps = 0usize;
    let mut dir = from;
    while dir != to {
        dir = match dir.parent() {
            Some(parent) => parent,
            None => panic!(
                "reference directory {} escaped root {} despite containment check",
                from.display(),
                to.display()
            ),
        };
        steps += 1;
    }
    vec![PARENT_DIR; steps].join(MAIN_SEPARATOR_STR)
}
