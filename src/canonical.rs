use std::env;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolves `path` to an absolute form free of `.`/`..` segments and symlinks.
///
/// Unlike `fs::canonicalize` the path does not have to exist: the longest
/// existing prefix is resolved by the platform and the remaining components
/// are applied lexically. An empty path names the working directory.
pub fn canonicalize(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.as_os_str().is_empty() {
        env::current_dir()?
    } else {
        std::path::absolute(path)?
    };
    let components: Vec<Component> = absolute.components().collect();

    for split in (1..=components.len()).rev() {
        let prefix: PathBuf = components[..split].iter().collect();
        match fs::canonicalize(&prefix) {
            Ok(resolved) => {
                let mut out = strip_verbatim(resolved);
                for component in &components[split..] {
                    match component {
                        Component::ParentDir => {
                            out.pop();
                        }
                        Component::Normal(name) => out.push(name),
                        _ => {}
                    }
                }
                return Ok(out);
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound || !prefix.exists() => continue,
            Err(err) => return Err(err),
        }
    }

    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("no existing ancestor of {}", path.display()),
    ))
}

/// Absolute form of `path` without touching symlinks or `..` segments.
/// An empty path names the working directory.
pub fn absolute(path: &Path) -> PathBuf {
    let resolved = if path.as_os_str().is_empty() {
        env::current_dir()
    } else {
        std::path::absolute(path)
    };
    resolved.unwrap_or_else(|_| path.to_path_buf())
}

pub fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(windows)]
fn strip_verbatim(path: PathBuf) -> PathBuf {
    let text = path.to_string_lossy();
    match text.strip_prefix(r"\\?\") {
        Some(rest) if rest.as_bytes().get(1) == Some(&b':') => PathBuf::from(rest),
        _ => path,
    }
}

#[cfg(not(windows))]
fn strip_verbatim(path: PathBuf) -> PathBuf {
    path
}
