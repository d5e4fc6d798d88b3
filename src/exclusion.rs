use std::collections::HashSet;

const DEFAULT_EXCLUSIONS: &[&str] = &[
    ".git", ".svn", ".hg", ".vs", ".idea", ".vscode",
    "node_modules", "target", "obj", "__pycache__", ".cache",
];

/// Directory names the scanner never descends into.
pub struct ExclusionFilter {
    names: HashSet<String>,
}

impl ExclusionFilter {
    pub fn new(additional: &[String], disable_defaults: bool) -> Self {
        let defaults = DEFAULT_EXCLUSIONS
            .iter()
            .copied()
            .filter(|_| !disable_defaults);
        let names = defaults
            .chain(additional.iter().map(String::as_str))
            .map(str::to_ascii_lowercase)
            .collect();
        Self { names }
    }

    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.names.contains(&dir_name.to_ascii_lowercase())
    }
}
