use glob::{MatchOptions, Pattern};

use crate::error::{CliError, CliResult};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// File-name globs (`*`, `?`, `[...]`), matched case-insensitively.
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    pub fn new(globs: &[String]) -> CliResult<Self> {
        let patterns = globs
            .iter()
            .map(|g| {
                Pattern::new(g).map_err(|source| CliError::InvalidGlob {
                    pattern: g.clone(),
                    source,
                })
            })
            .collect::<CliResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn matches_any(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches_with(name, MATCH_OPTIONS))
    }
}
