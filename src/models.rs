pub struct MetaInfo {
    pub elapsed_ms: u128,
    pub files_scanned: usize,
    pub fallbacks: usize,
}

pub struct FileEntry {
    /// Target as given or as found by the scanner.
    pub path: String,
    pub relative: String,
    /// Reason the relative form was not available.
    pub fallback: Option<String>,
}

#[derive(Default)]
pub struct OutputEnvelope {
    pub meta: Option<MetaInfo>,
    pub root: Option<String>,
    pub reference: Option<String>,
    pub files: Option<Vec<FileEntry>>,
    pub error: Option<String>,
}

impl OutputEnvelope {
    pub fn failure(error: impl ToString) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Default::default()
        }
    }
}
