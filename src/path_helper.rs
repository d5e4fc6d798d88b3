/// Separator style for emitted paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Separator {
    #[default]
    Native,
    Slash,
    Backslash,
}

impl Separator {
    pub fn apply(self, path: String) -> String {
        match self {
            Separator::Native => path,
            Separator::Slash if cfg!(windows) => path.replace('\\', "/"),
            Separator::Backslash if !cfg!(windows) => path.replace('/', "\\"),
            _ => path,
        }
    }
}
