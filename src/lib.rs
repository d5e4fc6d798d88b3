pub mod canonical;
pub mod error;
pub mod exclusion;
pub mod models;
pub mod path_helper;
pub mod patterns;
pub mod relativizer;
pub mod scanner;
pub mod yaml_output;

pub use error::{CliError, RelativizeError};
pub use relativizer::{Containment, RelativeFileNameTransformer, Relativized};
