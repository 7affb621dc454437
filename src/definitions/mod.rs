pub mod loader;
pub mod raw;

use thiserror::Error;

pub use loader::load_library;

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("cannot open definition file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON format in definition file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid definition in pathway '{pathway}' at {path}: {reason}")]
    InvalidDefinition {
        pathway: String,
        path: String,
        reason: String,
    },
}

#[cfg(test)]
#[path = "../../tests/src_inline/definitions/tests.rs"]
mod tests;
