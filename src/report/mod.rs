pub mod checker;
pub mod parser;
pub mod prompt;
pub mod types;

pub use checker::*;
pub use parser::*;
pub use prompt::*;
pub use types::*;

use thiserror::Error;

use crate::nim::NimError;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Please enter at least 2 medications to check interactions.")]
    TooFewMedications,

    #[error("Please limit to 8 medications at a time.")]
    TooManyMedications,

    #[error("Model response was not valid JSON. Raw response: {excerpt}")]
    InvalidModelJson { excerpt: String },

    #[error(transparent)]
    Model(#[from] NimError),
}
