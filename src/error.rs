use thiserror::Error;

use crate::config::{GRID_SIZE_MAX, GRID_SIZE_MIN, IMAGE_SIDE};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by editor commands.
///
/// None of these are fatal: the GUI reports them as a notice and the session
/// keeps its previous state.
#[derive(Error, Debug)]
pub enum Error {
    #[error("the image must be exactly {side}×{side} px (got {width}×{height})", side = IMAGE_SIDE)]
    Format { width: u32, height: u32 },

    #[error("load a {side}×{side} px image before loading rectangles", side = IMAGE_SIDE)]
    NoImageLoaded,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("there are no rectangles to save")]
    NothingToSave,

    #[error("grid size must be between {min} and {max} (got {0})", min = GRID_SIZE_MIN, max = GRID_SIZE_MAX)]
    GridSize(usize),

    #[error("grid size must be a whole number (got \"{0}\")")]
    NotANumber(String),

    #[error("cannot decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("error reading / writing file: {0}")]
    Io(#[from] std::io::Error),
}

/// Rectangle file could not be understood.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("cannot read JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("the JSON file must contain a list of rectangles")]
    NotAnArray,
}

/// How loudly an error is reported to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Error {
    pub fn severity(&self) -> Severity {
        match self {
            Error::NothingToSave => Severity::Info,
            Error::NoImageLoaded => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Short dialog title for this error.
    pub fn title(&self) -> &'static str {
        match self {
            Error::Format { .. } | Error::Image(_) => "Invalid image",
            Error::NoImageLoaded => "No image",
            Error::Parse(_) => "Invalid JSON",
            Error::NothingToSave => "Nothing to save",
            Error::GridSize(_) | Error::NotANumber(_) => "Invalid grid size",
            Error::Io(_) => "File error",
        }
    }
}
