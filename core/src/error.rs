use std::path::PathBuf;
use thiserror::Error;

/// Malformed or out-of-range user input. Recovered by re-prompting or by a
/// clamped default; never propagated past the menu.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Only a single keyword search term is allowed")]
    MultiWordKeyword,

    #[error("The keyword must be at least two letters")]
    KeywordTooShort,

    #[error("'{0}' is not a valid price")]
    InvalidPrice(String),

    #[error("The search ranges for meal pricing cannot have a negative number")]
    NegativePrice,

    #[error("Minimum price S${min:.2} is higher than maximum price S${max:.2}")]
    InvertedRange { min: f64, max: f64 },

    #[error("Number of canteens must be a positive, non-zero integer (got '{0}')")]
    InvalidCount(String),

    #[error("Number of canteens must be a positive, non-zero integer")]
    ZeroCount,

    #[error("There are no canteens to search")]
    NoCanteens,

    #[error("Point ({x}, {y}) lies outside the {width}x{height} map")]
    PointOutOfBounds { x: i64, y: i64, width: u32, height: u32 },
}

/// A search that ran to completion without producing anything to show.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("No food stall(s) found with input keyword '{term}'")]
    NoKeywordMatch { term: String },

    #[error("No food stall(s) found within specified price range (S${min:.2} - S${max:.2})")]
    NoPriceMatch { min: f64, max: f64 },

    #[error("No food stall(s) found with input keyword '{term}'; suggestion '{suggestion}' was declined")]
    SuggestionDeclined { term: String, suggestion: String },

    #[error("No location was selected")]
    Cancelled,

    /// A location was picked but no canteen count was given.
    #[error("No number of canteens was entered")]
    NoCount,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode dataset {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no dataset files found at {0}")]
    NoDataset(PathBuf),

    #[error("stall '{stall}' has an empty canteen name")]
    EmptyCanteen { stall: String },

    #[error("stall '{stall}' has no keywords")]
    MissingKeywords { stall: String },

    #[error("stall '{stall}' has an invalid price {price}")]
    InvalidPrice { stall: String, price: f64 },

    #[error("canteen '{canteen}' has a malformed location '{value}' (expected \"x,y\")")]
    InvalidLocation { canteen: String, value: String },

    #[error("canteen '{0}' has no location")]
    MissingLocation(String),

    #[error("dataset contains no stalls")]
    Empty,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Load(#[from] LoadError),

    /// A collaborator (terminal, renderer output) failed.
    #[error("interaction failed: {0}")]
    Interaction(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Interaction(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
