//! Campus food-stall search: keyword search with "did you mean" suggestions,
//! price-range filtering and nearest-canteen ranking over a small stall
//! table, with results grouped by canteen in natural order.

pub mod config;
pub mod dataset;
pub mod error;
pub mod interact;
pub mod keyword;
pub mod model;
pub mod natural;
pub mod nearest;
pub mod price;
pub mod report;
pub mod validate;

pub use error::{Error, LoadError, Result, SearchError, ValidationError};
pub use model::{CanteenGroup, CanteenLocation, Dataset, Grouped, KeywordHit, NearbyCanteen, PriceHit, Point, StallRecord};
