use crate::error::{SearchError, ValidationError};
use crate::model::{Dataset, Grouped, PriceHit};

/// An inclusive, validated price range (`0 <= min <= max`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Result<Self, ValidationError> {
        if !min.is_finite() {
            return Err(ValidationError::InvalidPrice(min.to_string()));
        }
        if !max.is_finite() {
            return Err(ValidationError::InvalidPrice(max.to_string()));
        }
        if min < 0.0 || max < 0.0 {
            return Err(ValidationError::NegativePrice);
        }
        if min > max {
            return Err(ValidationError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// All stalls priced within `range`, grouped by canteen.
pub fn search_by_price(dataset: &Dataset, range: PriceRange) -> Result<Grouped<PriceHit>, SearchError> {
    let hits = dataset
        .stalls()
        .iter()
        .filter(|record| range.contains(record.price))
        .map(|record| (record.canteen.clone(), PriceHit { stall: record.stall.clone(), price: record.price }));
    let results = Grouped::from_hits(hits);
    tracing::info!(min = range.min, max = range.max, hits = results.total(), "price search");
    if results.is_empty() {
        return Err(SearchError::NoPriceMatch { min: range.min, max: range.max });
    }
    Ok(results)
}
