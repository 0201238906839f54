//! Checks applied to raw user input before a search runs. Each returns a
//! `ValidationError` rather than panicking on malformed input.

use crate::error::ValidationError;
use crate::interact::Confirm;
use crate::price::PriceRange;

/// Accept a single whitespace-free token of at least two characters.
/// Symbols and digits are allowed. Returns the trimmed token.
pub fn validate_keyword(input: &str) -> Result<&str, ValidationError> {
    let mut words = input.split_whitespace();
    let token = match (words.next(), words.next()) {
        (Some(token), None) => token,
        (None, _) => return Err(ValidationError::KeywordTooShort),
        (Some(_), Some(_)) => return Err(ValidationError::MultiWordKeyword),
    };
    if token.chars().count() < 2 {
        return Err(ValidationError::KeywordTooShort);
    }
    Ok(token)
}

pub fn parse_price(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::InvalidPrice(trimmed.to_string())),
    }
}

/// Parse a price range. An inverted range is offered back through `confirm`
/// with the bounds swapped; declining fails the request. Equal bounds are a
/// valid single-price search.
pub fn validate_price<C>(min: &str, max: &str, confirm: &mut C) -> Result<PriceRange, ValidationError>
where
    C: Confirm + ?Sized,
{
    let min = parse_price(min)?;
    let max = parse_price(max)?;
    match PriceRange::new(min, max) {
        Err(ValidationError::InvertedRange { min, max }) => {
            let question = "The minimum price you have input is higher than your maximum price. \
                            Search for food with the price ranges swapped?";
            if confirm.confirm(question) {
                tracing::debug!(min = max, max = min, "price range swapped");
                PriceRange::new(max, min)
            } else {
                Err(ValidationError::InvertedRange { min, max })
            }
        }
        other => other,
    }
}

/// Why a requested count was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountClamp {
    /// A negative request became 1.
    RaisedToOne,
    /// A request above the number of canteens became that number.
    LoweredToTotal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NearestCount {
    pub value: usize,
    pub clamp: Option<CountClamp>,
}

impl NearestCount {
    pub fn warning(&self) -> Option<String> {
        match self.clamp? {
            CountClamp::RaisedToOne => {
                Some("Negative integer detected. Defaulting search field to nearest canteen (1).".to_string())
            }
            CountClamp::LoweredToTotal => Some(format!(
                "That's more than the number of canteens! Showing you all {} canteens instead.",
                self.value
            )),
        }
    }
}

/// Parse how many canteens to list, clamping into `1..=total`.
pub fn validate_count(input: &str, total: usize) -> Result<NearestCount, ValidationError> {
    let trimmed = input.trim();
    let requested: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidCount(trimmed.to_string()))?;
    if total == 0 {
        return Err(ValidationError::NoCanteens);
    }
    let count = match requested {
        0 => return Err(ValidationError::ZeroCount),
        n if n < 0 => NearestCount { value: 1, clamp: Some(CountClamp::RaisedToOne) },
        n => match usize::try_from(n) {
            Ok(n) if n <= total => NearestCount { value: n, clamp: None },
            _ => NearestCount { value: total, clamp: Some(CountClamp::LoweredToTotal) },
        },
    };
    if count.clamp.is_some() {
        tracing::warn!(requested, value = count.value, "nearest canteen count clamped");
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_shape() {
        assert_eq!(validate_keyword("halal"), Ok("halal"));
        assert_eq!(validate_keyword("  $5 "), Ok("$5"));
        assert_eq!(validate_keyword("chinese food"), Err(ValidationError::MultiWordKeyword));
        assert_eq!(validate_keyword("a"), Err(ValidationError::KeywordTooShort));
        assert_eq!(validate_keyword("   "), Err(ValidationError::KeywordTooShort));
    }

    #[test]
    fn price_parse_rejects_garbage() {
        assert_eq!(parse_price(" 3.50 "), Ok(3.5));
        assert!(parse_price("three").is_err());
        assert!(parse_price("inf").is_err());
    }

    #[test]
    fn oversized_counts() {
        let count = validate_count("99999999999999999999", 15);
        assert_eq!(count, Err(ValidationError::InvalidCount("99999999999999999999".into())));
        let count = validate_count("16", 15).unwrap();
        assert_eq!(count.value, 15);
        assert!(count.warning().is_some());
    }
}
