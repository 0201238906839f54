use crate::error::LoadError;
use crate::natural::natural_cmp;
use std::collections::HashSet;

/// A pixel position on the reference campus map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Parse an `"x,y"` pair. Whitespace around either number is ignored.
    pub fn parse_pair(value: &str) -> Option<Self> {
        let (x, y) = value.split_once(',')?;
        let x = x.trim().parse().ok()?;
        let y = y.trim().parse().ok()?;
        Some(Self { x, y })
    }

    pub fn distance_to(self, other: Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StallRecord {
    pub canteen: String,
    pub stall: String,
    /// Raw tag string as stored in the dataset, e.g. `"Halal, Chinese"`.
    pub keywords: String,
    pub price: f64,
}

impl StallRecord {
    /// Individual tags: split on commas, dropping one leading space per tag.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .split(',')
            .map(|tag| tag.strip_prefix(' ').unwrap_or(tag))
            .filter(|tag| !tag.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanteenLocation {
    pub canteen: String,
    pub point: Point,
}

/// Immutable snapshot of the stall table. Stall names are unique and every
/// canteen referenced by a stall has exactly one location.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    stalls: Vec<StallRecord>,
    locations: Vec<CanteenLocation>,
}

impl Dataset {
    /// Assemble a dataset, skipping repeated stall names and repeated
    /// canteen locations (first occurrence wins). Locations of canteens left
    /// without stalls are dropped.
    pub fn new(stalls: Vec<StallRecord>, locations: Vec<CanteenLocation>) -> Result<Self, LoadError> {
        if stalls.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut seen_stalls: HashSet<String> = HashSet::new();
        let mut kept_stalls = Vec::with_capacity(stalls.len());
        for record in stalls {
            if record.canteen.is_empty() {
                return Err(LoadError::EmptyCanteen { stall: record.stall });
            }
            if record.keywords.trim().is_empty() {
                return Err(LoadError::MissingKeywords { stall: record.stall });
            }
            if !record.price.is_finite() || record.price < 0.0 {
                return Err(LoadError::InvalidPrice { stall: record.stall, price: record.price });
            }
            if !seen_stalls.insert(record.stall.clone()) {
                tracing::warn!(stall = %record.stall, "duplicate stall row skipped");
                continue;
            }
            kept_stalls.push(record);
        }

        let mut kept_locations: Vec<CanteenLocation> = Vec::with_capacity(locations.len());
        for location in locations {
            let existing = kept_locations
                .iter()
                .find(|l| l.canteen == location.canteen)
                .map(|l| l.point);
            match existing {
                Some(point) if point != location.point => {
                    tracing::warn!(canteen = %location.canteen, "conflicting location ignored");
                }
                Some(_) => {}
                None => kept_locations.push(location),
            }
        }

        kept_locations.retain(|location| {
            let used = kept_stalls.iter().any(|s| s.canteen == location.canteen);
            if !used {
                tracing::warn!(canteen = %location.canteen, "location without stalls dropped");
            }
            used
        });

        for record in &kept_stalls {
            if !kept_locations.iter().any(|l| l.canteen == record.canteen) {
                return Err(LoadError::MissingLocation(record.canteen.clone()));
            }
        }

        Ok(Self { stalls: kept_stalls, locations: kept_locations })
    }

    pub fn stalls(&self) -> &[StallRecord] {
        &self.stalls
    }

    pub fn locations(&self) -> &[CanteenLocation] {
        &self.locations
    }

    pub fn canteen_count(&self) -> usize {
        self.locations.len()
    }

    pub fn location_of(&self, canteen: &str) -> Option<Point> {
        self.locations.iter().find(|l| l.canteen == canteen).map(|l| l.point)
    }

    /// Canteen names in natural order.
    pub fn canteen_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.locations.iter().map(|l| l.canteen.as_str()).collect();
        names.sort_by(|a, b| natural_cmp(a, b));
        names
    }

    pub fn stalls_in<'a>(&'a self, canteen: &'a str) -> impl Iterator<Item = &'a StallRecord> + 'a {
        self.stalls.iter().filter(move |s| s.canteen == canteen)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordHit {
    pub stall: String,
    pub keywords: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceHit {
    pub stall: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyCanteen {
    pub canteen: String,
    pub point: Point,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanteenGroup<T> {
    pub canteen: String,
    pub entries: Vec<T>,
}

/// Search hits grouped by canteen. Groups are in natural order of canteen
/// name; entries keep the order in which they were found.
#[derive(Debug, Clone, PartialEq)]
pub struct Grouped<T> {
    groups: Vec<CanteenGroup<T>>,
}

impl<T> Grouped<T> {
    pub fn from_hits<I>(hits: I) -> Self
    where
        I: IntoIterator<Item = (String, T)>,
    {
        let mut groups: Vec<CanteenGroup<T>> = Vec::new();
        for (canteen, hit) in hits {
            match groups.iter_mut().find(|g| g.canteen == canteen) {
                Some(group) => group.entries.push(hit),
                None => groups.push(CanteenGroup { canteen, entries: vec![hit] }),
            }
        }
        groups.sort_by(|a, b| natural_cmp(&a.canteen, &b.canteen));
        Self { groups }
    }

    pub fn groups(&self) -> &[CanteenGroup<T>] {
        &self.groups
    }

    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Flatten to `(canteen, entry)` pairs in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter().map(move |e| (g.canteen.as_str(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stall(canteen: &str, name: &str) -> StallRecord {
        StallRecord { canteen: canteen.into(), stall: name.into(), keywords: "Halal, Chinese".into(), price: 4.0 }
    }

    #[test]
    fn parses_location_pairs() {
        assert_eq!(Point::parse_pair("12, 340"), Some(Point::new(12, 340)));
        assert_eq!(Point::parse_pair("12"), None);
        assert_eq!(Point::parse_pair("a,b"), None);
    }

    #[test]
    fn tags_drop_single_leading_space() {
        let s = stall("Canteen 1", "Noodles");
        assert_eq!(s.tags().collect::<Vec<_>>(), vec!["Halal", "Chinese"]);
    }

    #[test]
    fn rejects_canteen_without_location() {
        let err = Dataset::new(vec![stall("Canteen 1", "Noodles")], vec![]).unwrap_err();
        assert!(matches!(err, LoadError::MissingLocation(c) if c == "Canteen 1"));
    }

    #[test]
    fn groups_sorted_naturally() {
        let grouped = Grouped::from_hits(vec![
            ("Canteen 11".to_string(), 1),
            ("Canteen 2".to_string(), 2),
            ("Canteen 11".to_string(), 3),
        ]);
        let names: Vec<&str> = grouped.groups().iter().map(|g| g.canteen.as_str()).collect();
        assert_eq!(names, vec!["Canteen 2", "Canteen 11"]);
        assert_eq!(grouped.groups()[1].entries, vec![1, 3]);
        assert_eq!(grouped.total(), 3);
    }
}
