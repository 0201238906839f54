use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;

lazy_static! {
    static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]+").expect("valid regex");
}

/// One piece of a natural-sort key.
///
/// A key always alternates text and number segments starting with text
/// (possibly empty), so segments at the same position are the same kind.
/// Should kinds ever meet, numbers order before text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    /// Decimal digits with leading zeros removed ("0" stays "0").
    Number(String),
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Number(a), Segment::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
            (Segment::Number(_), Segment::Text(_)) => Ordering::Less,
            (Segment::Text(_), Segment::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Split a label at digit-run boundaries: `"a23b"` becomes
/// `[Text("a"), Number("23"), Text("b")]`. Text is lowercased.
pub fn natural_key(label: &str) -> Vec<Segment> {
    let mut key = Vec::new();
    let mut last = 0;
    for run in DIGIT_RUN.find_iter(label) {
        key.push(Segment::Text(label[last..run.start()].to_lowercase()));
        let digits = run.as_str().trim_start_matches('0');
        let digits = if digits.is_empty() { "0" } else { digits };
        key.push(Segment::Number(digits.to_string()));
        last = run.end();
    }
    key.push(Segment::Text(label[last..].to_lowercase()));
    key
}

pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}

/// Sort labels in place so that `item2 < item11 < item55`. Stable.
pub fn natural_sort<S: AsRef<str>>(labels: &mut [S]) {
    labels.sort_by_cached_key(|label| natural_key(label.as_ref()));
}

/// Collect and return labels in natural order.
pub fn natural_sorted<I, S>(labels: I) -> Vec<S>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<S> = labels.into_iter().collect();
    natural_sort(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_alternating_segments() {
        assert_eq!(
            natural_key("A23b"),
            vec![Segment::Text("a".into()), Segment::Number("23".into()), Segment::Text("b".into())]
        );
        assert_eq!(
            natural_key("7"),
            vec![Segment::Text(String::new()), Segment::Number("7".into()), Segment::Text(String::new())]
        );
    }

    #[test]
    fn numbers_compare_by_magnitude() {
        assert_eq!(natural_cmp("item2", "item11"), Ordering::Less);
        assert_eq!(natural_cmp("item007", "item7"), Ordering::Equal);
        assert_eq!(natural_cmp("x99999999999999999999999", "x100000000000000000000000"), Ordering::Less);
    }
}
