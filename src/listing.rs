//! Listing order for the post index
//!
//! Sorting is stable, so records with equal keys keep their input order and
//! builds are reproducible. Records without a date always sort last.

use std::cmp::Ordering;
use std::str::FromStr;

use anyhow::{bail, Error};

use crate::content::ContentRecord;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Key used to order a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Date(Direction),
    Title(Direction),
}

impl Default for OrderBy {
    fn default() -> Self {
        OrderBy::Date(Direction::Descending)
    }
}

impl FromStr for OrderBy {
    type Err = Error;

    /// Parse `date`, `-date`, `title` or `-title`; `-` means descending
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (direction, key) = match s.strip_prefix('-') {
            Some(key) => (Direction::Descending, key),
            None => (Direction::Ascending, s),
        };

        match key {
            "date" => Ok(OrderBy::Date(direction)),
            "title" => Ok(OrderBy::Title(direction)),
            other => bail!("Unknown sort key '{}'. Available: date, title", other),
        }
    }
}

/// Newest first; equal dates keep input order, missing dates go last
pub fn order(records: Vec<ContentRecord>) -> Vec<ContentRecord> {
    order_by(records, OrderBy::default())
}

/// Order records by the given key
pub fn order_by(mut records: Vec<ContentRecord>, by: OrderBy) -> Vec<ContentRecord> {
    records.sort_by(|a, b| compare(a, b, by));
    records
}

fn compare(a: &ContentRecord, b: &ContentRecord, by: OrderBy) -> Ordering {
    match by {
        OrderBy::Date(direction) => match (a.date(), b.date()) {
            (Some(x), Some(y)) => directed(x.cmp(&y), direction),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        OrderBy::Title(direction) => {
            let x = a.title().to_lowercase();
            let y = b.title().to_lowercase();
            directed(x.cmp(&y), direction)
        }
    }
}

fn directed(ordering: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Ascending => ordering,
        Direction::Descending => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{load, FrontMatter, RawContent};

    fn entry(path: &str, title: Option<&str>, date: Option<&str>) -> RawContent {
        let fm = FrontMatter {
            title: title.map(String::from),
            date: date.map(String::from),
            ..Default::default()
        };
        RawContent::new(path, fm, "<p>body</p>")
    }

    fn slugs(records: &[ContentRecord]) -> Vec<&str> {
        records.iter().map(|r| r.slug()).collect()
    }

    #[test]
    fn test_newest_first_and_stable() {
        let records = load(vec![
            entry("a.md", None, Some("2021-01-01")),
            entry("b.md", None, Some("2021-01-01")),
            entry("c.md", None, Some("2021-02-01")),
        ])
        .unwrap();

        let ordered = order(records);
        assert_eq!(slugs(&ordered), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_order_is_a_permutation() {
        let records = load(vec![
            entry("x.md", None, Some("2020-05-05")),
            entry("y.md", None, None),
            entry("z.md", None, Some("2022-01-01")),
            entry("w.md", None, Some("2020-05-05")),
        ])
        .unwrap();

        let ordered = order(records.clone());
        assert_eq!(ordered.len(), records.len());
        for record in &records {
            assert_eq!(ordered.iter().filter(|r| *r == record).count(), 1);
        }
    }

    #[test]
    fn test_order_is_idempotent() {
        let records = load(vec![
            entry("a.md", None, Some("2019-03-01")),
            entry("b.md", None, None),
            entry("c.md", None, Some("2021-02-01")),
            entry("d.md", None, Some("2019-03-01")),
        ])
        .unwrap();

        let once = order(records);
        let twice = order(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_dates_sort_last() {
        let records = load(vec![
            entry("undated.md", None, None),
            entry("bad-date.md", None, Some("whenever")),
            entry("old.md", None, Some("2001-01-01")),
        ])
        .unwrap();

        assert_eq!(
            slugs(&order(records.clone())),
            vec!["old", "undated", "bad-date"]
        );
        assert_eq!(
            slugs(&order_by(records, OrderBy::Date(Direction::Ascending))),
            vec!["old", "undated", "bad-date"]
        );
    }

    #[test]
    fn test_load_then_order_scenario() {
        let records = load(vec![
            entry("hello-world.md", Some("Hello"), Some("2021-06-01")),
            entry("second-post.md", None, Some("2021-07-01")),
        ])
        .unwrap();

        let ordered = order(records);
        let summary: Vec<_> = ordered
            .iter()
            .map(|r| (r.slug(), r.title(), r.date().unwrap().to_string()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("second-post", "second-post", "2021-07-01".to_string()),
                ("hello-world", "Hello", "2021-06-01".to_string()),
            ]
        );
    }

    #[test]
    fn test_order_by_title() {
        let records = load(vec![
            entry("b.md", Some("banana"), None),
            entry("a.md", Some("Apple"), None),
            entry("c.md", None, None),
        ])
        .unwrap();

        let asc = order_by(records.clone(), OrderBy::Title(Direction::Ascending));
        assert_eq!(slugs(&asc), vec!["a", "b", "c"]);
        let desc = order_by(records, OrderBy::Title(Direction::Descending));
        assert_eq!(slugs(&desc), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_parse_order_by() {
        assert_eq!(
            "-date".parse::<OrderBy>().unwrap(),
            OrderBy::Date(Direction::Descending)
        );
        assert_eq!(
            "title".parse::<OrderBy>().unwrap(),
            OrderBy::Title(Direction::Ascending)
        );
        assert!("-views".parse::<OrderBy>().is_err());
    }
}
