//! Conditional access restrictions, e.g.
//! `motor_vehicle:conditional=no @ (Nov-Mar); delivery @ (2024 Jan 01-2024 Jun 30)`.
//!
//! Only date conditions are evaluated. Everything else (opening hours,
//! weights, weather) is kept as [`Condition::Raw`] and is never active,
//! so an unreadable condition can neither open nor close a way.
//!
//! See: https://wiki.openstreetmap.org/wiki/Conditional_restrictions

use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate};
use itertools::Itertools;
use log::trace;

use crate::primitives::AccessValue;
use crate::tags::{TagString, WayTags};

/// One side of a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// A calendar day without a year, repeating annually.
    Annual { month: u32, day: u32 },
    /// A fixed calendar date.
    Fixed(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateBound,
    pub to: DateBound,
}

impl DateRange {
    /// Whether `date` lies within the range, both ends inclusive.
    /// Annual ranges may wrap over the new year (`Nov-Mar`).
    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.from, self.to) {
            (DateBound::Fixed(from), DateBound::Fixed(to)) => from <= date && date <= to,
            (
                DateBound::Annual {
                    month: fm,
                    day: fd,
                },
                DateBound::Annual {
                    month: tm,
                    day: td,
                },
            ) => {
                let at = (date.month(), date.day());
                if (fm, fd) <= (tm, td) {
                    (fm, fd) <= at && at <= (tm, td)
                } else {
                    at >= (fm, fd) || at <= (tm, td)
                }
            }
            _ => false,
        }
    }

    fn parse(text: &str) -> Option<DateRange> {
        let text = text.trim();

        match text.split_once('-') {
            Some((from, to)) => {
                let (from, from_is_month) = parse_bound(from, true)?;
                let (to, to_is_month) = parse_bound(to, false)?;

                // `Nov-Mar` and `Jan 01-Mar 31` are fine, `Nov-2024 Mar 01` is not.
                let consistent = matches!(
                    (from, to),
                    (DateBound::Annual { .. }, DateBound::Annual { .. })
                        | (DateBound::Fixed(_), DateBound::Fixed(_))
                );

                (consistent && from_is_month == to_is_month).then_some(DateRange { from, to })
            }
            None => {
                let (from, _) = parse_bound(text, true)?;
                let (to, _) = parse_bound(text, false)?;
                Some(DateRange { from, to })
            }
        }
    }
}

/// Parses `Mar`, `Mar 15` or `2024 Mar 15`. A bare month expands to its
/// first day when it starts a range and to its last day when it ends one.
/// The flag reports whether the bound was a bare month.
fn parse_bound(text: &str, start: bool) -> Option<(DateBound, bool)> {
    let parts = text.split_whitespace().collect_vec();

    match parts.as_slice() {
        [month] => {
            let month = Month::from_str(month).ok()?.number_from_month();
            let day = if start { 1 } else { 31 };
            Some((DateBound::Annual { month, day }, true))
        }
        [month, day] => {
            let month = Month::from_str(month).ok()?.number_from_month();
            let day = day.parse::<u32>().ok().filter(|d| (1..=31).contains(d))?;
            Some((DateBound::Annual { month, day }, false))
        }
        [year, month, day] => {
            let year = year.parse::<i32>().ok()?;
            let month = Month::from_str(month).ok()?.number_from_month();
            let day = day.parse::<u32>().ok()?;
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            Some((DateBound::Fixed(date), false))
        }
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Date(DateRange),
    Raw(String),
}

impl Condition {
    pub fn parse(text: &str) -> Condition {
        let text = text.trim();
        let inner = text
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .unwrap_or(text);

        match DateRange::parse(inner) {
            Some(range) => Condition::Date(range),
            None => {
                trace!("Unsupported access condition: {inner}");
                Condition::Raw(inner.to_string())
            }
        }
    }

    /// Whether the condition holds on `date`. Without a reference date
    /// no condition is considered active.
    pub fn is_active(&self, date: Option<NaiveDate>) -> bool {
        match (self, date) {
            (Condition::Date(range), Some(date)) => range.contains(date),
            _ => false,
        }
    }
}

/// A single `value @ (condition)` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalEntry {
    /// `None` when the value is not a known access value.
    pub value: Option<AccessValue>,
    pub condition: Condition,
}

impl ConditionalEntry {
    pub fn parse(clause: &str) -> Option<ConditionalEntry> {
        let (value, condition) = clause.split_once('@')?;

        Some(ConditionalEntry {
            value: AccessValue::parse(value),
            condition: Condition::parse(condition),
        })
    }
}

/// Splits on `;` outside of parentheses, since conditions may
/// themselves contain `;` (`no @ (Mo 08:00-10:00; Tu 09:00-11:00)`).
fn split_clauses(value: &str) -> Vec<&str> {
    let mut clauses = vec![];
    let mut depth = 0usize;
    let mut start = 0usize;

    for (index, ch) in value.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                clauses.push(&value[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }

    clauses.push(&value[start..]);
    clauses
        .into_iter()
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .collect()
}

/// All conditional clauses attached to a set of restriction keys.
#[derive(Debug, Clone, Default)]
pub struct ConditionalAccess {
    entries: Vec<ConditionalEntry>,
}

impl ConditionalAccess {
    /// Collects the `<key>:conditional` tags for each of `keys`.
    pub fn from_tags<S: AsRef<str>>(tags: &WayTags, keys: &[S]) -> Self {
        let entries = keys
            .iter()
            .filter_map(|key| tags.get(&format!("{}:{}", key.as_ref(), TagString::CONDITIONAL)))
            .flat_map(split_clauses)
            .filter_map(ConditionalEntry::parse)
            .collect();

        ConditionalAccess { entries }
    }

    pub fn entries(&self) -> &[ConditionalEntry] {
        &self.entries
    }

    fn any_active(&self, values: &[AccessValue], date: Option<NaiveDate>) -> bool {
        self.entries.iter().any(|entry| {
            entry.value.is_some_and(|value| values.contains(&value))
                && entry.condition.is_active(date)
        })
    }

    /// An otherwise permitted way is closed by an active restricting clause.
    pub fn restricts(&self, restricted: &[AccessValue], date: Option<NaiveDate>) -> bool {
        self.any_active(restricted, date)
    }

    /// An otherwise restricted way is opened by an active permitting clause.
    pub fn permits(&self, intended: &[AccessValue], date: Option<NaiveDate>) -> bool {
        self.any_active(intended, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_annual_range_wraps_new_year() {
        let Condition::Date(range) = Condition::parse("(Nov-Mar)") else {
            panic!("must parse as a date range");
        };

        assert!(range.contains(date(2024, 12, 24)));
        assert!(range.contains(date(2024, 3, 31)));
        assert!(range.contains(date(2024, 11, 1)));
        assert!(!range.contains(date(2024, 7, 1)));
        assert!(!range.contains(date(2024, 4, 1)));
    }

    #[test]
    fn test_day_and_fixed_ranges() {
        let Condition::Date(summer) = Condition::parse("Jun 15-Sep 15") else {
            panic!("must parse as a date range");
        };
        assert!(summer.contains(date(2023, 8, 1)));
        assert!(!summer.contains(date(2023, 9, 16)));

        let Condition::Date(fixed) = Condition::parse("2019 Jan 01-2019 Dec 31") else {
            panic!("must parse as a date range");
        };
        assert!(fixed.contains(date(2019, 6, 1)));
        assert!(!fixed.contains(date(2020, 6, 1)));
    }

    #[test]
    fn test_unsupported_conditions_are_inactive() {
        let condition = Condition::parse("(Mo-Fr 07:00-19:00)");
        assert!(matches!(condition, Condition::Raw(_)));
        assert!(!condition.is_active(Some(date(2024, 1, 1))));

        let condition = Condition::parse("weight>7.5");
        assert!(!condition.is_active(Some(date(2024, 1, 1))));
    }

    #[test]
    fn test_no_reference_date_is_inactive() {
        assert!(!Condition::parse("Jan-Dec").is_active(None));
    }

    #[test]
    fn test_clauses_from_tags() {
        let tags = WayTags::from([
            (
                "motor_vehicle:conditional",
                "no @ (Nov-Mar); yes @ (Mo 08:00-10:00; Tu 09:00-11:00)",
            ),
            ("access:conditional", "destination @ (2024 Jan 01-2024 Jan 31)"),
        ]);

        let access = ConditionalAccess::from_tags(&tags, &["motor_vehicle", "access"]);
        assert_eq!(access.entries().len(), 3);
        assert_eq!(access.entries()[0].value, Some(AccessValue::No));
        assert_eq!(access.entries()[1].value, Some(AccessValue::Yes));
        assert!(matches!(access.entries()[1].condition, Condition::Raw(_)));

        let restricted = [AccessValue::No, AccessValue::Private];
        let intended = [AccessValue::Yes];

        assert!(access.restricts(&restricted, Some(date(2024, 1, 10))));
        assert!(!access.restricts(&restricted, Some(date(2024, 6, 10))));
        assert!(!access.permits(&intended, Some(date(2024, 1, 10))));
    }
}
