use chrono::NaiveDate;
use std::iter::Peekable;

/// Anything that belongs to a calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Which pending date the merge emits first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selector {
    /// Smallest date first; forward searches.
    #[default]
    Earliest,
    /// Largest date first; backward searches.
    Latest,
}

impl Selector {
    fn prefers(&self, candidate: NaiveDate, other: NaiveDate) -> bool {
        match self {
            Selector::Earliest => candidate <= other,
            Selector::Latest => candidate >= other,
        }
    }
}

/// Merges a regular stream with an override stream, both ordered by date in the
/// selector's direction.
///
/// Whenever the pending regular item falls on the date of the pending override, the
/// regular item is dropped, so a date is served either by the regular stream or by
/// the override stream, never both. Once overrides run out the regular stream is
/// passed through unchanged. The regular stream may be infinite; at most one of its
/// items is pulled ahead of what the consumer asks for.
pub struct Linear<R, S>
where
    R: Iterator,
    S: Iterator<Item = R::Item>,
{
    regular: Peekable<R>,
    overrides: Peekable<S>,
    selector: Selector,
}

impl<R, S> Linear<R, S>
where
    R: Iterator,
    S: Iterator<Item = R::Item>,
    R::Item: Dated,
{
    pub fn new(regular: R, overrides: S, selector: Selector) -> Self {
        Self {
            regular: regular.peekable(),
            overrides: overrides.peekable(),
            selector,
        }
    }
}

impl<R, S> Iterator for Linear<R, S>
where
    R: Iterator,
    S: Iterator<Item = R::Item>,
    R::Item: Dated,
{
    type Item = R::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(override_date) = self.overrides.peek().map(Dated::date) else {
                return self.regular.next();
            };
            let Some(regular_date) = self.regular.peek().map(Dated::date) else {
                return self.overrides.next();
            };
            if regular_date == override_date {
                self.regular.next();
                continue;
            }
            return if self.selector.prefers(regular_date, override_date) {
                self.regular.next()
            } else {
                self.overrides.next()
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Item(NaiveDate, &'static str);

    impl Dated for Item {
        fn date(&self) -> NaiveDate {
            self.0
        }
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2006, 1, day).unwrap()
    }

    #[test]
    fn override_replaces_every_regular_item_on_its_date() {
        let regular = vec![Item(d(2), "r1"), Item(d(2), "r2"), Item(d(3), "r3")];
        let overrides = vec![Item(d(2), "s1")];
        let merged: Vec<_> =
            Linear::new(regular.into_iter(), overrides.into_iter(), Selector::Earliest)
                .map(|item| item.1)
                .collect();
        assert_eq!(merged, vec!["s1", "r3"]);
    }

    #[test]
    fn latest_selector_merges_descending_streams() {
        let regular = vec![Item(d(9), "r9"), Item(d(5), "r5"), Item(d(2), "r2")];
        let overrides = vec![Item(d(7), "s7"), Item(d(5), "s5")];
        let merged: Vec<_> =
            Linear::new(regular.into_iter(), overrides.into_iter(), Selector::Latest)
                .map(|item| item.1)
                .collect();
        assert_eq!(merged, vec!["r9", "s7", "s5", "r2"]);
    }

    #[test]
    fn empty_regular_stream_yields_overrides() {
        let overrides = vec![Item(d(4), "s4"), Item(d(6), "s6")];
        let regular = std::iter::empty::<Item>();
        let merged: Vec<_> = Linear::new(regular, overrides.into_iter(), Selector::Earliest)
            .map(|item| item.1)
            .collect();
        assert_eq!(merged, vec!["s4", "s6"]);
    }
}
