//! Blackout (holiday) delivery dates
//!
//! Deployments carry a static list of closed dates, e.g. the Christmas and
//! New Year kitchen shutdown, in `D.M.YYYY` form.

use chrono::NaiveDate;

/// Calendar dates excluded from delivery
#[derive(Debug, Clone, Default)]
pub struct BlackoutDates {
    dates: Vec<NaiveDate>,
}

impl BlackoutDates {
    /// Parse deployment strings in the storefront's `D.M.YYYY` shape.
    /// Unparseable entries are skipped with a warning.
    pub fn from_strings<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut dates = Vec::new();
        for entry in entries {
            match NaiveDate::parse_from_str(entry, "%d.%m.%Y") {
                Ok(date) => dates.push(date),
                Err(e) => {
                    tracing::warn!("Skipping unparseable blackout date '{}': {}", entry, e);
                }
            }
        }
        Self { dates }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }
}

impl FromIterator<NaiveDate> for BlackoutDates {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}
