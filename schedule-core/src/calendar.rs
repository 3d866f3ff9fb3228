//! Recurring-weekly date arithmetic
//!
//! Every storefront page used to carry its own day-of-week wraparound
//! conditionals; this module is the single shared implementation. The wire
//! document numbers weekdays from Sunday (0) through Saturday (6).

use chrono::Weekday;

/// Days until the next occurrence of `target`, counting from `from`.
///
/// Returns 0 when the days match, unless `strictly_after` forces the
/// occurrence into the following week (7).
pub fn next_occurrence_offset(from: Weekday, target: Weekday, strictly_after: bool) -> u8 {
    let offset = (sunday_index(target) + 7 - sunday_index(from)) % 7;
    if offset == 0 && strictly_after { 7 } else { offset }
}

/// Weekday from the wire's Sunday-based index; `None` outside 0..=6
pub fn weekday_from_sunday_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Inverse of [`weekday_from_sunday_index`]
pub fn sunday_index(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_day_non_strict_is_zero() {
        for index in 0..7 {
            let day = weekday_from_sunday_index(index).unwrap();
            assert_eq!(next_occurrence_offset(day, day, false), 0);
        }
    }

    #[test]
    fn test_same_day_strict_is_seven() {
        for index in 0..7 {
            let day = weekday_from_sunday_index(index).unwrap();
            assert_eq!(next_occurrence_offset(day, day, true), 7);
        }
    }

    #[test]
    fn test_forward_within_week() {
        assert_eq!(next_occurrence_offset(Weekday::Mon, Weekday::Wed, false), 2);
        assert_eq!(next_occurrence_offset(Weekday::Mon, Weekday::Wed, true), 2);
    }

    #[test]
    fn test_wraparound_into_next_week() {
        // Friday -> Tuesday crosses the weekend
        assert_eq!(next_occurrence_offset(Weekday::Fri, Weekday::Tue, false), 4);
        // Saturday -> Sunday is one day, not negative six
        assert_eq!(next_occurrence_offset(Weekday::Sat, Weekday::Sun, false), 1);
    }

    #[test]
    fn test_sunday_index_round_trip() {
        for index in 0..7u8 {
            let day = weekday_from_sunday_index(index).unwrap();
            assert_eq!(sunday_index(day), index);
        }
        assert_eq!(weekday_from_sunday_index(7), None);
        assert_eq!(weekday_from_sunday_index(255), None);
    }
}
