//! Delivery date calculation
//!
//! The cutoff/delivery arithmetic used to live inline on the checkout page,
//! the cart page, the cart drawer, and the account-subscription pages, each
//! copy slightly different. This module is the single implementation; call
//! sites only pick the knobs ([`ScheduleOptions`], strictness of the weekly
//! wraparound) instead of re-deriving the rules.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

use crate::blackout::BlackoutDates;
use crate::calendar::{next_occurrence_offset, weekday_from_sunday_index};
use crate::clock::KitchenClock;
use crate::cutoff::{apply_cutoff, parse_slot_cutoff};
use crate::models::{DaySetting, HourSlot, WeeklyDeliveryRule};

/// How many weeks of candidates are generated before truncating to the
/// requested count; bounds the search when blackouts swallow whole weeks
const BACKFILL_HORIZON_WEEKS: i64 = 52;

/// Tuning knobs for [`compute_delivery_dates`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleOptions {
    /// Minimum days between now and any offered date. Premium meal-plan
    /// deployments require five days of kitchen lead; everyone else zero.
    pub min_lead_days: u8,
}

/// Next `count` selectable delivery dates, ascending and blackout-free.
///
/// An empty rule set yields an empty list: the caller renders the fixed
/// "Delivery is not available" message and blocks checkout progression.
pub fn compute_delivery_dates(
    rules: &[WeeklyDeliveryRule],
    kitchen: &KitchenClock,
    cutoff: NaiveTime,
    count: usize,
    blackouts: &BlackoutDates,
    opts: &ScheduleOptions,
) -> Vec<NaiveDate> {
    if rules.is_empty() || count == 0 {
        return Vec::new();
    }

    let booking_day = apply_cutoff(kitchen, cutoff);
    let booking_advance = (booking_day - kitchen.date()).num_days();
    let booking_dow = booking_day.weekday();

    let mut base: Vec<NaiveDate> = Vec::new();
    for rule in rules {
        // Delivery must be strictly in the future: a delivery matching
        // today's weekday rolls to next week.
        let mut days_to_delivery =
            next_occurrence_offset(booking_dow, rule.delivery_dow, true) as i64;
        let mut days_to_cutoff =
            next_occurrence_offset(booking_dow, rule.cutoff_dow, false) as i64;

        // A cutoff falling today only counts while the kitchen clock has
        // not reached it; at or past it the next opportunity is a week out.
        if days_to_cutoff == 0 && kitchen.time() >= cutoff {
            days_to_cutoff = 7;
        }
        // Malformed configuration: the cutoff would land on/after its own
        // delivery. Push delivery out a week to keep the cutoff strictly
        // before it.
        if days_to_cutoff >= days_to_delivery {
            days_to_delivery += 7;
        }

        let total = booking_advance + days_to_delivery;
        if total < opts.min_lead_days as i64 {
            continue;
        }
        base.push(kitchen.date() + Duration::days(total));
    }

    if base.is_empty() {
        return Vec::new();
    }
    base.sort();
    base.dedup();

    // Weekly extension and blackout filtering together: the set stays
    // sorted and duplicate-free, and a dropped blackout date is backfilled
    // by a later week rather than shrinking the result.
    let mut candidates: BTreeSet<NaiveDate> = BTreeSet::new();
    for week in 0..BACKFILL_HORIZON_WEEKS {
        for &date in &base {
            let candidate = date + Duration::weeks(week);
            if !blackouts.contains(candidate) {
                candidates.insert(candidate);
            }
        }
    }
    candidates.into_iter().take(count).collect()
}

/// Which expedited chip (if any) the storefront prepends to the date list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialDay {
    NextDay(NaiveDate),
    AfterNextDay(NaiveDate),
}

/// Expedited-delivery options for today, tomorrow, and the day after
#[derive(Debug, Clone)]
pub struct DeliveryWindow {
    pub same_day: Vec<HourSlot>,
    pub next_day: Vec<HourSlot>,
    pub after_next_day: Vec<HourSlot>,
    pub same_day_date: NaiveDate,
    pub next_day_date: NaiveDate,
    pub after_next_day_date: NaiveDate,
}

impl DeliveryWindow {
    /// Same-day slots still open right now
    pub fn same_day_open(&self) -> bool {
        !self.same_day.is_empty()
    }

    /// The single expedited chip shown ahead of the regular list: next-day
    /// while its cutoffs are open, otherwise the unconditional
    /// day-after-tomorrow fallback tier.
    pub fn special_day(&self) -> Option<SpecialDay> {
        if !self.next_day.is_empty() {
            Some(SpecialDay::NextDay(self.next_day_date))
        } else if !self.after_next_day.is_empty() {
            Some(SpecialDay::AfterNextDay(self.after_next_day_date))
        } else {
            None
        }
    }
}

/// Hour-level same-day/next-day eligibility for regions with per-day
/// settings.
///
/// Today's slots pass a strictly-before test against their `sddCutoff`,
/// tomorrow's against their `nddCutoff`; the day-after tier skips the test
/// entirely so at least one bookable date survives a late evening. Slots
/// without a title or without a parseable cutoff are skipped.
pub fn same_or_next_day_window(
    day_settings: &[DaySetting],
    kitchen: &KitchenClock,
) -> DeliveryWindow {
    let today = kitchen.date();
    let now = kitchen.time();
    let mut window = DeliveryWindow {
        same_day: Vec::new(),
        next_day: Vec::new(),
        after_next_day: Vec::new(),
        same_day_date: today,
        next_day_date: today + Duration::days(1),
        after_next_day_date: today + Duration::days(2),
    };

    for entry in day_settings.iter().filter(|e| e.sdd_allowed) {
        let Some(delivery_dow) = weekday_from_sunday_index(entry.delivery) else {
            continue;
        };
        let days_out = next_occurrence_offset(kitchen.weekday(), delivery_dow, false);
        for slot in &entry.delivery_hours {
            if slot.title.is_empty() {
                continue;
            }
            match days_out {
                0 => {
                    if let Some(sdd_cutoff) = slot.sdd_cutoff.as_deref().and_then(parse_slot_cutoff)
                        && now < sdd_cutoff
                    {
                        window.same_day.push(slot.clone());
                    }
                }
                1 => {
                    if let Some(ndd_cutoff) = slot.ndd_cutoff.as_deref().and_then(parse_slot_cutoff)
                        && now < ndd_cutoff
                    {
                        window.next_day.push(slot.clone());
                    }
                }
                2 => window.after_next_day.push(slot.clone()),
                _ => {}
            }
        }
    }
    window
}

/// Billing date for a subscription delivery: the cutoff that produced the
/// delivery, minus the billing lead. Day granularity only.
pub fn payment_date(
    delivery_date: NaiveDate,
    cutoff_dow: Weekday,
    delivery_dow: Weekday,
    lead_days_before_cutoff: u8,
) -> NaiveDate {
    let cutoff_offset = next_occurrence_offset(cutoff_dow, delivery_dow, false) as i64;
    delivery_date - Duration::days(cutoff_offset + lead_days_before_cutoff as i64)
}

/// Number of day chips the storefront renders.
///
/// Seven-day metro regions show six, everyone else three; a next-day chip
/// takes one slot from the regular list, while premium plans keep the full
/// quota (their dates already start five days out).
pub fn display_day_count(
    seven_day_region: bool,
    premium_plan: bool,
    has_next_day_chip: bool,
) -> usize {
    let full = if seven_day_region { 6 } else { 3 };
    if premium_plan || !has_next_day_chip {
        full
    } else {
        full - 1
    }
}
