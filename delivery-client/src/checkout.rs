//! Checkout flow: step dispatch and the delivery controller
//!
//! The controller owns the fetched schedule and the session attributes and
//! re-runs the calculator on every region or time change. Computation is
//! synchronous and completes within one interaction; a superseded result is
//! simply overwritten by the next call.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::client::{ScheduleClient, ScheduleSource};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::AttributeStore;
use schedule_core::models::{
    DeliveryAttributes, DeliveryScheduleDocument, HourSlot, Region, WeeklyDeliveryRule,
    format_delivery_day,
};
use schedule_core::{
    DeliveryLocation, DeliveryWindow, KitchenClock, ScheduleOptions, SpecialDay,
    calculator, calendar, cutoff, location,
};

// ============================================================================
// Checkout steps
// ============================================================================

/// Platform checkout steps, previously dispatched by raw string key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    ContactInformation,
    ShippingMethod,
    PaymentMethod,
}

impl FromStr for CheckoutStep {
    type Err = ClientError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "contact_information" => Ok(Self::ContactInformation),
            "shipping_method" => Ok(Self::ShippingMethod),
            "payment_method" => Ok(Self::PaymentMethod),
            other => Err(ClientError::InvalidResponse(format!(
                "Unknown checkout step: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ContactInformation => "contact_information",
            Self::ShippingMethod => "shipping_method",
            Self::PaymentMethod => "payment_method",
        };
        write!(f, "{name}")
    }
}

/// Whether a step may initialize or must bounce the customer back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDecision {
    Proceed,
    RedirectTo(CheckoutStep),
}

/// Guard for entering a checkout step.
///
/// Without a confirmed location everything past contact details bounces
/// back. The payment step additionally requires the selected shipping
/// method to agree with the subscription flag: subscription carts ship via
/// the subscription (or standard) method, one-off carts never via the
/// subscription method.
pub fn step_guard(
    step: CheckoutStep,
    location_confirmed: bool,
    attributes: &DeliveryAttributes,
    selected_shipping: Option<&str>,
    subscription_method: &str,
    standard_method: &str,
) -> StepDecision {
    if !location_confirmed && step != CheckoutStep::ContactInformation {
        return StepDecision::RedirectTo(CheckoutStep::ContactInformation);
    }
    if step == CheckoutStep::PaymentMethod {
        let Some(method) = selected_shipping else {
            return StepDecision::RedirectTo(CheckoutStep::ShippingMethod);
        };
        let consistent = if attributes.cart_subscription {
            method == subscription_method || method == standard_method
        } else {
            method != subscription_method
        };
        if !consistent {
            return StepDecision::RedirectTo(CheckoutStep::ShippingMethod);
        }
    }
    StepDecision::Proceed
}

// ============================================================================
// Controller
// ============================================================================

/// Outcome of a date computation, for UI rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Dates to offer, ascending
    Available(Vec<NaiveDate>),
    /// Hard failure state: render "Delivery is not available" and disable
    /// checkout progression
    NotAvailable,
}

/// Owns the fetched schedule document and the session attributes.
pub struct DeliveryController<S: AttributeStore> {
    config: ClientConfig,
    store: S,
    schedule: Option<DeliveryScheduleDocument>,
    location: Option<DeliveryLocation>,
}

impl<S: AttributeStore> DeliveryController<S> {
    /// Create a controller, restoring a still-fresh location selection from
    /// the store
    pub fn new(config: ClientConfig, store: S) -> Self {
        let location = store
            .read()
            .and_then(|attrs| attrs.delivery_location)
            .and_then(|raw| DeliveryLocation::parse(&raw).ok());
        Self {
            config,
            store,
            schedule: None,
            location,
        }
    }

    /// Install a fetched schedule document
    pub fn set_schedule(&mut self, document: DeliveryScheduleDocument) {
        self.schedule = Some(document);
    }

    /// Fetch and install the schedule from a source
    pub async fn load(&mut self, source: &dyn ScheduleSource) -> ClientResult<()> {
        let document = source.fetch_schedule().await?;
        tracing::debug!(regions = document.regions.len(), "Delivery schedule loaded");
        self.schedule = Some(document);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.schedule.is_some()
    }

    fn schedule(&self) -> ClientResult<&DeliveryScheduleDocument> {
        self.schedule.as_ref().ok_or(ClientError::MissingScheduleData)
    }

    fn region(&self) -> ClientResult<&Region> {
        let document = self.schedule()?;
        let selected = self.location.as_ref().ok_or(ClientError::NoLocation)?;
        location::region_by_name(&document.regions, &selected.region)
            .ok_or_else(|| ClientError::UnknownRegion(selected.region.clone()))
    }

    fn kitchen(&self, customer_now: DateTime<FixedOffset>) -> ClientResult<KitchenClock> {
        let document = self.schedule()?;
        Ok(KitchenClock::now_from(
            customer_now,
            document.general.kitchen_offset_minutes,
            self.config.offset_mode,
        ))
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Attributes as currently stored (fresh), or defaults
    pub fn attributes(&self) -> DeliveryAttributes {
        self.store.read().unwrap_or_default()
    }

    fn update_attributes(&self, mutate: impl FnOnce(&mut DeliveryAttributes)) {
        let mut attributes = self.attributes();
        mutate(&mut attributes);
        self.store.write(attributes);
    }

    /// Currently selected delivery location, if any
    pub fn location(&self) -> Option<&DeliveryLocation> {
        self.location.as_ref()
    }

    /// Select the delivery location from a place string
    pub fn select_location(&mut self, place: &str) -> ClientResult<()> {
        let parsed = DeliveryLocation::parse(place)?;
        self.update_attributes(|attrs| {
            attrs.delivery_location = Some(place.to_string());
        });
        self.location = Some(parsed);
        Ok(())
    }

    /// Resolve a raw customer address line to a serviceable place and select
    /// it. Returns `false` when no region serves the address.
    pub fn select_address(&mut self, address_line: &str) -> ClientResult<bool> {
        let place = {
            let document = self.schedule()?;
            location::region_for_address(&document.regions, address_line)
                .map(|(_, place)| place.clone())
        };
        match place {
            Some(place) => {
                self.select_location(&place)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Record the picked day chip, deriving the expedited flags from the
    /// current window
    pub fn select_day(&self, date: NaiveDate, window: &DeliveryWindow) {
        let same_day = date == window.same_day_date && window.same_day_open();
        let next_day = matches!(
            window.special_day(),
            Some(SpecialDay::NextDay(special) | SpecialDay::AfterNextDay(special))
                if special == date
        );
        self.update_attributes(|attrs| {
            attrs.delivery_day = Some(format_delivery_day(date));
            attrs.is_same_day_delivery = same_day;
            attrs.is_next_day_delivery = next_day && !same_day;
        });
    }

    /// Record the picked hour slot
    pub fn select_hours(&self, title: &str) {
        self.update_attributes(|attrs| {
            attrs.delivery_hours = Some(title.to_string());
        });
    }

    /// Toggle subscription purchase; the weekly frequency only exists while
    /// subscribed
    pub fn select_subscription(&self, subscription: bool, frequency_weeks: Option<u8>) {
        self.update_attributes(|attrs| {
            attrs.cart_subscription = subscription;
            attrs.frequency_weeks = if subscription { frequency_weeks } else { None };
        });
    }

    // ========================================================================
    // Calculation entry points
    // ========================================================================

    /// Candidate delivery dates for the selected region
    pub fn delivery_dates(
        &self,
        customer_now: DateTime<FixedOffset>,
    ) -> ClientResult<Availability> {
        let document = self.schedule()?;
        let region = self.region()?;
        let kitchen = self.kitchen(customer_now)?;
        let daily_cutoff = cutoff::cutoff_from_parts(document.general.cutoff_time)?;
        let rules = region.weekly_rules();
        let options = ScheduleOptions {
            min_lead_days: self.config.min_lead_days(),
        };

        let dates = calculator::compute_delivery_dates(
            &rules,
            &kitchen,
            daily_cutoff,
            self.config.delivery_days_to_get,
            &self.config.blackouts(),
            &options,
        );
        if dates.is_empty() {
            tracing::warn!(region = %region.name, "No delivery dates available");
            return Ok(Availability::NotAvailable);
        }
        Ok(Availability::Available(dates))
    }

    /// Expedited window for the selected region; empty for plain-schedule
    /// regions
    pub fn delivery_window(
        &self,
        customer_now: DateTime<FixedOffset>,
    ) -> ClientResult<DeliveryWindow> {
        let region = self.region()?;
        let kitchen = self.kitchen(customer_now)?;
        let settings = region.region_delivery_settings.as_deref().unwrap_or(&[]);
        Ok(calculator::same_or_next_day_window(settings, &kitchen))
    }

    /// Hour slots selectable for a chosen delivery date
    pub fn hour_slots(&self, date: NaiveDate) -> ClientResult<Vec<HourSlot>> {
        use chrono::Datelike;

        let document = self.schedule()?;
        let region = self.region()?;
        if let Some(settings) = &region.region_delivery_settings {
            let weekday = date.weekday();
            Ok(settings
                .iter()
                .filter(|entry| {
                    entry.allowed
                        && calendar::weekday_from_sunday_index(entry.delivery) == Some(weekday)
                })
                .flat_map(|entry| entry.delivery_hours.iter().cloned())
                .collect())
        } else {
            Ok(region
                .offered_hours(&document.general.hours)
                .into_iter()
                .map(|option| HourSlot {
                    title: option.title.clone(),
                    help_text: option.content.clone(),
                    ..Default::default()
                })
                .collect())
        }
    }

    /// Billing date for a subscription delivery on `date` under `rule`
    pub fn payment_date_for(&self, date: NaiveDate, rule: &WeeklyDeliveryRule) -> NaiveDate {
        calculator::payment_date(
            date,
            rule.cutoff_dow,
            rule.delivery_dow,
            self.config.payment_lead_days,
        )
    }

    /// Day chips to render for the selected region
    pub fn day_chip_count(&self, window: &DeliveryWindow) -> ClientResult<usize> {
        let region = self.region()?;
        Ok(calculator::display_day_count(
            self.config.is_seven_day_region(&region.name),
            self.config.premium_plan,
            matches!(window.special_day(), Some(SpecialDay::NextDay(_))),
        ))
    }

    /// Subscription lookup with per-email memoization
    pub async fn check_active_subscription(
        &self,
        client: &ScheduleClient,
        email: &str,
    ) -> ClientResult<bool> {
        if let Some(active) = self.store.subscription_memo(email) {
            return Ok(active);
        }
        let active = client.has_active_subscriptions(email).await?;
        self.store.memoize_subscription(email, active);
        Ok(active)
    }
}
