use chrono::NaiveDate;
use serde::Serialize;

/// GST applied to every stay.
pub const TAX_RATE: f64 = 0.12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pricing {
    pub nights: i64,
    pub room_rate: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

pub struct PricingService;

impl PricingService {
    /// Number of nights between check-in and check-out. An unset date or a
    /// check-out on/before check-in yields zero nights; the caller decides
    /// whether that blocks submission.
    pub fn calculate_nights(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> i64 {
        match (check_in, check_out) {
            (Some(start), Some(end)) => (end - start).num_days().max(0),
            _ => 0,
        }
    }

    /// Price a stay. Never fails: invalid or incomplete ranges come back as
    /// a zero total. Rounding happens only at the display and minor-unit
    /// boundaries, never here.
    pub fn compute(
        rate: f64,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    ) -> Pricing {
        let nights = Self::calculate_nights(check_in, check_out);
        let subtotal = nights as f64 * rate;
        let tax = subtotal * TAX_RATE;

        Pricing {
            nights,
            room_rate: rate,
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Amount in the gateway's minor unit (paise), rounded to the nearest
    /// integer.
    pub fn to_minor_units(total: f64) -> i64 {
        (total * 100.0).round() as i64
    }
}
