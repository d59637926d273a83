use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::models::{Item, Receipt};
use crate::scoring::decimal::{self, DecimalError};

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const ITEM_PAIR_POINTS: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

const QUARTER: Decimal = dec!(0.25);
const DESCRIPTION_PRICE_MULTIPLIER: Decimal = dec!(0.2);

const PURCHASE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Points contributed by each rule for a single receipt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointsBreakdown {
    /// One point per ASCII letter or digit in the retailer name
    pub retailer: u64,
    /// Total has no cents
    pub round_dollar: u64,
    /// Total is a multiple of 0.25
    pub quarter_multiple: u64,
    /// Five points for every two items
    pub item_pairs: u64,
    /// Price-based bonus for items whose trimmed description length is a multiple of 3
    pub item_descriptions: u64,
    /// Day of purchase is odd
    pub odd_day: u64,
    /// Purchased between 2:00pm and 4:00pm
    pub afternoon: u64,
}

impl PointsBreakdown {
    /// Sum of all contributions, saturating at `u64::MAX`
    pub fn total(&self) -> u64 {
        [
            self.retailer,
            self.round_dollar,
            self.quarter_multiple,
            self.item_pairs,
            self.item_descriptions,
            self.odd_day,
            self.afternoon,
        ]
        .into_iter()
        .fold(0, u64::saturating_add)
    }
}

/// Calculate the points awarded for a receipt
pub fn calculate_points(receipt: &Receipt) -> u64 {
    calculate_breakdown(receipt).total()
}

/// Evaluate every rule independently
///
/// Never fails: a malformed total voids the two total-based rules, a malformed
/// item price voids that item's description bonus, and a malformed date or time
/// is evaluated as `0001-01-01 00:00`.
pub fn calculate_breakdown(receipt: &Receipt) -> PointsBreakdown {
    let (round_dollar, quarter_multiple) = total_points(&receipt.total);
    let purchased_at = purchase_datetime(&receipt.purchase_date, &receipt.purchase_time);

    PointsBreakdown {
        retailer: strip_non_alphanumeric_chars(&receipt.retailer).len() as u64,
        round_dollar,
        quarter_multiple,
        item_pairs: (receipt.items.len() as u64 / 2) * ITEM_PAIR_POINTS,
        item_descriptions: receipt
            .items
            .iter()
            .map(item_description_points)
            .fold(0, u64::saturating_add),
        odd_day: if purchased_at.day() % 2 == 1 { ODD_DAY_POINTS } else { 0 },
        afternoon: if in_afternoon_window(purchased_at.hour(), purchased_at.minute()) {
            AFTERNOON_POINTS
        } else {
            0
        },
    }
}

/// Keep only ASCII letters and digits
pub fn strip_non_alphanumeric_chars(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Round-dollar and quarter-multiple contributions of the receipt total
fn total_points(total: &str) -> (u64, u64) {
    let total = match decimal::parse_decimal(total) {
        Ok(total) => total,
        Err(err) => {
            debug!(error = %err, "Unparseable receipt total, skipping total rules");
            return (0, 0);
        }
    };

    let round_dollar = if total == total.floor() { ROUND_DOLLAR_POINTS } else { 0 };

    let quarter_multiple = match decimal::floor_mod(total, QUARTER) {
        Ok(remainder) if remainder.is_zero() => QUARTER_MULTIPLE_POINTS,
        _ => 0,
    };

    (round_dollar, quarter_multiple)
}

fn item_description_points(item: &Item) -> u64 {
    // Byte length of the trimmed description; an empty description never qualifies
    let trimmed_len = item.short_description.trim().len();
    if trimmed_len == 0 || trimmed_len % 3 != 0 {
        return 0;
    }

    match description_bonus(&item.price) {
        Ok(points) => points,
        Err(err) => {
            debug!(price = %item.price, error = %err, "Skipping item with unparseable price");
            0
        }
    }
}

/// `ceil(price * 0.2)`, floored at zero
fn description_bonus(price: &str) -> Result<u64, DecimalError> {
    let price = decimal::parse_decimal(price)?;
    let bonus = decimal::ceil_mul(price, DESCRIPTION_PRICE_MULTIPLIER)?;
    Ok(u64::try_from(bonus).unwrap_or(0))
}

fn purchase_datetime(date: &str, time: &str) -> NaiveDateTime {
    let raw = format!("{} {}", date, time);
    NaiveDateTime::parse_from_str(&raw, PURCHASE_DATETIME_FORMAT).unwrap_or_else(|err| {
        debug!(purchased_at = %raw, error = %err, "Unparseable purchase date/time");
        zero_datetime()
    })
}

fn zero_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// 14:01 through 15:59 inclusive
fn in_afternoon_window(hour: u32, minute: u32) -> bool {
    match hour {
        14 => minute > 0,
        15 => true,
        _ => false,
    }
}
