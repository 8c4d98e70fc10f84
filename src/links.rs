//! Links derived from the current location, E.g. "last week" or "this day only".
//!
//! Every builder upserts its parameters into the search of the given location and keeps
//! all other parameters as they are.

use crate::error::{DateSnafu, FormatSnafu, LinkError, OutOfRangeSnafu};
use crate::location::Location;
use snafu::{OptionExt, ResultExt};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Month};

/// Dates in links are written as `2006-Jan-02`.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month repr:short]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    Week,
    Month,
    Year,
}

impl RangeKind {
    /// First day of the range ending `end`.
    pub fn start(self, end: Date) -> Result<Date, LinkError> {
        match self {
            RangeKind::Week => end.checked_sub(Duration::days(7)).context(OutOfRangeSnafu),
            RangeKind::Month => months_before(end, 1),
            RangeKind::Year => months_before(end, 12),
        }
    }
}

pub fn format_date(date: Date) -> Result<String, LinkError> {
    date.format(DATE_FORMAT).context(FormatSnafu)
}

/// A range ending `today`, spanning the given kind.
pub fn by_range(current: &Location, kind: RangeKind, today: Date) -> Result<Location, LinkError> {
    let start = kind.start(today)?;
    Ok(current
        .upsert("end", Some(&format_date(today)?))
        .upsert("start", Some(&format_date(start)?)))
}

/// A single day at the finest precision.
pub fn by_time(current: &Location, date: Date) -> Result<Location, LinkError> {
    let date = format_date(date)?;
    Ok(current
        .upsert("end", Some(&date))
        .upsert("start", Some(&date))
        .upsert("precision", Some("3")))
}

pub fn by_precision(current: &Location, precision: &str) -> Location {
    current.upsert("precision", Some(precision))
}

/// Restricts results to rows where `key` matches `value`.
pub fn by_match(current: &Location, key: &str, value: &str) -> Location {
    current.upsert("match", Some(&format!("{key},{value}")))
}

/// The chart view of `collection`, keeping the current query.
pub fn chart(current: &Location, collection: &str) -> Location {
    current.with_pathname(format!("{collection}/chart"))
}

/// Same day `months` months earlier. Days past the end of the target month are clamped to its
/// last day, so that 31st of March minus one month is the 29th (or 28th) of February.
fn months_before(date: Date, months: u8) -> Result<Date, LinkError> {
    let index = date.year() * 12 + i32::from(u8::from(date.month())) - 1 - i32::from(months);
    let year = index.div_euclid(12);
    let month = u8::try_from(index.rem_euclid(12) + 1)
        .ok()
        .context(OutOfRangeSnafu)?;
    let month = Month::try_from(month).context(DateSnafu)?;
    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).context(DateSnafu)
}
