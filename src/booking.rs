//! Booking cost: inclusive day count times the daily rate.

use crate::error::CatalogError;
use crate::models::Listing;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar date format accepted from renters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Duration and price of a booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BookingQuote {
    pub days: u32,
    pub total: f64,
}

/// Compute the quote for renting at `rate` from `from` to `to`, both days included
pub fn compute_booking(rate: f64, from: NaiveDate, to: NaiveDate) -> Result<BookingQuote, CatalogError> {
    if to < from {
        return Err(CatalogError::InvalidRange(format!(
            "end date {to} is before start date {from}"
        )));
    }
    let span = (to - from).num_days() + 1;
    let days = u32::try_from(span)
        .map_err(|_| CatalogError::InvalidRange(format!("{span} days is too long")))?;
    Ok(BookingQuote {
        days,
        total: f64::from(days) * rate,
    })
}

/// Parse a `YYYY-MM-DD` date, treating blanks and garbage as an invalid range
pub fn parse_date(raw: &str) -> Result<NaiveDate, CatalogError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CatalogError::InvalidRange("please pick dates".to_string()));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| CatalogError::InvalidRange(format!("cannot read date '{raw}': {e}")))
}

/// Same as [`compute_booking`] for dates still in text form
pub fn compute_booking_str(rate: f64, from: &str, to: &str) -> Result<BookingQuote, CatalogError> {
    compute_booking(rate, parse_date(from)?, parse_date(to)?)
}

/// A renter's request to book one listing over a date range
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRequest {
    pub listing_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl BookingRequest {
    /// Price the request against the listing and collect the owner's contact
    pub fn summarize(&self, listing: &Listing) -> Result<BookingSummary, CatalogError> {
        if listing.id != self.listing_id {
            return Err(CatalogError::ListingNotFound(self.listing_id.clone()));
        }
        let quote = compute_booking(listing.rate_per_day, self.from, self.to)?;
        Ok(BookingSummary {
            title: listing.title.clone(),
            from: self.from,
            to: self.to,
            quote,
            owner_name: listing.owner_name.clone(),
            owner_phone: listing.owner_phone.clone(),
        })
    }
}

/// A provisional booking; the renter still has to confirm with the owner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingSummary {
    pub title: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub quote: BookingQuote,
    pub owner_name: String,
    pub owner_phone: String,
}

impl fmt::Display for BookingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Item: {}", self.title)?;
        writeln!(f, "Dates: {} -> {} ({} days)", self.from, self.to, self.quote.days)?;
        writeln!(f, "Total: ₹{:.2}", self.quote.total)?;
        write!(f, "Contact owner to confirm: {} ({})", self.owner_name, self.owner_phone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::seed::seed_listings;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_same_day_is_one_day() {
        let quote = compute_booking(3500.0, date("2024-03-01"), date("2024-03-01")).unwrap();
        assert_eq!(quote, BookingQuote { days: 1, total: 3500.0 });
    }

    #[test]
    fn test_next_day_is_two_days() {
        let quote = compute_booking(1800.0, date("2024-02-28"), date("2024-02-29")).unwrap();
        assert_eq!(quote.days, 2);
        assert_eq!(quote.total, 3600.0);
    }

    #[test]
    fn test_range_across_month_end() {
        let quote = compute_booking(100.0, date("2024-01-30"), date("2024-02-02")).unwrap();
        assert_eq!(quote.days, 4);
    }

    #[test]
    fn test_inverted_range_fails() {
        let err = compute_booking(100.0, date("2024-03-02"), date("2024-03-01")).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRange(_)));
    }

    #[test]
    fn test_missing_or_bad_dates_fail() {
        assert!(matches!(
            compute_booking_str(100.0, "", "2024-03-01"),
            Err(CatalogError::InvalidRange(_))
        ));
        assert!(matches!(
            compute_booking_str(100.0, "2024-03-01", "next week"),
            Err(CatalogError::InvalidRange(_))
        ));
        assert_eq!(
            compute_booking_str(100.0, "2024-03-01", "2024-03-03").unwrap().days,
            3
        );
    }

    #[test]
    fn test_summary_carries_owner_contact() {
        let listing = seed_listings().remove(1);
        let request = BookingRequest {
            listing_id: listing.id.clone(),
            from: date("2024-06-10"),
            to: date("2024-06-12"),
        };
        let summary = request.summarize(&listing).unwrap();
        assert_eq!(summary.quote.total, 27000.0);
        assert_eq!(summary.owner_name, "Sita");
        assert!(summary.to_string().contains("+91-90000-22222"));
    }
}
