//! Aggregate counts shown on the admin dashboard

use serde::{Deserialize, Deserializer, Serialize};

/// Site visit counts over rolling windows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisitCounts {
    /// Visits today
    pub daily: u64,
    /// Visits over the last 7 days
    pub weekly: u64,
    /// Visits over the last 30 days
    pub monthly: u64,
    /// Visits over the last 365 days
    pub yearly: u64,
}

/// Booking totals by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingCounts {
    /// All bookings
    pub total: u64,
    /// Awaiting review
    pub pending: u64,
    /// Confirmed
    pub confirmed: u64,
    /// Completed
    pub completed: u64,
    /// Cancelled
    pub cancelled: u64,
}

/// Bookings per calendar month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    /// Month number (1-12)
    #[serde(deserialize_with = "whole_number")]
    pub month: u32,
    /// Bookings created that month
    #[serde(deserialize_with = "whole_number")]
    pub count: u64,
}

/// Bookings per destination
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationCount {
    /// Destination slug
    pub destination: String,
    /// Bookings for it
    #[serde(deserialize_with = "whole_number")]
    pub count: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Integer(u64),
    Float(f64),
    Text(String),
}

/// Aggregates computed by the database may arrive as `10`, `10.0` or `"10"`
fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    use serde::de::Error;

    let value = match LooseNumber::deserialize(deserializer)? {
        LooseNumber::Integer(value) => Some(value),
        LooseNumber::Float(value) => whole_float(value),
        LooseNumber::Text(text) => {
            let text = text.trim();
            text.parse::<u64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(whole_float))
        }
    };

    value
        .and_then(|value| T::try_from(value).ok())
        .ok_or_else(|| D::Error::custom("expected a non-negative whole number"))
}

/// Trend series
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trends {
    /// Monthly booking counts
    pub monthly_bookings: Vec<MonthlyCount>,
}

/// Payload of `GET /admin/dashboard/stats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    /// Visit counts
    pub visits: VisitCounts,
    /// Booking counts
    pub bookings: BookingCounts,
    /// Trend series
    pub trends: Trends,
    /// Most booked destinations, busiest first
    pub top_destinations: Vec<DestinationCount>,
}

fn whole_float(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        format!("{value:.0}").parse().ok()
    } else {
        None
    }
}
