//! Text and JSON rendering of command results

use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use tourbook_client::Notice;
use tourbook_protocol::FieldErrors;
use tourbook_types::{
    Booking, DashboardStats, Destination, HealthStatus, Pagination, StatusAction,
};

/// Where results go and in which shape
#[derive(Debug, Clone, Copy)]
pub(crate) struct Output {
    json: bool,
}

impl Output {
    pub(crate) const fn new(json: bool) -> Self {
        Self { json }
    }

    fn emit<T: Serialize>(self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }

    pub(crate) fn message(self, text: &str) -> Result<()> {
        self.emit(&json!({ "message": text }), || text.to_string())
    }

    pub(crate) fn destinations(self, destinations: &[Destination]) -> Result<()> {
        self.emit(&destinations, || {
            if destinations.is_empty() {
                return "No destinations found".to_string();
            }
            destinations
                .iter()
                .map(destination_row)
                .collect::<Vec<_>>()
                .join("\n")
        })
    }

    pub(crate) fn destination(self, destination: &Destination) -> Result<()> {
        self.emit(destination, || destination_detail(destination))
    }

    pub(crate) fn bookings(self, bookings: &[Booking], pagination: Option<&Pagination>) -> Result<()> {
        let value = json!({ "bookings": bookings, "pagination": pagination });
        self.emit(&value, || {
            let mut lines: Vec<String> = bookings.iter().map(booking_row).collect();
            if lines.is_empty() {
                lines.push("No bookings found".to_string());
            }
            if let Some(p) = pagination {
                lines.push(format!(
                    "Page {} of {} ({} bookings)",
                    p.page,
                    p.pages.max(1),
                    p.total
                ));
            }
            lines.join("\n")
        })
    }

    pub(crate) fn booking(self, booking: &Booking) -> Result<()> {
        self.emit(booking, || booking_detail(booking))
    }

    pub(crate) fn stats(self, stats: &DashboardStats) -> Result<()> {
        self.emit(stats, || stats_summary(stats))
    }

    pub(crate) fn health(self, health: &HealthStatus) -> Result<()> {
        self.emit(health, || {
            let version = health.version.as_deref().unwrap_or("unknown");
            format!("Backend {} (version {version})", health.status)
        })
    }

    /// Result of a form submission; failures go to stderr in text mode
    pub(crate) fn form_result(
        self,
        notice: Option<&Notice>,
        errors: &FieldErrors,
        general: &[String],
    ) -> Result<()> {
        if self.json {
            let value = json!({ "notice": notice, "errors": errors, "general": general });
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(());
        }

        match notice {
            Some(notice) if notice.is_error() => eprintln!("{notice}"),
            Some(notice) => println!("{notice}"),
            None => {}
        }
        for (field, message) in errors.iter() {
            eprintln!("  {}: {message}", field.label());
        }
        for message in general {
            eprintln!("  {message}");
        }
        Ok(())
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

fn destination_row(destination: &Destination) -> String {
    let marker = if destination.is_featured { "*" } else { " " };
    format!(
        "{marker} {:<26} {:<28} {}",
        destination.slug,
        destination.name,
        or_dash(destination.duration.as_deref())
    )
}

fn destination_detail(destination: &Destination) -> String {
    let mut lines = vec![
        destination.name.clone(),
        format!("  Slug:        {}", destination.slug),
        format!("  Duration:    {}", or_dash(destination.duration.as_deref())),
        format!("  Price:       {}", or_dash(destination.price_range.as_deref())),
        format!(
            "  Difficulty:  {}",
            destination
                .difficulty_level
                .map_or_else(|| "-".to_string(), |level| level.to_string())
        ),
        format!(
            "  Best time:   {}",
            or_dash(destination.best_time_to_visit.as_deref())
        ),
    ];
    if !destination.highlights.is_empty() {
        lines.push(format!("  Highlights:  {}", destination.highlights.join(", ")));
    }
    if let Some(description) = destination.description.as_deref() {
        lines.push(String::new());
        lines.push(description.to_string());
    }
    lines.join("\n")
}

fn booking_row(booking: &Booking) -> String {
    let date = booking
        .preferred_date
        .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string());
    format!(
        "{:>5}  {:<16} {:<10} {:<24} {:<26} {date}",
        booking.id,
        booking.booking_reference,
        booking.status.as_str(),
        booking.name,
        or_dash(booking.destination.as_deref()),
    )
}

fn booking_detail(booking: &Booking) -> String {
    let actions = booking
        .available_actions()
        .iter()
        .copied()
        .map(StatusAction::as_str)
        .collect::<Vec<_>>();

    let mut lines = vec![
        format!("Booking {} (#{})", booking.booking_reference, booking.id),
        format!("  Status:      {}", booking.status),
        format!("  Name:        {}", booking.name),
        format!("  Email:       {}", booking.email),
        format!("  Phone:       {}", or_dash(booking.phone.as_deref())),
        format!("  Destination: {}", or_dash(booking.destination.as_deref())),
        format!(
            "  Date:        {}",
            booking
                .preferred_date
                .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
        ),
        format!("  Guests:      {}", booking.guests),
        format!(
            "  Quote:       {}",
            booking
                .estimated_cost
                .map_or_else(|| "-".to_string(), |cost| format!("{cost:.2}"))
        ),
        format!(
            "  Created:     {}",
            booking
                .created_at
                .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string())
        ),
    ];
    if let Some(message) = booking.message.as_deref().filter(|m| !m.is_empty()) {
        lines.push(format!("  Message:     {message}"));
    }
    lines.push(format!(
        "  Actions:     {}",
        if actions.is_empty() {
            "none".to_string()
        } else {
            actions.join(", ")
        }
    ));
    lines.join("\n")
}

fn stats_summary(stats: &DashboardStats) -> String {
    let visits = &stats.visits;
    let bookings = &stats.bookings;
    let mut lines = vec![
        format!(
            "Visits    today {}  week {}  month {}  year {}",
            visits.daily, visits.weekly, visits.monthly, visits.yearly
        ),
        format!(
            "Bookings  total {}  pending {}  confirmed {}  completed {}  cancelled {}",
            bookings.total,
            bookings.pending,
            bookings.confirmed,
            bookings.completed,
            bookings.cancelled
        ),
    ];
    if !stats.top_destinations.is_empty() {
        lines.push("Top destinations".to_string());
        lines.extend(
            stats
                .top_destinations
                .iter()
                .map(|top| format!("  {:<26} {}", top.destination, top.count)),
        );
    }
    lines.join("\n")
}
