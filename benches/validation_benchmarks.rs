//! Benchmarks for booking and contact form validation

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;
use tourbook_protocol::{BookingForm, ContactForm, FormErrors, is_valid_email};
use tourbook_types::ServerErrors;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default()
}

fn booking(name: &str, email: &str, phone: &str, date: &str, guests: &str) -> BookingForm {
    BookingForm {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        destination: "maasai-mara-safari".to_string(),
        date: date.to_string(),
        guests: guests.to_string(),
        message: "Looking forward to the migration season".to_string(),
    }
}

/// Benchmark the email pattern with realistic addresses
fn bench_email_pattern(c: &mut Criterion) {
    let mut group = c.benchmark_group("email_pattern");

    let addresses = vec![
        "jane@example.com",
        "safari.lover+kenya@mail.example.co.ke",
        "UPPER@EXAMPLE.ORG",
        // Edge cases
        "bad-email",
        "two words@example.com",
        "",
    ];

    for address in &addresses {
        group.bench_with_input(BenchmarkId::new("match", address), address, |b, address| {
            b.iter(|| is_valid_email(black_box(address)));
        });
    }

    group.finish();
}

/// Benchmark whole-form validation, valid and invalid
fn bench_booking_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("booking_validation");

    let forms = vec![
        booking("Jane Doe", "jane@example.com", "+254 700 123456", "2026-06-01", "2"),
        booking("J", "bad-email", "123", "2020-01-01", "99"),
        booking("Amina Wanjiru", "amina@example.co.ke", "", "", "1"),
    ];

    group.throughput(Throughput::Elements(forms.len() as u64));
    group.bench_function("validate_batch", |b| {
        b.iter(|| {
            forms
                .iter()
                .map(|form| form.validate(black_box(today())).is_ok())
                .filter(|ok| *ok)
                .count()
        });
    });

    if let Some(form) = forms.first() {
        group.bench_function("to_request", |b| {
            b.iter(|| form.to_request(black_box(today())));
        });
    }

    group.finish();
}

/// Benchmark contact form validation
fn bench_contact_validation(c: &mut Criterion) {
    let form = ContactForm {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        subject: "Group rates".to_string(),
        message: "Do you offer discounts for groups of twelve?".to_string(),
    };

    c.bench_function("contact_validate", |b| b.iter(|| black_box(&form).validate()));
}

/// Benchmark mapping of server-side validation errors
fn bench_server_error_mapping(c: &mut Criterion) {
    let keyed = ServerErrors::Fields(BTreeMap::from([
        ("email".to_string(), "Valid email address is required".to_string()),
        ("phone".to_string(), "Invalid phone number format".to_string()),
        ("budget".to_string(), "Unsupported".to_string()),
    ]));
    let listed = ServerErrors::Messages(vec![
        "Name must be at least 2 characters long".to_string(),
        "Booking date cannot be in the past".to_string(),
    ]);

    let mut group = c.benchmark_group("server_errors");
    group.bench_function("keyed", |b| b.iter(|| FormErrors::from_server(black_box(&keyed))));
    group.bench_function("listed", |b| b.iter(|| FormErrors::from_server(black_box(&listed))));
    group.finish();
}

criterion_group!(
    benches,
    bench_email_pattern,
    bench_booking_validation,
    bench_contact_validation,
    bench_server_error_mapping
);
criterion_main!(benches);
