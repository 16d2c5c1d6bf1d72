use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::db::bookings::{BookingStore, StoreError};
use crate::models::booking::BookingRecord;

pub const CSV_HEADER: &str = "Name,Email,Phone,Room,Check-In,Check-Out,Amount,Payment ID,Booked At";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingStats {
    pub total: usize,
    pub total_revenue: f64,
    pub this_month: usize,
}

impl BookingStats {
    /// Summary over a record set. A missing amount counts as zero revenue;
    /// `this_month` matches calendar month and year against `now`.
    pub fn compute(records: &[BookingRecord], now: DateTime<Utc>) -> Self {
        let total = records.len();
        let total_revenue = records
            .iter()
            .map(|record| record.total_amount.unwrap_or(0.0))
            .sum();
        let this_month = records
            .iter()
            .filter(|record| {
                record
                    .timestamp
                    .map(|ts| {
                        let booked = ts.to_chrono();
                        booked.month() == now.month() && booked.year() == now.year()
                    })
                    .unwrap_or(false)
            })
            .count();

        Self {
            total,
            total_revenue,
            this_month,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No bookings to export!")]
    NoRecords,
}

/// Read-only reporting surface over all persisted bookings. Holds an
/// in-memory snapshot that only an explicit refresh replaces.
pub struct AdminDashboard<S> {
    store: S,
    bookings: Vec<BookingRecord>,
    stats: BookingStats,
}

impl<S: BookingStore> AdminDashboard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            bookings: Vec::new(),
            stats: BookingStats::default(),
        }
    }

    /// Re-read the store and recompute the stats. On a read failure the
    /// previous snapshot stays in place and the error is surfaced to the
    /// operator.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        let records = self.store.list_all().await?;
        self.stats = BookingStats::compute(&records, Utc::now());
        self.bookings = records;
        Ok(())
    }

    pub fn bookings(&self) -> &[BookingRecord] {
        &self.bookings
    }

    pub fn stats(&self) -> &BookingStats {
        &self.stats
    }

    pub fn export_csv(&self) -> Result<String, ExportError> {
        render_csv(&self.bookings)
    }
}

/// Render the record set in its current order. Field values are written
/// as-is: embedded commas or quotes are not escaped (accepted limitation).
pub fn render_csv(records: &[BookingRecord]) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::NoRecords);
    }

    let mut lines = vec![CSV_HEADER.to_string()];
    for record in records {
        let booked_at = record
            .timestamp
            .map(|ts| ts.to_chrono().format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        lines.push(format!(
            "{},{},{},{},{},{},{:.2},{},{}",
            record.name,
            record.email,
            record.phone,
            record.room_name,
            record.check_in,
            record.check_out,
            record.total_amount.unwrap_or(0.0),
            record.payment_id,
            booked_at
        ));
    }

    Ok(lines.join("\n"))
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("bookings_{}.csv", date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mongodb::bson;

    fn record(amount: Option<f64>, booked: Option<DateTime<Utc>>) -> BookingRecord {
        BookingRecord {
            id: None,
            name: "Asha Verma".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            room_name: "Deluxe Suite".to_string(),
            room_price: 2000.0,
            check_in: "2025-03-10".parse().unwrap(),
            check_out: "2025-03-12".parse().unwrap(),
            nights: Some(2),
            total_amount: amount,
            payment_id: "pay_ABC123".to_string(),
            timestamp: booked.map(bson::DateTime::from_chrono),
        }
    }

    #[test]
    fn test_stats_over_three_records() {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        let last_month = Utc.with_ymd_and_hms(2025, 2, 20, 9, 30, 0).unwrap();
        let records = vec![
            record(Some(1000.0), Some(now)),
            record(Some(2000.0), Some(last_month)),
            record(Some(1500.0), Some(now)),
        ];

        let stats = BookingStats::compute(&records, now);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.total_revenue, 4500.0);
        assert_eq!(stats.this_month, 2);
    }

    #[test]
    fn test_missing_amount_counts_as_zero() {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        let records = vec![record(None, Some(now)), record(Some(500.0), Some(now))];

        let stats = BookingStats::compute(&records, now);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.total_revenue, 500.0);
    }

    #[test]
    fn test_same_month_different_year_not_counted() {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        let year_ago = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let records = vec![record(Some(1000.0), Some(year_ago))];

        let stats = BookingStats::compute(&records, now);
        assert_eq!(stats.this_month, 0);
    }

    #[test]
    fn test_csv_layout() {
        let booked = Utc.with_ymd_and_hms(2025, 3, 12, 14, 45, 10).unwrap();
        let csv = render_csv(&[record(Some(4480.0), Some(booked))]).unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), CSV_HEADER);
        assert_eq!(
            lines.next().unwrap(),
            "Asha Verma,asha@example.com,9876543210,Deluxe Suite,2025-03-10,2025-03-12,4480.00,pay_ABC123,2025-03-12 14:45:10"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_export_is_refused() {
        assert!(matches!(render_csv(&[]), Err(ExportError::NoRecords)));
    }

    #[test]
    fn test_export_filename() {
        let date: NaiveDate = "2025-03-15".parse().unwrap();
        assert_eq!(export_filename(date), "bookings_2025-03-15.csv");
    }

    struct FlakyStore {
        fail: std::sync::atomic::AtomicBool,
        records: Vec<BookingRecord>,
    }

    impl BookingStore for FlakyStore {
        async fn append(&self, _record: &BookingRecord) -> Result<String, StoreError> {
            Err(StoreError::Write("read-only test store".to_string()))
        }

        async fn list_all(&self) -> Result<Vec<BookingRecord>, StoreError> {
            if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
                Err(StoreError::Read("store unavailable".to_string()))
            } else {
                Ok(self.records.clone())
            }
        }
    }

    #[actix_web::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let store = FlakyStore {
            fail: std::sync::atomic::AtomicBool::new(false),
            records: vec![record(Some(1000.0), Some(Utc::now()))],
        };
        let mut dashboard = AdminDashboard::new(store);

        dashboard.refresh().await.unwrap();
        assert_eq!(dashboard.bookings().len(), 1);
        assert_eq!(dashboard.stats().total_revenue, 1000.0);

        dashboard
            .store
            .fail
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let err = dashboard.refresh().await.unwrap_err();
        assert!(matches!(err, StoreError::Read(_)));

        // The last good snapshot survives the failed read.
        assert_eq!(dashboard.bookings().len(), 1);
        assert_eq!(dashboard.stats().total, 1);
        assert!(dashboard.export_csv().is_ok());
    }
}
