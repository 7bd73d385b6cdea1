//! Best-effort SMS fan-out to the relatives behind matched missing-person
//! reports.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use futures::{StreamExt as _, stream};
use reunite_core::{report::MissingPersonReport, services::SmsGateway};
use serde::Serialize;
use uuid::Uuid;

use crate::{deadline::within, error::NotificationFailure};

/// What the alert says about the discovery.
#[derive(Debug, Clone)]
pub struct AlertContext<'a> {
  pub report_id:  Uuid,
  pub location:   &'a str,
  pub found_date: DateTime<Utc>,
  /// Canonical photo URL.
  pub photo:      &'a str,
}

/// Per-batch delivery tally. `sent + failed + skipped == attempted`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSummary {
  pub attempted: usize,
  pub sent:      usize,
  pub failed:    usize,
  /// Records with no usable phone number.
  pub skipped:   usize,
  pub failures:  Vec<NotificationFailure>,
}

pub fn compose_message(ctx: &AlertContext<'_>) -> String {
  format!(
    "Reunite alert: a person who may match your missing-person report was \
     found at {} on {}. Photo: {} (ref {})",
    ctx.location,
    ctx.found_date.format("%Y-%m-%d"),
    ctx.photo,
    ctx.report_id,
  )
}

pub struct Notifier {
  sms:           Arc<dyn SmsGateway>,
  timeout:       Duration,
  max_in_flight: usize,
}

impl Notifier {
  pub fn new(sms: Arc<dyn SmsGateway>, timeout: Duration, max_in_flight: usize) -> Self {
    Self {
      sms,
      timeout,
      max_in_flight: max_in_flight.max(1),
    }
  }

  /// Send one alert per record with a contact phone. One attempt each; a
  /// failed send never stops the others.
  pub async fn notify_contacts(
    &self,
    matched: &[MissingPersonReport],
    ctx: &AlertContext<'_>,
  ) -> NotificationSummary {
    let mut summary = NotificationSummary {
      attempted: matched.len(),
      ..Default::default()
    };

    let targets: Vec<(Uuid, String)> = matched
      .iter()
      .filter_map(|r| {
        let phone = r.contact_info.phone.trim();
        (!phone.is_empty()).then(|| (r.id, phone.to_owned()))
      })
      .collect();
    summary.skipped = matched.len() - targets.len();

    // Sends own their inputs; no borrow of `self` or `matched` may cross
    // into the buffered stream.
    let body: Arc<str> = compose_message(ctx).into();
    let sms = Arc::clone(&self.sms);
    let timeout = self.timeout;
    let results: Vec<_> = stream::iter(targets)
      .map(move |(report_id, phone)| {
        let sms = Arc::clone(&sms);
        let body = Arc::clone(&body);
        async move {
          let outcome = within("sms gateway", timeout, sms.send(&phone, &body)).await;
          (report_id, outcome)
        }
      })
      .buffered(self.max_in_flight)
      .collect()
      .await;

    for (report_id, outcome) in results {
      match outcome {
        Ok(()) => summary.sent += 1,
        Err(e) => {
          let failure = NotificationFailure {
            report_id,
            error: e.to_string(),
          };
          tracing::warn!(%report_id, error = %e, "sms alert failed");
          summary.failed += 1;
          summary.failures.push(failure);
        }
      }
    }

    tracing::info!(
      unidentified_id = %ctx.report_id,
      attempted = summary.attempted,
      sent = summary.sent,
      failed = summary.failed,
      skipped = summary.skipped,
      "alerts dispatched"
    );
    summary
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn message_names_location_date_photo_and_reference() {
    let id = Uuid::nil();
    let found_date = "2024-03-15T10:00:00Z".parse().unwrap();
    let msg = compose_message(&AlertContext {
      report_id: id,
      location: "Central Shelter",
      found_date,
      photo: "https://res.cloudinary.com/demo/a.jpg",
    });
    assert!(msg.contains("Central Shelter"));
    assert!(msg.contains("2024-03-15"));
    assert!(msg.contains("https://res.cloudinary.com/demo/a.jpg"));
    assert!(msg.contains(&id.to_string()));
  }
}
