// ABOUTME: Notification collaborator: builds the "new exam" message and defines the delivery seam.
// ABOUTME: Delivery transport is pluggable; per-recipient failures never abort the batch.

use async_trait::async_trait;
use tracing::info;

use examhub_extract::ExamRecord;

use crate::store::Recipient;

/// Sends one newly discovered exam to a list of recipients and reports how
/// many sends succeeded. Best-effort by contract.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, record: &ExamRecord, recipients: &[Recipient]) -> usize;
}

/// Subject line for a new-exam notification.
pub fn notification_subject(record: &ExamRecord) -> String {
    format!("New Exam: {} — Apply Now", record.exam_name)
}

/// Compact HTML body for a new-exam notification. `{name}` in the greeting is
/// replaced per recipient by the transport.
pub fn notification_html(record: &ExamRecord) -> String {
    let last_date = record
        .application_last_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "TBA".to_string());
    let state = record
        .state
        .as_deref()
        .map(|s| format!(" ({})", s))
        .unwrap_or_default();
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<body>\n");
    html.push_str("<div class=\"exam-card\">\n");
    html.push_str(&format!("  <h2>{}</h2>\n", record.exam_name));
    html.push_str(&format!(
        "  <p class=\"badges\"><span>Open</span> <span>{}{}</span></p>\n",
        record.level, state
    ));
    html.push_str(&format!(
        "  <p><strong>Organization:</strong> {}</p>\n",
        record.organization
    ));
    html.push_str(&format!(
        "  <p><strong>Last Date:</strong> {}</p>\n",
        last_date
    ));
    html.push_str("</div>\n");
    html.push_str("<p>Hi {name}, a new competitive exam notification has been published. ");
    html.push_str("View full details and apply on the official website.</p>\n");
    html.push_str(&format!(
        "<p><a href=\"{}\">View &amp; Apply Now</a></p>\n",
        record.official_website
    ));
    html.push_str("</body>\n</html>\n");
    html
}

/// Transport that only logs. Used when no delivery channel is configured so
/// runs with --notify still exercise and count the notification path.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, record: &ExamRecord, recipients: &[Recipient]) -> usize {
        let subject = notification_subject(record);
        for recipient in recipients {
            info!(to = %recipient.email, %subject, "notification (log transport)");
        }
        recipients.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use examhub_extract::{ExamLevel, ExamRecord};

    fn record() -> ExamRecord {
        ExamRecord {
            exam_name: "UPPSC PCS 2026".to_string(),
            organization: "Uttar Pradesh Public Service Commission (UPPSC)".to_string(),
            level: ExamLevel::State,
            state: Some("Uttar Pradesh".to_string()),
            description: String::new(),
            eligibility: String::new(),
            qualification: String::new(),
            age_limit: String::new(),
            application_start_date: None,
            application_last_date: Some("2026-08-31".parse().unwrap()),
            exam_date: None,
            official_website: "https://uppsc.up.nic.in".to_string(),
            notification_pdf: None,
            application_fee: String::new(),
            selection_process: String::new(),
            status: None,
        }
    }

    #[test]
    fn subject_names_the_exam() {
        assert_eq!(
            notification_subject(&record()),
            "New Exam: UPPSC PCS 2026 — Apply Now"
        );
    }

    #[test]
    fn html_carries_the_key_fields() {
        let html = notification_html(&record());
        assert!(html.contains("UPPSC PCS 2026"));
        assert!(html.contains("State (Uttar Pradesh)"));
        assert!(html.contains("2026-08-31"));
        assert!(html.contains("https://uppsc.up.nic.in"));
        assert!(html.contains("{name}"));
    }

    #[test]
    fn missing_last_date_renders_tba() {
        let mut r = record();
        r.application_last_date = None;
        assert!(notification_html(&r).contains("TBA"));
    }

    #[tokio::test]
    async fn log_notifier_counts_every_recipient() {
        let recipients = vec![
            Recipient {
                email: "a@example.com".to_string(),
                full_name: Some("A".to_string()),
            },
            Recipient {
                email: "b@example.com".to_string(),
                full_name: None,
            },
        ];
        let sent = LogNotifier.notify(&record(), &recipients).await;
        assert_eq!(sent, 2);
    }
}
