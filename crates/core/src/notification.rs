//! AMC renewal reminder message composition.

use chrono::NaiveDate;

use crate::dates::ISO_DATE_FORMAT;

/// Sign-off used at the bottom of every reminder.
const SIGNATURE: &str = "Service Desk Team";

/// The contract a reminder is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmcReminder {
    pub customer_email: String,
    pub customer_name: String,
    pub equipment_name: String,
    pub amc_end_date: NaiveDate,
}

/// A ready-to-send plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMessage {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Build the reminder for `reminder`, `days_remaining` days before expiry.
///
/// Recipients are the staff distribution list followed by the customer
/// contact.
pub fn compose_amc_reminder(
    reminder: &AmcReminder,
    days_remaining: u32,
    staff_emails: &[String],
) -> ReminderMessage {
    let recipients = staff_emails
        .iter()
        .cloned()
        .chain(std::iter::once(reminder.customer_email.clone()))
        .collect();

    let subject = format!("AMC Renewal Reminder - {days_remaining} days remaining");
    let end_date = reminder.amc_end_date.format(ISO_DATE_FORMAT);
    let body = format!(
        "Dear {customer},\n\n\
         This is a reminder that your Annual Maintenance Contract (AMC) for {equipment} \
         will expire in {days_remaining} days on {end_date}.\n\n\
         Please contact us to arrange the renewal of your AMC to ensure continued support \
         and maintenance of your equipment.\n\n\
         Best regards,\n{SIGNATURE}\n",
        customer = reminder.customer_name,
        equipment = reminder.equipment_name,
    );

    ReminderMessage {
        recipients,
        subject,
        body,
    }
}
