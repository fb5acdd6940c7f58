//! Request notifications sent to location staff

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::RequestError,
    models::{
        location::Location,
        request::{CatalogAction, CatalogQuery, ScheduleFields},
    },
    services::{
        email::{Contact, Mailer, OutgoingEmail},
        validation::parse_date,
    },
    views::{self, EmailContext},
};

static RECORD_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*(b\d{7,}).*$").expect("valid record number pattern"));

/// Catalog record number (`b1234567a`) found in a permalink, empty when absent
pub fn record_number(permalink: &str) -> String {
    match RECORD_NUMBER.captures(permalink) {
        Some(captures) => format!("{}a", &captures[1]),
        None => String::new(),
    }
}

/// Subject line: action name, then the requested date and the item title when known
pub fn subject(action: CatalogAction, fields: &ScheduleFields, query: &CatalogQuery) -> String {
    let mut subject = action.display_name().to_string();

    if let Some(date) = parse_date(&fields.date) {
        subject.push(' ');
        subject.push_str(&date.format("%Y-%m-%d").to_string());
    }

    if !query.title().is_empty() {
        subject.push_str(": ");
        subject.push_str(query.title());
    }

    subject
}

#[derive(Clone)]
pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
}

impl NotificationService {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Email a validated request to the location's staff, copying the requester
    pub async fn send(
        &self,
        action: CatalogAction,
        fields: &ScheduleFields,
        location: &Location,
        query: &CatalogQuery,
    ) -> Result<(), RequestError> {
        let record_number = record_number(query.permalink());
        if record_number.is_empty() {
            tracing::debug!("No record number in permalink {}", query.permalink());
        }

        let context = EmailContext {
            action_name: action.display_name().to_string(),
            fields: fields.clone(),
            location: location.clone(),
            query: query.clone(),
            record_number,
        };

        let html_body = views::render_email(action, &context).map_err(|e| {
            tracing::error!("Failed to render email for {}: {}", location.id, e);
            RequestError::Unexpected
        })?;

        let requester = Contact::new(Some(fields.name.clone()), fields.email.clone());
        let email = OutgoingEmail {
            subject: subject(action, fields, query),
            from: requester.clone(),
            to: Contact::new(None, location.email.clone()),
            cc: vec![requester],
            html_body,
        };

        match self.mailer.send(&email).await {
            Ok(true) => {
                tracing::info!("{} request sent to {} ({})", action.display_name(), location.id, location.email);
                Ok(())
            }
            Ok(false) => {
                tracing::warn!("Mail transport did not accept request for {}", location.id);
                Err(RequestError::SendFailed)
            }
            Err(e) => {
                tracing::error!("Failed to send request for {}: {}", location.id, e);
                Err(RequestError::Unexpected)
            }
        }
    }
}
