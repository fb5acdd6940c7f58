//! HTML templates for action pages and notification emails.
//!
//! Each action owns two templates named after its display name with the
//! whitespace removed: `action/<Name>.html` for the page and
//! `email/<Name>.html` for the message sent to location staff.

use askama::Template;

use crate::{
    error::AppResult,
    models::{
        location::Location,
        request::{CatalogAction, CatalogQuery, Field, ScheduleFields},
        session::FlashMessage,
    },
};

/// Everything an action page displays
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub action_name: String,
    pub messages: Vec<FlashMessage>,
    pub query: CatalogQuery,
    pub location: Option<Location>,
    pub fields: ScheduleFields,
    pub errors: Vec<Field>,
    pub csrf_token: String,
    /// First date accepted by the form, `YYYY-MM-DD`
    pub earliest_date: String,
}

/// Everything a notification email displays
#[derive(Debug, Clone)]
pub struct EmailContext {
    pub action_name: String,
    pub fields: ScheduleFields,
    pub location: Location,
    pub query: CatalogQuery,
    /// Catalog record number derived from the permalink, may be empty
    pub record_number: String,
}

#[derive(Template)]
#[template(path = "action/ScheduleForUse.html")]
struct ScheduleForUsePage<'a> {
    page: &'a PageContext,
}

impl ScheduleForUsePage<'_> {
    fn has_error(&self, name: &str) -> bool {
        self.page.errors.iter().any(|f| f.as_str() == name)
    }
}

#[derive(Template)]
#[template(path = "email/ScheduleForUse.html")]
struct ScheduleForUseEmail<'a> {
    email: &'a EmailContext,
}

/// Render the page template of an action
pub fn render_page(action: CatalogAction, page: &PageContext) -> AppResult<String> {
    match action {
        CatalogAction::ScheduleForUse => Ok(ScheduleForUsePage { page }.render()?),
    }
}

/// Render the email template of an action
pub fn render_email(action: CatalogAction, email: &EmailContext) -> AppResult<String> {
    match action {
        CatalogAction::ScheduleForUse => Ok(ScheduleForUseEmail { email }.render()?),
    }
}
