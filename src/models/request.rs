//! Catalog request models (query parameters, form fields, actions)

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CatalogAction
// ---------------------------------------------------------------------------

/// An action button offered next to a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogAction {
    ScheduleForUse,
}

impl CatalogAction {
    /// Human readable name, also used as the email subject prefix
    pub fn display_name(&self) -> &'static str {
        match self {
            CatalogAction::ScheduleForUse => "Schedule For Use",
        }
    }

    /// Template name for this action under the given directory
    /// (`action` for the page, `email` for the message body)
    pub fn template_name(&self, kind: &str) -> String {
        let stem: String = self
            .display_name()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        format!("{}/{}.html", kind, stem)
    }
}

// ---------------------------------------------------------------------------
// CatalogQuery
// ---------------------------------------------------------------------------

/// Query parameters the catalog appends to the action link
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(rename = "Permalink")]
    pub permalink: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Title")]
    pub title: Option<String>,
}

impl CatalogQuery {
    pub fn permalink(&self) -> &str {
        self.permalink.as_deref().unwrap_or_default()
    }

    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or_default()
    }

    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Field / ScheduleFields
// ---------------------------------------------------------------------------

/// Fields of the schedule for use form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Tel,
    From,
    Date,
    Comments,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Email,
        Field::Tel,
        Field::From,
        Field::Date,
        Field::Comments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Tel => "tel",
            Field::From => "from",
            Field::Date => "date",
            Field::Comments => "comments",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Field::Comments)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Values entered in the schedule for use form.
///
/// Also the shape cached in the session between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub tel: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub comments: String,
}

impl ScheduleFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Tel => &self.tel,
            Field::From => &self.from,
            Field::Date => &self.date,
            Field::Comments => &self.comments,
        }
    }
}

/// Schedule for use POST body
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleForm {
    #[serde(flatten)]
    pub fields: ScheduleFields,
    #[serde(default)]
    pub csrf_token: String,
}
