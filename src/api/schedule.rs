//! Schedule for use action
//!
//! ```text
//! GET  /schedule?Permalink=..&Location=..&Status=..[&Title=..]  - Request form
//! POST /schedule?Permalink=..&Location=..&Status=..[&Title=..]  - Submit request
//! ```

use axum::{
    extract::{OriginalUri, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use chrono::{Local, NaiveDate};
use tower_sessions::Session;

use crate::{
    error::{AppResult, RequestError},
    models::{
        location::Location,
        request::{CatalogAction, CatalogQuery, Field, ScheduleFields, ScheduleForm},
        session::{keys, FlashMessage},
    },
    services::{
        csrf,
        session::{push_flash, take_flash},
        validation::{self, MIN_NOTICE_WEEKDAYS},
    },
    views::{self, PageContext},
    AppState,
};

const ACTION: CatalogAction = CatalogAction::ScheduleForUse;

/// Display the request form, pre-filled with the client's last submission
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
    session: Session,
) -> AppResult<Response> {
    let messages = take_flash(&session).await?;
    let location = state.services.locations.resolve(&query).cloned();

    let fields = match location {
        Some(_) => session
            .get::<ScheduleFields>(keys::CATALOG_SCHEDULE)
            .await?
            .unwrap_or_default(),
        None => ScheduleFields::default(),
    };

    let page = page_context(&session, query, location, fields, messages, Vec::new()).await?;
    respond(&page)
}

/// Validate a submission and email it to the location's staff.
///
/// Success redirects to the bare path so the same item is not requested
/// twice; any failure re-renders the form with the entered values. A body
/// that is not a form counts as an empty submission.
pub async fn submit(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<CatalogQuery>,
    session: Session,
    form: Option<Form<ScheduleForm>>,
) -> AppResult<Response> {
    let mut messages = take_flash(&session).await?;

    let Some(location) = state.services.locations.resolve(&query).cloned() else {
        let page = page_context(&session, query, None, ScheduleFields::default(), messages, Vec::new()).await?;
        return respond(&page);
    };

    let ScheduleForm { fields, csrf_token } = form.map(|Form(form)| form).unwrap_or_default();

    // Cached even when invalid so the form comes back filled in
    session.insert(keys::CATALOG_SCHEDULE, &fields).await?;

    let expected: Option<String> = session.get(keys::CSRF_TOKEN).await?;
    let outcome = process(&state, expected.as_deref(), &csrf_token, &fields, &location, &query).await;

    match outcome {
        Ok(()) => {
            push_flash(&session, FlashMessage::success("Your request has been sent.")).await?;

            Ok((StatusCode::FOUND, [(header::LOCATION, uri.path().to_string())]).into_response())
        }
        Err(error) => {
            tracing::info!("{} request for {} refused: {}", ACTION.display_name(), location.id, error);
            messages.push(FlashMessage::danger(error.to_string()));
            let errors = error.fields();

            let page = page_context(&session, query, Some(location), fields, messages, errors).await?;
            respond(&page)
        }
    }
}

async fn process(
    state: &AppState,
    expected_token: Option<&str>,
    submitted_token: &str,
    fields: &ScheduleFields,
    location: &Location,
    query: &CatalogQuery,
) -> Result<(), RequestError> {
    csrf::verify(expected_token, submitted_token)?;
    validation::validate(fields, today())?;
    state
        .services
        .notifications
        .send(ACTION, fields, location, query)
        .await
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Page context; a CSRF token is only issued when the form is shown
async fn page_context(
    session: &Session,
    query: CatalogQuery,
    location: Option<Location>,
    fields: ScheduleFields,
    messages: Vec<FlashMessage>,
    errors: Vec<Field>,
) -> AppResult<PageContext> {
    let csrf_token = match location {
        Some(_) => csrf::ensure_token(session).await?,
        None => String::new(),
    };

    Ok(PageContext {
        action_name: ACTION.display_name().to_string(),
        messages,
        query,
        location,
        fields,
        errors,
        csrf_token,
        earliest_date: validation::add_weekdays(today(), MIN_NOTICE_WEEKDAYS)
            .format("%Y-%m-%d")
            .to_string(),
    })
}

fn respond(page: &PageContext) -> AppResult<Response> {
    let html = views::render_page(ACTION, page)?;
    Ok(Html(html).into_response())
}
