use crate::availability::compute_availability;
use crate::backend::CafeBackend;
use crate::configuration::Configuration;
use crate::forms::{
    error_messages, format_booking_date, format_booking_time, BookingForm, ContactForm, MenuForm,
    NewsForm,
};
use crate::holidays::JapaneseHolidays;
use crate::mailer::Mailer;
use crate::pagination::{paginate, Paginated};
use crate::periods::PeriodToken;
use crate::session_data::{self, POSTED_MENU_KEY, POSTED_NEWS_KEY};
use crate::types::{NewMenu, NewNews, NewsCategory};
use axum::extract::{Path, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tower_http::cors::{Any, CorsLayer};
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};
use tracing::{debug, error, warn};
use validator::Validate;

#[derive(Clone)]
pub struct AppState<B: CafeBackend, M: Mailer, C: Configuration> {
    backend: B,
    mailer: M,
    configuration: C,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ListResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_period: Option<&'static str>,
    #[serde(flatten)]
    page: Paginated<T>,
}

pub fn create_app<B, M, C>(backend: B, mailer: M, configuration: C) -> Router
where
    B: CafeBackend,
    M: Mailer,
    C: Configuration,
{
    let state = AppState {
        backend,
        mailer,
        configuration,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // An abandoned draft dies with its session.
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)));

    let public = Router::new()
        .route("/", get(get_frontend))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/health/live", get(liveness))
        .route("/menu", get(get_menus))
        .route("/news", get(get_news))
        .route("/news/category/:category", get(get_news_by_category))
        .route("/booking", get(get_booking_page).post(submit_booking))
        .route("/booking/list", get(list_bookings))
        .route("/booking/list/:period", get(list_bookings_by_period))
        .route("/contact", post(submit_contact));

    let admin = Router::new()
        .route("/menu/create", post(create_menu))
        .route("/news/create", post(create_news))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth::<B, M, C>,
        ));

    // Pages only reachable by following a redirect from the step before.
    let gated = Router::new()
        .route("/menu/posted", get(posted_menu))
        .route("/news/posted", get(posted_news))
        .route(
            "/booking/confirm",
            get(get_booking_confirm).post(confirm_booking),
        )
        .route("/booking/complete", get(booking_complete))
        .route("/contact/complete", get(contact_complete))
        .route_layer(middleware::from_fn(referrer_required));

    Router::new()
        .merge(public)
        .merge(admin)
        .merge(gated)
        .with_state(state)
        .layer(session_layer)
        .layer(cors)
}

async fn admin_auth<B: CafeBackend, M: Mailer, C: Configuration>(
    State(state): State<AppState<B, M, C>>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let password = state.configuration.admin_password();
    match request.headers().get("x-admin-password") {
        Some(header_value) if header_value.to_str().unwrap_or("") == password => {
            Ok(next.run(request).await)
        }
        Some(_) => Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string())),
        None => Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string())),
    }
}

async fn referrer_required(
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    if request.headers().get(header::REFERER).is_none() {
        return Err((StatusCode::NOT_FOUND, "Page not found".to_string()));
    }
    Ok(next.run(request).await)
}

async fn get_frontend<B: CafeBackend, M: Mailer, C: Configuration>(
    State(state): State<AppState<B, M, C>>,
) -> Result<Html<String>, (StatusCode, String)> {
    let path = state.configuration.frontend_path();
    match fs::read_to_string(&path).await {
        Ok(contents) => Ok(Html(contents)),
        Err(err) => {
            let error_message = format!("Failed to read frontend file: {}", err);
            Err((StatusCode::INTERNAL_SERVER_ERROR, error_message))
        }
    }
}

async fn health<B: CafeBackend, M: Mailer, C: Configuration>(
    State(state): State<AppState<B, M, C>>,
) -> impl IntoResponse {
    match state.backend.health_check() {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({"status": "healthy", "database": "connected"})),
        ),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({"status": "unhealthy", "error": err})),
        ),
    }
}

async fn readiness() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ready"}))
}

async fn liveness() -> impl IntoResponse {
    Json(serde_json::json!({"status": "alive"}))
}

async fn get_menus<B: CafeBackend, M: Mailer, C: Configuration>(
    State(state): State<AppState<B, M, C>>,
) -> impl IntoResponse {
    Json(state.backend.menus())
}

async fn create_menu<B: CafeBackend, M: Mailer, C: Configuration>(
    State(state): State<AppState<B, M, C>>,
    session: Session,
    axum::Form(form): axum::Form<MenuForm>,
) -> Response {
    if let Err(errors) = form.validate() {
        return validation_error(&errors);
    }
    match state.backend.create_menu(NewMenu {
        title: form.title,
        price: form.price,
    }) {
        Ok(menu) => {
            if let Err(err) = session_data::put_posted_id(&session, POSTED_MENU_KEY, menu.id).await
            {
                return internal_error(err);
            }
            Redirect::to("/menu/posted").into_response()
        }
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}

async fn posted_menu<B: CafeBackend, M: Mailer, C: Configuration>(
    State(state): State<AppState<B, M, C>>,
    session: Session,
) -> Response {
    match session_data::get_posted_id(&session, POSTED_MENU_KEY).await {
        Ok(Some(id)) => match state.backend.menu_by_id(id) {
            Some(menu) => Json(menu).into_response(),
            None => not_found(),
        },
        Ok(None) => not_found(),
        Err(err) => internal_error(err),
    }
}

async fn get_news<B: CafeBackend, M: Mailer, C: Configuration>(
    State(state): State<AppState<B, M, C>>,
    Query(query): Query<PageQuery>,
) -> Response {
    page_response(state.backend.news(), query.page.unwrap_or(1), None)
}

async fn get_news_by_category<B: CafeBackend, M: Mailer, C: Configuration>(
    State(state): State<AppState<B, M, C>>,
    Path(category): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let Some(category) = NewsCategory::from_token(&category) else {
        return (StatusCode::NOT_FOUND, "Category does not exist".to_string()).into_response();
    };
    page_response(
        state.backend.news_by_category(category),
        query.page.unwrap_or(1),
        None,
    )
}

async fn create_news<B: CafeBackend, M: Mailer, C: Configuration>(
    State(state): State<AppState<B, M, C>>,
    session: Session,
    axum::Form(form): axum::Form<NewsForm>,
) -> Response {
    if let Err(errors) = form.validate() {
        return validation_error(&errors);
    }
    match state.backend.create_news(NewNews {
        category: form.category,
        title: form.title,
        text: form.text,
    }) {
        Ok(news) => {
            if let Err(err) = session_data::put_posted_id(&session, POSTED_NEWS_KEY, news.id).await
            {
                return internal_error(err);
            }
            Redirect::to("/news/posted").into_response()
        }
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}

async fn posted_news<B: CafeBackend, M: Mailer, C: Configuration>(
    State(state): State<AppState<B, M, C>>,
    session: Session,
) -> Response {
    match session_data::get_posted_id(&session, POSTED_NEWS_KEY).await {
        Ok(Some(id)) => match state.backend.news_by_id(id) {
            Some(news) => Json(news).into_response(),
            None => not_found(),
        },
        Ok(None) => not_found(),
        Err(err) => internal_error(err),
    }
}

/// The intake page context: the booking window, holidays to disable
/// client-side and the selectable time slots.
async fn get_booking_page() -> impl IntoResponse {
    let today = Local::now().date_naive();
    Json(compute_availability(today, &JapaneseHolidays))
}

async fn submit_booking(session: Session, axum::Form(form): axum::Form<BookingForm>) -> Response {
    if let Err(errors) = form.validate() {
        return validation_error(&errors);
    }
    // The form just validated, so the draft derivation cannot fail; if it
    // does, something is wrong with the server, not the submission.
    let Some(draft) = form.into_draft() else {
        error!("validated booking submission failed to produce a draft");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Inconsistent booking submission".to_string(),
        )
            .into_response();
    };
    if let Err(err) = session_data::put_draft(&session, &draft).await {
        return internal_error(err);
    }
    Redirect::to("/booking/confirm").into_response()
}

async fn get_booking_confirm(session: Session) -> Response {
    match session_data::get_draft(&session).await {
        Ok(Some(draft)) => Json(draft).into_response(),
        // Nothing pending; quietly send the caller back to the intake form.
        Ok(None) => Redirect::to("/booking").into_response(),
        Err(err) => internal_error(err),
    }
}

async fn confirm_booking<B: CafeBackend, M: Mailer, C: Configuration>(
    State(state): State<AppState<B, M, C>>,
    session: Session,
) -> Response {
    let draft = match session_data::get_draft(&session).await {
        Ok(Some(draft)) => draft,
        Ok(None) => return Redirect::to("/booking").into_response(),
        Err(err) => return internal_error(err),
    };

    // Mail goes out first, but a mail outage must not block the reservation.
    if let Some(email) = draft.email.clone() {
        let subject = format!(
            "{} booking confirmation",
            state.configuration.website_title()
        );
        let body = format!(
            "Name: {}\n\nDate: {}\n\nTime: {}\n\nNumber of people: {}\n",
            draft.name,
            format_booking_date(draft.date),
            format_booking_time(draft.time),
            draft.number_of_people,
        );
        if let Err(err) =
            state
                .mailer
                .send(&subject, &body, &state.configuration.mail_from(), &[email])
        {
            warn!(%err, "confirmation mail failed, committing the booking anyway");
        }
    } else {
        debug!("draft has no email address, skipping confirmation mail");
    }

    if let Err(err) = state.backend.create_booking(draft.into_new_booking()) {
        return (StatusCode::INTERNAL_SERVER_ERROR, err).into_response();
    }

    if let Err(err) = session_data::clear_draft(&session).await {
        warn!(%err, "failed to clear the booking draft after commit");
    }

    Redirect::to("/booking/complete").into_response()
}

async fn booking_complete() -> impl IntoResponse {
    (StatusCode::OK, "Booking completed")
}

async fn list_bookings<B: CafeBackend, M: Mailer, C: Configuration>(
    State(state): State<AppState<B, M, C>>,
    Query(query): Query<PageQuery>,
) -> Response {
    page_response(state.backend.bookings(), query.page.unwrap_or(1), None)
}

async fn list_bookings_by_period<B: CafeBackend, M: Mailer, C: Configuration>(
    State(state): State<AppState<B, M, C>>,
    Path(period): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let token = PeriodToken::parse(&period);
    let range = token.date_range(Local::now().date_naive());
    let bookings = state.backend.bookings_between(range.start, range.end);
    page_response(bookings, query.page.unwrap_or(1), Some(token.token()))
}

async fn submit_contact<B: CafeBackend, M: Mailer, C: Configuration>(
    State(state): State<AppState<B, M, C>>,
    axum::Form(form): axum::Form<ContactForm>,
) -> Response {
    if let Err(errors) = form.validate() {
        return validation_error(&errors);
    }
    let subject = format!("Subject: {}", form.subject);
    let body = format!(
        "Message: {}\n\nCustomer name: {}\nCustomer email: {}\n",
        form.message, form.full_name, form.email,
    );
    let recipient = state.configuration.contact_recipient();
    if let Err(err) =
        state
            .mailer
            .send(&subject, &body, &state.configuration.mail_from(), &[recipient])
    {
        // Unlike the booking confirmation, this mail IS the message; losing
        // it silently would drop the only copy.
        error!(%err, "contact mail failed");
        return (
            StatusCode::BAD_GATEWAY,
            "Failed to send contact message".to_string(),
        )
            .into_response();
    }
    Redirect::to("/contact/complete").into_response()
}

async fn contact_complete() -> impl IntoResponse {
    (StatusCode::OK, "Contact message sent")
}

fn page_response<T: Serialize>(
    items: Vec<T>,
    page: u32,
    selected_period: Option<&'static str>,
) -> Response {
    match paginate(items, page) {
        Some(paginated) => Json(ListResponse {
            selected_period,
            page: paginated,
        })
        .into_response(),
        None => not_found(),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Page not found".to_string()).into_response()
}

fn internal_error<E: std::fmt::Display>(err: E) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
}

fn validation_error(errors: &validator::ValidationErrors) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(error_messages(errors)),
    )
        .into_response()
}
