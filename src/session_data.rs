use crate::types::BookingDraft;
use tower_sessions::{session::Error, Session};

/// Key for the pending, unconfirmed booking. At most one per session; a new
/// submission overwrites the previous draft.
pub const BOOKING_DRAFT_KEY: &str = "booking_draft";

/// Keys for the id of a just-created record, so the posted page can show
/// what was created after the redirect.
pub const POSTED_MENU_KEY: &str = "menu_id";
pub const POSTED_NEWS_KEY: &str = "news_id";

pub async fn put_draft(session: &Session, draft: &BookingDraft) -> Result<(), Error> {
    session.insert(BOOKING_DRAFT_KEY, draft).await
}

pub async fn get_draft(session: &Session) -> Result<Option<BookingDraft>, Error> {
    session.get::<BookingDraft>(BOOKING_DRAFT_KEY).await
}

pub async fn clear_draft(session: &Session) -> Result<(), Error> {
    session.remove::<BookingDraft>(BOOKING_DRAFT_KEY).await?;
    Ok(())
}

pub async fn put_posted_id(session: &Session, key: &str, id: i32) -> Result<(), Error> {
    session.insert(key, id).await
}

pub async fn get_posted_id(session: &Session, key: &str) -> Result<Option<i32>, Error> {
    session.get::<i32>(key).await
}
