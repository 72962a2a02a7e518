use crate::types::{Booking, Menu, NewBooking, NewMenu, NewNews, News, NewsCategory};
use chrono::NaiveDate;

/// Persistence seam of the application. Implemented by the in-memory store
/// and by the Postgres interface; handlers only ever see this trait.
pub trait CafeBackend: Clone + Send + Sync + 'static {
    /// Probes the storage layer. The database implementation runs a real
    /// query so the health endpoint reflects a lost connection.
    fn health_check(&self) -> Result<(), String>;

    fn create_booking(&self, booking: NewBooking) -> Result<Booking, String>;
    /// All bookings, newest first by (date, time).
    fn bookings(&self) -> Vec<Booking>;
    /// Bookings whose date falls in the inclusive range. A missing start
    /// means the range is open-ended towards the past.
    fn bookings_between(&self, start: Option<NaiveDate>, end: NaiveDate) -> Vec<Booking>;

    fn create_menu(&self, menu: NewMenu) -> Result<Menu, String>;
    fn menus(&self) -> Vec<Menu>;
    fn menu_by_id(&self, id: i32) -> Option<Menu>;

    fn create_news(&self, news: NewNews) -> Result<News, String>;
    fn news(&self) -> Vec<News>;
    fn news_by_category(&self, category: NewsCategory) -> Vec<News>;
    fn news_by_id(&self, id: i32) -> Option<News>;
}
