use crate::backend::CafeBackend;
use crate::types::{Booking, Menu, NewBooking, NewMenu, NewNews, News, NewsCategory};
use chrono::{NaiveDate, Utc};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct LocalStoreInner {
    bookings: Vec<Booking>,
    menus: Vec<Menu>,
    news: Vec<News>,
    next_id: i32,
}

impl LocalStoreInner {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory backend used when no database is configured. Records live for
/// the lifetime of the process only.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    inner: Arc<Mutex<LocalStoreInner>>,
}

impl CafeBackend for LocalStore {
    fn health_check(&self) -> Result<(), String> {
        Ok(())
    }

    fn create_booking(&self, booking: NewBooking) -> Result<Booking, String> {
        let mut inner = self.inner.lock().unwrap();
        let booking = Booking {
            id: inner.next_id(),
            name: booking.name,
            date: booking.date,
            time: booking.time,
            email: booking.email,
            phone_number: booking.phone_number,
            number_of_people: booking.number_of_people,
            created_at: Utc::now(),
        };
        inner.bookings.push(booking.clone());
        Ok(booking)
    }

    fn bookings(&self) -> Vec<Booking> {
        let inner = self.inner.lock().unwrap();
        sorted_newest_first(inner.bookings.clone())
    }

    fn bookings_between(&self, start: Option<NaiveDate>, end: NaiveDate) -> Vec<Booking> {
        let inner = self.inner.lock().unwrap();
        let filtered = inner
            .bookings
            .iter()
            .filter(|booking| booking.date <= end)
            .filter(|booking| start.map_or(true, |start| booking.date >= start))
            .cloned()
            .collect();
        sorted_newest_first(filtered)
    }

    fn create_menu(&self, menu: NewMenu) -> Result<Menu, String> {
        let mut inner = self.inner.lock().unwrap();
        let menu = Menu {
            id: inner.next_id(),
            title: menu.title,
            price: menu.price,
            created_at: Utc::now(),
        };
        inner.menus.push(menu.clone());
        Ok(menu)
    }

    fn menus(&self) -> Vec<Menu> {
        let inner = self.inner.lock().unwrap();
        let mut menus = inner.menus.clone();
        menus.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        menus
    }

    fn menu_by_id(&self, id: i32) -> Option<Menu> {
        let inner = self.inner.lock().unwrap();
        inner.menus.iter().find(|menu| menu.id == id).cloned()
    }

    fn create_news(&self, news: NewNews) -> Result<News, String> {
        let mut inner = self.inner.lock().unwrap();
        let news = News {
            id: inner.next_id(),
            category: news.category,
            title: news.title,
            text: news.text,
            created_at: Utc::now(),
        };
        inner.news.push(news.clone());
        Ok(news)
    }

    fn news(&self) -> Vec<News> {
        let inner = self.inner.lock().unwrap();
        let mut news = inner.news.clone();
        news.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        news
    }

    fn news_by_category(&self, category: NewsCategory) -> Vec<News> {
        self.news()
            .into_iter()
            .filter(|item| item.category == category.token())
            .collect()
    }

    fn news_by_id(&self, id: i32) -> Option<News> {
        let inner = self.inner.lock().unwrap();
        inner.news.iter().find(|item| item.id == id).cloned()
    }
}

// Display order for bookings: most recent visit first.
fn sorted_newest_first(mut bookings: Vec<Booking>) -> Vec<Booking> {
    bookings.sort_by(|a, b| (b.date, b.time).cmp(&(a.date, a.time)));
    bookings
}
