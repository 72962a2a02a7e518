use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering},
    Arc, Mutex,
};

use chrono::{NaiveDate, Utc};

use crate::backend::CafeBackend;
use crate::configuration::Configuration;
use crate::mailer::Mailer;
use crate::types::{Booking, Menu, NewBooking, NewMenu, NewNews, News, NewsCategory};

pub struct MockCafeBackendInner {
    pub success: AtomicBool,
    pub calls_to_create_booking: AtomicU64,
    pub calls_to_bookings: AtomicU64,
    pub calls_to_bookings_between: AtomicU64,
    pub calls_to_create_menu: AtomicU64,
    pub calls_to_create_news: AtomicU64,
    pub next_id: AtomicI32,
    pub bookings: Mutex<Vec<Booking>>,
    pub menus: Mutex<Vec<Menu>>,
    pub news: Mutex<Vec<News>>,
}

#[derive(Clone)]
pub struct MockCafeBackend(pub Arc<MockCafeBackendInner>);

impl MockCafeBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockCafeBackendInner {
            success: AtomicBool::new(true),
            calls_to_create_booking: AtomicU64::default(),
            calls_to_bookings: AtomicU64::default(),
            calls_to_bookings_between: AtomicU64::default(),
            calls_to_create_menu: AtomicU64::default(),
            calls_to_create_news: AtomicU64::default(),
            next_id: AtomicI32::new(0),
            bookings: Mutex::default(),
            menus: Mutex::default(),
            news: Mutex::default(),
        }))
    }

    fn result(&self) -> Result<(), String> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err("Supposed to fail".into()),
        }
    }

    fn next_id(&self) -> i32 {
        self.0.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl CafeBackend for MockCafeBackend {
    fn health_check(&self) -> Result<(), String> {
        self.result()
    }

    fn create_booking(&self, booking: NewBooking) -> Result<Booking, String> {
        self.0
            .calls_to_create_booking
            .fetch_add(1, Ordering::SeqCst);
        self.result()?;
        let booking = Booking {
            id: self.next_id(),
            name: booking.name,
            date: booking.date,
            time: booking.time,
            email: booking.email,
            phone_number: booking.phone_number,
            number_of_people: booking.number_of_people,
            created_at: Utc::now(),
        };
        self.0.bookings.lock().unwrap().push(booking.clone());
        Ok(booking)
    }

    fn bookings(&self) -> Vec<Booking> {
        self.0.calls_to_bookings.fetch_add(1, Ordering::SeqCst);
        let mut bookings = self.0.bookings.lock().unwrap().clone();
        bookings.sort_by(|a, b| (b.date, b.time).cmp(&(a.date, a.time)));
        bookings
    }

    fn bookings_between(&self, start: Option<NaiveDate>, end: NaiveDate) -> Vec<Booking> {
        self.0
            .calls_to_bookings_between
            .fetch_add(1, Ordering::SeqCst);
        self.bookings()
            .into_iter()
            .filter(|booking| booking.date <= end)
            .filter(|booking| start.map_or(true, |start| booking.date >= start))
            .collect()
    }

    fn create_menu(&self, menu: NewMenu) -> Result<Menu, String> {
        self.0.calls_to_create_menu.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        let menu = Menu {
            id: self.next_id(),
            title: menu.title,
            price: menu.price,
            created_at: Utc::now(),
        };
        self.0.menus.lock().unwrap().push(menu.clone());
        Ok(menu)
    }

    fn menus(&self) -> Vec<Menu> {
        self.0.menus.lock().unwrap().clone()
    }

    fn menu_by_id(&self, id: i32) -> Option<Menu> {
        self.0
            .menus
            .lock()
            .unwrap()
            .iter()
            .find(|menu| menu.id == id)
            .cloned()
    }

    fn create_news(&self, news: NewNews) -> Result<News, String> {
        self.0.calls_to_create_news.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        let news = News {
            id: self.next_id(),
            category: news.category,
            title: news.title,
            text: news.text,
            created_at: Utc::now(),
        };
        self.0.news.lock().unwrap().push(news.clone());
        Ok(news)
    }

    fn news(&self) -> Vec<News> {
        self.0.news.lock().unwrap().clone()
    }

    fn news_by_category(&self, category: NewsCategory) -> Vec<News> {
        self.news()
            .into_iter()
            .filter(|item| item.category == category.token())
            .collect()
    }

    fn news_by_id(&self, id: i32) -> Option<News> {
        self.0
            .news
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
}

pub struct MockMailerInner {
    pub success: AtomicBool,
    pub sent: Mutex<Vec<SentMail>>,
}

#[derive(Clone)]
pub struct MockMailer(pub Arc<MockMailerInner>);

impl MockMailer {
    pub fn new() -> Self {
        Self(Arc::new(MockMailerInner {
            success: AtomicBool::new(true),
            sent: Mutex::default(),
        }))
    }
}

impl Mailer for MockMailer {
    fn send(&self, subject: &str, body: &str, from: &str, to: &[String]) -> Result<(), String> {
        self.0.sent.lock().unwrap().push(SentMail {
            subject: subject.into(),
            body: body.into(),
            from: from.into(),
            to: to.to_vec(),
        });
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err("Supposed to fail".into()),
        }
    }
}

#[derive(Clone)]
pub struct TestConfiguration {
    pub frontend_path: PathBuf,
}

impl TestConfiguration {
    pub fn new() -> Self {
        Self {
            frontend_path: PathBuf::from("../frontend/index.html"),
        }
    }
}

impl Configuration for TestConfiguration {
    fn website_title(&self) -> String {
        "WebCafe".into()
    }

    fn admin_password(&self) -> String {
        "123".into()
    }

    fn frontend_path(&self) -> PathBuf {
        self.frontend_path.clone()
    }

    fn port(&self) -> String {
        "0".into()
    }

    fn database_url(&self) -> Option<String> {
        None
    }

    fn mail_from(&self) -> String {
        "webcafe@example.com".into()
    }

    fn contact_recipient(&self) -> String {
        "owner@example.com".into()
    }
}
