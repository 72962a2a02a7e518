use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::{Insertable, Queryable};
use serde::{Deserialize, Serialize};

/// A confirmed table reservation. Created through the booking confirm step
/// only; never edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable)]
pub struct Booking {
    pub id: i32,
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub email: Option<String>,
    pub phone_number: String,
    pub number_of_people: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Insertable)]
#[diesel(table_name = crate::schema::bookings)]
pub struct NewBooking {
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub email: Option<String>,
    pub phone_number: String,
    pub number_of_people: i32,
}

/// An unconfirmed booking held in the caller's session between the intake
/// and confirm steps. Date and time are already structured here; the form
/// strings are parsed exactly once, at intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub email: Option<String>,
    pub phone_number: String,
    pub number_of_people: i32,
}

impl BookingDraft {
    pub fn into_new_booking(self) -> NewBooking {
        NewBooking {
            name: self.name,
            date: self.date,
            time: self.time,
            email: self.email,
            phone_number: self.phone_number,
            number_of_people: self.number_of_people,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable)]
pub struct Menu {
    pub id: i32,
    pub title: String,
    pub price: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Insertable)]
#[diesel(table_name = crate::schema::menus)]
pub struct NewMenu {
    pub title: String,
    pub price: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable)]
pub struct News {
    pub id: i32,
    pub category: String,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Insertable)]
#[diesel(table_name = crate::schema::news)]
pub struct NewNews {
    pub category: String,
    pub title: String,
    pub text: String,
}

/// Fixed news category vocabulary. Stored as its token string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewsCategory {
    Promotion,
    IrregularMenu,
    Event,
    Talk,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 4] = [
        NewsCategory::Promotion,
        NewsCategory::IrregularMenu,
        NewsCategory::Event,
        NewsCategory::Talk,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            NewsCategory::Promotion => "promotion",
            NewsCategory::IrregularMenu => "irregularmenu",
            NewsCategory::Event => "event",
            NewsCategory::Talk => "talk",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            NewsCategory::Promotion => "About the cafe",
            NewsCategory::IrregularMenu => "Seasonal menu",
            NewsCategory::Event => "Event",
            NewsCategory::Talk => "Customer talk",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.token() == token)
    }
}
