diesel::table! {
    bookings (id) {
        id -> Int4,
        name -> Varchar,
        date -> Date,
        time -> Time,
        email -> Nullable<Varchar>,
        phone_number -> Varchar,
        number_of_people -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    menus (id) {
        id -> Int4,
        title -> Varchar,
        price -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    news (id) {
        id -> Int4,
        category -> Varchar,
        title -> Varchar,
        text -> Text,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(bookings, menus, news);
