//! Records every fresh process starts with.

use chrono::{NaiveDate, NaiveDateTime};
use domain::{Product, Task, User};

pub fn users() -> Vec<User> {
    vec![
        User::new(1, "Alice", "alice@example.com"),
        User::new(2, "Bob", "bob@example.com"),
    ]
}

pub fn tasks() -> Vec<Task> {
    vec![
        Task::new(1, "Faire les courses", false),
        Task::new(2, "Envoyer email", true),
    ]
}

pub fn products() -> Vec<Product> {
    vec![
        Product {
            name: "Lait".to_string(),
            expiration_datetime: noon(2025, 9, 30),
            price: 1.5,
        },
        Product {
            name: "Pain".to_string(),
            expiration_datetime: noon(2025, 9, 25),
            price: 0.8,
        },
    ]
}

fn noon(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .unwrap_or_default()
}
