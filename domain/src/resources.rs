//! Flat records: users, tasks, products and orders.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::validation::ensure_finite;
use crate::{DomainError, Record};

/// A registered user (read-only listing).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Record for User {
    type Id = u64;
    const KIND: &'static str = "User";

    fn id(&self) -> &u64 {
        &self.id
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            _ => None,
        }
    }
}

/// A to-do item. The caller supplies the identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

impl Task {
    pub fn new(id: u64, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            title: title.into(),
            completed,
        }
    }
}

impl Record for Task {
    type Id = u64;
    const KIND: &'static str = "Task";

    fn id(&self) -> &u64 {
        &self.id
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            _ => None,
        }
    }
}

/// A perishable product. Its name is the identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub expiration_datetime: NaiveDateTime,
    pub price: f64,
}

impl Record for Product {
    type Id = String;
    const KIND: &'static str = "Product";

    fn id(&self) -> &String {
        &self.name
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), DomainError> {
        ensure_finite("price", self.price)
    }
}

/// A customer order. The caller supplies the identifier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Order {
    pub identifier: u64,
    pub customer_name: String,
    pub creation_datetime: NaiveDateTime,
    pub total_amount: f64,
}

impl Record for Order {
    type Id = u64;
    const KIND: &'static str = "Order";

    fn id(&self) -> &u64 {
        &self.identifier
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "customer_name" => Some(&self.customer_name),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), DomainError> {
        ensure_finite("total_amount", self.total_amount)
    }
}
