use std::fmt;

use diesel::{prelude::*, sqlite::Sqlite};
use serde::Serialize;

use crate::schema::{companies, devs, freebies};

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(Sqlite))]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub founding_year: i32,
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Company {}>", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = devs)]
#[diesel(check_for_backend(Sqlite))]
pub struct Developer {
    pub id: i32,
    pub name: String,
}

impl fmt::Display for Developer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Dev {}>", self.name)
    }
}

/// A gift from one company to one developer.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(table_name = freebies)]
#[diesel(belongs_to(Company))]
#[diesel(belongs_to(Developer, foreign_key = dev_id))]
#[diesel(check_for_backend(Sqlite))]
pub struct Freebie {
    pub id: i32,
    pub item_name: String,
    pub value: i32,
    pub company_id: i32,
    pub dev_id: i32,
}

#[derive(Debug, Clone)]
pub struct NewFreebie {
    pub item_name: String,
    pub value: i32,
    pub company_id: i32,
    pub dev_id: i32,
}

/// A freebie loaded together with the company that gave it and the developer holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreebieDetails {
    pub freebie: Freebie,
    pub company: Company,
    pub developer: Developer,
}

impl FreebieDetails {
    pub fn print_details(&self) -> String {
        format!(
            "{} owns a {} from {}",
            self.developer.name, self.freebie.item_name, self.company.name
        )
    }
}

impl fmt::Display for FreebieDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Freebie {} (${}) from {} to {}>",
            self.freebie.item_name, self.freebie.value, self.company.name, self.developer.name
        )
    }
}
