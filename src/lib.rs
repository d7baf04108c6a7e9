//! A small ledger of companies, developers and the freebies companies give developers,
//! stored in SQLite through diesel.

pub mod command;
pub mod logging;
pub mod model;
pub mod repository;
pub mod schema;

pub use model::{Company, Developer, Freebie, FreebieDetails, NewFreebie};
pub use repository::Repository;
