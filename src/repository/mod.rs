use std::env;

use anyhow::Result;
use diesel::{
    connection::{AnsiTransactionManager, SimpleConnection, TransactionManager},
    prelude::*,
    SqliteConnection,
};
use tracing::debug;

pub mod company;
pub mod developer;
pub mod freebie;

const CREATE_TABLES: &str = "\
    PRAGMA foreign_keys = ON;
    CREATE TABLE IF NOT EXISTS companies (
        id INTEGER NOT NULL PRIMARY KEY,
        name TEXT NOT NULL,
        founding_year INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS devs (
        id INTEGER NOT NULL PRIMARY KEY,
        name TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS freebies (
        id INTEGER NOT NULL PRIMARY KEY,
        item_name TEXT NOT NULL,
        value INTEGER NOT NULL,
        company_id INTEGER NOT NULL,
        dev_id INTEGER NOT NULL,
        CONSTRAINT fk_freebies_company_id_companies FOREIGN KEY (company_id) REFERENCES companies (id),
        CONSTRAINT fk_freebies_dev_id_devs FOREIGN KEY (dev_id) REFERENCES devs (id)
    );";

pub const DEFAULT_DATABASE_URL: &str = "freebies.db";

/// Handle to the freebie ledger. Every operation goes through an explicit instance.
pub struct Repository {
    connection: SqliteConnection,
}

impl Repository {
    pub fn new() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").unwrap_or(DEFAULT_DATABASE_URL.to_string());
        return Self::establish(&database_url);
    }

    pub fn establish(database_url: &str) -> Result<Self> {
        let mut connection = SqliteConnection::establish(database_url)?;
        connection.batch_execute(CREATE_TABLES)?;
        debug!(database_url, "opened freebie ledger");
        return Ok(Self { connection });
    }

    /// Runs `f` inside a single transaction, rolling back if it fails.
    pub fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Repository) -> Result<T>,
    {
        AnsiTransactionManager::begin_transaction(&mut self.connection)?;
        match f(self) {
            Ok(value) => {
                AnsiTransactionManager::commit_transaction(&mut self.connection)?;
                Ok(value)
            }
            Err(err) => {
                AnsiTransactionManager::rollback_transaction(&mut self.connection)?;
                Err(err)
            }
        }
    }
}
