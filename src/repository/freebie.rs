use anyhow::Result;
use diesel::{prelude::*, sqlite::Sqlite};
use tracing::debug;

use super::Repository;
use crate::{
    model::{Company, Developer, Freebie, FreebieDetails, NewFreebie},
    schema::{companies, devs, freebies},
};

impl Repository {
    /// Inserts a freebie as given. Unknown company or developer ids are rejected by the store.
    pub fn insert_freebie(&mut self, new_freebie: NewFreebie) -> Result<Freebie> {
        let freebie_record = InsertFreebieRecord {
            item_name: &new_freebie.item_name,
            value: new_freebie.value,
            company_id: new_freebie.company_id,
            dev_id: new_freebie.dev_id,
        };
        let freebie = diesel::insert_into(freebies::table)
            .values(&freebie_record)
            .returning(Freebie::as_returning())
            .get_result(&mut self.connection)?;
        debug!(
            id = freebie.id,
            item_name = %freebie.item_name,
            company_id = freebie.company_id,
            dev_id = freebie.dev_id,
            "inserted freebie"
        );
        return Ok(freebie);
    }

    pub fn find_freebie(&mut self, id: i32) -> Result<Option<Freebie>> {
        let freebie = freebies::table
            .find(id)
            .select(Freebie::as_select())
            .first(&mut self.connection)
            .optional()?;
        return Ok(freebie);
    }

    pub fn list_freebies(&mut self) -> Result<Vec<Freebie>> {
        let freebies = freebies::table
            .order(freebies::id.asc())
            .select(Freebie::as_select())
            .load(&mut self.connection)?;
        return Ok(freebies);
    }

    pub fn freebie_details(&mut self, freebie: &Freebie) -> Result<FreebieDetails> {
        let (freebie, company, developer) = freebies::table
            .inner_join(companies::table)
            .inner_join(devs::table)
            .filter(freebies::id.eq(freebie.id))
            .select((Freebie::as_select(), Company::as_select(), Developer::as_select()))
            .first(&mut self.connection)?;
        return Ok(FreebieDetails {
            freebie,
            company,
            developer,
        });
    }
}

#[derive(Insertable)]
#[diesel(table_name = freebies)]
#[diesel(check_for_backend(Sqlite))]
struct InsertFreebieRecord<'a> {
    item_name: &'a str,
    value: i32,
    company_id: i32,
    dev_id: i32,
}
