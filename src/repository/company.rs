use anyhow::Result;
use diesel::{prelude::*, sqlite::Sqlite};
use tracing::debug;

use super::Repository;
use crate::{
    model::{Company, Developer, Freebie, NewFreebie},
    schema::{companies, devs, freebies},
};

impl Repository {
    pub fn insert_company(&mut self, name: &str, founding_year: i32) -> Result<Company> {
        let company_record = InsertCompanyRecord { name, founding_year };
        let company = diesel::insert_into(companies::table)
            .values(&company_record)
            .returning(Company::as_returning())
            .get_result(&mut self.connection)?;
        debug!(id = company.id, name, founding_year, "inserted company");
        return Ok(company);
    }

    pub fn find_company(&mut self, id: i32) -> Result<Option<Company>> {
        let company = companies::table
            .find(id)
            .select(Company::as_select())
            .first(&mut self.connection)
            .optional()?;
        return Ok(company);
    }

    pub fn list_companies(&mut self) -> Result<Vec<Company>> {
        let companies = companies::table
            .order(companies::id.asc())
            .select(Company::as_select())
            .load(&mut self.connection)?;
        return Ok(companies);
    }

    /// Company with the earliest founding year, lowest id first on ties.
    pub fn oldest_company(&mut self) -> Result<Option<Company>> {
        let oldest_company = companies::table
            .order((companies::founding_year.asc(), companies::id.asc()))
            .select(Company::as_select())
            .first(&mut self.connection)
            .optional()?;
        return Ok(oldest_company);
    }

    /// Records a new freebie from `company` to `developer` and commits it immediately.
    pub fn give_freebie(
        &mut self,
        company: &Company,
        developer: &Developer,
        item_name: &str,
        value: i32,
    ) -> Result<Freebie> {
        self.insert_freebie(NewFreebie {
            item_name: item_name.to_string(),
            value,
            company_id: company.id,
            dev_id: developer.id,
        })
    }

    pub fn company_freebies(&mut self, company: &Company) -> Result<Vec<Freebie>> {
        let company_freebies = Freebie::belonging_to(company)
            .order(freebies::id.asc())
            .select(Freebie::as_select())
            .load(&mut self.connection)?;
        return Ok(company_freebies);
    }

    /// Developers who received at least one freebie from `company`.
    pub fn company_developers(&mut self, company: &Company) -> Result<Vec<Developer>> {
        let company_developers = freebies::table
            .inner_join(devs::table)
            .filter(freebies::company_id.eq(company.id))
            .select(Developer::as_select())
            .distinct()
            .order(devs::id.asc())
            .load(&mut self.connection)?;
        return Ok(company_developers);
    }
}

#[derive(Insertable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(Sqlite))]
struct InsertCompanyRecord<'a> {
    name: &'a str,
    founding_year: i32,
}
