use anyhow::{Context, Result};

use crate::{
    model::{Company, Developer, Freebie},
    repository::Repository,
};

pub mod debug;
pub mod seed;

fn parse_id(text: &str) -> Result<i32> {
    text.parse().with_context(|| format!("invalid id: {}", text))
}

pub(crate) fn company_by_id(repo: &mut Repository, id: i32) -> Result<Company> {
    repo.find_company(id)?.with_context(|| format!("company {} not found", id))
}

pub(crate) fn developer_by_id(repo: &mut Repository, id: i32) -> Result<Developer> {
    repo.find_developer(id)?.with_context(|| format!("developer {} not found", id))
}

pub(crate) fn freebie_by_id(repo: &mut Repository, id: i32) -> Result<Freebie> {
    repo.find_freebie(id)?.with_context(|| format!("freebie {} not found", id))
}

/// Looks up both developers and the freebie, then attempts the transfer.
pub fn transfer_by_ids(repo: &mut Repository, from_dev_id: i32, freebie_id: i32, to_dev_id: i32) -> Result<bool> {
    let from = developer_by_id(repo, from_dev_id)?;
    let to = developer_by_id(repo, to_dev_id)?;
    let mut freebie = freebie_by_id(repo, freebie_id)?;
    repo.transfer(&from, &mut freebie, &to)
}

pub fn give_freebie_by_ids(
    repo: &mut Repository,
    company_id: i32,
    dev_id: i32,
    item_name: &str,
    value: i32,
) -> Result<Freebie> {
    let company = company_by_id(repo, company_id)?;
    let developer = developer_by_id(repo, dev_id)?;
    repo.give_freebie(&company, &developer, item_name, value)
}

pub fn received_one_by_id(repo: &mut Repository, dev_id: i32, item_name: &str) -> Result<bool> {
    let developer = developer_by_id(repo, dev_id)?;
    repo.received_one(&developer, item_name)
}

#[derive(serde::Serialize)]
pub struct Dump {
    pub companies: Vec<Company>,
    pub devs: Vec<Developer>,
    pub freebies: Vec<Freebie>,
}

pub fn dump(repo: &mut Repository) -> Result<Dump> {
    Ok(Dump {
        companies: repo.list_companies()?,
        devs: repo.list_developers()?,
        freebies: repo.list_freebies()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::tests::*;

    #[test]
    fn lookups_report_missing_entities() {
        let mut repo = memory_repository();
        let err = received_one_by_id(&mut repo, 7, "Mug").unwrap_err();
        assert_eq!(err.to_string(), "developer 7 not found");
        let err = give_freebie_by_ids(&mut repo, 3, 1, "Mug", 10).unwrap_err();
        assert_eq!(err.to_string(), "company 3 not found");
        assert!(parse_id("abc").is_err());
    }

    #[test]
    fn transfer_by_ids_moves_only_owned_freebies() {
        let mut repo = memory_repository();
        let (google, _) = google_and_microsoft(&mut repo);
        let (alice, bob) = alice_and_bob(&mut repo);
        let sticker = repo.give_freebie(&google, &alice, "Sticker", 1).unwrap();

        assert!(!transfer_by_ids(&mut repo, bob.id, sticker.id, bob.id).unwrap());
        assert!(transfer_by_ids(&mut repo, alice.id, sticker.id, bob.id).unwrap());
        assert!(received_one_by_id(&mut repo, bob.id, "Sticker").unwrap());
    }

    #[test]
    fn dump_lists_all_tables() {
        let mut repo = memory_repository();
        let (google, _) = google_and_microsoft(&mut repo);
        let (alice, _) = alice_and_bob(&mut repo);
        repo.give_freebie(&google, &alice, "Sticker", 1).unwrap();

        let dump = dump(&mut repo).unwrap();
        assert_eq!(dump.companies.len(), 2);
        assert_eq!(dump.devs.len(), 2);
        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["freebies"][0]["item_name"], "Sticker");
        assert_eq!(json["companies"][1]["founding_year"], 1975);
    }
}
