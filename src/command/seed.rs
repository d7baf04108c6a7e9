use anyhow::Result;
use tracing::info;

use crate::repository::Repository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub companies: usize,
    pub devs: usize,
    pub freebies: usize,
}

/// Fills the ledger with a small fixed dataset, all in one transaction.
pub fn seed(repo: &mut Repository) -> Result<SeedSummary> {
    let summary = repo.transaction(|repo| {
        let google = repo.insert_company("Google", 1998)?;
        let microsoft = repo.insert_company("Microsoft", 1975)?;

        let alice = repo.insert_developer("Alice")?;
        let bob = repo.insert_developer("Bob")?;

        repo.give_freebie(&google, &alice, "Sticker", 1)?;
        repo.give_freebie(&microsoft, &alice, "Mug", 10)?;
        repo.give_freebie(&google, &bob, "T-shirt", 20)?;

        Ok(SeedSummary {
            companies: 2,
            devs: 2,
            freebies: 3,
        })
    })?;
    info!(
        companies = summary.companies,
        devs = summary.devs,
        freebies = summary.freebies,
        "seeded freebie ledger"
    );
    Ok(summary)
}
