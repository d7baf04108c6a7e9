use anyhow::Result;
use diesel::{dsl::exists, prelude::*, sqlite::Sqlite};
use tracing::debug;

use super::Repository;
use crate::{
    model::{Company, Developer, Freebie},
    schema::{companies, devs, freebies},
};

impl Repository {
    pub fn insert_developer(&mut self, name: &str) -> Result<Developer> {
        let developer = diesel::insert_into(devs::table)
            .values(&InsertDeveloperRecord { name })
            .returning(Developer::as_returning())
            .get_result(&mut self.connection)?;
        debug!(id = developer.id, name, "inserted developer");
        return Ok(developer);
    }

    pub fn find_developer(&mut self, id: i32) -> Result<Option<Developer>> {
        let developer = devs::table
            .find(id)
            .select(Developer::as_select())
            .first(&mut self.connection)
            .optional()?;
        return Ok(developer);
    }

    pub fn list_developers(&mut self) -> Result<Vec<Developer>> {
        let developers = devs::table
            .order(devs::id.asc())
            .select(Developer::as_select())
            .load(&mut self.connection)?;
        return Ok(developers);
    }

    /// Whether `developer` holds any freebie named exactly `item_name`.
    pub fn received_one(&mut self, developer: &Developer, item_name: &str) -> Result<bool> {
        let received = diesel::select(exists(
            freebies::table
                .filter(freebies::dev_id.eq(developer.id))
                .filter(freebies::item_name.eq(item_name)),
        ))
        .get_result::<bool>(&mut self.connection)?;
        return Ok(received);
    }

    /// Hands `freebie` over to `new_developer` if `current_developer` still holds it.
    ///
    /// Ownership is checked against the stored row, not the in-memory copy. Returns
    /// `false` and leaves everything untouched when `current_developer` is not the owner.
    pub fn transfer(
        &mut self,
        current_developer: &Developer,
        freebie: &mut Freebie,
        new_developer: &Developer,
    ) -> Result<bool> {
        let updated = diesel::update(
            freebies::table
                .filter(freebies::id.eq(freebie.id))
                .filter(freebies::dev_id.eq(current_developer.id)),
        )
        .set(freebies::dev_id.eq(new_developer.id))
        .execute(&mut self.connection)?;
        if updated == 0 {
            debug!(
                freebie_id = freebie.id,
                dev_id = current_developer.id,
                "transfer skipped, developer does not own freebie"
            );
            return Ok(false);
        }
        freebie.dev_id = new_developer.id;
        debug!(
            freebie_id = freebie.id,
            from = current_developer.id,
            to = new_developer.id,
            "transferred freebie"
        );
        Ok(true)
    }

    pub fn developer_freebies(&mut self, developer: &Developer) -> Result<Vec<Freebie>> {
        let developer_freebies = Freebie::belonging_to(developer)
            .order(freebies::id.asc())
            .select(Freebie::as_select())
            .load(&mut self.connection)?;
        return Ok(developer_freebies);
    }

    /// Companies that gave `developer` at least one freebie it still holds.
    pub fn developer_companies(&mut self, developer: &Developer) -> Result<Vec<Company>> {
        let developer_companies = freebies::table
            .inner_join(companies::table)
            .filter(freebies::dev_id.eq(developer.id))
            .select(Company::as_select())
            .distinct()
            .order(companies::id.asc())
            .load(&mut self.connection)?;
        return Ok(developer_companies);
    }
}

#[derive(Insertable)]
#[diesel(table_name = devs)]
#[diesel(check_for_backend(Sqlite))]
struct InsertDeveloperRecord<'a> {
    name: &'a str,
}

#[cfg(test)]
mod tests {
    use crate::repository::tests::*;

    #[test]
    fn received_one_matches_exact_item_name() {
        let mut repo = memory_repository();
        let (google, _) = google_and_microsoft(&mut repo);
        let (alice, _) = alice_and_bob(&mut repo);
        repo.give_freebie(&google, &alice, "Sticker", 1).unwrap();

        assert!(repo.received_one(&alice, "Sticker").unwrap());
        assert!(!repo.received_one(&alice, "Mug").unwrap());
        assert!(!repo.received_one(&alice, "sticker").unwrap());
    }

    #[test]
    fn received_one_is_false_without_freebies() {
        let mut repo = memory_repository();
        let (google, _) = google_and_microsoft(&mut repo);
        let (alice, bob) = alice_and_bob(&mut repo);
        repo.give_freebie(&google, &alice, "Sticker", 1).unwrap();

        assert!(!repo.received_one(&bob, "Sticker").unwrap());
    }

    #[test]
    fn transfer_by_owner_moves_freebie() {
        let mut repo = memory_repository();
        let (google, _) = google_and_microsoft(&mut repo);
        let (alice, bob) = alice_and_bob(&mut repo);
        let mut sticker = repo.give_freebie(&google, &alice, "Sticker", 1).unwrap();

        assert!(repo.transfer(&alice, &mut sticker, &bob).unwrap());

        assert_eq!(sticker.dev_id, bob.id);
        assert_eq!(repo.find_freebie(sticker.id).unwrap(), Some(sticker));
        assert!(repo.received_one(&bob, "Sticker").unwrap());
        assert!(!repo.received_one(&alice, "Sticker").unwrap());
    }

    #[test]
    fn transfer_by_non_owner_is_noop() {
        let mut repo = memory_repository();
        let (google, _) = google_and_microsoft(&mut repo);
        let (alice, bob) = alice_and_bob(&mut repo);
        let mut sticker = repo.give_freebie(&google, &alice, "Sticker", 1).unwrap();

        assert!(!repo.transfer(&bob, &mut sticker, &bob).unwrap());

        assert_eq!(sticker.dev_id, alice.id);
        assert_eq!(repo.find_freebie(sticker.id).unwrap().unwrap().dev_id, alice.id);
    }

    #[test]
    fn transfer_checks_stored_owner_not_stale_copy() {
        let mut repo = memory_repository();
        let (google, _) = google_and_microsoft(&mut repo);
        let (alice, bob) = alice_and_bob(&mut repo);
        let mut sticker = repo.give_freebie(&google, &alice, "Sticker", 1).unwrap();
        let mut stale = sticker.clone();
        repo.transfer(&alice, &mut sticker, &bob).unwrap();

        assert!(!repo.transfer(&alice, &mut stale, &alice).unwrap());
        assert_eq!(repo.find_freebie(sticker.id).unwrap().unwrap().dev_id, bob.id);
    }

    #[test]
    fn projections_follow_transfers() {
        let mut repo = memory_repository();
        let (google, microsoft) = google_and_microsoft(&mut repo);
        let (alice, bob) = alice_and_bob(&mut repo);
        let mut sticker = repo.give_freebie(&google, &alice, "Sticker", 1).unwrap();
        repo.give_freebie(&microsoft, &alice, "Mug", 10).unwrap();

        assert_eq!(
            repo.developer_companies(&alice).unwrap(),
            vec![google.clone(), microsoft.clone()]
        );
        repo.transfer(&alice, &mut sticker, &bob).unwrap();

        assert_eq!(repo.developer_companies(&alice).unwrap(), vec![microsoft]);
        assert_eq!(repo.developer_companies(&bob).unwrap(), vec![google.clone()]);
        assert_eq!(repo.company_developers(&google).unwrap(), vec![bob.clone()]);
        assert_eq!(repo.developer_freebies(&bob).unwrap(), vec![sticker]);
        assert_eq!(repo.developer_freebies(&alice).unwrap().len(), 1);
    }
}
