use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use tracing::info;

use super::{company_by_id, developer_by_id, give_freebie_by_ids, parse_id, received_one_by_id, transfer_by_ids};
use crate::repository::Repository;

const HELP: &str = "\
commands:
  companies | devs | freebies       list a table
  company ID                        show a company and the developers it gave to
  dev ID                            show a developer, its freebies and their companies
  oldest                            show the oldest company
  received DEV_ID ITEM...           check whether a developer holds an item
  give COMPANY_ID DEV_ID VALUE ITEM...
  transfer FROM_DEV_ID FREEBIE_ID TO_DEV_ID
  quit | exit";

/// Reads commands line by line from `input` and answers on `output` until EOF or `quit`.
pub fn run<R: BufRead, W: Write>(repo: &mut Repository, input: R, mut output: W) -> Result<()> {
    info!("debug session started, type `help` for commands");
    write!(output, "> ")?;
    output.flush()?;
    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.first() {
            None => {}
            Some(&"quit") | Some(&"exit") => break,
            Some(_) => {
                if let Err(err) = execute(repo, &words, &mut output) {
                    writeln!(output, "error: {:#}", err)?;
                }
            }
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

fn execute<W: Write>(repo: &mut Repository, words: &[&str], output: &mut W) -> Result<()> {
    match words {
        ["help"] => writeln!(output, "{}", HELP)?,
        ["companies"] => {
            for company in repo.list_companies()? {
                writeln!(output, "{} {} (founded {})", company.id, company, company.founding_year)?;
            }
        }
        ["devs"] => {
            for developer in repo.list_developers()? {
                writeln!(output, "{} {}", developer.id, developer)?;
            }
        }
        ["freebies"] => {
            for freebie in repo.list_freebies()? {
                let details = repo.freebie_details(&freebie)?;
                writeln!(output, "{} {}", freebie.id, details)?;
            }
        }
        ["company", id] => {
            let company = company_by_id(repo, parse_id(id)?)?;
            writeln!(output, "{} founded {}", company, company.founding_year)?;
            for developer in repo.company_developers(&company)? {
                writeln!(output, "  gave to {}", developer)?;
            }
        }
        ["dev", id] => {
            let developer = developer_by_id(repo, parse_id(id)?)?;
            writeln!(output, "{}", developer)?;
            for freebie in repo.developer_freebies(&developer)? {
                writeln!(output, "  {}", repo.freebie_details(&freebie)?.print_details())?;
            }
            for company in repo.developer_companies(&developer)? {
                writeln!(output, "  from {}", company)?;
            }
        }
        ["oldest"] => match repo.oldest_company()? {
            Some(company) => writeln!(output, "{} founded {}", company, company.founding_year)?,
            None => writeln!(output, "no companies")?,
        },
        ["received", dev_id, item @ ..] if !item.is_empty() => {
            let received = received_one_by_id(repo, parse_id(dev_id)?, &item.join(" "))?;
            writeln!(output, "{}", received)?;
        }
        ["give", company_id, dev_id, value, item @ ..] if !item.is_empty() => {
            let value: i32 = value.parse().with_context(|| format!("invalid value: {}", value))?;
            let freebie = give_freebie_by_ids(repo, parse_id(company_id)?, parse_id(dev_id)?, &item.join(" "), value)?;
            writeln!(output, "{} {}", freebie.id, repo.freebie_details(&freebie)?)?;
        }
        ["transfer", from, freebie_id, to] => {
            if transfer_by_ids(repo, parse_id(from)?, parse_id(freebie_id)?, parse_id(to)?)? {
                writeln!(output, "transferred")?;
            } else {
                writeln!(output, "not transferred, developer {} does not own freebie {}", from, freebie_id)?;
            }
        }
        _ => bail!("unknown command `{}`, type `help`", words.join(" ")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::{command::seed::seed, repository::tests::memory_repository};

    fn session(repo: &mut Repository, script: &str) -> String {
        let mut output = Vec::new();
        run(repo, Cursor::new(script), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn answers_queries_on_seeded_ledger() {
        let mut repo = memory_repository();
        seed(&mut repo).unwrap();

        let output = session(&mut repo, "oldest\nreceived 1 Sticker\nreceived 2 Sticker\ncompany 1\n");

        assert!(output.contains("<Company Microsoft> founded 1975"));
        assert!(output.contains("> true\n"));
        assert!(output.contains("> false\n"));
        assert!(output.contains("  gave to <Dev Alice>\n  gave to <Dev Bob>"));
    }

    #[test]
    fn gives_and_transfers() {
        let mut repo = memory_repository();
        seed(&mut repo).unwrap();

        let output = session(&mut repo, "give 2 2 5 Coffee Cup\ntransfer 1 4 2\ntransfer 2 4 1\ndev 1\n");

        assert!(output.contains("4 <Freebie Coffee Cup ($5) from Microsoft to Bob>"));
        assert!(output.contains("not transferred, developer 1 does not own freebie 4"));
        assert!(output.contains("transferred\n"));
        assert!(output.contains("  Alice owns a Coffee Cup from Microsoft"));
    }

    #[test]
    fn reports_errors_and_keeps_going() {
        let mut repo = memory_repository();

        let output = session(&mut repo, "bogus\ndev 9\noldest\nquit\noldest\n");

        assert!(output.contains("error: unknown command `bogus`"));
        assert!(output.contains("error: developer 9 not found"));
        assert_eq!(output.matches("no companies").count(), 1);
    }
}
