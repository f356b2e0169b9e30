use std::io;
use std::path::PathBuf;

use anyhow::Result;

use tba_matchlog::aggregate::aggregate;
use tba_matchlog::export::{export_workbook, workbook_filename};
use tba_matchlog::http_client;
use tba_matchlog::prompt::{prompt_team_key, prompt_yes_no};
use tba_matchlog::schedule::{order_events, order_matches};
use tba_matchlog::tba_fetch;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    // Fail before any prompt if the credential is missing.
    http_client::auth_key()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    let target = prompt_team_key(&mut input, &mut output)?;
    let exclude_offseason = prompt_yes_no("Exclude off-season events?", &mut input, &mut output)?;

    let years = match tba_fetch::fetch_years_participated(&target) {
        Ok(years) => years,
        Err(err) => {
            eprintln!("[WARN] failed to list seasons for {target}: {err:#}");
            Vec::new()
        }
    };

    let mut all_matches = Vec::new();
    for year in years {
        let events = match tba_fetch::fetch_team_events(&target, year) {
            Ok(events) => events,
            Err(err) => {
                eprintln!("[WARN] failed to fetch {year} events for {target}: {err:#}");
                continue;
            }
        };
        for event in order_events(events, !exclude_offseason) {
            match tba_fetch::fetch_event_matches(&target, &event.key) {
                Ok(parsed) => {
                    for skipped in &parsed.skipped {
                        eprintln!("[WARN] {}: {skipped}", event.key);
                    }
                    let mut matches = parsed.matches;
                    order_matches(&mut matches);
                    println!("{} ({}): {} matches", event.name, event.key, matches.len());
                    all_matches.extend(matches);
                }
                Err(err) => {
                    eprintln!("[WARN] failed to fetch matches for {}: {err:#}", event.key);
                }
            }
        }
        println!("{year} scan finished");
    }

    let aggregation = aggregate(&target, &all_matches);
    for warning in &aggregation.warnings {
        eprintln!("[WARN] {warning}");
    }

    let path = PathBuf::from(workbook_filename(&target));
    let report = export_workbook(&path, &aggregation)?;
    println!(
        "Saved {} match rows and {} team stat rows to {}",
        report.match_rows,
        report.partner_rows,
        path.display()
    );

    Ok(())
}
