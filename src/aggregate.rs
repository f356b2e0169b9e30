use std::collections::HashMap;

use anyhow::{Result, anyhow};

use crate::tba_fetch::{AllianceResult, CompLevel, MatchRecord};

pub const ALLIANCE_SIZE: usize = 3;

/// Team keys look like `frc1710`: the literal prefix followed by the team
/// number. Case-sensitive, no whitespace.
pub fn is_team_key(raw: &str) -> bool {
    match raw.strip_prefix("frc") {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

pub fn team_number(key: &str) -> Option<u32> {
    key.strip_prefix("frc")?.parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Tie => "tie",
        }
    }

    fn from_scores(own: i64, other: i64) -> Outcome {
        if own > other {
            Outcome::Win
        } else if own < other {
            Outcome::Loss
        } else {
            Outcome::Tie
        }
    }
}

/// One row of the match log: match identity plus the cumulative counters as of
/// and including this match.
#[derive(Debug, Clone)]
pub struct ProcessedMatch {
    pub match_key: String,
    pub event_key: String,
    pub comp_level: CompLevel,
    pub match_number: u32,
    pub set_number: Option<u32>,
    pub matches_played: u32,
    pub year: Option<u16>,
    pub teammates: [Option<String>; ALLIANCE_SIZE],
    pub opponents: [Option<String>; ALLIANCE_SIZE],
    pub outcome: Outcome,
    pub wins: u32,
    pub losses: u32,
    pub record: f64,
    pub win_loss_ratio: f64,
    pub wins_above_even: i64,
}

/// Per-team tallies relative to the target team. A team that both partners
/// and opposes the target across different matches accumulates into one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartnerStats {
    pub matches_with: u32,
    pub on_alliance_with: u32,
    pub opposing: u32,
    pub wins_with: u32,
    pub losses_with: u32,
    pub ties_with: u32,
    pub wins_against: u32,
    pub losses_against: u32,
    pub ties_against: u32,
}

#[derive(Debug, Default)]
pub struct Aggregation {
    pub matches: Vec<ProcessedMatch>,
    pub partners: HashMap<String, PartnerStats>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    matches_played: u32,
    wins: u32,
    losses: u32,
    wins_above_even: i64,
}

impl Totals {
    fn apply(&mut self, outcome: Outcome) {
        self.matches_played += 1;
        match outcome {
            Outcome::Win => {
                self.wins += 1;
                self.wins_above_even += 1;
            }
            Outcome::Loss => {
                self.losses += 1;
                self.wins_above_even -= 1;
            }
            // Ties count toward neither wins nor losses but still step the
            // running score down, same as a loss.
            Outcome::Tie => self.wins_above_even -= 1,
        }
    }

    fn record(&self) -> f64 {
        f64::from(self.wins) / f64::from(self.matches_played)
    }

    // Not a true ratio when losses = 0: the raw win count stands in for it.
    fn win_loss_ratio(&self) -> f64 {
        if self.losses == 0 {
            f64::from(self.wins)
        } else {
            f64::from(self.wins) / f64::from(self.losses)
        }
    }
}

/// Single linear pass over the target team's matches, in sequence order.
/// Malformed records (target on neither or both alliances, missing score) are
/// skipped with a warning and touch none of the accumulators.
pub fn aggregate(target: &str, matches: &[MatchRecord]) -> Aggregation {
    let mut aggregation = Aggregation::default();
    let mut totals = Totals::default();

    for record in matches {
        match process_match(target, record, &mut totals, &mut aggregation.partners) {
            Ok(row) => aggregation.matches.push(row),
            Err(err) => aggregation
                .warnings
                .push(format!("skipping match {}: {err}", record.key)),
        }
    }

    aggregation
}

fn process_match(
    target: &str,
    record: &MatchRecord,
    totals: &mut Totals,
    partners: &mut HashMap<String, PartnerStats>,
) -> Result<ProcessedMatch> {
    let (own, other) = own_alliance(target, record)?;
    let own_score = own
        .score
        .ok_or_else(|| anyhow!("missing score for {target}'s alliance"))?;
    let other_score = other
        .score
        .ok_or_else(|| anyhow!("missing score for opposing alliance"))?;
    let outcome = Outcome::from_scores(own_score, other_score);

    totals.apply(outcome);

    let co_members: Vec<&String> = own.team_keys.iter().filter(|key| *key != target).collect();
    let teammates = padded(
        std::iter::once(target.to_string()).chain(co_members.iter().map(|key| (*key).clone())),
    );
    let opponents = padded(other.team_keys.iter().cloned());

    for team in &co_members {
        let entry = partners.entry((*team).clone()).or_default();
        entry.matches_with += 1;
        entry.on_alliance_with += 1;
        match outcome {
            Outcome::Win => entry.wins_with += 1,
            Outcome::Loss => entry.losses_with += 1,
            Outcome::Tie => entry.ties_with += 1,
        }
    }

    // An opponent's tally inverts the target's outcome: our win is their loss.
    for team in &other.team_keys {
        let entry = partners.entry(team.clone()).or_default();
        entry.matches_with += 1;
        entry.opposing += 1;
        match outcome {
            Outcome::Win => entry.losses_against += 1,
            Outcome::Loss => entry.wins_against += 1,
            Outcome::Tie => entry.ties_against += 1,
        }
    }

    Ok(ProcessedMatch {
        match_key: record.key.clone(),
        event_key: record.event_key.clone(),
        comp_level: record.comp_level,
        match_number: record.match_number,
        set_number: record.set_number,
        matches_played: totals.matches_played,
        year: season_year(&record.key),
        teammates,
        opponents,
        outcome,
        wins: totals.wins,
        losses: totals.losses,
        record: totals.record(),
        win_loss_ratio: totals.win_loss_ratio(),
        wins_above_even: totals.wins_above_even,
    })
}

fn own_alliance<'a>(
    target: &str,
    record: &'a MatchRecord,
) -> Result<(&'a AllianceResult, &'a AllianceResult)> {
    let red = &record.alliances.red;
    let blue = &record.alliances.blue;
    let on_red = red.team_keys.iter().any(|key| key == target);
    let on_blue = blue.team_keys.iter().any(|key| key == target);
    match (on_red, on_blue) {
        (true, false) => Ok((red, blue)),
        (false, true) => Ok((blue, red)),
        (true, true) => Err(anyhow!("{target} appears on both alliances")),
        (false, false) => Err(anyhow!("{target} appears on neither alliance")),
    }
}

fn padded(keys: impl Iterator<Item = String>) -> [Option<String>; ALLIANCE_SIZE] {
    let mut out: [Option<String>; ALLIANCE_SIZE] = [None, None, None];
    for (slot, key) in out.iter_mut().zip(keys) {
        *slot = Some(key);
    }
    out
}

fn season_year(match_key: &str) -> Option<u16> {
    let head = match_key.get(..4)?;
    if !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    head.parse().ok()
}
