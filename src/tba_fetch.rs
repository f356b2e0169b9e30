use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use crate::http_client::http_client;

const TBA_BASE_URL: &str = "https://www.thebluealliance.com/api/v3";

/// Competition round stage, in bracket order. Any other wire value marks the
/// record as malformed; it never reaches the ordering or aggregation passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompLevel {
    Qm,
    Ef,
    Qf,
    Sf,
    F,
}

impl CompLevel {
    pub fn rank(self) -> u8 {
        match self {
            CompLevel::Qm => 0,
            CompLevel::Ef => 1,
            CompLevel::Qf => 2,
            CompLevel::Sf => 3,
            CompLevel::F => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompLevel::Qm => "qm",
            CompLevel::Ef => "ef",
            CompLevel::Qf => "qf",
            CompLevel::Sf => "sf",
            CompLevel::F => "f",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamEvent {
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub event_type: i32,
    #[serde(default)]
    pub start_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchRecord {
    pub key: String,
    pub event_key: String,
    pub comp_level: CompLevel,
    pub match_number: u32,
    #[serde(default)]
    pub set_number: Option<u32>,
    pub alliances: MatchAlliances,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchAlliances {
    pub red: AllianceResult,
    pub blue: AllianceResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AllianceResult {
    #[serde(default)]
    pub team_keys: Vec<String>,
    #[serde(default)]
    pub score: Option<i64>,
}

/// Match list for one event, with malformed records dropped rather than
/// failing the whole event. `skipped` carries one message per dropped record.
#[derive(Debug, Default)]
pub struct ParsedMatches {
    pub matches: Vec<MatchRecord>,
    pub skipped: Vec<String>,
}

pub fn fetch_years_participated(team_key: &str) -> Result<Vec<u16>> {
    let body = fetch_body(&format!("{TBA_BASE_URL}/team/{team_key}/years_participated"))?;
    parse_years_json(&body)
}

pub fn fetch_team_events(team_key: &str, year: u16) -> Result<Vec<TeamEvent>> {
    let body = fetch_body(&format!("{TBA_BASE_URL}/team/{team_key}/events/{year}"))?;
    parse_events_json(&body)
}

pub fn fetch_event_matches(team_key: &str, event_key: &str) -> Result<ParsedMatches> {
    let body = fetch_body(&format!(
        "{TBA_BASE_URL}/team/{team_key}/event/{event_key}/matches"
    ))?;
    parse_matches_json(&body)
}

fn fetch_body(url: &str) -> Result<String> {
    let client = http_client()?;
    let resp = client.get(url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow!("http {status}: {body}"));
    }
    Ok(body)
}

pub fn parse_years_json(raw: &str) -> Result<Vec<u16>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid years_participated json")
}

pub fn parse_events_json(raw: &str) -> Result<Vec<TeamEvent>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid events json")
}

pub fn parse_matches_json(raw: &str) -> Result<ParsedMatches> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(ParsedMatches::default());
    }

    let entries: Vec<Value> = serde_json::from_str(trimmed).context("invalid matches json")?;
    let mut parsed = ParsedMatches::default();
    for entry in entries {
        let key = entry
            .get("key")
            .and_then(|v| v.as_str())
            .unwrap_or("<missing key>")
            .to_string();
        match serde_json::from_value::<MatchRecord>(entry) {
            Ok(record) => parsed.matches.push(record),
            Err(err) => parsed.skipped.push(format!("match {key}: {err}")),
        }
    }
    Ok(parsed)
}
