use chrono::NaiveDate;

use crate::tba_fetch::{MatchRecord, TeamEvent};

pub const OFFSEASON_EVENT_TYPE: i32 = 99;

/// Order one season's events chronologically, optionally dropping off-season
/// events first. Events with unparseable start dates sort after the dated
/// ones, keeping their source order.
pub fn order_events(events: Vec<TeamEvent>, include_offseason: bool) -> Vec<TeamEvent> {
    let mut kept: Vec<TeamEvent> = events
        .into_iter()
        .filter(|event| include_offseason || event.event_type != OFFSEASON_EVENT_TYPE)
        .collect();
    kept.sort_by_key(|event| start_date_key(&event.start_date));
    kept
}

/// Order one event's matches by round precedence, then match number.
pub fn order_matches(matches: &mut [MatchRecord]) {
    matches.sort_by_key(|record| (record.comp_level.rank(), record.match_number));
}

fn start_date_key(raw: &str) -> (bool, NaiveDate) {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => (false, date),
        Err(_) => (true, NaiveDate::MIN),
    }
}
