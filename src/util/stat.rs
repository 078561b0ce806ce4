use chrono::NaiveDate;
use serde_json::Value;

/// Career hitting line of one batter against one pitcher.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CareerSplit {
    pub home_runs: u32,
}

impl CareerSplit {
    pub fn is_significant(self) -> bool {
        self.home_runs >= 1
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameLogEntry {
    pub date: Option<NaiveDate>,
    pub home_runs: u32,
}

fn home_runs(stat: &Value) -> u32 {
    stat["homeRuns"].as_u64().map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
}

fn hitting_splits(response: &Value) -> Option<&Vec<Value>> {
    response["people"][0]["stats"][0]["splits"].as_array()
}

/// Decodes a `vsPlayer` hydration. `None` means the two players have never met.
pub fn career_split(response: &Value) -> Option<CareerSplit> {
    let stat = &hitting_splits(response)?.first()?["stat"];
    if !stat.is_object() {
        return None;
    }
    Some(CareerSplit { home_runs: home_runs(stat) })
}

/// Decodes a `gameLog` hydration into newest-first order. When every split is
/// dated the log is sorted by date, otherwise the provider's order is kept.
pub fn game_log(response: &Value) -> Vec<GameLogEntry> {
    let Some(splits) = hitting_splits(response) else { return Vec::new() };
    let mut log = splits
        .iter()
        .map(|split| GameLogEntry {
            date: split["date"].as_str().and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
            home_runs: home_runs(&split["stat"]),
        })
        .collect::<Vec<_>>();
    if log.iter().all(|entry| entry.date.is_some()) {
        log.sort_by(|a, b| b.date.cmp(&a.date));
    }
    log
}

/// Home runs over the most recent 5, 10 and 20 games.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HomeRunPace {
    pub last5: u32,
    pub last10: u32,
    pub last20: u32,
}

impl HomeRunPace {
    pub fn from_log(log: &[GameLogEntry]) -> Self {
        let mut pace = Self::default();
        for (idx, entry) in log.iter().take(20).enumerate() {
            if idx < 5 {
                pace.last5 = pace.last5.saturating_add(entry.home_runs);
            }
            if idx < 10 {
                pace.last10 = pace.last10.saturating_add(entry.home_runs);
            }
            pace.last20 = pace.last20.saturating_add(entry.home_runs);
        }
        pace
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn log_of(home_runs: &[u32]) -> Vec<GameLogEntry> {
        home_runs.iter().map(|&home_runs| GameLogEntry { date: None, home_runs }).collect()
    }

    #[test]
    fn career_split_reads_home_runs() {
        let response = json!({ "people": [{ "stats": [{ "splits": [{ "stat": { "homeRuns": 3, "atBats": 17 } }] }] }] });
        assert_eq!(career_split(&response), Some(CareerSplit { home_runs: 3 }));
    }

    #[test]
    fn career_split_absent_when_never_faced() {
        assert_eq!(career_split(&json!({ "people": [{ "id": 1 }] })), None);
        assert_eq!(career_split(&json!({ "people": [{ "stats": [{ "splits": [] }] }] })), None);
        assert_eq!(career_split(&json!({ "people": [] })), None);
    }

    #[test]
    fn career_split_without_home_runs_is_zero() {
        let split = career_split(&json!({ "people": [{ "stats": [{ "splits": [{ "stat": { "atBats": 4 } }] }] }] })).unwrap();
        assert_eq!(split.home_runs, 0);
        assert!(!split.is_significant());
    }

    #[test]
    fn game_log_sorts_dated_entries_newest_first() {
        let response = json!({ "people": [{ "stats": [{ "splits": [
            { "date": "2024-06-01", "stat": { "homeRuns": 1 } },
            { "date": "2024-06-03", "stat": { "homeRuns": 0 } },
            { "date": "2024-06-02", "stat": {} },
        ] }] }] });
        let log = game_log(&response);
        let dates = log.iter().map(|e| e.date.unwrap().to_string()).collect::<Vec<_>>();
        assert_eq!(dates, ["2024-06-03", "2024-06-02", "2024-06-01"]);
        assert_eq!(log[2].home_runs, 1);
    }

    #[test]
    fn game_log_keeps_provider_order_without_dates() {
        let response = json!({ "people": [{ "stats": [{ "splits": [
            { "stat": { "homeRuns": 2 } },
            { "stat": { "homeRuns": 0 } },
        ] }] }] });
        assert_eq!(game_log(&response), log_of(&[2, 0]));
    }

    #[test]
    fn game_log_absent_is_empty() {
        assert!(game_log(&json!({ "people": [{}] })).is_empty());
    }

    #[test]
    fn pace_sums_prefixes() {
        let pace = HomeRunPace::from_log(&log_of(&[1, 0, 0, 1, 0, 1, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 1]));
        assert_eq!(pace, HomeRunPace { last5: 2, last10: 3, last20: 6 });
    }

    #[test]
    fn pace_ignores_games_past_twenty() {
        let mut log = log_of(&[0_u32; 20]);
        log.extend(log_of(&[5]));
        assert_eq!(HomeRunPace::from_log(&log).last20, 0);
    }

    #[test]
    fn pace_saturates_instead_of_overflowing() {
        let pace = HomeRunPace::from_log(&log_of(&[u32::MAX, 1]));
        assert_eq!(pace, HomeRunPace { last5: u32::MAX, last10: u32::MAX, last20: u32::MAX });
    }

    #[test]
    fn huge_home_run_count_clamps() {
        let response = json!({ "people": [{ "stats": [{ "splits": [{ "stat": { "homeRuns": u64::MAX } }] }] }] });
        assert_eq!(career_split(&response), Some(CareerSplit { home_runs: u32::MAX }));
    }

    #[test]
    fn pace_is_monotonic_for_short_logs() {
        for len in 0..25 {
            let log = log_of(&(0..len).map(|n| n % 3).collect::<Vec<u32>>());
            let pace = HomeRunPace::from_log(&log);
            assert!(pace.last5 <= pace.last10 && pace.last10 <= pace.last20);
        }
    }
}
