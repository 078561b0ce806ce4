#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Result};
use bvp_scanner::util::roster::RosterEntry;
use bvp_scanner::util::schedule::{Game, ProbablePitcher, Side};
use bvp_scanner::util::stat::{CareerSplit, GameLogEntry};
use bvp_scanner::util::statsapi::StatsProvider;

pub fn side(team_id: i64, team_name: &str, pitcher: Option<(i64, &str)>) -> Side {
    Side {
        team_id,
        team_name: team_name.to_owned(),
        probable_pitcher: pitcher.map(|(id, name)| ProbablePitcher { id, name: name.to_owned() }),
    }
}

pub fn game(id: i64, away: Side, home: Side) -> Game {
    Game { id, away, home }
}

pub fn batter(id: i64, name: &str) -> RosterEntry {
    RosterEntry { id, name: Some(name.to_owned()), position_code: Some("8".to_owned()) }
}

pub fn nameless(id: i64) -> RosterEntry {
    RosterEntry { id, name: None, position_code: None }
}

pub fn pitcher(id: i64, name: &str) -> RosterEntry {
    RosterEntry { id, name: Some(name.to_owned()), position_code: Some("1".to_owned()) }
}

/// In-memory provider. Every call is recorded so tests can assert on traffic.
#[derive(Default)]
pub struct FakeProvider {
    pub games: Vec<Game>,
    pub rosters: HashMap<i64, Vec<RosterEntry>>,
    pub splits: HashMap<(i64, i64), u32>,
    pub logs: HashMap<i64, Vec<u32>>,
    pub schedule_error: Option<String>,
    pub roster_error: Option<i64>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn with_game(mut self, game: Game) -> Self {
        self.games.push(game);
        self
    }

    pub fn with_roster(mut self, team_id: i64, roster: Vec<RosterEntry>) -> Self {
        self.rosters.insert(team_id, roster);
        self
    }

    pub fn with_split(mut self, batter_id: i64, pitcher_id: i64, home_runs: u32) -> Self {
        self.splits.insert((batter_id, pitcher_id), home_runs);
        self
    }

    pub fn with_log(mut self, batter_id: i64, home_runs: &[u32]) -> Self {
        self.logs.insert(batter_id, home_runs.to_vec());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl StatsProvider for FakeProvider {
    fn schedule(&self) -> Result<Vec<Game>> {
        self.record("schedule".to_owned());
        if let Some(message) = &self.schedule_error {
            bail!("{message}");
        }
        Ok(self.games.clone())
    }

    fn roster(&self, team_id: i64) -> Result<Vec<RosterEntry>> {
        self.record(format!("roster {team_id}"));
        if self.roster_error == Some(team_id) {
            bail!("Roster for team {team_id} was not a valid json");
        }
        Ok(self.rosters.get(&team_id).cloned().unwrap_or_default())
    }

    fn career_split(&self, batter_id: i64, pitcher_id: i64) -> Result<Option<CareerSplit>> {
        self.record(format!("split {batter_id} {pitcher_id}"));
        Ok(self.splits.get(&(batter_id, pitcher_id)).map(|&home_runs| CareerSplit { home_runs }))
    }

    fn game_log(&self, batter_id: i64, limit: usize) -> Result<Vec<GameLogEntry>> {
        self.record(format!("log {batter_id}"));
        let log = self.logs.get(&batter_id).cloned().unwrap_or_default();
        Ok(log.into_iter().take(limit).map(|home_runs| GameLogEntry { date: None, home_runs }).collect())
    }
}
