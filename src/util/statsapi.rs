use core::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde_json::Value;
use tracing::debug;

use crate::config::StatsApiConfig;
use crate::util::roster::{self, RosterEntry};
use crate::util::schedule::{self, Game};
use crate::util::stat::{self, CareerSplit, GameLogEntry};

/// The queries the matchup scan needs from a stats provider.
pub trait StatsProvider: Send + Sync {
    fn schedule(&self) -> Result<Vec<Game>>;

    fn roster(&self, team_id: i64) -> Result<Vec<RosterEntry>>;

    /// `Ok(None)` when the batter has no recorded plate appearances against the pitcher.
    fn career_split(&self, batter_id: i64, pitcher_id: i64) -> Result<Option<CareerSplit>>;

    fn game_log(&self, batter_id: i64, limit: usize) -> Result<Vec<GameLogEntry>>;
}

/// Blocking client for `statsapi.mlb.com`.
pub struct StatsApi {
    agent: ureq::Agent,
    base_url: String,
    sport_id: u32,
    timezone: Tz,
    date: Option<NaiveDate>,
}

impl StatsApi {
    pub fn new(config: &StatsApiConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            bail!("Stats API base url '{base_url}' is not an http(s) url");
        }
        let timezone = Tz::from_str(&config.timezone).map_err(|e| anyhow!("Invalid schedule time zone '{}': {e}", config.timezone))?;
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build();
        Ok(Self {
            agent,
            base_url: base_url.to_owned(),
            sport_id: config.sport_id,
            timezone,
            date: None,
        })
    }

    /// Pins the schedule to `date` instead of today.
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Utc::now().with_timezone(&self.timezone).date_naive())
    }

    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}/{path}", self.base_url);
        debug!(%url, ?query, "Stats API request");
        let mut request = self.agent.get(&url);
        for (key, value) in query {
            request = request.query(key, value);
        }
        request
            .call()
            .map_err(|e| anyhow!("Request to {url} failed: {e}"))?
            .into_json::<Value>()
            .with_context(|| format!("Response from {url} was not a valid json"))
    }

    fn person(&self, person_id: i64, hydrate: &str) -> Result<Value> {
        self.get(&format!("people/{person_id}"), &[("hydrate", hydrate)])
    }

    /// Fetches the schedule once and reports how many games it lists.
    pub fn ping(&self) -> Result<usize> {
        Ok(self.schedule()?.len())
    }
}

impl StatsProvider for StatsApi {
    fn schedule(&self) -> Result<Vec<Game>> {
        let date = self.date().format("%m/%d/%Y").to_string();
        let sport_id = self.sport_id.to_string();
        let response = self.get(
            "schedule/games/",
            &[("sportId", sport_id.as_str()), ("date", date.as_str()), ("hydrate", "probablePitcher")],
        )?;
        schedule::games(&response).with_context(|| format!("Could not read schedule for {date}"))
    }

    fn roster(&self, team_id: i64) -> Result<Vec<RosterEntry>> {
        let response = self.get(&format!("teams/{team_id}/roster"), &[])?;
        roster::roster(&response).with_context(|| format!("Could not read roster for team {team_id}"))
    }

    fn career_split(&self, batter_id: i64, pitcher_id: i64) -> Result<Option<CareerSplit>> {
        let response = self.person(
            batter_id,
            &format!("stats(group=[hitting],type=[vsPlayer],opposingPlayerId={pitcher_id})"),
        )?;
        Ok(stat::career_split(&response))
    }

    fn game_log(&self, batter_id: i64, limit: usize) -> Result<Vec<GameLogEntry>> {
        let response = self.person(batter_id, &format!("stats(group=[hitting],type=[gameLog],limit={limit})"))?;
        Ok(stat::game_log(&response))
    }
}
