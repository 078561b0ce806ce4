//! Batter-vs-pitcher home run scan over one day's schedule.

use std::sync::Arc;

use fxhash::FxHashSet;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::ScanConfig;
use crate::util::schedule::Matchup;
use crate::util::stat::HomeRunPace;
use crate::util::statsapi::StatsProvider;

pub const UNAVAILABLE_MESSAGE: &str = "The statsapi wrapper could not be loaded on the server.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignificantMatchup {
    pub player_name: String,
    pub player_id: i64,
    pub team: String,
    pub vs_pitcher: String,
    #[serde(rename = "careerHRs")]
    pub career_hrs: u32,
    pub last5: u32,
    pub last10: u32,
    pub last20: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("{}", UNAVAILABLE_MESSAGE)]
    Unavailable,
    #[error("An error occurred while scanning matchups: {0:#}")]
    Provider(#[from] anyhow::Error),
}

/// What a failed scan looks like on the wire: `[{"error": "..."}]`.
#[derive(Debug, Serialize)]
pub struct ErrorRecord {
    pub error: String,
}

impl ScanError {
    pub fn to_records(&self) -> [ErrorRecord; 1] {
        [ErrorRecord { error: self.to_string() }]
    }
}

#[derive(Clone)]
pub struct Scanner {
    provider: Option<Arc<dyn StatsProvider>>,
    config: ScanConfig,
}

impl Scanner {
    pub fn new(provider: Arc<dyn StatsProvider>, config: ScanConfig) -> Self {
        Self { provider: Some(provider), config }
    }

    /// A scanner whose provider failed to load. Every scan fails without
    /// touching the network.
    pub fn unavailable(config: ScanConfig) -> Self {
        Self { provider: None, config }
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    pub fn scan(&self) -> Result<Vec<SignificantMatchup>, ScanError> {
        let Some(provider) = self.provider.as_deref() else {
            return Err(ScanError::Unavailable);
        };
        match self.scan_with(provider) {
            Ok(found) => {
                info!(count = found.len(), "Finished processing matchups");
                Ok(found)
            }
            Err(e) => {
                error!(error = %format!("{e:#}"), "Matchup scan failed");
                Err(ScanError::Provider(e))
            }
        }
    }

    fn scan_with(&self, provider: &dyn StatsProvider) -> anyhow::Result<Vec<SignificantMatchup>> {
        let games = provider.schedule()?;
        if games.is_empty() {
            info!("No games scheduled for today");
            return Ok(Vec::new());
        }
        info!(games = games.len(), "Processing matchups");

        let mut seen = FxHashSet::default();
        let mut found = Vec::new();
        for game in &games {
            for matchup in game.matchups() {
                debug!(game = game.id, team = %matchup.batting_team_name, pitcher = %matchup.pitcher_name, "Checking matchup");
                self.scan_matchup(provider, &matchup, &mut seen, &mut found)?;
            }
        }
        Ok(found)
    }

    fn scan_matchup(
        &self,
        provider: &dyn StatsProvider,
        matchup: &Matchup,
        seen: &mut FxHashSet<i64>,
        found: &mut Vec<SignificantMatchup>,
    ) -> anyhow::Result<()> {
        for batter in provider.roster(matchup.batting_team_id)? {
            if seen.contains(&batter.id) || (self.config.exclude_pitchers && batter.is_pitcher()) {
                continue;
            }
            let Some(split) = provider.career_split(batter.id, matchup.pitcher_id)? else { continue };
            if !split.is_significant() {
                continue;
            }
            let Some(name) = batter.name else {
                debug!(batter = batter.id, "Skipping significant matchup for player without a name");
                continue;
            };
            info!(batter = %name, pitcher = %matchup.pitcher_name, career_hrs = split.home_runs, "Found significant matchup");
            let pace = HomeRunPace::from_log(&provider.game_log(batter.id, self.config.game_log_limit)?);
            found.push(SignificantMatchup {
                player_name: name,
                player_id: batter.id,
                team: matchup.batting_team_name.clone(),
                vs_pitcher: matchup.pitcher_name.clone(),
                career_hrs: split.home_runs,
                last5: pace.last5,
                last10: pace.last10,
                last20: pace.last20,
            });
            seen.insert(batter.id);
        }
        Ok(())
    }
}
