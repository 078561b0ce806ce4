use anyhow::{Context, Result};
use serde_json::Value;

const UNANNOUNCED_PITCHER: &str = "TBD";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbablePitcher {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Side {
    pub team_id: i64,
    pub team_name: String,
    pub probable_pitcher: Option<ProbablePitcher>,
}

impl Side {
    fn new(side: &Value, label: &str) -> Result<Self> {
        let team_id = side["team"]["id"].as_i64().with_context(|| format!("{label} Team ID didn't exist"))?;
        let team_name = side["team"]["name"].as_str().with_context(|| format!("{label} Team name didn't exist"))?.to_owned();
        // an unannounced starter either has no `probablePitcher` object or one without an id
        let probable_pitcher = side["probablePitcher"]["id"].as_i64().map(|id| ProbablePitcher {
            id,
            name: side["probablePitcher"]["fullName"].as_str().unwrap_or(UNANNOUNCED_PITCHER).to_owned(),
        });
        Ok(Self { team_id, team_name, probable_pitcher })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    pub id: i64,
    pub away: Side,
    pub home: Side,
}

/// One batting side facing the opposing probable starter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matchup {
    pub batting_team_id: i64,
    pub batting_team_name: String,
    pub pitcher_id: i64,
    pub pitcher_name: String,
}

impl Matchup {
    fn between(batting: &Side, pitching: &Side) -> Option<Self> {
        let pitcher = pitching.probable_pitcher.as_ref()?;
        Some(Self {
            batting_team_id: batting.team_id,
            batting_team_name: batting.team_name.clone(),
            pitcher_id: pitcher.id,
            pitcher_name: pitcher.name.clone(),
        })
    }
}

impl Game {
    pub fn new(game: &Value) -> Result<Self> {
        let id = game["gamePk"].as_i64().context("Game ID didn't exist")?;
        let away = Side::new(&game["teams"]["away"], "Away").with_context(|| format!("Malformed schedule entry for game {id}"))?;
        let home = Side::new(&game["teams"]["home"], "Home").with_context(|| format!("Malformed schedule entry for game {id}"))?;
        Ok(Self { id, away, home })
    }

    /// Away batters against the home starter, then home batters against the away starter.
    /// A side whose opposing starter hasn't been announced yields nothing.
    pub fn matchups(&self) -> impl Iterator<Item = Matchup> {
        [Matchup::between(&self.away, &self.home), Matchup::between(&self.home, &self.away)]
            .into_iter()
            .flatten()
    }
}

/// Flattens every `dates[].games[]` entry of a schedule response. A response
/// without any dates is an off day, not an error.
pub fn games(response: &Value) -> Result<Vec<Game>> {
    let Some(dates) = response["dates"].as_array() else { return Ok(Vec::new()) };
    let mut games = Vec::new();
    for date in dates {
        let Some(entries) = date["games"].as_array() else { continue };
        for game in entries {
            games.push(Game::new(game)?);
        }
    }
    Ok(games)
}
