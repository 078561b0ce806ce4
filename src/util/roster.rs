use anyhow::{Context, Result};
use serde_json::Value;

const PITCHER_POSITION_CODE: &str = "1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: i64,
    /// Only read when a record is emitted for this player.
    pub name: Option<String>,
    pub position_code: Option<String>,
}

impl RosterEntry {
    pub fn new(player: &Value) -> Result<Self> {
        let person = &player["person"];
        let id = person["id"].as_i64().context("Roster player's ID didn't exist")?;
        let name = person["fullName"].as_str().map(str::to_owned);
        let position_code = player["position"]["code"].as_str().map(str::to_owned);
        Ok(Self { id, name, position_code })
    }

    pub fn is_pitcher(&self) -> bool {
        self.position_code.as_deref() == Some(PITCHER_POSITION_CODE)
    }
}

/// Decodes a `teams/{id}/roster` response. A response with no `roster` array
/// is an empty roster.
pub fn roster(response: &Value) -> Result<Vec<RosterEntry>> {
    let Some(players) = response["roster"].as_array() else { return Ok(Vec::new()) };
    players.iter().map(RosterEntry::new).collect()
}
