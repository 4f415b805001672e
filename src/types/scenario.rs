//! Scenario shape emitted by the external optimizer
//!
//! Every field the optimizer may leave out has a serde default, so a partially
//! populated scenario still deserializes.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One room visit in an optimizer scenario
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAssignment {
    #[serde(default)]
    pub room_name: String,
    /// `HH:MM` or `YYYY-MM-DD HH:MM` as written by the optimizer
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub member_count: Option<u32>,
    #[serde(default)]
    pub travel_time_from_previous: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ScenarioAssignment {
    pub fn travel_minutes(&self) -> u32 {
        self.travel_time_from_previous.unwrap_or(0)
    }

    /// Declared member count, or the member list length when absent
    pub fn effective_member_count(&self) -> usize {
        self.member_count
            .map(|c| c as usize)
            .unwrap_or(self.members.len())
    }

    pub fn notes(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}

/// Candidate schedule as produced by the optimizer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub scenario_id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// team label -> assignments in visiting order
    #[serde(default)]
    pub teams: BTreeMap<String, Vec<ScenarioAssignment>>,
    #[serde(default)]
    pub pros: String,
    #[serde(default)]
    pub cons: String,
}

impl Scenario {
    /// Team labels ordered numerically where possible ("2" before "10")
    pub fn sorted_team_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.teams.keys().map(String::as_str).collect();
        ids.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        });
        ids
    }
}

#[derive(Debug, Deserialize)]
struct ScenarioEnvelope {
    #[serde(default)]
    scenarios: Vec<Scenario>,
}

/// Extract the scenarios from an optimizer reply.
///
/// The reply may wrap its JSON in a ```json fenced block (or a bare ``` block);
/// the first such block is used, otherwise the whole text.
pub fn parse_scenarios(response_text: &str) -> Result<Vec<Scenario>> {
    let text = response_text.trim();

    let body = if let Some((_, rest)) = text.split_once("```json") {
        rest.split("```").next().unwrap_or(rest)
    } else if let Some((_, rest)) = text.split_once("```") {
        rest.split("```").next().unwrap_or(rest)
    } else {
        text
    };

    let envelope: ScenarioEnvelope = serde_json::from_str(body.trim())
        .context("Failed to parse optimizer response as scenario JSON")?;

    Ok(envelope.scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = r#"Here you go:
```json
{
  "scenarios": [
    {
      "scenario_id": 1,
      "name": "팀 균형 우선",
      "teams": {
        "1": [
          {
            "room_name": "미스터리 하우스",
            "start_time": "14:00",
            "end_time": "16:00",
            "members": ["홍길동", "김철수"],
            "member_count": 2
          }
        ],
        "2": []
      }
    }
  ]
}
```"#;

    #[test]
    fn test_parse_scenarios_from_fenced_block() {
        let scenarios = parse_scenarios(REPLY).unwrap();
        assert_eq!(scenarios.len(), 1);

        let scenario = &scenarios[0];
        assert_eq!(scenario.scenario_id, 1);
        assert_eq!(scenario.teams.len(), 2);
        assert_eq!(scenario.teams["1"][0].members, vec!["홍길동", "김철수"]);
        assert!(scenario.pros.is_empty());
    }

    #[test]
    fn test_parse_scenarios_plain_json() {
        let scenarios = parse_scenarios(r#"{"scenarios": []}"#).unwrap();
        assert!(scenarios.is_empty());
    }

    #[test]
    fn test_parse_scenarios_rejects_garbage() {
        let err = parse_scenarios("no json here").unwrap_err();
        assert!(err.to_string().contains("scenario JSON"));
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let assignment: ScenarioAssignment =
            serde_json::from_str(r#"{"room_name": "방", "members": ["a", "b", "c"]}"#).unwrap();

        assert_eq!(assignment.travel_minutes(), 0);
        assert_eq!(assignment.effective_member_count(), 3);
        assert_eq!(assignment.notes(), "");
    }

    #[test]
    fn test_sorted_team_ids_numeric_first() {
        let json = r#"{"teams": {"10": [], "2": [], "b": [], "1": []}}"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.sorted_team_ids(), vec!["1", "2", "10", "b"]);
    }
}
