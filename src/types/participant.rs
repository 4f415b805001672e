use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::error::ModelError;

/// Horror-theme position of a participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HorrorRole {
    /// 탱커 - keeps the group moving in horror rooms
    #[serde(rename = "탱커")]
    Tank,
    /// 평민
    #[serde(rename = "평민")]
    Civilian,
    /// 쫄 - should be teamed with a tank
    #[serde(rename = "쫄")]
    Scaredy,
}

impl HorrorRole {
    pub const ALL: [HorrorRole; 3] = [HorrorRole::Tank, HorrorRole::Civilian, HorrorRole::Scaredy];

    pub fn label(&self) -> &'static str {
        match self {
            HorrorRole::Tank => "탱커",
            HorrorRole::Civilian => "평민",
            HorrorRole::Scaredy => "쫄",
        }
    }

    pub fn is_protective(&self) -> bool {
        matches!(self, HorrorRole::Tank)
    }
}

impl fmt::Display for HorrorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HorrorRole {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        HorrorRole::ALL
            .into_iter()
            .find(|role| role.label() == s)
            .ok_or_else(|| ModelError::UnknownRole(s.to_string()))
    }
}

/// Meetup participant with an inclusive availability window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    name: String,
    available_from: NaiveDateTime,
    available_until: NaiveDateTime,
    role: HorrorRole,
}

impl Participant {
    pub fn new(
        name: impl Into<String>,
        available_from: NaiveDateTime,
        available_until: NaiveDateTime,
        role: HorrorRole,
    ) -> Result<Self, ModelError> {
        if available_until < available_from {
            return Err(ModelError::AvailabilityReversed {
                from: available_from,
                until: available_until,
            });
        }

        Ok(Self {
            name: name.into(),
            available_from,
            available_until,
            role,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn available_from(&self) -> NaiveDateTime {
        self.available_from
    }

    pub fn available_until(&self) -> NaiveDateTime {
        self.available_until
    }

    pub fn role(&self) -> HorrorRole {
        self.role
    }
}

/// Roster grouped by role, one line per role, for the optimizer prompt
pub fn roster_text(participants: &[Participant]) -> String {
    let mut lines = vec!["참여자 정보:".to_string()];
    for role in HorrorRole::ALL {
        let names: Vec<&str> = participants
            .iter()
            .filter(|p| p.role == role)
            .map(|p| p.name.as_str())
            .collect();
        lines.push(format!("- {} ({}명): {}", role, names.len(), names.join(", ")));
    }
    lines.join("\n")
}
