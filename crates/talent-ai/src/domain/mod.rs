use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes a 0-100 score, clamping out-of-range values instead of rejecting them.
fn clamped_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.clamp(0.0, 100.0).round() as u8)
}

/// A member of the workforce directory. Scores are bounded 0-100; the skill
/// list carries no uniqueness guarantee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: String,
    pub department: String,
    pub skills: Vec<String>,
    pub achievements: Vec<String>,
    #[serde(deserialize_with = "clamped_score")]
    pub performance_score: u8,
    #[serde(deserialize_with = "clamped_score")]
    pub potential_score: u8,
    #[serde(deserialize_with = "clamped_score")]
    pub engagement_score: u8,
    #[serde(deserialize_with = "clamped_score")]
    pub attrition_risk: u8,
    pub career_goals: String,
    pub development_plan: Vec<String>,
    pub photo_url: String,
    pub email: String,
    pub years_at_company: u8,
}

/// A key role considered for succession planning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub department: String,
    pub salary_range: String,
    pub experience_level: String,
}

/// A leadership-development catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingProgram {
    pub id: String,
    pub name: String,
    pub description: String,
    pub target_audience: Vec<String>,
    pub duration: String,
    pub skills_gained: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// One row of an AI-produced skill-gap analysis. Levels are the 1-5 scale the
/// prompt asks for; the gap arithmetic is taken at face value (not re-checked).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    pub skill: String,
    pub current_level: i32,
    pub desired_level: i32,
    pub gap: i32,
}

/// Demand/supply outlook for one planning period. The gap is derived and kept
/// in sync whenever demand or supply changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    period: String,
    demand: u32,
    supply: u32,
    gap: i64,
}

impl ForecastPeriod {
    pub fn new(period: impl Into<String>, demand: u32, supply: u32) -> Self {
        let mut entry = Self {
            period: period.into(),
            demand,
            supply,
            gap: 0,
        };
        entry.recompute_gap();
        entry
    }

    pub fn period(&self) -> &str {
        &self.period
    }

    pub fn demand(&self) -> u32 {
        self.demand
    }

    pub fn supply(&self) -> u32 {
        self.supply
    }

    pub fn gap(&self) -> i64 {
        self.gap
    }

    pub fn set_demand(&mut self, demand: u32) {
        self.demand = demand;
        self.recompute_gap();
    }

    pub fn set_supply(&mut self, supply: u32) {
        self.supply = supply;
        self.recompute_gap();
    }

    fn recompute_gap(&mut self) {
        self.gap = i64::from(self.demand) - i64::from(self.supply);
    }
}

impl<'de> Deserialize<'de> for ForecastPeriod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Any gap supplied on the wire is discarded and re-derived.
        #[derive(Deserialize)]
        struct Wire {
            period: String,
            demand: u32,
            supply: u32,
        }

        let wire = Wire::deserialize(deserializer)?;
        Ok(ForecastPeriod::new(wire.period, wire.demand, wire.supply))
    }
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
    System,
}

/// A single entry in a chat transcript. The text of a bot message grows while
/// a streamed reply accumulates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_outside_bounds_are_clamped_on_deserialize() {
        let raw = serde_json::json!({
            "id": "emp-1-0",
            "name": "Alice Smith",
            "role": "Software Engineer",
            "department": "Engineering",
            "skills": ["Rust"],
            "achievements": [],
            "performanceScore": 140,
            "potentialScore": -3,
            "engagementScore": 55,
            "attritionRisk": 12,
            "careerGoals": "Become a team lead",
            "developmentPlan": [],
            "photoUrl": "",
            "email": "alice.smith@example.com",
            "yearsAtCompany": 4
        });

        let employee: Employee = serde_json::from_value(raw).expect("employee deserializes");
        assert_eq!(employee.performance_score, 100);
        assert_eq!(employee.potential_score, 0);
        assert_eq!(employee.engagement_score, 55);
    }

    #[test]
    fn forecast_gap_tracks_demand_and_supply() {
        let mut period = ForecastPeriod::new("Q1 2025", 120, 115);
        assert_eq!(period.gap(), 5);

        period.set_supply(130);
        assert_eq!(period.gap(), -10);

        period.set_demand(131);
        assert_eq!(period.gap(), 1);
    }

    #[test]
    fn forecast_deserialization_ignores_supplied_gap() {
        let entry: ForecastPeriod =
            serde_json::from_str(r#"{"period":"Q2 2025","demand":125,"supply":118,"gap":99}"#)
                .expect("forecast entry deserializes");
        assert_eq!(entry.gap(), 7);
    }

    #[test]
    fn sender_uses_lowercase_wire_names() {
        assert_eq!(
            serde_json::to_string(&Sender::System).expect("serializes"),
            "\"system\""
        );
    }
}
