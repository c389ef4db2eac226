use serde::{Deserialize, Serialize};

use pillage_types::{
    common::{GameDuration, ResourceGroup},
    research::ResearchName,
};

/// A one-time unlock carried out in a research building.
///
/// Entries of `completedResearches` often carry the name only, so every other
/// field falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Research {
    pub research_name: ResearchName,
    #[serde(default)]
    pub research_level: u32,
    #[serde(default)]
    pub base_seconds_to_research: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds_to_research: Option<GameDuration>,
    #[serde(default)]
    pub building_level_requirement: u32,
    #[serde(default)]
    pub resources_required_to_research: ResourceGroup,
}

impl Research {
    /// How long the research runs once started.
    pub fn duration(&self) -> GameDuration {
        self.seconds_to_research
            .unwrap_or_else(|| GameDuration::from_secs(self.base_seconds_to_research))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_research_with_name_only() {
        let research: Research = serde_json::from_str(r#"{"researchName": "Spear"}"#).unwrap();
        assert_eq!(research.research_name, ResearchName::Spear);
        assert_eq!(research.building_level_requirement, 0);
        assert_eq!(research.duration(), GameDuration::default());
    }

    #[test]
    fn test_duration_prefers_formatted_seconds() {
        let research: Research = serde_json::from_str(
            r#"{
                "researchName": "Axe",
                "researchLevel": 0,
                "baseSecondsToResearch": 10,
                "secondsToResearch": "00:00:08",
                "buildingLevelRequirement": 3,
                "resourcesRequiredToResearch": { "Wood": 100, "Stone": 50 }
            }"#,
        )
        .unwrap();

        assert_eq!(research.duration().as_secs(), 8);
        assert_eq!(research.resources_required_to_research.stone, 50);

        let fallback = Research {
            seconds_to_research: None,
            ..research
        };
        assert_eq!(fallback.duration().as_secs(), 10);
    }
}
