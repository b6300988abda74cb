//! Journey map data model
//!
//! An ordered sequence of journey stages. Identity is positional: editing
//! addresses a stage by its index, and reordering swaps two indices. The
//! stage count never changes across edits or swaps.

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

/// Mood indicator for a journey stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feeling {
    Positive,
    Neutral,
    Negative,
}

impl Feeling {
    /// Single-character marker used in terminal output
    pub fn glyph(&self) -> &'static str {
        match self {
            Feeling::Positive => "+",
            Feeling::Neutral => "~",
            Feeling::Negative => "-",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Feeling::Positive => "positive",
            Feeling::Neutral => "neutral",
            Feeling::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Feeling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Feeling {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positive" => Ok(Feeling::Positive),
            "neutral" => Ok(Feeling::Neutral),
            "negative" => Ok(Feeling::Negative),
            other => Err(format!(
                "unknown feeling '{}' (expected positive, neutral, or negative)",
                other
            )),
        }
    }
}

/// One column of the journey map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub title: String,
    pub activities: Vec<String>,
    pub feeling: Feeling,
    pub opportunity: String,
}

/// Partial update for a single stage. A field left `None` keeps the
/// stage's current value.
#[derive(Debug, Clone, Default)]
pub struct StageEdit {
    pub title: Option<String>,
    pub activities: Option<Vec<String>>,
    pub feeling: Option<Feeling>,
    pub opportunity: Option<String>,
}

impl StageEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.activities.is_none()
            && self.feeling.is_none()
            && self.opportunity.is_none()
    }
}

/// Error type for journey map operations
#[derive(Debug)]
pub enum JourneyError {
    OutOfRange { index: usize, len: usize },
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for JourneyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JourneyError::OutOfRange { index, len } => {
                write!(f, "stage index {} is out of range ({} stages)", index, len)
            }
            JourneyError::Io(e) => write!(f, "IO error: {}", e),
            JourneyError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for JourneyError {}

impl From<std::io::Error> for JourneyError {
    fn from(e: std::io::Error) -> Self {
        JourneyError::Io(e)
    }
}

impl From<serde_json::Error> for JourneyError {
    fn from(e: serde_json::Error) -> Self {
        JourneyError::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, JourneyError>;

/// The journey map: an ordered sequence of stages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyMap {
    stages: Vec<Stage>,
}

impl JourneyMap {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// The built-in sample map used when no journey file is given
    pub fn sample() -> Self {
        Self {
            stages: vec![
                Stage {
                    title: "Discover".to_string(),
                    activities: vec![
                        "Sees a launch post".to_string(),
                        "Reads the landing page".to_string(),
                    ],
                    feeling: Feeling::Positive,
                    opportunity: "Sharpen the headline for first-time visitors".to_string(),
                },
                Stage {
                    title: "Evaluate".to_string(),
                    activities: vec![
                        "Compares plans".to_string(),
                        "Reads the docs".to_string(),
                    ],
                    feeling: Feeling::Neutral,
                    opportunity: "Surface pricing earlier in the docs".to_string(),
                },
                Stage {
                    title: "Sign up".to_string(),
                    activities: vec![
                        "Creates an account".to_string(),
                        "Verifies email".to_string(),
                    ],
                    feeling: Feeling::Neutral,
                    opportunity: "Cut the form down to two fields".to_string(),
                },
                Stage {
                    title: "First run".to_string(),
                    activities: vec![
                        "Follows the quickstart".to_string(),
                        "Hits a missing-dependency error".to_string(),
                    ],
                    feeling: Feeling::Negative,
                    opportunity: "Preflight check before the quickstart".to_string(),
                },
                Stage {
                    title: "Return".to_string(),
                    activities: vec![
                        "Invites a teammate".to_string(),
                        "Upgrades the plan".to_string(),
                    ],
                    feeling: Feeling::Positive,
                    opportunity: "Prompt invites after the first success".to_string(),
                },
            ],
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut json = self.to_json()?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn get(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.stages.len() {
            Ok(())
        } else {
            Err(JourneyError::OutOfRange {
                index,
                len: self.stages.len(),
            })
        }
    }

    /// Apply a partial update to the stage at `index`. Only the fields
    /// present in `edit` change; every other stage is untouched.
    pub fn edit(&mut self, index: usize, edit: StageEdit) -> Result<()> {
        self.check_index(index)?;
        let stage = &mut self.stages[index];
        if let Some(title) = edit.title {
            stage.title = title;
        }
        if let Some(activities) = edit.activities {
            stage.activities = activities;
        }
        if let Some(feeling) = edit.feeling {
            stage.feeling = feeling;
        }
        if let Some(opportunity) = edit.opportunity {
            stage.opportunity = opportunity;
        }
        Ok(())
    }

    /// Swap the stages at positions `a` and `b`. `a == b` is a no-op.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.stages.swap(a, b);
        Ok(())
    }

    /// Render the map for the terminal, one block per stage
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, stage) in self.stages.iter().enumerate() {
            let label = format!("{} {}", stage.feeling.glyph(), stage.feeling);
            let feeling = match stage.feeling {
                Feeling::Positive => label.green(),
                Feeling::Neutral => label.yellow(),
                Feeling::Negative => label.red(),
            };
            let _ = writeln!(
                out,
                "{} {}  [{}]",
                format!("{}.", i + 1).bold(),
                stage.title.cyan().bold(),
                feeling
            );
            for activity in &stage.activities {
                let _ = writeln!(out, "     - {}", activity);
            }
            if !stage.opportunity.is_empty() {
                let _ = writeln!(out, "     {} {}", "opportunity:".bold(), stage.opportunity);
            }
        }
        out
    }
}

impl Default for JourneyMap {
    fn default() -> Self {
        Self::sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stage(title: &str) -> Stage {
        Stage {
            title: title.to_string(),
            activities: vec![format!("{} activity", title)],
            feeling: Feeling::Neutral,
            opportunity: format!("{} opportunity", title),
        }
    }

    #[test]
    fn test_sample_map_shape() {
        let map = JourneyMap::sample();
        assert_eq!(map.len(), 5);
        assert!(!map.is_empty());
        assert_eq!(map.get(0).unwrap().title, "Discover");
        assert!(map.get(5).is_none());
    }

    #[test]
    fn test_edit_updates_only_given_fields() {
        let mut map = JourneyMap::sample();
        let before = map.get(1).unwrap().clone();

        map.edit(
            1,
            StageEdit {
                title: Some("Research".to_string()),
                ..StageEdit::default()
            },
        )
        .unwrap();

        let after = map.get(1).unwrap();
        assert_eq!(after.title, "Research");
        assert_eq!(after.activities, before.activities);
        assert_eq!(after.feeling, before.feeling);
        assert_eq!(after.opportunity, before.opportunity);
    }

    #[test]
    fn test_edit_leaves_other_stages_untouched() {
        let mut map = JourneyMap::sample();
        let others: Vec<Stage> = map
            .stages()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 2)
            .map(|(_, s)| s.clone())
            .collect();

        map.edit(
            2,
            StageEdit {
                feeling: Some(Feeling::Negative),
                opportunity: Some("Skip email verification".to_string()),
                ..StageEdit::default()
            },
        )
        .unwrap();

        let others_after: Vec<Stage> = map
            .stages()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 2)
            .map(|(_, s)| s.clone())
            .collect();
        assert_eq!(others, others_after);
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn test_edit_out_of_range() {
        let mut map = JourneyMap::sample();
        let err = map.edit(9, StageEdit::default()).unwrap_err();
        assert!(matches!(err, JourneyError::OutOfRange { index: 9, len: 5 }));
    }

    #[test]
    fn test_swap_exchanges_positions() {
        let mut map = JourneyMap::new(vec![stage("a"), stage("b"), stage("c")]);
        map.swap(0, 2).unwrap();
        assert_eq!(map.get(0).unwrap().title, "c");
        assert_eq!(map.get(1).unwrap().title, "b");
        assert_eq!(map.get(2).unwrap().title, "a");
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_swap_same_index_is_noop() {
        let mut map = JourneyMap::sample();
        let before = map.clone();
        map.swap(3, 3).unwrap();
        assert_eq!(map, before);
    }

    #[test]
    fn test_swap_out_of_range() {
        let mut map = JourneyMap::sample();
        assert!(map.swap(0, 5).is_err());
        assert!(map.swap(5, 0).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let map = JourneyMap::sample();
        let json = map.to_json().unwrap();
        let parsed = JourneyMap::from_json(&json).unwrap();
        assert_eq!(map, parsed);
    }

    #[test]
    fn test_feeling_from_str() {
        assert_eq!("positive".parse::<Feeling>().unwrap(), Feeling::Positive);
        assert_eq!("Neutral".parse::<Feeling>().unwrap(), Feeling::Neutral);
        assert_eq!("NEGATIVE".parse::<Feeling>().unwrap(), Feeling::Negative);
        assert!("meh".parse::<Feeling>().is_err());
    }

    #[test]
    fn test_render_contains_titles_and_feelings() {
        let map = JourneyMap::sample();
        let rendered = map.render();
        assert!(rendered.contains("Discover"));
        assert!(rendered.contains("First run"));
        assert!(rendered.contains("Preflight check before the quickstart"));
    }

    fn arb_stage() -> impl Strategy<Value = Stage> {
        (
            "[a-z]{1,12}",
            proptest::collection::vec("[a-z ]{0,20}", 0..4),
            prop_oneof![
                Just(Feeling::Positive),
                Just(Feeling::Neutral),
                Just(Feeling::Negative)
            ],
            "[a-z ]{0,20}",
        )
            .prop_map(|(title, activities, feeling, opportunity)| Stage {
                title,
                activities,
                feeling,
                opportunity,
            })
    }

    proptest! {
        #[test]
        fn prop_swap_preserves_every_field(
            stages in proptest::collection::vec(arb_stage(), 1..8),
            a in 0usize..8,
            b in 0usize..8,
        ) {
            let a = a % stages.len();
            let b = b % stages.len();
            let mut map = JourneyMap::new(stages.clone());
            map.swap(a, b).unwrap();

            prop_assert_eq!(map.len(), stages.len());
            prop_assert_eq!(map.get(a).unwrap(), &stages[b]);
            prop_assert_eq!(map.get(b).unwrap(), &stages[a]);
            for i in 0..stages.len() {
                if i != a && i != b {
                    prop_assert_eq!(map.get(i).unwrap(), &stages[i]);
                }
            }
        }

        #[test]
        fn prop_swap_twice_is_identity(
            stages in proptest::collection::vec(arb_stage(), 1..8),
            a in 0usize..8,
            b in 0usize..8,
        ) {
            let a = a % stages.len();
            let b = b % stages.len();
            let mut map = JourneyMap::new(stages.clone());
            map.swap(a, b).unwrap();
            map.swap(a, b).unwrap();
            prop_assert_eq!(map.stages(), stages.as_slice());
        }
    }
}
