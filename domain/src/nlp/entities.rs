//! Named entities found in a message.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    /// Tag such as `PER`, `ORG`, `LOC`, `MISC`.
    pub label: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityAnalysis {
    pub entities: Vec<Entity>,
    pub tokens: Vec<String>,
}

impl EntityAnalysis {
    pub fn labels(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.label.as_str()).collect()
    }

    /// Entities that may name a performer (people and organisations).
    pub fn performers(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|e| matches!(e.label.as_str(), "PER" | "PERSON" | "ORG"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performers_filter() {
        let analysis = EntityAnalysis {
            entities: vec![
                Entity {
                    text: "Drake".to_string(),
                    label: "PER".to_string(),
                    confidence: 0.99,
                },
                Entity {
                    text: "Toronto".to_string(),
                    label: "LOC".to_string(),
                    confidence: 0.97,
                },
            ],
            tokens: vec![],
        };
        let names: Vec<_> = analysis.performers().map(|e| e.text.as_str()).collect();
        assert_eq!(names, vec!["Drake"]);
        assert_eq!(analysis.labels(), vec!["PER", "LOC"]);
    }
}
