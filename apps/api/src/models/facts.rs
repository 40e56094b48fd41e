use serde::{Deserialize, Serialize};

/// Facts about the restaurant replying to the feedback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantFacts {
    pub name: String,
    pub address: String,
    pub url: String,
    /// Free-form cuisine / venue type, e.g. "Italian" or "Fine Dining".
    #[serde(rename = "type")]
    pub restaurant_type: String,
    pub brand_tone: String,
    pub todo_facts: Vec<String>,
}

/// Facts about the customer who left the feedback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerFacts {
    pub name: String,
    pub gender: String,
    pub history: String,
    pub meal: String,
    pub todo_facts: Vec<String>,
}

/// Target verbosity of the generated reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ResponseLength {
    Short,
    #[default]
    Medium,
    Detailed,
}

impl ResponseLength {
    /// Parses a length label. Unrecognized labels fall back to `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "short" => ResponseLength::Short,
            "detailed" => ResponseLength::Detailed,
            _ => ResponseLength::Medium,
        }
    }
}

impl From<String> for ResponseLength {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

/// Prompt-level settings. The boolean flags are stored but do not alter rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemFacts {
    pub prompt_template: String,
    pub response_length: ResponseLength,
    pub include_apology: bool,
    pub include_marketing: bool,
    pub multiple_responses: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Partial updates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RestaurantFactsPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub restaurant_type: Option<String>,
    pub brand_tone: Option<String>,
    pub todo_facts: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomerFactsPatch {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub history: Option<String>,
    pub meal: Option<String>,
    pub todo_facts: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SystemFactsPatch {
    pub prompt_template: Option<String>,
    pub response_length: Option<ResponseLength>,
    pub include_apology: Option<bool>,
    pub include_marketing: Option<bool>,
    pub multiple_responses: Option<bool>,
}

/// Applies `patch` onto `existing`; absent patch fields keep their current value.
pub fn merge_restaurant_facts(
    existing: &RestaurantFacts,
    patch: Option<&RestaurantFactsPatch>,
) -> RestaurantFacts {
    let Some(patch) = patch else {
        return existing.clone();
    };
    RestaurantFacts {
        name: patch.name.clone().unwrap_or_else(|| existing.name.clone()),
        address: patch
            .address
            .clone()
            .unwrap_or_else(|| existing.address.clone()),
        url: patch.url.clone().unwrap_or_else(|| existing.url.clone()),
        restaurant_type: patch
            .restaurant_type
            .clone()
            .unwrap_or_else(|| existing.restaurant_type.clone()),
        brand_tone: patch
            .brand_tone
            .clone()
            .unwrap_or_else(|| existing.brand_tone.clone()),
        todo_facts: patch
            .todo_facts
            .clone()
            .unwrap_or_else(|| existing.todo_facts.clone()),
    }
}

pub fn merge_customer_facts(
    existing: &CustomerFacts,
    patch: Option<&CustomerFactsPatch>,
) -> CustomerFacts {
    let Some(patch) = patch else {
        return existing.clone();
    };
    CustomerFacts {
        name: patch.name.clone().unwrap_or_else(|| existing.name.clone()),
        gender: patch
            .gender
            .clone()
            .unwrap_or_else(|| existing.gender.clone()),
        history: patch
            .history
            .clone()
            .unwrap_or_else(|| existing.history.clone()),
        meal: patch.meal.clone().unwrap_or_else(|| existing.meal.clone()),
        todo_facts: patch
            .todo_facts
            .clone()
            .unwrap_or_else(|| existing.todo_facts.clone()),
    }
}

pub fn merge_system_facts(existing: &SystemFacts, patch: Option<&SystemFactsPatch>) -> SystemFacts {
    let Some(patch) = patch else {
        return existing.clone();
    };
    SystemFacts {
        prompt_template: patch
            .prompt_template
            .clone()
            .unwrap_or_else(|| existing.prompt_template.clone()),
        response_length: patch.response_length.unwrap_or(existing.response_length),
        include_apology: patch.include_apology.unwrap_or(existing.include_apology),
        include_marketing: patch.include_marketing.unwrap_or(existing.include_marketing),
        multiple_responses: patch
            .multiple_responses
            .unwrap_or(existing.multiple_responses),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_length_parses_known_labels() {
        assert_eq!(ResponseLength::from_label("short"), ResponseLength::Short);
        assert_eq!(ResponseLength::from_label("Detailed"), ResponseLength::Detailed);
        assert_eq!(ResponseLength::from_label("medium"), ResponseLength::Medium);
    }

    #[test]
    fn test_unrecognized_response_length_falls_back_to_medium() {
        assert_eq!(ResponseLength::from_label("epic"), ResponseLength::Medium);
        let parsed: ResponseLength = serde_json::from_str("\"novella\"").unwrap();
        assert_eq!(parsed, ResponseLength::Medium);
    }

    #[test]
    fn test_response_length_serializes_lowercase() {
        let json = serde_json::to_string(&ResponseLength::Detailed).unwrap();
        assert_eq!(json, "\"detailed\"");
    }

    #[test]
    fn test_restaurant_type_uses_type_key() {
        let facts: RestaurantFacts = serde_json::from_value(serde_json::json!({
            "name": "Sample Bistro",
            "type": "French"
        }))
        .unwrap();
        assert_eq!(facts.restaurant_type, "French");
        assert!(facts.todo_facts.is_empty(), "missing fields default to empty");
    }

    #[test]
    fn test_merge_restaurant_facts_keeps_unspecified_fields() {
        let existing = RestaurantFacts {
            name: "Sample Bistro".to_string(),
            address: "1 Main St".to_string(),
            todo_facts: vec!["Open late".to_string()],
            ..Default::default()
        };
        let patch = RestaurantFactsPatch {
            address: Some("2 High St".to_string()),
            ..Default::default()
        };
        let merged = merge_restaurant_facts(&existing, Some(&patch));
        assert_eq!(merged.name, "Sample Bistro");
        assert_eq!(merged.address, "2 High St");
        assert_eq!(merged.todo_facts, vec!["Open late".to_string()]);
    }

    #[test]
    fn test_merge_without_patch_is_identity() {
        let existing = CustomerFacts {
            name: "John Doe".to_string(),
            ..Default::default()
        };
        assert_eq!(merge_customer_facts(&existing, None), existing);
    }

    #[test]
    fn test_merge_system_facts_overrides_flags() {
        let existing = SystemFacts::default();
        let patch = SystemFactsPatch {
            response_length: Some(ResponseLength::Short),
            include_apology: Some(true),
            ..Default::default()
        };
        let merged = merge_system_facts(&existing, Some(&patch));
        assert_eq!(merged.response_length, ResponseLength::Short);
        assert!(merged.include_apology);
        assert!(!merged.include_marketing);
    }
}
