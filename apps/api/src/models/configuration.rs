use serde::{Deserialize, Serialize};

use crate::models::facts::{
    merge_customer_facts, merge_restaurant_facts, merge_system_facts, CustomerFacts,
    CustomerFactsPatch, ResponseLength, RestaurantFacts, RestaurantFactsPatch, SystemFacts,
    SystemFactsPatch,
};
use crate::prompt::prompts::DEFAULT_PROMPT_TEMPLATE;

/// The three fact groups that make up one configuration snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationFacts {
    #[serde(default)]
    pub restaurant_facts: RestaurantFacts,
    #[serde(default)]
    pub customer_facts: CustomerFacts,
    #[serde(default)]
    pub system_facts: SystemFacts,
}

/// A versioned configuration snapshot. `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub id: u64,
    #[serde(flatten)]
    pub facts: ConfigurationFacts,
}

/// Partial update applied in place by `ConfigurationStore::update`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigurationPatch {
    pub restaurant_facts: Option<RestaurantFactsPatch>,
    pub customer_facts: Option<CustomerFactsPatch>,
    pub system_facts: Option<SystemFactsPatch>,
}

impl ConfigurationFacts {
    /// Returns a copy with `patch` merged group by group.
    pub fn apply(&self, patch: &ConfigurationPatch) -> Self {
        Self {
            restaurant_facts: merge_restaurant_facts(
                &self.restaurant_facts,
                patch.restaurant_facts.as_ref(),
            ),
            customer_facts: merge_customer_facts(
                &self.customer_facts,
                patch.customer_facts.as_ref(),
            ),
            system_facts: merge_system_facts(&self.system_facts, patch.system_facts.as_ref()),
        }
    }

    /// Sample triple seeded into an empty configuration store.
    pub fn sample() -> Self {
        Self {
            restaurant_facts: RestaurantFacts {
                name: "Sample Bistro".to_string(),
                address: "123 Main Street, Springfield".to_string(),
                url: "https://sample-bistro.example.com".to_string(),
                restaurant_type: "Casual Dining".to_string(),
                brand_tone: "Warm and friendly".to_string(),
                todo_facts: vec![
                    "Seasonal menu changes every quarter".to_string(),
                    "Free dessert on your next visit".to_string(),
                ],
            },
            customer_facts: CustomerFacts {
                name: "John Doe".to_string(),
                gender: "Male".to_string(),
                history: "Regular customer, visits twice a month".to_string(),
                meal: "Dinner".to_string(),
                todo_facts: vec!["Prefers window seating".to_string()],
            },
            system_facts: SystemFacts {
                prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
                response_length: ResponseLength::Medium,
                include_apology: true,
                include_marketing: false,
                multiple_responses: false,
            },
        }
    }
}
