//! Template rendering — substitutes the fixed placeholder set with fact values.
//!
//! Substitution is a single left-to-right pass over the template, so text
//! inserted for one placeholder is never re-scanned for another. Braced text
//! that is not a recognized placeholder is copied through untouched.

use std::borrow::Cow;

use crate::models::facts::{CustomerFacts, RestaurantFacts};

/// Every placeholder the renderer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    RestaurantName,
    Address,
    RestaurantType,
    BrandTone,
    CustomerName,
    Gender,
    CustomerHistory,
    MealType,
    FeedbackText,
    RestaurantTodoFacts,
    CustomerTodoFacts,
}

impl Placeholder {
    pub const ALL: [Placeholder; 11] = [
        Placeholder::RestaurantName,
        Placeholder::Address,
        Placeholder::RestaurantType,
        Placeholder::BrandTone,
        Placeholder::CustomerName,
        Placeholder::Gender,
        Placeholder::CustomerHistory,
        Placeholder::MealType,
        Placeholder::FeedbackText,
        Placeholder::RestaurantTodoFacts,
        Placeholder::CustomerTodoFacts,
    ];

    /// The literal token as written in templates.
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::RestaurantName => "{Restaurant Name}",
            Placeholder::Address => "{Address}",
            Placeholder::RestaurantType => "{Restaurant Type}",
            Placeholder::BrandTone => "{Brand tone}",
            Placeholder::CustomerName => "{Customer Name}",
            Placeholder::Gender => "{Gender}",
            Placeholder::CustomerHistory => "{Customer History}",
            Placeholder::MealType => "{Meal type}",
            Placeholder::FeedbackText => "{Customer Feedback Text}",
            Placeholder::RestaurantTodoFacts => "{Restaurant Todo List Facts}",
            Placeholder::CustomerTodoFacts => "{Customer Todo List Facts}",
        }
    }
}

/// The values a template is rendered against.
#[derive(Debug, Clone, Copy)]
pub struct PromptValues<'a> {
    pub restaurant: &'a RestaurantFacts,
    pub customer: &'a CustomerFacts,
    pub feedback_text: &'a str,
}

impl<'a> PromptValues<'a> {
    fn resolve(&self, placeholder: Placeholder) -> Cow<'a, str> {
        match placeholder {
            Placeholder::RestaurantName => Cow::Borrowed(&self.restaurant.name),
            Placeholder::Address => Cow::Borrowed(&self.restaurant.address),
            Placeholder::RestaurantType => Cow::Borrowed(&self.restaurant.restaurant_type),
            Placeholder::BrandTone => Cow::Borrowed(&self.restaurant.brand_tone),
            Placeholder::CustomerName => Cow::Borrowed(&self.customer.name),
            Placeholder::Gender => Cow::Borrowed(&self.customer.gender),
            Placeholder::CustomerHistory => Cow::Borrowed(&self.customer.history),
            Placeholder::MealType => Cow::Borrowed(&self.customer.meal),
            Placeholder::FeedbackText => Cow::Borrowed(self.feedback_text),
            Placeholder::RestaurantTodoFacts => Cow::Owned(self.restaurant.todo_facts.join(", ")),
            Placeholder::CustomerTodoFacts => Cow::Owned(self.customer.todo_facts.join(", ")),
        }
    }
}

/// Replaces every occurrence of every recognized placeholder in `template`.
///
/// Never fails: missing values render as empty strings and unknown
/// `{...}` sequences are left as-is.
pub fn render_template(template: &str, values: &PromptValues<'_>) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        rendered.push_str(&rest[..start]);
        let tail = &rest[start..];

        match Placeholder::ALL
            .iter()
            .find(|p| tail.starts_with(p.token()))
        {
            Some(placeholder) => {
                rendered.push_str(&values.resolve(*placeholder));
                rest = &tail[placeholder.token().len()..];
            }
            None => {
                rendered.push('{');
                rest = &tail[1..];
            }
        }
    }

    rendered.push_str(rest);
    rendered
}
