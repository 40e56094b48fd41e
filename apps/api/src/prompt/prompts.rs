// Fixed prompt text shared by the seeded configuration and the generation call.

/// System role sent with every generation request.
pub const RESPONDER_SYSTEM: &str = "You are a professional customer relationship manager for restaurants. \
    You write thoughtful, personalized replies to customer feedback that reflect the \
    restaurant's brand tone. Address the customer's points directly, stay factual, \
    and never invent details about the restaurant that are not provided.";

/// Sampling temperature for reply generation.
pub const SAMPLING_TEMPERATURE: f32 = 0.7;

/// Template seeded into a fresh configuration store.
/// Placeholders are replaced by `renderer::render_template`.
pub const DEFAULT_PROMPT_TEMPLATE: &str = r#"Write a response to customer feedback for {Restaurant Name}, a {Restaurant Type} restaurant located at {Address}.

Brand tone: {Brand tone}

Customer details:
- Name: {Customer Name}
- Gender: {Gender}
- History: {Customer History}
- Meal: {Meal type}

Restaurant facts to mention where relevant: {Restaurant Todo List Facts}
Customer facts to keep in mind: {Customer Todo List Facts}

Customer feedback:
"{Customer Feedback Text}"

Reply in the brand tone, thank the customer by name, and respond to each point they raised."#;
