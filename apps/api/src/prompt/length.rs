use crate::models::facts::ResponseLength;

/// Instruction appended to the rendered prompt plus the token budget for the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthPolicy {
    pub instruction: &'static str,
    pub max_tokens: u32,
}

const SHORT: LengthPolicy = LengthPolicy {
    instruction: "Keep the response concise, around 2-3 sentences.",
    max_tokens: 200,
};

const MEDIUM: LengthPolicy = LengthPolicy {
    instruction: "Provide a moderate length response, around 3-4 paragraphs.",
    max_tokens: 500,
};

const DETAILED: LengthPolicy = LengthPolicy {
    instruction: "Provide a comprehensive response with detailed explanations.",
    max_tokens: 1000,
};

impl LengthPolicy {
    pub fn for_length(length: ResponseLength) -> Self {
        match length {
            ResponseLength::Short => SHORT,
            ResponseLength::Medium => MEDIUM,
            ResponseLength::Detailed => DETAILED,
        }
    }

    /// Appends the instruction after a blank line.
    pub fn apply(&self, rendered: &str) -> String {
        format!("{rendered}\n\n{}", self.instruction)
    }
}
