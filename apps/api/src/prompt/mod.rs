// Prompt assembly: placeholder rendering, length policy, and fixed prompt text.
// Pure functions only; no I/O happens here.

pub mod length;
pub mod prompts;
pub mod renderer;
