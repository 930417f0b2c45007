// Relay for job-description rewriting.
// Embeds the user's text in a fixed template and forwards it through llm_client.

pub mod handlers;
pub mod prompts;
