//! Prompt templates wrapped around the traffic summary.

/// Context label used when a chat request carries no context.
pub const DEFAULT_CHAT_CONTEXT: &str = "general";

pub fn freeform_prompt(summary: &str) -> String {
    format!(
        "Analyze the following traffic data for a shortened URL and give one concise, \
actionable insight. Look for patterns, trends and what they might imply.

Data summary:
{summary}

Task:
Write a short natural-language insight of 1-3 sentences. Examples: \
\"Traffic spiked on Tuesday morning, mostly from mobile Chrome users, which suggests the \
mobile campaign is working.\" or \"A burst of bot requests arrived between 2 and 4 AM.\"
"
    )
}

pub fn graph_prompt(summary: &str, graph_type: &str) -> String {
    format!(
        "You are an analytics expert. A user is looking at the \"{graph_type}\" graph for a \
shortened URL.

Overall data summary:
{summary}

Task:
1. Focus ONLY on what is relevant to the \"{graph_type}\" graph.
2. Describe the pattern, any anomalies, and likely causes.
3. Suggest 1-2 concrete actions the user could take.

Respond in 3-5 concise sentences.
"
    )
}

pub fn chat_prompt(summary: &str, message: &str, context: Option<&str>) -> String {
    let context = context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CHAT_CONTEXT);
    format!(
        "You are an assistant helping a user understand the analytics of a shortened URL.

Analytics summary:
{summary}

User context: {context}
User question: {message}

Answer clearly and concretely, referring to the data where you can. Keep it under 8 sentences.
"
    )
}
