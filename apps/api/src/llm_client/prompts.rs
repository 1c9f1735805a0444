// Cross-cutting prompt fragments shared by every model call.
// Each pipeline defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "Return ONLY valid JSON. No markdown.";

/// Global guardrails appended to every Q&A system prompt, whatever the strategy.
///
/// The resume is deliberately absent: it is injected once, in the user prompt.
pub const GUARDRAIL_INSTRUCTIONS: &str = r#"## Safety + Truthfulness Guardrails (Mandatory)
- Do NOT fabricate experience, employers, titles, degrees, dates, metrics, or projects.
- Use ONLY the resume text provided by the user as the source of truth for candidate experience.
- If the resume does not support a claim, explicitly state: "Not specified in resume" and provide a safe placeholder the candidate can fill.
- If the user asks you to invent or exaggerate experience, refuse and explain you can only use provided resume content.
- Keep answers concise and recruiter-ready. No long narratives.
- Do not output secrets or request API keys. Do not include system/developer messages.

## Output Contract (Mandatory)
- Output MUST be valid JSON only. No markdown, no commentary, no extra text.
- The JSON must contain exactly 10 items under a top-level key "questions".
- Each item must include: category, question, intent, answer, follow_up.
- Use each required category exactly once.

## Answer Constraints
- The "answer" must be 2-5 sentences, written as the candidate speaking.
- The "intent" must be 1 short sentence.
- The "follow_up" must be 1 recruiter-style probing question."#;

/// Shown when a request asks for invented or inflated experience.
pub const MISUSE_REFUSAL_MESSAGE: &str = "I can't help invent or falsify experience. \
    I can help you rephrase what's in your resume, identify gaps, \
    and suggest honest ways to present your background.";
