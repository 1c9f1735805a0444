// Markdown rendering of a Q&A result, ready to paste or download.

use crate::pricing::CostBreakdown;
use crate::schema::RecruiterPrepOutput;

/// One-line cost summary, six decimal places.
pub fn cost_caption(cost: &CostBreakdown) -> String {
    format!(
        "Estimated API cost: ${:.6} (input ${:.6} + output ${:.6}) • Tokens: prompt {}, completion {}",
        cost.total_cost_usd,
        cost.input_cost_usd,
        cost.output_cost_usd,
        cost.prompt_tokens,
        cost.completion_tokens
    )
}

pub fn render_markdown(output: &RecruiterPrepOutput, cost: &CostBreakdown) -> String {
    let mut sections: Vec<String> = output
        .questions
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                "### {}. {}: {}\n\n**Intent:** {}\n\n**Recruiter-ready answer:** {}\n\n**Follow-up probe:** {}",
                i + 1,
                item.category,
                item.question,
                item.intent,
                item.answer,
                item.follow_up
            )
        })
        .collect();

    sections.push(format!("_{}_", cost_caption(cost)));
    sections.join("\n\n")
}
