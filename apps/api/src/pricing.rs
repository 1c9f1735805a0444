//! Cost Estimator: prices a model call from its reported token counts.
//!
//! One policy for unknown models everywhere: an unpriced model is an error,
//! never a silent zero-cost result.

use serde::Serialize;
use thiserror::Error;

/// USD per one million tokens: (input, output).
pub const MODEL_PRICING_PER_1M: &[(&str, (f64, f64))] = &[
    ("gpt-4.1-mini", (0.40, 1.60)),
    ("gpt-4o-mini", (0.15, 0.60)),
    ("gpt-4.1-nano", (0.10, 0.40)),
    ("gpt-3.5-turbo", (0.50, 1.50)),
];

const TOKENS_PER_PRICE_UNIT: f64 = 1_000_000.0;

#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("No pricing configured for model: {0}")]
    UnpricedModel(String),

    #[error("Missing pricing for allowed models: {}", .0.join(", "))]
    MissingPrices(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub input_cost_usd: f64,
    pub output_cost_usd: f64,
    pub total_cost_usd: f64,
}

pub fn price_for(model: &str) -> Option<(f64, f64)> {
    MODEL_PRICING_PER_1M
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, price)| *price)
}

pub fn estimate_cost(
    model: &str,
    prompt_tokens: u64,
    completion_tokens: u64,
) -> Result<CostBreakdown, PricingError> {
    let (in_price, out_price) =
        price_for(model).ok_or_else(|| PricingError::UnpricedModel(model.to_string()))?;

    let input_cost_usd = prompt_tokens as f64 / TOKENS_PER_PRICE_UNIT * in_price;
    let output_cost_usd = completion_tokens as f64 / TOKENS_PER_PRICE_UNIT * out_price;

    Ok(CostBreakdown {
        prompt_tokens,
        completion_tokens,
        input_cost_usd,
        output_cost_usd,
        total_cost_usd: input_cost_usd + output_cost_usd,
    })
}

/// Fails if any of `models` has no price. Run once at startup against the allowed model list.
pub fn verify_price_table(models: &[&str]) -> Result<(), PricingError> {
    let missing: Vec<String> = models
        .iter()
        .filter(|m| price_for(m).is_none())
        .map(|m| m.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PricingError::MissingPrices(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ALLOWED_MODELS;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_one_million_tokens_each_on_gpt_4o_mini() {
        let cost = estimate_cost("gpt-4o-mini", 1_000_000, 1_000_000).unwrap();
        assert!(approx(cost.input_cost_usd, 0.15));
        assert!(approx(cost.output_cost_usd, 0.60));
        assert!(approx(cost.total_cost_usd, 0.75));
        assert_eq!(cost.prompt_tokens, 1_000_000);
        assert_eq!(cost.completion_tokens, 1_000_000);
    }

    #[test]
    fn test_small_call_cost() {
        let cost = estimate_cost("gpt-4.1-mini", 2_000, 500).unwrap();
        assert!(approx(cost.input_cost_usd, 0.0008));
        assert!(approx(cost.output_cost_usd, 0.0008));
        assert!(approx(cost.total_cost_usd, 0.0016));
    }

    #[test]
    fn test_zero_tokens_cost_nothing() {
        let cost = estimate_cost("gpt-3.5-turbo", 0, 0).unwrap();
        assert_eq!(cost.total_cost_usd, 0.0);
    }

    #[test]
    fn test_unpriced_model_is_an_error() {
        assert_eq!(
            estimate_cost("gpt-4o", 10, 10),
            Err(PricingError::UnpricedModel("gpt-4o".to_string()))
        );
    }

    #[test]
    fn test_every_allowed_model_is_priced() {
        assert!(verify_price_table(ALLOWED_MODELS).is_ok());
    }

    #[test]
    fn test_verify_reports_missing_models() {
        let err = verify_price_table(&["gpt-4o-mini", "o1", "gpt-5"]).unwrap_err();
        assert_eq!(err.to_string(), "Missing pricing for allowed models: o1, gpt-5");
    }
}
