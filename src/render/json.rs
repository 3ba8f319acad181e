//! JSON rendering for layout plans.

use crate::error::{Error, Result};
use crate::model::LayoutPlan;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a layout plan to JSON.
pub fn to_json(plan: &LayoutPlan, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(plan),
        JsonFormat::Compact => serde_json::to_string(plan),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classify;

    #[test]
    fn test_to_json_pretty() {
        let plan = classify("Jane Doe\nEngineer");
        let json = to_json(&plan, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"role\": \"name\""));
        assert!(json.contains("\"role\": \"job_title_heading\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact_round_trips() {
        let plan = classify("Jane Doe\nEngineer\njane@x.com");
        let json = to_json(&plan, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let back: LayoutPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }
}
