//! Plain text rendering for layout plans.

use crate::model::{LayoutPlan, LineRole};

/// Render a plan as annotated plain text, one line per classified line.
///
/// Each line is prefixed with its role label padded to a fixed column so
/// classification results can be reviewed at a glance.
pub fn to_text(plan: &LayoutPlan) -> String {
    let width = LineRole::ALL
        .iter()
        .map(|r| r.label().len())
        .max()
        .unwrap_or(0);

    plan.iter()
        .map(|line| {
            let marker = if line.role == LineRole::Bullet { "- " } else { "" };
            format!("{:<width$}  {}{}", line.role.label(), marker, line.text, width = width)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classify;

    #[test]
    fn test_to_text() {
        let plan = classify("Jane Doe\nEngineer\njane@x.com\nSKILLS\n- Rust");
        let text = to_text(&plan);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "name       Jane Doe");
        assert_eq!(lines[3], "section    SKILLS");
        assert_eq!(lines[4], "bullet     - Rust");
    }

    #[test]
    fn test_to_text_empty() {
        assert_eq!(to_text(&LayoutPlan::new()), "");
    }
}
