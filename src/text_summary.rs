//! Text renderings of traces and history for the scripting modes.

use crate::model::{GcdResult, HistoryItem};

/// Step-per-line trace of a calculation, ending with the GCD banner.
pub fn build_trace_lines(result: &GcdResult) -> Vec<String> {
    let mut lines = Vec::with_capacity(result.steps.len() + 2);
    lines.push(format!("GCD({}, {})", result.a, result.b));
    for (i, step) in result.steps.iter().enumerate() {
        let detail = match (step.quotient, step.remainder) {
            (Some(q), Some(r)) => format!("  (quotient {q}, remainder {r})"),
            _ => String::new(),
        };
        lines.push(format!(
            "step {}/{}: {}{}",
            i + 1,
            result.steps.len(),
            step.operation_label(),
            detail
        ));
    }
    lines.push(format!("GCD: {}", result.result));
    lines
}

/// One line per past calculation, most useful piped through standard tools.
pub fn build_history_lines(items: &[HistoryItem]) -> Vec<String> {
    if items.is_empty() {
        return vec!["No calculations yet.".to_string()];
    }
    items
        .iter()
        .map(|item| {
            format!(
                "{:>6}  GCD({}, {}) = {}  [{} step{}]  {}",
                item.id,
                item.a,
                item.b,
                item.result,
                item.steps.len(),
                if item.steps.len() == 1 { "" } else { "s" },
                item.created_at
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GcdStep;

    fn step(n: u32, a: u64, b: u64, q: u64, r: u64) -> GcdStep {
        GcdStep {
            step: n,
            a,
            b,
            quotient: Some(q),
            remainder: Some(r),
            operation: None,
            explanation: None,
        }
    }

    fn sample_result() -> GcdResult {
        GcdResult {
            result: 6,
            steps: vec![
                step(1, 48, 18, 2, 12),
                step(2, 18, 12, 1, 6),
                step(3, 12, 6, 2, 0),
            ],
            a: 48,
            b: 18,
        }
    }

    #[test]
    fn trace_opens_with_the_first_division_and_ends_with_the_banner() {
        let lines = build_trace_lines(&sample_result());
        assert_eq!(lines[0], "GCD(48, 18)");
        assert_eq!(lines[1], "step 1/3: 48 mod 18  (quotient 2, remainder 12)");
        assert_eq!(lines.last().unwrap(), "GCD: 6");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn empty_history_prints_a_hint() {
        assert_eq!(build_history_lines(&[]), vec!["No calculations yet."]);
    }

    #[test]
    fn history_lines_carry_id_result_and_timestamp() {
        let items = vec![HistoryItem {
            id: 7,
            a: 48,
            b: 18,
            result: 6,
            steps: sample_result().steps,
            created_at: "2026-08-01T12:00:00Z".into(),
        }];
        let lines = build_history_lines(&items);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("GCD(48, 18) = 6"));
        assert!(lines[0].contains("[3 steps]"));
        assert!(lines[0].contains("2026-08-01T12:00:00Z"));
    }
}
