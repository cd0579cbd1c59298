use std::collections::HashMap;

use crate::types::ActivityLog;

/// Number of log entries per action type, most frequent first.
///
/// Ties are ordered by action name; a blank action counts as `unknown`.
pub fn action_counts(logs: &[ActivityLog]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for log in logs {
        let action = match log.action_type.trim() {
            "" => "unknown",
            a => a,
        };
        *counts.entry(action).or_default() += 1;
    }

    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(action, n)| (action.to_string(), n))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}
