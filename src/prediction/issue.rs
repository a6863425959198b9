use super::PredictionError;

/// Number of distinct short issue ids (000-999).
const ISSUE_CYCLE: u16 = 1000;

/// Short id of the round after `latest`.
///
/// Takes the last three characters of the identifier, adds one and wraps
/// at 1000, so `...999` becomes `000`. Identifiers shorter than three
/// characters use all of them.
pub fn derive_next_issue_id(latest: &str) -> Result<String, PredictionError> {
    let start = latest
        .char_indices()
        .rev()
        .nth(2)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let tail = &latest[start..];

    if tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PredictionError::InvalidIssue(latest.to_string()));
    }

    // At most three digits, fits in u16
    let current: u16 = tail
        .parse()
        .map_err(|_| PredictionError::InvalidIssue(latest.to_string()))?;

    Ok(format!("{:03}", (current + 1) % ISSUE_CYCLE))
}
