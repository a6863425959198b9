use std::cmp::Ordering;

use super::FeedSnapshot;

/// What a fresh snapshot means relative to the last seen issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// First non-empty snapshot. Nothing to compare against yet.
    Baseline,
    /// Latest issue matches the one already seen.
    Unchanged,
    /// Latest issue moved on from `previous`.
    NewIssue { previous: String },
    /// Feed returned no draws. Baseline kept.
    Empty,
    /// Latest issue is older than the one already seen (lagging cache).
    Stale { latest: String },
}

impl Observation {
    /// True only for a genuine issue transition.
    pub fn is_new_issue(&self) -> bool {
        matches!(self, Self::NewIssue { .. })
    }
}

/// Remembers the latest issue number across polls.
#[derive(Debug, Default)]
pub struct IssueTracker {
    last_issue: Option<String>,
}

impl IssueTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_issue(&self) -> Option<&str> {
        self.last_issue.as_deref()
    }

    /// Compare `snapshot` to the last seen issue and advance the baseline.
    ///
    /// Each distinct issue yields `NewIssue` at most once, since the
    /// baseline moves to it in the same call.
    pub fn observe(&mut self, snapshot: &FeedSnapshot) -> Observation {
        let Some(latest) = snapshot.latest() else {
            return Observation::Empty;
        };
        let latest = &latest.issue_number;

        let observation = match self.last_issue.as_deref() {
            None => Observation::Baseline,
            Some(last) if last == latest => return Observation::Unchanged,
            Some(last) if compare_issues(latest, last) == Some(Ordering::Less) => {
                return Observation::Stale {
                    latest: latest.clone(),
                };
            }
            Some(last) => Observation::NewIssue {
                previous: last.to_string(),
            },
        };

        self.last_issue = Some(latest.clone());
        observation
    }
}

/// Numeric order of two issue ids, if both are plain digit strings.
fn compare_issues(a: &str, b: &str) -> Option<Ordering> {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit());
    if !digits(a) || !digits(b) {
        return None;
    }

    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    Some(a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Draw;

    fn snap(issue: &str) -> FeedSnapshot {
        FeedSnapshot::new(vec![Draw::new(issue, 3, "green")])
    }

    #[test]
    fn test_first_poll_is_baseline() {
        let mut tracker = IssueTracker::new();
        assert_eq!(tracker.observe(&snap("1001")), Observation::Baseline);
        assert_eq!(tracker.last_issue(), Some("1001"));
    }

    #[test]
    fn test_same_issue_unchanged() {
        let mut tracker = IssueTracker::new();
        tracker.observe(&snap("1001"));

        assert_eq!(tracker.observe(&snap("1001")), Observation::Unchanged);
        assert_eq!(tracker.observe(&snap("1001")), Observation::Unchanged);
    }

    #[test]
    fn test_new_issue_fires_once() {
        let mut tracker = IssueTracker::new();
        tracker.observe(&snap("1001"));

        let first = tracker.observe(&snap("1002"));
        assert_eq!(
            first,
            Observation::NewIssue {
                previous: "1001".to_string()
            }
        );
        // Duplicate poll of the same new issue
        assert_eq!(tracker.observe(&snap("1002")), Observation::Unchanged);
    }

    #[test]
    fn test_empty_keeps_baseline() {
        let mut tracker = IssueTracker::new();
        tracker.observe(&snap("1001"));

        assert_eq!(tracker.observe(&FeedSnapshot::empty()), Observation::Empty);
        assert_eq!(tracker.last_issue(), Some("1001"));
        assert_eq!(tracker.observe(&snap("1001")), Observation::Unchanged);
    }

    #[test]
    fn test_empty_before_baseline() {
        let mut tracker = IssueTracker::new();
        assert_eq!(tracker.observe(&FeedSnapshot::empty()), Observation::Empty);
        assert_eq!(tracker.observe(&snap("1001")), Observation::Baseline);
    }

    #[test]
    fn test_stale_response_ignored() {
        let mut tracker = IssueTracker::new();
        tracker.observe(&snap("20250101100010002"));

        assert_eq!(
            tracker.observe(&snap("20250101100010001")),
            Observation::Stale {
                latest: "20250101100010001".to_string()
            }
        );
        assert_eq!(tracker.last_issue(), Some("20250101100010002"));
        assert_eq!(tracker.observe(&snap("20250101100010002")), Observation::Unchanged);
    }

    #[test]
    fn test_opaque_ids_any_change_is_new() {
        let mut tracker = IssueTracker::new();
        tracker.observe(&snap("B-2"));
        assert!(tracker.observe(&snap("A-1")).is_new_issue());
    }

    #[test]
    fn test_compare_issues() {
        assert_eq!(compare_issues("999", "1000"), Some(Ordering::Less));
        assert_eq!(compare_issues("1001", "1000"), Some(Ordering::Greater));
        assert_eq!(compare_issues("0010", "10"), Some(Ordering::Equal));
        assert_eq!(compare_issues("10a", "10"), None);
    }
}
