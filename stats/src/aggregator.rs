use std::collections::HashMap;

use anyhow::bail;
use shared::{
    github::{CommentActivity, PrActivity, ReviewVerdict},
    ActivityKind, GithubHandle, Leaderboard, TimeFrame,
};
use tracing::info;

use crate::consts::AUTOMATED_ACCOUNTS;

/// Outcome of feeding one record to the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStep {
    Recorded,
    /// The record left the trailing window. The feed is updated-descending,
    /// so nothing after it can be inside the window either and the scan
    /// should stop here.
    OutOfWindow,
}

/// Windowed activity counters keyed by login. Counts only grow during a
/// scan; the denylist is applied once at the end.
#[derive(Debug)]
pub struct ActivityTally {
    frame: TimeFrame,
    opens: HashMap<GithubHandle, u32>,
    approvals: HashMap<GithubHandle, u32>,
    changes: HashMap<GithubHandle, u32>,
    merges: HashMap<GithubHandle, u32>,
    most_reacted: Option<CommentActivity>,
}

impl ActivityTally {
    pub fn new(frame: TimeFrame) -> Self {
        Self {
            frame,
            opens: HashMap::new(),
            approvals: HashMap::new(),
            changes: HashMap::new(),
            merges: HashMap::new(),
            most_reacted: None,
        }
    }

    pub fn record(&mut self, pr: &PrActivity) -> anyhow::Result<ScanStep> {
        if !self.frame.contains(pr.updated_at) {
            return Ok(ScanStep::OutOfWindow);
        }

        info!("Scanning PR #{} by {}", pr.number, pr.author);

        if self.frame.contains(pr.created_at) {
            info!("{} opens", pr.author);
            *self.opens.entry(pr.author.clone()).or_default() += 1;
        }

        let mut approved_by: Vec<&str> = Vec::new();
        for review in &pr.reviews {
            if !self.frame.contains(review.submitted_at) {
                continue;
            }
            match review.verdict {
                ReviewVerdict::ChangesRequested => {
                    info!("{} requests changes", review.reviewer);
                    *self.changes.entry(review.reviewer.clone()).or_default() += 1;
                }
                ReviewVerdict::Approved => {
                    info!("{} approves", review.reviewer);
                    *self.approvals.entry(review.reviewer.clone()).or_default() += 1;
                    approved_by.push(&review.reviewer);
                }
                ReviewVerdict::Commented | ReviewVerdict::Other => {}
            }
        }

        for comment in &pr.comments {
            if !self.frame.contains(comment.created_at) {
                continue;
            }
            // strict improvement only: an equal later count keeps the earlier one
            let improves = self
                .most_reacted
                .as_ref()
                .map_or(true, |best| comment.reactions > best.reactions);
            if improves {
                self.most_reacted = Some(comment.clone());
            }
        }

        if let Some(merged_at) = pr.merged_at {
            if self.frame.contains(merged_at) {
                let Some(merger) = pr.merged_by.as_deref() else {
                    bail!("PR #{} is merged but the merger is unresolvable", pr.number);
                };
                if approved_by.is_empty() {
                    info!("{merger} implicitly approves by merge");
                    *self.approvals.entry(merger.to_owned()).or_default() += 1;
                } else if !approved_by.contains(&merger) {
                    info!("{merger} merges with existing review");
                    *self.merges.entry(merger.to_owned()).or_default() += 1;
                }
            }
        }

        Ok(ScanStep::Recorded)
    }

    pub fn finish(mut self) -> ActivityReport {
        for login in AUTOMATED_ACCOUNTS {
            self.opens.remove(login);
        }

        ActivityReport {
            approvals: Leaderboard::from_counts(&self.approvals),
            changes: Leaderboard::from_counts(&self.changes),
            merges: Leaderboard::from_counts(&self.merges),
            opens: Leaderboard::from_counts(&self.opens),
            most_reacted: self.most_reacted,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActivityReport {
    pub approvals: Leaderboard,
    pub changes: Leaderboard,
    pub merges: Leaderboard,
    pub opens: Leaderboard,
    pub most_reacted: Option<CommentActivity>,
}

impl ActivityReport {
    pub fn leaderboard(&self, kind: ActivityKind) -> &Leaderboard {
        match kind {
            ActivityKind::Approvals => &self.approvals,
            ActivityKind::Changes => &self.changes,
            ActivityKind::Merges => &self.merges,
            ActivityKind::Opens => &self.opens,
        }
    }
}
