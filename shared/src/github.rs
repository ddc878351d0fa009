use chrono::{DateTime, Utc};
use octocrab::models::pulls::{PullRequest, Review, ReviewState};

use crate::GithubHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewVerdict {
    Approved,
    ChangesRequested,
    Commented,
    Other,
}

impl From<ReviewState> for ReviewVerdict {
    fn from(state: ReviewState) -> Self {
        match state {
            ReviewState::Approved => Self::Approved,
            ReviewState::ChangesRequested => Self::ChangesRequested,
            ReviewState::Commented => Self::Commented,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewActivity {
    pub reviewer: GithubHandle,
    pub verdict: ReviewVerdict,
    pub submitted_at: DateTime<Utc>,
}

impl TryFrom<Review> for ReviewActivity {
    type Error = ();

    fn try_from(review: Review) -> Result<Self, ()> {
        let reviewer = review.user.ok_or(())?.login;
        let submitted_at = review.submitted_at.ok_or(())?;
        Ok(Self {
            reviewer,
            verdict: review.state.map(Into::into).unwrap_or(ReviewVerdict::Other),
            submitted_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CommentActivity {
    pub created_at: DateTime<Utc>,
    pub reactions: u32,
    pub permalink: String,
}

/// Everything the weekly tally needs to know about one pull request.
///
/// Built from the list feed first; reviews, comments and the merger login
/// are filled in by the client afterwards.
#[derive(Debug, Clone)]
pub struct PrActivity {
    pub number: u64,
    pub author: GithubHandle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    pub merged_by: Option<GithubHandle>,
    pub reviews: Vec<ReviewActivity>,
    pub comments: Vec<CommentActivity>,
}

impl TryFrom<PullRequest> for PrActivity {
    type Error = anyhow::Error;

    fn try_from(pr: PullRequest) -> anyhow::Result<Self> {
        if let (Some(user), Some(created_at), Some(updated_at)) =
            (pr.user, pr.created_at, pr.updated_at)
        {
            Ok(Self {
                number: pr.number,
                author: user.login,
                created_at,
                updated_at,
                merged_at: pr.merged_at,
                merged_by: pr.merged_by.map(|user| user.login),
                reviews: Vec::new(),
                comments: Vec::new(),
            })
        } else {
            Err(anyhow::anyhow!("Missing required fields"))
        }
    }
}
