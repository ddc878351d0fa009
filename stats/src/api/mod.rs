use std::collections::VecDeque;

use octocrab::{models::pulls::PullRequest, params, Octocrab, Page};
use serde::Deserialize;
use shared::{
    github::{CommentActivity, PrActivity, ReviewActivity},
    GithubHandle,
};
use tracing::instrument;

const PER_PAGE: u8 = 100;

pub struct GithubClient {
    octocrab: Octocrab,
}

/// Issue-comment payload carrying the reaction rollup and permalink that the
/// typed comment model drops.
#[derive(Debug, Deserialize)]
struct CommentPayload {
    created_at: chrono::DateTime<chrono::Utc>,
    html_url: String,
    reactions: ReactionRollup,
}

#[derive(Debug, Deserialize)]
struct ReactionRollup {
    total_count: u32,
}

impl From<CommentPayload> for CommentActivity {
    fn from(comment: CommentPayload) -> Self {
        Self {
            created_at: comment.created_at,
            reactions: comment.reactions.total_count,
            permalink: comment.html_url,
        }
    }
}

impl GithubClient {
    pub fn new(github_token: String) -> anyhow::Result<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(github_token)
            .build()?;

        Ok(Self { octocrab })
    }

    /// Opens the updated-descending pull request feed for a repository.
    pub async fn pull_feed(&self, org: &str, repo: &str) -> anyhow::Result<PullFeed<'_>> {
        let page = self
            .octocrab
            .pulls(org, repo)
            .list()
            .state(params::State::All)
            .sort(params::pulls::Sort::Updated)
            .direction(params::Direction::Descending)
            .per_page(PER_PAGE)
            .send()
            .await?;

        Ok(PullFeed::new(self, page))
    }

    /// Hydrates one feed record into a full activity record. The list feed
    /// omits `merged_by`, so merged PRs cost one extra fetch.
    pub async fn activity(
        &self,
        org: &str,
        repo: &str,
        pr: PullRequest,
    ) -> anyhow::Result<PrActivity> {
        let mut activity = PrActivity::try_from(pr)?;
        activity.reviews = self.reviews(org, repo, activity.number).await?;
        activity.comments = self.comments(org, repo, activity.number).await?;
        if activity.merged_at.is_some() {
            activity.merged_by = self.merged_by(org, repo, activity.number).await?;
        }

        Ok(activity)
    }

    #[instrument(skip(self))]
    async fn reviews(
        &self,
        org: &str,
        repo: &str,
        number: u64,
    ) -> anyhow::Result<Vec<ReviewActivity>> {
        let page = self
            .octocrab
            .pulls(org, repo)
            .list_reviews(number)
            .per_page(PER_PAGE)
            .send()
            .await?;
        let reviews = self.octocrab.all_pages(page).await?;

        Ok(reviews
            .into_iter()
            .flat_map(ReviewActivity::try_from)
            .collect())
    }

    #[instrument(skip(self))]
    async fn comments(
        &self,
        org: &str,
        repo: &str,
        number: u64,
    ) -> anyhow::Result<Vec<CommentActivity>> {
        let route = format!("/repos/{org}/{repo}/issues/{number}/comments");
        let mut collected = Vec::new();
        let mut page = 1u32;
        loop {
            let batch: Vec<CommentPayload> = self
                .octocrab
                .get(
                    &route,
                    Some(&serde_json::json!({ "per_page": PER_PAGE, "page": page })),
                )
                .await?;
            let fetched = batch.len();
            collected.extend(batch.into_iter().map(CommentActivity::from));
            if fetched < usize::from(PER_PAGE) {
                return Ok(collected);
            }
            page += 1;
        }
    }

    #[instrument(skip(self))]
    async fn merged_by(
        &self,
        org: &str,
        repo: &str,
        number: u64,
    ) -> anyhow::Result<Option<GithubHandle>> {
        let pr = self.octocrab.pulls(org, repo).get(number).await?;

        Ok(pr.merged_by.map(|user| user.login))
    }
}

/// Lazily-paged pull request stream. Pages are only fetched when the
/// previous one is drained, so an early stop bounds network traffic.
pub struct PullFeed<'a> {
    client: &'a GithubClient,
    items: VecDeque<PullRequest>,
    page: Page<PullRequest>,
}

impl<'a> PullFeed<'a> {
    fn new(client: &'a GithubClient, mut page: Page<PullRequest>) -> Self {
        let items = VecDeque::from(page.take_items());
        Self {
            client,
            items,
            page,
        }
    }

    pub async fn next(&mut self) -> anyhow::Result<Option<PullRequest>> {
        if self.items.is_empty() {
            let next_page = self.client.octocrab.get_page(&self.page.next).await?;
            if let Some(mut next_page) = next_page {
                self.items = VecDeque::from(next_page.take_items());
                self.page = next_page;
            } else {
                return Ok(None);
            }
        }

        Ok(self.items.pop_front())
    }
}
