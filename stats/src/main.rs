use std::path::PathBuf;

use review_pulse_stats::{
    aggregator::{ActivityTally, ScanStep},
    api::GithubClient,
    consts::{TRACKED_ORG, TRACKED_REPO},
    messages::SummaryTemplate,
    report,
};
use serde::Deserialize;
use shared::TimeFrame;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

#[derive(Deserialize)]
struct Env {
    github_token: String,
    message_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let env = envy::from_env::<Env>()?;

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer());
    tracing::subscriber::set_global_default(subscriber)?;

    let template = match &env.message_file {
        Some(path) => SummaryTemplate::load_from_file(path)?,
        None => SummaryTemplate::builtin()?,
    };

    let github = GithubClient::new(env.github_token)?;
    let frame = TimeFrame::trailing_week(chrono::Utc::now());
    let mut tally = ActivityTally::new(frame);

    info!("Scanning the trailing week of {TRACKED_ORG}/{TRACKED_REPO}");
    let mut feed = github.pull_feed(TRACKED_ORG, TRACKED_REPO).await?;
    while let Some(pull) = feed.next().await? {
        let activity = github.activity(TRACKED_ORG, TRACKED_REPO, pull).await?;
        match tally.record(&activity)? {
            ScanStep::Recorded => {}
            ScanStep::OutOfWindow => {
                info!(
                    "PR #{} left the trailing week, stopping the scan",
                    activity.number
                );
                break;
            }
        }
    }

    let report_data = tally.finish();
    print!("{}", report::render_leaderboards(&report_data));
    println!();
    println!("{}", report::render_summary(&template, &report_data)?);

    Ok(())
}
