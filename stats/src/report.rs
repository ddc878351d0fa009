use std::collections::HashMap;

use anyhow::Context;
use itertools::Itertools;
use shared::{ActivityKind, IntoEnumIterator, Leaderboard};

use crate::{
    aggregator::ActivityReport,
    consts::{TRACKED_ORG, TRACKED_REPO},
    messages::SummaryTemplate,
};

pub fn render_leaderboards(report: &ActivityReport) -> String {
    let mut out = String::new();
    for kind in ActivityKind::iter() {
        out.push_str(&format!("\n### {}\n\n", kind.heading()));
        render_rows(&mut out, report.leaderboard(kind));
    }

    out
}

fn render_rows(out: &mut String, board: &Leaderboard) {
    for row in board.rows() {
        out.push_str(&format!(
            "{}. {} ({})\n",
            row.rank,
            row.logins.iter().join(", "),
            row.count
        ));
    }
}

const fn template_vars(kind: ActivityKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        ActivityKind::Approvals => ("top_approver", "top_approver_count", "total_approvals"),
        ActivityKind::Changes => (
            "top_change_requester",
            "top_change_requester_count",
            "total_changes",
        ),
        ActivityKind::Merges => ("top_merger", "top_merger_count", "total_merges"),
        ActivityKind::Opens => ("top_opener", "top_opener_count", "total_opens"),
    }
}

/// Interpolates the weekly summary. Fails when a leaderboard is empty or no
/// comment gathered reactions inside the window, since the template has
/// nothing to point at.
pub fn render_summary(
    template: &SummaryTemplate,
    report: &ActivityReport,
) -> anyhow::Result<String> {
    let most_reacted = report
        .most_reacted
        .as_ref()
        .context("no comment gathered reactions inside the window")?;

    let mut values = HashMap::new();
    values.insert("repo", format!("{TRACKED_ORG}/{TRACKED_REPO}"));
    values.insert("most_reacted_count", most_reacted.reactions.to_string());
    values.insert("most_reacted_link", most_reacted.permalink.clone());

    for kind in ActivityKind::iter() {
        let board = report.leaderboard(kind);
        let top = board
            .top()
            .with_context(|| format!("the \"{}\" leaderboard is empty", kind.heading()))?;
        let (login_var, count_var, total_var) = template_vars(kind);
        values.insert(login_var, top.logins.iter().join(", "));
        values.insert(count_var, top.count.to_string());
        values.insert(total_var, board.total().to_string());
    }

    template.format(values)
}
