use std::sync::Arc;

use anyhow::{Context, Result};
use jinny_github_issues::{GithubIssueComment, IssueTracker, OPEN_ISSUE_STATE};

use crate::issue_flight_guard::IssueFlightGuard;
use crate::reply_generator::ReplyGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingDecision {
    /// The bot wrote the last comment; wait for a human.
    Skip,
    Respond,
}

pub fn decide(comments: &[GithubIssueComment], bot_login: &str) -> ProcessingDecision {
    match comments.last() {
        Some(last) if last.author() == bot_login => ProcessingDecision::Skip,
        _ => ProcessingDecision::Respond,
    }
}

/// Runs processing cycles over the issues assigned to the bot.
pub struct TaskProcessor {
    tracker: Arc<dyn IssueTracker>,
    replies: ReplyGenerator,
    flight_guard: Option<IssueFlightGuard>,
}

impl TaskProcessor {
    pub fn new(tracker: Arc<dyn IssueTracker>, replies: ReplyGenerator) -> Self {
        Self {
            tracker,
            replies,
            flight_guard: None,
        }
    }

    /// Skips issues that an overlapping cycle is already answering.
    pub fn with_flight_guard(mut self, guard: IssueFlightGuard) -> Self {
        self.flight_guard = Some(guard);
        self
    }

    pub fn bot_login(&self) -> &str {
        self.replies.bot_login()
    }

    /// One cycle: the first failure aborts the remaining issues.
    pub async fn process_tasks(&self) -> Result<()> {
        let bot_login = self.bot_login();
        let issues = self
            .tracker
            .list_assigned_issues(bot_login, OPEN_ISSUE_STATE)
            .await
            .context("failed to list assigned issues")?;
        tracing::info!(count = issues.len(), assignee = bot_login, "fetched assigned issues");

        for issue in issues {
            let _permit = match &self.flight_guard {
                Some(guard) => match guard.try_acquire(issue.number) {
                    Some(permit) => Some(permit),
                    None => {
                        tracing::info!(issue = issue.number, "issue already in flight; skipping");
                        continue;
                    }
                },
                None => None,
            };

            let comments = self
                .tracker
                .list_comments(issue.number)
                .await
                .with_context(|| format!("failed to list comments for issue #{}", issue.number))?;
            if decide(&comments, bot_login) == ProcessingDecision::Skip {
                tracing::debug!(issue = issue.number, "last comment is ours; skipping");
                continue;
            }

            let reply = self.replies.build_reply(&issue, &comments).await?;
            self.tracker
                .create_comment(issue.number, &reply)
                .await
                .with_context(|| format!("failed to comment on issue #{}", issue.number))?;
            tracing::info!(issue = issue.number, "posted reply");
        }
        Ok(())
    }
}
