use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use jinny_ai::{ChatRequest, LlmClient, Message};
use jinny_github_issues::{GithubIssue, GithubIssueComment};
use jinny_snapshot::render_tree;

use crate::rules::Rule;

pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Clone)]
pub struct ReplyGeneratorConfig {
    pub model: String,
    pub bot_login: String,
    pub workspace_dir: PathBuf,
    pub rules: Vec<Rule>,
}

/// Builds issue conversations and asks the chat collaborator for a reply.
pub struct ReplyGenerator {
    llm: Arc<dyn LlmClient>,
    config: ReplyGeneratorConfig,
}

impl ReplyGenerator {
    pub fn new(llm: Arc<dyn LlmClient>, config: ReplyGeneratorConfig) -> Self {
        Self { llm, config }
    }

    pub fn bot_login(&self) -> &str {
        self.config.bot_login.as_str()
    }

    /// Assembles rules, project structure, task and comment thread, in that order.
    pub fn build_messages(
        &self,
        issue: &GithubIssue,
        comments: &[GithubIssueComment],
    ) -> Result<Vec<Message>> {
        let mut messages: Vec<Message> =
            self.config.rules.iter().map(Rule::to_message).collect();

        let tree = render_tree(&self.config.workspace_dir)
            .context("failed to render repository tree")?;
        messages.push(Message::system(format!("This is project structure:\n{tree}")));
        messages.push(Message::system(format!(
            "- Task title: {}\n- Task description: {}",
            issue.title,
            issue.body_text()
        )));

        for comment in comments {
            if comment.author() == self.bot_login() {
                messages.push(Message::assistant(comment.body_text()));
            } else {
                messages.push(Message::user(format!(
                    "@{}: {}",
                    comment.author(),
                    comment.body_text()
                )));
            }
        }
        Ok(messages)
    }

    pub async fn build_reply(
        &self,
        issue: &GithubIssue,
        comments: &[GithubIssueComment],
    ) -> Result<String> {
        let messages = self.build_messages(issue, comments)?;

        for message in &messages {
            tracing::info!(
                issue = issue.number,
                role = message.role.as_str(),
                content = %message.content,
                "chat request turn"
            );
        }

        let response = self
            .llm
            .complete(ChatRequest {
                model: self.config.model.clone(),
                messages,
            })
            .await
            .with_context(|| format!("chat completion failed for issue #{}", issue.number))?;

        let reply = response.message.content.trim().to_string();
        tracing::info!(issue = issue.number, response = %reply, "chat response");
        Ok(reply)
    }
}
