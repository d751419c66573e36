use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use jinny_ai::{OpenAiClient, OpenAiConfig};
use jinny_github_issues::{GithubApiClient, GithubApiConfig};
use jinny_runtime::{
    parse_rules, run_polling_loop, ReplyGenerator, ReplyGeneratorConfig, TaskProcessor,
};
use serde_json::json;

const BOT: &str = "JinnyAssistant";

fn processor(
    github: &MockServer,
    openai: &MockServer,
    workspace: &Path,
    rules: &str,
) -> TaskProcessor {
    let tracker = GithubApiClient::new(GithubApiConfig {
        api_base: github.base_url(),
        token: "gh-token".to_string(),
        repository_url: "https://github.com/acme/widgets.git".to_string(),
        request_timeout_ms: 5_000,
    })
    .expect("github client");
    let llm = OpenAiClient::new(OpenAiConfig {
        api_base: format!("{}/v1", openai.base_url()),
        api_key: "sk-test".to_string(),
        request_timeout_ms: 5_000,
    })
    .expect("openai client");
    let replies = ReplyGenerator::new(
        Arc::new(llm),
        ReplyGeneratorConfig {
            model: "gpt-3.5-turbo".to_string(),
            bot_login: BOT.to_string(),
            workspace_dir: workspace.to_path_buf(),
            rules: parse_rules(rules),
        },
    );
    TaskProcessor::new(Arc::new(tracker), replies)
}

fn mock_assigned_issue(github: &MockServer) -> httpmock::Mock<'_> {
    github.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/widgets/issues")
            .query_param("assignee", BOT)
            .query_param("state", "open");
        then.status(200).json_body(json!([
            {"number": 12, "title": "Fix bug", "body": "NPE on save"}
        ]));
    })
}

#[tokio::test]
async fn integration_uncommented_issue_gets_exactly_one_reply() {
    let github = MockServer::start();
    let openai = MockServer::start();
    let workspace = tempfile::tempdir().expect("tempdir");

    let issues = mock_assigned_issue(&github);
    let comments = github.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/issues/12/comments");
        then.status(200).json_body(json!([]));
    });
    let chat = openai.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer sk-test")
            .json_body(json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "You are Jinny."},
                    {"role": "system", "content": "This is project structure:\n"},
                    {"role": "system", "content": "- Task title: Fix bug\n- Task description: NPE on save"}
                ]
            }));
        then.status(200).json_body(json!({
            "choices": [{
                "message": {"role": "assistant", "content": "  Guard the save path against null.\n"},
                "finish_reason": "stop"
            }]
        }));
    });
    let posted = github.mock(|when, then| {
        when.method(POST)
            .path("/repos/acme/widgets/issues/12/comments")
            .header("authorization", "Bearer gh-token")
            .json_body(json!({"body": "Guard the save path against null."}));
        then.status(201).json_body(json!({
            "id": 99,
            "body": "Guard the save path against null.",
            "user": {"login": BOT}
        }));
    });

    processor(&github, &openai, workspace.path(), "system: You are Jinny.\n")
        .process_tasks()
        .await
        .expect("cycle succeeds");

    issues.assert_calls(1);
    comments.assert_calls(1);
    chat.assert_calls(1);
    posted.assert_calls(1);
}

#[tokio::test]
async fn integration_issue_answered_last_by_bot_is_not_commented() {
    let github = MockServer::start();
    let openai = MockServer::start();
    let workspace = tempfile::tempdir().expect("tempdir");

    mock_assigned_issue(&github);
    github.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/issues/12/comments");
        then.status(200).json_body(json!([
            {"id": 1, "body": "Please look", "user": {"login": "alice"}},
            {"id": 2, "body": "Done, see patch", "user": {"login": BOT}}
        ]));
    });
    let chat = openai.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(json!({"choices": [{"message": {"content": "unused"}}]}));
    });
    let posted = github.mock(|when, then| {
        when.method(POST).path("/repos/acme/widgets/issues/12/comments");
        then.status(201);
    });

    processor(&github, &openai, workspace.path(), "")
        .process_tasks()
        .await
        .expect("cycle succeeds");

    chat.assert_calls(0);
    posted.assert_calls(0);
}

#[tokio::test]
async fn regression_chat_failure_aborts_cycle_before_posting() {
    let github = MockServer::start();
    let openai = MockServer::start();
    let workspace = tempfile::tempdir().expect("tempdir");

    mock_assigned_issue(&github);
    github.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/issues/12/comments");
        then.status(200).json_body(json!([]));
    });
    let chat = openai.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(401).body("invalid api key");
    });
    let posted = github.mock(|when, then| {
        when.method(POST).path("/repos/acme/widgets/issues/12/comments");
        then.status(201);
    });

    let error = processor(&github, &openai, workspace.path(), "")
        .process_tasks()
        .await
        .expect_err("chat failure should abort the cycle");

    chat.assert_calls(1);
    posted.assert_calls(0);
    assert!(format!("{error:#}").contains("401"));
}

#[tokio::test]
async fn integration_polling_loop_runs_first_cycle_immediately_then_sleeps() {
    let github = MockServer::start();
    let openai = MockServer::start();
    let workspace = tempfile::tempdir().expect("tempdir");

    let issues = github.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/issues");
        then.status(200).json_body(json!([]));
    });
    let processor = processor(&github, &openai, workspace.path(), "");

    let outcome = tokio::time::timeout(
        Duration::from_secs(2),
        run_polling_loop(&processor, Duration::from_secs(3_600)),
    )
    .await;

    assert!(outcome.is_err(), "loop should still be sleeping");
    issues.assert_calls(1);
}

#[tokio::test]
async fn regression_polling_loop_stops_on_cycle_failure() {
    let github = MockServer::start();
    let openai = MockServer::start();
    let workspace = tempfile::tempdir().expect("tempdir");

    github.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/issues");
        then.status(401).body("bad credentials");
    });
    let processor = processor(&github, &openai, workspace.path(), "");

    let error = run_polling_loop(&processor, Duration::from_secs(3_600))
        .await
        .expect_err("failed cycle should end the loop");

    assert!(format!("{error:#}").contains("401"));
}
