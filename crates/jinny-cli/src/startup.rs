use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use jinny_ai::{OpenAiClient, OpenAiConfig};
use jinny_github_issues::{GithubApiClient, GithubApiConfig};
use jinny_runtime::{
    load_rules, resolve_rules_path, run_polling_loop, run_server, IssueFlightGuard,
    ReplyGenerator, ReplyGeneratorConfig, ServerState, TaskProcessor,
};
use jinny_snapshot::{ensure_cloned, render_tree};

use crate::cli_args::Cli;

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) async fn run_cli(cli: Cli) -> Result<()> {
    let tracker = GithubApiClient::new(GithubApiConfig {
        api_base: cli.github_api_base.clone(),
        token: cli.github_token.clone(),
        repository_url: cli.repository.clone(),
        request_timeout_ms: cli.request_timeout_ms,
    })
    .context("failed to create github client")?;
    tracing::info!(
        repo = %tracker.repo().as_slug(),
        bot = %cli.bot_login,
        "starting issue responder"
    );

    ensure_cloned(&cli.repository, &cli.workspace_dir)
        .await
        .context("failed to prepare repository snapshot")?;
    let tree = render_tree(&cli.workspace_dir).context("failed to render repository tree")?;
    tracing::info!("file tree for {}:\n{tree}", cli.workspace_dir.display());

    let processor = Arc::new(build_task_processor(&cli, Arc::new(tracker))?);

    match cli.listen_port {
        Some(port) => {
            let state = Arc::new(ServerState {
                processor,
                version: SERVICE_VERSION.to_string(),
            });
            run_server(SocketAddr::from(([0, 0, 0, 0], port)), state).await
        }
        None => {
            let interval = Duration::from_secs(cli.polling_minutes.saturating_mul(60));
            run_polling_loop(&processor, interval).await
        }
    }
}

fn build_task_processor(cli: &Cli, tracker: Arc<GithubApiClient>) -> Result<TaskProcessor> {
    let llm = OpenAiClient::new(OpenAiConfig {
        api_base: cli.openai_api_base.clone(),
        api_key: cli.openai_api_key.clone(),
        request_timeout_ms: cli.request_timeout_ms,
    })
    .context("failed to create chat-completion client")?;

    let rules = load_rules(&rules_path(cli))?;
    let replies = ReplyGenerator::new(
        Arc::new(llm),
        ReplyGeneratorConfig {
            model: cli.model.clone(),
            bot_login: cli.bot_login.clone(),
            workspace_dir: cli.workspace_dir.clone(),
            rules,
        },
    );

    let processor = TaskProcessor::new(tracker, replies);
    if cli.single_flight {
        tracing::info!("single-flight issue guard enabled");
        return Ok(processor.with_flight_guard(IssueFlightGuard::new()));
    }
    Ok(processor)
}

fn rules_path(cli: &Cli) -> PathBuf {
    resolve_rules_path(&cli.workspace_dir, &cli.rules_file)
}
