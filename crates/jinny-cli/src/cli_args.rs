use std::path::PathBuf;

use clap::{ArgAction, Parser};
use jinny_ai::DEFAULT_OPENAI_API_BASE;
use jinny_github_issues::DEFAULT_GITHUB_API_BASE;
use jinny_runtime::DEFAULT_CHAT_MODEL;

fn parse_non_empty(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("value must not be empty".to_string());
    }
    Ok(trimmed.to_string())
}

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "jinny",
    about = "Answers GitHub issues assigned to a bot account with chat-model replies",
    version
)]
pub(crate) struct Cli {
    #[arg(
        long = "github-token",
        env = "PROJECT_ACCOUNT_API_KEY",
        hide_env_values = true,
        value_parser = parse_non_empty,
        help = "GitHub token used as the bearer credential for issue and comment calls"
    )]
    pub(crate) github_token: String,

    #[arg(
        long = "repository",
        env = "PROJECT_REPOSITORY",
        value_parser = parse_non_empty,
        help = "Repository URL in https://github.com/<owner>/<repo>[.git] form"
    )]
    pub(crate) repository: String,

    #[arg(
        long = "bot-login",
        env = "PROJECT_USER",
        default_value = "JinnyAssistant",
        value_parser = parse_non_empty,
        help = "Bot account login used for the assignee filter and authorship checks"
    )]
    pub(crate) bot_login: String,

    #[arg(
        long = "openai-api-key",
        env = "OPENAI_API_KEY",
        hide_env_values = true,
        value_parser = parse_non_empty,
        help = "API key for the chat-completion endpoint"
    )]
    pub(crate) openai_api_key: String,

    #[arg(
        long = "listen-port",
        env = "LISTEN_PORT_FOR_EVENTS",
        help = "Serve GET / and GET /api/notify on this port instead of polling"
    )]
    pub(crate) listen_port: Option<u16>,

    #[arg(
        long = "polling-minutes",
        env = "POLLING_TIME",
        default_value_t = 5,
        value_parser = parse_positive_u64,
        help = "Minutes to sleep between polling cycles"
    )]
    pub(crate) polling_minutes: u64,

    #[arg(
        long = "workspace-dir",
        env = "JINNY_WORKSPACE_DIR",
        default_value = "/opt/project",
        help = "Directory the repository is cloned into when absent"
    )]
    pub(crate) workspace_dir: PathBuf,

    #[arg(
        long = "rules-file",
        env = "JINNY_RULES_FILE",
        default_value = "rules.txt",
        help = "Rules file of 'role: content' lines, relative to the workspace dir"
    )]
    pub(crate) rules_file: PathBuf,

    #[arg(
        long,
        env = "JINNY_MODEL",
        default_value = DEFAULT_CHAT_MODEL,
        value_parser = parse_non_empty,
        help = "Chat model identifier"
    )]
    pub(crate) model: String,

    #[arg(
        long = "openai-api-base",
        env = "JINNY_OPENAI_API_BASE",
        default_value = DEFAULT_OPENAI_API_BASE,
        help = "Base URL of the chat-completion API"
    )]
    pub(crate) openai_api_base: String,

    #[arg(
        long = "github-api-base",
        env = "JINNY_GITHUB_API_BASE",
        default_value = DEFAULT_GITHUB_API_BASE,
        help = "GitHub API base URL"
    )]
    pub(crate) github_api_base: String,

    #[arg(
        long = "request-timeout-ms",
        env = "JINNY_REQUEST_TIMEOUT_MS",
        default_value_t = 120_000,
        value_parser = parse_positive_u64,
        help = "Timeout applied to every outbound GitHub and chat-completion request"
    )]
    pub(crate) request_timeout_ms: u64,

    #[arg(
        long = "single-flight",
        env = "JINNY_SINGLE_FLIGHT",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Skip issues that an overlapping processing cycle is already answering"
    )]
    pub(crate) single_flight: bool,
}
