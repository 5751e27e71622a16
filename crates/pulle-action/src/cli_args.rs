use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use pulle_github::RepoRef;

use crate::event_context::EventKind;

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
    name = "pull-e",
    about = "Posts an AI-generated illustration as a comment on new pull requests and issues",
    version
)]
/// Public struct `Cli` used across PULL-E components.
pub struct Cli {
    #[arg(
        long = "openai-api-token",
        env = "INPUT_OPENAI-API-TOKEN",
        help = "API token for the image-generation endpoint"
    )]
    pub openai_api_token: String,

    #[arg(
        long = "github-token",
        env = "INPUT_GITHUB-TOKEN",
        help = "GitHub token used to list and create comments"
    )]
    pub github_token: String,

    #[arg(
        long = "without-style",
        env = "INPUT_WITHOUT-STYLE",
        help = "Set to the literal string 'true' to disable the artist style prefix"
    )]
    pub without_style: Option<String>,

    #[arg(
        long = "event-name",
        env = "GITHUB_EVENT_NAME",
        help = "Name of the triggering event; only pull_request and issues are supported"
    )]
    pub event_name: String,

    #[arg(
        long = "event-path",
        env = "GITHUB_EVENT_PATH",
        help = "Path to the JSON payload of the triggering event"
    )]
    pub event_path: PathBuf,

    #[arg(
        long = "repository",
        env = "GITHUB_REPOSITORY",
        help = "Repository slug in owner/repo form"
    )]
    pub repository: String,

    #[arg(
        long = "github-api-base",
        env = "GITHUB_API_URL",
        default_value = "https://api.github.com",
        help = "Base URL for the GitHub REST API"
    )]
    pub github_api_base: String,

    #[arg(
        long = "openai-api-base",
        env = "PULLE_OPENAI_API_BASE",
        default_value = "https://api.openai.com/v1",
        help = "Base URL for the image-generation API"
    )]
    pub openai_api_base: String,

    #[arg(
        long = "request-timeout-ms",
        env = "PULLE_REQUEST_TIMEOUT_MS",
        default_value_t = 30_000,
        value_parser = parse_positive_u64,
        help = "Per-request timeout for outbound HTTP calls"
    )]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone)]
/// Resolved, validated configuration passed into the pipeline entry point.
pub struct ActionConfig {
    pub openai_api_token: String,
    pub github_token: String,
    pub use_style: bool,
    pub event_kind: EventKind,
    pub event_path: PathBuf,
    pub repo: RepoRef,
    pub github_api_base: String,
    pub openai_api_base: String,
    pub request_timeout_ms: u64,
}

impl ActionConfig {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        if cli.openai_api_token.trim().is_empty() {
            bail!("unable to resolve the openai-api-token input");
        }
        if cli.github_token.trim().is_empty() {
            bail!("unable to resolve the github-token input");
        }

        let Some(event_kind) = EventKind::parse(&cli.event_name) else {
            bail!(
                "this action only supports pull_request and issues events, got '{}'",
                cli.event_name
            );
        };

        let repo = parse_repository_slug(&cli.repository)?;
        let use_style = cli.without_style.as_deref().map(str::trim) != Some("true");

        Ok(Self {
            openai_api_token: cli.openai_api_token,
            github_token: cli.github_token,
            use_style,
            event_kind,
            event_path: cli.event_path,
            repo,
            github_api_base: cli.github_api_base,
            openai_api_base: cli.openai_api_base,
            request_timeout_ms: cli.request_timeout_ms,
        })
    }
}

fn parse_repository_slug(slug: &str) -> Result<RepoRef> {
    let mut parts = slug.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(RepoRef {
            owner: owner.to_string(),
            name: name.to_string(),
        }),
        _ => bail!("invalid repository slug '{slug}', expected owner/repo"),
    }
}
