use anyhow::{bail, Context, Result};
use rand::Rng;

use pulle_github::{find_existing_pulle_comment, render_image_comment, GithubApiClient};
use pulle_openai::{ImagesClient, ImagesConfig};

use crate::artists;
use crate::cli_args::ActionConfig;
use crate::event_context::load_event_context;
use crate::prompt::build_prompt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Terminal state of a successful run.
pub enum RunOutcome {
    /// A prior PULL-E comment exists; nothing was generated or posted.
    SkippedExistingComment,
    /// A new comment was posted with the generated image.
    Commented { comment_id: u64, image_url: String },
}

/// Runs the whole pipeline once: resolve the event, guard against a
/// duplicate comment, generate an image, post it.
pub async fn run<R: Rng>(config: &ActionConfig, rng: &mut R) -> Result<RunOutcome> {
    let context = load_event_context(&config.event_path, config.event_kind)
        .context("failed to resolve event context")?;
    tracing::debug!(
        event = context.kind.as_str(),
        issue_number = context.issue_number,
        title = context.title.as_str(),
        "resolved event context"
    );

    let github = GithubApiClient::new(
        config.github_api_base.clone(),
        config.github_token.clone(),
        config.repo.clone(),
        config.request_timeout_ms,
    )
    .context("failed to create github api client")?;

    let comments = github
        .list_issue_comments(context.issue_number)
        .await
        .context("failed to list existing comments")?;
    if let Some(existing) = find_existing_pulle_comment(&comments) {
        tracing::info!(
            issue_number = context.issue_number,
            comment_id = existing.id,
            "PULL-E comment already exists, skipping"
        );
        return Ok(RunOutcome::SkippedExistingComment);
    }

    let artist = config.use_style.then(|| artists::pick(rng));
    let prompt = build_prompt(&context.title, &context.body, artist);
    tracing::debug!(prompt = prompt.as_str(), "generating image");

    let images = ImagesClient::new(ImagesConfig {
        api_base: config.openai_api_base.clone(),
        api_key: config.openai_api_token.clone(),
        request_timeout_ms: config.request_timeout_ms,
    })
    .context("failed to create image api client")?;

    let image_url = images
        .generate(&prompt)
        .await
        .context("image generation request failed")?;
    let Some(image_url) = image_url else {
        bail!("image generation response did not contain an image url");
    };
    tracing::debug!(image_url = image_url.as_str(), "image generated");

    let body = render_image_comment(&image_url, artist);
    let created = github
        .create_issue_comment(context.issue_number, &body)
        .await
        .context("failed to create issue comment")?;
    tracing::info!(
        issue_number = context.issue_number,
        comment_id = created.id,
        "posted generated image comment"
    );

    Ok(RunOutcome::Commented {
        comment_id: created.id,
        image_url,
    })
}
