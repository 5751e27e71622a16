use std::io::Write;
use std::path::{Path, PathBuf};

use httpmock::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tempfile::NamedTempFile;

use pulle_action::artists;
use pulle_action::cli_args::{ActionConfig, Cli};
use pulle_action::pipeline::{run, RunOutcome};
use pulle_github::render_image_comment;

const IMAGE_URL: &str = "https://img.example/generated.png";

fn write_event_payload(payload: serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file should be created");
    write!(file, "{payload}").expect("payload should be written");
    file
}

fn config_for(
    github: &MockServer,
    openai: &MockServer,
    event_name: &str,
    event_path: &Path,
    without_style: Option<&str>,
) -> ActionConfig {
    ActionConfig::from_cli(Cli {
        openai_api_token: "test-openai-key".to_string(),
        github_token: "test-github-token".to_string(),
        without_style: without_style.map(ToOwned::to_owned),
        event_name: event_name.to_string(),
        event_path: event_path.to_path_buf(),
        repository: "octocat/hello-world".to_string(),
        github_api_base: github.base_url(),
        openai_api_base: format!("{}/v1", openai.base_url()),
        request_timeout_ms: 5_000,
    })
    .expect("config should resolve")
}

#[tokio::test]
async fn fresh_pull_request_posts_image_comment() {
    let github = MockServer::start();
    let openai = MockServer::start();
    let event = write_event_payload(json!({
        "action": "opened",
        "pull_request": {"number": 7, "title": "Fix bug", "body": "details"}
    }));

    let list_mock = github.mock(|when, then| {
        when.method(GET)
            .path("/repos/octocat/hello-world/issues/7/comments");
        then.status(200).json_body(json!([]));
    });
    let generate_mock = openai.mock(|when, then| {
        when.method(POST)
            .path("/v1/images/generations")
            .header("authorization", "Bearer test-openai-key")
            .json_body(json!({
                "prompt": "Fix bug. details",
                "n": 1,
                "response_format": "url",
                "size": "1024x1024"
            }));
        then.status(200)
            .json_body(json!({"data": [{"url": IMAGE_URL}]}));
    });
    let create_mock = github.mock(|when, then| {
        when.method(POST)
            .path("/repos/octocat/hello-world/issues/7/comments")
            .json_body(json!({"body": render_image_comment(IMAGE_URL, None)}));
        then.status(201).json_body(json!({"id": 99, "html_url": null}));
    });

    let config = config_for(&github, &openai, "pull_request", event.path(), Some("true"));
    let mut rng = StdRng::seed_from_u64(7);
    let outcome = run(&config, &mut rng).await.expect("run should succeed");

    list_mock.assert();
    generate_mock.assert();
    create_mock.assert();
    assert_eq!(
        outcome,
        RunOutcome::Commented {
            comment_id: 99,
            image_url: IMAGE_URL.to_string(),
        }
    );
}

#[tokio::test]
async fn integration_style_enabled_run_prefixes_prompt_and_attribution() {
    let github = MockServer::start();
    let openai = MockServer::start();
    let event = write_event_payload(json!({
        "action": "opened",
        "pull_request": {"number": 7, "title": "Fix bug", "body": "details"}
    }));

    // Same seed as the pipeline run, so the expected artist is known up front.
    let expected_artist = artists::pick(&mut StdRng::seed_from_u64(11));

    github.mock(|when, then| {
        when.method(GET)
            .path("/repos/octocat/hello-world/issues/7/comments");
        then.status(200).json_body(json!([]));
    });
    let generate_mock = openai.mock(|when, then| {
        when.method(POST).path("/v1/images/generations").json_body(json!({
            "prompt": format!("A work in the style of {expected_artist} Fix bug. details"),
            "n": 1,
            "response_format": "url",
            "size": "1024x1024"
        }));
        then.status(200)
            .json_body(json!({"data": [{"url": IMAGE_URL}]}));
    });
    let create_mock = github.mock(|when, then| {
        when.method(POST)
            .path("/repos/octocat/hello-world/issues/7/comments")
            .json_body(json!({"body": render_image_comment(IMAGE_URL, Some(expected_artist))}));
        then.status(201).json_body(json!({"id": 100, "html_url": null}));
    });

    let config = config_for(&github, &openai, "pull_request", event.path(), None);
    let mut rng = StdRng::seed_from_u64(11);
    let outcome = run(&config, &mut rng).await.expect("run should succeed");

    generate_mock.assert();
    create_mock.assert();
    assert!(matches!(outcome, RunOutcome::Commented { .. }));
}

#[tokio::test]
async fn integration_existing_marker_comment_short_circuits() {
    let github = MockServer::start();
    let openai = MockServer::start();
    let event = write_event_payload(json!({
        "action": "opened",
        "pull_request": {"number": 7, "title": "Fix bug", "body": "details"}
    }));

    github.mock(|when, then| {
        when.method(GET)
            .path("/repos/octocat/hello-world/issues/7/comments");
        then.status(200).json_body(json!([
            {"id": 1, "body": "looks good to me", "user": {"login": "octocat"}},
            {
                "id": 2,
                "body": "![Generated Image](https://img.example/old.png)\n*Generated with PULL-E*",
                "user": {"login": "github-actions[bot]"}
            }
        ]));
    });
    let generate_mock = openai.mock(|when, then| {
        when.method(POST).path("/v1/images/generations");
        then.status(200)
            .json_body(json!({"data": [{"url": IMAGE_URL}]}));
    });
    let create_mock = github.mock(|when, then| {
        when.method(POST)
            .path("/repos/octocat/hello-world/issues/7/comments");
        then.status(201).json_body(json!({"id": 99, "html_url": null}));
    });

    let config = config_for(&github, &openai, "pull_request", event.path(), None);
    let mut rng = StdRng::seed_from_u64(7);
    let outcome = run(&config, &mut rng).await.expect("run should succeed");

    assert_eq!(outcome, RunOutcome::SkippedExistingComment);
    generate_mock.assert_calls(0);
    create_mock.assert_calls(0);
}

#[tokio::test]
async fn integration_missing_image_url_fails_without_posting() {
    let github = MockServer::start();
    let openai = MockServer::start();
    let event = write_event_payload(json!({
        "action": "opened",
        "issue": {"number": 5, "title": "Crash on start", "body": null}
    }));

    github.mock(|when, then| {
        when.method(GET)
            .path("/repos/octocat/hello-world/issues/5/comments");
        then.status(200).json_body(json!([]));
    });
    openai.mock(|when, then| {
        when.method(POST).path("/v1/images/generations");
        then.status(200).json_body(json!({"data": []}));
    });
    let create_mock = github.mock(|when, then| {
        when.method(POST)
            .path("/repos/octocat/hello-world/issues/5/comments");
        then.status(201).json_body(json!({"id": 99, "html_url": null}));
    });

    let config = config_for(&github, &openai, "issues", event.path(), None);
    let mut rng = StdRng::seed_from_u64(7);
    let error = run(&config, &mut rng)
        .await
        .expect_err("urlless generation must fail the run");

    assert!(error
        .to_string()
        .contains("did not contain an image url"));
    create_mock.assert_calls(0);
}

#[test]
fn unsupported_event_fails_before_any_http_call() {
    let error = ActionConfig::from_cli(Cli {
        openai_api_token: "test-openai-key".to_string(),
        github_token: "test-github-token".to_string(),
        without_style: None,
        event_name: "push".to_string(),
        event_path: PathBuf::from("/tmp/event.json"),
        repository: "octocat/hello-world".to_string(),
        github_api_base: "https://api.github.com".to_string(),
        openai_api_base: "https://api.openai.com/v1".to_string(),
        request_timeout_ms: 5_000,
    })
    .expect_err("push must be rejected before any client is built");
    assert!(error
        .to_string()
        .contains("only supports pull_request and issues"));
}
