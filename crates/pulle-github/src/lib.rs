//! GitHub REST transport and comment helpers for PULL-E.
//! This crate provides the issue-comment API client, the rendered comment
//! body, and the duplicate-marker detection the renderer is coupled to.

pub mod comment_marker;
pub mod comment_render;
pub mod github_api_client;

pub use comment_marker::{find_existing_pulle_comment, is_pulle_comment};
pub use comment_render::render_image_comment;
pub use github_api_client::{
    GithubApiClient, GithubApiError, GithubCommentCreateResponse, GithubIssueComment, GithubUser,
    RepoRef,
};
