use crate::github_api_client::GithubIssueComment;

/// Hidden marker embedded in every comment this action posts.
pub const HIDDEN_IMAGE_MARKER: &str = "<!-- pull-e:image -->";
/// Trailing attribution text used by older PULL-E versions, matched
/// case-insensitively.
pub const LEGACY_TEXT_MARKER: &str = "generated with pull-e";

/// Returns true when `body` was written by a PULL-E run.
///
/// The hidden HTML marker is authoritative for comments posted by this
/// version. The legacy suffix check folds case and strips trailing markdown
/// emphasis and whitespace first, so `*... generated with PULL-E*` footers
/// are recognized too.
pub fn is_pulle_comment(body: &str) -> bool {
    if body.contains(HIDDEN_IMAGE_MARKER) {
        return true;
    }
    let folded = body.to_lowercase();
    folded
        .trim_end()
        .trim_end_matches('*')
        .trim_end()
        .ends_with(LEGACY_TEXT_MARKER)
}

/// Scans the ordered comment sequence for a prior PULL-E comment.
pub fn find_existing_pulle_comment(
    comments: &[GithubIssueComment],
) -> Option<&GithubIssueComment> {
    comments
        .iter()
        .find(|comment| is_pulle_comment(comment.body.as_deref().unwrap_or_default()))
}
