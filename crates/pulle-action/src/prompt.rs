/// Builds the image prompt from the item's title and body.
///
/// With an artist the prompt is `A work in the style of {artist} {title}.
/// {body}`; without one it is `{title}. {body}`. The text is sent as-is,
/// length limits are the image API's to enforce.
pub fn build_prompt(title: &str, body: &str, artist: Option<&str>) -> String {
    match artist {
        Some(artist) => format!("A work in the style of {artist} {title}. {body}"),
        None => format!("{title}. {body}"),
    }
}
