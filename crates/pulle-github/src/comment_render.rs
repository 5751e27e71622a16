use crate::comment_marker::HIDDEN_IMAGE_MARKER;

/// Renders the comment body for a generated image.
///
/// The body starts with the hidden marker and always ends with the italic
/// attribution line; `comment_marker` relies on both.
pub fn render_image_comment(image_url: &str, artist: Option<&str>) -> String {
    let attribution = match artist {
        Some(artist) => format!("In the style of {artist}, generated with PULL-E"),
        None => "Generated with PULL-E".to_string(),
    };
    format!("{HIDDEN_IMAGE_MARKER}\n![Generated Image]({image_url})\n*{attribution}*")
}
