use std::{borrow::Cow, sync::OnceLock};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rust_embed::RustEmbed;

/// Embed the entire `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();
static TAILWIND_CSS: OnceLock<String> = OnceLock::new();
static FAVICON_DATA_URI: OnceLock<String> = OnceLock::new();

/// Returns the contents of `assets/main.css` as a static string.
pub fn main_css() -> &'static str {
    MAIN_CSS
        .get_or_init(|| load_text("/assets/main.css"))
        .as_str()
}

/// Returns the contents of `assets/tailwind.css` as a static string.
pub fn tailwind_css() -> &'static str {
    TAILWIND_CSS
        .get_or_init(|| load_text("/assets/tailwind.css"))
        .as_str()
}

/// Returns a data URI for the favicon.
pub fn favicon_data_uri() -> &'static str {
    FAVICON_DATA_URI
        .get_or_init(|| load_data_uri("/assets/favicon.svg"))
        .as_str()
}

fn load_text(path: &str) -> String {
    let asset = load_asset(path);
    String::from_utf8_lossy(asset.as_ref()).into_owned()
}

fn load_data_uri(path: &str) -> String {
    let asset = load_asset(path);
    let mime = guess_mime(path);
    let encoded = STANDARD.encode(asset.as_ref());
    format!("data:{mime};base64,{encoded}")
}

fn load_asset(path: &str) -> Cow<'static, [u8]> {
    let canonical = canonical_asset_path(path);
    match EmbeddedAssets::get(&canonical) {
        Some(file) => file.data,
        None => {
            tracing::error!("missing embedded asset: {path}");
            Cow::Borrowed(&[])
        }
    }
}

fn canonical_asset_path(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    if let Some(rest) = trimmed.strip_prefix("assets/") {
        rest.to_string()
    } else {
        trimmed.to_string()
    }
}

fn guess_mime(path: &str) -> &'static str {
    if path.ends_with(".css") {
        "text/css"
    } else if path.ends_with(".svg") {
        "image/svg+xml"
    } else if path.ends_with(".ico") {
        "image/x-icon"
    } else if path.ends_with(".png") {
        "image/png"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheets_are_embedded() {
        assert!(main_css().contains(".app-shell"));
        assert!(!tailwind_css().is_empty());
    }

    #[test]
    fn favicon_is_base64_svg() {
        let uri = favicon_data_uri();
        let encoded = uri
            .strip_prefix("data:image/svg+xml;base64,")
            .expect("svg data uri");
        let decoded = STANDARD.decode(encoded).unwrap();
        assert!(String::from_utf8(decoded).unwrap().contains("<svg"));
    }

    #[test]
    fn asset_paths_are_canonicalised() {
        assert_eq!(canonical_asset_path("/assets/main.css"), "main.css");
        assert_eq!(canonical_asset_path("favicon.svg"), "favicon.svg");
        assert!(load_asset("/assets/nope.txt").is_empty());
    }
}
