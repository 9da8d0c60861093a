//! Display helpers for image CDN paths, video keys and ratings.
//!
//! Catalog records only carry relative image paths such as `/abc.jpg`.
//! These helpers expand them to absolute URLs at a fixed rendition width.
//! A missing path yields an empty string so callers can render a
//! placeholder without branching.

/// Base URL of the image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Base URL for YouTube-hosted videos.
pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

fn image_url(size: &str, path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() => {
            format!("{IMAGE_BASE_URL}/{size}/{}", path.trim_start_matches('/'))
        }
        _ => String::new(),
    }
}

pub fn poster_url(path: Option<&str>) -> String {
    image_url("w342", path)
}

pub fn poster_original_url(path: Option<&str>) -> String {
    image_url("original", path)
}

pub fn backdrop_url(path: Option<&str>) -> String {
    image_url("w1280", path)
}

/// Smaller backdrop rendition used for list cards.
pub fn backdrop_small_url(path: Option<&str>) -> String {
    image_url("w780", path)
}

pub fn profile_url(path: Option<&str>) -> String {
    image_url("w185", path)
}

pub fn profile_original_url(path: Option<&str>) -> String {
    image_url("original", path)
}

/// Watch URL for a YouTube video key.
pub fn video_url(key: &str) -> String {
    format!("{YOUTUBE_WATCH_URL}{key}")
}

/// Format a vote average with one decimal place, empty when absent.
pub fn format_rating(rating: Option<f64>) -> String {
    rating.map_or_else(String::new, |r| format!("{r:.1}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_url() {
        assert_eq!(
            poster_url(Some("/3bhkrj58Vtu7enYsRolD1fZdja1.jpg")),
            "https://image.tmdb.org/t/p/w342/3bhkrj58Vtu7enYsRolD1fZdja1.jpg"
        );
    }

    #[test]
    fn test_missing_path_is_empty() {
        assert_eq!(poster_url(None), "");
        assert_eq!(backdrop_url(Some("")), "");
        assert_eq!(profile_original_url(None), "");
    }

    #[test]
    fn test_rendition_sizes() {
        assert!(backdrop_url(Some("/b.jpg")).contains("/w1280/"));
        assert!(backdrop_small_url(Some("/b.jpg")).contains("/w780/"));
        assert!(profile_url(Some("/p.jpg")).contains("/w185/"));
        assert!(poster_original_url(Some("/p.jpg")).contains("/original/"));
    }

    #[test]
    fn test_video_url() {
        assert_eq!(
            video_url("sY1S34973zA"),
            "https://www.youtube.com/watch?v=sY1S34973zA"
        );
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(Some(8.712)), "8.7");
        assert_eq!(format_rating(Some(7.0)), "7.0");
        assert_eq!(format_rating(None), "");
    }
}
