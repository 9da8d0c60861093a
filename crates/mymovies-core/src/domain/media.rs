//! Image and video records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieImages {
    pub id: i64,
    pub backdrops: Vec<ImageInfo>,
    pub logos: Vec<ImageInfo>,
    pub posters: Vec<ImageInfo>,
}

/// Metadata of one image file on the image CDN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageInfo {
    pub aspect_ratio: f64,
    pub height: u32,
    pub iso_639_1: Option<String>,
    pub file_path: String,
    pub vote_average: f64,
    pub vote_count: i64,
    pub width: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieVideos {
    pub id: i64,
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    pub id: String,
    pub iso_639_1: String,
    pub iso_3166_1: String,
    pub name: String,
    /// Site-specific video key (a YouTube video id when `site` is `YouTube`).
    pub key: String,
    pub site: String,
    pub size: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub official: bool,
    pub published_at: String,
}

impl Video {
    /// Whether the video is hosted on YouTube.
    pub fn is_youtube(&self) -> bool {
        self.site.eq_ignore_ascii_case("youtube")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonImages {
    pub id: i64,
    pub profiles: Vec<ProfileImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileImage {
    pub aspect_ratio: f64,
    pub height: u32,
    pub iso_639_1: Option<String>,
    pub file_path: String,
    pub vote_average: f64,
    pub vote_count: i64,
    pub width: u32,
}
