//! Cast and crew records.

use serde::{Deserialize, Serialize};

use super::movie::Movie;

/// Cast and crew of a single movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieCredits {
    pub id: i64,
    pub cast: Vec<Cast>,
    pub crew: Vec<Crew>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cast {
    pub id: i64,
    pub adult: bool,
    pub gender: i32,
    pub known_for_department: String,
    pub name: String,
    pub original_name: String,
    pub popularity: f64,
    pub profile_path: Option<String>,
    pub cast_id: i64,
    pub character: String,
    pub credit_id: String,
    pub order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Crew {
    pub id: i64,
    pub adult: bool,
    pub gender: i32,
    pub known_for_department: String,
    pub name: String,
    pub original_name: String,
    pub popularity: f64,
    pub profile_path: Option<String>,
    pub credit_id: String,
    pub department: String,
    pub job: String,
}

/// Movies a person acted in or worked on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonMovieCredits {
    pub id: i64,
    pub cast: Vec<Movie>,
    pub crew: Vec<Movie>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_person_movie_credits_ignore_credit_specific_fields() {
        let credits: PersonMovieCredits = serde_json::from_value(json!({
            "id": 3084,
            "cast": [{ "id": 238, "title": "The Godfather", "character": "Don Vito Corleone" }],
            "crew": []
        }))
        .unwrap();

        assert_eq!(credits.id, 3084);
        assert_eq!(credits.cast[0].title, "The Godfather");
        assert!(credits.crew.is_empty());
    }
}
