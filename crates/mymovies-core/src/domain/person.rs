use serde::{Deserialize, Serialize};

/// Biography and vital data of a person.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonDetail {
    pub id: i64,
    pub adult: bool,
    pub also_known_as: Vec<String>,
    pub biography: String,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub gender: i32,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    pub known_for_department: String,
    pub name: String,
    pub place_of_birth: Option<String>,
    pub popularity: f64,
    pub profile_path: Option<String>,
}
