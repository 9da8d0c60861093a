//! Domain types for the movie catalog.
//!
//! Catalog records are immutable values deserialized from remote responses.
//! They carry no identity beyond their source `id` field and are never
//! mutated after construction.

mod credits;
pub mod image_urls;
mod language;
mod media;
mod movie;
mod person;
mod search_keyword;

pub use credits::{Cast, Crew, MovieCredits, PersonMovieCredits};
pub use language::LanguageTag;
pub use media::{ImageInfo, MovieImages, MovieVideos, PersonImages, ProfileImage, Video};
pub use movie::{
    BelongsToCollection, Dates, Genre, Movie, MovieDetail, MovieList, ProductionCompany,
    ProductionCountry, SpokenLanguage,
};
pub use person::PersonDetail;
pub use search_keyword::{NewSearchKeyword, SearchKeyword};
