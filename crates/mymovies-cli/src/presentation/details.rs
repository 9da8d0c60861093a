//! Movie and person detail pages.

use mymovies_core::domain::image_urls::{format_rating, poster_url, profile_url, video_url};
use mymovies_gui::{MovieDetails, PersonDetails};

use super::lists::print_movie_table;
use super::tables::{format_optional, print_separator};

const CAST_SHOWN: usize = 10;

pub fn print_movie_details(details: &MovieDetails) {
    let movie = &details.detail;
    println!("{} ({})", movie.title, movie.id);
    if let Some(tagline) = movie.tagline.as_deref().filter(|t| !t.is_empty()) {
        println!("\"{tagline}\"");
    }
    print_separator(60);
    println!("Released:  {}", movie.release_date);
    println!(
        "Runtime:   {}",
        format_optional(movie.runtime.map(|m| format!("{m} min")).as_ref(), "-")
    );
    println!(
        "Rating:    {} ({} votes)",
        format_rating(Some(movie.vote_average)),
        movie.vote_count
    );
    println!("Genres:    {}", movie.genres_label());
    println!("Languages: {}", movie.spoken_languages_label());
    println!("Poster:    {}", poster_url(movie.poster_path.as_deref()));
    println!();
    println!("{}", movie.overview);
    println!();

    println!("Cast");
    print_separator(60);
    for cast in details.credits.cast.iter().take(CAST_SHOWN) {
        println!("  {:<30} {}", cast.name, cast.character);
    }
    println!();

    println!(
        "Images: {} posters, {} backdrops",
        details.images.posters.len(),
        details.images.backdrops.len()
    );
    let trailers: Vec<_> = details.youtube_videos().collect();
    if !trailers.is_empty() {
        println!("Videos");
        print_separator(60);
        for video in trailers {
            println!("  {:<30} {}", video.name, video_url(&video.key));
        }
    }
}

pub fn print_person_details(person: &PersonDetails) {
    let detail = &person.detail;
    println!("{} ({})", detail.name, detail.id);
    print_separator(60);
    println!("Known for: {}", detail.known_for_department);
    println!(
        "Born:      {} {}",
        format_optional(detail.birthday.as_ref(), "-"),
        format_optional(detail.place_of_birth.as_ref(), "")
    );
    if let Some(deathday) = &detail.deathday {
        println!("Died:      {deathday}");
    }
    println!("Photo:     {}", profile_url(detail.profile_path.as_deref()));
    println!("Photos:    {}", person.images.profiles.len());
    println!();
    if !detail.biography.is_empty() {
        println!("{}", detail.biography);
        println!();
    }
    print_movie_table("Acting", &person.credits.cast);
    if !person.credits.crew.is_empty() {
        print_movie_table("Crew", &person.credits.crew);
    }
}
