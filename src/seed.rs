use crate::validation::MovieInput;

/// The starter collection inserted into an empty database.
pub fn seed_movies() -> Vec<MovieInput> {
    vec![
        movie(
            "The Dark Knight",
            2008,
            "When the menace known as the Joker wreaks havoc and chaos on Gotham, Batman must accept one of the greatest psychological and moral tests of his ability to fight injustice.",
            10.0,
            1,
            "Heath Ledger's Joker redefined comic book villains. Dark, intense, and unforgettable.",
            "/static/img/the_dark_knight.jpg",
        ),
        movie(
            "Inception",
            2010,
            "A skilled thief is given a chance at redemption if he can successfully perform an inception — planting an idea into a target's subconscious.",
            8.5,
            5,
            "Mind-bending and visually stunning. A masterpiece by Nolan.",
            "/static/img/inception.jpg",
        ),
        movie(
            "Interstellar",
            2014,
            "A team of explorers travel through a wormhole in space in an attempt to ensure humanity's survival.",
            9.2,
            3,
            "Emotionally powerful and scientifically ambitious.",
            "/static/img/interstellar.jpg",
        ),
        movie(
            "The Shawshank Redemption",
            1994,
            "Two imprisoned men bond over years, finding solace and redemption through acts of common decency.",
            9.5,
            2,
            "A timeless story of hope and humanity.",
            "/static/img/the_shawshank_redemption.jpg",
        ),
        movie(
            "The Godfather",
            1972,
            "The aging patriarch of an organized crime dynasty transfers control to his reluctant son.",
            9.0,
            4,
            "Flawless acting and storytelling. A cinematic legend.",
            "/static/img/the_godfather.jpg",
        ),
    ]
}

fn movie(
    title: &str,
    year: i32,
    description: &str,
    rating: f64,
    ranking: i32,
    review: &str,
    img_url: &str,
) -> MovieInput {
    MovieInput {
        title: title.to_string(),
        year,
        description: description.to_string(),
        rating,
        ranking,
        review: review.to_string(),
        img_url: img_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[test]
    fn seed_movies_satisfy_constraints() {
        for m in seed_movies() {
            assert!(m.validate().is_ok(), "{} fails validation", m.title);
        }
    }

    #[test]
    fn seed_rankings_are_distinct() {
        let mut rankings: Vec<_> = seed_movies().iter().map(|m| m.ranking).collect();
        rankings.sort();
        assert_eq!(rankings, [1, 2, 3, 4, 5]);
    }
}
