use serde::{Deserialize, Deserializer, Serialize};

const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/300x450?text=";

/// A movie as returned by the recommendation backend. Never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub rating: f64, // 0.0-5.0
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<String>,
    #[serde(default, deserialize_with = "display_string", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "display_string", skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    // The two front ends disagreed on the field name
    #[serde(default, alias = "overview", deserialize_with = "display_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        rename = "releaseDate",
        deserialize_with = "display_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "display_string", skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
}

impl Movie {
    pub fn new(id: u64, title: impl Into<String>, rating: f64) -> Self {
        Self {
            id,
            title: title.into(),
            rating,
            genres: Vec::new(),
            poster: None,
            backdrop: None,
            year: None,
            runtime: None,
            description: None,
            release_date: None,
            cast: None,
            popularity: None,
        }
    }

    /// Rating with exactly one decimal place, e.g. `4.5`.
    pub fn rating_display(&self) -> String {
        format!("{:.1}", self.rating)
    }

    /// Rating mapped onto a 0-100 "match" score.
    pub fn match_percent(&self) -> u8 {
        (self.rating * 20.0).round().clamp(0.0, 100.0) as u8
    }

    pub fn genres_display(&self) -> String {
        self.genres.join(", ")
    }

    pub fn poster_or_placeholder(&self) -> String {
        match &self.poster {
            Some(poster) if !poster.is_empty() => poster.clone(),
            _ => format!("{}{}", PLACEHOLDER_POSTER, urlencoding::encode(&self.title)),
        }
    }

    /// Backdrop, then poster, then nothing.
    pub fn banner_image(&self) -> Option<&str> {
        self.backdrop
            .as_deref()
            .or(self.poster.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// Accepts strings or numbers for display-only fields; empty strings become `None`.
fn display_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_display_one_decimal() {
        assert_eq!(Movie::new(1, "The Matrix", 4.5).rating_display(), "4.5");
        assert_eq!(Movie::new(2, "Dune", 4.0).rating_display(), "4.0");
        assert_eq!(Movie::new(3, "Heat", 3.96).rating_display(), "4.0");
    }

    #[test]
    fn test_match_percent() {
        assert_eq!(Movie::new(1, "Inception", 4.8).match_percent(), 96);
        assert_eq!(Movie::new(2, "Unrated", 0.0).match_percent(), 0);
    }

    #[test]
    fn test_deserialize_cinescope_shape() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "rating": 4.1,
            "genres": ["Action", "Science Fiction"],
            "poster": null,
            "year": "2010",
            "overview": "Cobb steals secrets.",
            "runtime": "148min",
            "releaseDate": "2010-07-14"
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.poster, None);
        assert_eq!(movie.year.as_deref(), Some("2010"));
        assert_eq!(movie.description.as_deref(), Some("Cobb steals secrets."));
        assert_eq!(movie.release_date.as_deref(), Some("2010-07-14"));
    }

    #[test]
    fn test_deserialize_empty_strings_and_missing_fields() {
        let json = r#"{"id": 5, "title": "Obscure", "year": "", "runtime": "", "releaseDate": ""}"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.year, None);
        assert_eq!(movie.runtime, None);
        assert_eq!(movie.release_date, None);
        assert!(movie.genres.is_empty());
        assert_eq!(movie.rating, 0.0);
    }

    #[test]
    fn test_numeric_year_is_accepted() {
        let movie: Movie = serde_json::from_str(r#"{"id": 1, "title": "Alien", "year": 1979}"#).unwrap();
        assert_eq!(movie.year.as_deref(), Some("1979"));
    }

    #[test]
    fn test_poster_placeholder_encodes_title() {
        let movie = Movie::new(8, "The Shawshank Redemption", 4.9);
        assert_eq!(
            movie.poster_or_placeholder(),
            "https://via.placeholder.com/300x450?text=The%20Shawshank%20Redemption"
        );
    }

    #[test]
    fn test_banner_prefers_backdrop() {
        let mut movie = Movie::new(1, "The Matrix", 4.5);
        assert_eq!(movie.banner_image(), None);
        movie.poster = Some("poster.jpg".to_string());
        assert_eq!(movie.banner_image(), Some("poster.jpg"));
        movie.backdrop = Some("backdrop.jpg".to_string());
        assert_eq!(movie.banner_image(), Some("backdrop.jpg"));
    }
}
