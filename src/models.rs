use serde::Deserialize;

use crate::entities::movie;

/// Raw movie form submission. Every field is kept as text so that values
/// which fail to parse can be echoed back to the user unchanged.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MovieForm {
    pub title: String,
    pub year: String,
    pub description: String,
    pub rating: String,
    pub ranking: String,
    pub review: String,
    pub img_url: String,
}

/// A posted movie form together with its anti-forgery token.
#[derive(Debug, Deserialize)]
pub struct MovieSubmission {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(flatten)]
    pub movie: MovieForm,
}

impl From<&movie::Model> for MovieForm {
    fn from(m: &movie::Model) -> Self {
        Self {
            title: m.title.clone(),
            year: m.year.to_string(),
            description: m.description.clone(),
            rating: m.rating.to_string(),
            ranking: m.ranking.to_string(),
            review: m.review.clone(),
            img_url: m.img_url.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Text,
    TextArea,
    Integer,
    Float,
}

/// Form field metadata, in display order.
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

pub const MOVIE_FIELDS: [FieldSpec; 7] = [
    FieldSpec { name: "title", label: "Movie Title", kind: FieldKind::Text },
    FieldSpec { name: "year", label: "Release Year", kind: FieldKind::Integer },
    FieldSpec { name: "description", label: "Description", kind: FieldKind::TextArea },
    FieldSpec { name: "rating", label: "Rating", kind: FieldKind::Float },
    FieldSpec { name: "ranking", label: "Ranking", kind: FieldKind::Integer },
    FieldSpec { name: "review", label: "Review", kind: FieldKind::TextArea },
    FieldSpec { name: "img_url", label: "Image URL", kind: FieldKind::Text },
];

impl MovieForm {
    pub fn value(&self, field: &str) -> &str {
        match field {
            "title" => &self.title,
            "year" => &self.year,
            "description" => &self.description,
            "rating" => &self.rating,
            "ranking" => &self.ranking,
            "review" => &self.review,
            "img_url" => &self.img_url,
            _ => "",
        }
    }
}
