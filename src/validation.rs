use std::borrow::Cow;

use validator::{Validate, ValidationError};

use crate::models::{MOVIE_FIELDS, MovieForm};

pub const EARLIEST_FILM_YEAR: i32 = 1888;
pub const MAX_TEXT_LEN: u64 = 250;

const REQUIRED: &str = "This field is required.";

/// A movie submission that passed every field constraint.
#[derive(Clone, Debug, PartialEq, Validate)]
pub struct MovieInput {
    #[validate(length(max = MAX_TEXT_LEN, message = "Field cannot be longer than 250 characters."))]
    pub title: String,
    #[validate(custom(function = "validate_release_year"))]
    pub year: i32,
    #[validate(length(max = MAX_TEXT_LEN, message = "Field cannot be longer than 250 characters."))]
    pub description: String,
    #[validate(range(min = 0.0, max = 10.0, message = "Rating must be between 0 and 10."))]
    pub rating: f64,
    #[validate(range(min = 1, message = "Ranking must be at least 1."))]
    pub ranking: i32,
    #[validate(length(max = MAX_TEXT_LEN, message = "Field cannot be longer than 250 characters."))]
    pub review: String,
    #[validate(length(max = MAX_TEXT_LEN, message = "Field cannot be longer than 250 characters."))]
    pub img_url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field-scoped validation failures, kept in form field order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError { field: field.to_string(), message: message.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0.iter().filter(move |e| e.field == field).map(|e| e.message.as_str())
    }

    fn sort(&mut self) {
        self.0.sort_by_key(|e| {
            MOVIE_FIELDS.iter().position(|f| f.name == e.field).unwrap_or(MOVIE_FIELDS.len())
        });
    }
}

pub fn current_year() -> i32 {
    i32::from(jiff::Zoned::now().year())
}

fn validate_release_year(year: i32) -> Result<(), ValidationError> {
    let latest = current_year();
    if (EARLIEST_FILM_YEAR..=latest).contains(&year) {
        return Ok(());
    }
    Err(ValidationError::new("range").with_message(Cow::Owned(format!(
        "Year must be between {EARLIEST_FILM_YEAR} and {latest}."
    ))))
}

/// Checks a raw submission against the movie schema.
///
/// Parsing failures and missing values are reported first; fields that fail
/// there are not checked again by the declarative constraints.
pub fn validate(form: &MovieForm) -> Result<MovieInput, FormErrors> {
    let mut errors = FormErrors::default();

    let title = required_text(&mut errors, "title", &form.title);
    let description = required_text(&mut errors, "description", &form.description);
    let review = required_text(&mut errors, "review", &form.review);
    let img_url = required_text(&mut errors, "img_url", &form.img_url);

    let year = parse_number::<i32>(&mut errors, "year", &form.year, "Not a valid integer value.");
    let ranking =
        parse_number::<i32>(&mut errors, "ranking", &form.ranking, "Not a valid integer value.");
    let rating = parse_number::<f64>(&mut errors, "rating", &form.rating, "Not a valid float value.")
        .filter(|r| {
            if r.is_finite() {
                return true;
            }
            errors.push("rating", "Not a valid float value.");
            false
        });

    let input = MovieInput {
        title,
        year: year.unwrap_or_default(),
        description,
        rating: rating.unwrap_or_default(),
        ranking: ranking.unwrap_or_default(),
        review,
        img_url,
    };

    if let Err(failures) = input.validate() {
        for (field, list) in failures.field_errors() {
            let field = field.to_string();
            if errors.has(&field) {
                continue;
            }
            for err in list.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({}).", err.code));
                errors.push(&field, message);
            }
        }
    }

    if errors.is_empty() {
        Ok(input)
    } else {
        errors.sort();
        Err(errors)
    }
}

fn required_text(errors: &mut FormErrors, field: &str, raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        errors.push(field, REQUIRED);
    }
    value.to_string()
}

fn parse_number<T: std::str::FromStr>(
    errors: &mut FormErrors,
    field: &str,
    raw: &str,
    invalid: &str,
) -> Option<T> {
    let value = raw.trim();
    if value.is_empty() {
        errors.push(field, REQUIRED);
        return None;
    }
    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            errors.push(field, invalid);
            None
        },
    }
}
