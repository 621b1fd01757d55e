use maud::{DOCTYPE, Markup, html};

use crate::{
    csrf::CSRF_FIELD,
    entities::movie,
    models::{FieldKind, FieldSpec, MOVIE_FIELDS, MovieForm},
    validation::{FormErrors, MAX_TEXT_LEN},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn index_page(movies: &[movie::Model], flash: Option<&str>) -> String {
    page(
        "My Top Movies",
        html! {
            div class="min-h-screen bg-gray-900 text-gray-100" {
                div class="max-w-5xl mx-auto px-6 py-12" {
                    div class="flex items-end justify-between gap-6" {
                        div {
                            h1 class="text-4xl font-bold" { "My Top " (movies.len()) " Movies" }
                            p class="mt-2 text-gray-400" { "These are my all-time favourite movies." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                    }

                    @if let Some(message) = flash {
                        div class="mt-6 rounded-md border border-green-600 bg-green-900/40 px-4 py-3 text-green-200" role="status" {
                            (message)
                        }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 rounded-lg bg-gray-800 p-8" {
                            p class="text-gray-400" { "No movies yet." }
                        }
                    } @else {
                        div class="mt-10 grid gap-6 sm:grid-cols-2 lg:grid-cols-3" {
                            @for m in movies {
                                (movie_card(m))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn edit_page(id: i32, form: &MovieForm, errors: &FormErrors, csrf_token: &str) -> String {
    page(
        "Edit Movie",
        form_shell(
            "Edit Movie",
            html! { p class="mt-2 text-gray-600" { "Editing " em { (form.title) } } },
            movie_form(&format!("/edit/{id}"), form, errors, csrf_token),
        ),
    )
}

pub fn add_page(form: &MovieForm, errors: &FormErrors, csrf_token: &str) -> String {
    page(
        "Add Movie",
        form_shell(
            "Add a Movie",
            html! { p class="mt-2 text-gray-600" { "Add a new movie to your list." } },
            movie_form("/add", form, errors, csrf_token),
        ),
    )
}

pub fn not_found_page() -> String {
    message_page("Not Found", "The movie you were looking for does not exist.")
}

pub fn error_page(message: &str) -> String {
    message_page("Error", message)
}

fn message_page(heading: &str, message: &str) -> String {
    page(
        heading,
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { (heading) }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn form_shell(heading: &str, intro: Markup, form: Markup) -> Markup {
    html! {
        div class="min-h-screen bg-gray-50" {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { (heading) }
                    (intro)
                    (form)
                }
                a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to list" }
            }
        }
    }
}

fn movie_form(action: &str, form: &MovieForm, errors: &FormErrors, csrf_token: &str) -> Markup {
    html! {
        form class="mt-8 space-y-6" method="post" action=(action) novalidate {
            input type="hidden" name=(CSRF_FIELD) value=(csrf_token);
            @for message in errors.for_field(CSRF_FIELD) {
                div class="rounded-md border border-red-400 bg-red-50 px-4 py-3 text-sm text-red-700" data-error-for=(CSRF_FIELD) { (message) }
            }
            @for field in &MOVIE_FIELDS {
                (form_field(field, form.value(field.name), errors))
            }
            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Save" }
        }
    }
}

fn form_field(field: &FieldSpec, value: &str, errors: &FormErrors) -> Markup {
    let invalid = errors.has(field.name);
    let border = if invalid { "border-red-500" } else { "border-gray-300" };
    let class = format!(
        "mt-2 w-full rounded-md border {border} px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500"
    );

    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(field.name) { (field.label) }
            @match field.kind {
                FieldKind::TextArea => {
                    textarea class=(class) name=(field.name) id=(field.name) rows="3" maxlength=(MAX_TEXT_LEN) { (value) }
                },
                FieldKind::Text => {
                    input class=(class) type="text" name=(field.name) id=(field.name) value=(value) maxlength=(MAX_TEXT_LEN);
                },
                FieldKind::Integer => {
                    input class=(class) type="number" step="1" name=(field.name) id=(field.name) value=(value);
                },
                FieldKind::Float => {
                    input class=(class) type="number" step="any" name=(field.name) id=(field.name) value=(value);
                },
            }
            @for message in errors.for_field(field.name) {
                p class="mt-2 text-sm text-red-600" data-error-for=(field.name) { (message) }
            }
        }
    }
}

fn movie_card(m: &movie::Model) -> Markup {
    html! {
        div class="flex flex-col overflow-hidden rounded-lg bg-gray-800 shadow" {
            div class="relative" {
                img class="h-72 w-full object-cover" src=(m.img_url) alt=(m.title);
                span class="absolute left-3 top-3 rounded-full bg-black/70 px-3 py-1 text-lg font-bold" { (m.ranking) }
            }
            div class="flex flex-1 flex-col p-5" {
                h2 class="text-xl font-semibold" data-movie-title {
                    (m.title)
                    span class="ml-2 font-normal text-gray-400" { "(" (m.year) ")" }
                }
                p class="mt-1 text-sm text-yellow-400" { (format_rating(m.rating)) " / 10" }
                p class="mt-3 text-sm text-gray-300" { (m.description) }
                p class="mt-3 text-sm italic text-gray-400" { "\u{201c}" (m.review) "\u{201d}" }
                div class="mt-auto flex gap-4 pt-5 text-sm" {
                    a class="text-blue-400 hover:text-blue-300" href=(format!("/edit/{}", m.id)) { "Update" }
                    a class="text-red-400 hover:text-red-300" href=(format!("/delete/{}", m.id)) { "Delete" }
                }
            }
        }
    }
}

fn format_rating(rating: f64) -> String {
    format!("{rating:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> movie::Model {
        movie::Model {
            id: 3,
            title: "Alien <1979>".into(),
            year: 1979,
            description: "In space no one can hear you scream.".into(),
            rating: 8.5,
            ranking: 2,
            review: "Tense & claustrophobic.".into(),
            img_url: "/static/img/alien.jpg".into(),
        }
    }

    #[test]
    fn index_escapes_movie_fields() {
        let html = index_page(&[sample()], None);
        assert!(html.contains("Alien &lt;1979&gt;"));
        assert!(html.contains("Tense &amp; claustrophobic."));
        assert!(html.contains("href=\"/edit/3\""));
        assert!(html.contains("href=\"/delete/3\""));
    }

    #[test]
    fn index_shows_flash_message() {
        let html = index_page(&[], Some("Deleted Alien & Aliens"));
        assert!(html.contains("Deleted Alien &amp; Aliens"));
        assert!(html.contains("No movies yet."));
    }

    #[test]
    fn form_keeps_entered_values_and_errors() {
        let form = MovieForm { rating: "11".into(), ..MovieForm::from(&sample()) };
        let mut errors = FormErrors::default();
        errors.push("rating", "Rating must be between 0 and 10.");

        let html = edit_page(3, &form, &errors, "abc123");
        assert!(html.contains("action=\"/edit/3\""));
        assert!(html.contains("name=\"csrf_token\" value=\"abc123\""));
        assert!(html.contains("value=\"11\""));
        assert!(html.contains("data-error-for=\"rating\""));
        assert!(html.contains("Rating must be between 0 and 10."));
    }

    #[test]
    fn rating_renders_with_one_decimal() {
        assert_eq!(format_rating(10.0), "10.0");
        assert_eq!(format_rating(9.24), "9.2");
    }
}
