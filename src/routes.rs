use axum::{
    extract::{Form, FromRequestParts, Path, State},
    http::request::Parts,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::debug;

use crate::{
    app::AppContext,
    csrf::{self, CSRF_FIELD},
    error::{AppError, AppResult},
    flash,
    models::{MovieForm, MovieSubmission},
    store::StoreError,
    templates,
    validation::{self, FormErrors},
};

/// Integer `{id}` path segment. Anything that is not an integer is treated
/// the same as an id that does not exist.
pub struct MovieId(pub i32);

impl<S: Send + Sync> FromRequestParts<S> for MovieId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) =
            Path::<i32>::from_request_parts(parts, state).await.map_err(|_| AppError::NotFound)?;
        Ok(Self(id))
    }
}

pub async fn home(
    State(ctx): State<AppContext>,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Html<String>)> {
    let movies = ctx.store.list_ordered_by_rank().await?;
    let (jar, message) = flash::take(jar);
    Ok((jar, Html(templates::index_page(&movies, message.as_deref()))))
}

pub async fn edit_form(
    State(ctx): State<AppContext>,
    MovieId(id): MovieId,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Html<String>)> {
    let movie = ctx.store.get(id).await?;
    let (jar, token) = csrf::issue(jar);
    let page = templates::edit_page(id, &MovieForm::from(&movie), &FormErrors::default(), &token);
    Ok((jar, Html(page)))
}

pub async fn edit_submit(
    State(ctx): State<AppContext>,
    MovieId(id): MovieId,
    jar: SignedCookieJar,
    Form(submission): Form<MovieSubmission>,
) -> AppResult<Response> {
    ctx.store.get(id).await?;
    let form = submission.movie;

    if !csrf::verify(&jar, &submission.csrf_token) {
        debug!(movie_id = id, "edit rejected, bad csrf token");
        let (jar, token) = csrf::issue(jar);
        let page = templates::edit_page(id, &form, &forged(), &token);
        return Ok((jar, Html(page)).into_response());
    }

    let input = match validation::validate(&form) {
        Ok(input) => input,
        Err(errors) => {
            debug!(movie_id = id, ?errors, "edit rejected");
            let page = templates::edit_page(id, &form, &errors, &submission.csrf_token);
            return Ok(Html(page).into_response());
        },
    };

    match ctx.store.update(id, &input).await {
        Ok(movie) => {
            let jar = flash::set(jar, &format!("Updated {}.", movie.title));
            Ok((jar, Redirect::to("/")).into_response())
        },
        Err(StoreError::DuplicateTitle(title)) => {
            let errors = duplicate_title(&title);
            let page = templates::edit_page(id, &form, &errors, &submission.csrf_token);
            Ok(Html(page).into_response())
        },
        Err(err) => Err(err.into()),
    }
}

pub async fn delete(
    State(ctx): State<AppContext>,
    MovieId(id): MovieId,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Redirect)> {
    let movie = ctx.store.get(id).await?;
    ctx.store.delete(id).await?;
    let jar = flash::set(jar, &format!("Deleted {}.", movie.title));
    Ok((jar, Redirect::to("/")))
}

pub async fn add_form(jar: SignedCookieJar) -> (SignedCookieJar, Html<String>) {
    let (jar, token) = csrf::issue(jar);
    (jar, Html(templates::add_page(&MovieForm::default(), &FormErrors::default(), &token)))
}

pub async fn add_submit(
    State(ctx): State<AppContext>,
    jar: SignedCookieJar,
    Form(submission): Form<MovieSubmission>,
) -> AppResult<Response> {
    let form = submission.movie;

    if !csrf::verify(&jar, &submission.csrf_token) {
        debug!("add rejected, bad csrf token");
        let (jar, token) = csrf::issue(jar);
        return Ok((jar, Html(templates::add_page(&form, &forged(), &token))).into_response());
    }

    let input = match validation::validate(&form) {
        Ok(input) => input,
        Err(errors) => {
            debug!(?errors, "add rejected");
            let page = templates::add_page(&form, &errors, &submission.csrf_token);
            return Ok(Html(page).into_response());
        },
    };

    match ctx.store.insert(&input).await {
        Ok(movie) => {
            let jar = flash::set(jar, &format!("Added {}.", movie.title));
            Ok((jar, Redirect::to("/")).into_response())
        },
        Err(StoreError::DuplicateTitle(title)) => {
            let errors = duplicate_title(&title);
            let page = templates::add_page(&form, &errors, &submission.csrf_token);
            Ok(Html(page).into_response())
        },
        Err(err) => Err(err.into()),
    }
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

fn forged() -> FormErrors {
    let mut errors = FormErrors::default();
    errors.push(CSRF_FIELD, "The form has expired or was not sent from this site. Please submit it again.");
    errors
}

fn duplicate_title(title: &str) -> FormErrors {
    let mut errors = FormErrors::default();
    errors.push("title", format!("A movie titled \"{title}\" is already on the list."));
    errors
}
