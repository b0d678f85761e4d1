//! Request handlers
//!
//! Each handler records its action, then renders a page or redirects.
//! Validation failures re-render the form with the submitted values.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::Form;
use log::{info, warn};

use crate::auth::{signup_record, validate_login, LoginForm, SignupForm};
use crate::error::AppError;
use crate::middleware::{AuthenticatedUser, Theme};
use crate::routes::catalog::OFFERED_SESSIONS;
use crate::routes::responses::found;
use crate::routes::views::{self, Page};
use crate::server::state::AppState;
use crate::session::Viewer;

pub async fn home(State(state): State<AppState>, viewer: Viewer, theme: Theme) -> Html<String> {
    state.actions.log("VISITA_HOME", viewer.identity()).await;
    Html(views::home(Page {
        theme,
        user: viewer.identity(),
    }))
}

pub async fn signup_form(
    State(state): State<AppState>,
    viewer: Viewer,
    theme: Theme,
) -> Html<String> {
    state.actions.log("VISITA_SIGNUP", viewer.identity()).await;
    let page = Page {
        theme,
        user: viewer.identity(),
    };
    Html(views::signup(page, &SignupForm::default(), &[]))
}

pub async fn signup_submit(
    State(state): State<AppState>,
    viewer: Viewer,
    theme: Theme,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    let record = match signup_record(&form) {
        Ok(record) => record,
        Err(errors) => {
            info!("Rejected signup with {} errors", errors.len());
            let page = Page {
                theme,
                user: viewer.identity(),
            };
            let html = views::signup(page, &form, &errors);
            return Ok((StatusCode::BAD_REQUEST, Html(html)).into_response());
        }
    };

    let email = record.email.clone();
    state.records.append(record).await?;
    state.actions.log("REGISTRO", Some(&email)).await;

    Ok(found("/"))
}

pub async fn login_form(
    State(state): State<AppState>,
    viewer: Viewer,
    theme: Theme,
) -> Html<String> {
    state.actions.log("VISITA_LOGIN", viewer.identity()).await;
    let page = Page {
        theme,
        user: viewer.identity(),
    };
    Html(views::login(page, "", &[]))
}

pub async fn login_submit(
    State(state): State<AppState>,
    viewer: Viewer,
    theme: Theme,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let errors = validate_login(&form);
    if !errors.is_empty() {
        let page = Page {
            theme,
            user: viewer.identity(),
        };
        let html = views::login(page, form.user(), &errors);
        return Ok((StatusCode::UNAUTHORIZED, Html(html)).into_response());
    }

    let identity = form.user();
    let (jar, _session) = state.sessions.login(jar, identity).await?;
    state.actions.log("LOGIN", Some(identity)).await;

    Ok((jar, found("/profile")).into_response())
}

pub async fn profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    theme: Theme,
) -> Html<String> {
    state.actions.log("VISITA_PROFILE", Some(&user.identity)).await;
    let page = Page {
        theme,
        user: Some(&user.identity),
    };
    Html(views::profile(page, &user.identity))
}

pub async fn logout(
    State(state): State<AppState>,
    viewer: Viewer,
    jar: CookieJar,
) -> Result<Response, AppError> {
    state.actions.log("LOGOUT", viewer.identity()).await;
    let jar = state.sessions.logout(jar).await?;
    Ok((jar, found("/")).into_response())
}

pub async fn set_theme(
    State(state): State<AppState>,
    viewer: Viewer,
    current: Theme,
    jar: CookieJar,
    Path(mode): Path<String>,
) -> Response {
    let theme = match mode.parse::<Theme>() {
        Ok(theme) => theme,
        Err(e) => {
            warn!("{}", e);
            let page = Page {
                theme: current,
                user: viewer.identity(),
            };
            return (StatusCode::BAD_REQUEST, Html(views::bad_theme(page, &mode))).into_response();
        }
    };

    let action = format!("CAMBIO_TEMA_{}", theme.as_str().to_ascii_uppercase());
    state.actions.log(&action, viewer.identity()).await;

    let jar = jar.add(theme.cookie(state.config.theme_max_age_days));
    (jar, found("/preferences")).into_response()
}

pub async fn preferences(
    State(state): State<AppState>,
    viewer: Viewer,
    theme: Theme,
) -> Html<String> {
    state.actions.log("VISITA_PREFERENCIAS", viewer.identity()).await;
    Html(views::preferences(Page {
        theme,
        user: viewer.identity(),
    }))
}

pub async fn sessions(
    State(state): State<AppState>,
    viewer: Viewer,
    theme: Theme,
) -> Html<String> {
    state.actions.log("VISITA_SESIONES", viewer.identity()).await;
    let page = Page {
        theme,
        user: viewer.identity(),
    };
    Html(views::sessions(page, &OFFERED_SESSIONS))
}
