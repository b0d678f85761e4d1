//! HTML views
//!
//! Small server-rendered pages. Every interpolated value goes through
//! [`escape`].

use std::fmt::Write;

use crate::auth::SignupForm;
use crate::middleware::Theme;
use crate::routes::catalog::OfferedSession;

/// Data every page needs
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    pub theme: Theme,
    pub user: Option<&'a str>,
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(page: Page<'_>, title: &str, body: &str) -> String {
    let account = match page.user {
        Some(user) => format!(
            r#"<span class="user">{}</span> <a href="/profile">Perfil</a> <form method="post" action="/logout" class="inline"><button type="submit">Salir</button></form>"#,
            escape(user)
        ),
        None => r#"<a href="/login">Entrar</a> <a href="/signup">Registro</a>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head><meta charset="utf-8"><title>{title}</title><link rel="stylesheet" href="/css/styles.css"></head>
<body class="theme-{theme}" data-theme="{theme}">
<nav><a href="/">Inicio</a> <a href="/sessions">Sesiones</a> <a href="/preferences">Preferencias</a> {account}</nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        theme = page.theme.as_str(),
    )
}

fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let mut out = String::from(r#"<ul class="errors">"#);
    for error in errors {
        let _ = write!(out, r#"<li class="error">{}</li>"#, escape(error));
    }
    out.push_str("</ul>");
    out
}

pub fn home(page: Page<'_>) -> String {
    let greeting = match page.user {
        Some(user) => format!("<p>Hola, {}.</p>", escape(user)),
        None => "<p>Bienvenido. Regístrate o entra para ver tu perfil.</p>".to_string(),
    };
    layout(page, "Inicio", &format!("<h1>Inicio</h1>{greeting}"))
}

/// Interests offered as checkboxes on the signup form
const SIGNUP_INTERESTS: [(&str, &str); 3] = [
    ("deporte", "Deporte"),
    ("musica", "Música"),
    ("lectura", "Lectura"),
];

fn interest_checkbox(out: &mut String, value: &str, label: &str, checked: bool) {
    let _ = write!(
        out,
        r#"<label><input type="checkbox" name="interests[]" value="{}"{}> {}</label>"#,
        escape(value),
        if checked { " checked" } else { "" },
        escape(label)
    );
    out.push('\n');
}

pub fn signup(page: Page<'_>, form: &SignupForm, errors: &[String]) -> String {
    let mut interests = String::new();
    for (value, label) in SIGNUP_INTERESTS {
        let checked = form.interests.iter().any(|i| i == value);
        interest_checkbox(&mut interests, value, label, checked);
    }
    // Submitted values outside the offered set
    for extra in form
        .interests
        .iter()
        .filter(|i| !SIGNUP_INTERESTS.iter().any(|(value, _)| *value == i.as_str()))
    {
        interest_checkbox(&mut interests, extra, extra, true);
    }

    let body = format!(
        r#"<h1>Registro</h1>
{errors}
<form method="post" action="/signup">
<label>Nombre <input name="name" value="{name}"></label>
<label>Edad <input name="age" value="{age}"></label>
<label>Email <input name="email" value="{email}"></label>
<label>Ciudad <input name="city" value="{city}"></label>
<fieldset><legend>Intereses</legend>
{interests}</fieldset>
<button type="submit">Registrarse</button>
</form>"#,
        errors = error_list(errors),
        name = escape(form.name()),
        age = escape(form.age()),
        email = escape(form.email()),
        city = escape(form.city()),
    );
    layout(page, "Registro", &body)
}

pub fn login(page: Page<'_>, user: &str, errors: &[String]) -> String {
    let body = format!(
        r#"<h1>Entrar</h1>
{errors}
<form method="post" action="/login">
<label>Email <input name="user" value="{user}"></label>
<label>Contraseña <input type="password" name="password" value=""></label>
<button type="submit">Entrar</button>
</form>"#,
        errors = error_list(errors),
        user = escape(user),
    );
    layout(page, "Entrar", &body)
}

pub fn profile(page: Page<'_>, identity: &str) -> String {
    let body = format!(
        r#"<h1>Perfil</h1><p class="identity">{}</p>"#,
        escape(identity)
    );
    layout(page, "Perfil", &body)
}

pub fn preferences(page: Page<'_>) -> String {
    let body = format!(
        r#"<h1>Preferencias</h1>
<p>Tema actual: <strong class="current-theme">{}</strong></p>
<p><a href="/theme/light">Claro</a> <a href="/theme/dark">Oscuro</a></p>"#,
        page.theme.as_str()
    );
    layout(page, "Preferencias", &body)
}

pub fn sessions(page: Page<'_>, catalog: &[OfferedSession]) -> String {
    let mut rows = String::new();
    for session in catalog {
        let _ = write!(
            rows,
            r#"<tr class="offered-session" data-id="{}"><td>{}</td><td>{} €</td><td>{} min</td></tr>"#,
            session.id,
            escape(session.name),
            session.price,
            session.duration
        );
    }

    let body = format!(
        r#"<h1>Sesiones</h1>
<table><thead><tr><th>Sesión</th><th>Precio</th><th>Duración</th></tr></thead>
<tbody>{rows}</tbody></table>"#
    );
    layout(page, "Sesiones", &body)
}

pub fn bad_theme(page: Page<'_>, requested: &str) -> String {
    let body = format!(
        r#"<h1>Tema no disponible</h1><p>El tema «{}» no existe.</p><p><a href="/preferences">Volver</a></p>"#,
        escape(requested)
    );
    layout(page, "Preferencias", &body)
}
