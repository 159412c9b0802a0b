//! HTML for the login, registration and home pages.

use crate::auth::AuthContext;
use actix_web::{http::header::ContentType, HttpResponse};
use std::borrow::Cow;
use std::fmt::Write;

pub static STYLESHEET: &'static str = include_str!("../static/all.css");

static LOGIN_FORM: &'static str = r#"
<div class="form">
<h2>login</h2>
<form method="POST" action="/login">
    <label for="username">username</label>
    <input type="text" id="username" name="username" required autofocus>
    <label for="password">password</label>
    <input type="password" id="password" name="password" required>
    <input type="submit" value="login">
</form>
</div>
"#;

static REGISTER_FORM: &'static str = r#"
<div class="form">
<h2>register</h2>
<form method="POST" action="/register">
    <label for="username">username</label>
    <input type="text" id="username" name="username" required autofocus>
    <label for="password">password</label>
    <input type="password" id="password" name="password" required>
    <input type="submit" value="register">
</form>
</div>
"#;

static HOME: &'static str = r#"
<div class="content">
<h2>Jilo Web</h2>
<p>You are logged in.</p>
</div>
"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Content {
    LoginForm,
    RegisterForm,
    Home,
}

impl Content {
    fn html(self) -> &'static str {
        match self {
            Content::LoginForm => LOGIN_FORM,
            Content::RegisterForm => REGISTER_FORM,
            Content::Home => HOME,
        }
    }
}

/// Everything a page shows besides its main content.
#[derive(Debug, Default)]
pub struct Page<'a> {
    pub auth: Option<&'a AuthContext>,
    /// Set when the request could not be served, shown in red.
    pub error: Option<String>,
    /// Outcome of a form submission, e.g. "Login successful."
    pub notice: Option<&'a str>,
}

impl<'a> Page<'a> {
    pub fn new(auth: Option<&'a AuthContext>) -> Page<'a> {
        Page {
            auth,
            ..Page::default()
        }
    }

    pub fn render(&self, content: Content) -> String {
        let mut out = String::with_capacity(2048);

        if let Some(notice) = self.notice {
            out.push_str(&escape(notice));
            out.push('\n');
        }
        if let Some(auth) = self.auth {
            let _ = writeln!(out, "Welcome, {}!", escape(&auth.username));
        }
        if let Some(error) = &self.error {
            let _ = writeln!(out, "<p style='color: red;'>Error: {}</p>", escape(error));
        }

        out.push_str(
            "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n    \
             <link rel=\"stylesheet\" type=\"text/css\" href=\"/static/all.css\">\n    \
             <title>Jilo Web</title>\n</head>\n\n<body>\n\n<ul class=\"menu\">\n",
        );
        if self.auth.is_some() {
            out.push_str("    <li><a href=\"/logout\">logout</a></li>\n");
        } else {
            out.push_str("    <li><a href=\"/login\">login</a></li>\n");
            out.push_str("    <li><a href=\"/register\">register</a></li>\n");
        }
        out.push_str("</ul>\n");

        out.push_str(content.html());
        out.push_str("\n</body>\n</html>\n");
        out
    }

    pub fn respond(&self, content: Content) -> HttpResponse {
        HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(self.render(content))
    }
}

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
