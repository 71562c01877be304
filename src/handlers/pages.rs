//! Admin UI entry documents.
//!
//! The admin interface is a client-side app; these handlers only serve the
//! document it boots from. Requests reach `admin_shell` after the request
//! gate has verified the credential.

use axum::{extract::OriginalUri, response::Html};

use crate::middleware::gate::{ADMIN_UI_ROOT, LOGIN_PAGE};

/// `GET /studio-portal-2024[/{section}]`
pub async fn admin_shell(OriginalUri(uri): OriginalUri) -> Html<String> {
    let section = uri
        .path()
        .strip_prefix(ADMIN_UI_ROOT)
        .map(|rest| rest.trim_matches('/'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or("dashboard");
    Html(shell("Studio Portal", "admin-root", section))
}

/// `GET /studio-portal-2024/login`
pub async fn login_page() -> Html<String> {
    Html(shell("Studio Portal Login", "login-root", "login"))
}

fn shell(title: &str, root_id: &str, section: &str) -> String {
    let section: String = section
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/'))
        .collect();
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"robots\" content=\"noindex\">\n<title>{title}</title>\n</head>\n<body>\n\
         <div id=\"{root_id}\" data-section=\"{section}\" data-login=\"{LOGIN_PAGE}\"></div>\n\
         <script type=\"module\" src=\"/admin/app.js\"></script>\n</body>\n</html>\n"
    )
}
