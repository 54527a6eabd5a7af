use crate::accounts::UserDirectory;
use crate::contacts::{ContactList, SearchField, SortField};
use crate::http::middleware::authentication::principal;
use crate::http::state::AppState;
use crate::models::contact::Contact;
use crate::models::sort_order::SortOrder;
use crate::models::statistics::{SystemStats, UserSummary};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use log::error;
use serde::Deserialize;
use std::fmt::Display;

const SORTABLE_COLUMNS: [(&str, &str); 3] =
    [("name", "Name"), ("phone", "Phone"), ("email", "Email")];

#[derive(Deserialize)]
pub(crate) struct ContactsPageQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    sort: String,
    #[serde(default)]
    order: String,
}

/// Escapes text for element content and quoted attributes
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(character),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

fn status_page(status: StatusCode, title: &str, message: &str) -> Response {
    let body = format!(
        "<p>{}</p>\n<p><a href=\"/\">Back to the start page</a></p>",
        escape(message)
    );
    (status, Html(page(title, &body))).into_response()
}

fn not_logged_in() -> Response {
    status_page(
        StatusCode::UNAUTHORIZED,
        "Not logged in",
        "Log in through the API to see this page.",
    )
}

fn access_denied() -> Response {
    status_page(
        StatusCode::FORBIDDEN,
        "Access denied",
        "Only administrators can see this page.",
    )
}

fn storage_failure(error: impl Display) -> Response {
    error!("{error}");
    status_page(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Error",
        "The phone book could not be read.",
    )
}

pub(crate) async fn index(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let session = match principal(&state, &headers) {
        Some(principal) if principal.is_admin() => format!(
            "<p>Logged in as administrator {}.</p>\n\
             <ul>\n<li><a href=\"/contacts\">Contacts</a></li>\n\
             <li><a href=\"/admin\">Users</a></li>\n</ul>",
            escape(principal.owner.username())
        ),
        Some(principal) => format!(
            "<p>Logged in as {}.</p>\n<p><a href=\"/contacts\">Contacts</a></p>",
            escape(principal.owner.username())
        ),
        None => String::from(
            "<p>Register with <code>POST /api/register</code>, then log in with \
             <code>POST /api/login</code> (or <code>POST /api/admin/login</code>) \
             sending <code>{\"username\": ..., \"password\": ...}</code>.</p>\n\
             <p>The response sets a session cookie and carries a token to send as \
             <code>Authorization: Bearer &lt;token&gt;</code>.</p>",
        ),
    };

    Html(page("Phone book", &session))
}

fn sort_link(query: &ContactsPageQuery, field: &str, label: &str, current: SortField) -> String {
    let ascending = SortOrder::from_name(&query.order) == SortOrder::Ascending;
    let order = if current.name() == field && ascending {
        "desc"
    } else {
        "asc"
    };

    format!(
        "<a href=\"/contacts?q={}&amp;sort={field}&amp;order={order}\">{label}</a>",
        urlencoding::encode(&query.q)
    )
}

fn contact_row(contact: &Contact) -> String {
    let cells: Vec<String> = SearchField::ALL
        .iter()
        .map(|field| format!("<td>{}</td>", escape(field.value(contact))))
        .collect();

    format!("<tr>{}</tr>", cells.concat())
}

pub(crate) async fn contacts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ContactsPageQuery>,
) -> Response {
    let Some(principal) = principal(&state, &headers) else {
        return not_logged_in();
    };

    let mut list = ContactList::new(&state.layout, &principal.owner);
    let contacts = match list.search(&query.q, SearchField::ALL) {
        Ok(contacts) => contacts,
        Err(error) => return storage_failure(error),
    };

    let field = SortField::from_name(&query.sort);
    let contacts = ContactList::sort_list(contacts, field, SortOrder::from_name(&query.order));

    let headings: String = SORTABLE_COLUMNS
        .iter()
        .map(|(name, label)| format!("<th>{}</th>", sort_link(&query, name, label, field)))
        .collect();
    let rows: Vec<String> = contacts.iter().map(contact_row).collect();

    let body = format!(
        "<form method=\"get\" action=\"/contacts\">\n\
         <input type=\"search\" name=\"q\" value=\"{q}\">\n\
         <input type=\"hidden\" name=\"sort\" value=\"{sort}\">\n\
         <button type=\"submit\">Search</button>\n</form>\n\
         <p>{count} contact(s)</p>\n\
         <table>\n<tr>{headings}<th>Address</th><th>Group</th><th>Notes</th></tr>\n\
         {rows}\n</table>",
        q = escape(&query.q),
        sort = field.name(),
        count = contacts.len(),
        rows = rows.join("\n"),
    );

    Html(page(
        &format!("Contacts of {}", principal.owner.username()),
        &body,
    ))
    .into_response()
}

fn user_row(user: &UserSummary) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape(&user.profile.username),
        escape(&user.profile.fullname),
        escape(&user.profile.email),
        user.contact_count,
        user.profile.created_at.format("%Y-%m-%d %H:%M"),
    )
}

fn stats_list(stats: &SystemStats) -> String {
    format!(
        "<ul>\n<li>Users: {}</li>\n<li>Contacts: {}</li>\n\
         <li>Registered in the last 7 days: {}</li>\n<li>Contacts per user: {:.2}</li>\n</ul>",
        stats.total_users,
        stats.total_contacts,
        stats.recent_registrations,
        stats.avg_contacts_per_user,
    )
}

pub(crate) async fn admin(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(principal) = principal(&state, &headers) else {
        return not_logged_in();
    };

    if !principal.is_admin() {
        return access_denied();
    }

    let directory = UserDirectory::new(state.layout.clone());
    let (users, stats) = match (directory.list_users(), directory.system_stats()) {
        (Ok(users), Ok(stats)) => (users, stats),
        (Err(error), _) | (_, Err(error)) => return storage_failure(error),
    };

    let rows: Vec<String> = users.iter().map(user_row).collect();
    let body = format!(
        "{stats}\n<table>\n<tr><th>Username</th><th>Full name</th><th>Email</th>\
         <th>Contacts</th><th>Registered</th></tr>\n{rows}\n</table>",
        stats = stats_list(&stats),
        rows = rows.join("\n"),
    );

    Html(page("Users", &body)).into_response()
}
