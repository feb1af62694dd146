//! Page routes and the sign-in guard.

use std::fmt;

use lnf_core::{ItemId, Session};
use url::form_urlencoded;

/// A navigable page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// `/search`, optionally seeded with `?q=`.
    Search { query: Option<String> },
    ItemDetail { id: ItemId },
    MyItems,
    ReportLost,
    ReportFound,
    /// `/signin`; `from` is the page to return to after signing in.
    SignIn { from: Option<String> },
    SignUp,
    NotFound { path: String },
}

impl Route {
    /// Parses a path with an optional query string.
    pub fn parse(target: &str) -> Route {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] | [""] => Route::Home,
            ["search"] => Route::Search {
                query: query.and_then(|q| query_param(q, "q")).filter(|q| !q.is_empty()),
            },
            ["items", id] => match id.parse::<ItemId>() {
                Ok(id) => Route::ItemDetail { id },
                Err(_) => Route::not_found(path),
            },
            ["my-items"] => Route::MyItems,
            ["report-lost"] => Route::ReportLost,
            ["report-found"] => Route::ReportFound,
            ["signin"] => Route::SignIn {
                from: query.and_then(|q| query_param(q, "from")),
            },
            ["signup"] => Route::SignUp,
            _ => Route::not_found(path),
        }
    }

    fn not_found(path: &str) -> Route {
        Route::NotFound {
            path: path.to_string(),
        }
    }

    /// Canonical path of the route, query string included.
    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Search { query: None } => "/search".to_string(),
            Route::Search { query: Some(q) } => format!("/search?q={}", encode(q)),
            Route::ItemDetail { id } => format!("/items/{}", id),
            Route::MyItems => "/my-items".to_string(),
            Route::ReportLost => "/report-lost".to_string(),
            Route::ReportFound => "/report-found".to_string(),
            Route::SignIn { from: None } => "/signin".to_string(),
            Route::SignIn { from: Some(from) } => format!("/signin?from={}", encode(from)),
            Route::SignUp => "/signup".to_string(),
            Route::NotFound { path } => path.clone(),
        }
    }

    /// Pages only a signed-in user may open.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::MyItems | Route::ReportLost | Route::ReportFound)
    }

    /// Resolves the page actually shown for this session.
    ///
    /// Anonymous visits to a protected page land on sign-in, remembering
    /// where they came from.
    pub fn guard(self, session: &Session) -> Route {
        if self.requires_auth() && !session.is_authenticated() {
            return Route::SignIn {
                from: Some(self.to_path()),
            };
        }
        self
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

fn query_param(query: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lnf_core::SessionProfile;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/items/12"), Route::ItemDetail { id: 12 });
        assert_eq!(Route::parse("/my-items/"), Route::MyItems);
        assert_eq!(Route::parse("/report-found"), Route::ReportFound);
        assert_eq!(Route::parse("/signup"), Route::SignUp);
        assert_eq!(
            Route::parse("/search?q=black+wallet"),
            Route::Search { query: Some("black wallet".into()) }
        );
        assert_eq!(Route::parse("/search?q="), Route::Search { query: None });
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        assert_eq!(
            Route::parse("/items/abc"),
            Route::NotFound { path: "/items/abc".into() }
        );
        assert!(matches!(Route::parse("/admin"), Route::NotFound { .. }));
    }

    #[test]
    fn test_search_path_round_trips_encoding() {
        let route = Route::Search { query: Some("keys & id card".into()) };
        let path = route.to_path();
        assert_eq!(path, "/search?q=keys+%26+id+card");
        assert_eq!(Route::parse(&path), route);
    }

    #[test]
    fn test_guard_redirects_anonymous_visitors() {
        let anonymous = Session::Anonymous;
        assert_eq!(
            Route::MyItems.guard(&anonymous),
            Route::SignIn { from: Some("/my-items".into()) }
        );
        assert_eq!(Route::Home.guard(&anonymous), Route::Home);

        let signed_in = Session::Authenticated {
            profile: SessionProfile { id: 1, username: "sam".into(), email: None },
        };
        assert_eq!(Route::ReportLost.guard(&signed_in), Route::ReportLost);
    }

    #[test]
    fn test_signin_remembers_origin() {
        let route = Route::ReportFound.guard(&Session::Anonymous);
        assert_eq!(route.to_path(), "/signin?from=%2Freport-found");
        assert_eq!(Route::parse(&route.to_path()), route);
    }
}
