//! # Routing
//!
//! Named dashboard paths and the authentication guard in front of them.
//!
//! ## Guard Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Requested path        Authenticated?     Result                        │
//! │  ──────────────        ──────────────     ──────                        │
//! │  /login, /register     any                Render                        │
//! │  protected path        yes                Render                        │
//! │  protected path        no                 Redirect → /login             │
//! │  unknown path          yes                Redirect → /                  │
//! │  unknown path          no                 Redirect → /login             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::ProductId;

/// A screen of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "route", content = "id", rename_all = "snake_case")]
pub enum Route {
    Login,
    Register,
    Home,
    Products,
    ProductDetail(ProductId),
    Settings,
    Profile,
}

impl Route {
    /// Parses a path into a route. Trailing slashes and a query string are ignored.
    ///
    /// Returns `None` for unknown paths, including `/products/{id}` with a
    /// non-numeric id.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["products"] => Some(Route::Products),
            ["products", id] => id.parse().ok().map(Route::ProductDetail),
            ["settings"] => Some(Route::Settings),
            ["profile"] => Some(Route::Profile),
            _ => None,
        }
    }

    /// The canonical path of this route.
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Home => "/".to_string(),
            Route::Products => "/products".to_string(),
            Route::ProductDetail(id) => format!("/products/{id}"),
            Route::Settings => "/settings".to_string(),
            Route::Profile => "/profile".to_string(),
        }
    }

    /// Whether the route requires an authenticated session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// What the shell should do with a requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "action", content = "target", rename_all = "snake_case")]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

impl Navigation {
    /// The route that ends up on screen.
    pub fn target(&self) -> Route {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => *route,
        }
    }
}

/// Applies the guard to a requested path.
pub fn resolve(path: &str, is_authenticated: bool) -> Navigation {
    match Route::parse(path) {
        Some(route) if route.is_protected() && !is_authenticated => {
            Navigation::Redirect(Route::Login)
        }
        Some(route) => Navigation::Render(route),
        None if is_authenticated => Navigation::Redirect(Route::Home),
        None => Navigation::Redirect(Route::Login),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(Route::parse("/login"), Some(Route::Login));
        assert_eq!(Route::parse("/register/"), Some(Route::Register));
        assert_eq!(Route::parse("/products"), Some(Route::Products));
        assert_eq!(Route::parse("/products/42"), Some(Route::ProductDetail(42)));
        assert_eq!(Route::parse("/settings?tab=integration"), Some(Route::Settings));
        assert_eq!(Route::parse("/profile"), Some(Route::Profile));
    }

    #[test]
    fn test_parse_unknown_paths() {
        assert_eq!(Route::parse("/products/abc"), None);
        assert_eq!(Route::parse("/products/1/edit"), None);
        assert_eq!(Route::parse("/admin"), None);
    }

    #[test]
    fn test_path_round_trip() {
        for route in [
            Route::Login,
            Route::Register,
            Route::Home,
            Route::Products,
            Route::ProductDetail(9),
            Route::Settings,
            Route::Profile,
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_guard_redirects_anonymous_users() {
        assert_eq!(resolve("/", false), Navigation::Redirect(Route::Login));
        assert_eq!(resolve("/products/3", false), Navigation::Redirect(Route::Login));
        assert_eq!(resolve("/profile", false), Navigation::Redirect(Route::Login));
        assert_eq!(resolve("/login", false), Navigation::Render(Route::Login));
        assert_eq!(resolve("/register", false), Navigation::Render(Route::Register));
    }

    #[test]
    fn test_guard_unknown_paths() {
        assert_eq!(resolve("/nope", true), Navigation::Redirect(Route::Home));
        assert_eq!(resolve("/nope", false), Navigation::Redirect(Route::Login));
    }

    #[test]
    fn test_guard_renders_for_signed_in_users() {
        let nav = resolve("/settings", true);
        assert_eq!(nav, Navigation::Render(Route::Settings));
        assert_eq!(nav.target(), Route::Settings);
    }
}
