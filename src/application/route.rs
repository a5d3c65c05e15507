// src/application/route.rs
use crate::application::SessionState;

/// Views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
}

impl Route {
    /// Resolve a path; the empty path lands on the login view.
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_matches('/') {
            "" | "login" => Some(Self::Login),
            "home" => Some(Self::Home),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Home => "/home",
        }
    }
}

/// Where a request for `requested` ends up given the session state.
pub fn guard(requested: Route, state: SessionState) -> Route {
    match (requested, state) {
        (Route::Home, SessionState::Anonymous) => Route::Login,
        (Route::Login, SessionState::Authenticated) => Route::Home,
        (route, _) => route,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Route::Home, SessionState::Anonymous, Route::Login)]
    #[case(Route::Home, SessionState::Authenticated, Route::Home)]
    #[case(Route::Login, SessionState::Anonymous, Route::Login)]
    #[case(Route::Login, SessionState::Authenticated, Route::Home)]
    fn given_route_and_state_when_guarding_then_redirects(
        #[case] requested: Route,
        #[case] state: SessionState,
        #[case] expected: Route,
    ) {
        assert_eq!(guard(requested, state), expected);
    }

    #[test]
    fn given_root_path_when_resolving_then_login() {
        assert_eq!(Route::from_path(""), Some(Route::Login));
        assert_eq!(Route::from_path("/"), Some(Route::Login));
        assert_eq!(Route::from_path("/home"), Some(Route::Home));
        assert_eq!(Route::from_path("/settings"), None);
    }
}
