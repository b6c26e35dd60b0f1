//! Application routes and the session-conditioned view selection.

use dioxus::prelude::*;

use crate::session::SessionState;
use crate::views::{
    AiFundamentals, BusinessAi, Hello, Home, NotFound, Productivity, Profile, Shell,
    SubmitInterest,
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/topics/ai-fundamentals")]
        AiFundamentals {},
        #[route("/topics/business-ai")]
        BusinessAi {},
        #[route("/topics/productivity")]
        Productivity {},
        #[route("/submit-interest")]
        SubmitInterest {},
        #[route("/profile")]
        Profile {},
        #[route("/hello")]
        Hello {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

impl Route {
    /// Exact-path lookup. Paths outside the fixed set map to [`Route::NotFound`].
    pub fn from_path(path: &str) -> Self {
        path.parse().unwrap_or_else(|_| Route::NotFound {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

/// What the session allows to be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Startup fetch still pending: only the loading view.
    Loading,
    /// No session: only the sign-in view, whatever the path.
    SignIn,
    /// Signed in: path-based dispatch over [`Route`].
    Open,
}

impl Access {
    pub fn of(state: &SessionState) -> Self {
        match state {
            SessionState::Loading => Access::Loading,
            SessionState::Absent => Access::SignIn,
            SessionState::Present(_) => Access::Open,
        }
    }
}

/// The surface rendered for a path under a given session state.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Loading,
    SignIn,
    Page(Route),
}

pub fn resolve(state: &SessionState, path: &str) -> Surface {
    match Access::of(state) {
        Access::Loading => Surface::Loading,
        Access::SignIn => Surface::SignIn,
        Access::Open => Surface::Page(Route::from_path(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{MemoryBackend, User};

    const PATHS: [&str; 9] = [
        "/",
        "/topics/ai-fundamentals",
        "/topics/business-ai",
        "/topics/productivity",
        "/submit-interest",
        "/profile",
        "/hello",
        "/does-not-exist",
        "/topics/unknown/deeper",
    ];

    fn signed_in() -> SessionState {
        SessionState::Present(MemoryBackend::session_for(&User {
            id: "u-1".to_string(),
            email: None,
            last_sign_in_at: None,
        }))
    }

    #[test]
    fn test_loading_for_every_path() {
        for path in PATHS {
            assert_eq!(resolve(&SessionState::Loading, path), Surface::Loading, "{path}");
        }
    }

    #[test]
    fn test_sign_in_for_every_path_when_absent() {
        for path in PATHS {
            assert_eq!(resolve(&SessionState::Absent, path), Surface::SignIn, "{path}");
        }
    }

    #[test]
    fn test_fixed_routes_when_signed_in() {
        let state = signed_in();
        assert_eq!(resolve(&state, "/"), Surface::Page(Route::Home {}));
        assert_eq!(
            resolve(&state, "/topics/ai-fundamentals"),
            Surface::Page(Route::AiFundamentals {})
        );
        assert_eq!(
            resolve(&state, "/topics/business-ai"),
            Surface::Page(Route::BusinessAi {})
        );
        assert_eq!(
            resolve(&state, "/topics/productivity"),
            Surface::Page(Route::Productivity {})
        );
        assert_eq!(
            resolve(&state, "/submit-interest"),
            Surface::Page(Route::SubmitInterest {})
        );
        assert_eq!(resolve(&state, "/profile"), Surface::Page(Route::Profile {}));
        assert_eq!(resolve(&state, "/hello"), Surface::Page(Route::Hello {}));
    }

    #[test]
    fn test_unmatched_paths_are_not_found() {
        let state = signed_in();
        for path in ["/does-not-exist", "/topics/unknown/deeper", "/topics"] {
            assert!(
                matches!(resolve(&state, path), Surface::Page(Route::NotFound { .. })),
                "{path}"
            );
        }
    }

    #[test]
    fn test_route_paths_round_trip() {
        assert_eq!(Route::Profile {}.to_string(), "/profile");
        assert_eq!(Route::from_path(&Route::SubmitInterest {}.to_string()), Route::SubmitInterest {});
    }
}
