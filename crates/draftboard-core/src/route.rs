// Navigation targets: the setup screen at `/` and the board at `/draft/{id}`.

use std::fmt;

use crate::api::DraftId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Setup,
    Board { draft_id: DraftId },
}

impl Route {
    /// Resolve a path. Anything that is not a board path falls back to the
    /// setup screen.
    pub fn parse(path: &str) -> Route {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').skip(1).collect();
        match segments.as_slice() {
            ["draft", id] if !id.is_empty() => Route::Board {
                draft_id: (*id).to_string(),
            },
            _ => Route::Setup,
        }
    }

    pub fn board(draft_id: impl Into<DraftId>) -> Route {
        Route::Board {
            draft_id: draft_id.into(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Setup => "/".to_string(),
            Route::Board { draft_id } => format!("/draft/{draft_id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_setup() {
        assert_eq!(Route::parse("/"), Route::Setup);
        assert_eq!(Route::parse(""), Route::Setup);
    }

    #[test]
    fn draft_path_is_board() {
        assert_eq!(Route::parse("/draft/abc-123"), Route::board("abc-123"));
        assert_eq!(Route::parse("/draft/abc-123/"), Route::board("abc-123"));
        assert_eq!(Route::parse("/draft/7?tab=board"), Route::board("7"));
    }

    #[test]
    fn unknown_paths_redirect_to_setup() {
        for path in ["/draft", "/draft/", "/draft/a/b", "/teams", "draft/x", "/x/draft/1"] {
            assert_eq!(Route::parse(path), Route::Setup, "{path}");
        }
    }

    #[test]
    fn path_round_trips_through_parse() {
        let route = Route::board("d-9");
        assert_eq!(route.path(), "/draft/d-9");
        assert_eq!(Route::parse(&route.to_string()), route);
        assert_eq!(Route::Setup.path(), "/");
    }
}
