// Library root: draft service client, cancellable resource slots, and the
// setup/board flow controllers. Rendering lives in `draftboard-tui`.

pub mod api;
pub mod board;
pub mod config;
pub mod resource;
pub mod route;
pub mod setup;
pub mod view;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
