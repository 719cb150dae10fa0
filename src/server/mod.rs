//! HTTP surface for composed fragments
//!
//! - `GET /taghelper/:tag` renders one component to `{ html, resources }`
//! - `GET {resource_base}/style-{hash}.css` and `.../script-{hash}.js` serve
//!   registry content for link-mode fragments
//! - `GET /health` reports registry and catalog sizes
//!
//! Every request is its own render session: it gets a fresh manifest that is
//! dropped with the response.

pub mod api;
pub mod error;
pub mod links;
mod router;
pub mod state;

pub use error::ApiError;
pub use router::{build_router, start_server};
pub use state::AppState;
