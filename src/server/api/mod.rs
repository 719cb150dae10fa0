// HTTP API module - fragment rendering and resource delivery
//
// Handlers are thin: they validate request input, run one render session or
// one registry lookup, and map failures to `ApiError`.

mod fragment;
mod health;
mod resources;

pub use fragment::{render_fragment, FragmentQuery, FragmentResponse};
pub use health::{health, HealthResponse};
pub use resources::{get_resource, parse_resource_file};
