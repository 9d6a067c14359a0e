// Job listings: formula construction, pagination, record mapping and the
// query services behind the /api/jobs routes.

pub mod formula;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod pagination;
pub mod service;
