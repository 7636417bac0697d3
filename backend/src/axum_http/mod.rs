pub mod api_response;
pub mod default_routers;
pub mod http_serve;
pub mod routers;
