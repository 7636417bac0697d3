pub mod repositories;
pub mod rest_client;
