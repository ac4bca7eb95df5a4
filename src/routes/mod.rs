pub mod info_routes;
pub mod twin_routes;
