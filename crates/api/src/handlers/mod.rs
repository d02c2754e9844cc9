//! HTTP handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod car_mods;
pub mod cars;
pub mod lapbook;
pub mod profile;
pub mod track_images;
pub mod track_reviews;
pub mod track_zones;
pub mod tracks;
pub mod zone_tips;
