pub mod categories;
pub mod explorer;
pub mod home;
pub mod network;
pub mod not_found;
mod sample;
