pub mod app;
pub mod config;
pub mod http;
pub mod registry;

pub use app::App;
pub use registry::Registry;
