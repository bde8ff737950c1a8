pub mod build;
pub mod setup_env;
pub mod version;
