mod provision;
mod server;

pub use provision::{CONFIG_FILE_NAME, ProvisionConfig};
pub use server::ServerConfig;
