pub mod loader;
pub mod schema;

pub use loader::{
    find_all_config_files, load_config, load_config_from_file, parse_config, resolve_config,
    ConfigFormat, ResolvedConfig,
};
pub use schema::{EventsSettings, LitheConfig};
