mod target_url;

pub use target_url::validate_url;
