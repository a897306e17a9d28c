mod url;

#[cfg(test)]
pub mod memory;

#[cfg(test)]
pub use self::url::MockUrlRepositoryTrait;
pub use self::url::{UrlRepository, UrlRepositoryTrait};
