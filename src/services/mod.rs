use std::sync::Arc;

use actix_web::web;

mod url;

pub use self::url::{UrlService, UrlServiceTrait};

use crate::repositories::UrlRepositoryTrait;

/// Wraps a store in a service shared across all workers.
pub fn build<R: UrlRepositoryTrait + 'static>(repository: R) -> web::Data<UrlService<R>> {
    web::Data::new(UrlService::new(Arc::new(repository)))
}
