use actix_web::{http::header::LOCATION, web, HttpResponse, Responder};
use log::{debug, info};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::json;

use crate::{
    config::AppConfig,
    models::{CreateUrlDto, IndexQuery, UrlResponseDto},
    repositories::UrlRepositoryTrait,
    services::{UrlService, UrlServiceTrait},
    types::{IndexPayload, Result},
};

/// Bytes escaped in a `Location` header. Non-ASCII is always escaped;
/// `%` is not, so escapes already present in the stored URL survive.
const LOCATION_ESCAPES: &AsciiSet = &CONTROLS.add(b' ');

/// Home page: echoes a freshly created alias back to the submitter
pub async fn index_handler(
    query: web::Query<IndexQuery>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let alias = query.into_inner().alias.filter(|a| !a.is_empty());
    let short_url = alias.as_ref().map(|a| join_short_url(&config.base_url, a));
    let message = match &alias {
        Some(_) => "Your short URL is ready".to_string(),
        None => "Submit a URL to shorten it".to_string(),
    };

    HttpResponse::Ok().json(IndexPayload {
        status: 200,
        message,
        alias,
        short_url,
    })
}

/// Form submission: create, then send the browser back to the home page
pub async fn create_form_handler<R: UrlRepositoryTrait + 'static>(
    form: web::Form<CreateUrlDto>,
    service: web::Data<UrlService<R>>,
) -> Result<impl Responder> {
    let record = service.create(form.into_inner()).await?;
    let alias = record.alias.unwrap_or_default();
    let encoded: String = ::url::form_urlencoded::byte_serialize(alias.as_bytes()).collect();

    Ok(HttpResponse::SeeOther()
        .insert_header((LOCATION, format!("/?alias={}", encoded)))
        .finish())
}

/// JSON API counterpart of the form submission
pub async fn create_handler<R: UrlRepositoryTrait + 'static>(
    dto: web::Json<CreateUrlDto>,
    service: web::Data<UrlService<R>>,
    config: web::Data<AppConfig>,
) -> Result<impl Responder> {
    let record = service.create(dto.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "data": UrlResponseDto::from_record(record, &config.base_url),
        "message": "Successfully created URL",
    })))
}

/// `GET /{alias}`
pub async fn redirect_handler<R: UrlRepositoryTrait + 'static>(
    path: web::Path<String>,
    service: web::Data<UrlService<R>>,
) -> Result<impl Responder> {
    let alias = path.into_inner();
    debug!("Redirect requested for alias: {}", alias);

    let url = service.resolve(&alias).await?;

    info!("Redirecting '{}' to '{}'", alias, url);
    let location = utf8_percent_encode(&url, LOCATION_ESCAPES).to_string();
    Ok(HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish())
}

fn join_short_url(base_url: &str, alias: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), alias)
}
