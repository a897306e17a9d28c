use actix_cors::Cors;
use actix_web::{http::header, web, HttpResponse, Responder};

use crate::{
    handlers::{create_form_handler, create_handler, index_handler, redirect_handler},
    repositories::UrlRepositoryTrait,
    types::{AppState, HealthStatus},
};

// Health check, including a round trip to the database
async fn health_check(data: web::Data<AppState>) -> impl Responder {
    let db_health = data.db.health_check().await;

    let status = HealthStatus {
        status: String::from("OK"),
        version: data.version.clone(),
        uptime_seconds: data.start_time.elapsed().as_secs(),
        db_health,
    };

    HttpResponse::Ok().json(status)
}

fn api_cors(origin: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    match origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

/// Registers every route against the store `R`.
///
/// `/{alias}` is registered ahead of the `/api` scope so that a record whose
/// alias happens to be `api` stays reachable.
pub fn configure_routes<R: UrlRepositoryTrait + 'static>(
    cfg: &mut web::ServiceConfig,
    cors_origin: Option<&str>,
) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(index_handler))
            .route(web::post().to(create_form_handler::<R>)),
    )
    .service(web::resource("/{alias}").route(web::get().to(redirect_handler::<R>)))
    .service(
        web::scope("/api")
            .wrap(api_cors(cors_origin))
            .route("/health", web::get().to(health_check))
            .route("/urls", web::post().to(create_handler::<R>)),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{dev::ServiceResponse, http::StatusCode, test, App};
    use serde_json::{json, Value};

    use super::*;
    use crate::config::{AppConfig, Environment};
    use crate::models::CreateUrlDto;
    use crate::repositories::memory::InMemoryUrlRepository;
    use crate::services::UrlService;

    fn app_config() -> AppConfig {
        AppConfig {
            name: "url-alias".into(),
            version: "test".into(),
            environment: Environment::Testing,
            log_level: "debug".into(),
            base_url: "http://sho.rt".into(),
            cors_origin: None,
        }
    }

    macro_rules! test_app {
        ($repo:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(UrlService::new($repo)))
                    .app_data(web::Data::new(app_config()))
                    .configure(|cfg| configure_routes::<InMemoryUrlRepository>(cfg, None)),
            )
            .await
        };
    }

    fn location<B>(resp: &ServiceResponse<B>) -> &str {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn form_submission_redirects_home_with_alias() {
        let repo = Arc::new(InMemoryUrlRepository::new());
        let app = test_app!(repo.clone());

        let req = test::TestRequest::post()
            .uri("/")
            .set_form(CreateUrlDto::new("https://example.org/page"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/?alias=1");
        assert_eq!(repo.records().await[0].alias.as_deref(), Some("1"));
    }

    #[actix_web::test]
    async fn alias_redirects_to_stored_url() {
        let app = test_app!(Arc::new(InMemoryUrlRepository::new()));

        let req = test::TestRequest::post()
            .uri("/")
            .set_form(CreateUrlDto::new("https://example.org/page"))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/1").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "https://example.org/page");
    }

    #[actix_web::test]
    async fn unknown_alias_is_not_found() {
        let app = test_app!(Arc::new(InMemoryUrlRepository::new()));

        let req = test::TestRequest::get().uri("/doesNotExist").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Short URL not found");
        assert_eq!(body["status_code"], 404);
    }

    #[actix_web::test]
    async fn invalid_url_is_rejected_before_storing() {
        let repo = Arc::new(InMemoryUrlRepository::new());
        let app = test_app!(repo.clone());

        let req = test::TestRequest::post()
            .uri("/")
            .set_form(CreateUrlDto::new("not a url"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid URL");
        assert!(repo.records().await.is_empty());

        // The next valid submission still receives the first id
        let req = test::TestRequest::post()
            .uri("/")
            .set_form(CreateUrlDto::new("https://example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(location(&resp), "/?alias=1");
    }

    #[actix_web::test]
    async fn url_with_embedded_newline_is_rejected() {
        let repo = Arc::new(InMemoryUrlRepository::new());
        let app = test_app!(repo.clone());

        let req = test::TestRequest::post()
            .uri("/")
            .set_form(CreateUrlDto::new("https://example.com/a\nb"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(repo.records().await.is_empty());
    }

    #[actix_web::test]
    async fn redirect_percent_encodes_non_ascii_and_keeps_escapes() {
        let repo = Arc::new(InMemoryUrlRepository::new());
        let app = test_app!(repo.clone());

        for url in ["https://example.com/ü", "https://example.com/%C3%BC?q=a%20b"] {
            let req = test::TestRequest::post()
                .uri("/")
                .set_form(CreateUrlDto::new(url))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        }

        let req = test::TestRequest::get().uri("/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "https://example.com/%C3%BC");

        let req = test::TestRequest::get().uri("/2").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(location(&resp), "https://example.com/%C3%BC?q=a%20b");

        // The record itself keeps the submitted text
        assert_eq!(repo.records().await[0].url, "https://example.com/ü");
    }

    #[actix_web::test]
    async fn stored_control_characters_still_redirect() {
        let repo = Arc::new(InMemoryUrlRepository::new());
        let record = repo.insert("https://example.com/a\tb c").await.unwrap();
        repo.set_alias(record.id, "1").await.unwrap();
        let app = test_app!(repo);

        let req = test::TestRequest::get().uri("/1").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "https://example.com/a%09b%20c");
    }

    #[actix_web::test]
    async fn form_without_url_field_is_invalid() {
        let repo = Arc::new(InMemoryUrlRepository::new());
        let app = test_app!(repo.clone());

        let req = test::TestRequest::post()
            .uri("/")
            .set_form([("note", "no url here")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid URL");
        assert!(repo.records().await.is_empty());
    }

    #[actix_web::test]
    async fn json_api_creates_distinct_aliases_for_same_url() {
        let app = test_app!(Arc::new(InMemoryUrlRepository::new()));

        let mut aliases = Vec::new();
        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/urls")
                .set_json(json!({ "url": "https://example.com" }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);

            let body: Value = test::read_body_json(resp).await;
            let alias = body["data"]["alias"].as_str().unwrap().to_string();
            assert_eq!(body["data"]["short_url"], format!("http://sho.rt/{}", alias));
            aliases.push(alias);
        }
        assert_eq!(aliases, vec!["1", "2"]);

        for alias in aliases {
            let req = test::TestRequest::get().uri(&format!("/{}", alias)).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(location(&resp), "https://example.com");
        }
    }

    #[actix_web::test]
    async fn index_echoes_alias() {
        let app = test_app!(Arc::new(InMemoryUrlRepository::new()));

        let req = test::TestRequest::get().uri("/?alias=8M0kX").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["alias"], "8M0kX");
        assert_eq!(body["short_url"], "http://sho.rt/8M0kX");

        let req = test::TestRequest::get().uri("/?alias=").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body.get("alias").is_none());
    }
}
