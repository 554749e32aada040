use super::AppState;
use super::client::request_meta;
use crate::db::log::audit_quiet;
use crate::db::queries::{insert_post, load_latest_posts};
use crate::models::story::{MAX_FEELING_CHARS, MAX_STORY_CHARS};
use crate::models::{ClientMeta, Feeling, NewStory};
use actix_web::http::{Method, header};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, web};
use serde::Deserialize;

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 500;
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").route(web::get().to(health)))
        .service(
            web::resource("/api/posts")
                .route(web::get().to(list_posts))
                .route(web::post().to(create_post))
                .route(web::method(Method::OPTIONS).to(preflight))
                .default_service(web::to(method_not_allowed)),
        );
}

/// Attach the CORS headers every `/api/posts` response carries.
fn cors(req: &HttpRequest, mut builder: HttpResponseBuilder) -> HttpResponseBuilder {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or("*")
        .to_string();

    builder
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, origin))
        .insert_header((header::VARY, "Origin"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "GET,POST,OPTIONS"))
        .insert_header((
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "Content-Type,Accept,Accept-Language",
        ))
        .insert_header((header::ACCESS_CONTROL_MAX_AGE, "86400"));
    builder
}

fn plain(req: &HttpRequest, builder: HttpResponseBuilder, msg: &str) -> HttpResponse {
    cors(req, builder).content_type(TEXT_PLAIN).body(msg.to_string())
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

async fn preflight(req: HttpRequest) -> HttpResponse {
    cors(&req, HttpResponse::NoContent()).finish()
}

async fn method_not_allowed(req: HttpRequest) -> HttpResponse {
    plain(&req, HttpResponse::MethodNotAllowed(), "method not allowed")
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    limit: Option<String>,
}

/// `limit` is honored only when it is an integer in `1..=500`.
pub fn parse_limit(raw: Option<&str>) -> usize {
    raw.map(str::trim)
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|n| (1..=MAX_LIMIT).contains(n))
        .unwrap_or(DEFAULT_LIMIT)
}

async fn list_posts(
    req: HttpRequest,
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> HttpResponse {
    let limit = parse_limit(params.limit.as_deref());

    let result = {
        let conn = state.conn.lock();
        load_latest_posts(&conn, limit)
    };

    match result {
        Ok(posts) => cors(&req, HttpResponse::Ok()).json(posts),
        Err(e) => {
            tracing::error!("query error: {e}");
            plain(
                &req,
                HttpResponse::InternalServerError(),
                "failed to query posts",
            )
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreatePost {
    pub story: String,
    pub feeling: String,
    pub client_tz: String,
    pub client_lang: String,
    pub screen: String,
    pub platform: String,
}

/// Server-side rules for an incoming post (fields already trimmed).
pub fn validate_post(story: &str, feeling: &str) -> Result<(), String> {
    if story.is_empty() {
        return Err("story is required".into());
    }
    if story.chars().count() > MAX_STORY_CHARS {
        return Err(format!("story is too long (max {MAX_STORY_CHARS} chars)"));
    }
    if feeling.is_empty() {
        return Err("feeling is required".into());
    }
    if feeling.chars().count() > MAX_FEELING_CHARS {
        return Err(format!("feeling is too long (max {MAX_FEELING_CHARS} chars)"));
    }
    Ok(())
}

async fn create_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> HttpResponse {
    let input: CreatePost = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(_) => return plain(&req, HttpResponse::BadRequest(), "invalid JSON body"),
    };

    let story = input.story.trim();
    let feeling = input.feeling.trim();
    if let Err(msg) = validate_post(story, feeling) {
        return plain(&req, HttpResponse::BadRequest(), &msg);
    }

    let new_story = NewStory {
        text: story.to_string(),
        feeling: Feeling::from_input(feeling),
        meta: ClientMeta::new(
            &input.client_tz,
            &input.client_lang,
            &input.screen,
            &input.platform,
        ),
    };
    let meta = request_meta(&req, &state.pepper);

    let result = {
        let conn = state.conn.lock();
        let stored = insert_post(&conn, &new_story, &meta);
        if let Ok(s) = &stored {
            let id = s.id.map(|id| id.to_string()).unwrap_or_default();
            audit_quiet(&conn, "api_post", &id, "Story stored via API");
        }
        stored
    };

    match result {
        Ok(stored) => cors(&req, HttpResponse::Created()).json(stored),
        Err(e) => {
            tracing::error!("insert error: {e}");
            plain(
                &req,
                HttpResponse::InternalServerError(),
                "failed to save post",
            )
        }
    }
}
