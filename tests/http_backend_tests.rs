use actix_web::rt::System;
use actix_web::{App, HttpResponse, HttpServer, web};
use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};

use storyfeed::backend::{FallbackStore, HttpBackend, MemoryKvStore, StoryBackend};
use storyfeed::core::feed::StoryFeed;
use storyfeed::core::submit::StoryForm;
use storyfeed::errors::AppError;
use storyfeed::models::{ClientMeta, Feeling, NewStory, Source};
use storyfeed::render::View;
use storyfeed::server::{AppState, configure};

/// Serve `setup` on an ephemeral local port from a background thread.
fn spawn(setup: fn(&mut web::ServiceConfig)) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let data = web::Data::new(AppState::in_memory("test-pepper").expect("state"));

    thread::spawn(move || {
        System::new().block_on(async move {
            HttpServer::new(move || App::new().app_data(data.clone()).configure(setup))
                .workers(1)
                .listen(listener)?
                .run()
                .await
        })
    });

    format!("http://{addr}")
}

fn always_failing(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/health").route(web::get().to(|| async { HttpResponse::Ok().finish() })),
    )
    .service(web::resource("/api/posts").default_service(web::to(|| async {
        HttpResponse::InternalServerError().body("boom")
    })));
}

fn null_list_plain_echo(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/posts")
            .route(web::get().to(|| async {
                HttpResponse::Ok()
                    .content_type("application/json")
                    .body("null")
            }))
            .route(web::post().to(|| async { HttpResponse::Created().body("created") })),
    );
}

fn new_story(text: &str, feeling: &str) -> NewStory {
    NewStory {
        text: text.to_string(),
        feeling: Feeling::from_input(feeling),
        meta: ClientMeta::new("Europe/Rome", "it-IT", "1920x1080@1", "linux"),
    }
}

#[test]
fn submit_and_list_through_the_posts_api() {
    let base = spawn(configure);
    let backend = HttpBackend::new(&base).unwrap();
    assert!(backend.is_ready());

    let mut feed = StoryFeed::new(
        Some(Box::new(backend)),
        FallbackStore::new(MemoryKvStore::new()),
    );

    for (text, feeling) in [("first over http", "Calm"), ("second over http", "Hopeful")] {
        let mut form = StoryForm::new(text, feeling);
        let outcome = feed.submit(&mut form, &ClientMeta::default()).unwrap();
        assert_eq!(outcome.source, Source::Primary);
        assert_eq!(outcome.stored.text, text);
        assert!(outcome.stored.id.is_some());
    }

    let listing = feed.fetch(50);
    assert_eq!(listing.source, Source::Primary);
    let texts: Vec<&str> = listing.stories.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["second over http", "first over http"]);
    assert_eq!(listing.stories[0].feeling.label(), "Hopeful");

    let rendered = feed.render(View::Highlights);
    assert!(!rendered.offline);
    assert_eq!(rendered.count, 2);
    assert!(feed.fallback().load().is_empty());
}

#[test]
fn limit_is_forwarded_to_the_api() {
    let base = spawn(configure);
    let backend = HttpBackend::new(&base).unwrap();
    for i in 0..4 {
        backend.create(&new_story(&format!("story {i}"), "")).unwrap();
    }

    let latest = backend.fetch_latest(2).unwrap();
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].text, "story 3");
}

#[test]
fn error_status_falls_back_to_device_store() {
    let base = spawn(always_failing);
    let backend = HttpBackend::new(&base).unwrap();

    assert!(matches!(
        backend.fetch_latest(5),
        Err(AppError::BackendStatus(500))
    ));
    assert!(matches!(
        backend.create(&new_story("x", "Sad")),
        Err(AppError::BackendStatus(500))
    ));

    let mut feed = StoryFeed::new(
        Some(Box::new(backend)),
        FallbackStore::new(MemoryKvStore::new()),
    );
    let mut form = StoryForm::new("kept on device", "Sad");
    let outcome = feed.submit(&mut form, &ClientMeta::default()).unwrap();

    assert_eq!(outcome.source, Source::Fallback);
    assert!(outcome.listing.offline);
    assert!(outcome.listing.html.contains("kept on device"));
    assert_eq!(feed.fallback().load().len(), 1);
}

#[test]
fn null_list_and_unparseable_echo_are_tolerated() {
    let base = spawn(null_list_plain_echo);
    let backend = HttpBackend::new(&base).unwrap();

    assert!(backend.fetch_latest(50).unwrap().is_empty());

    let stored = backend.create(&new_story("echo missing", "")).unwrap();
    assert_eq!(stored.text, "echo missing");
    assert_eq!(stored.feeling, Feeling::Unknown);
    assert_eq!(stored.id, None);
}

#[test]
fn readiness_check_gives_up_quickly_on_silent_host() {
    // accepts connections (kernel backlog) but never answers
    let silent = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base = format!("http://{}", silent.local_addr().unwrap());

    let backend = HttpBackend::new(&base)
        .unwrap()
        .with_health_timeout(Duration::from_millis(150))
        .unwrap();

    let started = Instant::now();
    assert!(!backend.is_ready());
    assert!(started.elapsed() < Duration::from_secs(2));
}
