// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::fs::{relative, FileServer};
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

use crate::JobSearchAgent;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

// Routes

#[get("/")]
pub async fn home() -> Result<RawHtml<String>, Status> {
    handlers::home_handler().await
}

#[post("/run", data = "<form>")]
pub async fn run_search(
    form: Form<SearchForm>,
    agent: &State<JobSearchAgent>,
) -> Result<RawHtml<String>, Status> {
    handlers::run_search_handler(form, agent).await
}

#[get("/health")]
pub async fn health() -> Json<HealthResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check the submitted form fields".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

/// Assembles the Rocket instance. Split from `start_web_server` so tests
/// can drive it through a local client.
pub fn build_rocket(agent: JobSearchAgent) -> Rocket<Build> {
    rocket::build()
        .attach(Cors)
        .manage(agent)
        .register("/", catchers![bad_request, internal_error])
        .mount("/", routes![home, run_search, health, options])
        .mount("/static", FileServer::from(relative!("static")))
}

pub async fn start_web_server(agent: JobSearchAgent, port: u16) -> Result<()> {
    info!("Starting jobscout web server on 0.0.0.0:{}", port);

    let config = rocket::Config {
        port,
        address: std::net::Ipv4Addr::UNSPECIFIED.into(),
        ..rocket::Config::default()
    };

    build_rocket(agent).configure(config).launch().await?;

    Ok(())
}
