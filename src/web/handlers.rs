// src/web/handlers.rs

use askama::Template;
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

use crate::web::types::{HealthResponse, IndexTemplate, SearchForm};
use crate::{JobSearchAgent, SearchRequest};

pub async fn home_handler() -> Result<RawHtml<String>, Status> {
    render_page(IndexTemplate::landing())
}

pub async fn run_search_handler(
    form: Form<SearchForm>,
    agent: &State<JobSearchAgent>,
) -> Result<RawHtml<String>, Status> {
    let form = form.into_inner();
    let request = SearchRequest {
        role: form.title.trim().to_string(),
        location: form.location.trim().to_string(),
        years: form.years.unwrap_or(0),
    };

    info!(
        "Job search: {} in {} ({} years of experience)",
        request.role, request.location, request.years
    );

    let outcome = agent.run(&request).await;
    info!(
        "Ranked {} of {} postings",
        outcome.ranked.len(),
        outcome.postings.len()
    );

    render_page(IndexTemplate::with_results(&request, &outcome))
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "jobscout",
    })
}

fn render_page(template: IndexTemplate) -> Result<RawHtml<String>, Status> {
    match template.render() {
        Ok(html) => Ok(RawHtml(html)),
        Err(e) => {
            error!("Template rendering failed: {}", e);
            Err(Status::InternalServerError)
        }
    }
}
