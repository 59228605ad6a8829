//! Server-sent revalidation events for connected dashboard views.
//!
//! ```text
//! GET /dashboard/revalidations
//!
//! event: revalidate
//! data: {"path":"/dashboard/invoices","generation":4}
//! ```

use std::convert::Infallible;

use actix_web::http::header::CACHE_CONTROL;
use actix_web::{HttpResponse, get, web};
use futures_util::stream;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

use crate::domain::ports::RevalidationEvent;
use crate::inbound::http::state::HttpState;

const EVENT_NAME: &str = "revalidate";

fn frame(event: &RevalidationEvent) -> Option<web::Bytes> {
    serde_json::to_string(event)
        .ok()
        .map(|data| web::Bytes::from(format!("event: {EVENT_NAME}\ndata: {data}\n\n")))
}

async fn next_frame(
    mut events: broadcast::Receiver<RevalidationEvent>,
) -> Option<(Result<web::Bytes, Infallible>, broadcast::Receiver<RevalidationEvent>)> {
    loop {
        match events.recv().await {
            Ok(event) => {
                if let Some(bytes) = frame(&event) {
                    return Some((Ok(bytes), events));
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "revalidation stream lagged");
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

/// Stream revalidation events so views can refetch stale listings.
#[utoipa::path(
    get,
    path = "/dashboard/revalidations",
    responses(
        (status = 200, description = "Event stream", content_type = "text/event-stream", body = String),
        (status = 303, description = "Not signed in")
    ),
    tags = ["invoices"],
    operation_id = "streamRevalidations"
)]
#[get("/revalidations")]
pub async fn revalidation_events(state: web::Data<HttpState>) -> HttpResponse {
    let events = state.revalidator.subscribe();
    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header((CACHE_CONTROL, "no-cache"))
        .streaming(stream::unfold(events, next_frame))
}
