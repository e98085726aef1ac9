/// Push channel upgrade endpoint.
///
/// Usage: `GET /ws`. The server sends every mutation event to every client;
/// clients re-fetch `/api/content` after connecting to pick up current state.
use actix_web::{web, HttpRequest, HttpResponse};
use actix_web_actors::ws;

use crate::realtime::WsSession;
use crate::AppState;

pub async fn connect(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    ws::start(WsSession::new(state.broadcaster.clone()), &req, stream)
}
