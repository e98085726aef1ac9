//! A single connected push-channel client.

use actix::prelude::*;
use actix_web_actors::ws;

use super::{Broadcaster, Push};

/// Websocket session actor. The channel is publish-only: inbound frames
/// other than ping/close are ignored.
pub struct WsSession {
    broadcaster: Broadcaster,
}

impl WsSession {
    pub fn new(broadcaster: Broadcaster) -> Self {
        Self { broadcaster }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::debug!("push channel client connected");

        let broadcaster = self.broadcaster.clone();
        let client = ctx.address().recipient();
        actix_rt::spawn(async move {
            broadcaster.register(client).await;
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::debug!("push channel client disconnected");
        // The registry prunes this session on the next publish.
    }
}

impl Handler<Push> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Push, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => ctx.pong(&payload),
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            // Publish-only channel; inbound payloads carry no meaning.
            Ok(ws::Message::Text(_)) | Ok(ws::Message::Binary(_)) => {}
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {}
            Err(e) => {
                tracing::debug!("websocket protocol error: {}", e);
                ctx.stop();
            }
        }
    }
}
