use super::GameEngine;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use gfl_auth::Crypto;
use gfl_engine::UpdateEvent;
use tokio::sync::mpsc::UnboundedReceiver;

/// Upgrades the connection and streams diff events to the client.
///
/// Subscribing is open to spectators: a token is accepted via query
/// parameter and logged when present, but mutations go through the
/// authenticated POST routes, so an anonymous stream can only watch.
pub async fn updates(
    engine: web::Data<GameEngine>,
    tokens: web::Data<Crypto>,
    query: web::Query<std::collections::HashMap<String, String>>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    query
        .get("token")
        .and_then(|t| tokens.decode(t).ok())
        .filter(|c| !c.expired())
        .inspect(|c| log::info!("[updates] player {} subscribed", c.user()))
        .map(std::mem::drop)
        .unwrap_or_else(|| log::info!("[updates] anonymous spectator subscribed"));
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            bridge(engine.subscribe(), session, stream);
            response.map_into_left_body()
        }
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}

/// Pumps the subscription into the WebSocket session until either
/// side hangs up. Dropping the receiver is what unsubscribes from the
/// broadcaster; in-flight engine operations are unaffected.
fn bridge(
    mut updates: UnboundedReceiver<UpdateEvent>,
    mut session: actix_ws::Session,
    mut stream: actix_ws::MessageStream,
) {
    use futures::StreamExt;
    actix_web::rt::spawn(async move {
        'sesh: loop {
            tokio::select! {
                biased;
                event = updates.recv() => match event {
                    Some(event) => if session.text(event.to_json()).await.is_err() { break 'sesh },
                    None => break 'sesh,
                },
                msg = stream.next() => match msg {
                    Some(Ok(actix_ws::Message::Ping(bytes))) => {
                        if session.pong(&bytes).await.is_err() { break 'sesh }
                    }
                    Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                    Some(Err(_)) => break 'sesh,
                    None => break 'sesh,
                    _ => continue 'sesh,
                },
            }
        }
        log::debug!("[updates] subscriber disconnected");
    });
}
