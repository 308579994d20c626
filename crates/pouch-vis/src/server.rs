//! Axum web server with WebSocket streaming for the carousel.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use pouch_carousel::{Carousel, CarouselEvent, CarouselNotice, CarouselView};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use crate::driver::AutoAdvanceDriver;
use crate::error::Result;

/// Notices buffered per WebSocket subscriber before it starts lagging.
const NOTICE_CAPACITY: usize = 64;

/// Shared application state.
pub struct AppState {
    pub(crate) carousel: RwLock<Carousel>,
    notices: broadcast::Sender<CarouselNotice>,
}

impl AppState {
    pub fn new(carousel: Carousel) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        Self {
            carousel: RwLock::new(carousel),
            notices,
        }
    }

    /// Apply one event and fan its notices out to subscribers.
    pub async fn dispatch(&self, event: CarouselEvent) -> pouch_carousel::Result<Vec<CarouselNotice>> {
        let notices = self.carousel.write().await.handle(event)?;
        self.publish(&notices);
        Ok(notices)
    }

    pub(crate) fn publish(&self, notices: &[CarouselNotice]) {
        for notice in notices {
            // No subscribers is fine
            let _ = self.notices.send(notice.clone());
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CarouselNotice> {
        self.notices.subscribe()
    }

    pub async fn view(&self) -> CarouselView {
        self.carousel.read().await.view()
    }

    pub async fn status(&self) -> StatusResponse {
        StatusResponse::from(&*self.carousel.read().await)
    }
}

/// Carousel host server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    pub fn new(carousel: Carousel) -> Self {
        Self {
            state: Arc::new(AppState::new(carousel)),
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/api/status", get(status_handler))
            .route("/api/view", get(view_handler))
            .route("/api/event", post(event_handler))
            .route("/api/unmount", post(unmount_handler))
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Mount the driver and serve until the listener fails.
    pub async fn serve(self, port: u16, tick: Duration) -> Result<()> {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let _driver = AutoAdvanceDriver::spawn(self.state.clone(), tick);
        info!("Carousel host running on http://localhost:{}", port);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Server status response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    pub mounted: bool,
    pub total: usize,
    pub active_index: Option<usize>,
    pub timer_armed: bool,
    pub suspended: bool,
    pub interval_ms: u64,
}

impl From<&Carousel> for StatusResponse {
    fn from(carousel: &Carousel) -> Self {
        Self {
            status: "ok".to_string(),
            mounted: carousel.is_mounted(),
            total: carousel.len(),
            active_index: carousel.active_index(),
            timer_armed: carousel.timer_armed(),
            suspended: carousel.is_suspended(),
            interval_ms: u64::try_from(carousel.interval().as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// What an event did, and what the carousel looks like now.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventResponse {
    pub notices: Vec<CarouselNotice>,
    pub view: CarouselView,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(state.status().await)
}

async fn view_handler(State(state): State<Arc<AppState>>) -> Json<CarouselView> {
    Json(state.view().await)
}

async fn event_handler(
    State(state): State<Arc<AppState>>,
    Json(event): Json<CarouselEvent>,
) -> Result<Json<EventResponse>> {
    let notices = state.dispatch(event).await?;
    Ok(Json(EventResponse {
        notices,
        view: state.view().await,
    }))
}

async fn unmount_handler(State(state): State<Arc<AppState>>) -> Result<Json<EventResponse>> {
    event_handler(State(state), Json(CarouselEvent::Unmount)).await
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let mut notices = state.subscribe();

    // Initial view
    if !send(&mut socket, &WsResponse::View(state.view().await)).await {
        return;
    }

    loop {
        tokio::select! {
            msg = socket.recv() => match msg {
                Some(Ok(Message::Text(text))) => {
                    let response = match serde_json::from_str::<WsCommand>(text.as_str()) {
                        Ok(cmd) => handle_ws_command(&state, cmd).await,
                        Err(e) => WsResponse::Error { message: e.to_string() },
                    };
                    if !send(&mut socket, &response).await {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!("websocket receive failed: {}", e);
                    break;
                }
            },
            notice = notices.recv() => match notice {
                Ok(notice) => {
                    if !send(&mut socket, &WsResponse::Notice { notice }).await {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "websocket client lagging, notices dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
}

async fn send(socket: &mut WebSocket, response: &WsResponse) -> bool {
    match serde_json::to_string(response) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(_) => true,
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum WsCommand {
    #[serde(rename = "get_view")]
    GetView,
    #[serde(rename = "get_status")]
    GetStatus,
    #[serde(rename = "event")]
    Event { event: CarouselEvent },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum WsResponse {
    #[serde(rename = "view")]
    View(CarouselView),
    #[serde(rename = "status")]
    Status(StatusResponse),
    #[serde(rename = "notice")]
    Notice { notice: CarouselNotice },
    #[serde(rename = "error")]
    Error { message: String },
}

async fn handle_ws_command(state: &Arc<AppState>, cmd: WsCommand) -> WsResponse {
    match cmd {
        WsCommand::GetView => WsResponse::View(state.view().await),
        WsCommand::GetStatus => WsResponse::Status(state.status().await),
        // Resulting notices reach this client through the broadcast
        WsCommand::Event { event } => match state.dispatch(event).await {
            Ok(_) => WsResponse::View(state.view().await),
            Err(e) => WsResponse::Error { message: e.to_string() },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use pouch_carousel::CarouselConfig;
    use pouch_testimonials::TestimonialCollection;
    use tower::ServiceExt;

    fn server() -> VisServer {
        let records = Arc::new(TestimonialCollection::builtin().unwrap());
        VisServer::new(Carousel::new(records, CarouselConfig::default()).unwrap())
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_event(json: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/event")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn port_in_use_is_an_io_error() {
        let taken = tokio::net::TcpListener::bind("0.0.0.0:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let err = server()
            .serve(port, Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn status_reports_mounted_carousel() {
        let response = server()
            .router()
            .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let status = body_json(response).await;
        assert_eq!(status["status"], "ok");
        assert_eq!(status["mounted"], true);
        assert_eq!(status["total"], 13);
        assert_eq!(status["activeIndex"], 0);
        assert_eq!(status["intervalMs"], 4000);
    }

    #[tokio::test]
    async fn view_has_seven_cards() {
        let response = server()
            .router()
            .oneshot(Request::builder().uri("/api/view").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let view = body_json(response).await;
        assert_eq!(view["cards"].as_array().unwrap().len(), 7);
        assert_eq!(view["overlay"]["kind"], "closed");
    }

    #[tokio::test]
    async fn event_navigates_and_broadcasts() {
        let server = server();
        let mut notices = server.state().subscribe();

        let response = server
            .router()
            .oneshot(post_event(r#"{"type":"Previous"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["view"]["activeIndex"], 12);
        assert_eq!(body["notices"][0]["type"], "IndexChanged");

        let notice = notices.recv().await.unwrap();
        assert!(matches!(notice, CarouselNotice::IndexChanged { from: 0, to: 12, .. }));
    }

    #[tokio::test]
    async fn detail_overlay_suspends_rotation() {
        let server = server();
        let response = server
            .router()
            .oneshot(post_event(r#"{"type":"OpenDetail","id":"cheryl"}"#))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["view"]["overlay"]["kind"], "detail");
        assert_eq!(body["view"]["overlay"]["id"], "cheryl");
        assert_eq!(body["view"]["timerArmed"], false);
    }

    #[tokio::test]
    async fn unknown_record_is_not_found() {
        let response = server()
            .router()
            .oneshot(post_event(r#"{"type":"OpenDetail","id":"nobody"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("nobody"));
    }

    #[tokio::test]
    async fn zero_interval_is_bad_request() {
        let response = server()
            .router()
            .oneshot(post_event(r#"{"type":"SetInterval","interval_ms":0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unmount_freezes_the_carousel() {
        let server = server();
        let router = server.router();

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/unmount")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["view"]["mounted"], false);

        let response = router.oneshot(post_event(r#"{"type":"Next"}"#)).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["notices"].as_array().unwrap().len(), 0);
        assert_eq!(body["view"]["activeIndex"], 0);
    }
}
