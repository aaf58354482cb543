use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tilegrid::effects::Effect;
use tilegrid::events::PointerEvent;
use tilegrid::{Board, Census, GridError, Params, Pattern, ScanResult, TileType};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Largest board a request may ask for (4096 x 4096).
const MAX_CELLS: usize = 1 << 24;

/// Grid and scanner share one lock: no concurrent scan and mutate.
type AppState = Arc<Mutex<Board>>;

#[derive(Error, Debug)]
enum ApiError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("board lock poisoned")]
    Poisoned,

    #[error("board generation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Grid(_) => StatusCode::BAD_REQUEST,
            ApiError::Poisoned | ApiError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(%status, error = %self, "request failed");
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

fn lock(state: &AppState) -> Result<MutexGuard<'_, Board>, ApiError> {
    state.lock().map_err(|_| ApiError::Poisoned)
}

#[derive(Serialize)]
struct Snapshot {
    width: usize,
    height: usize,
    cells: Vec<TileType>,
    census: Census,
    scan: ScanResult,
}

impl Snapshot {
    fn of(board: &Board) -> Self {
        Self {
            width: board.grid().width(),
            height: board.grid().height(),
            cells: board.grid().cells().to_vec(),
            census: *board.census(),
            scan: board.last_scan(),
        }
    }
}

#[derive(Deserialize)]
struct CellRequest {
    x: i32,
    y: i32,
    tile: TileType,
}

#[derive(Deserialize)]
struct NeighborRequest {
    x: i32,
    y: i32,
    pattern: Pattern,
}

#[derive(Serialize, Debug, PartialEq)]
struct NeighborEntry {
    x: usize,
    y: usize,
    level: u8,
}

/// Rejects boards too large to allocate before any work is spawned.
fn check_size(params: &Params) -> Result<(), GridError> {
    match params.width.checked_mul(params.height) {
        Some(n) if n <= MAX_CELLS => Ok(()),
        _ => Err(GridError::InvalidDimensions {
            width: params.width,
            height: params.height,
        }),
    }
}

async fn create_board(
    State(state): State<AppState>,
    Json(params): Json<Params>,
) -> Result<Json<Snapshot>, ApiError> {
    check_size(&params)?;
    let (board, report) = tokio::task::spawn_blocking(move || Board::generate(params)).await??;
    info!(
        width = board.grid().width(),
        height = board.grid().height(),
        total_ms = report.timings.last().map(|t| t.ms).unwrap_or_default(),
        "board generated"
    );
    let snapshot = Snapshot::of(&board);
    *lock(&state)? = board;
    Ok(Json(snapshot))
}

async fn get_board(State(state): State<AppState>) -> Result<Json<Snapshot>, ApiError> {
    let board = lock(&state)?;
    Ok(Json(Snapshot::of(&board)))
}

async fn set_cell(
    State(state): State<AppState>,
    Json(req): Json<CellRequest>,
) -> Result<Json<Snapshot>, ApiError> {
    let mut board = lock(&state)?;
    board.set_cell(req.x, req.y, req.tile);
    board.refresh();
    Ok(Json(Snapshot::of(&board)))
}

async fn neighbors(
    State(state): State<AppState>,
    Json(req): Json<NeighborRequest>,
) -> Result<Json<Vec<NeighborEntry>>, ApiError> {
    let board = lock(&state)?;
    let entries = board
        .grid()
        .neighbors(req.x, req.y, req.pattern)
        .leveled()
        .map(|(x, y, level)| NeighborEntry { x, y, level })
        .collect();
    Ok(Json(entries))
}

async fn pointer(
    State(state): State<AppState>,
    Json(event): Json<PointerEvent>,
) -> Result<Json<Vec<Effect>>, ApiError> {
    let mut board = lock(&state)?;
    board.push_event(event);
    Ok(Json(board.drain_events()))
}

fn router(state: AppState, frontend: &str) -> Router {
    Router::new()
        .route("/api/board", get(get_board).post(create_board))
        .route("/api/cell", post(set_cell))
        .route("/api/neighbors", post(neighbors))
        .route("/api/pointer", post(pointer))
        .fallback_service(ServeDir::new(frontend))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr: SocketAddr = std::env::var("TILEGRID_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .context("invalid TILEGRID_ADDR")?;
    let frontend = std::env::var("TILEGRID_FRONTEND").unwrap_or_else(|_| "frontend".to_string());

    let (board, _) = Board::generate(Params::default()).context("failed to build initial board")?;
    let app = router(Arc::new(Mutex::new(board)), &frontend);

    info!("tilegrid server at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
