//! Single binary web server: REST API, server-sent change events, optional static client.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:3000 by default. Override with env: HOST, PORT, DATA_FILE,
//! STATIC_DIR, UPCOMING_ROUNDS (see `badminton_rotation::config`).

use actix_files::Files;
use actix_web::{
    delete, error, get, http::header, post, put,
    web::{self, Bytes, Data, Json, Path},
    App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use badminton_rotation::{
    ConfigUpdate, PlayerId, ScoreSubmission, ServerConfig, SnapshotFile, TournamentError,
    TournamentEvent, TournamentSession,
};
use futures::{future, stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;

/// The one tournament this process serves.
type AppState = Data<TournamentSession>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct SuccessResponse {
    success: bool,
}

#[derive(Deserialize)]
struct AddPlayersBody {
    names: Vec<String>,
}

#[derive(Deserialize)]
struct SubmitScoresBody {
    scores: Vec<ScoreSubmission>,
}

/// Path segment: player id (e.g. /api/players/{id})
#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

/// Map a core error to a status code with a `{"error": ...}` body.
fn error_response(e: TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::Storage(_) => {
            log::error!("{}", e);
            HttpResponse::InternalServerError().json(body)
        }
        TournamentError::InvalidState => {
            log::warn!("Rejected: {}", e);
            HttpResponse::Conflict().json(body)
        }
        _ => {
            log::warn!("Rejected: {}", e);
            HttpResponse::BadRequest().json(body)
        }
    }
}

/// Run a mutation on the blocking pool: it may write the data file while holding the lock.
async fn commit<T, F>(state: AppState, op: F) -> Result<T, TournamentError>
where
    T: Send + 'static,
    F: FnOnce(&TournamentSession) -> Result<T, TournamentError> + Send + 'static,
{
    web::block(move || op(&state))
        .await
        .map_err(|e| TournamentError::Storage(e.to_string()))?
}

fn json_or_error<T: Serialize>(result: Result<T, TournamentError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(e),
    }
}

fn success_or_error(result: Result<(), TournamentError>) -> HttpResponse {
    json_or_error(result.map(|()| SuccessResponse { success: true }))
}

fn csv_or_error(result: Result<String, TournamentError>, filename: &str) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ))
            .body(body),
        Err(e) => error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-rotation",
    })
}

/// Everything a freshly opened view needs.
#[get("/api/state")]
async fn api_state(state: AppState) -> HttpResponse {
    json_or_error(state.full_state())
}

/// Server-sent events: a `sync:full-state` event first, then one chunk per committed mutation.
#[get("/api/events")]
async fn api_events(state: AppState) -> HttpResponse {
    let (snapshot, receiver) = match state.subscribe() {
        Ok(sub) => sub,
        Err(e) => return error_response(e),
    };
    let first = sse_chunk(&[TournamentEvent::FullState(Box::new(snapshot))]);

    let live = stream::unfold((receiver, state), |(mut receiver, state)| async move {
        loop {
            match receiver.recv().await {
                Ok(batch) => return Some((sse_chunk(&batch), (receiver, state))),
                Err(RecvError::Lagged(skipped)) => {
                    // Missed batches can't be replayed; resync the observer instead.
                    log::warn!("Event observer lagged by {} batch(es); sending full state", skipped);
                    match state.full_state() {
                        Ok(full) => {
                            let chunk = sse_chunk(&[TournamentEvent::FullState(Box::new(full))]);
                            return Some((chunk, (receiver, state)));
                        }
                        Err(e) => {
                            log::error!("Cannot resync event observer: {}", e);
                            return None;
                        }
                    }
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .streaming(stream::once(future::ready(first)).chain(live))
}

/// Encode events as SSE frames in one chunk, so a batch reaches the client together.
fn sse_chunk(events: &[TournamentEvent]) -> Result<Bytes, serde_json::Error> {
    let mut out = String::new();
    for event in events {
        let data = serde_json::to_string(event)?;
        out.push_str(&format!("event: {}\ndata: {}\n\n", event.name(), data));
    }
    Ok(Bytes::from(out))
}

#[get("/api/players")]
async fn api_get_players(state: AppState) -> HttpResponse {
    json_or_error(state.players())
}

/// Add players by name; returns the roster sorted by name.
#[post("/api/players")]
async fn api_add_players(state: AppState, body: Json<AddPlayersBody>) -> HttpResponse {
    if body.names.is_empty() {
        return error_response(TournamentError::NoPlayerNames);
    }
    let names = body.into_inner().names;
    json_or_error(commit(state, move |s| s.add_players(names.as_slice())).await)
}

/// Add players from a CSV body (first column).
#[post("/api/players/import")]
async fn api_import_players(state: AppState, body: String) -> HttpResponse {
    json_or_error(commit(state, move |s| s.import_roster_csv(&body)).await)
}

#[delete("/api/players/{id}")]
async fn api_remove_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let id = path.id;
    success_or_error(commit(state, move |s| s.remove_player(id)).await)
}

#[delete("/api/players")]
async fn api_remove_all_players(state: AppState) -> HttpResponse {
    success_or_error(commit(state, |s| s.remove_all_players()).await)
}

#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    json_or_error(state.tournament())
}

/// Update courts / mode / winPoints; omitted fields keep their value.
#[put("/api/tournament/config")]
async fn api_update_config(state: AppState, body: Json<ConfigUpdate>) -> HttpResponse {
    let update = body.into_inner();
    json_or_error(commit(state, move |s| s.update_config(update)).await)
}

/// Start the tournament (Setup -> Playing).
#[post("/api/tournament/start")]
async fn api_start_tournament(state: AppState) -> HttpResponse {
    json_or_error(commit(state, |s| s.start()).await)
}

/// Reset everything back to a fresh Setup.
#[post("/api/tournament/reset")]
async fn api_reset_tournament(state: AppState) -> HttpResponse {
    success_or_error(commit(state, |s| s.reset()).await)
}

#[get("/api/courts")]
async fn api_get_courts(state: AppState) -> HttpResponse {
    json_or_error(state.active_courts())
}

#[get("/api/courts/upcoming")]
async fn api_upcoming_rounds(state: AppState) -> HttpResponse {
    json_or_error(state.upcoming_rounds())
}

/// Reshuffle the current round before any scores are in.
#[post("/api/courts/shuffle")]
async fn api_shuffle(state: AppState) -> HttpResponse {
    json_or_error(commit(state, |s| s.shuffle()).await)
}

/// Submit the round's scores and move to the next round.
#[post("/api/courts/submit-scores")]
async fn api_submit_scores(state: AppState, body: Json<SubmitScoresBody>) -> HttpResponse {
    let scores = body.into_inner().scores;
    json_or_error(commit(state, move |s| s.submit_scores(&scores)).await)
}

#[get("/api/leaderboard")]
async fn api_leaderboard(state: AppState) -> HttpResponse {
    json_or_error(state.leaderboard())
}

#[get("/api/leaderboard.csv")]
async fn api_leaderboard_csv(state: AppState) -> HttpResponse {
    csv_or_error(state.leaderboard_csv(), "leaderboard.csv")
}

#[get("/api/history")]
async fn api_history(state: AppState) -> HttpResponse {
    json_or_error(state.history())
}

#[get("/api/history.csv")]
async fn api_history_csv(state: AppState) -> HttpResponse {
    csv_or_error(state.history_csv(), "history.csv")
}

/// Full round-robin schedule for the current roster (preview only, nothing is stored).
#[get("/api/schedule/round-robin")]
async fn api_round_robin(state: AppState) -> HttpResponse {
    json_or_error(state.round_robin_preview())
}

/// Malformed JSON or path segments get the same `{"error": ...}` shape as core errors.
fn bad_request<E>(message: String, err: E) -> error::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    log::warn!("Rejected request: {}", message);
    error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
    )
    .into()
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    bad_request(err.to_string(), err)
}

fn path_error(err: error::PathError, _req: &HttpRequest) -> error::Error {
    bad_request(format!("Invalid path: {}", err), err)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let snapshot = config.data_file.clone().map(SnapshotFile::new);
    match &snapshot {
        Some(file) => log::info!("Tournament data file: {}", file.path().display()),
        None => log::info!("Tournament data kept in memory only"),
    }
    let session = TournamentSession::open(snapshot)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?
        .with_upcoming_rounds(config.upcoming_rounds);
    let state = Data::new(session);

    let static_dir = config.static_dir.clone();
    let serve_static = static_dir.is_dir();
    if serve_static {
        log::info!("Serving client from {}", static_dir.display());
    }

    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let static_dir = static_dir.clone();
        App::new()
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::PathConfig::default().error_handler(path_error))
            .service(api_health)
            .service(api_state)
            .service(api_events)
            .service(api_get_players)
            .service(api_add_players)
            .service(api_import_players)
            .service(api_remove_player)
            .service(api_remove_all_players)
            .service(api_get_tournament)
            .service(api_update_config)
            .service(api_start_tournament)
            .service(api_reset_tournament)
            .service(api_get_courts)
            .service(api_upcoming_rounds)
            .service(api_shuffle)
            .service(api_submit_scores)
            .service(api_leaderboard)
            .service(api_leaderboard_csv)
            .service(api_history)
            .service(api_history_csv)
            .service(api_round_robin)
            .configure(move |cfg| {
                // Registered last: the client catches every path the API doesn't.
                if serve_static {
                    cfg.service(Files::new("/", static_dir).index_file("index.html"));
                }
            })
    })
    .bind(bind)?
    .run()
    .await
}
