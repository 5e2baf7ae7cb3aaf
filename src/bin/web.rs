//! Single binary web server: JSON API over the tournament engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use pool_tournament_web::{
    add_tiebreaker_match, can_add_tiebreaker, create_tournament, find_tied_top_teams, leaderboard,
    parse_roster_csv, pool_standings, recommend_rounds, resolve_playoff_bracket, set_match_winner,
    ErrorKind, ResultUpdate, TeamId, Tournament, TournamentError, TournamentFormat, TournamentId,
    TournamentSettings, TournamentStatus,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Result notifications for anything that shows live standings.
type ResultFeed = Data<broadcast::Sender<ResultUpdate>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

const RESULT_FEED_CAPACITY: usize = 256;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(flatten)]
    settings: TournamentSettings,
    player_names: Vec<String>,
}

#[derive(Deserialize)]
struct SetStatusBody {
    status: TournamentStatus,
}

#[derive(Deserialize)]
struct RecommendQuery {
    num_players: u32,
    num_tables: u32,
}

#[derive(Deserialize)]
struct SetMatchWinnerBody {
    match_id: Uuid,
    winner_id: TeamId,
}

#[derive(Deserialize)]
struct TiebreakerBody {
    team1_id: TeamId,
    team2_id: TeamId,
    #[serde(default = "default_table")]
    table_number: u32,
}

fn default_table() -> u32 {
    1
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::InvalidInput => HttpResponse::BadRequest().json(body),
    }
}

fn no_tournament() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Run `f` on one tournament under the write lock and refresh its last_activity.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.tournament)
        }
        None => no_tournament(),
    }
}

/// Read-only view of one tournament; does not count as activity.
fn read_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&Tournament) -> HttpResponse,
{
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(&id) {
        Some(entry) => f(&entry.tournament),
        None => no_tournament(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pool-tournament-web",
    })
}

/// Create a tournament: draw teams, schedule matches, lay out the bracket.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let tournament =
        match create_tournament(body.settings, &body.player_names, &mut rand::thread_rng()) {
            Ok(t) => t,
            Err(e) => return error_response(&e),
        };
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(t))
}

/// Move the tournament between setup, in progress and completed.
#[put("/api/tournaments/{id}/status")]
async fn api_set_status(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetStatusBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.set_status(body.status);
        log::info!("Tournament {} status set to {:?}", t.id, body.status);
        HttpResponse::Ok().json(t)
    })
}

/// Suggested round count for the setup form (no state change).
#[get("/api/rounds/recommend")]
async fn api_recommend_rounds(query: Query<RecommendQuery>) -> HttpResponse {
    match recommend_rounds(query.num_players, query.num_tables) {
        Ok(r) => HttpResponse::Ok().json(r),
        Err(e) => error_response(&e),
    }
}

/// Turn pasted CSV (one player per line) into a name list.
#[post("/api/roster/parse")]
async fn api_parse_roster(body: String) -> HttpResponse {
    match parse_roster_csv(&body) {
        Ok(names) => HttpResponse::Ok().json(names),
        Err(e) => error_response(&e),
    }
}

/// Set or revise the winner of one match; standings follow and listeners are notified.
/// In the pool + playoff format, bracket slots are re-resolved right after.
#[put("/api/tournaments/{id}/matches/winner")]
async fn api_set_match_winner(
    state: AppState,
    feed: ResultFeed,
    path: Path<TournamentPath>,
    body: Json<SetMatchWinnerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let update = match set_match_winner(t, body.match_id, body.winner_id) {
            Ok(update) => update,
            Err(e) => return error_response(&e),
        };
        if t.format == TournamentFormat::PoolPlayoff {
            if let Err(e) = resolve_playoff_bracket(t) {
                log::debug!("Bracket of tournament {} not resolvable: {}", t.id, e);
            }
        }
        // No subscribers is fine.
        let _ = feed.send(update.clone());
        HttpResponse::Ok().json(update)
    })
}

/// All teams ranked by points, then wins.
#[get("/api/tournaments/{id}/leaderboard")]
async fn api_leaderboard(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    read_tournament(&state, path.id, |t| HttpResponse::Ok().json(leaderboard(t)))
}

/// Per-pool tables (pool + playoff format).
#[get("/api/tournaments/{id}/pools")]
async fn api_pool_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    read_tournament(&state, path.id, |t| HttpResponse::Ok().json(pool_standings(t)))
}

/// Teams tied for first and whether a tiebreaker can be added now.
#[get("/api/tournaments/{id}/ties")]
async fn api_ties(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    read_tournament(&state, path.id, |t| {
        HttpResponse::Ok().json(serde_json::json!({
            "tied_teams": find_tied_top_teams(t),
            "can_add_tiebreaker": can_add_tiebreaker(t),
        }))
    })
}

/// Append a tiebreaker match between two teams.
#[post("/api/tournaments/{id}/tiebreaker")]
async fn api_add_tiebreaker(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TiebreakerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        match add_tiebreaker_match(t, body.team1_id, body.team2_id, body.table_number) {
            Ok(match_id) => HttpResponse::Ok().json(serde_json::json!({
                "match_id": match_id,
                "tournament": t,
            })),
            Err(e) => error_response(&e),
        }
    })
}

/// Fill playoff slots whose seeds are decided.
#[post("/api/tournaments/{id}/bracket/resolve")]
async fn api_resolve_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match resolve_playoff_bracket(t) {
        Ok(resolved) => HttpResponse::Ok().json(serde_json::json!({
            "resolved_match_ids": resolved,
            "tournament": t,
        })),
        Err(e) => error_response(&e),
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));
    let (results_tx, mut results_rx) = broadcast::channel::<ResultUpdate>(RESULT_FEED_CAPACITY);
    let feed = Data::new(results_tx);

    // Listener: standings views refresh from these notifications
    actix_web::rt::spawn(async move {
        loop {
            match results_rx.recv().await {
                Ok(update) => log::info!(
                    "Standings changed in tournament {} (match {})",
                    update.tournament_id,
                    update.match_id
                ),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("Result listener skipped {} update(s)", skipped)
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(feed.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_set_status)
            .service(api_recommend_rounds)
            .service(api_parse_roster)
            .service(api_set_match_winner)
            .service(api_leaderboard)
            .service(api_pool_standings)
            .service(api_ties)
            .service(api_add_tiebreaker)
            .service(api_resolve_bracket)
            .route("/", web::get().to(api_index))
    })
    .bind(bind)?
    .run()
    .await
}

/// Root: point API clients at the health check.
async fn api_index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "pool-tournament-web",
        "health": "/api/health",
    }))
}
