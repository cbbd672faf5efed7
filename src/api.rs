use std::future::Future;
use std::time::Duration;

use actix_web::error::BlockingError;
use actix_web::{rt, web, HttpResponse, Responder};
use log::warn;

use crate::config::ServerConfig;
use crate::domain::{
    create_solver, solve_allocation, Allocation, AllocationError, SolverType, ValuationMatrix,
};
use crate::models::{AllocateQuery, AllocateRequest, ApiAllocation, ApiError, ResponseFormat};
use crate::report::{render_report, TableStyle};

/// Shared, read-only settings of the route handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub default_solver: SolverType,
    pub solve_timeout: Option<Duration>,
}

impl From<&ServerConfig> for AppState {
    fn from(config: &ServerConfig) -> Self {
        AppState {
            default_solver: config.default_solver,
            solve_timeout: config.solve_timeout,
        }
    }
}

/// Register the service routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/allocate", web::post().to(allocate))
        .route("/health", web::get().to(health_check));
}

/// JSON extractor settings: body size limit, and malformed bodies answered
/// with `400 {"error": ...}`.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _| {
            let err_string = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(serde_json::json!({ "error": err_string })),
            )
            .into()
        })
}

/// Query extractor settings: unknown `format`/`style` values answered with
/// `400 {"error": ...}`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _| {
        let err_string = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({ "error": err_string })),
        )
        .into()
    })
}

// ---------- Route handlers ----------

/// POST /allocate
pub async fn allocate(
    state: web::Data<AppState>,
    query: web::Query<AllocateQuery>,
    req: web::Json<AllocateRequest>,
) -> HttpResponse {
    let request = req.into_inner();

    let solver_type = match request.solver.as_deref() {
        None => state.default_solver,
        Some(name) => match SolverType::from_name(name) {
            Some(solver_type) => solver_type,
            None => {
                return error_response(&AllocationError::InvalidInput(format!(
                    "Unknown solver {}",
                    name
                )))
            }
        },
    };

    let valuations = match ValuationMatrix::from_rows(request.valuations) {
        Ok(valuations) => valuations,
        Err(error) => return error_response(&error),
    };

    match run_solve(valuations, solver_type, state.solve_timeout).await {
        Ok(allocation) => match query.format {
            ResponseFormat::Json => {
                HttpResponse::Ok().json(ApiAllocation::new(allocation, solver_type))
            }
            ResponseFormat::Table => HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(render_report(&allocation, &TableStyle::from(query.style))),
        },
        Err(error) => error_response(&error),
    }
}

/// GET /health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// Run the solve on the blocking pool, bounded by `timeout` when set.
async fn run_solve(
    valuations: ValuationMatrix,
    solver_type: SolverType,
    timeout: Option<Duration>,
) -> Result<Allocation, AllocationError> {
    let task = web::block(move || {
        let solver = create_solver(solver_type, timeout);
        solve_allocation(&valuations, solver.as_ref())
    });
    within_budget(task, timeout).await
}

/// Await a blocking-pool task, mapping expiry of `timeout` and a lost task
/// to `AllocationError::Solver`.
async fn within_budget<T, F>(task: F, timeout: Option<Duration>) -> Result<T, AllocationError>
where
    F: Future<Output = Result<Result<T, AllocationError>, BlockingError>>,
{
    let joined = match timeout {
        Some(limit) => rt::time::timeout(limit, task).await.map_err(|_| {
            AllocationError::Solver(format!(
                "Solve exceeded the {} ms budget",
                limit.as_millis()
            ))
        })?,
        None => task.await,
    };

    joined.map_err(|err| AllocationError::Solver(format!("Solve task failed: {}", err)))?
}

fn error_response(error: &AllocationError) -> HttpResponse {
    let body = ApiError::from(error);
    match error {
        AllocationError::InvalidInput(_) => HttpResponse::BadRequest().json(body),
        AllocationError::Infeasible(_) | AllocationError::Solver(_) => {
            warn!("Allocation failed: {}", error);
            HttpResponse::InternalServerError().json(body)
        }
    }
}
