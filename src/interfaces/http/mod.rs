use crate::application::{ResultExporter, ReviewAnalysisUseCase};
use crate::application::use_cases::result_export::{to_json, to_plain_text_all};
use crate::domain::error::AppError;
use crate::domain::review::{Notification, ProductRecord};
use crate::infrastructure::config::ServerConfig;
use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Entries kept in the in-memory request log
const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub analysis: Arc<ReviewAnalysisUseCase>,
    pub exporter: ResultExporter,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

#[derive(Deserialize)]
pub struct AnalyzeQuery {
    /// Missing names are rejected as an invalid file type
    pub file_name: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis_id: String,
    pub notification: Notification,
    pub products: Vec<ProductRecord>,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub notification: Notification,
}

fn error_status(err: &AppError) -> StatusCode {
    match err {
        AppError::AnalysisInProgress => StatusCode::CONFLICT,
        err if err.is_input_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: &AppError) -> HttpResponse {
    HttpResponse::build(error_status(err)).json(ErrorResponse {
        notification: Notification::from_error(err),
    })
}

#[post("/analyze")]
async fn analyze(
    data: web::Data<HttpState>,
    query: web::Query<AnalyzeQuery>,
    body: web::Bytes,
) -> impl Responder {
    let file_name = query.file_name.as_deref().unwrap_or_default();
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "Analyzing upload: {} ({} bytes)",
            file_name,
            body.len()
        ),
    );

    match data.analysis.analyze_upload(file_name, &body).await {
        Ok(outcome) => {
            add_log(
                &data.logs,
                "INFO",
                "HttpApi",
                &outcome.notification.message,
            );
            HttpResponse::Ok().json(AnalyzeResponse {
                analysis_id: outcome.analysis_id,
                notification: outcome.notification,
                products: outcome.products,
            })
        }
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Analysis failed: {}", e),
            );
            error_response(&e)
        }
    }
}

#[get("/status")]
async fn status(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(data.analysis.status())
}

#[get("/results")]
async fn results(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(data.analysis.latest_products())
}

#[get("/export")]
async fn export_json(data: web::Data<HttpState>) -> impl Responder {
    let products = data.analysis.latest_products();
    match to_json(&products) {
        Ok(document) => {
            add_log(
                &data.logs,
                "INFO",
                "Export",
                &format!("Exported {} products", products.len()),
            );
            HttpResponse::Ok()
                .content_type("application/json")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", data.exporter.file_name()),
                ))
                .body(document)
        }
        Err(e) => {
            add_log(&data.logs, "ERROR", "Export", &format!("Export failed: {}", e));
            error_response(&e)
        }
    }
}

#[get("/export/text")]
async fn export_text(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(to_plain_text_all(&data.analysis.latest_products()))
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data
        .logs
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone();
    HttpResponse::Ok().json(logs)
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

/// Register the `/api` routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(analyze)
            .service(status)
            .service(results)
            .service(export_text)
            .service(export_json)
            .service(get_logs),
    );
}

pub fn start_server(state: HttpState, server: &ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let upload_limit = server.max_upload_bytes;

    tracing::info!(host = %server.host, port = server.port, "Starting review insights API");

    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(upload_limit))
            .configure(configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run();

    Ok(server)
}
