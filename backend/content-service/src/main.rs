use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use anyhow::{anyhow, Context};
use content_service::auth::JwtKeys;
use content_service::config::{Config, JwtConfig, Settings};
use content_service::handlers;
use content_service::jobs::{
    create_annotation_queue, spawn_annotation_workers, AnnotationQueue, AnnotationWorker,
};
use content_service::middleware::MetricsMiddleware;
use content_service::repository::{ContentRepository, PostgresContentRepository};
use content_service::services::{AssetStore, UserService};
use content_service::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vision_client::VisionClient;

/// How long shutdown waits for queued annotations to finish
const ANNOTATION_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

struct HealthState {
    db_pool: sqlx::PgPool,
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match sqlx::query("SELECT 1").execute(&state.db_pool).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "content-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "content-service"
        })),
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler ({e}); waiting for Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// PEM values from env files often carry escaped newlines
fn normalize_pem(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

fn load_jwt_keys(cfg: &JwtConfig) -> anyhow::Result<JwtKeys> {
    match (&cfg.private_key_pem, &cfg.public_key_pem) {
        (Some(private), Some(public)) => {
            JwtKeys::from_rsa_pem(&normalize_pem(private), &normalize_pem(public))
        }
        (None, Some(public)) => {
            tracing::warn!("JWT_PRIVATE_KEY_PEM not set; register and login will fail");
            JwtKeys::validation_only(&normalize_pem(public))
        }
        _ => Err(anyhow!("JWT_PUBLIC_KEY_PEM must be set")),
    }
}

/// Build the vision client and start the annotation workers
fn start_annotation(
    config: &Config,
    repo: Arc<dyn ContentRepository>,
) -> anyhow::Result<(AnnotationQueue, JoinHandle<()>)> {
    let settings_path = &config.vision.settings_path;
    let settings = match Settings::load(settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            let settings = Settings::default();
            tracing::warn!(
                "Provider settings unavailable ({}); using MaxTokens={}",
                e,
                settings.max_tokens
            );
            settings
        }
    };

    let vision_config = config.vision_config(&settings);
    let client = VisionClient::new(&vision_config).context("Failed to build vision client")?;

    tracing::info!(
        provider = client.provider_name(),
        endpoint = %vision_config.endpoint,
        max_tokens = settings.max_tokens,
        timeout_secs = vision_config.request_timeout.as_secs(),
        "Vision client ready"
    );

    let worker = Arc::new(AnnotationWorker::new(repo, Arc::new(client)));
    let (queue, receiver) = create_annotation_queue(config.annotation.queue_capacity);
    let dispatcher = spawn_annotation_workers(worker, receiver, config.annotation.workers);

    Ok((queue, dispatcher))
}

/// Content Service
///
/// Image posts with categories, comments and likes, plus background AI
/// critique of every uploaded drawing.
///
/// # Routes
///
/// - `/api/auth/*` - Register, login, current user
/// - `/categories/*` - Category CRUD
/// - `/posts/*` - Posts, comments, likes, uploads (authenticated)
/// - `/admin/posts/{id}/approve` - Moderation (admin only)
/// - `/images/{filename}` - Stored images
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Support container healthchecks via CLI subcommand
    {
        let mut args = std::env::args();
        let _bin = args.next();
        if let Some(cmd) = args.next() {
            if cmd == "healthcheck" || cmd == "healthcheck-http" {
                let port = std::env::var("CONTENT_SERVICE_PORT").unwrap_or_else(|_| "8080".to_string());
                let url = format!("http://127.0.0.1:{}/api/v1/health", port);
                return match reqwest::Client::new().get(&url).send().await {
                    Ok(resp) if resp.status().is_success() => Ok(()),
                    Ok(resp) => Err(anyhow!("healthcheck HTTP status: {}", resp.status())),
                    Err(e) => Err(anyhow!("healthcheck HTTP error: {}", e)),
                };
            }
        }
    }

    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow!("Failed to load configuration: {e}"))?;

    tracing::info!("Starting content-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let jwt = Arc::new(load_jwt_keys(&config.jwt).context("Failed to initialize JWT keys")?);

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database pool created");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations completed");

    let repo: Arc<dyn ContentRepository> = Arc::new(PostgresContentRepository::new(db_pool.clone()));

    if let Some(admin) = &config.admin {
        let user = UserService::new(repo.clone(), jwt.clone())
            .ensure_admin(&admin.telephone, &admin.password)
            .await
            .map_err(|e| anyhow!("Failed to provision admin account: {e}"))?;
        tracing::info!(user_id = %user.id, "Admin account ready");
    }

    let assets = Arc::new(AssetStore::new(
        config.assets.dir.clone(),
        config.assets.max_upload_bytes,
    ));
    assets
        .ensure_dir()
        .await
        .map_err(|e| anyhow!("Failed to create asset directory: {e}"))?;

    // Annotation is optional: without a usable provider posts are still created
    let (annotations, dispatcher) = match start_annotation(&config, repo.clone()) {
        Ok((queue, dispatcher)) => (Some(queue), Some(dispatcher)),
        Err(e) => {
            tracing::error!("AI annotation disabled: {:#}", e);
            (None, None)
        }
    };

    let state = web::Data::new(AppState {
        repo,
        annotations,
        jwt: jwt.clone(),
        assets,
    });
    let health_state = web::Data::new(HealthState {
        db_pool: db_pool.clone(),
    });

    let http_bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", http_bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();
    let server_state = state.clone();
    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let jwt = jwt.clone();
        App::new()
            .app_data(server_state.clone())
            .app_data(health_state.clone())
            .wrap(MetricsMiddleware)
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            // Health check endpoints
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            .configure(move |cfg| handlers::configure(cfg, jwt))
    })
    .bind(&http_bind_address)
    .with_context(|| format!("Failed to bind {http_bind_address}"))?
    .disable_signals()
    .run();

    let server_handle = server.handle();
    let mut server_task = tokio::spawn(server);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let server_result = tokio::select! {
        result = &mut server_task => result,
        _ = &mut shutdown => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
            server_task.await
        }
    };

    // Last queue handle; the dispatcher exits once in-flight jobs finish
    drop(state);
    if let Some(dispatcher) = dispatcher {
        match tokio::time::timeout(ANNOTATION_DRAIN_TIMEOUT, dispatcher).await {
            Ok(_) => tracing::info!("Annotation queue drained"),
            Err(_) => tracing::warn!("Timed out waiting for pending annotations"),
        }
    }

    db_pool.close().await;
    tracing::info!("Content-service shutting down");

    server_result
        .context("HTTP server task failed")?
        .context("HTTP server error")
}
