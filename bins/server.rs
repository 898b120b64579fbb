use common::utils::logging::{init_logging, LogFormat};
use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info, warn};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    // load .env before anything reads RUST_LOG / CONFIG_PATH
    dotenv().ok();

    let cfg = match AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("invalid configuration: {e:#}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let format = cfg.server.log_format.parse::<LogFormat>().unwrap_or_default();
    init_logging(format);
    info!(service = "teacher_registry", event = "logger_init", ?format, "tracing subscriber initialized");

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "teacher_registry",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "teacher_registry", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    if cfg.server.legacy_status_codes {
        warn!(service = "teacher_registry", event = "legacy_status_codes", "not-found will be reported as 500");
    }

    info!(
        service = "teacher_registry",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        data_file = %cfg.storage.path,
        "teacher registry starting"
    );

    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(service = "teacher_registry", event = "stop", %service_id, pid, "teacher registry stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "teacher_registry", event = "run_failed", error = %e, "server::run returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
