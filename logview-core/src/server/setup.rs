use crate::conf::LogviewConfig;
use crate::server::gateway::LogGateway;
use crate::server::pid::PidFile;
use crate::server::reload::ReloadHandle;
use crate::server::runtime::{
    ConfigOverrides, RuntimeState, build_runtime_state, reload_runtime_state,
};
use anyhow::{Context, Error, Result};
use arc_swap::ArcSwap;
use pingora::prelude::*;
use pingora::server::Server;
use pingora::server::configuration::ServerConf;
use std::path::PathBuf;
use std::sync::Arc;

/// Run the log server until the process is stopped.
pub fn run(
    config_path: Option<PathBuf>,
    overrides: ConfigOverrides,
    config: LogviewConfig,
) -> Result<()> {
    use tokio::runtime::Builder;

    // Best-effort: a missing pid file does not stop the server.
    let pid_file = config
        .server
        .pid_file
        .as_deref()
        .and_then(|path| match PidFile::create(path) {
            Ok(pid_file) => {
                tracing::info!(pid_file = %path.display(), "pid file written");
                Some(pid_file)
            }
            Err(e) => {
                tracing::warn!(error = %e, pid_file = %path.display(), "failed to write pid file; continuing");
                None
            }
        });

    // Build initial runtime state (reloadable)
    let initial_state = build_runtime_state(&config)?;
    let state = Arc::new(ArcSwap::from_pointee(initial_state));

    // Control-plane runtime (signals + reload only)
    let control_rt = Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("failed to build control-plane Tokio runtime")?;

    let reload = ReloadHandle::new();

    control_rt.spawn({
        let reload = reload.clone();
        async move {
            if let Err(e) = reload.install_signal_handler().await {
                tracing::error!(error = %e, "failed to install SIGHUP handler");
            }
        }
    });

    control_rt.spawn({
        let mut reload_rx = reload.subscribe();
        let state = state.clone();

        async move {
            tracing::info!("Reload loop started");

            while reload_rx.changed().await.is_ok() {
                let event = *reload_rx.borrow_and_update();
                tracing::info!(generation = event.generation, "reloading runtime state");

                match reload_runtime_state(config_path.as_deref(), &overrides, &state).await {
                    Ok(_) => tracing::info!("reload successful"),
                    Err(e) => tracing::error!(error = %e, "reload failed"),
                }
            }
        }
    });

    // Build Pingora server (Pingora owns its own runtimes)
    let server = build_pingora_server(&config, state)?;

    // Ensure pid file cleanup on shutdown
    if let Some(pid_file) = pid_file {
        ctrlc::set_handler(move || {
            tracing::info!(pid_file = %pid_file.path().display(), "shutdown requested, removing pid file");
            pid_file.remove();
            std::process::exit(0);
        })?;
    }

    tracing::info!(
        listen = %config.server.listen,
        root_path = %config.server.root_path.display(),
        "serving logs"
    );

    // control_rt must stay in scope so its worker thread lives.
    server.run_forever();
}

/// Build the Pingora server.
pub fn build_pingora_server(
    config: &LogviewConfig,
    state: Arc<ArcSwap<RuntimeState>>,
) -> Result<Server, Error> {
    let mut server = if let Some(threads) = config.server.threads {
        tracing::debug!(
            threads,
            "Creating Pingora server with overridden worker threads"
        );
        let mut conf = ServerConf::new().context("could not construct pingora server configuration")?;
        conf.threads = threads;
        Server::new_with_opt_and_conf(None, conf)
    } else {
        // "None" is required here to truly tell Pingora to use its default settings.
        Server::new(None)?
    };

    server.bootstrap();

    let gateway = LogGateway::new(state);

    let mut svc = http_proxy_service(&server.configuration, gateway);
    svc.add_tcp(&config.server.listen);

    server.add_service(svc);

    Ok(server)
}
