use std::{io, process::ExitCode, sync::OnceLock};

use application::{args, cli, Args, Config, Service};
use service::infra::{rest::session::State, Rest};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() -> ExitCode {
    // Standard output is reserved for the command's JSON result.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_target(false)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || LOG_LEVEL.get().copied().unwrap_or(log::Level::WARN)
                            >= *meta.level()
                })),
        )
        .init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

async fn start() -> Result<(), ExitCode> {
    let Args { config, command } = Args::parse().unwrap_or_else(|e| e.exit());

    let Config {
        api,
        session,
        list,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
        ExitCode::FAILURE
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let rest = Rest::new(&api.into(), session.store()).map_err(|e| {
        log::error!("failed to initialize `Rest` client: {e}");
        ExitCode::FAILURE
    })?;
    let mut state = rest.session().subscribe();
    let is_login = matches!(command, args::Command::Login { .. });

    let svc = Service::new(rest);
    let result = cli::run(&svc, command, &list).await;

    if !is_login
        && state.has_changed().unwrap_or_default()
        && matches!(*state.borrow_and_update(), State::Invalidated)
    {
        log::warn!("session expired, run `prm login` again");
    }

    match result {
        Ok(output) => {
            match serde_json::to_string_pretty(&output) {
                Ok(out) => println!("{out}"),
                Err(e) => {
                    log::error!("failed to render output: {e}");
                    return Err(ExitCode::FAILURE);
                }
            }
            Ok(())
        }
        Err(e) => {
            log::error!("[{}]: {}", e.code, e.message);
            if let Some(trace) = &e.backtrace {
                log::debug!("{trace}");
            }
            Err(e.exit_code.into())
        }
    }
}
