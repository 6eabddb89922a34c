//! rg-replay entry point
//!
//! Usage: `rg-replay <script.ron> [config.ron]`

use std::process::ExitCode;

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rg_replay=info,rg_gizmo=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(script) = args.next() else {
        eprintln!("usage: rg-replay <script.ron> [config.ron]");
        return ExitCode::FAILURE;
    };

    match rg_replay::run(script, args.next()) {
        Ok(report) => {
            tracing::info!(
                "{} ticks, {} tool actions",
                report.ticks,
                report.actions.len()
            );
            tracing::info!(
                "Target: translation {:?}, rotation {:?}, scale {:?}",
                report.target.translation,
                report.target.rotation,
                report.target.scale
            );
            tracing::info!("Camera container at {:?}", report.camera_position);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Replay failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
