//! Headless replay of recorded manipulator drags
//!
//! Usage: `manip-replay <session.ron> [settings.ron]`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use manip_replay::{ReplayDelta, ReplayError, Session, load_settings};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "manip-replay")]
#[command(about = "Replay a recorded manipulator drag session")]
struct Cli {
    /// Session file (RON)
    session: PathBuf,
    /// Manipulator settings file (RON); defaults are used if omitted
    settings: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "manip_replay=info,manip_gizmo=debug,manip_core=debug".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting manipulator replay");

    match run(cli.session, cli.settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Replay failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(session_path: PathBuf, settings_path: Option<PathBuf>) -> Result<(), ReplayError> {
    let settings = load_settings(settings_path.as_deref())?;
    let session = Session::load(&session_path)?;

    let steps = session.replay(&settings)?;
    for (index, step) in steps.iter().enumerate() {
        match step.delta {
            ReplayDelta::Translation(delta) => {
                tracing::info!(index, event = ?step.event, picked = step.picked, %delta, "Translation");
            }
            ReplayDelta::Rotation(rotation) => {
                tracing::info!(
                    index,
                    event = ?step.event,
                    picked = step.picked,
                    axis = %rotation.axis(),
                    angle = rotation.angle(),
                    "Rotation"
                );
            }
            ReplayDelta::Scale(scale) => {
                tracing::info!(index, event = ?step.event, picked = step.picked, %scale, "Scale");
            }
        }
    }

    let Some(last) = steps.last() else {
        tracing::warn!("Session has no events");
        return Ok(());
    };
    tracing::info!(gizmo_matrix = ?last.gizmo_matrix, "Replay finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_positional_paths() {
        let cli = Cli::try_parse_from(["manip-replay", "drag.ron", "settings.ron"]).unwrap();
        assert_eq!(cli.session, PathBuf::from("drag.ron"));
        assert_eq!(cli.settings, Some(PathBuf::from("settings.ron")));

        let cli = Cli::try_parse_from(["manip-replay", "drag.ron"]).unwrap();
        assert_eq!(cli.settings, None);
    }

    #[test]
    fn test_cli_requires_session() {
        assert!(Cli::try_parse_from(["manip-replay"]).is_err());
    }
}
