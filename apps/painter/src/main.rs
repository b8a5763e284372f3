use std::process::ExitCode;

use clap::Parser;

use painter_app::cli::CliArgs;
use painter_app::config::PainterConfig;
use painter_app::logging::init_logging;
use painter_app::{collect_scripts, run, AppError};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match try_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // No-op if the config loaded and logging is already up.
            init_logging(&PainterConfig::default());
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main(args: &CliArgs) -> Result<(), AppError> {
    let mut config = match &args.config {
        Some(path) => PainterConfig::load(path)?,
        None => PainterConfig::default(),
    };
    args.apply(&mut config);
    init_logging(&config);

    let scripts = collect_scripts(args)?;
    log::info!(
        "painting {} script(s) into {}",
        scripts.len(),
        config.output_dir.display()
    );

    let summary = run(&config, &scripts, args.interval)?;
    log::info!(
        "done: {} accepted, {} rejected, {} frames",
        summary.accepted,
        summary.rejected,
        summary.stats.frames
    );
    Ok(())
}
