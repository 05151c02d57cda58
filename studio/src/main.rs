use clap::Parser;
use engine::catalog::ThemeCatalog;
use lumen::cli::Cli;
use lumen::commands::Studio;
use lumen::config;
use lumen::error::AppError;
use lumen::logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = config::load_config(cli.config.as_deref()).into_result()?;
    logger::setup_logger(app_config.logging(), cli.log_level.as_deref())?;

    let catalog = ThemeCatalog::builtin()?;

    if let Err(errors) = app_config.validate(&catalog) {
        for error in &errors {
            log::error!("{error}");
            eprintln!("{}\n", error.user_message());
        }
        return Err(AppError::Config(format!(
            "{} configuration problem(s) found",
            errors.len()
        ))
        .into());
    }

    let studio = Studio::new(&app_config, catalog)?;
    let mut stdout = std::io::stdout();

    if let Err(e) = studio.run(&cli.command, &mut stdout).await {
        log::error!("Command failed: {e}");
        eprintln!("{}", e.suggestion());
        // Returning lets the provider drop and remove its stylesheet
        return Err(e.into());
    }

    Ok(())
}
