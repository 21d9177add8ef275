//! LCAgents CLI Binary

use clap::Parser;
use lcagents::config::{CliSettings, SettingsLoader};
use lcagents::logging::init_logging;
use lcagents::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let mut settings = match SettingsLoader::load(&cli.workspace) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Warning: ignoring CLI settings: {}", e);
            CliSettings::default()
        }
    };
    apply_log_overrides(&cli, &mut settings);
    if let Err(e) = init_logging(Some(&settings.logging)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let context = match CliContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx.with_layer_overrides(cli.layered),
        Err(e) => {
            eprintln!("Error initializing workspace: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output.text.trim_end());
            if !output.success {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn apply_log_overrides(cli: &Cli, settings: &mut CliSettings) {
    let logging = &mut settings.logging;
    if cli.verbose {
        logging.level = "debug".to_string();
        logging.output = "stderr".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
    }
    if cli.log_level.is_some() || cli.log_output.is_some() || cli.verbose {
        logging.enabled = true;
    }
}
