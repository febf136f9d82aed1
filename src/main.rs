// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Promptdict CLI entrypoint.
//!
//! By default this runs the interactive prompt builder in the terminal. Logs go to a file next
//! to the saved state so they never tear the UI.
//!
//! Use `--serve` to run the suggestion proxy instead (logs to stderr).

use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use promptdict::app::{App, NOTICE_CATALOG_LOAD_FAILED};
use promptdict::catalog::{default_catalog, load_catalog_document};
use promptdict::config::{parse_options, usage, Config, Mode};
use promptdict::serve::GeminiSource;
use promptdict::suggest::{HttpSuggestionClient, SuggestionDebouncer};

fn init_logging(log_path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(path) = log_path {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init()?;
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "promptdict".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                eprintln!("{}", usage(&program));
                std::process::exit(2);
            }
        };
        let config = Config::resolve(options, |key| std::env::var(key).ok())?;
        init_logging(config.log_path().as_deref())?;

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        match config.mode {
            Mode::Serve { addr, google_api_key, gemini_model } => {
                let source = GeminiSource::new(google_api_key, gemini_model)?;
                runtime.block_on(promptdict::serve::run(addr, Arc::new(source)))?;
            }
            Mode::Tui { catalog_path, persistence, suggest_url } => {
                let loaded = match &catalog_path {
                    Some(path) => load_catalog_document(path),
                    None => default_catalog(),
                };
                let (builtin, load_failed) = match loaded {
                    Ok(categories) => (categories, false),
                    Err(err) => {
                        log::error!("catalog failed to load: {err}");
                        (Vec::new(), true)
                    }
                };

                let mut app = App::new(builtin, Some(persistence.open()));
                if load_failed {
                    app.set_notice(NOTICE_CATALOG_LOAD_FAILED);
                }

                let suggestions = match suggest_url {
                    Some(url) => {
                        log::info!("suggestions enabled via {url}");
                        let client = HttpSuggestionClient::new(url)?;
                        Some(SuggestionDebouncer::new(Arc::new(client), runtime.handle().clone()))
                    }
                    None => None,
                };

                runtime.block_on(async move {
                    tokio::task::spawn_blocking(move || {
                        promptdict::tui::run(app, suggestions).map_err(|err| err.to_string())
                    })
                    .await
                })?
                .map_err(|err| Box::new(std::io::Error::other(err)) as Box<dyn Error>)?;
            }
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("promptdict: {err}");
        std::process::exit(1);
    }
}
