// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command line and environment configuration.

use std::fmt;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use crate::serve::gemini::DEFAULT_GEMINI_MODEL;
use crate::store::{DirKvStore, MemoryKvStore, StateStore, WriteDurability};

pub const DEFAULT_STATE_DIR: &str = ".promptdict";
pub const DEFAULT_SERVE_ADDR: &str = "127.0.0.1:8888";
pub const LOG_FILE_NAME: &str = "promptdict.log";

pub const ENV_STATE_DIR: &str = "PROMPTDICT_STATE_DIR";
pub const ENV_SUGGEST_URL: &str = "PROMPTDICT_SUGGEST_URL";
pub const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_GEMINI_MODEL: &str = "PROMPTDICT_GEMINI_MODEL";

pub fn usage(program: &str) -> String {
    format!(
        "Usage:\n  {program} [--catalog <path>] [--state-dir <dir>] [--suggest-url <url>] [--durable-writes]\n  {program} --demo [--catalog <path>] [--suggest-url <url>]\n  {program} --serve [--addr <host:port>]\n\nThe default mode runs the terminal UI.\n--catalog loads categories from a JSON document instead of the built-in catalog.\n--state-dir selects where session, overrides and modifiers are stored (default {DEFAULT_STATE_DIR}, or ${ENV_STATE_DIR}).\n--suggest-url enables prompt suggestions from a `POST {{keyword}}` endpoint (or ${ENV_SUGGEST_URL}).\n--demo keeps everything in memory and cannot be combined with --state-dir.\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported).\n\n--serve runs the suggestion proxy on --addr (default {DEFAULT_SERVE_ADDR}) using ${ENV_GOOGLE_API_KEY} and ${ENV_GEMINI_MODEL} (default {DEFAULT_GEMINI_MODEL})."
    )
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub catalog: Option<String>,
    pub state_dir: Option<String>,
    pub suggest_url: Option<String>,
    pub demo: bool,
    pub serve: bool,
    pub addr: Option<String>,
    pub durable_writes: bool,
}

fn set_once(slot: &mut Option<String>, value: Option<String>) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value.ok_or(())?);
    Ok(())
}

fn set_flag(flag: &mut bool) -> Result<(), ()> {
    if *flag {
        return Err(());
    }
    *flag = true;
    Ok(())
}

pub fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--catalog" => set_once(&mut options.catalog, args.next())?,
            "--state-dir" => set_once(&mut options.state_dir, args.next())?,
            "--suggest-url" => set_once(&mut options.suggest_url, args.next())?,
            "--addr" => set_once(&mut options.addr, args.next())?,
            "--demo" => set_flag(&mut options.demo)?,
            "--serve" => set_flag(&mut options.serve)?,
            "--durable-writes" => set_flag(&mut options.durable_writes)?,
            _ => return Err(()),
        }
    }

    if options.demo && (options.state_dir.is_some() || options.durable_writes) {
        return Err(());
    }
    if options.serve {
        let tui_only = options.demo
            || options.catalog.is_some()
            || options.state_dir.is_some()
            || options.suggest_url.is_some()
            || options.durable_writes;
        if tui_only {
            return Err(());
        }
    } else if options.addr.is_some() {
        return Err(());
    }

    Ok(options)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    Memory,
    Dir { root: PathBuf, durability: WriteDurability },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Tui {
        catalog_path: Option<PathBuf>,
        persistence: Persistence,
        suggest_url: Option<String>,
    },
    Serve {
        addr: SocketAddr,
        google_api_key: Option<String>,
        gemini_model: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidAddr { value: String, source: AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddr { value, source } => write!(f, "invalid --addr {value:?}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidAddr { source, .. } => Some(source),
        }
    }
}

impl Config {
    /// Flags win over the environment; blank environment values count as unset.
    pub fn resolve(
        options: CliOptions,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        if options.serve {
            let raw = options.addr.unwrap_or_else(|| DEFAULT_SERVE_ADDR.to_owned());
            let addr = raw
                .parse::<SocketAddr>()
                .map_err(|source| ConfigError::InvalidAddr { value: raw.clone(), source })?;
            return Ok(Self {
                mode: Mode::Serve {
                    addr,
                    google_api_key: env(ENV_GOOGLE_API_KEY),
                    gemini_model: env(ENV_GEMINI_MODEL)
                        .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned()),
                },
            });
        }

        let persistence = if options.demo {
            Persistence::Memory
        } else {
            let root = options
                .state_dir
                .or_else(|| env(ENV_STATE_DIR))
                .unwrap_or_else(|| DEFAULT_STATE_DIR.to_owned());
            let durability = if options.durable_writes {
                WriteDurability::Durable
            } else {
                WriteDurability::BestEffort
            };
            Persistence::Dir { root: PathBuf::from(root), durability }
        };

        Ok(Self {
            mode: Mode::Tui {
                catalog_path: options.catalog.map(PathBuf::from),
                persistence,
                suggest_url: options.suggest_url.or_else(|| env(ENV_SUGGEST_URL)),
            },
        })
    }

    /// Where the TUI writes its log. `None` in serve mode, which logs to stderr.
    pub fn log_path(&self) -> Option<PathBuf> {
        match &self.mode {
            Mode::Tui { persistence: Persistence::Dir { root, .. }, .. } => {
                Some(root.join(LOG_FILE_NAME))
            }
            Mode::Tui { persistence: Persistence::Memory, .. } => {
                Some(std::env::temp_dir().join(LOG_FILE_NAME))
            }
            Mode::Serve { .. } => None,
        }
    }
}

impl Persistence {
    pub fn open(&self) -> StateStore {
        match self {
            Self::Memory => StateStore::new(MemoryKvStore::new()),
            Self::Dir { root, durability } => {
                StateStore::new(DirKvStore::new(root).with_durability(*durability))
            }
        }
    }
}
