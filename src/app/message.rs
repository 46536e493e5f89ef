// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::config;
use crate::domain::{PermanodeMetadata, ResolvedMetadata};
use crate::error::{Error, Result};
use crate::ui::{blob_frame, detail};
use iced::Size;
use reqwest::Url;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Instant;

pub const USAGE: &str = "\
Usage: blob-lens [OPTIONS] <snapshot.json>

Options:
  --lang <id>              UI language (e.g. en-US, fr)
  --config-dir <dir>       Directory holding settings.toml
  --base-url <url>         Blob server UI base URL
  --permanode <file.json>  Permanode snapshot naming the content
  --backward               Walk the loading placeholder right-to-left
  --dump-diagnostics <file>
                           Write the diagnostics log as JSON lines on exit
  -h, --help               Print this help";

/// Top-level messages consumed by `App::update`. The variants forward
/// component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Detail(detail::Message),
    Frame(blob_frame::Message),
    WindowResized(Size),
    /// Animation clock for the placeholder and the crossfade.
    Tick(Instant),
    /// The window is closing, or the view was left.
    Exit,
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `BLOB_LENS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Overrides `server.base_url`.
    pub base_url: Option<Url>,
    /// Forces the mirrored placeholder regardless of the config.
    pub backward: bool,
    /// Where the diagnostics log is written on exit.
    pub dump_diagnostics: Option<PathBuf>,
    pub resolved: ResolvedMetadata,
    pub permanode: Option<PermanodeMetadata>,
}

/// Outcome of command-line parsing.
#[derive(Debug)]
pub enum Invocation {
    Run(Box<Flags>),
    Help,
}

impl Flags {
    /// Parses the command line and loads the snapshots it names.
    pub fn from_args(args: Vec<OsString>) -> Result<Invocation> {
        let mut args = pico_args::Arguments::from_vec(args);

        if args.contains(["-h", "--help"]) {
            return Ok(Invocation::Help);
        }

        let lang: Option<String> = args.opt_value_from_str("--lang").map_err(cli_error)?;
        let config_dir: Option<String> =
            args.opt_value_from_str("--config-dir").map_err(cli_error)?;
        let base_url: Option<String> = args.opt_value_from_str("--base-url").map_err(cli_error)?;
        let permanode_path: Option<PathBuf> =
            args.opt_value_from_os_str("--permanode", |s| {
                Ok::<_, std::convert::Infallible>(PathBuf::from(s))
            })
            .map_err(cli_error)?;
        let dump_diagnostics: Option<PathBuf> = args
            .opt_value_from_os_str("--dump-diagnostics", |s| {
                Ok::<_, std::convert::Infallible>(PathBuf::from(s))
            })
            .map_err(cli_error)?;
        let backward = args.contains("--backward");

        let remaining = args.finish();
        let snapshot_path = match remaining.as_slice() {
            [path] => PathBuf::from(path),
            [] => return Err(Error::Config("missing <snapshot.json> argument".into())),
            [_, extra, ..] => {
                return Err(Error::Config(format!(
                    "unexpected argument: {}",
                    extra.to_string_lossy()
                )))
            }
        };

        let base_url = base_url.as_deref().map(config::parse_url).transpose()?;
        let resolved = ResolvedMetadata::load(&snapshot_path)?;
        let permanode = permanode_path
            .as_deref()
            .map(PermanodeMetadata::load)
            .transpose()?;

        Ok(Invocation::Run(Box::new(Flags {
            lang,
            config_dir,
            base_url,
            backward,
            dump_diagnostics,
            resolved,
            permanode,
        })))
    }
}

fn cli_error(err: pico_args::Error) -> Error {
    Error::Config(err.to_string())
}
