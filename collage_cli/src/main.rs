// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replays a scripted editing session and writes the exported composition.
//!
//! A script is a JSON document naming the uploads and the input actions:
//!
//! ```json
//! {
//!   "background": "backdrop.png",
//!   "gallery": ["star.png", "heart.png"],
//!   "actions": [
//!     { "op": "select_source", "source": 0 },
//!     { "op": "click_canvas", "x": 200.0, "y": 150.0 },
//!     { "op": "set_rotation", "degrees": 45.0 },
//!     { "op": "set_scale", "factor": 1.5 },
//!     { "op": "confirm" }
//!   ]
//! }
//! ```
//!
//! Relative paths resolve against the script's directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use collage_editor::{Editor, EditorAction, EditorConfig, UploadTarget};
use collage_raster::ExportFormat;
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "collage", version, about)]
struct Cli {
    /// Session script (JSON).
    script: PathBuf,
    /// Where to write the export.
    #[arg(short, long)]
    out: PathBuf,
    /// Editor configuration (JSON). Defaults apply when omitted or missing.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Export format. Inferred from the output extension when omitted.
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,
    /// JPEG quality, 1 to 100. Defaults to the configured quality.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,
    /// Log failed steps and carry on instead of stopping.
    #[arg(long)]
    keep_going: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FormatArg {
    Png,
    Jpeg,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Script {
    background: Option<PathBuf>,
    gallery: Vec<PathBuf>,
    actions: Vec<EditorAction>,
}

fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,collage=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn export_format(cli: &Cli, config: &EditorConfig) -> ExportFormat {
    let configured = match config.export_format {
        ExportFormat::Jpeg { quality } => quality,
        ExportFormat::Png => 100,
    };
    let jpeg = ExportFormat::Jpeg {
        quality: cli.quality.unwrap_or(configured),
    };
    match cli.format {
        Some(FormatArg::Png) => ExportFormat::Png,
        Some(FormatArg::Jpeg) => jpeg,
        None => match cli
            .out
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("png") => ExportFormat::Png,
            Some("jpg" | "jpeg") => jpeg,
            _ => config.export_format,
        },
    }
}

fn read(base: &Path, path: &Path) -> anyhow::Result<Vec<u8>> {
    let full = base.join(path);
    std::fs::read(&full).with_context(|| format!("reading {}", full.display()))
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EditorConfig::default(),
    };
    let format = export_format(cli, &config);

    let script_text = std::fs::read_to_string(&cli.script)
        .with_context(|| format!("reading script {}", cli.script.display()))?;
    let script: Script = serde_json::from_str(&script_text)
        .with_context(|| format!("parsing script {}", cli.script.display()))?;
    let base = cli.script.parent().unwrap_or(Path::new("."));

    let mut editor = Editor::new(config).context("creating editor")?;

    if let Some(background) = &script.background {
        editor.queue_upload(UploadTarget::Background, read(base, background)?);
    }
    for entry in &script.gallery {
        editor.queue_upload(UploadTarget::Gallery, read(base, entry)?);
    }
    for report in editor.process_uploads() {
        if let Err(err) = report.result {
            if !cli.keep_going {
                bail!("{} failed: {err}", report.ticket);
            }
            warn!(ticket = %report.ticket, %err, "upload failed");
        }
    }

    for (step, action) in script.actions.into_iter().enumerate() {
        if let Err(err) = editor.apply(action) {
            if !cli.keep_going {
                bail!("step {step} failed: {err}");
            }
            warn!(step, %err, "step failed");
        }
    }

    let bytes = editor.request_export(format).context("exporting")?;
    std::fs::write(&cli.out, &bytes).with_context(|| format!("writing {}", cli.out.display()))?;
    info!(
        path = %cli.out.display(),
        bytes = bytes.len(),
        mime = format.mime_type(),
        "export written"
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    setup_logging();
    let cli = Cli::parse();
    run(&cli)
}
