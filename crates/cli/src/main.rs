use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polyvalid::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Area validity checks for polygon files")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Check a polygon file; exit 0 if valid, 1 if invalid, 2 on bad input
    Check {
        #[arg(long)]
        input: PathBuf,
        /// Optional JSON report path; a provenance sidecar is written next to it
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

/// Input document: `{"polygons":[{"shell":[[x,y],...],"holes":[[[x,y],...]]}]}`.
#[derive(Deserialize)]
struct AreaDoc {
    polygons: Vec<PolygonDoc>,
}

#[derive(Deserialize)]
struct PolygonDoc {
    shell: Vec<[f64; 2]>,
    #[serde(default)]
    holes: Vec<Vec<[f64; 2]>>,
}

#[derive(Serialize)]
struct CheckReport {
    input: String,
    valid: bool,
    kind: Option<String>,
    message: Option<String>,
    point: Option<[f64; 2]>,
}

fn main() -> ExitCode {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let outcome = match cmd.action {
        Action::Check { input, out } => check(&input, out.as_deref()),
        Action::Report => report().map(|()| true),
    };
    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn ring(points: Vec<[f64; 2]>) -> Vec<Coord> {
    points.into_iter().map(|[x, y]| Vec2::new(x, y)).collect()
}

fn load_area(path: &Path) -> Result<AreaGeometry> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let doc: AreaDoc =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    let polygons = doc
        .polygons
        .into_iter()
        .map(|p| Polygon::new(ring(p.shell), p.holes.into_iter().map(ring).collect()))
        .collect();
    Ok(AreaGeometry::multi(polygons))
}

/// Returns `Ok(valid)`; `Err` only for unreadable input or output failures.
fn check(input: &Path, out: Option<&Path>) -> Result<bool> {
    let area = load_area(input)?;
    tracing::info!(input = %input.display(), rings = area.ring_count(), "check");
    let verdict = validate_area(&area);
    match &verdict {
        Ok(()) => println!("valid"),
        Err(err) => println!("{err}"),
    }
    if let Some(out) = out {
        let report = CheckReport {
            input: input.to_string_lossy().into_owned(),
            valid: verdict.is_ok(),
            kind: verdict.as_ref().err().map(|e| format!("{:?}", e.kind)),
            message: verdict.as_ref().err().map(|e| e.kind.message().to_string()),
            point: verdict.as_ref().err().and_then(|e| e.point).map(|p| [p.x, p.y]),
        };
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        std::fs::write(out, serde_json::to_vec_pretty(&report)?)
            .with_context(|| format!("writing {}", out.display()))?;
        let payload = provenance::Payload::new(serde_json::json!({
            "input": report.input,
            "version": polyvalid::VERSION,
        }));
        let sidecar = provenance::write_sidecar(out, payload)?;
        tracing::info!(report = %out.display(), sidecar = %sidecar.display(), "wrote report");
    }
    Ok(verdict.is_ok())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "version": polyvalid::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
