//! Pose standardization service.
//!
//! Reads one JSON request per stdin line, computes standardizing
//! transforms for a batch of scanned objects whose geometry sits in
//! caller-provided shared memory, and writes one JSON response per line
//! to stdout. Logging goes to stderr so the protocol stream stays clean.
//!
//! A line consisting of `__quit__` shuts the server down with exit
//! code 0. Request failures are reported in-band; the loop keeps serving.

mod protocol;
mod shm;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pose_pipeline::{
    standardize_batch, MassParams, SearchStrategy, Standardization, StandardizeParams, WireParams,
};

use crate::protocol::{Request, Response, QUIT_SENTINEL};
use crate::shm::SharedRegion;

/// Pose standardization over JSON lines and shared memory.
#[derive(Parser)]
#[command(name = "pose-server")]
#[command(about = "Scan pose standardization service", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the shared-memory regions.
    #[arg(long, default_value = "/dev/shm")]
    shm_dir: PathBuf,

    /// Neighborhood size for wire detection.
    #[arg(long, default_value_t = 70)]
    neighborhood: usize,

    /// Slice height for mass estimation.
    #[arg(long, default_value_t = 0.01)]
    slice_height: f64,

    /// Use spatial (straight-line) neighborhoods instead of graph
    /// distance for wire detection.
    #[arg(long)]
    spatial: bool,

    /// Recenter the estimated center of gravity instead of the footprint.
    #[arg(long)]
    recenter_mass: bool,
}

impl Cli {
    fn params(&self) -> StandardizeParams {
        let strategy = if self.spatial {
            SearchStrategy::SpatialIndex
        } else {
            SearchStrategy::GraphDistance
        };
        StandardizeParams::new()
            .with_wire(WireParams::default().with_neighborhood_size(self.neighborhood))
            .with_mass(MassParams::default().with_slice_height(self.slice_height))
            .with_search_strategy(strategy)
            .with_recenter_mass(self.recenter_mass)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let params = cli.params();
    info!(shm_dir = %cli.shm_dir.display(), "pose server ready");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read request line")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == QUIT_SENTINEL {
            info!("quit sentinel received");
            break;
        }

        let response = match parse_request(line) {
            Ok(request) => {
                let id = request.id;
                match handle(&cli, &params, &request) {
                    Ok(response) => response,
                    Err(err) => {
                        error!(id, error = %err, "request failed");
                        Response::failure(id, format!("{err:#}"))
                    }
                }
            }
            Err(failure) => failure,
        };

        serde_json::to_writer(&mut out, &response)?;
        out.write_all(b"\n")?;
        out.flush()?;
    }

    Ok(())
}

/// Parse a request line into a typed [`Request`].
///
/// Missing or ill-typed fields fail the request, but the caller's id is
/// recovered from the raw JSON first so the failure can still be routed
/// back to the right request. Lines that are not JSON at all report id 0.
fn parse_request(line: &str) -> Result<Request, Response> {
    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(err) => {
            error!(error = %err, "unparseable request line");
            return Err(Response::failure(0, format!("malformed request: {err}")));
        }
    };
    let id = value
        .get("id")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0);
    serde_json::from_value(value).map_err(|err| {
        error!(id, error = %err, "malformed request");
        Response::failure(id, format!("malformed request: {err}"))
    })
}

/// Serve one request.
fn handle(cli: &Cli, params: &StandardizeParams, request: &Request) -> Result<Response> {
    if request.op != "prepare" {
        bail!("unsupported op {:?}", request.op);
    }

    // An empty batch needs no shared memory at all.
    if request.vert_counts.is_empty() && request.edge_counts.is_empty() {
        return Ok(Response::success(request.id, Vec::new(), Vec::new()));
    }

    let vert_total: usize = request.vert_counts.iter().map(|&c| c as usize).sum();
    let edge_total: usize = request.edge_counts.iter().map(|&c| c as usize).sum();

    let verts = SharedRegion::open(&cli.shm_dir, &request.shm_verts)?.vertices(vert_total)?;
    let edges = if edge_total > 0 {
        SharedRegion::open(&cli.shm_dir, &request.shm_edges)?.edges(edge_total)?
    } else {
        Vec::new()
    };

    let results = standardize_batch(
        &verts,
        &edges,
        &request.vert_counts,
        &request.edge_counts,
        params,
    )?;

    info!(
        id = request.id,
        objects = results.len(),
        vertices = vert_total,
        "batch prepared"
    );

    let (rots, trans) = encode(&results);
    Ok(Response::success(request.id, rots, trans))
}

/// Flatten transforms into the wire representation: `[w, x, y, z]`
/// quaternions and `[x, y, z]` translations.
fn encode(results: &[Standardization]) -> (Vec<[f64; 4]>, Vec<[f64; 3]>) {
    let mut rots = Vec::with_capacity(results.len());
    let mut trans = Vec::with_capacity(results.len());
    for result in results {
        let q = result.rotation;
        rots.push([q.w, q.i, q.j, q.k]);
        trans.push([
            result.translation.x,
            result.translation.y,
            result.translation.z,
        ]);
    }
    (rots, trans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{UnitQuaternion, Vector3};

    #[test]
    fn missing_fields_fail_with_caller_id() {
        let failure = parse_request(r#"{"id":5,"op":"prepare"}"#).unwrap_err();
        assert!(!failure.ok);
        assert_eq!(failure.id, 5);
        assert!(failure.error.unwrap().contains("missing field"));
    }

    #[test]
    fn non_json_line_fails_with_id_zero() {
        let failure = parse_request("not json at all").unwrap_err();
        assert!(!failure.ok);
        assert_eq!(failure.id, 0);
    }

    #[test]
    fn complete_request_parses() {
        let line = r#"{"id":9,"op":"prepare","shm_verts":"v","shm_edges":"e",
            "vert_counts":[],"edge_counts":[]}"#;
        let request = parse_request(line).unwrap();
        assert_eq!(request.id, 9);
    }

    #[test]
    fn encode_identity() {
        let results = vec![Standardization::identity()];
        let (rots, trans) = encode(&results);
        assert_eq!(rots, vec![[1.0, 0.0, 0.0, 0.0]]);
        assert_eq!(trans, vec![[0.0, 0.0, 0.0]]);
    }

    #[test]
    fn encode_rotation_about_z() {
        let mut result = Standardization::identity();
        result.rotation =
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2);
        result.translation = Vector3::new(1.0, -2.0, 0.5);
        let (rots, trans) = encode(&[result]);

        let half = std::f64::consts::FRAC_PI_4;
        assert!((rots[0][0] - half.cos()).abs() < 1e-12);
        assert!((rots[0][3] - half.sin()).abs() < 1e-12);
        assert!((rots[0][1]).abs() < 1e-12);
        assert_eq!(trans[0], [1.0, -2.0, 0.5]);
    }
}
