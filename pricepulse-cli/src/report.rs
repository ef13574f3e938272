//! Per-asset analysis with optional synthetic fallback.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use pricepulse_core::signal::SignalSynthesizer;
use pricepulse_core::synthetic::SyntheticSeries;
use pricepulse_core::{Analysis, AnalysisError, PriceSeries};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::loader::{asset_name, load_series, LoadError};

/// Length of a synthetic fallback series, unless the configuration needs more.
pub const SYNTHETIC_FALLBACK_POINTS: usize = 200;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("analysis of '{asset}' failed: {source}")]
    Analysis {
        asset: String,
        #[source]
        source: AnalysisError,
    },
    #[error("'{first}' and '{second}' both name asset '{asset}'")]
    DuplicateAsset {
        asset: String,
        first: PathBuf,
        second: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeOptions {
    /// Substitute a synthetic series when a file cannot be loaded or is too short.
    pub synthetic_fallback: bool,
    /// Master seed; each asset derives its own seed from it.
    pub seed: u64,
}

/// Analysis of one asset, as written to the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct AssetReport {
    pub asset: String,
    pub source: PathBuf,
    /// The analysis ran on synthetic data instead of the file's contents.
    pub synthetic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub points: usize,
    pub analysis: Analysis,
}

/// Load `path` and analyze it, falling back to synthetic data when allowed.
pub fn analyze_asset(
    path: &Path,
    synthesizer: &SignalSynthesizer,
    opts: &AnalyzeOptions,
) -> Result<AssetReport, ReportError> {
    let asset = asset_name(path);

    let failure = match load_series(path) {
        Ok(series) => match synthesizer.analyze(&series) {
            Ok(analysis) => {
                debug!(asset = %asset, points = series.len(), "analyzed");
                return Ok(AssetReport {
                    asset,
                    source: path.to_path_buf(),
                    synthetic: false,
                    fallback_reason: None,
                    points: series.len(),
                    analysis,
                });
            }
            Err(source) if opts.synthetic_fallback && source.is_insufficient_history() => {
                source.to_string()
            }
            Err(source) => return Err(ReportError::Analysis { asset, source }),
        },
        Err(err) if opts.synthetic_fallback => err.to_string(),
        Err(err) => return Err(err.into()),
    };

    warn!(asset = %asset, reason = %failure, "using synthetic data");
    let series = synthetic_for(&asset, synthesizer, opts.seed).map_err(|source| {
        ReportError::Analysis {
            asset: asset.clone(),
            source,
        }
    })?;
    let analysis = synthesizer
        .analyze(&series)
        .map_err(|source| ReportError::Analysis {
            asset: asset.clone(),
            source,
        })?;

    Ok(AssetReport {
        asset,
        source: path.to_path_buf(),
        synthetic: true,
        fallback_reason: Some(failure),
        points: series.len(),
        analysis,
    })
}

/// Analyze every file in parallel. Results keep the input order.
pub fn analyze_all(
    paths: &[PathBuf],
    synthesizer: &SignalSynthesizer,
    opts: &AnalyzeOptions,
) -> Vec<Result<AssetReport, ReportError>> {
    info!(assets = paths.len(), "analyzing");
    paths
        .par_iter()
        .map(|path| analyze_asset(path, synthesizer, opts))
        .collect()
}

/// Fail when two paths share a file stem, since their reports would share a file name.
pub fn check_unique_assets(paths: &[PathBuf]) -> Result<(), ReportError> {
    let mut seen: HashMap<String, &PathBuf> = HashMap::new();
    for path in paths {
        let asset = asset_name(path);
        if let Some(first) = seen.get(&asset) {
            return Err(ReportError::DuplicateAsset {
                asset,
                first: (*first).clone(),
                second: path.clone(),
            });
        }
        seen.insert(asset, path);
    }
    Ok(())
}

fn synthetic_for(
    asset: &str,
    synthesizer: &SignalSynthesizer,
    master_seed: u64,
) -> pricepulse_core::Result<PriceSeries> {
    let points = synthesizer.required_history().max(SYNTHETIC_FALLBACK_POINTS);
    SyntheticSeries::with_seed(SyntheticSeries::seed_for(asset, master_seed)).generate(points)
}
