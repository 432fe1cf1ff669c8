//! Training service
//!
//! Loads dataset files, induces decision trees and writes JSON exports.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    build_tree, parse_dataset, Dataset, DecisionTree, DomainError, SubsetStats, TreeExport,
};
use crate::infrastructure::traits::FileSystem;

/// A dataset file together with the tree induced from it.
#[derive(Debug)]
pub struct TrainingOutput {
    pub source: PathBuf,
    pub dataset: Dataset,
    pub tree: DecisionTree,
}

/// Service for turning dataset files into decision trees.
pub struct TrainingService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl TrainingService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Read and parse a dataset file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Dataset> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::NotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read dataset", path)?;
        let dataset = parse_dataset(&content).map_err(|source| ApplicationError::InvalidDataset {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            targets = dataset.targets().len(),
            attributes = dataset.attributes().len(),
            examples = dataset.examples().len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Load a dataset and induce its decision tree.
    #[instrument(level = "debug", skip(self))]
    pub fn train(&self, path: &Path) -> ApplicationResult<TrainingOutput> {
        let dataset = self.load(path)?;
        let tree = build_tree(&dataset).map_err(|source| ApplicationError::Training {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "built tree for {}: {} nodes, depth {}",
            path.display(),
            tree.count_nodes(),
            tree.depth()
        );
        Ok(TrainingOutput {
            source: path.to_path_buf(),
            dataset,
            tree,
        })
    }

    /// Statistics of the full dataset, as used for the root split.
    pub fn root_stats(&self, path: &Path) -> ApplicationResult<SubsetStats> {
        let dataset = self.load(path)?;
        Ok(SubsetStats::compute(&dataset))
    }

    /// Train on `path` and classify one example.
    pub fn predict(&self, path: &Path, values: &[String]) -> ApplicationResult<String> {
        let output = self.train(path)?;
        let values: Vec<&str> = values.iter().map(String::as_str).collect();
        let class = output.tree.predict(&values)?;
        Ok(class.to_string())
    }

    /// All dataset files below `dir`, sorted by path.
    #[instrument(level = "debug", skip(self))]
    pub fn discover(&self, dir: &Path) -> ApplicationResult<Vec<PathBuf>> {
        if !self.fs.is_dir(dir) {
            return Err(ApplicationError::NotFound(dir.to_path_buf()));
        }
        let suffix = self.settings.data_suffix.as_str();
        let files: Vec<PathBuf> = self
            .fs
            .files_under(dir)
            .with_path_context("scan directory", dir)?
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(suffix))
            })
            .collect();
        debug!("discover: found {} datasets", files.len());
        Ok(files)
    }

    /// Output locations for a dataset file: `x.data.txt` maps to
    /// `x.data.json` and `x.data.tree.json` inside `out_dir`.
    pub fn output_paths(source: &Path, out_dir: &Path) -> (PathBuf, PathBuf) {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        (
            out_dir.join(format!("{}.json", stem)),
            out_dir.join(format!("{}.tree.json", stem)),
        )
    }

    /// Directory below `out_dir` that mirrors `source`'s location below
    /// `dir`, so equally named datasets in different subdirectories do not
    /// overwrite each other.
    pub fn mirrored_dir(source: &Path, dir: &Path, out_dir: &Path) -> PathBuf {
        source
            .strip_prefix(dir)
            .ok()
            .and_then(Path::parent)
            .map_or_else(|| out_dir.to_path_buf(), |relative| out_dir.join(relative))
    }

    /// Write dataset and tree JSON; returns the tree file path.
    #[instrument(level = "debug", skip(self, output), fields(source = %output.source.display()))]
    pub fn write(&self, output: &TrainingOutput, out_dir: &Path) -> ApplicationResult<PathBuf> {
        let (dataset_path, tree_path) = Self::output_paths(&output.source, out_dir);
        self.fs
            .create_dir_all(out_dir)
            .with_path_context("create output directory", out_dir)?;

        let dataset_json = self.to_json(&output.dataset, &dataset_path)?;
        self.fs
            .write(&dataset_path, &dataset_json)
            .with_path_context("write dataset", &dataset_path)?;

        let export = TreeExport::from_tree(&output.tree).ok_or_else(|| ApplicationError::Training {
            path: output.source.clone(),
            source: DomainError::EmptyTree,
        })?;
        let tree_json = self.to_json(&export, &tree_path)?;
        self.fs
            .write(&tree_path, &tree_json)
            .with_path_context("write tree", &tree_path)?;

        info!("wrote {}", tree_path.display());
        Ok(tree_path)
    }

    /// Train every dataset below `dir` and write the results to `out_dir`.
    ///
    /// The subdirectory layout below `dir` is kept in `out_dir`. Files are
    /// processed in parallel; returned paths keep discovery order.
    #[instrument(level = "debug", skip(self))]
    pub fn train_all(&self, dir: &Path, out_dir: &Path) -> ApplicationResult<Vec<PathBuf>> {
        let files = self.discover(dir)?;
        if files.is_empty() {
            return Err(ApplicationError::NoDatasets {
                dir: dir.to_path_buf(),
                suffix: self.settings.data_suffix.clone(),
            });
        }
        files
            .par_iter()
            .map(|file| {
                let output = self.train(file)?;
                self.write(&output, &Self::mirrored_dir(file, dir, out_dir))
            })
            .collect()
    }

    fn to_json<T: Serialize>(&self, value: &T, path: &Path) -> ApplicationResult<String> {
        let json = if self.settings.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.with_path_context("serialize", path)
    }
}
