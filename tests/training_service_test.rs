//! Tests for the training service: discovery, training and JSON output

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use oaktree::application::services::TrainingService;
use oaktree::application::ApplicationError;
use oaktree::config::Settings;
use oaktree::infrastructure::di::ServiceContainer;
use oaktree::infrastructure::traits::FileSystem;
use oaktree::util::testing;

const FIXTURES: &str = "tests/resources/datasets";

fn container() -> ServiceContainer {
    testing::init_test_setup();
    ServiceContainer::new(Settings::default())
}

/// In-memory filesystem for exercising the service without disk access.
#[derive(Default)]
struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    fn with_file(path: &str, content: &str) -> Self {
        let fs = Self::default();
        fs.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
        fs
    }

    fn get(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files.lock().unwrap().keys().any(|p| p.starts_with(path) && p != path)
    }

    fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    fn files_under(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files: Vec<_> = self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.starts_with(dir))
            .cloned()
            .collect();
        files.sort();
        Ok(files)
    }
}

// ============================================================
// Loading and training
// ============================================================

#[test]
fn given_dataset_file_when_training_then_returns_tree() {
    let c = container();
    let path = Path::new(FIXTURES).join("new-treatment.data.txt");

    let output = c.training.train(&path).unwrap();

    assert_eq!(output.source, path);
    assert_eq!(output.dataset.examples().len(), 5);
    assert_eq!(output.tree.count_nodes(), 3);
}

#[test]
fn given_missing_file_when_loading_then_not_found() {
    let c = container();

    let err = c.training.load(Path::new("does/not/exist.data.txt")).unwrap_err();

    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[test]
fn given_malformed_file_when_loading_then_invalid_dataset_with_path() {
    let fs = Arc::new(MemoryFileSystem::with_file("bad.data.txt", "2\nyes\n"));
    let service = TrainingService::new(fs, Arc::new(Settings::default()));

    let err = service.load(Path::new("bad.data.txt")).unwrap_err();

    assert!(
        matches!(err, ApplicationError::InvalidDataset { ref path, .. } if path == Path::new("bad.data.txt")),
        "{err}"
    );
}

#[test]
fn given_values_when_predicting_then_returns_class() {
    let c = container();
    let path = Path::new(FIXTURES).join("new-treatment.data.txt");
    let values: Vec<String> = ["rapid", "high", ">40"].iter().map(|s| s.to_string()).collect();

    assert_eq!(c.training.predict(&path, &values).unwrap(), "no");
}

#[test]
fn given_dataset_when_computing_root_stats_then_covers_all_attributes() {
    let c = container();

    let stats = c
        .training
        .root_stats(&Path::new(FIXTURES).join("contact-lenses.data.txt"))
        .unwrap();

    assert_eq!(stats.attributes.len(), 4);
}

// ============================================================
// Output
// ============================================================

#[test]
fn given_dataset_path_when_computing_outputs_then_replaces_txt_extension() {
    let (dataset, tree) =
        TrainingService::output_paths(Path::new("data/contact-lenses.data.txt"), Path::new("out"));

    assert_eq!(dataset, PathBuf::from("out/contact-lenses.data.json"));
    assert_eq!(tree, PathBuf::from("out/contact-lenses.data.tree.json"));
}

#[test]
fn given_training_output_when_writing_then_both_json_files_exist() {
    let fs = Arc::new(MemoryFileSystem::with_file(
        "p.data.txt",
        "2\nP,Q\n1\nA,2,x,y\n2\nx,P\ny,Q\n",
    ));
    let settings = Settings {
        pretty: false,
        ..Settings::default()
    };
    let service = TrainingService::new(fs.clone(), Arc::new(settings));

    let output = service.train(Path::new("p.data.txt")).unwrap();
    let tree_path = service.write(&output, Path::new("out")).unwrap();

    assert_eq!(tree_path, PathBuf::from("out/p.data.tree.json"));
    let tree_json: serde_json::Value =
        serde_json::from_str(&fs.get(&tree_path).unwrap()).unwrap();
    assert_eq!(tree_json["label"], "A");
    assert_eq!(tree_json["children"].as_array().map(Vec::len), Some(2));
    let dataset_json = fs.get(Path::new("out/p.data.json")).unwrap();
    assert!(!dataset_json.contains('\n'));
    let dataset_json: serde_json::Value = serde_json::from_str(&dataset_json).unwrap();
    assert_eq!(dataset_json["targets"], serde_json::json!(["P", "Q"]));
}

// ============================================================
// Batch training
// ============================================================

#[test]
fn given_directory_when_discovering_then_returns_sorted_dataset_files() {
    let c = container();

    let files = c.training.discover(Path::new(FIXTURES)).unwrap();

    let names: Vec<_> = files
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["contact-lenses.data.txt", "new-treatment.data.txt"]);
}

#[test]
fn given_in_memory_tree_when_discovering_then_filters_by_configured_suffix() {
    let fs = MemoryFileSystem::with_file("data/a.ds", "");
    fs.write(Path::new("data/b.data.txt"), "").unwrap();
    fs.write(Path::new("data/sub/c.ds"), "").unwrap();
    let settings = Settings {
        data_suffix: ".ds".to_string(),
        ..Settings::default()
    };
    let service = TrainingService::new(Arc::new(fs), Arc::new(settings));

    let files = service.discover(Path::new("data")).unwrap();

    assert_eq!(
        files,
        [PathBuf::from("data/a.ds"), PathBuf::from("data/sub/c.ds")]
    );
}

#[test]
fn given_directory_of_datasets_when_training_all_then_writes_every_tree() {
    let c = container();
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("data");
    let nested = data.join("nested");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::copy(
        Path::new(FIXTURES).join("new-treatment.data.txt"),
        data.join("new-treatment.data.txt"),
    )
    .unwrap();
    std::fs::copy(
        Path::new(FIXTURES).join("contact-lenses.data.txt"),
        nested.join("contact-lenses.data.txt"),
    )
    .unwrap();
    std::fs::write(data.join("notes.txt"), "not a dataset").unwrap();
    let out = tmp.path().join("out");

    let written = c.training.train_all(&data, &out).unwrap();

    assert_eq!(written.len(), 2);
    assert!(out.join("nested/contact-lenses.data.tree.json").is_file());
    assert!(out.join("nested/contact-lenses.data.json").is_file());
    assert!(out.join("new-treatment.data.tree.json").is_file());
    assert!(!out.join("notes.json").exists());
}

#[test]
fn given_same_file_name_in_two_subdirectories_when_training_all_then_both_trees_kept() {
    let c = container();
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("data");
    for (sub, content) in [
        ("a", "2\nP,Q\n1\nA,2,x,y\n2\nx,P\ny,Q\n"),
        ("b", "2\nP,Q\n1\nB,2,u,v\n2\nu,Q\nv,P\n"),
    ] {
        std::fs::create_dir_all(data.join(sub)).unwrap();
        std::fs::write(data.join(sub).join("x.data.txt"), content).unwrap();
    }
    let out = tmp.path().join("out");

    let written = c.training.train_all(&data, &out).unwrap();

    assert_eq!(
        written,
        [out.join("a/x.data.tree.json"), out.join("b/x.data.tree.json")]
    );
    let root_label = |path: PathBuf| {
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        json["label"].clone()
    };
    assert_eq!(root_label(out.join("a/x.data.tree.json")), "A");
    assert_eq!(root_label(out.join("b/x.data.tree.json")), "B");
    assert!(out.join("a/x.data.json").is_file());
    assert!(out.join("b/x.data.json").is_file());
    assert!(!out.join("x.data.tree.json").exists());
}

#[test]
fn given_source_below_scan_root_when_mirroring_then_keeps_relative_directory() {
    let out = Path::new("out");

    assert_eq!(
        TrainingService::mirrored_dir(Path::new("data/a/b/x.data.txt"), Path::new("data"), out),
        PathBuf::from("out/a/b")
    );
    assert_eq!(
        TrainingService::mirrored_dir(Path::new("data/x.data.txt"), Path::new("data"), out),
        PathBuf::from("out")
    );
    assert_eq!(
        TrainingService::mirrored_dir(Path::new("elsewhere/x.data.txt"), Path::new("data"), out),
        PathBuf::from("out")
    );
}

#[test]
fn given_directory_without_datasets_when_training_all_then_no_datasets() {
    let c = container();
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("readme.md"), "# nothing").unwrap();

    let err = c
        .training
        .train_all(tmp.path(), &tmp.path().join("out"))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::NoDatasets { .. }), "{err}");
}

#[test]
fn given_missing_directory_when_discovering_then_not_found() {
    let c = container();

    let err = c.training.discover(Path::new("no/such/dir")).unwrap_err();

    assert!(matches!(err, ApplicationError::NotFound(_)));
}
