use std::fs;
use std::path::{Path, PathBuf};

use ndarray::{Array, IxDyn};
use serde_json::json;
use tempfile::{TempDir, tempdir};

use super::{
    AtlasProvider, LocalAtlasProvider, ReaderError, is_detection_dir, is_registration_dir,
    load_detection_metadata, load_registration_metadata, read_detection_dir,
    read_registration_dir, read_registration_dir_sample_space,
};
use crate::config::Settings;
use crate::formats::write_volume;
use crate::model::{Blending, Cell, CellType, Features, LabeledVolume, LayerKind, VolumeData};
use crate::points::write_cells;

const ATLAS_NAME: &str = "allen_mouse_100um";
const ATLAS_SHAPE: [usize; 3] = [135, 108, 77];
const DOWNSAMPLED_IMAGE_SIZE: [usize; 3] = [135, 77, 108];
const LAYER_SCALE: [f64; 3] = [10.0, 10.0, 10.0];
const SMALL_SHAPE: [usize; 3] = [4, 6, 5];

struct Fixture {
    dir: TempDir,
    provider: LocalAtlasProvider,
}

impl Fixture {
    fn new(shape: [usize; 3]) -> Self {
        let dir = tempdir().expect("tempdir");
        let atlases = dir.path().join("atlases");
        write_atlas(&atlases.join(format!("{ATLAS_NAME}_v1.2")), shape);
        Self {
            provider: LocalAtlasProvider::new(atlases),
            dir,
        }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }
}

fn zeros(shape: [usize; 3]) -> VolumeData {
    Array::<u8, _>::zeros(IxDyn(&shape)).into()
}

fn write_json(path: &Path, value: serde_json::Value) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, serde_json::to_string_pretty(&value).expect("json")).expect("write json");
}

fn write_atlas(dir: &Path, shape: [usize; 3]) {
    write_json(
        &dir.join("metadata.json"),
        json!({
            "name": ATLAS_NAME,
            "orientation": "asr",
            "resolution": [100.0, 100.0, 100.0],
            "shape": shape,
        }),
    );
    let annotation = Array::<u32, _>::zeros(IxDyn(&shape));
    write_volume(dir.join("annotation.tiff"), &annotation.into()).expect("annotation");
}

fn registration_metadata(signal_channels: usize) -> serde_json::Value {
    json!({
        "atlas": ATLAS_NAME,
        "orientation": "prs",
        "voxel_sizes": ["10", "10", "10"],
        "signal_planes_paths": vec!["signal"; signal_channels],
        "n_free_cpus": 2,
    })
}

fn write_registration(dir: &Path, shape: [usize; 3]) {
    write_json(&dir.join("brainreg.json"), registration_metadata(1));
    for name in [
        "downsampled.tiff",
        "downsampled_channel_1.tiff",
        "downsampled_standard.tiff",
        "downsampled_standard_channel_1.tiff",
        "registered_hemispheres.tiff",
        "registered_atlas.tiff",
        "boundaries.tiff",
    ] {
        write_volume(dir.join(name), &zeros(shape)).expect("volume");
    }
}

fn write_classification(dir: &Path) {
    let cells = [
        Cell::new([1.0, 2.0, 3.0], CellType::Unknown, Features::new()),
        Cell::new([4.0, 5.0, 6.0], CellType::Cell, Features::new()),
    ];
    let path = dir.join("points").join("cell_classification.xml");
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    write_cells(&path, &cells).expect("cells");
}

fn names(layers: &[LabeledVolume]) -> Vec<&str> {
    layers.iter().map(LabeledVolume::name).collect()
}

#[test]
fn directories_are_recognized_by_metadata_file() {
    let fixture = Fixture::new(SMALL_SHAPE);
    let registration = fixture.path("registration");
    write_registration(&registration, SMALL_SHAPE);
    assert!(is_registration_dir(&registration));
    assert!(!is_registration_dir(fixture.path("atlases")));
    assert!(!is_registration_dir(registration.join("brainreg.json")));

    write_json(&fixture.path("cellfinder.json"), registration_metadata(1));
    assert!(is_detection_dir(fixture.dir.path()));
    assert!(!is_detection_dir(&registration));
}

#[test]
fn registration_metadata_accepts_text_voxel_sizes() {
    let fixture = Fixture::new(SMALL_SHAPE);
    let registration = fixture.path("registration");
    write_registration(&registration, SMALL_SHAPE);
    let metadata = load_registration_metadata(&registration).expect("metadata");
    assert_eq!(metadata.voxel_sizes, [10.0, 10.0, 10.0]);
    assert_eq!(metadata.orientation.code(), "prs");
    assert_eq!(metadata.extras["n_free_cpus"], json!(2));
}

#[test]
fn atlas_space_layers_follow_display_order() {
    let fixture = Fixture::new(SMALL_SHAPE);
    let registration = fixture.path("registration");
    write_registration(&registration, SMALL_SHAPE);
    let layers = read_registration_dir(&registration, &fixture.provider).expect("layers");

    assert_eq!(
        names(&layers),
        [
            "channel_1 (downsampled)",
            "Registered image",
            "Hemispheres",
            ATLAS_NAME,
            "Boundaries",
        ]
    );
    assert!(!layers[0].attributes().visible);
    assert!(layers[1].atlas().is_some());
    assert!(layers[1].attributes().registration.is_some());
    assert_eq!(layers[2].kind(), LayerKind::Labels);
    assert_eq!(layers[2].attributes().opacity, 0.3);
    assert_eq!(layers[3].attributes().blending, Some(Blending::Additive));
    assert_eq!(layers[3].atlas().map(|atlas| atlas.name()), Some(ATLAS_NAME));
    assert_eq!(layers[4].attributes().opacity, 0.5);
    assert!(layers.iter().all(|layer| layer.shape() == SMALL_SHAPE));
}

#[test]
fn sample_space_layers_match_raw_data() {
    let fixture = Fixture::new(ATLAS_SHAPE);
    let registration = fixture.path("registration");
    write_registration(&registration, ATLAS_SHAPE);
    let layers = read_registration_dir_sample_space(
        &registration,
        &fixture.provider,
        &Settings::default(),
    )
    .expect("layers");

    assert_eq!(names(&layers), ["Hemispheres", ATLAS_NAME, "Boundaries"]);
    for layer in &layers {
        assert_eq!(layer.shape(), DOWNSAMPLED_IMAGE_SIZE);
        assert_eq!(layer.scale(), Some(LAYER_SCALE));
    }
}

#[test]
fn missing_pieces_are_reported() {
    let fixture = Fixture::new(SMALL_SHAPE);
    let registration = fixture.path("registration");
    write_registration(&registration, SMALL_SHAPE);
    fs::remove_file(registration.join("boundaries.tiff")).expect("remove");
    let err = read_registration_dir(&registration, &fixture.provider).expect_err("boundaries");
    assert!(matches!(err, ReaderError::MissingFile(path) if path.ends_with("boundaries.tiff")));

    let err = fixture.provider.load("kim_mouse_10um").expect_err("unknown atlas");
    assert!(matches!(err, ReaderError::AtlasNotFound { .. }));
}

#[test]
fn newest_atlas_version_is_used() {
    let fixture = Fixture::new(SMALL_SHAPE);
    let newer = fixture.path(&format!("atlases/{ATLAS_NAME}_v1.3"));
    write_atlas(&newer, [2, 2, 2]);
    assert_eq!(fixture.provider.locate(ATLAS_NAME).expect("locate"), newer);
    let atlas = fixture.provider.load(ATLAS_NAME).expect("atlas");
    assert_eq!(atlas.shape(), [2, 2, 2]);

    let exact = fixture.path(&format!("atlases/{ATLAS_NAME}"));
    write_atlas(&exact, [3, 3, 3]);
    assert_eq!(fixture.provider.locate(ATLAS_NAME).expect("locate"), exact);
}

#[test]
fn detection_dir_adds_cells_after_registration() {
    let fixture = Fixture::new(SMALL_SHAPE);
    write_json(&fixture.path("brainmapper.json"), registration_metadata(1));
    write_registration(&fixture.path("registration"), SMALL_SHAPE);
    write_classification(fixture.dir.path());

    let layers = read_detection_dir(fixture.dir.path(), &fixture.provider, &Settings::default())
        .expect("layers");
    assert_eq!(
        names(&layers),
        ["Hemispheres", ATLAS_NAME, "Boundaries", "Non cells", "Cells"]
    );
    assert_eq!(layers[0].shape(), [4, 5, 6]);
    assert_eq!(layers[4].point_set().map(|points| points.len()), Some(1));
}

#[test]
fn detection_dir_loads_every_channel() {
    let fixture = Fixture::new(SMALL_SHAPE);
    write_json(&fixture.path("cellfinder.json"), registration_metadata(2));
    write_classification(&fixture.path("channel_1"));
    write_classification(&fixture.path("channel_2"));

    let layers = read_detection_dir(fixture.dir.path(), &fixture.provider, &Settings::default())
        .expect("layers");
    assert_eq!(
        names(&layers),
        [
            "channel_1: Non cells",
            "channel_1: Cells",
            "channel_2: Non cells",
            "channel_2: Cells",
        ]
    );
}

#[test]
fn newer_detection_metadata_wins() {
    let fixture = Fixture::new(SMALL_SHAPE);
    write_json(&fixture.path("cellfinder.json"), registration_metadata(3));
    write_json(&fixture.path("brainmapper.json"), registration_metadata(1));
    let metadata = load_detection_metadata(fixture.dir.path()).expect("metadata");
    assert_eq!(metadata.signal_planes_paths.len(), 1);

    fs::remove_file(fixture.path("brainmapper.json")).expect("remove");
    let metadata = load_detection_metadata(fixture.dir.path()).expect("metadata");
    assert_eq!(metadata.signal_planes_paths.len(), 3);
}
