use std::collections::HashSet;

use ndarray::{Array, Array2};
use serde_json::json;

use super::{
    AnatomicalAxis, AnatomicalSpace, AxisMapping, CellType, CoreError, Direction, Features,
    MetadataValue, PointSet, ReferenceAtlas, RegistrationMetadata, VolumeData, mapping,
};

#[test]
fn parses_orientation_code() {
    let space = AnatomicalSpace::parse("prs").expect("space");
    assert_eq!(space.axis(0), AnatomicalAxis::AnteriorPosterior);
    assert_eq!(space.direction(0), Direction::Reversed);
    assert_eq!(space.axis(1), AnatomicalAxis::LeftRight);
    assert_eq!(space.direction(1), Direction::Canonical);
    assert_eq!(space.axis(2), AnatomicalAxis::SuperiorInferior);
    assert_eq!(space.direction(2), Direction::Canonical);
    assert_eq!(space.code(), "prs");
}

#[test]
fn rejects_malformed_codes() {
    for code in ["", "as", "asrx", "asx", "aps", "ssr", "rrl"] {
        let err = AnatomicalSpace::parse(code).expect_err(code);
        assert!(
            matches!(err, CoreError::InvalidOrientationCode { .. }),
            "{code}: {err}"
        );
    }
}

#[test]
fn enumerates_all_48_spaces() {
    let spaces = AnatomicalSpace::all();
    assert_eq!(spaces.len(), 48);
    let codes = spaces.iter().map(AnatomicalSpace::code).collect::<HashSet<_>>();
    assert_eq!(codes.len(), 48);
    for code in codes {
        assert_eq!(AnatomicalSpace::parse(&code).expect("roundtrip").code(), code);
    }
}

#[test]
fn axis_order_matches_canonical_axes() {
    let space = AnatomicalSpace::parse("prs").expect("space");
    // anterior-posterior on dim 0, superior-inferior on dim 2, left-right on dim 1
    assert_eq!(space.axis_order(), [0, 2, 1]);
    let atlas = AnatomicalSpace::parse("asr").expect("space");
    assert_eq!(atlas.axis_order(), [0, 1, 2]);
}

#[test]
fn mapping_to_self_is_identity() {
    for space in AnatomicalSpace::all() {
        let result = mapping(&space, &space).expect("mapping");
        assert!(result.is_identity(), "{space}");
    }
}

#[test]
fn mapping_tracks_permutation_and_flips() {
    let atlas = AnatomicalSpace::parse("asr").expect("space");
    let sample = AnatomicalSpace::parse("prs").expect("space");
    let result = atlas.mapping_to(&sample).expect("mapping");
    assert_eq!(
        result,
        AxisMapping {
            permutation: [0, 2, 1],
            flips: [true, false, false],
        }
    );
    assert_eq!(result.apply([135, 108, 77]), [135, 77, 108]);
}

#[test]
fn space_serializes_as_code() {
    let space: AnatomicalSpace = serde_json::from_value(json!("ial")).expect("deserialize");
    assert_eq!(space.code(), "ial");
    assert_eq!(serde_json::to_value(space).expect("serialize"), json!("ial"));
    assert!(serde_json::from_value::<AnatomicalSpace>(json!("abc")).is_err());
}

#[test]
fn registration_metadata_accepts_textual_voxel_sizes() {
    let raw = json!({
        "atlas": "allen_mouse_100um",
        "orientation": "psl",
        "voxel_sizes": ["5", 2.0, " 2 "],
        "n_free_cpus": 4
    });
    let metadata: RegistrationMetadata = serde_json::from_value(raw).expect("metadata");
    assert_eq!(metadata.atlas, "allen_mouse_100um");
    assert_eq!(metadata.orientation.code(), "psl");
    assert_eq!(metadata.voxel_sizes, [5.0, 2.0, 2.0]);
    assert_eq!(metadata.extras.get("n_free_cpus"), Some(&json!(4)));
}

#[test]
fn registration_metadata_rejects_wrong_voxel_count() {
    let raw = json!({
        "atlas": "allen_mouse_100um",
        "orientation": "psl",
        "voxel_sizes": [5.0, 2.0],
    });
    assert!(serde_json::from_value::<RegistrationMetadata>(raw).is_err());
}

#[test]
fn cell_type_codes_roundtrip() {
    for category in [CellType::Unknown, CellType::Cell, CellType::Artifact] {
        assert_eq!(CellType::from_code(category.code()).expect("code"), category);
    }
    assert!(matches!(
        CellType::from_code(7),
        Err(CoreError::UnknownCategory(7))
    ));
}

#[test]
fn point_set_validates_shape() {
    let positions = Array2::<f64>::zeros((4, 2));
    assert!(PointSet::new(CellType::Cell, positions, Vec::new()).is_err());

    let positions = Array2::<f64>::zeros((2, 3));
    let mut features = Features::new();
    features.insert("source".into(), MetadataValue::from("manual"));
    assert!(matches!(
        PointSet::new(CellType::Cell, positions.clone(), vec![features.clone()]),
        Err(CoreError::FeatureCountMismatch { .. })
    ));

    let points = PointSet::new(CellType::Cell, positions, vec![features, Features::new()])
        .expect("points");
    assert_eq!(points.len(), 2);
    assert_eq!(points.feature_keys().into_iter().collect::<Vec<_>>(), vec!["source"]);
}

#[test]
fn atlas_rejects_non_positive_resolution() {
    let annotation = VolumeData::from(Array::<u32, _>::zeros((2, 2, 2)).into_dyn());
    let space = AnatomicalSpace::parse("asr").expect("space");
    assert!(ReferenceAtlas::new("test", space, [100.0, 0.0, 100.0], annotation.clone()).is_err());
    let atlas = ReferenceAtlas::new("test", space, [100.0, 100.0, 100.0], annotation)
        .expect("atlas");
    assert_eq!(atlas.shape(), &[2, 2, 2]);
}
