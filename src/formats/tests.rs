use ndarray::{Array, ArrayD, IxDyn};
use tempfile::tempdir;

use super::{IoError, read_volume, supported_formats, write_volume};
use crate::model::{PixelType, VolumeData};

fn stack<T: Copy>(shape: [usize; 3], f: impl Fn(usize) -> T) -> ArrayD<T> {
    let len = shape.iter().product::<usize>();
    Array::from_shape_vec(IxDyn(&shape), (0..len).map(f).collect()).expect("shape")
}

#[test]
fn tiff_roundtrip_preserves_sample_type() {
    let dir = tempdir().expect("tempdir");
    let volumes: Vec<VolumeData> = vec![
        stack([3, 4, 5], |i| i as u8).into(),
        stack([3, 4, 5], |i| (i * 1000) as u16).into(),
        stack([3, 4, 5], |i| (i * 70_000) as u32).into(),
        stack([3, 4, 5], |i| i as f32 * 0.5).into(),
    ];
    for (index, volume) in volumes.iter().enumerate() {
        let path = dir.path().join(format!("stack_{index}.tiff"));
        write_volume(&path, volume).expect("write");
        let restored = read_volume(&path).expect("read");
        assert_eq!(restored.pixel_type(), volume.pixel_type());
        assert_eq!(&restored, volume);
    }
}

#[test]
fn single_page_reads_as_plane() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("plane.tif");
    let plane = Array::from_shape_vec(IxDyn(&[2, 3]), vec![0_u16, 1, 2, 3, 4, 5]).expect("shape");
    write_volume(&path, &plane.clone().into()).expect("write");
    let restored = read_volume(&path).expect("read");
    assert_eq!(restored.shape(), &[2, 3]);
    assert_eq!(restored.pixel_type(), PixelType::U16);
    assert_eq!(restored, VolumeData::from(plane));
}

#[test]
fn strided_volume_is_written_in_logical_order() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("strided.tiff");
    let base = stack([2, 3, 4], |i| i as u8);
    let mut flipped = base.clone().reversed_axes();
    flipped.invert_axis(ndarray::Axis(1));
    let expected = flipped.as_standard_layout().into_owned();

    write_volume(&path, &flipped.into()).expect("write");
    let restored = read_volume(&path).expect("read");
    assert_eq!(restored.shape(), &[4, 3, 2]);
    assert_eq!(restored, VolumeData::from(expected));
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("volume.nii");
    let volume = VolumeData::from(stack([1, 1, 1], |_| 0_u8));
    let err = write_volume(&path, &volume).expect_err("nifti");
    assert!(matches!(err, IoError::UnsupportedFormat(ext) if ext == "nii"));
    assert!(matches!(
        read_volume(dir.path().join("volume")),
        Err(IoError::UnsupportedFormat(_))
    ));
    assert_eq!(supported_formats(), &["tif", "tiff"]);
}

#[test]
fn four_dimensional_volume_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("channels.tiff");
    let volume = VolumeData::from(Array::<f32, _>::zeros(IxDyn(&[2, 2, 2, 3])));
    let err = write_volume(&path, &volume).expect_err("4-D");
    assert!(matches!(err, IoError::UnsupportedLayout(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = read_volume(dir.path().join("absent.tif")).expect_err("missing");
    assert!(matches!(err, IoError::Io(_)));
}
