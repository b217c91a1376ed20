use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, Write};
use std::path::Path;

use crate::model::{PixelType, VolumeData};
use ndarray::{ArcArray, ArrayD, IxDyn};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::{self, ColorType};
use tiff::encoder::{TiffEncoder, TiffValue};

use super::{IoError, Result};

pub(crate) fn read_tiff(path: &Path) -> Result<VolumeData> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(BufReader::new(file))?;
    let (width, height) = decoder.dimensions()?;
    let mut pages = Vec::new();

    loop {
        pages.push(decoder.read_image()?);
        if !decoder.more_images() {
            break;
        }
        decoder.next_image()?;
        let (other_width, other_height) = decoder.dimensions()?;
        if other_width != width || other_height != height {
            return Err(IoError::UnsupportedLayout(
                "TIFF pages must have identical dimensions".into(),
            ));
        }
    }

    let (width, height) = (width as usize, height as usize);
    let pixel_type = match pages.first() {
        Some(DecodingResult::U8(_)) => PixelType::U8,
        Some(DecodingResult::U16(_)) => PixelType::U16,
        Some(DecodingResult::U32(_)) => PixelType::U32,
        Some(DecodingResult::F32(_)) => PixelType::F32,
        Some(other) => {
            return Err(IoError::UnsupportedLayout(format!(
                "unsupported TIFF sample type: {}",
                sample_type_name(other)
            )));
        }
        None => return Err(IoError::UnsupportedLayout("TIFF has no pages".into())),
    };

    let volume: VolumeData = match pixel_type {
        PixelType::U8 => stack_pages(pages, width, height, as_u8)?.into(),
        PixelType::U16 => stack_pages(pages, width, height, as_u16)?.into(),
        PixelType::U32 => stack_pages(pages, width, height, as_u32)?.into(),
        PixelType::F32 => stack_pages(pages, width, height, as_f32)?.into(),
    };
    Ok(volume)
}

fn as_u8(page: DecodingResult) -> Option<Vec<u8>> {
    match page {
        DecodingResult::U8(buffer) => Some(buffer),
        _ => None,
    }
}

fn as_u16(page: DecodingResult) -> Option<Vec<u16>> {
    match page {
        DecodingResult::U16(buffer) => Some(buffer),
        _ => None,
    }
}

fn as_u32(page: DecodingResult) -> Option<Vec<u32>> {
    match page {
        DecodingResult::U32(buffer) => Some(buffer),
        _ => None,
    }
}

fn as_f32(page: DecodingResult) -> Option<Vec<f32>> {
    match page {
        DecodingResult::F32(buffer) => Some(buffer),
        _ => None,
    }
}

fn sample_type_name(page: &DecodingResult) -> &'static str {
    match page {
        DecodingResult::U8(_) => "u8",
        DecodingResult::U16(_) => "u16",
        DecodingResult::U32(_) => "u32",
        DecodingResult::U64(_) => "u64",
        DecodingResult::F32(_) => "f32",
        DecodingResult::F64(_) => "f64",
        DecodingResult::I8(_) => "i8",
        DecodingResult::I16(_) => "i16",
        DecodingResult::I32(_) => "i32",
        DecodingResult::I64(_) => "i64",
        #[allow(unreachable_patterns)]
        _ => "other",
    }
}

/// Pages are planes of a (pages, height, width) stack; one page stays 2-D.
fn stack_pages<T>(
    pages: Vec<DecodingResult>,
    width: usize,
    height: usize,
    unwrap_page: fn(DecodingResult) -> Option<Vec<T>>,
) -> Result<ArrayD<T>> {
    let depth = pages.len();
    let plane = width * height;
    let mut values = Vec::with_capacity(plane * depth);
    for page in pages {
        let samples = unwrap_page(page).ok_or_else(|| {
            IoError::UnsupportedLayout("TIFF pages must share one sample type".into())
        })?;
        if samples.len() != plane {
            return Err(IoError::UnsupportedLayout(
                "TIFF RGB/alpha pages are not supported for volumes".into(),
            ));
        }
        values.extend(samples);
    }

    let shape = if depth == 1 {
        vec![height, width]
    } else {
        vec![depth, height, width]
    };
    Ok(ArrayD::from_shape_vec(IxDyn(&shape), values)?)
}

pub(crate) fn write_tiff(path: &Path, volume: &VolumeData) -> Result<()> {
    let (depth, height, width) = match volume.shape() {
        [height, width] => (1, *height, *width),
        [depth, height, width] => (*depth, *height, *width),
        other => {
            return Err(IoError::UnsupportedLayout(format!(
                "TIFF supports [Y, X] or [Z, Y, X], found shape {other:?}"
            )));
        }
    };
    let file = File::create(path)?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))?;

    match volume {
        VolumeData::U8(array) => {
            write_pages::<colortype::Gray8, _>(&mut encoder, array, depth, height, width)
        }
        VolumeData::U16(array) => {
            write_pages::<colortype::Gray16, _>(&mut encoder, array, depth, height, width)
        }
        VolumeData::U32(array) => {
            write_pages::<colortype::Gray32, _>(&mut encoder, array, depth, height, width)
        }
        VolumeData::F32(array) => {
            write_pages::<colortype::Gray32Float, _>(&mut encoder, array, depth, height, width)
        }
    }
}

// Iterating in logical order also materializes reoriented (strided) arrays.
fn write_pages<C, W>(
    encoder: &mut TiffEncoder<W>,
    array: &ArcArray<C::Inner, IxDyn>,
    depth: usize,
    height: usize,
    width: usize,
) -> Result<()>
where
    C: ColorType,
    C::Inner: Clone,
    [C::Inner]: TiffValue,
    W: Write + Seek,
{
    let values = array.iter().cloned().collect::<Vec<_>>();
    let plane = width * height;
    for z in 0..depth {
        let image = encoder.new_image::<C>(width as u32, height as u32)?;
        image.write_data(&values[z * plane..(z + 1) * plane])?;
    }
    Ok(())
}
