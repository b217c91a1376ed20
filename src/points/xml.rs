//! Cell counter XML dialect.
//!
//! Markers are grouped per category under `Marker_Data/Marker_Type`. Per-point
//! metadata is stored as `<Metadata key=".." type="..">value</Metadata>`
//! children of a marker; `type` is one of `str`, `int`, `float`, `bool` and
//! defaults to `str` when missing.

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::model::{Cell, CellType, Features, MetadataValue};

use super::{PointsError, Result};

pub const XML_ROOT: &str = "CellCounter_Marker_File";

const IMAGE_FILENAME: &str = "placeholder.tif";

#[derive(Default)]
struct PendingMarker {
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    metadata: Features,
}

struct PendingMetadata {
    key: String,
    kind: String,
}

/// True when the document is well formed and its root is the cell counter
/// root.
pub(crate) fn has_root(text: &str) -> bool {
    let mut reader = Reader::from_str(text);
    let mut depth = 0_usize;
    let mut rooted = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if depth == 0 {
                    if rooted || start.name().as_ref() != XML_ROOT.as_bytes() {
                        return false;
                    }
                    rooted = true;
                }
                depth += 1;
            }
            Ok(Event::Empty(start)) => {
                if depth == 0 {
                    return !rooted && start.name().as_ref() == XML_ROOT.as_bytes();
                }
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => return rooted && depth == 0,
            Err(_) => return false,
            Ok(_) => {}
        }
    }
}

pub(crate) fn decode(text: &str) -> Result<Vec<Cell>> {
    let mut reader = Reader::from_str(text);

    let mut stack: Vec<String> = Vec::new();
    let mut category: Option<CellType> = None;
    let mut marker: Option<PendingMarker> = None;
    let mut metadata: Option<PendingMetadata> = None;
    let mut cells = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let name = element_name(&start)?;
                match name.as_str() {
                    "Marker_Type" => category = None,
                    "Marker" => marker = Some(PendingMarker::default()),
                    "Metadata" => metadata = Some(metadata_attributes(&start)?),
                    _ => {}
                }
                stack.push(name);
            }
            Event::Empty(start) => {
                let name = element_name(&start)?;
                if name == "Metadata" {
                    let pending = metadata_attributes(&start)?;
                    insert_metadata(marker.as_mut(), pending, "")?;
                }
            }
            Event::Text(text) => {
                let value = text.unescape()?;
                let value = value.as_ref();
                match stack.last().map(String::as_str) {
                    Some("Type") => {
                        let code = parse_number::<i64>("Type", value)?;
                        category = Some(CellType::from_code(code)?);
                    }
                    Some("MarkerX") => pending(&mut marker)?.x = Some(parse_number("MarkerX", value)?),
                    Some("MarkerY") => pending(&mut marker)?.y = Some(parse_number("MarkerY", value)?),
                    Some("MarkerZ") => pending(&mut marker)?.z = Some(parse_number("MarkerZ", value)?),
                    Some("Metadata") => {
                        if let Some(entry) = metadata.take() {
                            insert_metadata(marker.as_mut(), entry, value)?;
                        }
                    }
                    _ => {}
                }
            }
            Event::End(_) => {
                match stack.pop().as_deref() {
                    Some("Marker") => {
                        let done = marker.take().unwrap_or_default();
                        cells.push(finish_marker(done, category)?);
                    }
                    Some("Metadata") => {
                        // `<Metadata ...></Metadata>` carries an empty value
                        if let Some(entry) = metadata.take() {
                            insert_metadata(marker.as_mut(), entry, "")?;
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => {
                if let Some(name) = stack.last() {
                    return Err(PointsError::Malformed(format!(
                        "document ends inside `<{name}>`"
                    )));
                }
                break;
            }
            _ => {}
        }
    }
    Ok(cells)
}

fn element_name(start: &BytesStart<'_>) -> Result<String> {
    String::from_utf8(start.name().as_ref().to_vec())
        .map_err(|_| PointsError::Malformed("element name is not UTF-8".into()))
}

fn metadata_attributes(start: &BytesStart<'_>) -> Result<PendingMetadata> {
    let mut key = None;
    let mut kind = None;
    for attribute in start.attributes() {
        let attribute = attribute?;
        let value = attribute.unescape_value()?.into_owned();
        match attribute.key.as_ref() {
            b"key" => key = Some(value),
            b"type" => kind = Some(value),
            _ => {}
        }
    }
    let key = key.ok_or_else(|| PointsError::Malformed("Metadata without a key".into()))?;
    Ok(PendingMetadata {
        key,
        kind: kind.unwrap_or_else(|| "str".to_string()),
    })
}

fn pending(marker: &mut Option<PendingMarker>) -> Result<&mut PendingMarker> {
    marker
        .as_mut()
        .ok_or_else(|| PointsError::Malformed("coordinate outside of a Marker".into()))
}

fn insert_metadata(
    marker: Option<&mut PendingMarker>,
    entry: PendingMetadata,
    raw: &str,
) -> Result<()> {
    let marker =
        marker.ok_or_else(|| PointsError::Malformed("Metadata outside of a Marker".into()))?;
    let value = match entry.kind.as_str() {
        "str" => MetadataValue::Text(raw.to_string()),
        "int" => MetadataValue::Int(parse_number(&entry.key, raw)?),
        "float" => MetadataValue::Float(parse_number(&entry.key, raw)?),
        "bool" => match raw.trim() {
            "true" | "True" => MetadataValue::Bool(true),
            "false" | "False" => MetadataValue::Bool(false),
            other => {
                return Err(PointsError::Malformed(format!(
                    "metadata `{}` is not a bool: `{other}`",
                    entry.key
                )));
            }
        },
        other => {
            return Err(PointsError::Malformed(format!(
                "metadata `{}` has unknown type `{other}`",
                entry.key
            )));
        }
    };
    marker.metadata.insert(entry.key, value);
    Ok(())
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| PointsError::Malformed(format!("`{field}` is not a number: `{raw}`")))
}

fn finish_marker(marker: PendingMarker, category: Option<CellType>) -> Result<Cell> {
    let category =
        category.ok_or_else(|| PointsError::Malformed("Marker before its Type".into()))?;
    match (marker.x, marker.y, marker.z) {
        (Some(x), Some(y), Some(z)) => Ok(Cell::new([x, y, z], category, marker.metadata)),
        _ => Err(PointsError::Malformed(
            "Marker needs MarkerX, MarkerY and MarkerZ".into(),
        )),
    }
}

pub(crate) fn encode(cells: &[Cell]) -> Result<Vec<u8>> {
    let mut by_category: BTreeMap<CellType, Vec<&Cell>> = BTreeMap::new();
    for cell in cells {
        by_category.entry(cell.category()).or_default().push(cell);
    }

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    open(&mut writer, XML_ROOT)?;
    open(&mut writer, "Image_Properties")?;
    text_element(&mut writer, "Image_Filename", IMAGE_FILENAME)?;
    close(&mut writer, "Image_Properties")?;

    open(&mut writer, "Marker_Data")?;
    let current = by_category.keys().next().copied().unwrap_or(CellType::Cell);
    text_element(&mut writer, "Current_Type", &current.code().to_string())?;
    for (category, group) in &by_category {
        open(&mut writer, "Marker_Type")?;
        text_element(&mut writer, "Type", &category.code().to_string())?;
        for cell in group {
            write_marker(&mut writer, cell)?;
        }
        close(&mut writer, "Marker_Type")?;
    }
    close(&mut writer, "Marker_Data")?;
    close(&mut writer, XML_ROOT)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

fn write_marker(writer: &mut Writer<Vec<u8>>, cell: &Cell) -> Result<()> {
    open(writer, "Marker")?;
    text_element(writer, "MarkerX", &cell.x().to_string())?;
    text_element(writer, "MarkerY", &cell.y().to_string())?;
    text_element(writer, "MarkerZ", &cell.z().to_string())?;
    for (key, value) in cell.metadata() {
        let mut start = BytesStart::new("Metadata");
        start.push_attribute(("key", key.as_str()));
        start.push_attribute(("type", value.type_name()));
        writer.write_event(Event::Start(start))?;
        writer.write_event(Event::Text(BytesText::new(&value.to_string())))?;
        close(writer, "Metadata")?;
    }
    close(writer, "Marker")
}

fn open(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

fn close(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    open(writer, name)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    close(writer, name)
}
