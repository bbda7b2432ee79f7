//! Defines the output document consumed by the lighting software.
//!
//! The document is built from a [`LayoutResult`] through explicit wire
//! structs, one per output type, so field names and order are fixed here and
//! nowhere else.

use crate::error::{IoError, Result};
use playa_core::{FixturePlacement, FrameDescriptor, LayoutResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Version of the document layout produced by this module.
///
/// A code-side schema marker: the consuming software reads an unversioned
/// document, so the version is logged when a document is emitted and never
/// written into it. Bump when a field is added, removed, renamed or reordered.
pub const LAYOUT_FORMAT_VERSION: &str = "1.0.0";

/// Fixture type of every base
pub const BASE_FIXTURE_TYPE: &str = "7-pixel-base";

/// Output protocol of every universe
pub const OUTPUT_PROTOCOL: &str = "artnet";

/// Channel order within one point
pub const OUTPUT_BYTE_ORDER: &str = "rgb";

/// Maximum document size accepted by [`LayoutDocument::load`] (16 MB).
pub const MAX_DOCUMENT_SIZE: u64 = 16 * 1024 * 1024;

/// Top-level fixture group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub label: String,
    pub comment: String,
    pub children: Vec<BaseEntry>,
    pub outputs: Vec<OutputEntry>,
}

/// One base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseEntry {
    #[serde(rename = "type")]
    pub fixture_type: String,
    pub x: f64,
    pub z: f64,
    pub tags: Vec<String>,
}

/// One Art-Net universe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputEntry {
    pub host: String,
    pub protocol: String,
    #[serde(rename = "byteOrder")]
    pub byte_order: String,
    pub universe: u32,
    pub start: usize,
    pub num: usize,
}

impl BaseEntry {
    fn from_placement(placement: &FixturePlacement) -> Self {
        Self {
            fixture_type: BASE_FIXTURE_TYPE.to_string(),
            x: placement.x(),
            z: placement.z(),
            tags: placement.tags.clone(),
        }
    }
}

impl OutputEntry {
    fn from_frame(frame: &FrameDescriptor, result: &LayoutResult) -> Self {
        let (start, num) = frame.addressed(result.address_unit, result.points_per_base);
        Self {
            host: frame.host.clone(),
            protocol: OUTPUT_PROTOCOL.to_string(),
            byte_order: OUTPUT_BYTE_ORDER.to_string(),
            universe: frame.universe,
            start,
            num,
        }
    }
}

impl LayoutDocument {
    /// Build the document for a finished layout
    pub fn from_result(result: &LayoutResult) -> Self {
        Self {
            label: result.label.clone(),
            comment: result.comment(),
            children: result
                .placements
                .iter()
                .map(BaseEntry::from_placement)
                .collect(),
            outputs: result
                .frames
                .iter()
                .map(|frame| OutputEntry::from_frame(frame, result))
                .collect(),
        }
    }

    /// Write pretty JSON with 4-space indentation
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)?;
        Ok(())
    }

    /// Pretty JSON as a string
    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_json(&mut buf)?;
        String::from_utf8(buf).map_err(|e| IoError::Io(std::io::Error::other(e)))
    }

    /// Save to `path`, choosing JSON or RON from the extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("json");

        match extension {
            "json" => {
                let mut writer = BufWriter::new(File::create(path)?);
                self.write_json(&mut writer)?;
                writer.write_all(b"\n")?;
                writer.flush()?;
            }
            "ron" => {
                let config = ron::ser::PrettyConfig::default();
                let s = ron::ser::to_string_pretty(self, config)?;
                let mut file = File::create(path)?;
                file.write_all(s.as_bytes())?;
            }
            _ => return Err(IoError::unsupported_format(extension)),
        }

        tracing::info!("Wrote layout document to {:?}", path);
        Ok(())
    }

    /// Load a previously saved document
    pub fn load(path: &Path) -> Result<Self> {
        let size = std::fs::metadata(path)?.len();
        if size > MAX_DOCUMENT_SIZE {
            return Err(IoError::FileTooLarge {
                size,
                limit: MAX_DOCUMENT_SIZE,
            });
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("json");

        let mut content = String::new();
        match extension {
            "json" => {
                File::open(path)?.read_to_string(&mut content)?;
                Ok(serde_json::from_str(&content)?)
            }
            "ron" => {
                File::open(path)?.read_to_string(&mut content)?;
                Ok(ron::from_str(&content)?)
            }
            _ => Err(IoError::unsupported_format(extension)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playa_core::{generate, AddressUnit, VenueConfig};
    use tempfile::TempDir;

    fn small_result() -> LayoutResult {
        let config = VenueConfig {
            bases_required: 30,
            ..Default::default()
        };
        generate(&config).unwrap()
    }

    #[test]
    fn test_field_names_and_order() {
        let doc = LayoutDocument::from_result(&small_result());
        let json = doc.to_json_string().unwrap();

        let label = json.find("\"label\"").unwrap();
        let comment = json.find("\"comment\"").unwrap();
        let children = json.find("\"children\"").unwrap();
        let outputs = json.find("\"outputs\"").unwrap();
        assert!(label < comment && comment < children && children < outputs);

        assert!(json.contains("\"type\": \"7-pixel-base\""));
        assert!(json.contains("\"byteOrder\": \"rgb\""));
        assert!(json.contains("\"protocol\": \"artnet\""));
        // 4-space indentation
        assert!(json.starts_with("{\n    \"label\": \"Rings\""));
    }

    #[test]
    fn test_output_entry_values() {
        let result = small_result();
        let doc = LayoutDocument::from_result(&result);

        assert_eq!(doc.comment, format!("Num Bases {}", result.placements.len()));
        assert_eq!(doc.children.len(), result.placements.len());
        assert_eq!(doc.outputs.len(), result.frames.len());
        assert_eq!(doc.outputs[0].universe, 0);
        assert_eq!(doc.outputs[0].start, 0);
        assert_eq!(doc.outputs[0].num, 24);
        assert_eq!(doc.outputs[0].host, "192.168.0.60");
    }

    #[test]
    fn test_point_unit_scales_outputs() {
        let mut result = small_result();
        result.address_unit = AddressUnit::Point;
        let doc = LayoutDocument::from_result(&result);

        assert_eq!(doc.outputs[0].num, 24 * 7);
        assert_eq!(doc.outputs[1].start, 24 * 7);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("layout.json");
        let doc = LayoutDocument::from_result(&small_result());

        doc.save(&path).unwrap();
        let loaded = LayoutDocument::load(&path).unwrap();
        assert_eq!(doc.label, loaded.label);
        assert_eq!(doc.outputs, loaded.outputs);
        for (saved, read) in doc.children.iter().zip(&loaded.children) {
            assert_eq!(saved.tags, read.tags);
            assert!((saved.x - read.x).abs() < 1e-9);
            assert!((saved.z - read.z).abs() < 1e-9);
        }
    }

    #[test]
    fn test_save_ron() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("layout.ron");
        let doc = LayoutDocument::from_result(&small_result());

        doc.save(&path).unwrap();
        let loaded = LayoutDocument::load(&path).unwrap();
        assert_eq!(doc.outputs, loaded.outputs);
        assert_eq!(doc.children.len(), loaded.children.len());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("layout.txt");
        let doc = LayoutDocument::from_result(&small_result());

        assert!(matches!(
            doc.save(&path),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
