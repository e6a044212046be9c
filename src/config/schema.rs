//! Typed view of the keys the merge pipeline consumes
//!
//! | Key                 | Meaning                                   |
//! |---------------------|-------------------------------------------|
//! | `setting.prefix`    | symbol prefix for emitted arrays (`img`)  |
//! | `resize.from`/`to`  | scale ratio `to / from`                   |
//! | `resize.mirror`     | `1` flips every part horizontally         |
//! | `offset.<part>`     | `x, y, width, height` canvas rectangle    |
//! | `data[].parts`      | which offset the entry is drawn into      |
//! | `data[].title`      | human-readable label                      |
//! | `data[].layers`     | `<files>` block, topmost layer first      |

use super::tree::{ConfigTree, LayerRecord, Table, Value};
use super::ConfigError;

/// Symbol prefix used when `setting.prefix` is absent.
pub const DEFAULT_PREFIX: &str = "img";

/// Part whose scaled box is the reference frame when mirroring.
pub const MIRROR_REFERENCE_PART: &str = "body";

/// Destination rectangle of a part, in source (unscaled) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartOffset {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeConfig {
    pub from: i64,
    pub to: i64,
    pub mirror: bool,
}

impl ResizeConfig {
    pub fn ratio(&self) -> f64 {
        self.to as f64 / self.from as f64
    }
}

/// One configured output image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEntry {
    pub parts: String,
    pub title: String,
    pub layers: Vec<LayerRecord>,
    /// Instance number among entries sharing `parts`; filled in by the pipeline.
    pub pidx: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub prefix: String,
    pub resize: ResizeConfig,
    offsets: Vec<(String, PartOffset)>,
    pub data: Vec<DataEntry>,
}

fn require<'a>(table: &'a Table, section: &str, key: &str) -> Result<&'a Value, ConfigError> {
    table
        .get(key)
        .ok_or_else(|| ConfigError::MissingKey { section: section.to_string(), key: key.to_string() })
}

fn invalid(section: &str, key: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue { section: section.to_string(), key: key.to_string(), expected }
}

fn require_int(table: &Table, section: &str, key: &str) -> Result<i64, ConfigError> {
    require(table, section, key)?.as_int().ok_or_else(|| invalid(section, key, "an integer"))
}

fn require_text(table: &Table, section: &str, key: &str) -> Result<String, ConfigError> {
    require(table, section, key)?.as_text().ok_or_else(|| invalid(section, key, "a single value"))
}

fn parse_offset(key: &str, value: &Value) -> Result<PartOffset, ConfigError> {
    const EXPECTED: &str = "x, y, width, height with a non-zero size";
    let ints: Option<Vec<i64>> = value.as_list().and_then(|items| items.iter().map(Value::as_int).collect());
    match ints.as_deref() {
        Some(&[x, y, w, h]) if w > 0 && h > 0 => Ok(PartOffset {
            x,
            y,
            width: u32::try_from(w).map_err(|_| invalid("offset", key, EXPECTED))?,
            height: u32::try_from(h).map_err(|_| invalid("offset", key, EXPECTED))?,
        }),
        _ => Err(invalid("offset", key, EXPECTED)),
    }
}

impl PipelineConfig {
    /// Extract and cross-check the pipeline settings.
    ///
    /// Fails when a data entry refers to a part with no offset, or when
    /// mirroring is requested without a `body` reference part.
    pub fn from_tree(tree: &ConfigTree) -> Result<Self, ConfigError> {
        let prefix = match tree.single("setting").and_then(|s| s.get("prefix")) {
            Some(value) => value.as_text().ok_or_else(|| invalid("setting", "prefix", "a single value"))?,
            None => DEFAULT_PREFIX.to_string(),
        };

        let resize_table = tree.single("resize").ok_or_else(|| ConfigError::MissingSection("resize".into()))?;
        let from = require_int(resize_table, "resize", "from")?;
        let to = require_int(resize_table, "resize", "to")?;
        if from <= 0 || to <= 0 {
            return Err(ConfigError::InvalidRatio { from, to });
        }
        let mirror = match resize_table.get("mirror") {
            Some(value) => value.as_int().ok_or_else(|| invalid("resize", "mirror", "0 or 1"))? == 1,
            None => false,
        };
        let resize = ResizeConfig { from, to, mirror };

        let offset_table = tree.single("offset").ok_or_else(|| ConfigError::MissingSection("offset".into()))?;
        let offsets = offset_table
            .iter()
            .map(|(key, value)| Ok((key.to_string(), parse_offset(key, value)?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let data = tree
            .repeated("data")
            .unwrap_or_default()
            .iter()
            .map(|table| {
                let layers = require(table, "data", "layers")?
                    .as_files()
                    .ok_or_else(|| invalid("data", "layers", "a <files> block"))?
                    .to_vec();
                Ok(DataEntry {
                    parts: require_text(table, "data", "parts")?,
                    title: require_text(table, "data", "title")?,
                    layers,
                    pidx: 0,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let config = PipelineConfig { prefix, resize, offsets, data };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for entry in &self.data {
            if self.offset(&entry.parts).is_none() {
                return Err(ConfigError::UnknownPart {
                    part: entry.parts.clone(),
                    title: entry.title.clone(),
                });
            }
        }
        if self.resize.mirror && self.offset(MIRROR_REFERENCE_PART).is_none() {
            return Err(ConfigError::MissingKey {
                section: "offset".into(),
                key: MIRROR_REFERENCE_PART.into(),
            });
        }
        Ok(())
    }

    pub fn offset(&self, part: &str) -> Option<&PartOffset> {
        self.offsets.iter().find(|(name, _)| name == part).map(|(_, o)| o)
    }

    /// Reference box used to re-anchor mirrored parts, present only when
    /// mirroring is enabled.
    pub fn mirror_reference(&self) -> Option<&PartOffset> {
        if self.resize.mirror {
            self.offset(MIRROR_REFERENCE_PART)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tree::parse;

    fn load(text: &str) -> Result<PipelineConfig, ConfigError> {
        PipelineConfig::from_tree(&parse(text)?)
    }

    const BASE: &str = "\
[resize]
from = 1
to = 1
mirror = 0
[offset]
head = 10, 10, 20, 20
[[data]]
parts = head
title = A
layers = <files>
red.W20_H20_X10_Y10.png
</files>
";

    #[test]
    fn test_from_tree_basic() {
        let config = load(BASE).unwrap();
        assert_eq!(config.prefix, DEFAULT_PREFIX);
        assert_eq!(config.resize, ResizeConfig { from: 1, to: 1, mirror: false });
        assert_eq!(config.offset("head"), Some(&PartOffset { x: 10, y: 10, width: 20, height: 20 }));
        assert_eq!(config.data.len(), 1);
        assert_eq!(config.data[0].title, "A");
        assert_eq!(config.data[0].layers[0].x, 10);
        assert!(config.mirror_reference().is_none());
    }

    #[test]
    fn test_prefix_from_setting() {
        let text = format!("[setting]\nprefix = zunda\n{}", BASE);
        assert_eq!(load(&text).unwrap().prefix, "zunda");
    }

    #[test]
    fn test_numeric_title_is_text() {
        let text = BASE.replace("title = A", "title = 42");
        assert_eq!(load(&text).unwrap().data[0].title, "42");
    }

    #[test]
    fn test_ratio() {
        let text = BASE.replace("from = 1", "from = 4").replace("to = 1", "to = 3");
        assert_eq!(load(&text).unwrap().resize.ratio(), 0.75);
    }

    #[test]
    fn test_zero_ratio_rejected() {
        let text = BASE.replace("from = 1", "from = 0");
        assert!(matches!(load(&text), Err(ConfigError::InvalidRatio { from: 0, to: 1 })));
    }

    #[test]
    fn test_unknown_part_rejected() {
        let text = BASE.replace("parts = head", "parts = tail");
        match load(&text) {
            Err(ConfigError::UnknownPart { part, title }) => {
                assert_eq!(part, "tail");
                assert_eq!(title, "A");
            }
            other => panic!("expected UnknownPart, got {:?}", other),
        }
    }

    #[test]
    fn test_mirror_requires_body() {
        let text = BASE.replace("mirror = 0", "mirror = 1");
        assert!(matches!(load(&text), Err(ConfigError::MissingKey { ref key, .. }) if key == "body"));

        let text = text.replace("[offset]\n", "[offset]\nbody = 0, 0, 100, 50\n");
        let config = load(&text).unwrap();
        assert_eq!(config.mirror_reference().map(|o| o.width), Some(100));
    }

    #[test]
    fn test_missing_mirror_defaults_off() {
        let config = load(&BASE.replace("mirror = 0\n", "")).unwrap();
        assert!(!config.resize.mirror);
    }

    #[test]
    fn test_bad_offset_rejected() {
        for bad in ["head = 10, 10, 20", "head = 10, 10, 0, 20", "head = a, 10, 20, 20", "head = 10"] {
            let text = BASE.replace("head = 10, 10, 20, 20", bad);
            assert!(
                matches!(load(&text), Err(ConfigError::InvalidValue { .. })),
                "offset '{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_layers_must_be_file_block() {
        let text = "[resize]\nfrom = 1\nto = 1\n[offset]\nhead = 0, 0, 1, 1\n[[data]]\nparts = head\ntitle = A\nlayers = a.png\n";
        assert!(matches!(load(text), Err(ConfigError::InvalidValue { ref key, .. }) if key == "layers"));
    }

    #[test]
    fn test_missing_resize_section() {
        assert!(matches!(
            load("[offset]\nhead = 0, 0, 1, 1\n"),
            Err(ConfigError::MissingSection(ref s)) if s == "resize"
        ));
    }

    #[test]
    fn test_no_data_entries() {
        let config = load("[resize]\nfrom = 1\nto = 1\n[offset]\nhead = 0, 0, 1, 1\n").unwrap();
        assert!(config.data.is_empty());
    }
}
