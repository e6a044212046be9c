//! Line-oriented asset configuration format
//!
//! The format is a small INI dialect:
//!
//! ```text
//! [setting]                 single section
//! prefix = img
//!
//! [[data]]                  repeated section, one table per occurrence
//! parts = mouth
//! title = open
//! layers = <files>
//! mouth-open.W40_H20_X100_Y120.png
//! </files>
//!
//! # or ; starts a comment
//! [end]                     everything after this line is ignored
//! ```
//!
//! Values are typed as they are read: an all-digit string becomes
//! [`Value::Int`], a comma-separated value becomes [`Value::List`], and a
//! `<files>` block becomes [`Value::Files`].

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::ConfigError;

/// Marker value that opens a file-list block.
pub const FILES_OPEN: &str = "<files>";
/// Line that closes a file-list block.
pub const FILES_CLOSE: &str = "</files>";
/// Line that stops parsing.
pub const END_MARKER: &str = "[end]";

fn section_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[\[?(\w+)\]?\]$").expect("valid section regex"))
}

fn repeated_section_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[\[\w+\]\]$").expect("valid repeated section regex"))
}

fn key_value_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)\s*=\s*(.+)$").expect("valid key/value regex"))
}

fn layer_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^.+?\.W(\d+)_H(\d+)_X(\d+)_Y(\d+)\.png").expect("valid layer regex")
    })
}

/// One layer image named in a file-list block.
///
/// The geometry comes from the filename itself, which the PSD export step
/// writes as `<name>.W<width>_H<height>_X<x>_Y<y>.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRecord {
    pub filename: String,
    pub w: u32,
    pub h: u32,
    pub x: u32,
    pub y: u32,
}

impl LayerRecord {
    /// Parse a file-list line. Returns `None` when the line does not follow
    /// the layer filename pattern.
    pub fn parse(line: &str) -> Option<LayerRecord> {
        let caps = layer_regex().captures(line)?;
        let num = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();
        Some(LayerRecord {
            filename: line.to_string(),
            w: num(1)?,
            h: num(2)?,
            x: num(3)?,
            y: num(4)?,
        })
    }
}

/// A configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
    List(Vec<Value>),
    Files(Vec<LayerRecord>),
}

impl Value {
    /// Type a single trimmed scalar: all ASCII digits become an integer.
    fn scalar(raw: &str) -> Value {
        let s = raw.trim();
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = s.parse::<i64>() {
                return Value::Int(n);
            }
        }
        Value::Str(s.to_string())
    }

    /// Type the right-hand side of a `key = value` line.
    pub fn from_raw(raw: &str) -> Value {
        if raw.contains(',') {
            Value::List(raw.split(',').map(Value::scalar).collect())
        } else {
            Value::scalar(raw)
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_files(&self) -> Option<&[LayerRecord]> {
        match self {
            Value::Files(files) => Some(files),
            _ => None,
        }
    }

    /// Text form of a scalar. Integers are rendered in decimal; lists and
    /// file blocks have no scalar form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Int(n) => Some(n.to_string()),
            Value::Str(s) => Some(s.clone()),
            Value::List(_) | Value::Files(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Files(files) => {
                writeln!(f, "{}", FILES_OPEN)?;
                for layer in files {
                    writeln!(f, "{}", layer.filename)?;
                }
                write!(f, "{}", FILES_CLOSE)
            }
        }
    }
}

/// Ordered key/value mapping. Re-assigning a key overwrites it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    entries: Vec<(String, Value)>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.get_mut(&key) {
            Some(slot) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A named section: `[name]` or `[[name]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Single(Table),
    Repeated(Vec<Table>),
}

/// Parsed configuration, sections in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigTree {
    sections: Vec<(String, Section)>,
}

impl ConfigTree {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// The mapping of a `[name]` section.
    pub fn single(&self, name: &str) -> Option<&Table> {
        match self.section(name)? {
            Section::Single(table) => Some(table),
            Section::Repeated(_) => None,
        }
    }

    /// The instances of a `[[name]]` section.
    pub fn repeated(&self, name: &str) -> Option<&[Table]> {
        match self.section(name)? {
            Section::Repeated(tables) => Some(tables),
            Section::Single(_) => None,
        }
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(n, s)| (n.as_str(), s))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|(n, _)| n == name)
    }
}

impl fmt::Display for ConfigTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_table = |f: &mut fmt::Formatter<'_>, table: &Table| -> fmt::Result {
            for (key, value) in table.iter() {
                writeln!(f, "{} = {}", key, value)?;
            }
            Ok(())
        };

        for (i, (name, section)) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match section {
                Section::Single(table) => {
                    writeln!(f, "[{}]", name)?;
                    write_table(f, table)?;
                }
                Section::Repeated(tables) => {
                    for (j, table) in tables.iter().enumerate() {
                        if j > 0 {
                            writeln!(f)?;
                        }
                        writeln!(f, "[[{}]]", name)?;
                        write_table(f, table)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Where key/value lines currently land.
enum Target {
    None,
    Single(usize),
    Repeated(usize),
}

struct ParserState {
    tree: ConfigTree,
    target: Target,
    /// Key whose file list is being collected, if inside `<files>`.
    files_key: Option<String>,
}

impl ParserState {
    fn new() -> Self {
        Self { tree: ConfigTree::default(), target: Target::None, files_key: None }
    }

    fn current_table(&mut self) -> Option<&mut Table> {
        match self.target {
            Target::None => None,
            Target::Single(idx) => match &mut self.tree.sections[idx].1 {
                Section::Single(table) => Some(table),
                Section::Repeated(_) => None,
            },
            Target::Repeated(idx) => match &mut self.tree.sections[idx].1 {
                Section::Repeated(tables) => tables.last_mut(),
                Section::Single(_) => None,
            },
        }
    }

    fn open_section(&mut self, name: &str, repeated: bool, line_no: usize) -> Result<(), ConfigError> {
        self.files_key = None;
        let conflict = || ConfigError::SectionKindConflict { name: name.to_string(), line: line_no };

        match (self.tree.position(name), repeated) {
            (Some(idx), true) => match &mut self.tree.sections[idx].1 {
                Section::Repeated(tables) => {
                    tables.push(Table::new());
                    self.target = Target::Repeated(idx);
                }
                Section::Single(_) => return Err(conflict()),
            },
            (Some(idx), false) => match &mut self.tree.sections[idx].1 {
                Section::Single(table) => {
                    *table = Table::new();
                    self.target = Target::Single(idx);
                }
                Section::Repeated(_) => return Err(conflict()),
            },
            (None, true) => {
                self.tree.sections.push((name.to_string(), Section::Repeated(vec![Table::new()])));
                self.target = Target::Repeated(self.tree.sections.len() - 1);
            }
            (None, false) => {
                self.tree.sections.push((name.to_string(), Section::Single(Table::new())));
                self.target = Target::Single(self.tree.sections.len() - 1);
            }
        }
        Ok(())
    }

    fn push_layer(&mut self, line: &str) {
        let Some(key) = self.files_key.clone() else {
            return;
        };
        // Lines that do not follow the layer naming pattern are skipped.
        let Some(layer) = LayerRecord::parse(line) else {
            return;
        };
        if let Some(Value::Files(files)) = self.current_table().and_then(|t| t.get_mut(&key)) {
            files.push(layer);
        }
    }
}

/// Parse configuration text into a [`ConfigTree`].
pub fn parse(text: &str) -> Result<ConfigTree, ConfigError> {
    let mut state = ParserState::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line == END_MARKER {
            break;
        }

        if let Some(caps) = section_regex().captures(line) {
            let repeated = repeated_section_regex().is_match(line);
            state.open_section(&caps[1], repeated, line_no)?;
            continue;
        }

        if state.files_key.is_some() {
            if line == FILES_CLOSE {
                state.files_key = None;
            } else {
                state.push_layer(line);
            }
            continue;
        }

        let Some(caps) = key_value_regex().captures(line) else {
            return Err(ConfigError::MalformedLine { line: line_no, text: line.to_string() });
        };
        let key = caps[1].to_string();
        let raw_value = &caps[2];

        let Some(table) = state.current_table() else {
            return Err(ConfigError::KeyOutsideSection { key, line: line_no });
        };
        if raw_value == FILES_OPEN {
            table.insert(key.clone(), Value::Files(Vec::new()));
            state.files_key = Some(key);
        } else {
            table.insert(key, Value::from_raw(raw_value));
        }
    }

    Ok(state.tree)
}
