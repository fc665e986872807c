//! Line-oriented scene file parser.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use umbra_math::DVec3;

use super::motif::{EntryKind, EntryMotif, ValueKind, ENTRY_KIND_COUNT, MOTIFS};
use super::records::*;

/// Most tokens allowed on one line.
pub const MAX_TOKENS: usize = 4;

/// Most parameter lines allowed in one entry.
pub const MAX_PARAMETER_LINES: usize = 8;

/// Why a single entry was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryErrorKind {
    #[error("Unrecognized parameter.")]
    Unknown,

    #[error("Wrong type of component(s).")]
    Type,

    #[error("Wrong number of components.")]
    Size,

    #[error("Missing parameter.")]
    Missing,

    #[error("Repeated parameter.")]
    Repeated,

    #[error("File not found or invalid filename.")]
    Filename,

    #[error("Invalid value(s).")]
    Value,

    #[error("Conflicting parameters.")]
    Conflict,
}

/// Errors that can occur while reading a scene file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: Too many tokens.")]
    TooManyTokens { line: usize },

    #[error("Line {line}: Unrecognized item \"{label}\".")]
    UnknownEntry { line: usize, label: String },

    #[error("Line {line}: Too many entries of {kind}.")]
    TooManyEntries { line: usize, kind: EntryKind },

    #[error("Line {line}: Too many parameter lines.")]
    TooManyLines { line: usize },

    #[error("In entry at line {line}: {kind}")]
    Entry { line: usize, kind: EntryErrorKind },

    #[error("No entries found for {0}.")]
    MissingEntry(EntryKind),

    #[error("Scene contains no actors.")]
    NoActors,
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Read and validate a scene file.
///
/// Texture filenames are resolved against the directory holding the file.
pub fn load_scene_file<P: AsRef<Path>>(path: P) -> ParseResult<Vec<SceneRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    log::info!("Reading scene file {}", path.display());
    parse_scene(&content, base_dir)
}

/// Parse scene file contents.
pub fn parse_scene(content: &str, base_dir: &Path) -> ParseResult<Vec<SceneRecord>> {
    SceneFileParser::new(base_dir).parse(content)
}

/// One collected parameter line.
struct ParameterLine {
    tokens: Vec<String>,
}

/// An entry whose lines are still being collected.
struct PendingEntry {
    kind: EntryKind,
    start_line: usize,
    lines: Vec<ParameterLine>,
}

/// A validated parameter value.
#[derive(Debug, Clone)]
enum Value {
    Numbers(Vec<f64>),
    File(PathBuf),
}

/// Scene file parser state.
struct SceneFileParser<'a> {
    base_dir: &'a Path,
    counters: [usize; ENTRY_KIND_COUNT],
    records: Vec<SceneRecord>,
}

impl<'a> SceneFileParser<'a> {
    fn new(base_dir: &'a Path) -> Self {
        Self {
            base_dir,
            counters: [0; ENTRY_KIND_COUNT],
            records: Vec::new(),
        }
    }

    fn parse(mut self, content: &str) -> ParseResult<Vec<SceneRecord>> {
        let mut pending: Option<PendingEntry> = None;

        for (index, line) in content.lines().enumerate() {
            let line_num = index + 1;
            let tokens = tokenize_line(line).ok_or(ParseError::TooManyTokens { line: line_num })?;

            if tokens.is_empty() {
                // Only a truly empty line closes the entry. Comment and
                // whitespace-only lines are skipped.
                if line.is_empty() {
                    if let Some(entry) = pending.take() {
                        self.finish_entry(entry)?;
                    }
                }
                continue;
            }

            match pending.as_mut() {
                None => pending = Some(self.open_entry(&tokens[0], line_num)?),
                Some(entry) => {
                    if entry.lines.len() == MAX_PARAMETER_LINES {
                        return Err(ParseError::TooManyLines { line: line_num });
                    }
                    entry.lines.push(ParameterLine { tokens });
                }
            }
        }

        if let Some(entry) = pending.take() {
            self.finish_entry(entry)?;
        }

        for motif in &MOTIFS {
            if motif.mandatory && self.counters[motif.kind as usize] == 0 {
                return Err(ParseError::MissingEntry(motif.kind));
            }
        }
        if !self.records.iter().any(SceneRecord::is_actor) {
            return Err(ParseError::NoActors);
        }

        log::info!(
            "Scene file holds {} entries ({} actors)",
            self.records.len(),
            self.records.iter().filter(|r| r.is_actor()).count()
        );

        Ok(self.records)
    }

    fn open_entry(&mut self, label: &str, line: usize) -> ParseResult<PendingEntry> {
        let kind = EntryKind::from_label(label).ok_or_else(|| ParseError::UnknownEntry {
            line,
            label: label.to_string(),
        })?;

        let counter = &mut self.counters[kind as usize];
        *counter += 1;
        if let Some(max) = kind.motif().max_count {
            if *counter > max {
                return Err(ParseError::TooManyEntries { line, kind });
            }
        }

        Ok(PendingEntry {
            kind,
            start_line: line,
            lines: Vec::new(),
        })
    }

    fn finish_entry(&mut self, entry: PendingEntry) -> ParseResult<()> {
        let motif = entry.kind.motif();
        let values = self
            .collect_values(motif, &entry.lines)
            .map_err(|kind| ParseError::Entry {
                line: entry.start_line,
                kind,
            })?;

        let record = build_record(entry.kind, values);
        log::debug!("Entry at line {}: {:?}", entry.start_line, record);
        self.records.push(record);
        Ok(())
    }

    /// Validate parameter lines against a motif, filling in defaults.
    fn collect_values(
        &self,
        motif: &EntryMotif,
        lines: &[ParameterLine],
    ) -> Result<Vec<Option<Value>>, EntryErrorKind> {
        let mut values: Vec<Option<Value>> = vec![None; motif.parameters.len()];

        for line in lines {
            let label = line.tokens[0].as_str();
            let index = motif.index_of(label).ok_or(EntryErrorKind::Unknown)?;
            let parameter = &motif.parameters[index];

            if values[index].is_some() {
                return Err(EntryErrorKind::Repeated);
            }
            if let Some(alt) = parameter.alternative {
                if values[alt].is_some() {
                    return Err(EntryErrorKind::Conflict);
                }
            }
            if line.tokens.len() != parameter.kind.token_count() {
                return Err(EntryErrorKind::Size);
            }

            let value = match parameter.kind {
                ValueKind::Text => Value::File(
                    check_filename(&line.tokens[1], self.base_dir)
                        .ok_or(EntryErrorKind::Filename)?,
                ),
                ValueKind::Vector | ValueKind::Real => {
                    let numbers = line.tokens[1..]
                        .iter()
                        .map(|t| t.parse::<f64>())
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(|_| EntryErrorKind::Type)?;
                    if !parameter.check.accepts(&numbers) {
                        return Err(EntryErrorKind::Value);
                    }
                    Value::Numbers(numbers)
                }
            };
            values[index] = Some(value);
        }

        for (index, parameter) in motif.parameters.iter().enumerate() {
            if values[index].is_some() {
                continue;
            }
            if let Some(default) = parameter.default {
                values[index] = Some(Value::Numbers(default.to_vec()));
            } else {
                let covered = parameter
                    .alternative
                    .map(|alt| values[alt].is_some())
                    .unwrap_or(false);
                if !covered {
                    return Err(EntryErrorKind::Missing);
                }
            }
        }

        Ok(values)
    }
}

/// Split a line into tokens, dropping comments.
///
/// Returns `None` when the line holds more than [`MAX_TOKENS`] tokens.
fn tokenize_line(line: &str) -> Option<Vec<String>> {
    let content = match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    };
    let tokens: Vec<String> = content.split_whitespace().map(str::to_string).collect();
    (tokens.len() <= MAX_TOKENS).then_some(tokens)
}

/// Check a quoted PNG filename and resolve it to an existing file.
fn check_filename(token: &str, base_dir: &Path) -> Option<PathBuf> {
    let name = token.strip_prefix('"')?.strip_suffix('"')?;
    if name.is_empty() {
        return None;
    }

    let path = Path::new(name);
    let is_png = path
        .extension()
        .map(|ext| ext == "png")
        .unwrap_or(false);
    if !is_png {
        return None;
    }

    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    };
    resolved.is_file().then_some(resolved)
}

/// Turn validated values into a typed record.
///
/// `values` comes from `collect_values`, so every required slot is filled
/// and numeric slots carry the component count of their motif.
fn build_record(kind: EntryKind, values: Vec<Option<Value>>) -> SceneRecord {
    let vector = |i: usize| match &values[i] {
        Some(Value::Numbers(n)) if n.len() == 3 => DVec3::new(n[0], n[1], n[2]),
        _ => DVec3::ZERO,
    };
    let real = |i: usize| match &values[i] {
        Some(Value::Numbers(n)) if !n.is_empty() => n[0],
        _ => 0.0,
    };
    let surface = |color: usize, texture: usize| match &values[texture] {
        Some(Value::File(path)) => Surface::Texture(path.clone()),
        _ => Surface::Color(vector(color)),
    };

    match kind {
        EntryKind::Camera => SceneRecord::Camera(CameraRecord {
            position: vector(0),
            target: vector(1),
            roll: real(2),
        }),
        EntryKind::Light => SceneRecord::Light(LightRecord {
            position: vector(0),
        }),
        EntryKind::Plane => SceneRecord::Plane(PlaneRecord {
            center: vector(0),
            normal: vector(1),
            scale: real(2),
            reflect: real(3),
            surface: surface(4, 5),
        }),
        EntryKind::Sphere => SceneRecord::Sphere(SphereRecord {
            center: vector(0),
            radius: real(1),
            axis: vector(2),
            reflect: real(3),
            surface: surface(4, 5),
        }),
        EntryKind::Cylinder => SceneRecord::Cylinder(CylinderRecord {
            center: vector(0),
            direction: vector(1),
            radius: real(2),
            span: real(3),
            reflect: real(4),
            surface: surface(5, 6),
        }),
    }
}
