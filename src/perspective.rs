//! Perspective strings: the compact, human-readable layout format.
//!
//! A perspective is `layout3|` followed by one record per pane and one
//! `dock_size(dir,layer,row)=size` record per dock, each terminated by `|`.
//! Pane records are `key=value` pairs separated by `;`. Literal `;`, `|` and
//! `\` inside names and captions are escaped with a backslash.

use crate::dock::Dock;
use crate::error::PerspectiveError;
use crate::pane::{DockDirection, Pane, PaneState};

pub const CURRENT_VERSION: &str = "layout3";
const PREVIOUS_VERSION: &str = "layout2";

/// Stand-ins for escaped delimiters while a record is split.
const ESCAPED_PIPE: char = '\u{7}';
const ESCAPED_SEMICOLON: char = '\u{8}';
const ESCAPED_BACKSLASH: char = '\u{6}';

pub fn escape_delimiters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, ';' | '|' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// A backslash before anything other than a delimiter or another backslash
/// is kept as written.
fn hide_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let hidden = match chars.peek() {
            Some('|') => ESCAPED_PIPE,
            Some(';') => ESCAPED_SEMICOLON,
            Some('\\') => ESCAPED_BACKSLASH,
            _ => {
                out.push(ch);
                continue;
            }
        };
        chars.next();
        out.push(hidden);
    }
    out
}

fn restore_escapes(text: &str) -> String {
    text.replace(ESCAPED_PIPE, "\\|")
        .replace(ESCAPED_SEMICOLON, "\\;")
        .replace(ESCAPED_BACKSLASH, "\\\\")
}

fn unescape(text: &str) -> String {
    text.replace(ESCAPED_PIPE, "|")
        .replace(ESCAPED_SEMICOLON, ";")
        .replace(ESCAPED_BACKSLASH, "\\")
}

/// Lenient integer parse: optional sign then leading digits, 0 when there
/// are none. Trailing garbage is ignored.
fn parse_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add((byte - b'0') as i64);
    }
    if negative { -value } else { value }
}

fn parse_i32(text: &str) -> i32 {
    parse_int(text).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Serializes one pane into a perspective record (without the trailing `|`).
pub fn save_pane_info<W>(pane: &Pane<W>) -> String {
    format!(
        "name={};caption={};state={};dir={};layer={};row={};pos={};prop={};\
         bestw={};besth={};minw={};minh={};maxw={};maxh={};\
         floatx={};floaty={};floatw={};floath={};floatw_cli={};floath_cli={}",
        escape_delimiters(&pane.name),
        escape_delimiters(&pane.caption),
        pane.state.bits(),
        pane.dock_direction.as_i32(),
        pane.dock_layer,
        pane.dock_row,
        pane.dock_pos,
        pane.dock_proportion,
        pane.best_size.width,
        pane.best_size.height,
        pane.min_size.width,
        pane.min_size.height,
        pane.max_size.width,
        pane.max_size.height,
        pane.floating_pos.x,
        pane.floating_pos.y,
        pane.floating_size.width,
        pane.floating_size.height,
        pane.floating_client_size.width,
        pane.floating_client_size.height,
    )
}

/// Parses a current-version pane record into `dest`.
pub fn load_pane_info<W: Clone>(text: &str, dest: &mut Pane<W>) -> Result<(), PerspectiveError> {
    load_pane_info_versioned(CURRENT_VERSION, text, dest)
}

/// Parses a pane record written by `version` into `dest`.
///
/// Keys are case-insensitive and absent keys leave their fields alone. An
/// unknown key fails the whole record and `dest` is not modified.
pub fn load_pane_info_versioned<W: Clone>(
    version: &str,
    text: &str,
    dest: &mut Pane<W>,
) -> Result<(), PerspectiveError> {
    let mut pane = dest.clone();
    let has_client_size = version == CURRENT_VERSION;
    let text = hide_escapes(text);
    let mut rest = text.as_str();

    loop {
        let (field, tail) = rest.split_once(';').unwrap_or((rest, ""));
        rest = tail;
        let (key, value) = field.split_once('=').unwrap_or((field, ""));
        let key = key.trim().to_lowercase();
        let value = value.trim();
        if key.is_empty() {
            break;
        }

        match key.as_str() {
            "name" => pane.name = value.to_string(),
            "caption" => pane.caption = value.to_string(),
            "state" => pane.state = PaneState::from_bits_retain(parse_int(value) as u32),
            "dir" => {
                pane.dock_direction =
                    DockDirection::from_i32(parse_i32(value)).unwrap_or(DockDirection::None)
            }
            "layer" => pane.dock_layer = parse_i32(value),
            "row" => pane.dock_row = parse_i32(value),
            "pos" => pane.dock_pos = parse_i32(value),
            "prop" => pane.dock_proportion = parse_i32(value),
            "bestw" => pane.best_size.width = parse_i32(value),
            "besth" => pane.best_size.height = parse_i32(value),
            "minw" => pane.min_size.width = parse_i32(value),
            "minh" => pane.min_size.height = parse_i32(value),
            "maxw" => pane.max_size.width = parse_i32(value),
            "maxh" => pane.max_size.height = parse_i32(value),
            "floatx" => pane.floating_pos.x = parse_i32(value),
            "floaty" => pane.floating_pos.y = parse_i32(value),
            "floatw" => pane.floating_size.width = parse_i32(value),
            "floath" => pane.floating_size.height = parse_i32(value),
            "floatw_cli" if has_client_size => {
                pane.floating_client_size.width = parse_i32(value)
            }
            "floath_cli" if has_client_size => {
                pane.floating_client_size.height = parse_i32(value)
            }
            _ => return Err(PerspectiveError::UnknownKey(key)),
        }
    }

    pane.name = unescape(&pane.name);
    pane.caption = unescape(&pane.caption);
    *dest = pane;
    Ok(())
}

fn save_dock_size(dock: &Dock) -> String {
    format!(
        "dock_size({},{},{})={}",
        dock.dock_direction.as_i32(),
        dock.dock_layer,
        dock.dock_row,
        dock.size
    )
}

/// Serializes every pane and dock.
pub fn save_perspective<W>(panes: &[Pane<W>], docks: &[Dock]) -> String {
    let mut out = String::from(CURRENT_VERSION);
    out.push('|');
    for pane in panes {
        out.push_str(&save_pane_info(pane));
        out.push('|');
    }
    for dock in docks {
        out.push_str(&save_dock_size(dock));
        out.push('|');
    }
    out
}

fn parse_dock_size(record: &str) -> Result<Dock, PerspectiveError> {
    let bad = || PerspectiveError::BadDockSize(record.to_string());
    let (key, value) = record.split_once('=').ok_or_else(bad)?;
    let inner = key
        .split_once('(')
        .and_then(|(_, tail)| tail.rsplit_once(')'))
        .map(|(inner, _)| inner)
        .ok_or_else(bad)?;

    let mut fields = inner.split(',').map(|field| field.trim().parse::<i32>());
    let mut next = || fields.next().and_then(Result::ok).ok_or_else(bad);
    let direction = next()?;
    let layer = next()?;
    let row = next()?;
    let size = value.trim().parse::<i32>().map_err(|_| bad())?;

    let mut dock = Dock::new(
        DockDirection::from_i32(direction).unwrap_or(DockDirection::None),
        layer,
        row,
    );
    dock.size = size;
    Ok(dock)
}

/// One entry of a perspective string.
#[derive(Debug, Clone, PartialEq)]
pub enum Record<W> {
    /// A pane record parsed onto a default pane.
    Pane(Pane<W>),
    DockSize(Dock),
}

/// Streams the records of a perspective string.
///
/// Construction validates the version header; iteration stops at the first
/// empty record. Records are yielded one at a time so callers can apply
/// them in order and stop at the first malformed one.
pub struct PerspectiveReader {
    version: String,
    records: std::vec::IntoIter<String>,
}

impl PerspectiveReader {
    pub fn new(text: &str) -> Result<Self, PerspectiveError> {
        let (version, body) = text.split_once('|').unwrap_or((text, ""));
        let version = version.trim().to_string();
        if version != CURRENT_VERSION && version != PREVIOUS_VERSION {
            return Err(PerspectiveError::UnsupportedVersion(version));
        }
        let body = hide_escapes(body);
        let records: Vec<String> = body
            .split('|')
            .map(|record| record.trim_end().to_string())
            .take_while(|record| !record.is_empty())
            .collect();
        Ok(Self {
            version,
            records: records.into_iter(),
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Typed view over the records.
    pub fn records<W: Clone>(self) -> impl Iterator<Item = Result<Record<W>, PerspectiveError>> {
        let version = self.version;
        self.records.map(move |record| {
            if record.starts_with("dock_size") {
                return parse_dock_size(&record).map(Record::DockSize);
            }
            let mut pane = Pane::default();
            load_pane_info_versioned(&version, &restore_escapes(&record), &mut pane)?;
            Ok(Record::Pane(pane))
        })
    }
}
