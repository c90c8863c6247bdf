//! INI configuration for FRU records
//!
//! The layout mirrors the blob: a `[common]` section with `version`, `size`
//! and one `<area> = 1` switch per area, followed by one section per area.
//!
//! ```ini
//! [common]
//! version = 1
//! size = 256
//! chassis = 1
//!
//! [chassis]
//! type = 17
//! serial = "SN-0001"
//! extra1 = "rack 4"
//! ```
//!
//! `common.size` and `common.version` are decimal. `board.date`,
//! `board.language`, `chassis.type` and `product.language` are hexadecimal.

use crate::error::ConfigError;
use crate::types::{AreaKind, Board, Chassis, InfoArea, Internal, Product, Record};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

type Section = BTreeMap<String, String>;

/// Parsed INI document; section and key names are lower-cased
#[derive(Debug, Default)]
struct Ini {
    sections: BTreeMap<String, Section>,
}

impl Ini {
    fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut ini = Ini::default();
        let mut current: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest.strip_suffix(']').ok_or_else(|| ConfigError::Syntax {
                    line: index + 1,
                    message: format!("unterminated section header {:?}", line),
                })?;
                let name = name.trim().to_ascii_lowercase();
                ini.sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            let split = line.find(['=', ':']).ok_or_else(|| ConfigError::Syntax {
                line: index + 1,
                message: format!("expected `key = value`, got {:?}", line),
            })?;
            let section = current.as_ref().ok_or_else(|| ConfigError::Syntax {
                line: index + 1,
                message: "key outside of any section".to_string(),
            })?;
            let key = line[..split].trim().to_ascii_lowercase();
            let value = unquote(line[split + 1..].trim()).to_string();
            if let Some(entries) = ini.sections.get_mut(section) {
                entries.insert(key, value);
            }
        }
        Ok(ini)
    }

    /// An area section only counts when `[common]` switches it on
    fn enabled(&self, name: &str) -> Option<&Section> {
        let switch = self.sections.get("common")?.get(name)?;
        if switch == "1" {
            self.sections.get(name)
        } else {
            None
        }
    }
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}

fn parse_number(section: &str, key: &str, value: &str, radix: u32) -> Result<u32, ConfigError> {
    let digits = if radix == 16 {
        value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value)
    } else {
        value
    };
    u32::from_str_radix(digits, radix).map_err(|_| ConfigError::InvalidNumber {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_byte(section: &str, key: &str, value: &str, radix: u32) -> Result<u8, ConfigError> {
    let n = parse_number(section, key, value, radix)?;
    u8::try_from(n).map_err(|_| ConfigError::InvalidNumber {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn missing(section: &str, key: &str) -> ConfigError {
    ConfigError::MissingKey {
        section: section.to_string(),
        key: key.to_string(),
    }
}

/// Copy the string entries of `section` into `area`, skipping `skip`
fn fill_fields<A: InfoArea>(
    area: &mut A,
    section: &Section,
    skip: &[&str],
) -> Result<(), ConfigError> {
    for (key, value) in section {
        if skip.contains(&key.as_str()) {
            continue;
        }
        area.set_field(key, Some(value.clone()))?;
    }
    Ok(())
}

/// Build a record from INI text
///
/// `base` is the directory `[internal] file = ...` paths are resolved
/// against.
pub fn parse_str(text: &str, base: &Path) -> Result<Record, ConfigError> {
    let ini = Ini::parse(text)?;
    let common = ini
        .sections
        .get("common")
        .ok_or_else(|| missing("common", ""))?;

    let version = common
        .get("version")
        .ok_or_else(|| missing("common", "version"))?;
    let size = common.get("size").ok_or_else(|| missing("common", "size"))?;

    let mut record = Record::default();
    record.common.version = parse_byte("common", "version", version, 10)?;
    record.common.size = Some(parse_number("common", "size", size, 10)?);

    if let Some(section) = ini.enabled(AreaKind::Internal.name()) {
        let data = if let Some(data) = section.get("data").filter(|d| !d.is_empty()) {
            data.as_bytes().to_vec()
        } else if let Some(file) = section.get("file") {
            let path = base.join(file);
            fs::read(&path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?
        } else {
            Vec::new()
        };
        if !data.is_empty() {
            record.internal = Some(Internal::new(data));
        }
    }

    if let Some(section) = ini.enabled(AreaKind::Chassis.name()) {
        let mut chassis = Chassis::default();
        if let Some(v) = section.get("type") {
            chassis.chassis_type = parse_byte("chassis", "type", v, 16)?;
        }
        fill_fields(&mut chassis, section, &["type"])?;
        record.chassis = Some(chassis);
    }

    if let Some(section) = ini.enabled(AreaKind::Board.name()) {
        let mut board = Board::default();
        if let Some(v) = section.get("language") {
            board.language = parse_byte("board", "language", v, 16)?;
        }
        if let Some(v) = section.get("date") {
            board.date = parse_number("board", "date", v, 16)?;
        }
        fill_fields(&mut board, section, &["language", "date"])?;
        record.board = Some(board);
    }

    if let Some(section) = ini.enabled(AreaKind::Product.name()) {
        let mut product = Product::default();
        if let Some(v) = section.get("language") {
            product.language = parse_byte("product", "language", v, 16)?;
        }
        fill_fields(&mut product, section, &["language"])?;
        record.product = Some(product);
    }

    if ini.enabled("multirecord").is_some() {
        debug!("[multirecord] is enabled but not supported, ignoring");
    }

    Ok(record)
}

/// Load a record from an INI file
pub fn load(path: &Path) -> Result<Record, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    parse_str(&text, base)
}

fn render_fields<A: InfoArea>(out: &mut String, area: &A) {
    for (name, value) in area.fields() {
        if let Some(value) = value {
            let _ = writeln!(out, "{} = \"{}\"", name, value);
        }
    }
}

/// Render a record as INI text that [`parse_str`] reads back
///
/// Internal data that is not UTF-8 cannot be expressed and is left out.
pub fn render(record: &Record) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[common]");
    let _ = writeln!(out, "version = {}", record.common.version);
    if let Some(size) = record.common.size {
        let _ = writeln!(out, "size = {}", size);
    }

    let internal = record
        .internal
        .as_ref()
        .and_then(|i| match std::str::from_utf8(&i.data) {
            Ok(text) => Some(text),
            Err(_) => {
                warn!("internal area data is not UTF-8, leaving it out");
                None
            }
        });
    let flags = [
        (AreaKind::Internal, internal.is_some()),
        (AreaKind::Chassis, record.chassis.is_some()),
        (AreaKind::Board, record.board.is_some()),
        (AreaKind::Product, record.product.is_some()),
    ];
    for (kind, present) in flags {
        if present {
            let _ = writeln!(out, "{} = 1", kind.name());
        }
    }

    if let Some(data) = internal {
        let _ = writeln!(out, "\n[internal]");
        let _ = writeln!(out, "data = \"{}\"", data);
    }
    if let Some(chassis) = &record.chassis {
        let _ = writeln!(out, "\n[chassis]");
        let _ = writeln!(out, "type = {:02x}", chassis.chassis_type);
        render_fields(&mut out, chassis);
    }
    if let Some(board) = &record.board {
        let _ = writeln!(out, "\n[board]");
        let _ = writeln!(out, "language = {:02x}", board.language);
        let _ = writeln!(out, "date = {:06x}", board.date);
        render_fields(&mut out, board);
    }
    if let Some(product) = &record.product {
        let _ = writeln!(out, "\n[product]");
        let _ = writeln!(out, "language = {:02x}", product.language);
        render_fields(&mut out, product);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Sample FRU description
[common]
version = 1
size = 256
internal = 0
chassis = 1
board = 1
product = 1

[chassis]
type = 17
part = "CP-1"
serial = "CS-1"
extra3 = "---"

[board]
language = 19
date = 0x123456
manufacturer = "Acme"
Product = "Widget"

[product]
language = 0
asset: A-42
"#;

    #[test]
    fn test_parse_sample() {
        let record = parse_str(SAMPLE, Path::new(".")).unwrap();
        assert_eq!(record.common.version, 1);
        assert_eq!(record.common.size, Some(256));
        assert!(record.internal.is_none());

        let chassis = record.chassis.unwrap();
        assert_eq!(chassis.chassis_type, 0x17);
        assert_eq!(chassis.part.as_deref(), Some("CP-1"));
        assert_eq!(chassis.extra, vec![None, None, Some("---".to_string())]);

        let board = record.board.unwrap();
        assert_eq!(board.language, 0x19);
        assert_eq!(board.date, 0x123456);
        assert_eq!(board.product.as_deref(), Some("Widget"));

        let product = record.product.unwrap();
        assert_eq!(product.asset.as_deref(), Some("A-42"));
    }

    #[test]
    fn test_disabled_sections_ignored() {
        let text = "[common]\nversion=1\nsize=64\n[chassis]\ntype=1\n";
        let record = parse_str(text, Path::new(".")).unwrap();
        assert!(record.chassis.is_none());
    }

    #[test]
    fn test_missing_common() {
        let err = parse_str("[chassis]\ntype = 1\n", Path::new(".")).unwrap_err();
        assert_eq!(err.to_string(), "[common] section missing in config");
    }

    #[test]
    fn test_missing_size() {
        let err = parse_str("[common]\nversion = 1\n", Path::new(".")).unwrap_err();
        assert_eq!(err.to_string(), "\"size\" missing in [common]");
    }

    #[test]
    fn test_invalid_number() {
        let text = "[common]\nversion = 1\nsize = big\n";
        assert!(matches!(
            parse_str(text, Path::new(".")),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_unknown_field() {
        let text = "[common]\nversion=1\nsize=64\nchassis=1\n[chassis]\ncolour = red\n";
        assert!(matches!(
            parse_str(text, Path::new(".")),
            Err(ConfigError::UnknownField(_))
        ));
    }

    #[test]
    fn test_syntax_error() {
        let text = "[common\nversion = 1\n";
        assert!(matches!(
            parse_str(text, Path::new(".")),
            Err(ConfigError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn test_internal_data() {
        let text = "[common]\nversion=1\nsize=64\ninternal=1\n[internal]\ndata = \"hello\"\n";
        let record = parse_str(text, Path::new(".")).unwrap();
        assert_eq!(record.internal.unwrap().data, b"hello");
    }

    #[test]
    fn test_internal_missing_file() {
        let text = "[common]\nversion=1\nsize=64\ninternal=1\n[internal]\nfile = does-not-exist.bin\n";
        let err = parse_str(text, Path::new("/nonexistent")).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.bin"));
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    fn unique_temp_dir() -> std::path::PathBuf {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("fru-config-{}-{}", std::process::id(), now));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn test_internal_file_next_to_config() {
        let dir = unique_temp_dir();
        fs::write(dir.join("internal.bin"), [0x00, 0x01, 0xFE, 0xFF]).expect("write data");
        let config = dir.join("fru.ini");
        fs::write(
            &config,
            "[common]\nversion=1\nsize=64\ninternal=1\n[internal]\nfile = internal.bin\n",
        )
        .expect("write config");

        let record = load(&config).unwrap();
        assert_eq!(record.internal.unwrap().data, vec![0x00, 0x01, 0xFE, 0xFF]);

        fs::remove_dir_all(&dir).expect("remove temp dir");
    }

    #[test]
    fn test_render_roundtrip() {
        let record = parse_str(SAMPLE, Path::new(".")).unwrap();
        let text = render(&record);
        let reparsed = parse_str(&text, Path::new(".")).unwrap();
        assert_eq!(reparsed, record);
    }
}
