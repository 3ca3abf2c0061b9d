//! Spreadsheet output: destination path resolution and `.xlsx` serialization.
//!
//! The workbook is a minimal OOXML package (one worksheet, inline strings),
//! built in memory with `zip` and moved into place with a rename.

use crate::domain::model::SanitizedEmployee;
use crate::utils::error::{EtlError, Result};
use chrono::{Local, NaiveDateTime};
use std::fs;
use std::io::{Cursor, ErrorKind, Write};
use std::path::{Path, PathBuf};
use zip::write::{SimpleFileOptions, ZipWriter};

pub const SHEET_NAME: &str = "Parsed Data";
pub const FILE_PREFIX: &str = "employees_";
pub const FILE_EXTENSION: &str = ".xlsx";
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// Creates the output directory (one level) if it does not exist yet.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    match fs::create_dir(dir) {
        Ok(()) => {
            tracing::info!("📁 Created output directory at: {}", dir.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(source) => Err(EtlError::OutputDirError {
            path: dir.display().to_string(),
            source,
        }),
    }
}

pub fn is_output_file_name(name: &str) -> bool {
    name.starts_with(FILE_PREFIX) && name.ends_with(FILE_EXTENSION)
}

/// Reuses an existing `employees_*.xlsx` in `dir`, otherwise mints a
/// timestamped name from `now`.
///
/// When several candidates exist the lexicographically smallest (oldest
/// timestamp) wins, so repeated runs keep targeting the same file.
pub fn resolve_output_path(dir: &Path, now: &NaiveDateTime) -> Result<PathBuf> {
    let resolve_error = |source: std::io::Error| EtlError::ResolvePathError {
        path: dir.display().to_string(),
        source,
    };

    let mut existing: Option<String> = None;
    for entry in fs::read_dir(dir).map_err(resolve_error)? {
        let entry = entry.map_err(resolve_error)?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if !is_output_file_name(&name) || !entry.file_type().map_err(resolve_error)?.is_file() {
            continue;
        }
        if existing.as_ref().map_or(true, |current| name < *current) {
            existing = Some(name);
        }
    }

    match existing {
        Some(name) => {
            tracing::debug!("Reusing existing output file {}", name);
            Ok(dir.join(name))
        }
        None => Ok(dir.join(format!(
            "{}{}{}",
            FILE_PREFIX,
            now.format(TIMESTAMP_FORMAT),
            FILE_EXTENSION
        ))),
    }
}

/// Writes `records` as the only worksheet of a fresh workbook at `path`,
/// replacing whatever was there.
pub fn write_workbook(path: &Path, records: &[SanitizedEmployee]) -> Result<()> {
    let write_error = |reason: String| EtlError::WriteError {
        path: path.display().to_string(),
        reason,
    };

    let data = build_workbook(records).map_err(|e| write_error(e.to_string()))?;
    tracing::debug!("Writing workbook ({} bytes) to {}", data.len(), path.display());

    // 先寫暫存檔再 rename，避免留下寫到一半的檔案
    let tmp_path = temp_path_for(path);
    if let Err(e) = fs::write(&tmp_path, &data).and_then(|_| fs::rename(&tmp_path, path)) {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            tracing::debug!("Could not remove {}: {}", tmp_path.display(), cleanup);
        }
        return Err(write_error(e.to_string()));
    }

    Ok(())
}

/// Ensure dir → resolve path → write, using the current local time for new names.
pub fn write(dir: &Path, records: &[SanitizedEmployee]) -> Result<PathBuf> {
    ensure_output_dir(dir)?;
    let path = resolve_output_path(dir, &Local::now().naive_local())?;
    write_workbook(&path, records)?;
    Ok(path)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", file_name))
}

fn build_workbook(records: &[SanitizedEmployee]) -> zip::result::ZipResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(ROOT_RELS_XML.as_bytes())?;

    zip.start_file("xl/workbook.xml", options)?;
    zip.write_all(workbook_xml().as_bytes())?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    zip.write_all(WORKBOOK_RELS_XML.as_bytes())?;

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    zip.write_all(sheet_xml(records).as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn workbook_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#
        ),
        escape_xml(SHEET_NAME)
    )
}

fn sheet_xml(records: &[SanitizedEmployee]) -> String {
    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#
    ));

    push_row(&mut xml, 1, &SanitizedEmployee::HEADERS);
    for (i, record) in records.iter().enumerate() {
        push_row(&mut xml, i + 2, &record.cells());
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn push_row(xml: &mut String, row: usize, cells: &[&str]) {
    xml.push_str(&format!(r#"<row r="{}">"#, row));
    for (col, value) in cells.iter().enumerate() {
        xml.push_str(&format!(
            r#"<c r="{}{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
            column_name(col),
            row,
            escape_xml(value)
        ));
    }
    xml.push_str("</row>");
}

/// Zero-based column index to spreadsheet letters: 0 → A, 26 → AA.
fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            // XML 1.0 不允許的控制字元直接略過
            '\t' | '\n' | '\r' => escaped.push(ch),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Read;
    use tempfile::TempDir;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn read_part(path: &Path, part: &str) -> String {
        let file = fs::File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut entry = archive.by_name(part).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        content
    }

    fn leanne() -> SanitizedEmployee {
        SanitizedEmployee {
            firstname: "Leanne".to_string(),
            lastname: "Graham".to_string(),
            email: "Sincere@april.biz".to_string(),
            city: "Gwenborough".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_file_name_is_zero_padded_timestamp() {
        let dir = TempDir::new().unwrap();
        let path = resolve_output_path(dir.path(), &at(2024, 3, 5, 9, 7, 3)).unwrap();

        assert_eq!(path, dir.path().join("employees_20240305090703.xlsx"));
    }

    #[test]
    fn test_existing_output_file_is_reused() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("employees_20240101000000.xlsx"), b"old").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();
        fs::write(dir.path().join("employees_backup.csv"), b"ignore me").unwrap();

        let path = resolve_output_path(dir.path(), &at(2025, 6, 1, 12, 0, 0)).unwrap();

        assert_eq!(path, dir.path().join("employees_20240101000000.xlsx"));
    }

    #[test]
    fn test_oldest_candidate_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("employees_20240301000000.xlsx"), b"").unwrap();
        fs::write(dir.path().join("employees_20240101000000.xlsx"), b"").unwrap();
        fs::create_dir(dir.path().join("employees_00000000000000.xlsx")).unwrap();

        let path = resolve_output_path(dir.path(), &at(2025, 1, 1, 0, 0, 0)).unwrap();

        assert_eq!(path, dir.path().join("employees_20240101000000.xlsx"));
    }

    #[test]
    fn test_resolve_in_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let err = resolve_output_path(&dir.path().join("nope"), &at(2025, 1, 1, 0, 0, 0)).unwrap_err();

        assert!(matches!(err, EtlError::ResolvePathError { .. }));
    }

    #[test]
    fn test_ensure_output_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("data");

        ensure_output_dir(&out).unwrap();
        ensure_output_dir(&out).unwrap();
        assert!(out.is_dir());
    }

    #[test]
    fn test_ensure_output_dir_does_not_create_parents() {
        let dir = TempDir::new().unwrap();
        let err = ensure_output_dir(&dir.path().join("a").join("b")).unwrap_err();

        assert!(matches!(err, EtlError::OutputDirError { .. }));
    }

    #[test]
    fn test_workbook_has_single_named_sheet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("employees_20240101000000.xlsx");
        write_workbook(&path, &[leanne()]).unwrap();

        let workbook = read_part(&path, "xl/workbook.xml");
        assert!(workbook.contains(r#"<sheet name="Parsed Data" sheetId="1" r:id="rId1"/>"#));
        assert_eq!(workbook.matches("<sheet ").count(), 1);
    }

    #[test]
    fn test_sheet_rows_follow_field_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("employees_20240101000000.xlsx");
        write_workbook(&path, &[leanne()]).unwrap();

        let sheet = read_part(&path, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(
            r#"<c r="A1" t="inlineStr"><is><t xml:space="preserve">firstname</t></is></c>"#
        ));
        assert!(sheet.contains(
            r#"<c r="H1" t="inlineStr"><is><t xml:space="preserve">website</t></is></c>"#
        ));
        assert!(sheet.contains(
            r#"<c r="A2" t="inlineStr"><is><t xml:space="preserve">Leanne</t></is></c>"#
        ));
        assert!(sheet.contains(
            r#"<c r="E2" t="inlineStr"><is><t xml:space="preserve">Gwenborough</t></is></c>"#
        ));
        assert!(sheet.contains(
            r#"<c r="D2" t="inlineStr"><is><t xml:space="preserve"></t></is></c>"#
        ));
        assert_eq!(sheet.matches("<row ").count(), 2);
    }

    #[test]
    fn test_rewrite_replaces_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("employees_20240101000000.xlsx");
        let mut other = leanne();
        other.firstname = "Ervin".to_string();

        write_workbook(&path, &[leanne(), other]).unwrap();
        write_workbook(&path, &[leanne()]).unwrap();

        let sheet = read_part(&path, "xl/worksheets/sheet1.xml");
        assert_eq!(sheet.matches("<row ").count(), 2);
        assert!(!sheet.contains("Ervin"));
        assert!(!dir.path().join(".employees_20240101000000.xlsx.tmp").exists());
    }

    #[test]
    fn test_write_into_missing_dir_reports_write_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("employees_1.xlsx");

        let err = write_workbook(&path, &[leanne()]).unwrap_err();
        assert!(matches!(err, EtlError::WriteError { .. }));
    }

    #[test]
    fn test_write_creates_dir_and_reuses_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("data");

        let first = write(&out, &[leanne()]).unwrap();
        let second = write(&out, &[]).unwrap();

        assert_eq!(first, second);
        let name = first.file_name().unwrap().to_str().unwrap();
        assert!(is_output_file_name(name));
        assert_eq!(name.len(), "employees_".len() + 14 + ".xlsx".len());
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Tom & \"Jerry\" <x>"), "Tom &amp; &quot;Jerry&quot; &lt;x&gt;");
        assert_eq!(escape_xml("a\u{0007}b\tc"), "ab\tc");
    }

    #[test]
    fn test_column_name() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(7), "H");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }
}
