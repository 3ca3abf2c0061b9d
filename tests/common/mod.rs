#![allow(dead_code)]

use clap::Parser;
use employee_export::CliConfig;
use regex::Regex;
use std::io::Read;
use std::path::{Path, PathBuf};

pub fn leanne() -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "name": "Leanne Graham",
        "username": "Bret",
        "email": "Sincere@april.biz",
        "address": {
            "street": "Kulas Light",
            "suite": "Apt. 556",
            "city": "Gwenborough",
            "zipcode": "92998-3874",
            "geo": {"lat": "-37.3159", "lng": "81.1496"}
        },
        "phone": "1-770-736-8031 x56442",
        "website": "hildegard.org",
        "company": {"name": "Romaguera-Crona"}
    })
}

pub fn cli_config(api_url: &str, output_dir: &Path, extra: &[&str]) -> CliConfig {
    let output_dir = output_dir.display().to_string();
    let mut argv = vec!["employee-export", "--api-url", api_url, "--output-dir", output_dir.as_str()];
    argv.extend_from_slice(extra);
    CliConfig::try_parse_from(argv).unwrap()
}

/// Returns every row of the single worksheet as plain cell strings.
pub fn read_sheet_rows(path: &Path) -> Vec<Vec<String>> {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();

    let mut sheet = String::new();
    archive
        .by_name("xl/worksheets/sheet1.xml")
        .unwrap()
        .read_to_string(&mut sheet)
        .unwrap();

    let cell = Regex::new(r#"<t xml:space="preserve">(.*?)</t>"#).unwrap();
    sheet
        .split("<row ")
        .skip(1)
        .map(|row| {
            cell.captures_iter(row)
                .map(|c| c[1].to_string())
                .collect()
        })
        .collect()
}

pub fn output_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(employee_export::core::writer::is_output_file_name)
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}
