//! CSV reader for the yearly raw exports (연도별 접수 내역)
//!
//! Exports saved from Korean spreadsheet software are usually CP949; newer
//! ones are UTF-8 with a BOM. Both are accepted.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use bora_domain::service::RawTable;
use encoding_rs::EUC_KR;
use tracing::warn;

use crate::source::{table_name, SourceLoadError};

const UTF8_BOM: &str = "\u{feff}";

/// Decode file bytes: UTF-8 when valid, otherwise CP949
pub fn decode_korean_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string(),
        Err(_) => {
            let (decoded, _, had_errors) = EUC_KR.decode(bytes);
            if had_errors {
                warn!("Some characters could not be decoded from CP949");
            }
            decoded.into_owned()
        }
    }
}

/// Parse CSV text into a raw table. Short rows are padded by lookups, long
/// rows keep their extra cells.
pub fn parse_table(name: &str, text: &str) -> Result<RawTable, SourceLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| SourceLoadError::Csv {
            path: name.to_string(),
            source,
        })?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(SourceLoadError::MissingHeader(name.to_string()));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| SourceLoadError::Csv {
            path: name.to_string(),
            source,
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable {
        name: name.to_string(),
        headers,
        rows,
    })
}

/// Load one raw CSV export
pub fn load_csv_table<P: AsRef<Path>>(path: P) -> Result<RawTable, SourceLoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let io_err = |source| SourceLoadError::Io {
        path: display.clone(),
        source,
    };

    let mut file = File::open(path).map_err(io_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(io_err)?;

    let name = table_name(path);
    parse_table(&name, &decode_korean_text(&bytes))
}
