//! Marketing CSV reader with encoding and delimiter auto-detection.
//!
//! Reads the whole file into memory, checks the header row against
//! [`INPUT_COLUMNS`] and deserializes every row into a [`MarketingRecord`].

use std::fmt;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::{MarketingRecord, INPUT_COLUMNS};

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed records, in file order
    pub records: Vec<MarketingRecord>,
    /// 1-based file line of each record, for error messages
    pub lines: Vec<u64>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
    /// Column headers as found in the file
    pub headers: Vec<String>,
}

/// What `inspect` found in an input file
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub encoding: String,
    pub delimiter: char,
    /// True when the delimiter came from detection rather than the caller
    pub delimiter_detected: bool,
    pub headers: Vec<String>,
    /// Expected columns the header lacks, in canonical order
    pub missing: Vec<String>,
    /// Data rows, only counted when no column is missing
    pub row_count: Option<usize>,
}

impl Inspection {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Encoding: {}", self.encoding)?;
        writeln!(
            f,
            "Delimiter: '{}'{}",
            format_delimiter(self.delimiter),
            if self.delimiter_detected { " (auto-detected)" } else { "" }
        )?;
        writeln!(f, "Columns: {}", self.headers.join(", "))?;
        if self.missing.is_empty() {
            writeln!(f, "✅ All {} expected columns present", INPUT_COLUMNS.len())?;
        } else {
            writeln!(f, "❌ Missing columns: {}", self.missing.join(", "))?;
        }
        if let Some(rows) = self.row_count {
            writeln!(f, "Rows: {}", rows)?;
        }
        Ok(())
    }
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "utf-8-sig" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let content = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8(bytes.to_vec())
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned()),
        // windows-1252 agrees with ISO-8859-1 on every printable byte
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        label => encoding_rs::Encoding::for_label(label.as_bytes())
            .map(|enc| enc.decode(bytes).0.into_owned())
            .ok_or_else(|| CsvError::EncodingError(format!("unsupported charset '{}'", label)))?,
    };

    // Strip a UTF-8 byte order mark so the first header matches
    Ok(content
        .strip_prefix('\u{feff}')
        .map(str::to_string)
        .unwrap_or(content))
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Expected columns absent from `headers`, in canonical order.
pub fn missing_columns(headers: &[String]) -> Vec<String> {
    INPUT_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h.as_str() == **col))
        .map(|col| col.to_string())
        .collect()
}

/// Format delimiter for display
pub fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

/// Inspect a CSV file without failing on missing columns.
pub fn inspect_file<P: AsRef<Path>>(path: P, delimiter: Option<char>) -> CsvResult<Inspection> {
    let bytes = std::fs::read(path.as_ref())?;
    inspect_bytes(&bytes, delimiter)
}

/// Detect encoding and delimiter, read the header and report missing
/// columns. Rows are parsed only when the header is complete, so a parse
/// error still fails the inspection.
pub fn inspect_bytes(bytes: &[u8], delimiter: Option<char>) -> CsvResult<Inspection> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(CsvError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter_detected = delimiter.is_none();
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));

    let mut reader = csv_reader(&content, delimiter)?;
    let headers = read_headers(&mut reader)?;
    let missing = missing_columns(&headers);

    let row_count = if missing.is_empty() {
        Some(parse_str(&content, delimiter, encoding.clone())?.records.len())
    } else {
        None
    };

    Ok(Inspection {
        encoding,
        delimiter,
        delimiter_detected,
        headers,
        missing,
        row_count,
    })
}

/// Parse a marketing CSV file with auto-detection of encoding and,
/// unless `delimiter` is given, the delimiter.
pub fn parse_file<P: AsRef<Path>>(path: P, delimiter: Option<char>) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes, delimiter)
}

/// Parse marketing CSV bytes with auto-detection.
pub fn parse_bytes(bytes: &[u8], delimiter: Option<char>) -> CsvResult<ParseResult> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(CsvError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));

    parse_str(&content, delimiter, encoding)
}

/// Parse decoded CSV content with an explicit delimiter.
///
/// Fails with [`CsvError::MissingColumns`] before reading any row if the
/// header lacks an expected column. Extra columns are ignored.
pub fn parse_str(content: &str, delimiter: char, encoding: String) -> CsvResult<ParseResult> {
    let mut reader = csv_reader(content, delimiter)?;
    let headers = read_headers(&mut reader)?;
    let header_record = csv::StringRecord::from(headers.clone());

    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        return Err(CsvError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    let mut lines = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        // +1 for 1-based lines, +1 for header
        let fallback_line = row_idx as u64 + 2;
        let row = result.map_err(|e| to_parse_error(&e, fallback_line))?;
        let line = row.position().map(|p| p.line()).unwrap_or(fallback_line);

        let record: MarketingRecord = row
            .deserialize(Some(&header_record))
            .map_err(|e| to_parse_error(&e, line))?;
        records.push(record);
        lines.push(line);
    }

    Ok(ParseResult {
        records,
        lines,
        encoding,
        delimiter,
        headers,
    })
}

fn csv_reader(content: &str, delimiter: char) -> CsvResult<csv::Reader<&[u8]>> {
    let delimiter_byte = u8::try_from(delimiter).map_err(|_| CsvError::ParseError {
        line: 1,
        message: format!("Delimiter '{}' is not a single-byte character", delimiter),
    })?;

    Ok(csv::ReaderBuilder::new()
        .delimiter(delimiter_byte)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes()))
}

fn read_headers(reader: &mut csv::Reader<&[u8]>) -> CsvResult<Vec<String>> {
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| to_parse_error(&e, 1))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(CsvError::NoHeaders);
    }
    Ok(headers)
}

fn to_parse_error(err: &csv::Error, fallback_line: u64) -> CsvError {
    let line = err
        .position()
        .map(|p| p.line())
        .unwrap_or(fallback_line);
    let message = match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => err.to_string(),
    };
    CsvError::ParseError { line, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "client_id,age,job,marital,education,credit_default,mortgage,month,day,contact_duration,number_contacts,previous_campaign_contacts,previous_outcome,campaign_outcome,cons_price_idx,euribor_three_months";

    fn sample() -> String {
        format!(
            "{}\n0,56,housemaid,married,basic.4y,no,no,may,13,261,1,0,nonexistent,no,93.994,4.857\n1,57,services,married,high.school,unknown,no,may,19,149,1,0,nonexistent,no,93.994,4.857\n",
            HEADER
        )
    }

    #[test]
    fn test_simple_csv() {
        let result = parse_str(&sample(), ',', "utf-8".into()).unwrap();

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].client_id, 0);
        assert_eq!(result.records[0].education, "basic.4y");
        assert_eq!(result.records[1].credit_default, "unknown");
        assert_eq!(result.records[1].day, "19");
        assert_eq!(result.lines, vec![2, 3]);
    }

    #[test]
    fn test_missing_columns_reported_in_order() {
        let csv = "client_id,age,job\n1,30,admin.";
        let err = parse_str(csv, ',', "utf-8".into()).unwrap_err();
        match err {
            CsvError::MissingColumns(cols) => {
                assert_eq!(cols.first().map(String::as_str), Some("marital"));
                assert!(cols.contains(&"euribor_three_months".to_string()));
                assert!(!cols.contains(&"job".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_renamed_column_is_missing() {
        let csv = sample().replacen("mortgage", "housing", 1);
        let err = parse_str(&csv, ',', "utf-8".into()).unwrap_err();
        assert!(matches!(err, CsvError::MissingColumns(ref c) if c == &vec!["mortgage".to_string()]));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let csv = sample()
            .replacen(HEADER, &format!("{},extra", HEADER), 1)
            .replace("4.857\n", "4.857,x\n");
        let result = parse_str(&csv, ',', "utf-8".into()).unwrap();
        assert_eq!(result.records.len(), 2);
    }

    #[test]
    fn test_bad_number_names_line() {
        let csv = sample().replacen("0,56,", "0,fifty,", 1);
        let err = parse_str(&csv, ',', "utf-8".into()).unwrap_err();
        match err {
            CsvError::ParseError { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_values_are_trimmed() {
        let csv = sample().replacen("housemaid", " housemaid ", 1);
        let result = parse_str(&csv, ',', "utf-8".into()).unwrap();
        assert_eq!(result.records[0].job, "housemaid");
    }

    #[test]
    fn test_empty_file_error() {
        assert!(matches!(parse_bytes(b"", None), Err(CsvError::EmptyFile)));
        assert!(matches!(parse_bytes(b"  \n", None), Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_detect_delimiter_comma() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
    }

    #[test]
    fn test_auto_parse_semicolon() {
        let csv = sample().replace(',', ";");
        let result = parse_bytes(csv.as_bytes(), None).unwrap();

        assert_eq!(result.delimiter, ';');
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.headers.len(), INPUT_COLUMNS.len());
    }

    #[test]
    fn test_bom_is_stripped() {
        let csv = format!("\u{feff}{}", sample());
        let result = parse_bytes(csv.as_bytes(), Some(',')).unwrap();
        assert_eq!(result.headers[0], "client_id");
    }

    #[test]
    fn test_unsupported_charset() {
        let err = decode_content(b"abc", "not-a-charset").unwrap_err();
        assert!(matches!(err, CsvError::EncodingError(_)));
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert!(decoded.starts_with("Soci"));
        assert!(decoded.ends_with('é'));
    }

    #[test]
    fn test_latin1_currency_sign() {
        // 0xA4 is '¤' in ISO-8859-1 but '€' in ISO-8859-15
        let decoded = decode_content(&[0x61, 0xA4], "iso-8859-1").unwrap();
        assert_eq!(decoded, "a¤");
    }

    #[test]
    fn test_format_delimiter() {
        assert_eq!(format_delimiter('\t'), "\\t");
        assert_eq!(format_delimiter(';'), ";");
    }

    #[test]
    fn test_inspect_complete_file() {
        let inspection = inspect_bytes(sample().as_bytes(), None).unwrap();

        assert!(inspection.is_complete());
        assert_eq!(inspection.encoding, "utf-8");
        assert_eq!(inspection.delimiter, ',');
        assert!(inspection.delimiter_detected);
        assert_eq!(inspection.headers.len(), INPUT_COLUMNS.len());
        assert_eq!(inspection.row_count, Some(2));

        let text = inspection.to_string();
        assert!(text.contains("Delimiter: ',' (auto-detected)"));
        assert!(text.contains("✅ All 16 expected columns present"));
        assert!(text.contains("Rows: 2"));
        assert!(!text.contains("Missing"));
    }

    #[test]
    fn test_inspect_reports_missing_columns() {
        let inspection = inspect_bytes(b"client_id;age;job\n1;30;admin.\n", None).unwrap();

        assert!(!inspection.is_complete());
        assert_eq!(inspection.delimiter, ';');
        assert_eq!(inspection.headers, vec!["client_id", "age", "job"]);
        assert_eq!(inspection.missing.len(), INPUT_COLUMNS.len() - 3);
        assert_eq!(inspection.missing[0], "marital");
        assert_eq!(inspection.row_count, None);

        let text = inspection.to_string();
        assert!(text.contains("Encoding: utf-8"));
        assert!(text.contains("Columns: client_id, age, job"));
        assert!(text.contains("❌ Missing columns: marital, education,"));
        assert!(!text.contains("expected columns present"));
        assert!(!text.contains("Rows:"));
    }

    #[test]
    fn test_inspect_explicit_delimiter() {
        let inspection = inspect_bytes(sample().as_bytes(), Some(',')).unwrap();
        assert!(!inspection.delimiter_detected);
        assert!(inspection.to_string().contains("Delimiter: ','\n"));
    }
}
