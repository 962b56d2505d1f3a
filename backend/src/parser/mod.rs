//! CSV reading with encoding and delimiter auto-detection.
//!
//! Produces a [`RawTable`]: the header row as supplied plus one typed
//! [`crate::models::RawRow`] per data record. Quoted fields may contain the
//! delimiter and line breaks; blank lines are skipped.

use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::RawTable;

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed table
    pub table: RawTable,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
}

const UTF8_BOM: char = '\u{feff}';

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    normalize_encoding_label(&chardet::detect(bytes).0)
}

/// Map a charset name reported by chardet onto the label used for decoding.
fn normalize_encoding_label(charset: &str) -> String {
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to string using the specified encoding.
///
/// A leading byte-order mark is dropped so it does not end up in the first
/// header name. Bytes that are malformed in `encoding`, or a label no
/// decoder knows, are reported as [`CsvError::Encoding`].
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let decoder = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => encoding_rs::UTF_8,
        // windows-1252 agrees with ISO-8859-1 on every printable byte
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::WINDOWS_1252,
        other => encoding_rs::Encoding::for_label(other.as_bytes())
            .ok_or_else(|| CsvError::Encoding(format!("unsupported encoding '{other}'")))?,
    };

    let (decoded, used, had_errors) = decoder.decode(bytes);
    if had_errors {
        return Err(CsvError::Encoding(format!(
            "content is not valid {}",
            used.name()
        )));
    }

    Ok(match decoded.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_string(),
        None => decoded.into_owned(),
    })
}

/// Human-readable delimiter, `TAB` for a tab.
pub fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Falls back to `,` when no candidate appears.
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

/// Parse CSV from a reader into a raw table.
pub fn parse_csv<R: Read>(reader: R, delimiter: char) -> CsvResult<RawTable> {
    let delimiter = u8::try_from(delimiter)
        .map_err(|_| CsvError::Parse {
            line: 0,
            message: format!("delimiter {delimiter:?} is not a single byte"),
        })?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        records.push(record.iter().map(String::from).collect::<Vec<String>>());
    }

    Ok(RawTable::from_records(headers, records))
}

/// Parse CSV text with an explicit delimiter.
pub fn parse_str(content: &str, delimiter: char) -> CsvResult<RawTable> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }
    parse_csv(content.as_bytes(), delimiter)
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    parse_bytes_with(bytes, None)
}

/// Parse CSV bytes, auto-detecting the encoding and, unless given, the delimiter.
pub fn parse_bytes_with(bytes: &[u8], delimiter: Option<char>) -> CsvResult<ParseResult> {
    if bytes.is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));
    let table = parse_str(&content, delimiter)?;

    Ok(ParseResult {
        table,
        encoding,
        delimiter,
    })
}

/// Parse CSV file with auto-detection of encoding and delimiter.
///
/// # Example
/// ```ignore
/// let result = parse_csv_file_auto("/path/to/questions.csv")?;
/// println!("Encoding: {}, Delimiter: '{}'", result.encoding, result.delimiter);
/// println!("Rows: {}", result.table.len());
/// ```
pub fn parse_csv_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    parse_csv_file_with(path, None)
}

/// Parse a CSV file, optionally forcing the delimiter.
pub fn parse_csv_file_with<P: AsRef<Path>>(
    path: P,
    delimiter: Option<char>,
) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_with(&bytes, delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Question,answer choice A,answer choice B,answer choice C,answer choice D,Correct Answer";

    const QUIZ: &str = "Question,answer choice A,answer choice B,answer choice C,\
                        answer choice D,Correct Answer\n\
                        1. Capital of Germany?,Paris,London,Berlin,Rome,Berlin\n\
                        2. Largest planet?,Mars,Jupiter,Venus,Earth,Jupiter\n";

    #[test]
    fn test_simple_csv() {
        let table = parse_str(QUIZ, ',').unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.headers()[0], "Question");
        let row = &table.rows()[1];
        assert_eq!(row.number, 2);
        assert_eq!(row.question.as_deref(), Some("2. Largest planet?"));
        assert_eq!(row.correct_answer.as_deref(), Some("Jupiter"));
    }

    #[test]
    fn test_quoted_values_keep_commas() {
        let csv = format!(
            "{HEADER}\n\"Which, if any, is prime?\",4,6,\"7, obviously\",9,\"7, obviously\"\n"
        );
        let table = parse_str(&csv, ',').unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.question.as_deref(), Some("Which, if any, is prime?"));
        assert_eq!(row.choice_c.as_deref(), Some("7, obviously"));
    }

    #[test]
    fn test_headers_kept_as_supplied() {
        let csv = " Question ,ANSWER CHOICE A\nQ,a\n";
        let table = parse_str(csv, ',').unwrap();
        assert_eq!(
            table.headers(),
            &[" Question ".to_string(), "ANSWER CHOICE A".to_string()]
        );
        assert_eq!(table.rows()[0].question.as_deref(), Some("Q"));
        assert_eq!(table.rows()[0].choice_a.as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_lines_skipped() {
        let csv = "Question,Correct Answer\nA,1\n\nB,2\n";
        let table = parse_str(csv, ',').unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].number, 2);
    }

    #[test]
    fn test_short_rows_allowed() {
        let csv = "Question,answer choice A,Correct Answer\nQ\n";
        let table = parse_str(csv, ',').unwrap();
        assert_eq!(table.rows()[0].choice_a, None);
        assert_eq!(table.rows()[0].correct_answer, None);
    }

    #[test]
    fn test_empty_csv_error() {
        assert!(matches!(parse_str("", ','), Err(CsvError::EmptyFile)));
        assert!(matches!(parse_bytes_auto(b""), Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_blank_header_error() {
        assert!(matches!(parse_str(",,\n1,2,3\n", ','), Err(CsvError::NoHeaders)));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), '|');
        assert_eq!(detect_delimiter("Question\nQ"), ',');
    }

    #[test]
    fn test_auto_parse() {
        let result = parse_bytes_auto(QUIZ.as_bytes()).unwrap();
        assert_eq!(result.delimiter, ',');
        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.table.len(), 2);
    }

    #[test]
    fn test_auto_parse_semicolon() {
        let csv = QUIZ.replace(',', ";");
        let result = parse_bytes_auto(csv.as_bytes()).unwrap();
        assert_eq!(result.delimiter, ';');
        assert_eq!(result.table.rows()[0].choice_c.as_deref(), Some("Berlin"));
    }

    #[test]
    fn test_explicit_delimiter_overrides_detection() {
        let result = parse_bytes_with(b"Question;x,y\nQ;1,2\n", Some(';')).unwrap();
        assert_eq!(result.delimiter, ';');
        assert_eq!(result.table.headers().len(), 2);
    }

    #[test]
    fn test_bom_stripped_from_first_header() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(QUIZ.as_bytes());
        let result = parse_bytes_auto(&bytes).unwrap();
        assert_eq!(result.table.headers()[0], "Question");
        assert!(result.table.rows()[0].question.is_some());
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_latin1_fraction_and_currency_signs() {
        // 0xBD and 0xA4 are where ISO-8859-15 differs from Latin-1
        let bytes: &[u8] = &[0xBD, 0x20, 0x63, 0x75, 0x70, 0x20, 0xA4];
        assert_eq!(decode_content(bytes, "iso-8859-1").unwrap(), "½ cup ¤");
        assert_eq!(decode_content(bytes, "latin1").unwrap(), "½ cup ¤");
        assert_eq!(decode_content(bytes, "iso-8859-15").unwrap(), "œ cup €");
    }

    #[test]
    fn test_latin1_quiz_cells() {
        let mut bytes = format!("{HEADER}\nHow much flour?,").into_bytes();
        bytes.extend_from_slice(&[0xBD, b' ', b'c', b'u', b'p']);
        bytes.extend_from_slice(b",1 cup,2 cups,3 cups,1 cup\n");

        let content = decode_content(&bytes, "iso-8859-1").unwrap();
        let table = parse_str(&content, ',').unwrap();
        assert_eq!(table.rows()[0].choice_a.as_deref(), Some("½ cup"));
    }

    #[test]
    fn test_encoding_labels_stay_distinct() {
        assert_eq!(normalize_encoding_label("ISO-8859-1"), "iso-8859-1");
        assert_eq!(normalize_encoding_label("ISO-8859-15"), "iso-8859-15");
        assert_eq!(normalize_encoding_label("ascii"), "utf-8");
        assert_eq!(normalize_encoding_label("UTF-8-SIG"), "utf-8");
    }

    #[test]
    fn test_decode_errors_reported() {
        let invalid_utf8: &[u8] = &[b'c', b'a', b'f', 0xE9];
        assert!(matches!(
            decode_content(invalid_utf8, "utf-8"),
            Err(CsvError::Encoding(_))
        ));
        assert!(matches!(
            decode_content(b"Question", "klingon"),
            Err(CsvError::Encoding(_))
        ));
    }

    #[test]
    fn test_format_delimiter() {
        assert_eq!(format_delimiter('\t'), "TAB");
        assert_eq!(format_delimiter(';'), ";");
    }

    #[test]
    fn test_file_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.csv");
        std::fs::write(&path, QUIZ).unwrap();

        let result = parse_csv_file_auto(&path).unwrap();
        assert_eq!(result.table.len(), 2);

        let missing = parse_csv_file_auto(dir.path().join("nope.csv"));
        assert!(matches!(missing, Err(CsvError::Io(_))));
    }
}
