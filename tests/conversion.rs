//! End-to-end conversion tests over workbooks built in memory.
//!
//! Run with: cargo test --test conversion

use sheetgrid::render::{to_json, JsonFormat};
use sheetgrid::{read_matrix, read_matrix_from_bytes, read_matrix_with_options, Error, ReadOptions};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
</Types>"#;

const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

const SHARED_STRINGS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="2" uniqueCount="2">
  <si><t>Name</t></si>
  <si><t>Age</t></si>
</sst>"#;

const SHEET_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <dimension ref="A1:B2"/>
  <sheetData>
    <row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
    <row r="2"><c r="A2" t="inlineStr"><is><t>x</t></is></c><c r="B2"><v>30</v></c></row>
  </sheetData>
</worksheet>"#;

/// Build a workbook archive from (entry name, content) pairs, in order.
fn build_xlsx(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        for (name, content) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer
}

fn standard_xlsx() -> Vec<u8> {
    build_xlsx(&[
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("xl/workbook.xml", WORKBOOK_XML),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML),
        ("xl/sharedStrings.xml", SHARED_STRINGS_XML),
        ("xl/worksheets/sheet1.xml", SHEET_XML),
    ])
}

#[test]
fn test_shared_inline_and_literal_cells() {
    let matrix = read_matrix_from_bytes(&standard_xlsx()).unwrap();
    let json = to_json(&matrix, JsonFormat::Compact).unwrap();

    assert_eq!(json, r#"[["Name","Age"],["x","30"]]"#);
}

#[test]
fn test_missing_worksheet_is_an_error() {
    let data = build_xlsx(&[
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("xl/workbook.xml", WORKBOOK_XML),
        ("xl/sharedStrings.xml", SHARED_STRINGS_XML),
    ]);

    let err = read_matrix_from_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::WorksheetNotFound(_)), "{:?}", err);
}

#[test]
fn test_shared_reference_without_table() {
    let data = build_xlsx(&[("xl/worksheets/sheet1.xml", SHEET_XML)]);

    let matrix = read_matrix_from_bytes(&data).unwrap();
    assert_eq!(
        matrix.into_rows(),
        vec![vec!["".to_string(), "".to_string()], vec!["x".to_string(), "30".to_string()]]
    );
}

#[test]
fn test_sparse_and_empty_rows() {
    let sheet = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>
<row r="1"><c r="A1"><v>a</v></c><c r="C1"><v>c</v></c></row>
<row r="2"/>
<row r="3"><c r="B3" t="s"><v>5</v></c></row>
</sheetData></worksheet>"#;
    let shared = r#"<sst><si><t>0</t></si><si><t>1</t></si><si><t>2</t></si></sst>"#;
    let data = build_xlsx(&[
        ("xl/sharedStrings.xml", shared),
        ("xl/worksheets/sheet1.xml", sheet),
    ]);

    let json = to_json(&read_matrix_from_bytes(&data).unwrap(), JsonFormat::Compact).unwrap();
    assert_eq!(json, r#"[["a","","c"],[],["",""]]"#);
}

#[test]
fn test_first_listed_worksheet_wins() {
    let other = r#"<worksheet><sheetData><row><c r="A1"><v>second listed</v></c></row></sheetData></worksheet>"#;
    let data = build_xlsx(&[
        ("xl/worksheets/_rels/sheet3.xml.rels", "<Relationships/>"),
        ("xl/worksheets/sheet3.xml", other),
        ("xl/worksheets/sheet1.xml", SHEET_XML),
    ]);

    let matrix = read_matrix_from_bytes(&data).unwrap();
    assert_eq!(matrix.get(0, 0), Some("second listed"));
}

#[test]
fn test_unicode_is_written_verbatim() {
    let sheet = r#"<worksheet><sheetData><row><c r="A1" t="inlineStr"><is><t>Descrição – ração</t></is></c></row></sheetData></worksheet>"#;
    let data = build_xlsx(&[("xl/worksheets/sheet1.xml", sheet)]);

    let json = to_json(&read_matrix_from_bytes(&data).unwrap(), JsonFormat::Compact).unwrap();
    assert_eq!(json, r#"[["Descrição – ração"]]"#);
}

#[test]
fn test_malformed_worksheet() {
    let data = build_xlsx(&[(
        "xl/worksheets/sheet1.xml",
        "<worksheet><sheetData><row><c r=\"A1\"><v>1</v></row></sheetData></worksheet>",
    )]);

    let err = read_matrix_from_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::XmlParse(_)), "{:?}", err);
}

#[test]
fn test_malformed_shared_strings() {
    for shared in ["", "not xml at all", "<sst></sst><junk/>"] {
        let data = build_xlsx(&[
            ("xl/sharedStrings.xml", shared),
            ("xl/worksheets/sheet1.xml", SHEET_XML),
        ]);
        let err = read_matrix_from_bytes(&data).unwrap_err();
        assert!(matches!(err, Error::XmlParse(_)), "{:?}: {:?}", shared, err);
    }
}

#[test]
fn test_unbounded_column_too_wide() {
    let sheet = r#"<worksheet><sheetData><row><c r="ZZZZZZZZZZZZZZZZZZZZ1"><v>1</v></c></row></sheetData></worksheet>"#;
    let data = build_xlsx(&[("xl/worksheets/sheet1.xml", sheet)]);

    let options = ReadOptions::new().with_max_columns(None);
    let err = sheetgrid::XlsxReader::from_bytes(data)
        .unwrap()
        .with_options(options)
        .read_matrix()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)), "{:?}", err);
}

#[test]
fn test_conversion_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cadastro.xlsx");
    std::fs::write(&path, standard_xlsx()).unwrap();

    let first = sheetgrid::to_json(&path).unwrap();
    let second = sheetgrid::to_json(&path).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, r#"[["Name","Age"],["x","30"]]"#);
}

#[test]
fn test_file_can_be_removed_after_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("temp.xlsx");
    std::fs::write(&path, standard_xlsx()).unwrap();

    read_matrix(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    // a failed conversion releases the file as well
    std::fs::write(&path, build_xlsx(&[("xl/workbook.xml", WORKBOOK_XML)])).unwrap();
    assert!(read_matrix(&path).is_err());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_select_by_sheet_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("named.xlsx");
    std::fs::write(&path, standard_xlsx()).unwrap();

    let options = ReadOptions::new().with_sheet_name("Sheet1");
    let matrix = read_matrix_with_options(&path, &options).unwrap();
    assert_eq!(matrix.get(1, 1), Some("30"));

    let options = ReadOptions::new().with_sheet_index(3);
    let err = read_matrix_with_options(&path, &options).unwrap_err();
    assert!(matches!(err, Error::WorksheetNotFound(_)));
}

#[test]
fn test_not_a_zip_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planilha.xlsx");
    std::fs::write(&path, "Name,Age\nx,30\n").unwrap();

    let err = read_matrix(&path).unwrap_err();
    assert!(matches!(err, Error::ArchiveOpen(_)), "{:?}", err);
}

#[cfg(feature = "async")]
#[test]
fn test_read_matrix_async() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("async.xlsx");
    std::fs::write(&path, standard_xlsx()).unwrap();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let matrix = runtime
        .block_on(sheetgrid::read_matrix_async(&path, &ReadOptions::default()))
        .unwrap();
    assert_eq!(matrix.get(0, 1), Some("Age"));
}
