//! Forms set in TrueType faces loaded from a font directory.
//!
//! The fixtures are DejaVu Sans (see `tests/fixtures/fonts/LICENSE`), copied
//! under the file names a deployment's font directory uses.

use chrono::NaiveDate;
use cp72_pdf::{Assets, Composer, FormRecord, GoodsRow, Settings};
use std::path::{Path, PathBuf};

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/fonts");

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}

fn fixture(name: &str) -> Vec<u8> {
    std::fs::read(Path::new(FIXTURES).join(name)).expect("fixture font exists")
}

fn fonts_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cp72-fonts-{}-{test}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("NotoSans-Regular.ttf"), fixture("DejaVuSans.ttf")).unwrap();
    std::fs::write(dir.join("NotoSans-Bold.ttf"), fixture("DejaVuSans-Bold.ttf")).unwrap();
    dir
}

fn record(goods: usize) -> FormRecord {
    FormRecord {
        sender: "Bat-Erdene".to_string(),
        sender_address: "18 Example Street, Blacktown NSW 2148".to_string(),
        recipient: "Oyunaa".to_string(),
        recipient_address: "Ulaanbaatar 13380, Mongolia".to_string(),
        goods: (1..=goods)
            .map(|i| GoodsRow {
                index: i,
                description: format!("Parcel item {i}"),
                quantity: "1".to_string(),
                weight: "0.5".to_string(),
                origin: "AU".to_string(),
                value: "10".to_string(),
            })
            .collect(),
        ..FormRecord::default()
    }
}

fn generate(dir: &Path, record: &FormRecord) -> Vec<u8> {
    let settings = Settings {
        fonts_dir: Some(dir.to_path_buf()),
        logo_path: None,
        ..Settings::default()
    };
    let assets = Assets::load(&settings).expect("fixture fonts load");
    Composer::new(assets)
        .with_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        .generate(record, None)
        .expect("can generate form")
}

/// The hex string a content stream shows `text` with, in the given face
fn glyph_hex(font: &[u8], text: &str) -> String {
    let face = owned_ttf_parser::Face::parse(font, 0).expect("fixture parses");
    text.chars()
        .map(|ch| {
            let id = face.glyph_index(ch).expect("fixture covers the text");
            format!("{:04x}", id.0)
        })
        .collect()
}

#[test]
fn cyrillic_labels_are_drawn_with_embedded_glyphs() {
    let dir = fonts_dir("cyrillic");
    let pdf = generate(&dir, &record(15));

    assert!(contains(&pdf, "/Subtype /Type0"));
    assert!(contains(&pdf, "/Identity-H"));
    assert!(contains(&pdf, "/CIDFontType2"));
    assert!(contains(&pdf, "/ToUnicode"));
    assert!(contains(&pdf, "/FontFile2"));
    assert!(contains(&pdf, "/Count 2"));

    let label = glyph_hex(
        &fixture("DejaVuSans-Bold.ttf"),
        "Full Name / Овог нэр: Bat-Erdene",
    );
    assert!(contains(&pdf, &format!("<{label}> Tj")));
    // the WinAnsi fallback never kicks in
    assert!(!contains(&pdf, "(Full Name / ???? ???: Bat-Erdene) Tj"));

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn font_programs_are_compressed() {
    let dir = fonts_dir("compressed");
    let pdf = generate(&dir, &record(1));

    let regular = fixture("DejaVuSans.ttf").len();
    let bold = fixture("DejaVuSans-Bold.ttf").len();
    assert!(contains(&pdf, &format!("/Length1 {regular}")));
    assert!(contains(&pdf, &format!("/Length1 {bold}")));
    assert!(contains(&pdf, "/Filter /FlateDecode"));
    assert!(pdf.len() < regular + bold);

    std::fs::remove_dir_all(dir).ok();
}
