use crate::{
    refs::{ObjectReferences, RefType},
    DocumentError, Pt,
};
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use pdf_writer::{
    types::{FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use std::{collections::HashMap, path::Path};

/// File names looked up by [FontSet::load_dir]
pub const REGULAR_FONT_FILE: &str = "NotoSans-Regular.ttf";
pub const BOLD_FONT_FILE: &str = "NotoSans-Bold.ttf";

/// The two faces the CP72 template is set in
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FontWeight {
    Regular,
    Bold,
}

impl FontWeight {
    /// Index of the face within the document's font resources (`/F0`, `/F1`)
    pub fn index(self) -> usize {
        match self {
            FontWeight::Regular => 0,
            FontWeight::Bold => 1,
        }
    }
}

/// One of the 14 standard PDF fonts, used when no TrueType faces are configured.
/// These are never embedded; viewers supply them.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

impl BuiltinFont {
    fn base_font(self) -> &'static [u8] {
        match self {
            BuiltinFont::Helvetica => b"Helvetica",
            BuiltinFont::HelveticaBold => b"Helvetica-Bold",
        }
    }

    /// Advance widths in 1/1000 em for the printable ASCII range, from the Adobe AFM files
    fn widths(self) -> &'static [u16; 95] {
        match self {
            BuiltinFont::Helvetica => &HELVETICA_WIDTHS,
            BuiltinFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    fn advance(self, byte: u8) -> u16 {
        match byte {
            0x20..=0x7e => self.widths()[(byte - 0x20) as usize],
            _ => 556,
        }
    }
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Map a character onto WinAnsiEncoding. Latin-1 maps through directly; anything the
/// encoding can't express becomes `?`.
pub fn win_ansi_byte(ch: char) -> u8 {
    match ch as u32 {
        code @ 0x20..=0x7e => code as u8,
        code @ 0xa0..=0xff => code as u8,
        _ => b'?',
    }
}

pub enum FontFace {
    /// A TrueType / OpenType face, embedded in its entirety in the generated PDF
    Embedded(OwnedFace),
    Builtin(BuiltinFont),
}

/// A font that text can be set in. Embedded faces are written as Type0 / CID fonts
/// with a ToUnicode map so that the Mongolian labels stay searchable; builtin faces
/// are written as plain Type1 references.
pub struct Font {
    pub face: FontFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed or can't stand in for unsupported characters
    pub fn load(bytes: Vec<u8>) -> Result<Font, DocumentError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        let font = Font {
            face: FontFace::Embedded(face),
        };
        if font.glyph_id('?').is_none() {
            return Err(DocumentError::NoReplacementGlyph(
                font.name().unwrap_or_else(|| "<unnamed>".to_string()),
            ));
        }
        Ok(font)
    }

    pub fn builtin(font: BuiltinFont) -> Font {
        Font {
            face: FontFace::Builtin(font),
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.face, FontFace::Embedded(_))
    }

    /// Obtain the full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        match &self.face {
            FontFace::Embedded(face) => face
                .as_face_ref()
                .names()
                .into_iter()
                .find(|name| {
                    name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode()
                })
                .and_then(|name| name.to_string()),
            FontFace::Builtin(font) => Some(String::from_utf8_lossy(font.base_font()).into_owned()),
        }
    }

    fn family(&self) -> Option<String> {
        match &self.face {
            FontFace::Embedded(face) => face
                .as_face_ref()
                .names()
                .into_iter()
                .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
                .and_then(|name| name.to_string()),
            FontFace::Builtin(_) => Some("Helvetica".to_string()),
        }
    }

    /// Height of capital letters for the given font size, used to centre text vertically
    pub fn cap_height(&self, size: Pt) -> Pt {
        match &self.face {
            FontFace::Embedded(face) => {
                let face = face.as_face_ref();
                let cap = face
                    .capital_height()
                    .map(|h| h as f32)
                    .unwrap_or(face.ascender() as f32 * 0.7);
                size * (cap / face.units_per_em() as f32)
            }
            FontFace::Builtin(_) => size * 0.718,
        }
    }

    /// Calculate the width of a given string of text at the given font size.
    /// Characters missing from the font are measured as the glyph that replaces them.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        match &self.face {
            FontFace::Embedded(face) => {
                let face_ref = face.as_face_ref();
                let scaling = 1.0 / face_ref.units_per_em() as f32;
                text.chars()
                    .map(|ch| self.glyph_id_or_replacement(ch))
                    .map(|gid| {
                        size * (face_ref
                            .glyph_hor_advance(owned_ttf_parser::GlyphId(gid))
                            .unwrap_or_default() as f32
                            * scaling)
                    })
                    .sum()
            }
            FontFace::Builtin(font) => text
                .chars()
                .map(|ch| size * (font.advance(win_ansi_byte(ch)) as f32 / 1000.0))
                .sum(),
        }
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        match &self.face {
            FontFace::Embedded(face) => face.as_face_ref().glyph_index(ch).map(|i| i.0),
            FontFace::Builtin(_) => None,
        }
    }

    /// Glyph to draw for `ch`, falling back to U+FFFD and then `?`, which [Font::load]
    /// guarantees exists
    pub fn glyph_id_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or_default()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));
        match &self.face {
            FontFace::Builtin(builtin) => {
                writer
                    .type1_font(font_id)
                    .base_font(Name(builtin.base_font()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            FontFace::Embedded(face) => {
                let cid_font_id = self.write_cid(face, refs, font_index, writer);
                let to_unicode_id = self.write_to_unicode(face, refs, font_index, writer);

                let mut font = writer.type0_font(font_id);
                font.base_font(Name(format!("F{font_index}").as_bytes()));
                font.encoding_predefined(Name(b"Identity-H"));
                font.descendant_font(cid_font_id);
                font.to_unicode(to_unicode_id);
            }
        }
    }

    fn write_cid(
        &self,
        face: &OwnedFace,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_descriptor_id = self.write_descriptor(face, refs, font_index, writer);

        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(pdf_writer::types::CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let sizing = glyphs_sizing(face);
        let scaling = 1000.0 / face.as_face_ref().units_per_em() as f32;

        // the most common advance becomes the default width
        let mut widths_counts: HashMap<u16, usize> = HashMap::new();
        for &(width, _) in sizing.values() {
            *widths_counts.entry(width).or_insert(0) += 1;
        }
        let most_common_width = widths_counts
            .iter()
            .max_by_key(|&(&width, &count)| (count, width))
            .map(|(&width, _)| width as f32 * scaling)
            .unwrap_or(1000.0);

        let mut id_widths: Vec<(u16, f32)> = sizing
            .iter()
            .map(|(&cid, &(width, _))| (cid, width as f32 * scaling))
            .collect();
        id_widths.sort_by_key(|(id, _)| *id);

        let mut widths = cid_font.widths();
        widths.consecutive(0, [1000.0]);
        if let Some(&(first_cid, first_width)) = id_widths.first() {
            let mut start_cid: u16 = first_cid;
            let mut current_widths: Vec<f32> = vec![first_width];
            for (cid, width) in id_widths.into_iter().skip(1) {
                if (cid - start_cid) as usize > current_widths.len() {
                    // gap in the glyph ids; start a new run
                    widths.consecutive(start_cid, current_widths.clone());
                    start_cid = cid;
                    current_widths.clear();
                }
                current_widths.push(width);
            }
            widths.consecutive(start_cid, current_widths);
        }
        widths.finish();

        cid_font.default_width(most_common_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_descriptor(
        &self,
        face: &OwnedFace,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_id = refs.gen(RefType::FontData(font_index));
        // Length1 is the size of the program before compression
        let program = face.as_slice();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            program,
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        let mut font_file = writer.stream(font_data_id, compressed.as_slice());
        font_file.filter(pdf_writer::Filter::FlateDecode);
        font_file.pair(Name(b"Length1"), program.len() as i32);
        font_file.finish();

        let face_ref = face.as_face_ref();
        let sizing = glyphs_sizing(face);
        let max_width = sizing.values().map(|&(w, _)| w).max().unwrap_or_default();
        let max_height = sizing.values().map(|&(_, h)| h).max().unwrap_or_default();
        let sum_width: usize = sizing.values().map(|&(w, _)| w as usize).sum();
        let avg_width = sum_width as f32 / sizing.len().max(1) as f32;
        let scaling = 1000.0 / face_ref.units_per_em() as f32;

        let name = self.name().unwrap_or_else(|| format!("F{font_index}"));
        let family = self.family().unwrap_or_else(|| name.clone());

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.replace(' ', "").as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face_ref.weight().to_number());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face_ref.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face_ref.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        descriptor.bbox(pdf_writer::Rect {
            x1: 0.0,
            y1: face_ref.descender() as f32 * scaling,
            x2: max_width as f32 * scaling,
            y2: max_height as f32 * scaling,
        });
        descriptor.italic_angle(face_ref.italic_angle());
        descriptor.ascent(face_ref.ascender() as f32 * scaling);
        descriptor.descent(face_ref.descender() as f32 * scaling);
        descriptor.leading(face_ref.line_gap() as f32 * scaling);
        descriptor.cap_height(
            face_ref
                .capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(
            face_ref
                .x_height()
                .unwrap_or_else(|| face_ref.capital_height().unwrap_or_default())
                as f32
                * scaling,
        );
        // TODO: derive the stem width from the OS/2 weight class instead of a fixed guess
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);
        descriptor.font_file2(font_data_id);

        id
    }

    fn write_to_unicode(
        &self,
        face: &OwnedFace,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let mut ids: Vec<(u16, char)> = glyph_ids(face).into_iter().collect();
        ids.sort_by_key(|&(id, _)| id);

        // bfchar blocks hold at most 100 entries and share a common high byte
        let mut blocks: Vec<Vec<(u16, char)>> = Vec::new();
        let mut current: Vec<(u16, char)> = Vec::new();
        let mut high_byte: u8 = 0;
        for &(id, ch) in ids.iter() {
            if (id >> 8) as u8 != high_byte || current.len() >= 100 {
                if !current.is_empty() {
                    blocks.push(std::mem::take(&mut current));
                }
                high_byte = (id >> 8) as u8;
            }
            current.push((id, ch));
        }
        if !current.is_empty() {
            blocks.push(current);
        }

        for block in blocks.into_iter() {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (id, ch) in block.into_iter() {
                let mut utf16 = [0u16; 2];
                let units: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                map.push_str(&format!("<{id:04x}> <{units}>\n"));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(pdf_writer::Filter::FlateDecode);

        id
    }
}

/// Glyph id to character, over every unicode cmap subtable in the face
fn glyph_ids(face: &OwnedFace) -> HashMap<u16, char> {
    let mut map: HashMap<u16, char> = HashMap::new();
    let Some(cmap) = face.as_face_ref().tables().cmap else {
        return map;
    };

    for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
        subtable.codepoints(|codepoint: u32| {
            if let Ok(ch) = char::try_from(codepoint) {
                if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0) {
                    map.entry(index.0).or_insert(ch);
                }
            }
        });
    }

    map
}

/// Glyph id to (horizontal advance, height) in font units
fn glyphs_sizing(face: &OwnedFace) -> HashMap<u16, (u16, i16)> {
    let face_ref = face.as_face_ref();
    let mut sizing: HashMap<u16, (u16, i16)> = HashMap::new();
    for (id, _) in glyph_ids(face) {
        let gid = owned_ttf_parser::GlyphId(id);
        if let Some(h_advance) = face_ref.glyph_hor_advance(gid) {
            let height = face_ref
                .glyph_bounding_box(gid)
                .map(|bbox| bbox.y_max - bbox.y_min)
                .unwrap_or(1000);
            sizing.insert(id, (h_advance, height));
        }
    }
    sizing
}

/// The regular and bold faces a document is set in. Loaded once at startup and shared
/// read-only between generation calls.
pub struct FontSet {
    pub regular: Font,
    pub bold: Font,
}

impl FontSet {
    /// Standard Helvetica faces; nothing is embedded and non-Latin-1 characters
    /// are drawn as `?`
    pub fn builtin() -> FontSet {
        FontSet {
            regular: Font::builtin(BuiltinFont::Helvetica),
            bold: Font::builtin(BuiltinFont::HelveticaBold),
        }
    }

    /// Load NotoSans regular and bold from a directory
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<FontSet, DocumentError> {
        let dir = dir.as_ref();
        let load = |file: &str| -> Result<Font, DocumentError> {
            let path = dir.join(file);
            if !path.is_file() {
                return Err(DocumentError::MissingFontFile(path));
            }
            Font::load(std::fs::read(&path)?)
        };

        Ok(FontSet {
            regular: load(REGULAR_FONT_FILE)?,
            bold: load(BOLD_FONT_FILE)?,
        })
    }

    pub fn get(&self, weight: FontWeight) -> &Font {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }

    /// Fonts in resource order, paired with their index
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &Font)> + '_ {
        [FontWeight::Regular, FontWeight::Bold]
            .into_iter()
            .map(move |weight| (weight.index(), self.get(weight)))
    }
}
