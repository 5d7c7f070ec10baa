//! Turns laid-out page contents into a PDF content stream.

use crate::colour::Colour;
use crate::font::{win_ansi_byte, FontSet};
use crate::page::{PageContents, SpanFont, SpanLayout};
use std::io::Write;

/// Renders page contents to a PDF content stream, painting in order.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &FontSet,
) -> Result<Vec<u8>, std::io::Error> {
    if contents.is_empty() {
        return Ok(Vec::default());
    }

    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                render_text_spans(&mut content, spans, fonts)?;
            }
            PageContents::Image(image) => {
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    *image.position.width(),
                    *image.position.height(),
                    *image.position.x1,
                    *image.position.y1
                )?;
                write!(&mut content, "/I{} Do\n", image.image_id.index())?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Rect(layout) => {
                let r = &layout.rect;
                write!(&mut content, "q\n")?;
                match layout.line_width {
                    Some(line_width) => {
                        write_stroke_colour(&mut content, layout.colour)?;
                        write!(&mut content, "{} w\n", *line_width)?;
                        write!(
                            &mut content,
                            "{} {} {} {} re S\n",
                            *r.x1,
                            *r.y1,
                            *r.width(),
                            *r.height()
                        )?;
                    }
                    None => {
                        write_fill_colour(&mut content, layout.colour)?;
                        write!(
                            &mut content,
                            "{} {} {} {} re f\n",
                            *r.x1,
                            *r.y1,
                            *r.width(),
                            *r.height()
                        )?;
                    }
                }
                write!(&mut content, "Q\n")?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &FontSet,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;
    write!(
        content,
        "/F{} {} Tf\n",
        current_font.weight.index(),
        *current_font.size
    )?;
    write_fill_colour(content, current_colour)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.weight.index(),
                *current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_fill_colour(content, current_colour)?;
        }

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", *span.coords.0, *span.coords.1)?;
        let font = fonts.get(current_font.weight);
        if font.is_embedded() {
            write!(content, "<")?;
            for ch in span.text.chars() {
                write!(content, "{:04x}", font.glyph_id_or_replacement(ch))?;
            }
            write!(content, "> Tj\n")?;
        } else {
            write_literal_string(content, &span.text)?;
            write!(content, " Tj\n")?;
        }
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

/// Write `text` as a WinAnsi literal string, escaping delimiters and writing
/// non-ASCII bytes as octal so the stream stays 7-bit clean
fn write_literal_string(content: &mut Vec<u8>, text: &str) -> Result<(), std::io::Error> {
    content.push(b'(');
    for byte in text.chars().map(win_ansi_byte) {
        match byte {
            b'(' | b')' | b'\\' => content.extend_from_slice(&[b'\\', byte]),
            0x20..=0x7e => content.push(byte),
            _ => write!(content, "\\{byte:03o}")?,
        }
    }
    content.push(b')');
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_fill_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[allow(clippy::write_with_newline)]
fn write_stroke_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} RG\n"),
        Colour::Grey { g } => write!(content, "{g} G\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;
    use crate::font::FontWeight;
    use crate::page::RectLayout;
    use crate::rect::Rect;
    use crate::units::Pt;

    fn span(text: &str) -> SpanLayout {
        SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                weight: FontWeight::Regular,
                size: Pt(9.0),
            },
            colour: colours::BLACK,
            coords: (Pt(10.0), Pt(20.0)),
        }
    }

    #[test]
    fn builtin_text_is_escaped() {
        let fonts = FontSet::builtin();
        let rendered =
            render_contents(&[PageContents::Text(vec![span("a (b) × c")])], &fonts).unwrap();
        let rendered = String::from_utf8(rendered).unwrap();
        assert!(rendered.contains("/F0 9 Tf"));
        assert!(rendered.contains("10 20 Td"));
        assert!(rendered.contains(r"(a \(b\) \327 c) Tj"));
    }

    #[test]
    fn strokes_and_fills_use_their_own_operators() {
        let fonts = FontSet::builtin();
        let rect = Rect::from_origin_size(Pt(1.0), Pt(2.0), Pt(3.0), Pt(4.0));
        let rendered = render_contents(
            &[
                PageContents::Rect(RectLayout {
                    rect,
                    colour: colours::BANNER,
                    line_width: None,
                }),
                PageContents::Rect(RectLayout {
                    rect,
                    colour: colours::BLACK,
                    line_width: Some(Pt(0.6)),
                }),
            ],
            &fonts,
        )
        .unwrap();
        let rendered = String::from_utf8(rendered).unwrap();
        assert!(rendered.contains("0.1 0.31 0.36 rg\n1 2 3 4 re f"));
        assert!(rendered.contains("0 G\n0.6 w\n1 2 3 4 re S"));
    }
}
