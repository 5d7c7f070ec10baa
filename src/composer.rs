//! Lays a [FormRecord] out as the CP72 form.
//!
//! The form is drawn top to bottom in a fixed order of sections:
//!
//! 1. title block and logo
//! 2. sender details
//! 3. recipient details
//! 4. goods table, continued on a second page if it has more rows than fit on the
//!    first
//! 5. weights and measurements
//! 6. delivery option
//! 7. signature and date
//!
//! Nothing is ever moved once drawn. Only the logo and the signature are optional:
//! if either fails to draw it is logged and left out. Any other drawing failure
//! fails the whole form.

use chrono::NaiveDate;

use crate::assets::Assets;
use crate::config::Template;
use crate::cursor::{section_header, Cursor, LEFT_MARGIN};
use crate::font::FontWeight;
use crate::goods::GoodsPages;
use crate::image::Image;
use crate::info::Info;
use crate::layout::wrap_text;
use crate::pagesize::{self, PageSize};
use crate::record::FormRecord;
use crate::signature::SignatureAsset;
use crate::surface::{PdfSurface, Surface, TableStyle};
use crate::units::*;
use crate::DocumentError;

const PAGE_SIZE: PageSize = pagesize::A4;

const LOGO_X: Mm = Mm(155.0);
const LOGO_Y: Mm = Mm(273.0);
const LOGO_WIDTH: Mm = Mm(48.0);
const LOGO_HEIGHT: Mm = Mm(18.0);

const TITLE_Y: Mm = Mm(277.0);
const SUBTITLE_Y: Mm = Mm(270.0);
const FIRST_PAGE_TOP: Mm = Mm(257.0);
const CONTINUED_PAGE_TOP: Mm = Mm(262.0);

const LINE_PITCH: Mm = Mm(4.0);
const ADDRESS_INDENT: Mm = Mm(25.0);
const BLOCK_GAP: Mm = Mm(6.0);
const TABLE_GAP: Mm = Mm(10.0);
const BODY_SIZE: Pt = Pt(10.0);

const FOOTER_X: Mm = Mm(195.0);
const FOOTER_Y: Mm = Mm(10.0);
const FOOTER_SIZE: Pt = Pt(9.0);

const SIGNATURE_X: Mm = Mm(65.0);
const SIGNATURE_DROP: Mm = Mm(8.0);
const SIGNATURE_WIDTH: Mm = Mm(60.0);
const SIGNATURE_HEIGHT: Mm = Mm(20.0);
const DATE_X: Mm = Mm(120.0);

const GOODS_COLUMNS: [Mm; 6] = [
    Mm(10.0),
    Mm(60.0),
    Mm(15.0),
    Mm(20.0),
    Mm(25.0),
    Mm(25.0),
];

/// Numbers pages as they are started, and draws the number at the foot of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCounter {
    current: usize,
}

impl Default for PageCounter {
    fn default() -> Self {
        PageCounter { current: 1 }
    }
}

impl PageCounter {
    pub fn current(&self) -> usize {
        self.current
    }

    /// Move on to the next page, returning its number
    pub fn advance(&mut self) -> usize {
        self.current += 1;
        self.current
    }

    /// "Page n", right aligned at the bottom right of the page
    pub fn draw_footer<S: Surface>(&self, surface: &mut S) -> Result<(), DocumentError> {
        surface.set_font(FontWeight::Regular, FOOTER_SIZE);
        surface.draw_right_aligned_string(FOOTER_X, FOOTER_Y, &format!("Page {}", self.current))
    }
}

/// What [Composer::compose_pages] ended up drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Composition {
    pub pages: usize,
    pub first_page_rows: usize,
    pub overflow_rows: usize,
    pub logo_drawn: bool,
    pub signature_drawn: bool,
}

/// Run an optional drawing step, logging and swallowing its failure
fn best_effort(what: &str, result: Result<(), DocumentError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("leaving out the {what}: {e}");
            false
        }
    }
}

/// Draw lines of text down the page from the cursor, one [LINE_PITCH] apart
fn draw_lines<S, I>(
    surface: &mut S,
    x: Mm,
    mut cursor: Cursor,
    lines: I,
) -> Result<Cursor, DocumentError>
where
    S: Surface,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    for line in lines {
        surface.draw_string(x, cursor.y(), line.as_ref())?;
        cursor = cursor.down(LINE_PITCH);
    }
    Ok(cursor)
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Composes CP72 forms with a shared set of [Assets].
///
/// A composer is meant to live as long as the process. Unless a fixed date is set
/// with [Composer::with_date], each form is dated when it is composed.
#[derive(Clone)]
pub struct Composer {
    assets: Assets,
    template: Template,
    date: Option<NaiveDate>,
    clock: fn() -> NaiveDate,
}

impl Composer {
    /// A composer that dates forms with the local date at the time of composing
    pub fn new(assets: Assets) -> Composer {
        Composer {
            assets,
            template: Template::default(),
            date: None,
            clock: local_today,
        }
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    /// Date every form with `date`, both beside the signature and as the PDF
    /// creation date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Where today's date comes from when no fixed date is set
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    /// Draw the complete form onto `surface`, leaving the last page ended
    pub fn compose_pages<S: Surface>(
        &self,
        surface: &mut S,
        record: &FormRecord,
        signature: Option<SignatureAsset>,
    ) -> Result<Composition, DocumentError> {
        let date = self.date.unwrap_or_else(self.clock);

        let mut info = Info::new();
        info.title("CP72 Customs Declaration")
            .author("Mon Freight")
            .subject(format!("{} → {}", record.sender, record.recipient))
            .created(date);
        surface.set_info(info);

        let mut pages = PageCounter::default();
        surface.new_page(PAGE_SIZE)?;

        let logo_drawn = self.draw_title(surface)?;
        let mut cursor = Cursor(FIRST_PAGE_TOP);

        cursor = self.draw_sender(surface, cursor, record)?;
        cursor = self.draw_recipient(surface, cursor, record)?;

        let goods = GoodsPages::split(&record.goods, self.template.first_page_rows);
        log::debug!(
            "{} goods rows: {} on page 1, {} overflowing",
            record.goods.len(),
            goods.first.rows.len(),
            goods.overflow.as_ref().map_or(0, |t| t.rows.len())
        );
        if goods.first.is_placeholder() {
            log::debug!("no goods declared, drawing a placeholder row");
        }

        cursor = section_header(surface, cursor, "GOODS DESCRIPTION")?;
        cursor = self.draw_goods_table(surface, cursor, &goods.first.to_cells())?;
        pages.draw_footer(surface)?;

        if let Some(overflow) = &goods.overflow {
            surface.end_page()?;
            surface.new_page(PAGE_SIZE)?;
            let page = pages.advance();
            log::debug!("goods table continues on page {page}");

            surface.set_font(FontWeight::Bold, Pt(13.0));
            surface.draw_string(LEFT_MARGIN, TITLE_Y, "CP72 CUSTOMS DECLARATION FORM (Continued)")?;
            cursor = Cursor(CONTINUED_PAGE_TOP);

            cursor = self.draw_goods_table(surface, cursor, &overflow.to_cells())?;
            pages.draw_footer(surface)?;
        }

        cursor = self.draw_measurements(surface, cursor, record)?;

        cursor = section_header(surface, cursor, "DELIVERY OPTION")?;
        surface.draw_string(
            LEFT_MARGIN,
            cursor.y(),
            &format!("Selected Option: {}", record.delivery_option),
        )?;
        cursor = cursor.down(Mm(10.0));

        let signature_drawn = self.draw_signature(surface, cursor, signature, date)?;

        surface.end_page()?;

        Ok(Composition {
            pages: pages.current(),
            first_page_rows: goods.first.rows.len(),
            overflow_rows: goods.overflow.as_ref().map_or(0, |t| t.rows.len()),
            logo_drawn,
            signature_drawn,
        })
    }

    /// Draw the form onto `surface` and serialize it
    pub fn compose<S: Surface>(
        &self,
        mut surface: S,
        record: &FormRecord,
        signature: Option<SignatureAsset>,
    ) -> Result<Vec<u8>, DocumentError> {
        let composition = self.compose_pages(&mut surface, record, signature)?;
        let bytes = surface.serialize()?;
        log::info!(
            "composed CP72 form for {}: {} page(s), {} bytes",
            record.sender,
            composition.pages,
            bytes.len()
        );
        Ok(bytes)
    }

    /// Compose the form as a PDF
    pub fn generate(
        &self,
        record: &FormRecord,
        signature: Option<SignatureAsset>,
    ) -> Result<Vec<u8>, DocumentError> {
        let surface = PdfSurface::new(self.assets.fonts.clone());
        self.compose(surface, record, signature)
    }

    fn draw_title<S: Surface>(&self, surface: &mut S) -> Result<bool, DocumentError> {
        let logo_drawn = match &self.assets.logo {
            Some(bytes) => best_effort(
                "logo",
                Image::decode(bytes).and_then(|logo| {
                    surface.draw_image(logo, LOGO_X, LOGO_Y, LOGO_WIDTH, LOGO_HEIGHT, true)
                }),
            ),
            None => false,
        };

        surface.set_font(FontWeight::Bold, Pt(16.0));
        surface.draw_string(LEFT_MARGIN, TITLE_Y, "MON FREIGHT")?;
        surface.set_font(FontWeight::Bold, Pt(13.0));
        surface.draw_string(LEFT_MARGIN, SUBTITLE_Y, "CP72 CUSTOMS DECLARATION FORM")?;

        Ok(logo_drawn)
    }

    fn draw_address<S: Surface>(
        &self,
        surface: &mut S,
        cursor: Cursor,
        address: &str,
    ) -> Result<Cursor, DocumentError> {
        let lines = wrap_text(address, self.template.address_wrap);
        log::debug!("address wrapped to {} line(s)", lines.len());
        draw_lines(surface, ADDRESS_INDENT, cursor, &lines)
    }

    fn draw_sender<S: Surface>(
        &self,
        surface: &mut S,
        cursor: Cursor,
        record: &FormRecord,
    ) -> Result<Cursor, DocumentError> {
        let cursor = section_header(surface, cursor, "SENDER DETAILS")?;
        surface.set_font(FontWeight::Bold, BODY_SIZE);
        let cursor = draw_lines(
            surface,
            LEFT_MARGIN,
            cursor,
            [
                format!("Full Name / Овог нэр: {}", record.sender),
                format!("Phone / Утас: {}", record.sender_phone),
                "Address / Хаяг:".to_string(),
            ],
        )?;
        surface.draw_string(
            LEFT_MARGIN,
            cursor.y(),
            &format!("Box Number: {}", record.box_number),
        )?;
        let cursor = self.draw_address(surface, cursor.down(Mm(5.0)), &record.sender_address)?;
        Ok(cursor.down(BLOCK_GAP))
    }

    fn draw_recipient<S: Surface>(
        &self,
        surface: &mut S,
        cursor: Cursor,
        record: &FormRecord,
    ) -> Result<Cursor, DocumentError> {
        let cursor = section_header(surface, cursor, "RECIPIENT DETAILS")?;
        surface.set_font(FontWeight::Bold, BODY_SIZE);
        let cursor = draw_lines(
            surface,
            LEFT_MARGIN,
            cursor,
            [
                format!("Full Name / Овог нэр: {}", record.recipient),
                format!("Phone / Утас: {}", record.recipient_phone),
                "Address / Хаяг:".to_string(),
            ],
        )?;
        let cursor = self.draw_address(surface, cursor, &record.recipient_address)?;
        Ok(cursor.down(BLOCK_GAP))
    }

    fn draw_goods_table<S: Surface>(
        &self,
        surface: &mut S,
        cursor: Cursor,
        cells: &[Vec<String>],
    ) -> Result<Cursor, DocumentError> {
        let style = TableStyle {
            column_widths: GOODS_COLUMNS.to_vec(),
            ..TableStyle::default()
        };
        let height = surface.measure_and_draw_table(cells, LEFT_MARGIN, cursor.y(), &style)?;
        Ok(cursor.down(height + TABLE_GAP))
    }

    fn draw_measurements<S: Surface>(
        &self,
        surface: &mut S,
        cursor: Cursor,
        record: &FormRecord,
    ) -> Result<Cursor, DocumentError> {
        let cursor = section_header(surface, cursor, "WEIGHT & MEASUREMENTS")?;
        let cursor = draw_lines(
            surface,
            LEFT_MARGIN,
            cursor,
            [
                format!("Declared Value (AUD): {}", record.value),
                format!("Actual Weight: {} kg", record.weight),
                format!(
                    "Dimensions (L × W × H): {} × {} × {} cm",
                    record.length, record.width, record.height
                ),
                format!("Volumetric Weight: {} kg", record.volumetric_weight),
            ],
        )?;
        surface.draw_string(
            LEFT_MARGIN,
            cursor.y(),
            &format!("Chargeable Weight: {} kg", record.final_weight),
        )?;
        Ok(cursor.down(Mm(8.0)))
    }

    fn draw_signature<S: Surface>(
        &self,
        surface: &mut S,
        cursor: Cursor,
        signature: Option<SignatureAsset>,
        date: NaiveDate,
    ) -> Result<bool, DocumentError> {
        let cursor = section_header(surface, cursor, "SIGNATURE")?;
        let y = cursor.y();
        surface.draw_string(LEFT_MARGIN, y - Mm(1.0), "Sender Signature:")?;

        let signature_drawn = match signature {
            Some(signature) => best_effort(
                "signature",
                surface.draw_image(
                    signature.image,
                    SIGNATURE_X,
                    y - SIGNATURE_DROP,
                    SIGNATURE_WIDTH,
                    SIGNATURE_HEIGHT,
                    true,
                ),
            ),
            None => false,
        };

        surface.draw_string(DATE_X, y, &format!("Date: {}", date.format("%Y-%m-%d")))?;
        Ok(signature_drawn)
    }
}

/// Compose a CP72 form as a PDF, dated today
///
/// ```
/// use cp72_pdf::{generate, Assets, FormRecord};
///
/// let record = FormRecord {
///     sender: "Bat-Erdene".to_string(),
///     recipient: "Oyunaa".to_string(),
///     ..FormRecord::default()
/// };
/// let pdf = generate(&Assets::builtin(), &record, None).unwrap();
/// assert!(pdf.starts_with(b"%PDF-"));
/// ```
pub fn generate(
    assets: &Assets,
    record: &FormRecord,
    signature: Option<SignatureAsset>,
) -> Result<Vec<u8>, DocumentError> {
    Composer::new(assets.clone()).generate(record, signature)
}
