//! Line-and-cell page model on top of the lopdf object graph.
//!
//! Coordinates are tracked in millimetres from the top-left corner, the
//! way the layout is described, and converted to PDF points (origin at the
//! bottom-left) only when an operation is emitted.

use super::fonts::{self, BASE_FONT};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Points per millimetre.
const SCALE: f64 = 72.0 / 25.4;

/// A4 page size in points.
const PAGE_WIDTH_PT: i64 = 595;
const PAGE_HEIGHT_PT: i64 = 842;

/// Page margin in millimetres, used for the left and top edges.
pub const MARGIN: f64 = 10.0;
/// Horizontal padding between a cell border and left-aligned text.
const CELL_PADDING: f64 = MARGIN / 10.0;

const FONT_RESOURCE: &str = "F1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// A single cell on the current line.
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    pub width: f64,
    pub height: f64,
    pub text: &'a str,
    pub border: bool,
    pub align: Align,
    /// Move to the start of the next line once the cell is written.
    pub line_break: bool,
}

impl<'a> Cell<'a> {
    pub fn new(width: f64, height: f64, text: &'a str) -> Self {
        Self {
            width,
            height,
            text,
            border: false,
            align: Align::Left,
            line_break: false,
        }
    }

    pub fn bordered(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn line_break(mut self) -> Self {
        self.line_break = true;
        self
    }
}

/// Accumulates drawing operations for one page.
#[derive(Debug)]
pub struct PageWriter {
    operations: Vec<Operation>,
    x: f64,
    y: f64,
    font_size: f64,
}

impl Default for PageWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PageWriter {
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
            x: MARGIN,
            y: MARGIN,
            font_size: 12.0,
        }
    }

    /// Font size in points for subsequent cells.
    pub fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    /// Current vertical position in millimetres from the top edge.
    pub fn cursor_y(&self) -> f64 {
        self.y
    }

    pub fn cell(&mut self, cell: Cell<'_>) {
        if cell.border {
            self.operations.push(Operation::new(
                "re",
                vec![
                    points(self.x),
                    points(page_height_mm() - self.y),
                    points(cell.width),
                    points(-cell.height),
                ],
            ));
            self.operations.push(Operation::new("S", vec![]));
        }

        let encoded = fonts::encode_win_ansi(cell.text);
        if !encoded.is_empty() {
            let text_width = fonts::text_width(&encoded, self.font_size) / SCALE;
            let dx = match cell.align {
                Align::Left => CELL_PADDING,
                Align::Center => (cell.width - text_width) / 2.0,
            };
            // Baseline sits slightly below the vertical middle of the cell
            let baseline = self.y + 0.5 * cell.height + 0.3 * self.font_size / SCALE;

            self.operations.extend([
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![FONT_RESOURCE.into(), points_raw(self.font_size)],
                ),
                Operation::new(
                    "Td",
                    vec![points(self.x + dx), points(page_height_mm() - baseline)],
                ),
                Operation::new("Tj", vec![Object::string_literal(encoded)]),
                Operation::new("ET", vec![]),
            ]);
        }

        if cell.line_break {
            self.x = MARGIN;
            self.y += cell.height;
        } else {
            self.x += cell.width;
        }
    }

    /// Starts a new line `height` millimetres below the current one.
    pub fn ln(&mut self, height: f64) {
        self.x = MARGIN;
        self.y += height;
    }

    pub fn into_content(self) -> Content {
        Content {
            operations: self.operations,
        }
    }
}

fn page_height_mm() -> f64 {
    PAGE_HEIGHT_PT as f64 / SCALE
}

fn points(mm: f64) -> Object {
    points_raw(mm * SCALE)
}

fn points_raw(pt: f64) -> Object {
    Object::Integer(pt.round() as i64)
}

/// Wraps a finished page into a complete single-page PDF file.
pub fn build_document(page: PageWriter) -> Result<Vec<u8>, lopdf::Error> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => BASE_FONT,
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let content = page.into_content();
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH_PT.into(), PAGE_HEIGHT_PT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
