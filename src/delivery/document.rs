use crate::error::{InvoiceError, Result};
use crate::service::placeholders::{fill_template, Placeholders};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::io::BufWriter;
use std::path::Path;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const TOP: f32 = PAGE_HEIGHT - 20.0;
const BODY_SIZE: f32 = 10.0;
const HEADING_SIZE: f32 = 14.0;
const LINE_HEIGHT: f32 = 5.0;
/// Courier 10pt 在 A4 页边距内可容纳的字符数
const WRAP_WIDTH: usize = 85;

/// 模板填充并导出文档
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, title: &str, fields: &Placeholders) -> Result<Vec<u8>>;
}

/// 文本模板 -> PDF
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    template: String,
}

impl PdfRenderer {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let template = std::fs::read_to_string(path)?;
        Ok(Self::new(template))
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, title: &str, fields: &Placeholders) -> Result<Vec<u8>> {
        let text = fill_template(&self.template, fields);

        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let body_font = doc
            .add_builtin_font(BuiltinFont::Courier)
            .map_err(|e| InvoiceError::Render(e.to_string()))?;
        let heading_font = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| InvoiceError::Render(e.to_string()))?;

        let mut current: PdfLayerReference = doc.get_page(page).get_layer(layer);
        let mut y = TOP;

        for line in text.lines() {
            let (content, font, size): (&str, &IndirectFontRef, f32) =
                match line.strip_prefix("# ") {
                    Some(heading) => (heading, &heading_font, HEADING_SIZE),
                    None => (line, &body_font, BODY_SIZE),
                };

            for piece in wrap_line(content, WRAP_WIDTH) {
                if y < MARGIN {
                    let (next_page, next_layer) =
                        doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
                    current = doc.get_page(next_page).get_layer(next_layer);
                    y = TOP;
                }
                if !piece.is_empty() {
                    current.use_text(piece, size, Mm(MARGIN), Mm(y), font);
                }
                y -= if size > BODY_SIZE { LINE_HEIGHT * 1.6 } else { LINE_HEIGHT };
            }
        }

        let mut writer = BufWriter::new(Vec::<u8>::new());
        doc.save(&mut writer)
            .map_err(|e| InvoiceError::Render(e.to_string()))?;
        writer
            .into_inner()
            .map_err(|e| InvoiceError::Render(e.to_string()))
    }
}

/// 放得下的行原样保留 (含对齐空格)；超长行按单词折行并保留行首缩进
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let line = line.trim_end();
    if line.chars().count() <= width {
        return vec![line.to_string()];
    }

    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    let room = width.saturating_sub(indent.chars().count()).max(1);

    let mut pieces = Vec::new();
    let mut current = String::new();
    for word in body.split_whitespace() {
        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if needed > room && !current.is_empty() {
            pieces.push(format!("{}{}", indent, std::mem::take(&mut current)));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        pieces.push(format!("{}{}", indent, current));
    }
    pieces
}
