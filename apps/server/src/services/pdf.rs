// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Quote document rendering.

use printpdf::*;
use reno_lite_matching::Proposal;
use std::io::BufWriter;
use thiserror::Error;

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 12.0;
const LINE_MM: f32 = 6.0;

// Column anchors for the line-item table.
const COL_DESCRIPTION: f32 = MARGIN_MM;
const COL_QUANTITY: f32 = 118.0;
const COL_UNIT: f32 = 138.0;
const COL_UNIT_PRICE: f32 = 156.0;
const COL_TOTAL: f32 = 180.0;

/// PDF rendering failures.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("{0}")]
    Render(String),
}

/// Render a proposal as an A4 quote document, returned as raw PDF bytes.
pub fn render_proposal(proposal: &Proposal, building_id: &str) -> Result<Vec<u8>, PdfError> {
    let (doc, page1, layer1) = PdfDocument::new(
        "Renovation Proposal",
        Mm(A4_WIDTH_MM),
        Mm(A4_HEIGHT_MM),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Render(format!("font: {e:?}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PdfError::Render(format!("font: {e:?}")))?;

    let mut writer = PageWriter {
        doc: &doc,
        layer: doc.get_page(page1).get_layer(layer1),
        cursor: A4_HEIGHT_MM - MARGIN_MM,
    };

    // Header block.
    writer.text(COL_DESCRIPTION, "Company XYZ", 12.0, &bold);
    writer.advance(LINE_MM);
    writer.text(
        COL_DESCRIPTION,
        "1234 Business Rd., Business City | +123 456 7890 | contact@companyxyz.com",
        9.0,
        &font,
    );
    writer.advance(LINE_MM * 1.5);
    writer.text(
        COL_DESCRIPTION,
        "Price Quote / Proposal for Exterior Renovation",
        12.0,
        &bold,
    );
    writer.advance(LINE_MM);
    writer.text(COL_DESCRIPTION, format!("Object: {building_id}"), 10.0, &font);
    writer.advance(LINE_MM);
    if let Some(date) = proposal.extra.get("proposalDate").and_then(|v| v.as_str()) {
        writer.text(COL_DESCRIPTION, format!("Quote date: {date}"), 10.0, &font);
        writer.advance(LINE_MM);
    }
    writer.advance(LINE_MM);

    // Table header.
    writer.text(COL_DESCRIPTION, "Description", 9.0, &bold);
    writer.text(COL_QUANTITY, "Quantity", 9.0, &bold);
    writer.text(COL_UNIT, "Unit", 9.0, &bold);
    writer.text(COL_UNIT_PRICE, "Unit price", 9.0, &bold);
    writer.text(COL_TOTAL, "Total", 9.0, &bold);
    writer.advance(LINE_MM);

    for item in &proposal.cost_items {
        writer.text(COL_DESCRIPTION, item.description.clone(), 9.0, &font);
        writer.text(COL_QUANTITY, format!("{:.2}", item.quantity), 9.0, &font);
        writer.text(COL_UNIT, item.unit.clone(), 9.0, &font);
        writer.text(
            COL_UNIT_PRICE,
            format!("{:.2}", item.total_unit_price),
            9.0,
            &font,
        );
        writer.text(COL_TOTAL, format!("{:.2}", item.total_cost), 9.0, &font);
        writer.advance(LINE_MM);
    }

    // Totals block.
    writer.advance(LINE_MM);
    for (label, value) in [
        ("Total Cost Excl. VAT:", proposal.total_cost_excl_vat),
        ("VAT (22%):", proposal.vat),
        ("Total Cost:", proposal.total_cost),
    ] {
        writer.text(COL_QUANTITY, label, 10.0, &bold);
        writer.text(COL_TOTAL, format!("{value:.2}"), 10.0, &bold);
        writer.advance(LINE_MM);
    }

    writer.advance(LINE_MM);
    writer.text(
        COL_DESCRIPTION,
        "This proposal is valid for 30 days from the date of issuance.",
        9.0,
        &font,
    );

    let mut buffer = BufWriter::new(Vec::new());
    doc.save(&mut buffer)
        .map_err(|e| PdfError::Render(format!("save: {e:?}")))?;
    buffer
        .into_inner()
        .map_err(|e| PdfError::Render(format!("flush: {e}")))
}

/// Cursor over pages; breaks to a fresh page when a line would fall below
/// the bottom margin.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    cursor: f32,
}

impl PageWriter<'_> {
    fn text(&mut self, x: f32, text: impl Into<String>, size: f32, font: &IndirectFontRef) {
        self.layer
            .use_text(text, size, Mm(x), Mm(self.cursor), font);
    }

    fn advance(&mut self, by: f32) {
        self.cursor -= by;
        if self.cursor < MARGIN_MM + LINE_MM {
            let (page, layer) = self
                .doc
                .add_page(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor = A4_HEIGHT_MM - MARGIN_MM;
        }
    }
}
