//! PDF rendering of the reconciliation report.

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::data::ReportData;
use crate::error::ReportError;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const FONT_SIZE_TITLE: f32 = 22.0;
const FONT_SIZE_HEADING: f32 = 14.0;
const FONT_SIZE_BODY: f32 = 11.0;
const FONT_SIZE_FOOTER: f32 = 8.0;
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 7.0;
const VALUE_COLUMN: f32 = 95.0;

/// Render the title, station and period
fn render_header(
    layer: &PdfLayerReference,
    data: &ReportData,
    font_regular: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    y: &mut f32,
) {
    layer.use_text(&data.title, FONT_SIZE_TITLE, Mm(MARGIN), Mm(*y), font_bold);
    *y -= LINE_HEIGHT * 2.0;

    if !data.station_name.is_empty() {
        layer.use_text(
            format!("Station: {}", data.station_name),
            FONT_SIZE_HEADING,
            Mm(MARGIN),
            Mm(*y),
            font_bold,
        );
        *y -= LINE_HEIGHT * 1.5;
    }

    if let Some(period) = data.period_display() {
        layer.use_text(
            format!("Control period: {period}"),
            FONT_SIZE_BODY,
            Mm(MARGIN),
            Mm(*y),
            font_regular,
        );
        *y -= LINE_HEIGHT;
    }
    *y -= LINE_HEIGHT;
}

/// Render the labelled result lines in two columns
fn render_lines(
    layer: &PdfLayerReference,
    data: &ReportData,
    font_regular: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    y: &mut f32,
) {
    for line in &data.lines {
        layer.use_text(&line.label, FONT_SIZE_BODY, Mm(MARGIN), Mm(*y), font_bold);
        layer.use_text(
            &line.value,
            FONT_SIZE_BODY,
            Mm(VALUE_COLUMN),
            Mm(*y),
            font_regular,
        );
        *y -= LINE_HEIGHT;
    }
    *y -= LINE_HEIGHT;
}

fn render_notes(
    layer: &PdfLayerReference,
    data: &ReportData,
    font_regular: &IndirectFontRef,
    y: &mut f32,
) {
    for note in &data.notes {
        if *y < MARGIN + LINE_HEIGHT {
            break;
        }
        layer.use_text(
            format!("- {note}"),
            FONT_SIZE_BODY - 1.0,
            Mm(MARGIN),
            Mm(*y),
            font_regular,
        );
        *y -= LINE_HEIGHT;
    }
}

fn render_footer(
    layer: &PdfLayerReference,
    data: &ReportData,
    font_regular: &IndirectFontRef,
) {
    layer.use_text(
        format!("Generated {}", data.generated_display()),
        FONT_SIZE_FOOTER,
        Mm(MARGIN),
        Mm(MARGIN / 2.0),
        font_regular,
    );
}

/// Generate a single-page PDF report.
pub fn generate_pdf(data: &ReportData) -> Result<Vec<u8>, ReportError> {
    let (doc, page1, layer1) = PdfDocument::new(
        data.title.clone(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let font_regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let layer = doc.get_page(page1).get_layer(layer1);
    let mut y_position = PAGE_HEIGHT - MARGIN;

    render_header(&layer, data, &font_regular, &font_bold, &mut y_position);
    render_lines(&layer, data, &font_regular, &font_bold, &mut y_position);
    render_notes(&layer, data, &font_regular, &mut y_position);
    render_footer(&layer, data, &font_regular);

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)?;
    buf.into_inner()
        .map_err(|e| ReportError::Finalize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use fuel_core::{FormState, calculate};

    use super::*;

    #[test]
    fn generates_pdf_document() {
        let mut state = FormState::default();
        state.station_name = "North Depot".to_string();
        let data = ReportData::new(
            &state,
            &calculate(&state),
            Utc.with_ymd_and_hms(2024, 4, 1, 8, 30, 0).unwrap(),
        );

        let pdf = generate_pdf(&data).unwrap();

        assert!(!pdf.is_empty());
        // PDF should start with %PDF header
        assert_eq!(&pdf[0..4], b"%PDF");
    }
}
