use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use thiserror::Error;

use crate::models::booking::ContactInfo;
use crate::models::buddy::Buddy;
use crate::models::destination::Destination;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 7.0;
// Rough fit for Helvetica at body size across the printable width.
const WRAP_COLUMNS: usize = 88;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("pdf generation failed: {0}")]
    Generation(String),
}

impl From<printpdf::Error> for PdfError {
    fn from(err: printpdf::Error) -> Self {
        PdfError::Generation(err.to_string())
    }
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageWriter<'_> {
    fn line(&mut self, text: &str, font: &IndirectFontRef, size: f32) {
        for chunk in wrap(text, WRAP_COLUMNS) {
            if self.y < MARGIN {
                let (page, layer) =
                    self.doc
                        .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "itinerary");
                self.layer = self.doc.get_page(page).get_layer(layer);
                self.y = PAGE_HEIGHT - MARGIN;
            }
            self.layer
                .use_text(chunk, size, Mm(MARGIN), Mm(self.y), font);
            self.y -= LINE_HEIGHT;
        }
    }

    fn gap(&mut self) {
        self.y -= LINE_HEIGHT / 2.0;
    }
}

fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > columns {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Renders the confirmed trip as a one-page (or more, if highlights run
/// long) A4 itinerary and returns the raw PDF bytes.
pub fn render_itinerary(
    destination: &Destination,
    buddy: &Buddy,
    match_percentage: u8,
    contact: &ContactInfo,
) -> Result<Vec<u8>, PdfError> {
    let (doc, page, layer) = PdfDocument::new(
        "Travel Buddy Itinerary",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "itinerary",
    );
    let body = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut writer = PageWriter {
        layer: doc.get_page(page).get_layer(layer),
        doc: &doc,
        y: PAGE_HEIGHT - MARGIN,
    };

    writer.line("Travel Buddy - Trip Itinerary", &bold, 18.0);
    writer.gap();

    writer.line("Trip Details", &bold, 13.0);
    writer.line(&format!("Destination: {}", destination.name), &body, 10.0);
    writer.line(&format!("Duration: {}", destination.duration), &body, 10.0);
    writer.line(
        &format!("Approximate cost: {}", destination.approximate_cost),
        &body,
        10.0,
    );
    writer.line(&destination.description, &body, 10.0);
    writer.gap();

    writer.line("Trip Highlights", &bold, 13.0);
    for highlight in destination.trip_highlights.iter().take(5) {
        writer.line(&format!("- {highlight}"), &body, 10.0);
    }
    writer.gap();

    writer.line("Your Travel Buddy", &bold, 13.0);
    writer.line(
        &format!("{} ({}% match)", buddy.name, match_percentage),
        &body,
        10.0,
    );
    writer.line(&format!("From: {}", buddy.location), &body, 10.0);
    writer.line(&buddy.bio, &body, 10.0);
    writer.gap();

    writer.line("Customer Details", &bold, 13.0);
    writer.line(&format!("Name: {}", contact.name), &body, 10.0);
    writer.line(&format!("Email: {}", contact.email), &body, 10.0);
    writer.gap();

    writer.line("Have a wonderful trip!", &body, 10.0);

    Ok(doc.save_to_bytes()?)
}
