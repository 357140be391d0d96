//! services/assistant/src/export/pdf.rs
//!
//! Renders a quiz as a printable PDF. Layout is a single column on A4:
//! a navy header band, the quiz title, one block per question with its
//! options, and (optionally) grading marks, answers and explanations.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};
use study_buddy_core::{QuizQuestion, ScoreReport};

use super::ExportError;

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 20.0;
const HEADER_HEIGHT: f64 = 14.0;
const BOTTOM_MARGIN: f64 = 18.0;

const NAVY: (f64, f64, f64) = (15.0, 23.0, 42.0);
const WHITE: (f64, f64, f64) = (255.0, 255.0, 255.0);
const BLACK: (f64, f64, f64) = (0.0, 0.0, 0.0);
const GREEN: (f64, f64, f64) = (0.0, 100.0, 0.0);
const RED: (f64, f64, f64) = (200.0, 0.0, 0.0);
const BLUE: (f64, f64, f64) = (0.0, 90.0, 160.0);
const DARK_GRAY: (f64, f64, f64) = (60.0, 60.0, 60.0);
const MID_GRAY: (f64, f64, f64) = (80.0, 80.0, 80.0);
const FOOTER_GRAY: (f64, f64, f64) = (128.0, 128.0, 128.0);
const SEPARATOR_GRAY: (f64, f64, f64) = (200.0, 200.0, 200.0);

/// Renders a quiz (optionally graded) to PDF bytes.
///
/// With `include_answers` the correct answer and explanation are printed
/// under each question; without it the output is a blank quiz suitable
/// for printing. When a [`ScoreReport`] is supplied each question also
/// gets a correct/incorrect mark and the overall score appears under the
/// title.
pub fn quiz_to_pdf(
    topic: &str,
    questions: &[QuizQuestion],
    include_answers: bool,
    score: Option<&ScoreReport>,
) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Quiz: {topic}"),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let fonts = Fonts::load(&doc)?;

    {
        let mut writer = PageWriter::start(&doc, doc.get_page(page).get_layer(layer), &fonts);

        writer.write_line(&format!("Quiz: {topic}"), 16.0, FontKind::Bold, BLACK, 0.0);
        if let Some(report) = score {
            writer.spacer(2.0);
            writer.write_line(
                &format!(
                    "Your Score: {} / {} ({:.1}%)",
                    report.score, report.total, report.percentage
                ),
                12.0,
                FontKind::Bold,
                GREEN,
                0.0,
            );
        }
        writer.spacer(4.0);

        for (index, question) in questions.iter().enumerate() {
            writer.separator(SEPARATOR_GRAY);
            writer.spacer(2.0);
            writer.write_line(
                &format!("Q{}. {}", index + 1, question.question),
                11.0,
                FontKind::Bold,
                BLACK,
                0.0,
            );

            for (position, option) in question.options.iter().flatten().enumerate() {
                let letter = char::from(b'A' + position as u8);
                writer.write_line(
                    &format!("{letter}. {option}"),
                    10.0,
                    FontKind::Regular,
                    DARK_GRAY,
                    5.0,
                );
            }

            if let Some(review) = score.and_then(|report| report.results.get(index)) {
                if review.correct {
                    writer.write_line("Correct", 10.0, FontKind::Bold, GREEN, 5.0);
                } else {
                    let submitted = if review.your_answer.is_empty() {
                        "(no answer)"
                    } else {
                        review.your_answer.as_str()
                    };
                    writer.write_line(
                        &format!("Incorrect - Your answer: {submitted}"),
                        10.0,
                        FontKind::Bold,
                        RED,
                        5.0,
                    );
                }
            }

            if include_answers {
                writer.write_line(
                    &format!("Answer: {}", question.answer),
                    10.0,
                    FontKind::Italic,
                    BLUE,
                    5.0,
                );
                if !question.explanation.is_empty() {
                    writer.write_line(
                        &format!("Explanation: {}", question.explanation),
                        9.0,
                        FontKind::Regular,
                        MID_GRAY,
                        5.0,
                    );
                }
            }

            writer.spacer(3.0);
        }
    }

    doc.save_to_bytes().map_err(|e| ExportError::Pdf(e.to_string()))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, ExportError> {
        let builtin = |font| {
            doc.add_builtin_font(font)
                .map_err(|e| ExportError::Pdf(e.to_string()))
        };
        Ok(Self {
            regular: builtin(BuiltinFont::Helvetica)?,
            bold: builtin(BuiltinFont::HelveticaBold)?,
            italic: builtin(BuiltinFont::HelveticaOblique)?,
        })
    }

    fn get(&self, kind: FontKind) -> &IndirectFontRef {
        match kind {
            FontKind::Regular => &self.regular,
            FontKind::Bold => &self.bold,
            FontKind::Italic => &self.italic,
        }
    }
}

#[derive(Clone, Copy)]
enum FontKind {
    Regular,
    Bold,
    Italic,
}

/// Tracks the write cursor on the current page and opens a new page
/// (with header and footer chrome) whenever a line would run past the
/// bottom margin.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: &'a Fonts,
    y: f64,
    page_number: usize,
}

impl<'a> PageWriter<'a> {
    fn start(doc: &'a PdfDocumentReference, layer: PdfLayerReference, fonts: &'a Fonts) -> Self {
        let mut writer = Self {
            doc,
            layer,
            fonts,
            y: PAGE_HEIGHT - HEADER_HEIGHT - 12.0,
            page_number: 1,
        };
        writer.draw_chrome();
        writer
    }

    fn draw_chrome(&mut self) {
        filled_rect(
            &self.layer,
            0.0,
            PAGE_HEIGHT - HEADER_HEIGHT,
            PAGE_WIDTH,
            PAGE_HEIGHT,
            NAVY,
        );
        self.layer.set_fill_color(rgb(WHITE));
        self.layer.use_text(
            "AI Study Buddy - Quiz Export",
            10.0,
            Mm(MARGIN),
            Mm(PAGE_HEIGHT - 9.0),
            &self.fonts.bold,
        );
        self.layer.set_fill_color(rgb(FOOTER_GRAY));
        self.layer.use_text(
            format!("Page {}", self.page_number),
            8.0,
            Mm(PAGE_WIDTH / 2.0 - 4.0),
            Mm(10.0),
            &self.fonts.regular,
        );
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.page_number += 1;
        self.y = PAGE_HEIGHT - HEADER_HEIGHT - 12.0;
        self.draw_chrome();
    }

    fn ensure_room(&mut self, needed: f64) {
        if self.y - needed < BOTTOM_MARGIN {
            self.new_page();
        }
    }

    /// Writes `text` at the given size, wrapping at the right margin.
    fn write_line(&mut self, text: &str, size: f64, kind: FontKind, color: (f64, f64, f64), indent: f64) {
        // Approximate Helvetica metrics: pt to mm is 0.3528, average
        // glyph width is about half an em.
        let char_width = size * 0.1764;
        let usable = PAGE_WIDTH - 2.0 * MARGIN - indent;
        let max_chars = ((usable / char_width) as usize).max(8);
        let line_height = size * 0.53;

        for line in wrap_words(text, max_chars) {
            self.ensure_room(line_height);
            self.layer.set_fill_color(rgb(color));
            self.layer
                .use_text(line, size, Mm(MARGIN + indent), Mm(self.y), self.fonts.get(kind));
            self.y -= line_height;
        }
    }

    fn separator(&mut self, color: (f64, f64, f64)) {
        self.ensure_room(6.0);
        self.layer.set_outline_color(rgb(color));
        self.layer.set_outline_thickness(0.3);
        self.layer.add_shape(Line {
            points: vec![
                (Point::new(Mm(MARGIN), Mm(self.y)), false),
                (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(self.y)), false),
            ],
            is_closed: false,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        });
        self.y -= 4.0;
    }

    fn spacer(&mut self, mm: f64) {
        self.ensure_room(mm);
        self.y -= mm;
    }
}

fn rgb((r, g, b): (f64, f64, f64)) -> Color {
    Color::Rgb(Rgb::new(r / 255.0, g / 255.0, b / 255.0, None))
}

fn filled_rect(
    layer: &PdfLayerReference,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    color: (f64, f64, f64),
) {
    layer.set_fill_color(rgb(color));
    layer.add_shape(Line {
        points: vec![
            (Point::new(Mm(x0), Mm(y0)), false),
            (Point::new(Mm(x1), Mm(y0)), false),
            (Point::new(Mm(x1), Mm(y1)), false),
            (Point::new(Mm(x0), Mm(y1)), false),
        ],
        is_closed: true,
        has_fill: true,
        has_stroke: false,
        is_clipping_path: false,
    });
}

/// Greedy word wrap. Words longer than `max_chars` are split at the
/// character boundary so they cannot push past the margin.
fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if word_len > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                lines.push(piece.iter().collect());
            }
            continue;
        }
        let current_len = current.chars().count();
        if current.is_empty() {
            current.push_str(word);
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
