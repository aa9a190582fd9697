//! In-memory slide model
//!
//! A [`Deck`] holds slides; a [`Slide`] holds shapes in z-order. Nothing here
//! knows about XML: the [`crate::pptx`] writer renders the model.

use crate::chart::Chart;
use crate::image::Image;
use crate::units::{Emu, Pt, Rect, Rgb};

/// Horizontal paragraph alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A run of identically formatted text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub text: String,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub color: Option<Rgb>,
    pub size: Option<Pt>,
    /// External URL the run links to
    pub hyperlink: Option<String>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn size(mut self, size: Pt) -> Self {
        self.size = Some(size);
        self
    }

    pub fn hyperlink(mut self, url: impl Into<String>) -> Self {
        self.hyperlink = Some(url.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Alignment,
    pub space_after: Option<Pt>,
}

impl Paragraph {
    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Formatting applied to paragraphs added to a [`TextBox`]
///
/// Plain paragraphs take the colour and size; rich paragraphs keep the
/// formatting of their own runs and only take alignment and spacing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextStyle {
    pub alignment: Alignment,
    pub color: Option<Rgb>,
    pub size: Option<Pt>,
    pub space_after: Option<Pt>,
}

impl TextStyle {
    pub fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            color: Some(Rgb::BLACK),
            ..Default::default()
        }
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn size(mut self, size: Pt) -> Self {
        self.size = Some(size);
        self
    }

    pub fn space_after(mut self, space: Pt) -> Self {
        self.space_after = Some(space);
        self
    }
}

/// Word-wrapped text box that shrinks its text to fit
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub rect: Rect,
    pub style: TextStyle,
    pub paragraphs: Vec<Paragraph>,
    pub word_wrap: bool,
    pub shrink_to_fit: bool,
}

impl TextBox {
    pub fn new(rect: Rect, style: TextStyle) -> Self {
        Self {
            rect,
            style,
            paragraphs: Vec::new(),
            word_wrap: true,
            shrink_to_fit: true,
        }
    }

    fn plain_paragraph(&self, text: impl Into<String>) -> Paragraph {
        let mut run = Run::new(text);
        run.color = self.style.color;
        run.size = self.style.size;
        Paragraph {
            runs: vec![run],
            alignment: self.style.alignment,
            space_after: self.style.space_after,
        }
    }

    /// Append one plain paragraph
    pub fn text(mut self, text: impl Into<String>) -> Self {
        let paragraph = self.plain_paragraph(text);
        self.paragraphs.push(paragraph);
        self
    }

    /// Append one plain paragraph per line
    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for line in lines {
            let paragraph = self.plain_paragraph(line);
            self.paragraphs.push(paragraph);
        }
        self
    }

    /// Append a paragraph made of individually formatted runs
    pub fn rich(mut self, runs: Vec<Run>) -> Self {
        self.paragraphs.push(Paragraph {
            runs,
            alignment: self.style.alignment,
            space_after: self.style.space_after,
        });
        self
    }

    /// Text of every paragraph
    pub fn paragraph_texts(&self) -> Vec<String> {
        self.paragraphs.iter().map(Paragraph::text).collect()
    }
}

/// A picture placed on a slide
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub rect: Rect,
    pub image: Image,
    pub name: String,
}

impl Picture {
    /// Place an image by height; the width follows the image's aspect ratio
    pub fn with_height(image: Image, left: Emu, top: Emu, height: Emu, name: impl Into<String>) -> Self {
        let width = Emu((height.value() as f64 * image.aspect_ratio()).round() as i64);
        Self {
            rect: Rect::new(left, top, width, height),
            image,
            name: name.into(),
        }
    }
}

/// A chart placed on a slide
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub rect: Rect,
    pub chart: Chart,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    TextBox(TextBox),
    Picture(Picture),
    Chart(ChartFrame),
}

/// One slide on the blank layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    pub shapes: Vec<Shape>,
}

impl Slide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_text_box(&mut self, text_box: TextBox) -> &mut Self {
        self.shapes.push(Shape::TextBox(text_box));
        self
    }

    pub fn add_picture(&mut self, picture: Picture) -> &mut Self {
        self.shapes.push(Shape::Picture(picture));
        self
    }

    pub fn add_chart(&mut self, rect: Rect, chart: Chart) -> &mut Self {
        self.shapes.push(Shape::Chart(ChartFrame { rect, chart }));
        self
    }

    pub fn text_boxes(&self) -> impl Iterator<Item = &TextBox> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::TextBox(tb) => Some(tb),
            _ => None,
        })
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartFrame> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Chart(frame) => Some(frame),
            _ => None,
        })
    }

    pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Picture(picture) => Some(picture),
            _ => None,
        })
    }

    /// Every paragraph text on the slide, in shape order
    pub fn texts(&self) -> Vec<String> {
        self.text_boxes()
            .flat_map(TextBox::paragraph_texts)
            .collect()
    }
}

/// A presentation: slide size plus slides in order
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub title: String,
    pub width: Emu,
    pub height: Emu,
    pub slides: Vec<Slide>,
}

impl Deck {
    /// An empty 10in x 7.5in (4:3) deck
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: Emu::inches(10.0),
            height: Emu::inches(7.5),
            slides: Vec::new(),
        }
    }

    pub fn push(&mut self, slide: Slide) {
        self.slides.push(slide);
    }
}
