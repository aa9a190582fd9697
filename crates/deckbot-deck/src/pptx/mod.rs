//! PresentationML (`.pptx`) writer
//!
//! Renders a [`Deck`] into an OOXML package: one slide master with a single
//! blank layout, one part per slide, chart parts with literal data and the
//! media the slides embed.

mod chart;
mod parts;
mod slide;
mod xml;

use crate::chart::Chart;
use crate::error::Result;
use crate::image::Image;
use crate::model::Deck;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use tracing::debug;
use xml::{Relationships, rel};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Media and chart parts collected while rendering slides
#[derive(Default)]
pub(crate) struct PackageParts<'d> {
    media: Vec<&'d Image>,
    charts: Vec<&'d Chart>,
}

impl<'d> PackageParts<'d> {
    /// Register an image and return its target relative to a slide
    fn add_image(&mut self, image: &'d Image) -> String {
        self.media.push(image);
        format!(
            "../media/image{}.{}",
            self.media.len(),
            image.format().extension()
        )
    }

    /// Register a chart and return its target relative to a slide
    fn add_chart(&mut self, chart: &'d Chart) -> String {
        self.charts.push(chart);
        format!("../charts/chart{}.xml", self.charts.len())
    }

    fn media_types(&self) -> BTreeSet<(&'static str, &'static str)> {
        self.media
            .iter()
            .map(|image| (image.format().extension(), image.format().content_type()))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PptxWriter {
    created: Option<DateTime<Utc>>,
}

impl PptxWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the creation timestamp recorded in the document properties
    pub fn created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Write the deck as a package into `writer` and hand the writer back
    pub fn write<W: Write + Seek>(&self, deck: &Deck, writer: W) -> Result<W> {
        let mut package = PackageParts::default();
        let rendered: Vec<(String, Relationships)> = deck
            .slides
            .iter()
            .map(|s| slide::render(s, &mut package))
            .collect();

        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let put = |zip: &mut ZipWriter<W>, name: &str, body: &[u8]| -> Result<()> {
            zip.start_file(name, options)?;
            zip.write_all(body)?;
            Ok(())
        };

        put(
            &mut zip,
            "[Content_Types].xml",
            parts::content_types(rendered.len(), package.charts.len(), &package.media_types())
                .as_bytes(),
        )?;

        let mut root_rels = Relationships::new();
        root_rels.add(rel::OFFICE_DOCUMENT, parts::PRESENTATION);
        root_rels.add(rel::CORE_PROPERTIES, parts::CORE_PROPS);
        root_rels.add(rel::EXTENDED_PROPERTIES, parts::APP_PROPS);
        put(&mut zip, "_rels/.rels", root_rels.to_xml().as_bytes())?;

        let created = self.created.unwrap_or_else(Utc::now);
        put(
            &mut zip,
            parts::CORE_PROPS,
            parts::core_properties(&deck.title, created).as_bytes(),
        )?;
        put(
            &mut zip,
            parts::APP_PROPS,
            parts::app_properties(rendered.len()).as_bytes(),
        )?;

        let mut presentation_rels = Relationships::new();
        let master_rel = presentation_rels.add(rel::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
        presentation_rels.add(rel::THEME, "theme/theme1.xml");
        presentation_rels.add(rel::PRES_PROPS, "presProps.xml");
        presentation_rels.add(rel::VIEW_PROPS, "viewProps.xml");
        presentation_rels.add(rel::TABLE_STYLES, "tableStyles.xml");
        let slide_rels: Vec<String> = (1..=rendered.len())
            .map(|n| presentation_rels.add(rel::SLIDE, format!("slides/slide{n}.xml")))
            .collect();

        put(
            &mut zip,
            parts::PRESENTATION,
            parts::presentation(&master_rel, &slide_rels, deck.width, deck.height).as_bytes(),
        )?;
        put(
            &mut zip,
            "ppt/_rels/presentation.xml.rels",
            presentation_rels.to_xml().as_bytes(),
        )?;

        let mut master_rels = Relationships::new();
        let layout_rel = master_rels.add(rel::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        master_rels.add(rel::THEME, "../theme/theme1.xml");
        put(
            &mut zip,
            parts::SLIDE_MASTER,
            parts::slide_master(&layout_rel).as_bytes(),
        )?;
        put(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            master_rels.to_xml().as_bytes(),
        )?;

        let mut layout_rels = Relationships::new();
        layout_rels.add(rel::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
        put(&mut zip, parts::SLIDE_LAYOUT, parts::slide_layout().as_bytes())?;
        put(
            &mut zip,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            layout_rels.to_xml().as_bytes(),
        )?;

        put(&mut zip, parts::THEME, parts::theme().as_bytes())?;
        put(&mut zip, parts::PRES_PROPS, parts::pres_props().as_bytes())?;
        put(&mut zip, parts::VIEW_PROPS, parts::view_props().as_bytes())?;
        put(&mut zip, parts::TABLE_STYLES, parts::table_styles().as_bytes())?;

        for (idx, (body, rels)) in rendered.iter().enumerate() {
            let n = idx + 1;
            put(&mut zip, &format!("ppt/slides/slide{n}.xml"), body.as_bytes())?;
            put(
                &mut zip,
                &format!("ppt/slides/_rels/slide{n}.xml.rels"),
                rels.to_xml().as_bytes(),
            )?;
        }

        for (idx, chart) in package.charts.iter().enumerate() {
            put(
                &mut zip,
                &format!("ppt/charts/chart{}.xml", idx + 1),
                chart::render(chart).as_bytes(),
            )?;
        }

        for (idx, image) in package.media.iter().enumerate() {
            put(
                &mut zip,
                &format!("ppt/media/image{}.{}", idx + 1, image.format().extension()),
                image.bytes(),
            )?;
        }

        debug!(
            slides = rendered.len(),
            charts = package.charts.len(),
            media = package.media.len(),
            "Rendered presentation package"
        );

        Ok(zip.finish()?)
    }

    /// Write the deck to a file, replacing any existing one
    pub fn save(&self, deck: &Deck, path: &Path) -> Result<()> {
        let file = BufWriter::new(File::create(path)?);
        let mut file = self.write(deck, file)?;
        file.flush()?;
        debug!(path = %path.display(), "Saved presentation");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartKind, Series};
    use crate::image::tests::sample_png;
    use crate::model::{Alignment, Picture, Slide, TextBox, TextStyle};
    use crate::units::{Emu, Rect};
    use chrono::TimeZone;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn sample_deck() -> Deck {
        let mut deck = Deck::new("Apple Factpack");

        let mut title = Slide::new();
        title
            .add_text_box(
                TextBox::new(Rect::inches(0.5, 2.0, 9.0, 1.5), TextStyle::new(Alignment::Center))
                    .text("Apple"),
            )
            .add_picture(Picture::with_height(
                Image::from_bytes(sample_png(200, 100)).unwrap(),
                Emu::inches(0.5),
                Emu::inches(0.5),
                Emu::inches(1.0),
                "logo",
            ));
        deck.push(title);

        let mut revenue = Slide::new();
        revenue.add_chart(
            Rect::inches(5.25, 2.5, 4.5, 4.0),
            Chart::new(ChartKind::BarClustered, vec!["Apple".into()])
                .series(Series::new("Revenue", vec![100.0])),
        );
        deck.push(revenue);
        deck
    }

    fn read_part(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut body = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut body)
            .unwrap();
        body
    }

    #[test]
    fn test_package_layout() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let bytes = PptxWriter::new()
            .created(created)
            .write(&sample_deck(), Cursor::new(Vec::new()))
            .unwrap()
            .into_inner();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/_rels/slide2.xml.rels",
            "ppt/charts/chart1.xml",
            "ppt/media/image1.png",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing {name}");
        }

        let types = read_part(&mut archive, "[Content_Types].xml");
        assert!(types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(types.contains(r#"PartName="/ppt/charts/chart1.xml""#));

        let presentation = read_part(&mut archive, "ppt/presentation.xml");
        assert!(presentation.contains(r#"<p:sldId id="256" r:id="rId6"/>"#));
        assert!(presentation.contains(r#"<p:sldId id="257" r:id="rId7"/>"#));
        assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));

        let core = read_part(&mut archive, "docProps/core.xml");
        assert!(core.contains("<dc:title>Apple Factpack</dc:title>"));
        assert!(core.contains("2024-03-01T12:00:00Z"));

        let slide_rels = read_part(&mut archive, "ppt/slides/_rels/slide2.xml.rels");
        assert!(slide_rels.contains("../charts/chart1.xml"));
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        PptxWriter::new().save(&Deck::new("Empty"), &path).unwrap();

        let file = File::open(&path).unwrap();
        let mut archive = ZipArchive::new(file).unwrap();
        let mut presentation = String::new();
        archive
            .by_name("ppt/presentation.xml")
            .unwrap()
            .read_to_string(&mut presentation)
            .unwrap();
        assert!(!presentation.contains("sldIdLst"));
    }
}
