//! Slide part rendering

use super::PackageParts;
use super::xml::{NS_A, NS_C, NS_P, NS_R, Relationships, XML_DECL, escape, rel};
use crate::model::{Alignment, ChartFrame, Paragraph, Picture, Run, Shape, Slide, TextBox};
use crate::units::Rect;

const LAYOUT_TARGET: &str = "../slideLayouts/slideLayout1.xml";

/// Render one slide and its relationships, registering media and charts
/// with the package as they are met
pub(crate) fn render<'d>(slide: &'d Slide, package: &mut PackageParts<'d>) -> (String, Relationships) {
    let mut rels = Relationships::new();
    rels.add(rel::SLIDE_LAYOUT, LAYOUT_TARGET);

    let mut tree = String::new();
    // id 1 is the group shape
    for (idx, shape) in slide.shapes.iter().enumerate() {
        let id = idx + 2;
        match shape {
            Shape::TextBox(text_box) => text_box_xml(&mut tree, id, text_box, &mut rels),
            Shape::Picture(picture) => {
                let target = package.add_image(&picture.image);
                let rel_id = rels.add(rel::IMAGE, target);
                picture_xml(&mut tree, id, picture, &rel_id);
            }
            Shape::Chart(frame) => {
                let target = package.add_chart(&frame.chart);
                let rel_id = rels.add(rel::CHART, target);
                chart_frame_xml(&mut tree, id, frame, &rel_id);
            }
        }
    }

    let xml = format!(
        r#"{XML_DECL}<p:sld xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>{tree}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
    );
    (xml, rels)
}

fn offset_extent(rect: &Rect) -> String {
    format!(
        r#"<a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/>"#,
        rect.left.value(),
        rect.top.value(),
        rect.width.value(),
        rect.height.value()
    )
}

fn text_box_xml(out: &mut String, id: usize, text_box: &TextBox, rels: &mut Relationships) {
    let wrap = if text_box.word_wrap { "square" } else { "none" };
    let autofit = if text_box.shrink_to_fit {
        "<a:normAutofit/>"
    } else {
        "<a:noAutofit/>"
    };

    out.push_str(&format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="TextBox {}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm>{}</a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr><p:txBody><a:bodyPr wrap="{wrap}" rtlCol="0">{autofit}</a:bodyPr><a:lstStyle/>"#,
        id - 1,
        offset_extent(&text_box.rect)
    ));
    if text_box.paragraphs.is_empty() {
        out.push_str("<a:p/>");
    }
    for paragraph in &text_box.paragraphs {
        paragraph_xml(out, paragraph, rels);
    }
    out.push_str("</p:txBody></p:sp>");
}

fn paragraph_xml(out: &mut String, paragraph: &Paragraph, rels: &mut Relationships) {
    let algn = match paragraph.alignment {
        Alignment::Left => "l",
        Alignment::Center => "ctr",
        Alignment::Right => "r",
    };
    out.push_str(&format!(r#"<a:p><a:pPr algn="{algn}">"#));
    if let Some(space) = paragraph.space_after {
        out.push_str(&format!(
            r#"<a:spcAft><a:spcPts val="{}"/></a:spcAft>"#,
            space.hundredths()
        ));
    }
    out.push_str("</a:pPr>");

    for run in paragraph.runs.iter().filter(|r| !r.text.is_empty()) {
        run_xml(out, run, rels);
    }
    out.push_str(r#"<a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
}

fn run_xml(out: &mut String, run: &Run, rels: &mut Relationships) {
    out.push_str(r#"<a:r><a:rPr lang="en-US""#);
    if let Some(size) = run.size {
        out.push_str(&format!(r#" sz="{}""#, size.hundredths()));
    }
    if let Some(bold) = run.bold {
        out.push_str(&format!(r#" b="{}""#, u8::from(bold)));
    }
    if let Some(italic) = run.italic {
        out.push_str(&format!(r#" i="{}""#, u8::from(italic)));
    }
    out.push_str(r#" dirty="0">"#);

    if let Some(color) = run.color {
        out.push_str(&format!(
            r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
            color.hex()
        ));
    }
    if let Some(url) = &run.hyperlink {
        let rel_id = rels.add_external(rel::HYPERLINK, url);
        out.push_str(&format!(r#"<a:hlinkClick r:id="{rel_id}"/>"#));
    }

    out.push_str(&format!("</a:rPr><a:t>{}</a:t></a:r>", escape(&run.text)));
}

fn picture_xml(out: &mut String, id: usize, picture: &Picture, rel_id: &str) {
    out.push_str(&format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="{}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr><a:xfrm>{}</a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#,
        escape(&picture.name),
        offset_extent(&picture.rect)
    ));
}

fn chart_frame_xml(out: &mut String, id: usize, frame: &ChartFrame, rel_id: &str) {
    out.push_str(&format!(
        r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{id}" name="Chart {}"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr><p:xfrm>{}</p:xfrm><a:graphic><a:graphicData uri="{NS_C}"><c:chart xmlns:c="{NS_C}" r:id="{rel_id}"/></a:graphicData></a:graphic></p:graphicFrame>"#,
        id - 1,
        offset_extent(&frame.rect)
    ));
}
