//! Package-level parts: content types, properties, presentation, master,
//! layout and theme

use super::xml::{NS_A, NS_P, NS_R, XML_DECL, escape};
use crate::units::Emu;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

pub(crate) const PRESENTATION: &str = "ppt/presentation.xml";
pub(crate) const SLIDE_MASTER: &str = "ppt/slideMasters/slideMaster1.xml";
pub(crate) const SLIDE_LAYOUT: &str = "ppt/slideLayouts/slideLayout1.xml";
pub(crate) const THEME: &str = "ppt/theme/theme1.xml";
pub(crate) const PRES_PROPS: &str = "ppt/presProps.xml";
pub(crate) const VIEW_PROPS: &str = "ppt/viewProps.xml";
pub(crate) const TABLE_STYLES: &str = "ppt/tableStyles.xml";
pub(crate) const CORE_PROPS: &str = "docProps/core.xml";
pub(crate) const APP_PROPS: &str = "docProps/app.xml";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_CHART: &str = "application/vnd.openxmlformats-officedocument.drawingml.chart+xml";
const CT_PRES_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
const CT_VIEW_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml";
const CT_TABLE_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_APP: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

/// `[Content_Types].xml` for a package with the given part counts
pub(crate) fn content_types(
    slide_count: usize,
    chart_count: usize,
    media: &BTreeSet<(&'static str, &'static str)>,
) -> String {
    let mut xml = format!(
        r#"{XML_DECL}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>"#
    );
    for (extension, content_type) in media {
        xml.push_str(&format!(
            r#"<Default Extension="{extension}" ContentType="{content_type}"/>"#
        ));
    }

    let mut overrides = vec![
        (format!("/{PRESENTATION}"), CT_PRESENTATION),
        (format!("/{SLIDE_MASTER}"), CT_SLIDE_MASTER),
        (format!("/{SLIDE_LAYOUT}"), CT_SLIDE_LAYOUT),
        (format!("/{THEME}"), CT_THEME),
        (format!("/{PRES_PROPS}"), CT_PRES_PROPS),
        (format!("/{VIEW_PROPS}"), CT_VIEW_PROPS),
        (format!("/{TABLE_STYLES}"), CT_TABLE_STYLES),
        (format!("/{CORE_PROPS}"), CT_CORE),
        (format!("/{APP_PROPS}"), CT_APP),
    ];
    for n in 1..=slide_count {
        overrides.push((format!("/ppt/slides/slide{n}.xml"), CT_SLIDE));
    }
    for n in 1..=chart_count {
        overrides.push((format!("/ppt/charts/chart{n}.xml"), CT_CHART));
    }
    for (part, content_type) in overrides {
        xml.push_str(&format!(
            r#"<Override PartName="{part}" ContentType="{content_type}"/>"#
        ));
    }

    xml.push_str("</Types>");
    xml
}

pub(crate) fn core_properties(title: &str, created: DateTime<Utc>) -> String {
    let stamp = created.format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        r#"{XML_DECL}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{}</dc:title><dc:creator>deckbot</dc:creator><cp:lastModifiedBy>deckbot</cp:lastModifiedBy><cp:revision>1</cp:revision><dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified></cp:coreProperties>"#,
        escape(title)
    )
}

pub(crate) fn app_properties(slide_count: usize) -> String {
    format!(
        r#"{XML_DECL}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><Application>deckbot</Application><PresentationFormat>On-screen Show (4:3)</PresentationFormat><Slides>{slide_count}</Slides></Properties>"#
    )
}

/// `ppt/presentation.xml`; slide relationship ids are given in order
pub(crate) fn presentation(
    master_rel: &str,
    slide_rels: &[String],
    width: Emu,
    height: Emu,
) -> String {
    let mut xml = format!(
        r#"{XML_DECL}<p:presentation xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="{master_rel}"/></p:sldMasterIdLst>"#
    );
    if !slide_rels.is_empty() {
        xml.push_str("<p:sldIdLst>");
        for (idx, rel_id) in slide_rels.iter().enumerate() {
            xml.push_str(&format!(r#"<p:sldId id="{}" r:id="{rel_id}"/>"#, 256 + idx));
        }
        xml.push_str("</p:sldIdLst>");
    }
    xml.push_str(&format!(
        r#"<p:sldSz cx="{}" cy="{}"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
        width.value(),
        height.value()
    ));
    xml
}

const EMPTY_TREE: &str = r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree>"#;

pub(crate) fn slide_master(layout_rel: &str) -> String {
    format!(
        r#"{XML_DECL}<p:sldMaster xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>{EMPTY_TREE}</p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="{layout_rel}"/></p:sldLayoutIdLst></p:sldMaster>"#
    )
}

pub(crate) fn slide_layout() -> String {
    format!(
        r#"{XML_DECL}<p:sldLayout xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" type="blank" preserve="1"><p:cSld name="Blank">{EMPTY_TREE}</p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#
    )
}

pub(crate) fn pres_props() -> String {
    format!(r#"{XML_DECL}<p:presentationPr xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"/>"#)
}

pub(crate) fn view_props() -> String {
    format!(r#"{XML_DECL}<p:viewPr xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"/>"#)
}

pub(crate) fn table_styles() -> String {
    format!(
        r#"{XML_DECL}<a:tblStyleLst xmlns:a="{NS_A}" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#
    )
}

pub(crate) fn theme() -> String {
    let scheme = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let fills = scheme.repeat(3);
    let lines: String = [9525, 25400, 38100]
        .iter()
        .map(|w| format!(r#"<a:ln w="{w}">{scheme}</a:ln>"#))
        .collect();
    let effects = "<a:effectStyle><a:effectLst/></a:effectStyle>".repeat(3);

    format!(
        r#"{XML_DECL}<a:theme xmlns:a="{NS_A}" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2><a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2><a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4><a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6><a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst>{fills}</a:fillStyleLst><a:lnStyleLst>{lines}</a:lnStyleLst><a:effectStyleLst>{effects}</a:effectStyleLst><a:bgFillStyleLst>{fills}</a:bgFillStyleLst></a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"#
    )
}
