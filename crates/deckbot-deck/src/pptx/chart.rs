//! Chart part rendering
//!
//! Series data is written as literals (`strLit`/`numLit`) so the chart needs
//! no embedded workbook.

use super::xml::{NS_A, NS_C, NS_R, XML_DECL, escape};
use crate::chart::{Chart, ChartKind, LabelPosition, LegendPosition, Series};
use crate::units::Pt;

const CATEGORY_AXIS_ID: u32 = 500_000_001;
const VALUE_AXIS_ID: u32 = 500_000_002;

pub(crate) fn render(chart: &Chart) -> String {
    let (bar_dir, category_pos, value_pos) = match chart.kind {
        ChartKind::BarClustered => ("bar", "l", "b"),
        ChartKind::ColumnClustered => ("col", "b", "l"),
    };

    let mut xml = format!(
        r#"{XML_DECL}<c:chartSpace xmlns:c="{NS_C}" xmlns:a="{NS_A}" xmlns:r="{NS_R}"><c:date1904 val="0"/><c:roundedCorners val="0"/><c:chart><c:autoTitleDeleted val="1"/><c:plotArea><c:layout/><c:barChart><c:barDir val="{bar_dir}"/><c:grouping val="clustered"/><c:varyColors val="0"/>"#
    );

    for (idx, series) in chart.series.iter().enumerate() {
        series_xml(&mut xml, idx, series, &chart.categories);
    }

    if let Some(labels) = &chart.data_labels {
        let position = match labels.position {
            LabelPosition::OutsideEnd => "outEnd",
            LabelPosition::Center => "ctr",
            LabelPosition::InsideEnd => "inEnd",
        };
        let number_format = chart
            .series
            .first()
            .map(|s| s.number_format.as_str())
            .unwrap_or("General");
        xml.push_str(&format!(
            r#"<c:dLbls><c:numFmt formatCode="{}" sourceLinked="0"/>{}<c:dLblPos val="{position}"/><c:showLegendKey val="0"/><c:showVal val="1"/><c:showCatName val="0"/><c:showSerName val="0"/><c:showPercent val="0"/><c:showBubbleSize val="0"/></c:dLbls>"#,
            escape(number_format),
            text_properties(Some(labels.font_size))
        ));
    }

    xml.push_str(&format!(
        r#"<c:gapWidth val="150"/><c:axId val="{CATEGORY_AXIS_ID}"/><c:axId val="{VALUE_AXIS_ID}"/></c:barChart>"#
    ));

    xml.push_str(&format!(
        r#"<c:catAx><c:axId val="{CATEGORY_AXIS_ID}"/><c:scaling><c:orientation val="minMax"/></c:scaling><c:delete val="0"/><c:axPos val="{category_pos}"/><c:majorTickMark val="out"/><c:minorTickMark val="none"/><c:tickLblPos val="nextTo"/>{}<c:crossAx val="{VALUE_AXIS_ID}"/><c:crosses val="autoZero"/><c:auto val="1"/><c:lblAlgn val="ctr"/><c:lblOffset val="100"/><c:noMultiLvlLbl val="0"/></c:catAx>"#,
        text_properties(chart.category_font_size)
    ));

    xml.push_str(&format!(
        r#"<c:valAx><c:axId val="{VALUE_AXIS_ID}"/><c:scaling><c:orientation val="minMax"/></c:scaling><c:delete val="{}"/><c:axPos val="{value_pos}"/><c:numFmt formatCode="General" sourceLinked="1"/><c:majorTickMark val="out"/><c:minorTickMark val="none"/><c:tickLblPos val="nextTo"/>{}<c:crossAx val="{CATEGORY_AXIS_ID}"/><c:crosses val="autoZero"/><c:crossBetween val="between"/></c:valAx></c:plotArea>"#,
        u8::from(!chart.value_axis_visible),
        text_properties(chart.value_font_size)
    ));

    if let Some(legend) = &chart.legend {
        let position = match legend.position {
            LegendPosition::Bottom => "b",
            LegendPosition::Right => "r",
            LegendPosition::Top => "t",
        };
        xml.push_str(&format!(
            r#"<c:legend><c:legendPos val="{position}"/><c:overlay val="{}"/>{}</c:legend>"#,
            u8::from(legend.include_in_layout),
            text_properties(Some(legend.font_size))
        ));
    }

    xml.push_str(
        r#"<c:plotVisOnly val="1"/><c:dispBlanksAs val="gap"/></c:chart></c:chartSpace>"#,
    );
    xml
}

fn series_xml(out: &mut String, idx: usize, series: &Series, categories: &[String]) {
    out.push_str(&format!(
        r#"<c:ser><c:idx val="{idx}"/><c:order val="{idx}"/><c:tx><c:v>{}</c:v></c:tx><c:invertIfNegative val="0"/>"#,
        escape(&series.name)
    ));

    out.push_str(&format!(
        r#"<c:cat><c:strLit><c:ptCount val="{}"/>"#,
        categories.len()
    ));
    for (i, category) in categories.iter().enumerate() {
        out.push_str(&format!(
            r#"<c:pt idx="{i}"><c:v>{}</c:v></c:pt>"#,
            escape(category)
        ));
    }
    out.push_str("</c:strLit></c:cat>");

    out.push_str(&format!(
        r#"<c:val><c:numLit><c:formatCode>{}</c:formatCode><c:ptCount val="{}"/>"#,
        escape(&series.number_format),
        series.values.len()
    ));
    for (i, value) in series.values.iter().enumerate() {
        // NaN and infinities are left as gaps
        if value.is_finite() {
            out.push_str(&format!(r#"<c:pt idx="{i}"><c:v>{value}</c:v></c:pt>"#));
        }
    }
    out.push_str("</c:numLit></c:val></c:ser>");
}

fn text_properties(size: Option<Pt>) -> String {
    match size {
        Some(size) => format!(
            r#"<c:txPr><a:bodyPr/><a:lstStyle/><a:p><a:pPr><a:defRPr sz="{}"/></a:pPr><a:endParaRPr lang="en-US"/></a:p></c:txPr>"#,
            size.hundredths()
        ),
        None => String::new(),
    }
}
