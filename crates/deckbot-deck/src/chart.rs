//! Category charts

use crate::units::Pt;

/// Number format used for every factpack series
pub const NUMBER_FORMAT: &str = "#,###.#";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Horizontal bars
    BarClustered,
    /// Vertical columns
    ColumnClustered,
}

/// A named series, one value per category
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    pub number_format: String,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            number_format: NUMBER_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPosition {
    OutsideEnd,
    Center,
    InsideEnd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataLabels {
    pub font_size: Pt,
    pub position: LabelPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Bottom,
    Right,
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Legend {
    pub position: LegendPosition,
    /// Whether the legend may overlap the plot area
    pub include_in_layout: bool,
    pub font_size: Pt,
}

/// A clustered bar or column chart with its display options
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub data_labels: Option<DataLabels>,
    pub category_font_size: Option<Pt>,
    pub value_font_size: Option<Pt>,
    pub value_axis_visible: bool,
    pub legend: Option<Legend>,
}

impl Chart {
    pub fn new(kind: ChartKind, categories: Vec<String>) -> Self {
        Self {
            kind,
            categories,
            series: Vec::new(),
            data_labels: None,
            category_font_size: None,
            value_font_size: None,
            value_axis_visible: true,
            legend: None,
        }
    }

    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn data_labels(mut self, font_size: Pt, position: LabelPosition) -> Self {
        self.data_labels = Some(DataLabels {
            font_size,
            position,
        });
        self
    }

    pub fn category_font_size(mut self, size: Pt) -> Self {
        self.category_font_size = Some(size);
        self
    }

    pub fn value_font_size(mut self, size: Pt) -> Self {
        self.value_font_size = Some(size);
        self
    }

    pub fn hide_value_axis(mut self) -> Self {
        self.value_axis_visible = false;
        self
    }

    pub fn legend(mut self, position: LegendPosition, font_size: Pt) -> Self {
        self.legend = Some(Legend {
            position,
            include_in_layout: false,
            font_size,
        });
        self
    }
}
