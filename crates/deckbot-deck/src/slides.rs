//! Factpack composition
//!
//! Lays a company overview and its revenue metric out on three slides:
//! a title slide, a company introduction and a revenue comparison against
//! the peer group.

use crate::analysis::{LastThreeYears, PeerRanking, period_phrase};
use crate::chart::{Chart, ChartKind, LabelPosition, LegendPosition, Series};
use crate::error::Result;
use crate::image::Image;
use crate::model::{Alignment, Deck, Picture, Run, Slide, TextBox, TextStyle};
use crate::sentences::SentenceSplitter;
use crate::units::{Emu, Pt, Rect};
use chrono::{Month, NaiveDate};
use deckbot_core::{Company, Error, MetricDetail, QuarterRef};
use tracing::debug;

/// Shown for overview facts the API did not provide
const NOT_AVAILABLE: &str = "n/a";

const REVENUE_UNIT: &str = "Revenue (USD bn)";

/// Inputs of one factpack
#[derive(Debug, Clone)]
pub struct Factpack<'a> {
    company: &'a Company,
    metric: &'a MetricDetail,
    created_on: NaiveDate,
    logo: Option<Image>,
    cover: Option<Image>,
}

impl<'a> Factpack<'a> {
    pub fn new(company: &'a Company, metric: &'a MetricDetail, created_on: NaiveDate) -> Self {
        Self {
            company,
            metric,
            created_on,
            logo: None,
            cover: None,
        }
    }

    pub fn logo(mut self, logo: Option<Image>) -> Self {
        self.logo = logo;
        self
    }

    pub fn cover(mut self, cover: Option<Image>) -> Self {
        self.cover = cover;
        self
    }

    /// Build the three slides
    pub fn compose(self) -> Result<Deck> {
        let mut deck = Deck::new(format!("{} - Factpack", self.company.name));
        let revenue = self.revenue_slide()?;
        deck.push(self.title_slide());
        deck.push(self.overview_slide()?);
        deck.push(revenue);

        debug!(company = %self.company.name, slides = deck.slides.len(), "Composed factpack");
        Ok(deck)
    }

    fn title_slide(&self) -> Slide {
        let mut slide = Slide::new();
        let name = &self.company.name;

        slide.add_text_box(
            TextBox::new(
                Rect::inches(0.75, 2.33, 8.5, 1.61),
                TextStyle::new(Alignment::Center).size(Pt(36.0)),
            )
            .text(format!("{name} - Factpack")),
        );

        let mut subtitle = vec![format!(
            "Created on {}",
            self.created_on.format("%B %d, %Y")
        )];
        if let Some(latest) = &self.company.latest_revenue {
            subtitle.push(format!("Data through Q{} {}", latest.quarter, latest.year));
        }
        slide.add_text_box(
            TextBox::new(
                Rect::inches(1.5, 4.25, 7.0, 1.25),
                TextStyle::new(Alignment::Center).size(Pt(18.0)),
            )
            .lines(subtitle),
        );

        if let Some(logo) = &self.logo {
            slide.add_picture(Picture::with_height(
                logo.clone(),
                Emu::inches(0.5),
                Emu::inches(0.5),
                Emu::inches(1.5),
                format!("{name} logo"),
            ));
        }
        if let Some(cover) = &self.cover {
            slide.add_picture(Picture::with_height(
                cover.clone(),
                Emu(0),
                Emu::inches(5.5),
                Emu::inches(2.0),
                "Cover",
            ));
        }
        slide
    }

    fn overview_slide(&self) -> Result<Slide> {
        let company = self.company;
        let mut slide = Slide::new();

        let heading = TextStyle::new(Alignment::Center).size(Pt(24.0));
        slide
            .add_text_box(
                TextBox::new(
                    Rect::inches(0.0, 0.5, 10.0, 1.0),
                    TextStyle::new(Alignment::Center).size(Pt(36.0)),
                )
                .text(format!("{} Introduction", company.name)),
            )
            .add_text_box(
                TextBox::new(Rect::inches(0.5, 1.5, 4.5, 1.0), heading).text("Company Summary"),
            );

        let splitter = SentenceSplitter::new()?;
        let sentences = splitter.split(company.description.as_deref().unwrap_or_default());
        slide
            .add_text_box(
                TextBox::new(
                    Rect::inches(0.5, 2.0, 4.5, 5.0),
                    TextStyle::new(Alignment::Left).size(Pt(10.0)),
                )
                .lines(sentences),
            )
            .add_text_box(
                TextBox::new(Rect::inches(5.0, 1.5, 4.5, 1.0), heading).text("Company Facts"),
            );

        let mut facts = TextBox::new(
            Rect::inches(5.0, 2.0, 4.5, 5.0),
            TextStyle::new(Alignment::Left)
                .size(Pt(10.0))
                .space_after(Pt(10.0)),
        );
        for (label, value) in overview_facts(company) {
            facts = facts.rich(fact_runs(label, value));
        }
        slide.add_text_box(facts);
        Ok(slide)
    }

    fn revenue_slide(&self) -> Result<Slide> {
        let company = &self.company.name;
        let metric = &self.metric.name;
        let series = self.metric.primary_series();

        let ranking = PeerRanking::from_series(series, company, metric)?;
        let history = LastThreeYears::from_series(series, company, metric)?;
        let as_of = self.analysis_quarter()?;

        let mut slide = Slide::new();
        slide
            .add_text_box(
                TextBox::new(
                    Rect::inches(0.0, 0.25, 10.0, 0.5),
                    TextStyle::new(Alignment::Center).size(Pt(36.0)),
                )
                .text(format!("{company} {metric} Metrics")),
            )
            .add_text_box(
                TextBox::new(
                    Rect::inches(0.5, 1.0, 9.0, 1.0),
                    TextStyle::new(Alignment::Center).size(Pt(10.0)),
                )
                .text(self.metric.flat_description()),
            );

        // left: the company against the peer median
        let history_chart = Chart::new(ChartKind::ColumnClustered, history.categories.clone())
            .series(Series::new(company.as_str(), history.company_values.clone()))
            .series(Series::new("Medians", history.medians.clone()));
        slide.add_chart(
            Rect::inches(0.5, 2.5, 4.5, 4.0),
            styled(history_chart).legend(LegendPosition::Bottom, Pt(12.0)),
        );

        let (first_label, first_value) = history.first();
        let (last_label, last_value) = history.last();
        section_text(
            &mut slide,
            0.5,
            "Revenues (last 3 years)",
            format!("{first_label} - {last_label}"),
            format!(
                "{company} {metric} {} from USD{first_value}B in FY{first_label} to USD{last_value}B at the end of Q{} FY{}.",
                history.trend(),
                as_of.quarter,
                as_of.year
            ),
        );

        // right: latest values of every peer
        let peers_chart = Chart::new(ChartKind::BarClustered, ranking.names())
            .series(Series::new("Latest Values", ranking.values()));
        slide.add_chart(Rect::inches(5.25, 2.5, 4.5, 4.0), styled(peers_chart));

        section_text(
            &mut slide,
            5.25,
            "Latest revenues vs. peers",
            ranking.period_label.clone(),
            format!(
                "{company} {metric} is in the {} quartile of the peer group over the {}.",
                ranking.quartile(),
                period_phrase(&ranking.period)
            ),
        );

        debug!(
            company = %company,
            position = ranking.position,
            peers = ranking.count(),
            quartile = %ranking.quartile(),
            trend = %history.trend(),
            "Computed revenue analytics"
        );
        Ok(slide)
    }

    /// Quarter the three-year analysis runs up to
    fn analysis_quarter(&self) -> Result<QuarterRef> {
        let company = self.company;
        company
            .latest_revenue_growth
            .or_else(|| company.latest_revenue.as_ref().map(|r| r.period()))
            .ok_or_else(|| {
                Error::MissingData {
                    metric: self.metric.name.clone(),
                    reason: format!("{} reports no latest quarter", company.name),
                }
                .into()
            })
    }
}

/// Shared display options of both revenue charts
fn styled(chart: Chart) -> Chart {
    chart
        .data_labels(Pt(8.0), LabelPosition::OutsideEnd)
        .category_font_size(Pt(8.0))
        .value_font_size(Pt(12.0))
        .hide_value_axis()
}

/// Heading, unit sub-header and analysis line around one chart
fn section_text(slide: &mut Slide, left: f64, title: &str, range: String, analysis: String) {
    let body = TextStyle::new(Alignment::Left).size(Pt(14.0));
    slide
        .add_text_box(
            TextBox::new(
                Rect::inches(left, 1.5, 4.5, 0.5),
                TextStyle::new(Alignment::Left).size(Pt(24.0)),
            )
            .text(title),
        )
        .add_text_box(
            TextBox::new(Rect::inches(left, 2.0, 4.5, 0.5), body)
                .rich(vec![Run::new(REVENUE_UNIT).bold(true).size(Pt(14.0))])
                .rich(vec![Run::new(range).bold(false).size(Pt(12.0))]),
        )
        .add_text_box(TextBox::new(Rect::inches(left, 6.5, 4.5, 0.5), body).text(analysis));
}

enum FactValue {
    Plain(String),
    Link(String),
}

fn overview_facts(company: &Company) -> Vec<(&'static str, FactValue)> {
    let plain = |value: Option<String>| {
        FactValue::Plain(value.unwrap_or_else(|| NOT_AVAILABLE.to_string()))
    };

    vec![
        (
            "Revenue",
            plain(
                company
                    .latest_revenue
                    .as_ref()
                    .map(|r| format!("US$ {} bn", r.value_usd)),
            ),
        ),
        ("Employees", plain(company.employee_count().map(group_thousands))),
        ("Currency", plain(company.currency.clone())),
        ("Type", plain(company.company_type.clone())),
        (
            "Website",
            match &company.website {
                Some(url) if !url.is_empty() => FactValue::Link(url.clone()),
                _ => plain(None),
            },
        ),
        ("Headquarters", plain(company.address.clone())),
        ("Current Quarter", plain(company.current_quarter_text())),
        (
            "Current Quarter Ends",
            plain(company.quarter_end_date().map(str::to_string)),
        ),
        (
            "Fiscal Year End",
            plain(company.fiscal_year_end.and_then(month_name).map(str::to_string)),
        ),
    ]
}

fn fact_runs(label: &str, value: FactValue) -> Vec<Run> {
    let label = Run::new(format!("{label}: ")).bold(true);
    let value = match value {
        FactValue::Plain(text) => Run::new(text).bold(false),
        FactValue::Link(url) => Run::new(url.clone()).bold(false).hyperlink(url),
    };
    vec![label, value]
}

fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok()?;
    Month::try_from(month).ok().map(|m| m.name())
}

/// `1234567` -> `1,234,567`
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
