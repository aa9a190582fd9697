//! Peer analytics behind the revenue slide
//!
//! Everything here is computed from the first chart block of a metric: the
//! company series together with the series of its peers.

use deckbot_core::{CompanySeries, Error, Result};
use std::cmp::Ordering;
use std::fmt;

/// Group tag marking the points of the three-year comparison
pub const LAST_THREE_YEARS: &str = "Last 3 years";

/// Quartile of a company within its peer group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quartile {
    Top,
    Second,
    Third,
    Last,
}

impl Quartile {
    /// Bucket a rank fraction in `(0, 1]`, where 1 is the largest value
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction > 0.75 {
            Quartile::Top
        } else if fraction > 0.5 {
            Quartile::Second
        } else if fraction > 0.25 {
            Quartile::Third
        } else {
            Quartile::Last
        }
    }

    /// Bucket a 1-based ascending rank among `count` peers
    pub fn from_rank(position: usize, count: usize) -> Self {
        if count == 0 {
            return Quartile::Last;
        }
        Self::from_fraction(position as f64 / count as f64)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quartile::Top => "top",
            Quartile::Second => "second",
            Quartile::Third => "third",
            Quartile::Last => "last",
        }
    }
}

impl fmt::Display for Quartile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a series between its first and last value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Grew,
    HeldSteady,
    Fell,
}

impl Trend {
    pub fn between(first: f64, last: f64) -> Self {
        match last.partial_cmp(&first) {
            Some(Ordering::Greater) => Trend::Grew,
            Some(Ordering::Equal) => Trend::HeldSteady,
            _ => Trend::Fell,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Grew => "grew",
            Trend::HeldSteady => "held steady",
            Trend::Fell => "fell",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Median of the values; the mean of the middle pair for even counts
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Plain-English name of a period code
pub fn period_phrase(code: &str) -> &str {
    match code {
        "ltm" => "last twelve months",
        "y" => "year",
        other => other,
    }
}

/// Latest value of every peer, ranked ascending
#[derive(Debug, Clone, PartialEq)]
pub struct PeerRanking {
    /// `(company, latest value)` sorted by value, smallest first
    pub entries: Vec<(String, f64)>,
    /// 1-based position of the subject company in `entries`
    pub position: usize,
    /// Period code of the latest values, e.g. `ltm`
    pub period: String,
    /// Display label of the latest period, e.g. `LTM Q3 2019`
    pub period_label: String,
}

impl PeerRanking {
    /// Rank the first data point of every series
    ///
    /// The period is taken from the first series that has data. Series
    /// without data points are left out of the ranking.
    pub fn from_series(series: &[CompanySeries], company: &str, metric: &str) -> Result<Self> {
        let mut entries: Vec<(String, f64)> = Vec::with_capacity(series.len());
        let mut period = None;

        for s in series {
            let Some(latest) = s.data.first() else {
                continue;
            };
            if period.is_none() {
                period = Some((latest.period.clone(), latest.label.clone()));
            }
            entries.push((s.name.clone(), latest.value));
        }

        let Some((period, period_label)) = period else {
            return Err(Error::MissingData {
                metric: metric.to_string(),
                reason: "no peer has a latest value".to_string(),
            });
        };

        entries.sort_by(|a, b| a.1.total_cmp(&b.1));

        let position = entries
            .iter()
            .position(|(name, _)| name == company)
            .map(|idx| idx + 1)
            .ok_or_else(|| Error::CompanyNotInPeers {
                company: company.to_string(),
                metric: metric.to_string(),
            })?;

        Ok(Self {
            entries,
            position,
            period,
            period_label,
        })
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn quartile(&self) -> Quartile {
        Quartile::from_rank(self.position, self.count())
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, value)| *value).collect()
    }
}

/// The company's last three fiscal years against the peer median
#[derive(Debug, Clone, PartialEq)]
pub struct LastThreeYears {
    /// Period labels, oldest first
    pub categories: Vec<String>,
    pub company_values: Vec<f64>,
    pub medians: Vec<f64>,
}

impl LastThreeYears {
    /// Collect the points tagged [`LAST_THREE_YEARS`]
    ///
    /// The API lists periods newest first; categories are reversed into
    /// chronological order. Medians include the company itself and skip
    /// peers that did not report a period.
    pub fn from_series(series: &[CompanySeries], company: &str, metric: &str) -> Result<Self> {
        let subject = series
            .iter()
            .find(|s| s.name == company)
            .ok_or_else(|| Error::CompanyNotInPeers {
                company: company.to_string(),
                metric: metric.to_string(),
            })?;

        let mut points: Vec<(String, f64)> = Vec::new();
        for point in subject.data.iter().filter(|p| p.in_group(LAST_THREE_YEARS)) {
            if !points.iter().any(|(label, _)| *label == point.label) {
                points.push((point.label.clone(), point.value));
            }
        }
        points.reverse();

        if points.is_empty() {
            return Err(Error::MissingData {
                metric: metric.to_string(),
                reason: format!("{company} has no '{LAST_THREE_YEARS}' points"),
            });
        }

        let mut medians = Vec::with_capacity(points.len());
        for (label, company_value) in &points {
            let values: Vec<f64> = series
                .iter()
                .filter_map(|s| {
                    s.data
                        .iter()
                        .find(|p| p.in_group(LAST_THREE_YEARS) && p.label == *label)
                        .map(|p| p.value)
                })
                .collect();
            medians.push(median(&values).unwrap_or(*company_value));
        }

        let (categories, company_values) = points.into_iter().unzip();
        Ok(Self {
            categories,
            company_values,
            medians,
        })
    }

    pub fn first(&self) -> (&str, f64) {
        (self.categories[0].as_str(), self.company_values[0])
    }

    pub fn last(&self) -> (&str, f64) {
        let idx = self.categories.len() - 1;
        (self.categories[idx].as_str(), self.company_values[idx])
    }

    pub fn trend(&self) -> Trend {
        Trend::between(self.first().1, self.last().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckbot_core::DataPoint;

    fn point(value: f64, label: &str, period: &str, groups: &[&str]) -> DataPoint {
        DataPoint {
            value,
            label: label.to_string(),
            period: period.to_string(),
            groups: groups.iter().map(|g| (*g).to_string()).collect(),
        }
    }

    fn series(name: &str, latest: f64, years: [f64; 3]) -> CompanySeries {
        CompanySeries {
            name: name.to_string(),
            data: vec![
                point(latest, "LTM Q3 2019", "ltm", &[]),
                point(years[2], "2018", "y", &[LAST_THREE_YEARS]),
                point(years[1], "2017", "y", &[LAST_THREE_YEARS]),
                point(years[0], "2016", "y", &[LAST_THREE_YEARS]),
            ],
        }
    }

    fn peers() -> Vec<CompanySeries> {
        vec![
            series("Apple", 260.2, [215.6, 229.2, 265.6]),
            series("Amazon", 265.0, [136.0, 177.9, 232.9]),
            series("Facebook", 66.5, [27.6, 40.7, 55.8]),
            series("Accenture", 43.2, [34.8, 36.8, 41.6]),
        ]
    }

    #[test]
    fn test_quartile_buckets() {
        assert_eq!(Quartile::from_fraction(1.0), Quartile::Top);
        assert_eq!(Quartile::from_fraction(0.76), Quartile::Top);
        assert_eq!(Quartile::from_fraction(0.75), Quartile::Second);
        assert_eq!(Quartile::from_fraction(0.5), Quartile::Third);
        assert_eq!(Quartile::from_fraction(0.26), Quartile::Third);
        assert_eq!(Quartile::from_fraction(0.25), Quartile::Last);
        assert_eq!(Quartile::from_rank(0, 0), Quartile::Last);
        assert_eq!(Quartile::Second.to_string(), "second");
    }

    #[test]
    fn test_trend() {
        assert_eq!(Trend::between(1.0, 2.0), Trend::Grew);
        assert_eq!(Trend::between(2.0, 2.0), Trend::HeldSteady);
        assert_eq!(Trend::between(2.0, 1.0), Trend::Fell);
        assert_eq!(Trend::HeldSteady.to_string(), "held steady");
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[3.0]), Some(3.0));
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_period_phrase() {
        assert_eq!(period_phrase("ltm"), "last twelve months");
        assert_eq!(period_phrase("y"), "year");
        assert_eq!(period_phrase("q"), "q");
    }

    #[test]
    fn test_peer_ranking() {
        let ranking = PeerRanking::from_series(&peers(), "Apple", "Revenue").unwrap();

        assert_eq!(
            ranking.names(),
            vec!["Accenture", "Facebook", "Apple", "Amazon"]
        );
        assert_eq!(ranking.position, 3);
        assert_eq!(ranking.quartile(), Quartile::Second);
        assert_eq!(ranking.period, "ltm");
        assert_eq!(ranking.period_label, "LTM Q3 2019");

        let top = PeerRanking::from_series(&peers(), "Amazon", "Revenue").unwrap();
        assert_eq!(top.quartile(), Quartile::Top);
        let bottom = PeerRanking::from_series(&peers(), "Accenture", "Revenue").unwrap();
        assert_eq!(bottom.quartile(), Quartile::Last);
    }

    #[test]
    fn test_peer_ranking_unknown_company() {
        let err = PeerRanking::from_series(&peers(), "Heineken", "Revenue").unwrap_err();
        assert!(matches!(err, Error::CompanyNotInPeers { .. }));
    }

    #[test]
    fn test_peer_ranking_no_data() {
        let empty = vec![CompanySeries {
            name: "Apple".to_string(),
            data: vec![],
        }];
        let err = PeerRanking::from_series(&empty, "Apple", "Revenue").unwrap_err();
        assert!(matches!(err, Error::MissingData { .. }));
    }

    #[test]
    fn test_last_three_years() {
        let years = LastThreeYears::from_series(&peers(), "Apple", "Revenue").unwrap();

        assert_eq!(years.categories, vec!["2016", "2017", "2018"]);
        assert_eq!(years.company_values, vec![215.6, 229.2, 265.6]);
        // medians of four companies: mean of the middle pair
        assert_eq!(years.medians[0], (34.8 + 136.0) / 2.0);
        assert_eq!(years.first(), ("2016", 215.6));
        assert_eq!(years.last(), ("2018", 265.6));
        assert_eq!(years.trend(), Trend::Grew);
    }

    #[test]
    fn test_last_three_years_missing_peer_period() {
        let mut data = peers();
        data[1].data.retain(|p| p.label != "2016");

        let years = LastThreeYears::from_series(&data, "Apple", "Revenue").unwrap();
        // Apple, Facebook, Accenture remain for 2016
        assert_eq!(years.medians[0], 34.8);
    }

    #[test]
    fn test_last_three_years_without_group() {
        let data = vec![CompanySeries {
            name: "Apple".to_string(),
            data: vec![point(1.0, "LTM", "ltm", &[])],
        }];
        let err = LastThreeYears::from_series(&data, "Apple", "Revenue").unwrap_err();
        assert!(matches!(err, Error::MissingData { .. }));
    }
}
