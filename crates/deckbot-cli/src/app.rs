//! Factpack run orchestration

use crate::picker::CompanyPicker;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use deckbot_api::{CompanySource, sample_companies};
use deckbot_core::{Company, Error, MetricRef};
use deckbot_deck::{DeckError, Factpack, Image, PptxWriter};
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the metric the revenue slide is built from
pub const REVENUE_METRIC: &str = "Revenue";

/// File looked up in the assets directory for the title slide
pub const COVER_IMAGE: &str = "cover.jpg";

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Skip selection and build the deck for this company
    pub company_id: Option<String>,
    /// Offer the built-in sample list instead of fetching the company list
    pub offline: bool,
    pub output_dir: PathBuf,
    pub assets_dir: PathBuf,
    /// Date printed on the title slide
    pub created_on: NaiveDate,
}

/// Fetches one company's records and exports its factpack
pub struct Deckbot<S> {
    source: S,
    options: RunOptions,
}

impl<S: CompanySource> Deckbot<S> {
    pub fn new(source: S, options: RunOptions) -> Self {
        Self { source, options }
    }

    /// Run once: select a company, compose its deck and write it to disk
    ///
    /// Returns the path of the written file.
    pub async fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<PathBuf> {
        let company_id = match &self.options.company_id {
            Some(id) => id.clone(),
            None => self.select_company(input, &mut output).await?,
        };

        let company = self
            .source
            .company_overview(&company_id)
            .await
            .with_context(|| format!("Failed to fetch overview of company {company_id}"))?;
        info!(company = %company.name, "Building factpack");

        let metrics = self
            .source
            .company_metrics(&company_id)
            .await
            .with_context(|| format!("Failed to fetch metrics of {}", company.name))?;
        let revenue = find_metric(&metrics, REVENUE_METRIC)?;
        let detail = self
            .source
            .metric_detail(&company_id, &revenue.id)
            .await
            .with_context(|| format!("Failed to fetch {} data of {}", revenue.name, company.name))?;

        let logo = self.logo(&company).await;
        let cover = self.cover();

        let deck = Factpack::new(&company, &detail, self.options.created_on)
            .logo(logo)
            .cover(cover)
            .compose()
            .with_context(|| format!("Failed to compose the factpack of {}", company.name))?;

        fs::create_dir_all(&self.options.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.options.output_dir.display()
            )
        })?;
        let path = output_path(&self.options.output_dir, &company.name);
        PptxWriter::new()
            .save(&deck, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!(path = %path.display(), "Factpack written");
        writeln!(output, "Please find your file at {}", path.display())?;
        Ok(path)
    }

    async fn select_company<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<String> {
        let companies = if self.options.offline {
            sample_companies()
        } else {
            self.source
                .list_companies()
                .await
                .context("Failed to fetch the company list")?
        };
        debug!(count = companies.len(), offline = self.options.offline, "Company list ready");

        let mut picker = CompanyPicker::new(input, output);
        let company = picker.select(&companies)?;
        Ok(company.id.clone())
    }

    /// Download and decode the company logo; failures only cost the logo
    async fn logo(&self, company: &Company) -> Option<Image> {
        let url = company.logo_url.as_deref().filter(|u| !u.is_empty())?;
        let bytes = match self.source.fetch_asset(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(url, error = %e, "Could not retrieve logo, skipping it");
                return None;
            }
        };
        match Image::from_bytes(bytes) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!(url, error = %e, "Logo is not a usable image, skipping it");
                None
            }
        }
    }

    fn cover(&self) -> Option<Image> {
        let path = self.options.assets_dir.join(COVER_IMAGE);
        if !path.exists() {
            debug!(path = %path.display(), "No cover image");
            return None;
        }
        match fs::read(&path)
            .map_err(DeckError::from)
            .and_then(Image::from_bytes)
        {
            Ok(image) => Some(image),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not load cover image, skipping it");
                None
            }
        }
    }
}

fn find_metric<'m>(metrics: &'m [MetricRef], name: &str) -> Result<&'m MetricRef, Error> {
    metrics
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| Error::MissingMetric(name.to_string()))
}

/// Company name made safe to use as a file name
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim().trim_matches('.');
    if stem.is_empty() {
        "factpack".to_string()
    } else {
        stem.to_string()
    }
}

/// Where the deck of a company is written inside `dir`
pub fn output_path(dir: &Path, company_name: &str) -> PathBuf {
    dir.join(format!("{}.pptx", file_stem(company_name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use deckbot_api::{ApiError, Result as ApiResult};
    use deckbot_core::{CompanyRef, MetricDetail};
    use mockall::mock;
    use serde_json::json;
    use std::io::{Cursor, Read};

    mock! {
        pub Source {}

        #[async_trait]
        impl CompanySource for Source {
            async fn list_companies(&self) -> ApiResult<Vec<CompanyRef>>;
            async fn company_overview(&self, company_id: &str) -> ApiResult<Company>;
            async fn company_metrics(&self, company_id: &str) -> ApiResult<Vec<MetricRef>>;
            async fn metric_detail(&self, company_id: &str, metric_id: &str) -> ApiResult<MetricDetail>;
            async fn fetch_asset(&self, url: &str) -> ApiResult<Vec<u8>>;
        }
    }

    fn overview() -> Company {
        serde_json::from_value(json!({
            "_id": "c1",
            "name": "Delta Air Lines",
            "description": "Delta flies planes. It is based in Atlanta.",
            "logoUrl": "https://cdn.example.com/delta.png",
            "latestRevenue": {"quarter": 4, "year": 2019, "valueUSD": 47.0},
            "latestRevenueGrowth": {"quarter": 4, "year": 2019},
            "employees": 0.09,
            "currency": "USD",
            "type": "Public",
            "website": "https://delta.com",
            "address": "Atlanta, GA",
            "currentQuarter": 1,
            "quarterEnd": "2020-03-31T00:00:00.000Z",
            "fiscalYearEnd": 12
        }))
        .unwrap()
    }

    fn revenue_detail() -> MetricDetail {
        let series = |name: &str, values: [f64; 3]| {
            json!({
                "name": name,
                "data": [
                    {"value": values[0], "label": "LTM Q4 2019", "period": "ltm", "groups": []},
                    {"value": values[0], "label": "2019", "period": "y", "groups": ["Last 3 years"]},
                    {"value": values[1], "label": "2018", "period": "y", "groups": ["Last 3 years"]},
                    {"value": values[2], "label": "2017", "period": "y", "groups": ["Last 3 years"]}
                ]
            })
        };
        serde_json::from_value(json!({
            "_id": "m-rev",
            "name": "Revenue",
            "description": "Revenue of the airline",
            "chart": [{"companies": [
                series("Delta Air Lines", [47.0, 44.4, 41.2]),
                series("United", [43.3, 41.3, 38.0]),
                series("Ryanair", [9.0, 8.5, 7.6])
            ]}]
        }))
        .unwrap()
    }

    fn metrics() -> Vec<MetricRef> {
        vec![
            MetricRef {
                id: "m-emp".to_string(),
                name: "Employees".to_string(),
            },
            MetricRef {
                id: "m-rev".to_string(),
                name: "Revenue".to_string(),
            },
        ]
    }

    fn options(dir: &Path) -> RunOptions {
        RunOptions {
            company_id: None,
            offline: false,
            output_dir: dir.join("exports"),
            assets_dir: dir.join("assets"),
            created_on: NaiveDate::from_ymd_opt(2020, 4, 7).unwrap(),
        }
    }

    fn expect_deck_records(source: &mut MockSource) {
        source
            .expect_company_overview()
            .withf(|id| id == "c1")
            .times(1)
            .returning(|_| Ok(overview()));
        source
            .expect_company_metrics()
            .withf(|id| id == "c1")
            .returning(|_| Ok(metrics()));
        source
            .expect_metric_detail()
            .withf(|company, metric| company == "c1" && metric == "m-rev")
            .times(1)
            .returning(|_, _| Ok(revenue_detail()));
    }

    #[tokio::test]
    async fn test_run_with_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = MockSource::new();
        source.expect_list_companies().times(1).returning(|| {
            Ok(vec![
                CompanyRef::new("a1", "Apple"),
                CompanyRef::new("c1", "Delta Air Lines"),
            ])
        });
        expect_deck_records(&mut source);
        source
            .expect_fetch_asset()
            .returning(|_| Err(ApiError::UnexpectedStatus {
                status: 404,
                path: "/delta.png".to_string(),
            }));

        let bot = Deckbot::new(source, options(dir.path()));
        let mut output = Vec::new();
        let path = bot.run(Cursor::new(b"2\n".to_vec()), &mut output).await.unwrap();

        assert_eq!(path, dir.path().join("exports").join("Delta Air Lines.pptx"));
        assert!(path.exists());

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Enter a Number to select a Company\n[1] - Apple\n"));
        assert!(output.ends_with(&format!("Please find your file at {}\n", path.display())));
    }

    #[tokio::test]
    async fn test_run_with_company_id_skips_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = MockSource::new();
        source.expect_list_companies().never();
        expect_deck_records(&mut source);
        source
            .expect_fetch_asset()
            .withf(|url| url == "https://cdn.example.com/delta.png")
            .returning(|_| Ok(b"not an image".to_vec()));

        let mut opts = options(dir.path());
        opts.company_id = Some("c1".to_string());
        let bot = Deckbot::new(source, opts);
        let mut output = Vec::new();
        let path = bot.run(Cursor::new(Vec::new()), &mut output).await.unwrap();

        let mut archive = zip::ZipArchive::new(fs::File::open(&path).unwrap()).unwrap();
        let mut slide = String::new();
        archive
            .by_name("ppt/slides/slide3.xml")
            .unwrap()
            .read_to_string(&mut slide)
            .unwrap();
        assert!(slide.contains("Delta Air Lines Revenue Metrics"));
        assert!(archive.by_name("ppt/media/image1.png").is_err());
    }

    async fn run_with_cover(cover: &[u8]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join(COVER_IMAGE), cover).unwrap();

        let mut source = MockSource::new();
        expect_deck_records(&mut source);
        source.expect_fetch_asset().returning(|_| {
            Err(ApiError::UnexpectedStatus {
                status: 404,
                path: "/delta.png".to_string(),
            })
        });

        let mut opts = options(dir.path());
        opts.company_id = Some("c1".to_string());
        let path = Deckbot::new(source, opts)
            .run(Cursor::new(Vec::new()), Vec::new())
            .await
            .unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn test_run_embeds_cover() {
        let mut jpeg = Cursor::new(Vec::new());
        image::DynamicImage::new_rgb8(400, 200)
            .write_to(&mut jpeg, image::ImageFormat::Jpeg)
            .unwrap();
        let (_dir, path) = run_with_cover(jpeg.get_ref()).await;

        let mut archive = zip::ZipArchive::new(fs::File::open(&path).unwrap()).unwrap();
        let media: Vec<String> = archive
            .file_names()
            .filter(|name| name.starts_with("ppt/media/"))
            .map(str::to_string)
            .collect();
        assert_eq!(media, vec!["ppt/media/image1.jpeg".to_string()]);

        let mut rels = String::new();
        archive
            .by_name("ppt/slides/_rels/slide1.xml.rels")
            .unwrap()
            .read_to_string(&mut rels)
            .unwrap();
        assert!(rels.contains("../media/image1.jpeg"));
    }

    #[tokio::test]
    async fn test_run_skips_unreadable_cover() {
        let (_dir, path) = run_with_cover(b"not a jpeg").await;

        assert!(path.exists());
        let archive = zip::ZipArchive::new(fs::File::open(&path).unwrap()).unwrap();
        assert!(!archive.file_names().any(|name| name.starts_with("ppt/media/")));
    }

    #[tokio::test]
    async fn test_offline_uses_sample_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = MockSource::new();
        source.expect_list_companies().never();
        source
            .expect_company_overview()
            .withf(|id| id == "58080ff4ebbf470003ca9f7b")
            .returning(|_| Err(ApiError::Rejected {
                path: "/api/companies/58080ff4ebbf470003ca9f7b".to_string(),
            }));

        let mut opts = options(dir.path());
        opts.offline = true;
        let bot = Deckbot::new(source, opts);
        let mut output = Vec::new();
        let err = bot
            .run(Cursor::new(b"1\n".to_vec()), &mut output)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to fetch overview"));
        assert!(String::from_utf8(output).unwrap().contains("[1] - Apple"));
    }

    #[tokio::test]
    async fn test_missing_revenue_metric() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = MockSource::new();
        source.expect_company_overview().returning(|_| Ok(overview()));
        source.expect_company_metrics().returning(|_| {
            Ok(vec![MetricRef {
                id: "m-emp".to_string(),
                name: "Employees".to_string(),
            }])
        });
        source.expect_metric_detail().never();

        let mut opts = options(dir.path());
        opts.company_id = Some("c1".to_string());
        let err = Deckbot::new(source, opts)
            .run(Cursor::new(Vec::new()), Vec::new())
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::MissingMetric("Revenue".to_string()))
        );
        assert!(!dir.path().join("exports").exists());
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Apple"), "Apple");
        assert_eq!(file_stem("A.G. Barr"), "A.G. Barr");
        assert_eq!(file_stem("AT&T / Mobility"), "AT&T _ Mobility");
        assert_eq!(file_stem("..."), "factpack");
        assert_eq!(
            output_path(Path::new("exports"), "Who? Co"),
            Path::new("exports").join("Who_ Co.pptx")
        );
    }
}
