//! XML helpers shared by the part writers

pub(crate) const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub(crate) const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub(crate) const NS_C: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";

const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Relationship type URIs
pub(crate) mod rel {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    pub const SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
    pub const SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    pub const SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
    pub const PRES_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
    pub const VIEW_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps";
    pub const TABLE_STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";
    pub const CHART: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart";
    pub const IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    pub const HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
}

/// Escape text for element content and attribute values
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // not representable in XML 1.0
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {}
            c => out.push(c),
        }
    }
    out
}

struct Relationship {
    id: String,
    rel_type: &'static str,
    target: String,
    external: bool,
}

/// Relationships of one part, numbered `rId1`, `rId2`, ...
#[derive(Default)]
pub(crate) struct Relationships {
    items: Vec<Relationship>,
}

impl Relationships {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, rel_type: &'static str, target: String, external: bool) -> String {
        let id = format!("rId{}", self.items.len() + 1);
        self.items.push(Relationship {
            id: id.clone(),
            rel_type,
            target,
            external,
        });
        id
    }

    /// Add a relationship to another part and return its id
    pub(crate) fn add(&mut self, rel_type: &'static str, target: impl Into<String>) -> String {
        self.push(rel_type, target.into(), false)
    }

    /// Add a relationship to an external URL, reusing an existing one
    pub(crate) fn add_external(&mut self, rel_type: &'static str, url: &str) -> String {
        if let Some(existing) = self
            .items
            .iter()
            .find(|r| r.external && r.rel_type == rel_type && r.target == url)
        {
            return existing.id.clone();
        }
        self.push(rel_type, url.to_string(), true)
    }

    pub(crate) fn to_xml(&self) -> String {
        let mut xml = format!(r#"{XML_DECL}<Relationships xmlns="{NS_PKG_RELS}">"#);
        for r in &self.items {
            let mode = if r.external {
                r#" TargetMode="External""#
            } else {
                ""
            };
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"{mode}/>"#,
                r.id,
                r.rel_type,
                escape(&r.target)
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("A&B <c> \"d\" 'e'"), "A&amp;B &lt;c&gt; &quot;d&quot; &apos;e&apos;");
        assert_eq!(escape("bell\u{7}"), "bell");
    }

    #[test]
    fn test_relationships() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add(rel::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"), "rId1");
        assert_eq!(rels.add_external(rel::HYPERLINK, "https://a.com/?x=1&y=2"), "rId2");
        assert_eq!(rels.add_external(rel::HYPERLINK, "https://a.com/?x=1&y=2"), "rId2");

        let xml = rels.to_xml();
        assert!(xml.contains(r#"Target="https://a.com/?x=1&amp;y=2" TargetMode="External""#));
        assert!(xml.contains(r#"Id="rId1""#));
    }
}
