use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use std::io;

/// Every public route of the site, root first.
pub const SITE_ROUTES: &[&str] = &["", "/about", "/services", "/work", "/contact"];

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

fn weighting(route: &str) -> (f32, ChangeFrequency) {
    match route {
        "" | "/" => (1.0, ChangeFrequency::Weekly),
        "/contact" => (0.9, ChangeFrequency::Monthly),
        _ => (0.8, ChangeFrequency::Monthly),
    }
}

pub fn build_sitemap(base_url: &str, routes: &[&str], now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let base = base_url.trim_end_matches('/');
    routes
        .iter()
        .map(|route| {
            let (priority, change_frequency) = weighting(route);
            SitemapEntry {
                url: format!("{}{}", base, route),
                last_modified: now,
                change_frequency,
                priority,
            }
        })
        .collect()
}

pub fn render_xml(entries: &[SitemapEntry]) -> io::Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer
        .create_element("urlset")
        .with_attribute(("xmlns", SITEMAP_NS))
        .write_inner_content(|w| {
            for entry in entries {
                w.create_element("url").write_inner_content(|w| {
                    w.create_element("loc")
                        .write_text_content(BytesText::new(&entry.url))?;
                    w.create_element("lastmod").write_text_content(BytesText::new(
                        &entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true),
                    ))?;
                    w.create_element("changefreq")
                        .write_text_content(BytesText::new(entry.change_frequency.as_str()))?;
                    w.create_element("priority")
                        .write_text_content(BytesText::new(&format!("{:.1}", entry.priority)))?;
                    Ok(())
                })?;
            }
            Ok(())
        })?;

    String::from_utf8(writer.into_inner()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

pub fn robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: {}/sitemap.xml\n",
        base_url.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn root_contact_and_other_routes_are_weighted() {
        let entries = build_sitemap("https://arclight.studio", &["", "/about", "/contact"], fixed_now());

        assert_eq!(entries[0].url, "https://arclight.studio");
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[0].change_frequency, ChangeFrequency::Weekly);

        assert_eq!(entries[1].url, "https://arclight.studio/about");
        assert_eq!(entries[1].priority, 0.8);
        assert_eq!(entries[1].change_frequency, ChangeFrequency::Monthly);

        assert_eq!(entries[2].url, "https://arclight.studio/contact");
        assert_eq!(entries[2].priority, 0.9);
        assert_eq!(entries[2].change_frequency, ChangeFrequency::Monthly);
    }

    #[test]
    fn one_entry_per_known_route() {
        let entries = build_sitemap("https://arclight.studio/", SITE_ROUTES, fixed_now());
        assert_eq!(entries.len(), SITE_ROUTES.len());
        assert!(entries.iter().all(|e| e.last_modified == fixed_now()));
        assert_eq!(entries[1].url, "https://arclight.studio/about");
    }

    #[test]
    fn json_records_use_camel_case() {
        let entries = build_sitemap("https://arclight.studio", &[""], fixed_now());
        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["changeFrequency"], "weekly");
        assert_eq!(json["lastModified"], "2024-03-01T12:00:00Z");
        assert_eq!(json["priority"], 1.0);
    }

    #[test]
    fn xml_lists_every_url() {
        let entries = build_sitemap("https://arclight.studio", &["", "/contact"], fixed_now());
        let xml = render_xml(&entries).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(SITEMAP_NS));
        assert!(xml.contains("<loc>https://arclight.studio/contact</loc>"));
        assert!(xml.contains("<lastmod>2024-03-01T12:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.9</priority>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn robots_points_at_sitemap() {
        let robots = robots_txt("https://arclight.studio/");
        assert!(robots.contains("Disallow: /api/"));
        assert!(robots.ends_with("Sitemap: https://arclight.studio/sitemap.xml\n"));
    }
}
