use serde_json::{json, Value};

pub const ORGANIZATION_NAME: &str = "Arclight Studio";
pub const CONTACT_EMAIL: &str = "hello@arclight.studio";

pub const SERVICE_OFFERINGS: [(&str, &str); 3] = [
    (
        "Web Development",
        "Fast, accessible websites and web applications built to last.",
    ),
    (
        "Mobile Apps",
        "Native and cross-platform apps for iOS and Android.",
    ),
    (
        "Digital Strategy",
        "Product discovery, roadmapping and growth planning.",
    ),
];

/// schema.org Organization document embedded as JSON-LD on every page.
pub fn organization_schema(site_base: &str) -> Value {
    let site_base = site_base.trim_end_matches('/');
    let offers: Vec<Value> = SERVICE_OFFERINGS
        .iter()
        .map(|(name, description)| {
            json!({
                "@type": "Offer",
                "itemOffered": {
                    "@type": "Service",
                    "name": name,
                    "description": description,
                }
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": ORGANIZATION_NAME,
        "url": site_base,
        "logo": format!("{}/assets/logo.png", site_base),
        "sameAs": [
            "https://github.com/arclight-studio",
            "https://www.linkedin.com/company/arclight-studio",
        ],
        "hasOfferCatalog": {
            "@type": "OfferCatalog",
            "name": "Services",
            "itemListElement": offers,
        },
        "contactPoint": {
            "@type": "ContactPoint",
            "contactType": "customer service",
            "email": CONTACT_EMAIL,
            "url": format!("{}/contact", site_base),
            "availableLanguage": ["English"],
        }
    })
}
