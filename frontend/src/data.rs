//! Static site copy.

#[derive(Debug, PartialEq)]
pub struct Service {
    pub title: &'static str,
    pub summary: &'static str,
    pub deliverables: &'static [&'static str],
}

#[derive(Debug, PartialEq)]
pub struct CaseStudy {
    pub client: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub image: &'static str,
    pub tags: &'static [&'static str],
}

#[derive(Debug, PartialEq)]
pub struct Principle {
    pub title: &'static str,
    pub body: &'static str,
}

pub const SERVICES: &[Service] = &[
    Service {
        title: "Web Development",
        summary: "Fast, accessible sites and web apps built on modern stacks.",
        deliverables: &["Marketing sites", "Web applications", "Headless CMS integration", "Performance audits"],
    },
    Service {
        title: "Mobile Apps",
        summary: "Native-feeling iOS and Android apps from a single codebase.",
        deliverables: &["Product prototyping", "Cross-platform apps", "App store launch", "Ongoing releases"],
    },
    Service {
        title: "Digital Strategy",
        summary: "Roadmaps that connect product decisions to business goals.",
        deliverables: &["Discovery workshops", "Technical roadmaps", "Analytics setup", "Conversion reviews"],
    },
];

pub const CASE_STUDIES: &[CaseStudy] = &[
    CaseStudy {
        client: "Northwind Outfitters",
        title: "A storefront that loads before the coffee cools",
        summary: "Rebuilt a slow catalogue into a static-first shop and halved time to interactive.",
        image: "/images/work/northwind.jpg",
        tags: &["Web Development", "Performance"],
    },
    CaseStudy {
        client: "Harbor Health",
        title: "Appointments in three taps",
        summary: "Designed and shipped a patient booking app used across twelve clinics.",
        image: "/images/work/harbor.jpg",
        tags: &["Mobile Apps"],
    },
    CaseStudy {
        client: "Fieldnote Analytics",
        title: "From dashboard sprawl to one clear funnel",
        summary: "Consolidated tracking and reporting so the growth team could trust its numbers.",
        image: "/images/work/fieldnote.jpg",
        tags: &["Digital Strategy", "Analytics"],
    },
];

pub const PRINCIPLES: &[Principle] = &[
    Principle {
        title: "Small senior teams",
        body: "The people you meet in the first call are the people who build your product.",
    },
    Principle {
        title: "Ship early, measure often",
        body: "Working software in front of users beats another round of mockups.",
    },
    Principle {
        title: "Built to be handed over",
        body: "Documented, tested code your own team can own after launch.",
    },
];

pub const CONTACT_EMAIL: &str = "hello@arclight.studio";
