//! Static content feeds: projects, certificates, stack, services, and the
//! copy for the two split panels.

use serde::Serialize;

use crate::config::SocialLinks;

/// Projects visible before "show all" is pressed.
pub const PROJECTS_INITIAL_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub image_url: &'static str,
    pub tags: &'static [&'static str],
    pub live_url: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Certificate {
    pub title: String,
    pub image_url: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StackItem {
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Service {
    pub id: &'static str,
    pub question: &'static str,
    pub outcome: &'static str,
    pub bullets: &'static [&'static str],
    pub tech_line: &'static str,
    pub cta: &'static str,
    pub href: &'static str,
    pub image_url: &'static str,
}

/// Copy shown inside one split panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelCopy {
    pub supertitle: &'static str,
    pub title: &'static str,
    pub story: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SplitPanels {
    pub left: PanelCopy,
    pub right: PanelCopy,
}

/// One contact card next to the form. Links without a configured target
/// are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialCard {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub href: String,
}

/// Everything served at `GET /api/content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteContent {
    pub panels: SplitPanels,
    pub projects: &'static [Project],
    pub projects_initial_count: usize,
    pub certificates: Vec<Certificate>,
    pub stack: &'static [StackItem],
    pub services: &'static [Service],
    pub socials: Vec<SocialCard>,
}

impl SiteContent {
    #[must_use]
    pub fn new(socials: &SocialLinks) -> Self {
        Self {
            panels: SPLIT_PANELS,
            projects: PROJECTS,
            projects_initial_count: PROJECTS_INITIAL_COUNT.min(PROJECTS.len()),
            certificates: CERTIFICATE_IMAGES
                .iter()
                .map(|&image_url| Certificate {
                    title: title_from_path(image_url),
                    image_url,
                })
                .collect(),
            stack: STACK,
            services: SERVICES,
            socials: social_cards(socials),
        }
    }
}

/// Human title from an image path: file stem with `-`/`_` as spaces.
#[must_use]
pub fn title_from_path(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or(path);
    let stem = match file.rfind('.') {
        Some(dot) if dot > 0 => &file[..dot],
        _ => file,
    };
    let title = stem.replace(['-', '_'], " ");
    let title = title.trim();
    if title.is_empty() {
        "Certificate".to_string()
    } else {
        title.to_string()
    }
}

fn social_cards(links: &SocialLinks) -> Vec<SocialCard> {
    let cards = [
        ("Let's Connect", "on LinkedIn", links.linkedin_url.clone()),
        ("Follow Me", "@SandraObunga", links.x_url.clone()),
        ("See My Code", "@SandraObunga", links.github_url.clone()),
        (
            "Send an Email",
            "Direct to my inbox",
            links.email.as_ref().map(|email| format!("mailto:{email}")),
        ),
    ];
    cards
        .into_iter()
        .filter_map(|(title, subtitle, href)| {
            href.map(|href| SocialCard {
                title,
                subtitle,
                href,
            })
        })
        .collect()
}

pub const SPLIT_PANELS: SplitPanels = SplitPanels {
    left: PanelCopy {
        supertitle: "FULL STACK DEVELOPER",
        title: "Software Engineering",
        story: "I build web products end\u{2011}to\u{2011}end. After four years studying how businesses work, I doubled down on code: Meta's Front\u{2011}End program and ALX Software Engineering, and started shipping. I care about calm, reliable software: fast interfaces, clean architecture, and the kind of polish people can feel. Most days you'll find me turning fuzzy ideas into working products that earn trust.",
    },
    right: PanelCopy {
        supertitle: "ENTREPRENEUR",
        title: "Business Strategy",
        story: "Entrepreneurship is where I learned what momentum really looks like. I studied it for four years, then worked on the ground in Kibra: training founders, running VSLA sessions, and keeping records straight, even across 40,000+ OVC profiles. That's where it clicked: growth is a system. Today I think in markets, moats, and partnerships, and I build with that lens. Tech and business aren't two paths for me; they're one.",
    },
};

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Meechum",
        description: "mini blogging.",
        image_url: "/images/meechum.png",
        tags: &["Next.js", "TypeScript", "Tailwind CSS", "Supabase", "Framer-motion"],
        live_url: "https://meechum.vercel.app/",
    },
    Project {
        title: "Amboseli Lewis School Management System",
        description: "A comprehensive school management system for efficient school operations.",
        image_url: "/images/projectthree.PNG",
        tags: &["React", "MongoDB", "Node.js", "Express"],
        live_url: "https://amboseli-lewis-sms-btap.vercel.app/home",
    },
    Project {
        title: "PFNFarmers",
        description: "Grants, training, and market access to help farmers grow sustainably and build resilience.",
        image_url: "/images/pfnfarmers.png",
        tags: &["React", "Resend", "Node.js", "Express"],
        live_url: "https://www.pfnfarmers.org/",
    },
    Project {
        title: "shammah-international-agency",
        description: "Your premier partner for navigating immigration, corporate, and travel solutions in Kenya.",
        image_url: "/images/Sia.png",
        tags: &["Next.js", "TypeScript", "Tailwind CSS", "Prisma", "PostgreSQL"],
        live_url: "https://shammah-international-agency-ltd.vercel.app/e",
    },
    Project {
        title: "HaloWash Laundry App",
        description: "A modern laundry service app with real-time tracking and seamless payments.",
        image_url: "/images/projectfour.PNG",
        tags: &["Next.js", "TypeScript", "Tailwind CSS", "Prisma", "PostgreSQL"],
        live_url: "https://halowash.vercel.app/Home",
    },
    Project {
        title: "Cocoa House",
        description: "An interactive website featuring cacao sourcing and supply.",
        image_url: "/images/projectone.PNG",
        tags: &["React Native", "Firebase", "Node.js", "Express"],
        live_url: "https://houseofcocoa.onrender.com/",
    },
    Project {
        title: "Portfolio",
        description: "A fun, interactive website powered by React, showcasing my work and skills.",
        image_url: "/images/projecttwo.PNG",
        tags: &["React Native", "Firebase", "Node.js", "Express"],
        live_url: "https://sandra-obunga.onrender.com/",
    },
];

pub const CERTIFICATE_IMAGES: &[&str] = &[
    "/images/introduction.PNG",
    "/images/html and css in depth.PNG",
    "/images/javascript.PNG",
    "/images/principles of UXUI.PNG",
    "/images/React Cert.PNG",
    "/images/React Native.PNG",
    "/images/advanced react.PNG",
    "/images/version control.PNG",
    "/images/Coding interview prep.PNG",
    "/images/my final certificate.PNG",
    "/images/ALX-Cert.png",
];

pub const STACK: &[StackItem] = &[
    StackItem { name: "TypeScript" },
    StackItem { name: "JavaScript" },
    StackItem { name: "React" },
    StackItem { name: "Next.js" },
    StackItem { name: "Node.js" },
    StackItem { name: "Tailwind CSS" },
    StackItem { name: "Framer Motion" },
    StackItem { name: "Prisma" },
    StackItem { name: "PostgreSQL" },
    StackItem { name: "MongoDB" },
    StackItem { name: "Git" },
    StackItem { name: "Figma" },
    StackItem { name: "Flutter" },
    StackItem { name: "Laravel" },
    StackItem { name: "PHP" },
    StackItem { name: "MySQL" },
];

pub const SERVICES: &[Service] = &[
    Service {
        id: "sales",
        question: "Website visits but low sales?",
        outcome: "Turn visitors into leads and customers.",
        bullets: &[
            "High-converting landing pages",
            "Clear messaging & CTAs",
            "Analytics & tracking setup",
        ],
        tech_line: "Conversion-focused web + tracking",
        cta: "Improve conversions",
        href: "/contact",
        image_url: "/images/businessprob6.jpg",
    },
    Service {
        id: "presence",
        question: "Need a modern, trusted site?",
        outcome: "A clean site that explains your service in seconds.",
        bullets: &[
            "Fast, mobile-first build",
            "Product & service clarity designs",
            "Social media lead capture",
        ],
        tech_line: "Next.js \u{2022} TypeScript \u{2022} SEO-ready",
        cta: "Build my website",
        href: "/contact",
        image_url: "/images/businessprob.jpg",
    },
    Service {
        id: "brand",
        question: "Brand look outdated or messy?",
        outcome: "A professional brand people remember.",
        bullets: &["Logo & brand kit", "Social media templates", "Marketing collateral"],
        tech_line: "Figma \u{2022} Brand systems",
        cta: "Refresh my brand",
        href: "/contact",
        image_url: "/images/businessprob5.jpg",
    },
    Service {
        id: "time",
        question: "Too much repetitive admin work?",
        outcome: "Automate tasks to focus on sales.",
        bullets: &["Automated CRM workflows", "Custom Dashboards", "API Integrations"],
        tech_line: "APIs \u{2022} Automations \u{2022} Zapier",
        cta: "Automate workflow",
        href: "/contact",
        image_url: "/images/businessprob2.jpg",
    },
];
