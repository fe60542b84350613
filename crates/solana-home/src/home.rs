//! Static content of the homepage: hero, category cards, featured items, promo banner and resource links.
//!
//! Everything here is data, it's rendered by the site's index route. The [`Default`] values are the homepage as shipped, a
//! config file can replace any part of it.
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HomepageContent {
    pub hero: Hero,
    pub categories: Vec<CategoryCard>,
    pub featured: Vec<FeaturedItem>,
    pub banner: PromoBanner,
    pub resources: Vec<ResourceLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub title: String,
    /// Part of the title to emphasize, if it appears in it.
    pub highlight: String,
    pub subtitle: String,
}

impl Hero {
    /// Splits the title around the first occurrence of the highlight: `(before, highlight, after)`.
    pub fn title_parts(&self) -> (&str, &str, &str) {
        if self.highlight.is_empty() {
            return (&self.title, "", "");
        }

        match self.title.split_once(self.highlight.as_str()) {
            Some((before, after)) => (before, &self.highlight, after),
            None => (&self.title, "", ""),
        }
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            title: "Your Solana homepage".to_string(),
            highlight: "Solana".to_string(),
            subtitle: "Stay up-to-date with the latest updates, learning, and happenings in the Solana ecosystem.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryCard {
    pub title: String,
    pub href: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeaturedItem {
    pub title: String,
    pub href: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PromoBanner {
    pub title: String,
    pub text: String,
    pub href: String,
    pub cta: String,
    pub img: String,
}

impl Default for PromoBanner {
    fn default() -> Self {
        Self {
            title: "Build on Solana".to_string(),
            text: "Everything you need to ship your first program, from tooling to tutorials.".to_string(),
            href: "/developers".to_string(),
            cta: "Start building".to_string(),
            img: "/img/cta/2.jpg".to_string(),
        }
    }
}

/// Outbound link to an external opportunities page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceLink {
    pub title: String,
    pub href: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_external")]
    pub external: bool,
}

fn default_external() -> bool {
    true
}

fn category(title: &str, href: &str, description: &str) -> CategoryCard {
    CategoryCard {
        title: title.to_string(),
        href: href.to_string(),
        description: description.to_string(),
    }
}

fn featured(title: &str, href: &str, author: &str, img: &str, description: &str) -> FeaturedItem {
    FeaturedItem {
        title: title.to_string(),
        href: href.to_string(),
        author: author.to_string(),
        img: img.to_string(),
        description: description.to_string(),
    }
}

fn superteam(title: &str, category: &str, img: &str) -> ResourceLink {
    ResourceLink {
        title: title.to_string(),
        href: format!("https://earn.superteam.fun/opportunities/category/{}", category),
        img: img.to_string(),
        text: "By Superteam".to_string(),
        external: true,
    }
}

impl Default for HomepageContent {
    fn default() -> Self {
        Self {
            hero: Hero::default(),
            categories: vec![
                category("Changelog", "/changelog", "What shipped in the Solana core and tooling."),
                category("Newsletter", "/newsletter", "A weekly digest of the ecosystem."),
                category("Library", "/library", "Guides, talks and recorded community calls."),
                category("Podcasts", "/podcasts", "Conversations with builders across Solana."),
            ],
            featured: vec![
                featured(
                    "Solana Changelog",
                    "/changelog",
                    "Solana Foundation",
                    "/img/featured/changelog.jpg",
                    "Keep track of the changes landing in the validator, the SDKs and the developer tooling.",
                ),
                featured(
                    "Core Community Calls",
                    "/library/playlist/core-community-calls",
                    "Solana Foundation",
                    "/img/featured/core-calls.jpg",
                    "Monthly calls where core contributors walk through upcoming protocol changes.",
                ),
                featured(
                    "Superteam Ecosystem Calls",
                    "/library/playlist/superteam-ecosystem-calls",
                    "Superteam",
                    "/img/featured/ecosystem-calls.jpg",
                    "Builders from around the world share what they're working on.",
                ),
            ],
            banner: PromoBanner::default(),
            resources: vec![
                superteam("Jobs", "jobs", "/img/cta/4.jpg"),
                superteam("Bounties", "bounties", "/img/cta/0.jpg"),
                superteam("Grants", "grants", "/img/cta/1.jpg"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resources() {
        let resources = HomepageContent::default().resources;

        let links: Vec<_> = resources
            .iter()
            .map(|r| (r.title.as_str(), r.href.as_str(), r.img.as_str()))
            .collect();
        assert_eq!(
            links,
            vec![
                (
                    "Jobs",
                    "https://earn.superteam.fun/opportunities/category/jobs",
                    "/img/cta/4.jpg"
                ),
                (
                    "Bounties",
                    "https://earn.superteam.fun/opportunities/category/bounties",
                    "/img/cta/0.jpg"
                ),
                (
                    "Grants",
                    "https://earn.superteam.fun/opportunities/category/grants",
                    "/img/cta/1.jpg"
                ),
            ]
        );
        assert!(resources.iter().all(|r| r.external && r.text == "By Superteam"));
    }

    #[test]
    fn test_hero_title_parts() {
        let hero = Hero::default();
        assert_eq!(hero.title_parts(), ("Your ", "Solana", " homepage"));

        let plain = Hero {
            highlight: "Ethereum".to_string(),
            ..Hero::default()
        };
        assert_eq!(plain.title_parts(), ("Your Solana homepage", "", ""));
    }

    #[test]
    fn test_partial_override_from_yaml() {
        let yaml = r#"
featured:
  - title: Validators
    href: /validators
resources:
  - title: Hackathons
    href: https://example.com/hackathons
"#;
        let content: HomepageContent = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(content.hero, Hero::default());
        assert_eq!(content.featured.len(), 1);
        assert_eq!(content.featured[0].title, "Validators");
        assert!(content.featured[0].author.is_empty());
        assert!(content.resources[0].external);
        assert_eq!(content.categories, HomepageContent::default().categories);
    }
}
