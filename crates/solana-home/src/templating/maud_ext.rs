use maud::{Markup, Render, html};

use crate::{
    GENERATOR,
    content::ContentRecord,
    home::{FeaturedItem, Hero, PromoBanner, ResourceLink},
    route::RenderResult,
};

/// Can be used to create a generator tag in the output HTML. See [`GENERATOR`](crate::GENERATOR).
pub fn generator() -> Markup {
    html! {
        meta name="generator" content=(GENERATOR);
    }
}

impl From<maud::Markup> for RenderResult {
    fn from(val: maud::Markup) -> Self {
        RenderResult::Text(val.into_string())
    }
}

/// Large centered banner at the top of a page.
pub struct PageHero<'a>(pub &'a Hero);

impl Render for PageHero<'_> {
    fn render(&self) -> Markup {
        let (before, highlight, after) = self.0.title_parts();

        html! {
            section.page-hero.container.text-center {
                h1.text-6xl.tracking-normal {
                    (before)
                    @if !highlight.is_empty() {
                        span.gradient-solana { (highlight) }
                    }
                    (after)
                }
                @if !self.0.subtitle.is_empty() {
                    p.max-w-lg.mx-auto.text-xl.text-gray-400 { (self.0.subtitle) }
                }
            }
        }
    }
}

/// Content card: image, label, title and description, linking to `href`.
pub struct Card<'a> {
    pub title: &'a str,
    pub href: &'a str,
    pub label: &'a str,
    pub img: &'a str,
    pub description: &'a str,
}

impl<'a> From<&'a ContentRecord> for Card<'a> {
    fn from(record: &'a ContentRecord) -> Self {
        Card {
            title: &record.title,
            href: &record.url,
            label: &record.author,
            img: &record.img,
            description: &record.description,
        }
    }
}

impl<'a> From<&'a FeaturedItem> for Card<'a> {
    fn from(item: &'a FeaturedItem) -> Self {
        Card {
            title: &item.title,
            href: &item.href,
            label: &item.author,
            img: &item.img,
            description: &item.description,
        }
    }
}

impl Render for Card<'_> {
    fn render(&self) -> Markup {
        html! {
            a.card href=(self.href) {
                @if !self.img.is_empty() {
                    img.card-image src=(self.img) alt="" loading="lazy";
                }
                div.card-body {
                    @if !self.label.is_empty() {
                        p.card-label { (self.label) }
                    }
                    h3.card-title { (self.title) }
                    @if !self.description.is_empty() {
                        p.card-description { (self.description) }
                    }
                }
            }
        }
    }
}

/// Full-bleed image card with a call to action, optionally pointing outside the site.
pub struct ImageCtaCard<'a> {
    pub title: &'a str,
    pub href: &'a str,
    pub img: &'a str,
    pub text: &'a str,
    /// Button label, no button when empty.
    pub cta: &'a str,
    pub external: bool,
}

impl<'a> From<&'a ResourceLink> for ImageCtaCard<'a> {
    fn from(link: &'a ResourceLink) -> Self {
        ImageCtaCard {
            title: &link.title,
            href: &link.href,
            img: &link.img,
            text: &link.text,
            cta: "",
            external: link.external,
        }
    }
}

impl<'a> From<&'a PromoBanner> for ImageCtaCard<'a> {
    fn from(banner: &'a PromoBanner) -> Self {
        ImageCtaCard {
            title: &banner.title,
            href: &banner.href,
            img: &banner.img,
            text: &banner.text,
            cta: &banner.cta,
            external: false,
        }
    }
}

impl Render for ImageCtaCard<'_> {
    fn render(&self) -> Markup {
        let style = if self.img.is_empty() {
            String::new()
        } else {
            format!("background-image: url('{}')", self.img)
        };

        html! {
            @if self.external {
                a.image-cta-card href=(self.href) style=(style) target="_blank" rel="noopener noreferrer" {
                    (self.body())
                }
            } @else {
                a.image-cta-card href=(self.href) style=(style) {
                    (self.body())
                }
            }
        }
    }
}

impl ImageCtaCard<'_> {
    fn body(&self) -> Markup {
        html! {
            div.image-cta-card-body {
                h3.image-cta-card-title { (self.title) }
                @if !self.text.is_empty() {
                    p.image-cta-card-text { (self.text) }
                }
                @if !self.cta.is_empty() {
                    span.btn { (self.cta) }
                }
            }
        }
    }
}
