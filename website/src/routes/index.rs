use maud::{Markup, html};
use solana_home::home::{CategoryCard, HomepageContent};
use solana_home::maud::{Card, ImageCtaCard, PageHero};
use solana_home::route::prelude::*;

use crate::layout::layout;

/// The homepage.
#[derive(Default)]
pub struct Index {
    content: HomepageContent,
}

impl Index {
    pub fn new(content: HomepageContent) -> Self {
        Self { content }
    }
}

fn category_card(category: &CategoryCard) -> Markup {
    html! {
        a.category-card href=(category.href) {
            h3 { (category.title) }
            @if !category.description.is_empty() {
                p { (category.description) }
            }
        }
    }
}

impl Route for Index {
    fn route(&self) -> &str {
        "/"
    }

    fn render(&self, ctx: &mut PageContext) -> impl Into<RenderResult> {
        let content = &self.content;

        layout(
            html! {
                (PageHero(&content.hero))

                section.categories.container {
                    div.grid.grid-4 {
                        @for category in &content.categories {
                            (category_card(category))
                        }
                    }
                }

                section.featured.container {
                    h2 { "Featured" }
                    div.grid.grid-3 {
                        @for item in &content.featured {
                            (Card::from(item))
                        }
                    }
                }

                section.promo-banner.container {
                    (ImageCtaCard::from(&content.banner))
                }

                @if !ctx.latest.is_empty() {
                    section.latest.container {
                        h2 { "Latest" }
                        div.grid.grid-4 {
                            @for record in ctx.latest {
                                (Card::from(record))
                            }
                        }
                    }
                }

                section.resources.container {
                    h2 { "Get involved" }
                    div.grid.grid-3 {
                        @for link in &content.resources {
                            (ImageCtaCard::from(link))
                        }
                    }
                }
            },
            ctx,
            None,
        )
    }
}
