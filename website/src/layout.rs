use maud::{DOCTYPE, Markup, html};
mod header;

pub use header::header;
use solana_home::maud::generator;
use solana_home::route::PageContext;

pub struct SeoMeta {
    pub title: String,
    pub description: Option<String>,
}

impl Default for SeoMeta {
    fn default() -> Self {
        Self {
            title: "Solana".to_string(),
            description: Some(
                "Stay up-to-date with the latest updates, learning, and happenings in the Solana ecosystem."
                    .to_string(),
            ),
        }
    }
}

impl SeoMeta {
    pub fn render(&self, canonical_url: Option<&str>, base_url: &Option<String>) -> Markup {
        let formatted_title = if self.title == "Solana" {
            self.title.clone()
        } else {
            format!("{} | Solana", self.title)
        };

        let description = self
            .description
            .clone()
            .or_else(|| SeoMeta::default().description)
            .unwrap_or_default();

        let social_image_url = base_url
            .as_ref()
            .map(|base_url| format!("{}/social-image.png", base_url.trim_end_matches('/')));

        html! {
            title { (formatted_title) }
            meta name="description" content=(description);

            // Open Graph meta tags
            meta property="og:title" content=(formatted_title);
            meta property="og:description" content=(description);
            meta property="og:type" content="website";
            @if let Some(social_image_url) = &social_image_url {
                meta property="og:image" content=(social_image_url);
            }
            @if let Some(canonical_url) = canonical_url {
                meta property="og:url" content=(canonical_url);
                link rel="canonical" href=(canonical_url);
            }

            // Twitter Card meta tags
            meta name="twitter:card" content="summary_large_image";
            meta name="twitter:title" content=(formatted_title);
            meta name="twitter:description" content=(description);
        }
    }
}

pub fn layout(main: Markup, ctx: &PageContext, seo: Option<SeoMeta>) -> Markup {
    let seo_data = seo.unwrap_or_default();
    let canonical_url = ctx.canonical_url();

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                (generator())
                link rel="icon" href="/favicon.ico";
                link rel="stylesheet" href="/style.css";
                (seo_data.render(canonical_url.as_deref(), ctx.base_url))
            }
            body {
                (header(ctx))
                main { (main) }
                footer.footer {
                    div.container {
                        p { "© Solana Foundation. All rights reserved." }
                        nav {
                            a href="https://github.com/solana-foundation" { "GitHub" }
                            a href="https://x.com/solana" { "X" }
                            a href="https://discord.com/invite/kBbATFA7PW" { "Discord" }
                        }
                    }
                }
            }
        }
    }
}
