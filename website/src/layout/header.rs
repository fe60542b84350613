use maud::{Markup, html};
use solana_home::route::PageContext;

const NAV: [(&str, &str); 4] = [
    ("Learn", "/learn"),
    ("Developers", "/developers"),
    ("Ecosystem", "/ecosystem"),
    ("News", "/news"),
];

pub fn header(ctx: &PageContext) -> Markup {
    html! {
        header.header {
            div.container {
                a.logo href="/" { "Solana" }
                nav {
                    @for (label, href) in NAV {
                        @if ctx.current_path.starts_with(href) {
                            a.active href=(href) aria-current="page" { (label) }
                        } @else {
                            a href=(href) { (label) }
                        }
                    }
                }
            }
        }
    }
}
