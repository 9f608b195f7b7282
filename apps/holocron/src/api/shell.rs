//! # Shell Page
//!
//! The single page served at `/`: a title, the navigation list and the
//! `#app` container. Its script forwards fragment changes to `/view` and
//! favorite clicks to `/favorites/toggle`, then writes the returned markup
//! back into the page.

use holocron_core::Category;
use holocron_core::route::FAVORITES_FRAGMENT;
use maud::{DOCTYPE, Markup, PreEscaped, html};

fn nav_label(category: Category) -> &'static str {
    match category {
        Category::People => "Personajes",
        Category::Planets => "Planetas",
        Category::Films => "Películas",
        Category::Species => "Especies",
        Category::Vehicles => "Vehículos",
        Category::Starships => "Naves",
    }
}

const SCRIPT: &str = r##"
        const app = document.getElementById('app');

        function markActive(target) {
            document.querySelectorAll('#navList a').forEach(a => {
                a.classList.toggle('active', a.getAttribute('href') === target);
            });
        }

        async function router() {
            const fragment = window.location.hash;
            const resp = await fetch('/view?fragment=' + encodeURIComponent(fragment));
            const view = await resp.json();
            if (fragment !== window.location.hash) {
                return;
            }
            app.innerHTML = view.html;
            markActive(view.active_nav);
        }

        app.addEventListener('click', async (event) => {
            const button = event.target.closest('.favorite-toggle');
            if (!button) {
                return;
            }
            const resp = await fetch('/favorites/toggle', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({
                    category: button.dataset.category,
                    id: button.dataset.id,
                    name: button.dataset.name,
                }),
            });
            const result = await resp.json();
            if (result.success) {
                button.outerHTML = result.control_html;
            }
        });

        window.addEventListener('hashchange', router);
        window.addEventListener('load', router);
        document.querySelector('.title').addEventListener('click', () => {
            window.location.hash = '/';
        });
"##;

fn nav_item(href: &str, label: &str) -> Markup {
    html! { li { a href=(href) { (label) } } }
}

/// Full shell markup.
pub fn shell_page() -> String {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Holocron" }
            }
            body {
                header {
                    h1 class="title" { "Holocron" }
                    nav {
                        ul id="navList" {
                            @for category in Category::ALL {
                                (nav_item(&category.fragment(), nav_label(category)))
                            }
                            (nav_item(FAVORITES_FRAGMENT, "Favoritos"))
                        }
                    }
                }
                main id="app" {}
                script { (PreEscaped(SCRIPT)) }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_covers_every_section() {
        let page = shell_page();
        for category in Category::ALL {
            assert!(page.contains(&format!("href=\"#/{}\"", category)));
        }
        assert!(page.contains("href=\"#/favorites\">Favoritos"));
        assert!(page.contains("<main id=\"app\">"));
    }
}
