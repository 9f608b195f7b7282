//! # View Renderer
//!
//! Produces the markup for each view. Every function returns a complete
//! replacement for the content container; there is no incremental patching.
//! The one exception is [`render_favorite_control`], which a detail view
//! swaps in place after a toggle.
//!
//! Templates are `maud` macros, so every interpolated value is escaped.

use crate::primitives::{DEFAULT_GLOW_CLASS, EXCLUDED_DETAIL_FIELDS, GLOW_EYE_COLORS};
use crate::route::FAVORITES_FRAGMENT;
use crate::{Category, FavoriteRecord, HolocronError, ResourceId};
use maud::{Markup, PreEscaped, html};
use serde_json::Value;

/// Icon shown next to a detail title.
const DETAIL_ICON: &str = "/logo-w.png";

const FAVORITE_ON_ICON: &str = "/icons/star-filled.png";
const FAVORITE_OFF_ICON: &str = "/icons/star-outline.png";

const LEFT_ARROW: PreEscaped<&str> = PreEscaped("&larr;");

// =============================================================================
// HELPERS
// =============================================================================

/// Display form of an attribute value: strings verbatim, everything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Entity title: `name`, or `title` for films.
fn entity_title(item: &Value) -> &str {
    item.get("name")
        .and_then(Value::as_str)
        .or_else(|| item.get("title").and_then(Value::as_str))
        .unwrap_or_default()
}

/// Glow class of a list card. Only people have variants, keyed by eye color.
#[must_use]
pub fn glow_class(category: Category, item: &Value) -> String {
    let color = category
        .info()
        .glow_field
        .and_then(|field| item.get(field))
        .and_then(Value::as_str)
        .filter(|color| GLOW_EYE_COLORS.contains(color));

    match color {
        Some(color) => format!("glow-hover-{}", color),
        None => DEFAULT_GLOW_CLASS.to_string(),
    }
}

fn section_title(category: Category) -> Markup {
    html! {
        h2 class="content-title-with-icon" style="text-transform: capitalize;" {
            img src=(category.info().icon) class="logo-in-content-title" alt={ "Icono " (category.as_str()) };
            (category.as_str())
        }
    }
}

// =============================================================================
// STATIC VIEWS
// =============================================================================

/// Loading placeholder shown while a fetch is pending.
#[must_use]
pub fn render_loader() -> String {
    html! {
        div class="loader" {
            div class="spinner" {}
        }
    }
    .into_string()
}

#[must_use]
pub fn render_home() -> String {
    html! {
        div class="home-view" {
            h2 class="home-title" { "Bienvenido, joven padawan." }
            p { "Usa la navegación de arriba para explorar el universo de Star Wars." }
            p {
                "Toda la información es traída desde la "
                a href="https://swapi.dev/" target="_blank" { "SWAPI" }
                "."
            }
            p { "Los datos que consultes se guardan localmente para que la próxima vez carguen al instante." }
            p {
                "Marca tus entidades preferidas con la estrella y encuéntralas en "
                a href=(FAVORITES_FRAGMENT) { "Favoritos" }
                "."
            }
        }
    }
    .into_string()
}

#[must_use]
pub fn render_error(message: &str) -> String {
    html! { p class="error" { (message) } }.into_string()
}

/// Message for a response that lacks the data a view needs.
#[must_use]
pub fn render_missing(category: Category) -> String {
    render_error(&format!("No se pudieron cargar los datos para {}.", category))
}

/// Soft failure for fragments naming no known section.
#[must_use]
pub fn render_not_found(path: &str) -> String {
    html! {
        div class="not-found" {
            p class="error" { "La sección " code { (path) } " no existe." }
            a href="#/" class="back-button" { (LEFT_ARROW) " Volver al inicio" }
        }
    }
    .into_string()
}

// =============================================================================
// LIST VIEW
// =============================================================================

fn list_card(category: Category, item: &Value) -> Markup {
    let info = category.info();
    let href = match item
        .get("url")
        .and_then(Value::as_str)
        .and_then(ResourceId::from_url)
    {
        Some(id) => format!("#/{}/{}", category, id),
        None => category.fragment(),
    };

    html! {
        a class={ "list-item-card " (glow_class(category, item)) } href=(href) {
            h3 { (entity_title(item)) }
            @if let Some(value) = item.get(info.caption_field) {
                p { (info.caption_label) ": " (display_value(value)) }
            }
        }
    }
}

/// Render a collection page. Fails with `MissingData` without a `results` array.
pub fn render_list(category: Category, data: &Value) -> Result<String, HolocronError> {
    let results = data
        .get("results")
        .and_then(Value::as_array)
        .ok_or(HolocronError::MissingData(category))?;

    Ok(html! {
        (section_title(category))
        div class="list-view-container" {
            @for item in results {
                (list_card(category, item))
            }
        }
    }
    .into_string())
}

// =============================================================================
// DETAIL VIEW
// =============================================================================

/// Attributes shown in a detail field list, in resource order.
///
/// Drops the fixed exclusion set and every array-valued attribute.
#[must_use]
pub fn detail_fields(data: &Value) -> Vec<(&str, &Value)> {
    data.as_object()
        .map(|object| {
            object
                .iter()
                .filter(|(key, value)| {
                    !EXCLUDED_DETAIL_FIELDS.contains(&key.as_str()) && !value.is_array()
                })
                .map(|(key, value)| (key.as_str(), value))
                .collect()
        })
        .unwrap_or_default()
}

fn favorite_control(category: Category, id: ResourceId, name: &str, is_favorite: bool) -> Markup {
    let (class, icon, label) = if is_favorite {
        ("favorite-toggle is-favorite", FAVORITE_ON_ICON, "Quitar de favoritos")
    } else {
        ("favorite-toggle", FAVORITE_OFF_ICON, "Agregar a favoritos")
    };

    html! {
        button type="button" class=(class) data-category=(category.as_str()) data-id=(id.to_string())
            data-name=(name) aria-pressed=(is_favorite) title=(label) {
            img src=(icon) alt=(label);
        }
    }
}

/// The favorite toggle of a detail view.
#[must_use]
pub fn render_favorite_control(
    category: Category,
    id: ResourceId,
    name: &str,
    is_favorite: bool,
) -> String {
    favorite_control(category, id, name, is_favorite).into_string()
}

/// Render a single entity. Fails with `MissingData` unless `data` is an object.
pub fn render_detail(
    category: Category,
    id: ResourceId,
    data: &Value,
    is_favorite: bool,
) -> Result<String, HolocronError> {
    if !data.is_object() {
        return Err(HolocronError::MissingData(category));
    }
    let title = entity_title(data);

    Ok(html! {
        div class="detail-view" {
            a href=(category.fragment()) class="back-button" {
                (LEFT_ARROW) " Volver a " (category.as_str())
            }
            h2 class="content-title-with-icon" {
                img src=(DETAIL_ICON) class="logo-in-content-title" alt="logo";
                (title)
                (favorite_control(category, id, title, is_favorite))
            }
            ul {
                @for (key, value) in detail_fields(data) {
                    li { strong { (key.replace('_', " ")) ":" } " " (display_value(value)) }
                }
            }
        }
    }
    .into_string())
}

// =============================================================================
// FAVORITES VIEW
// =============================================================================

/// Group records by category: categories in first-seen order, records in
/// insertion order within each.
#[must_use]
pub fn group_favorites(records: &[FavoriteRecord]) -> Vec<(Category, Vec<&FavoriteRecord>)> {
    let mut groups: Vec<(Category, Vec<&FavoriteRecord>)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(c, _)| *c == record.category) {
            Some((_, members)) => members.push(record),
            None => groups.push((record.category, vec![record])),
        }
    }
    groups
}

#[must_use]
pub fn render_favorites(records: &[FavoriteRecord]) -> String {
    if records.is_empty() {
        return html! {
            div class="favorites-view" {
                h2 class="content-title-with-icon" { "Favoritos" }
                p class="empty-state" {
                    "Aún no tienes favoritos. Abre cualquier ficha y pulsa la estrella para guardarla aquí."
                }
            }
        }
        .into_string();
    }

    html! {
        div class="favorites-view" {
            h2 class="content-title-with-icon" { a href=(FAVORITES_FRAGMENT) { "Favoritos" } }
            @for (category, members) in group_favorites(records) {
                section class="favorites-group" data-category=(category.as_str()) {
                    (section_title(category))
                    div class="list-view-container" {
                        @for record in members {
                            a class="list-item-card" href={ "#/" (record.category.as_str()) "/" (record.id.to_string()) } {
                                h3 { (record.name) }
                            }
                        }
                    }
                }
            }
        }
    }
    .into_string()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(n: u32) -> ResourceId {
        ResourceId::new(n).unwrap()
    }

    #[test]
    fn resource_text_is_escaped() {
        let data = json!({"results": [{"name": "<b>\"R2\" & D2</b>", "url": "u/2/"}]});
        let html = render_list(Category::People, &data).unwrap();
        assert!(html.contains("<h3>&lt;b&gt;&quot;R2&quot; &amp; D2&lt;/b&gt;</h3>"));

        let control = render_favorite_control(Category::People, id(2), "R2\"D2", false);
        assert!(control.contains(r#"data-name="R2&quot;D2""#));
    }

    #[test]
    fn people_card_has_birth_year_and_glow() {
        let data = json!({"results": [{
            "name": "Luke Skywalker",
            "url": "https://swapi.dev/api/people/1/",
            "birth_year": "19BBY",
            "eye_color": "blue"
        }]});
        let html = render_list(Category::People, &data).unwrap();

        assert!(html.contains(r##"href="#/people/1""##));
        assert!(html.contains("<h3>Luke Skywalker</h3>"));
        assert!(html.contains("<p>Nacimiento: 19BBY</p>"));
        assert!(html.contains("list-item-card glow-hover-blue"));
        assert!(html.contains("/icons/robot.png"));
    }

    #[test]
    fn unmapped_eye_color_gets_default_glow() {
        let item = json!({"eye_color": "blue-gray"});
        assert_eq!(glow_class(Category::People, &item), DEFAULT_GLOW_CLASS);
    }

    #[test]
    fn glow_only_applies_to_people() {
        let item = json!({"eye_color": "red"});
        assert_eq!(glow_class(Category::Species, &item), DEFAULT_GLOW_CLASS);
        assert_eq!(glow_class(Category::People, &item), "glow-hover-red");
    }

    #[test]
    fn film_cards_use_title_and_director() {
        let data = json!({"results": [{
            "title": "A New Hope",
            "director": "George Lucas",
            "url": "https://swapi.dev/api/films/1/"
        }]});
        let html = render_list(Category::Films, &data).unwrap();
        assert!(html.contains("<h3>A New Hope</h3>"));
        assert!(html.contains("<p>Director: George Lucas</p>"));
        assert!(html.contains(DEFAULT_GLOW_CLASS));
    }

    #[test]
    fn captions_per_category() {
        let cases = [
            (Category::Planets, "climate", "Clima"),
            (Category::Species, "language", "Lenguaje"),
            (Category::Vehicles, "model", "Modelo"),
            (Category::Starships, "model", "Modelo"),
        ];
        for (category, field, label) in cases {
            let data = json!({"results": [{"name": "X", "url": "u/1/", field: "v"}]});
            let html = render_list(category, &data).unwrap();
            assert!(html.contains(&format!("<p>{}: v</p>", label)), "{category}");
        }
    }

    #[test]
    fn list_without_results_is_missing_data() {
        let err = render_list(Category::Planets, &json!({"detail": "nope"})).unwrap_err();
        assert!(matches!(err, HolocronError::MissingData(Category::Planets)));
    }

    #[test]
    fn detail_excludes_fixed_set_and_arrays() {
        let data = json!({
            "name": "Tatooine",
            "created": "2014-12-09T13:50:49.641000Z",
            "url": "https://swapi.dev/api/planets/1/",
            "climate": "arid",
            "films": ["a", "b"]
        });
        let keys: Vec<_> = detail_fields(&data).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["climate"]);

        let html = render_detail(Category::Planets, id(1), &data, false).unwrap();
        assert!(html.contains("<strong>climate:</strong> arid"));
        assert!(!html.contains("<strong>created:"));
        assert!(!html.contains("<strong>films:"));
    }

    #[test]
    fn detail_keys_are_humanized() {
        let data = json!({"name": "Luke", "skin_color": "fair", "mass": 77});
        let html = render_detail(Category::People, id(1), &data, false).unwrap();
        assert!(html.contains("<strong>skin color:</strong> fair"));
        assert!(html.contains("<strong>mass:</strong> 77"));
    }

    #[test]
    fn detail_of_non_object_is_missing_data() {
        assert!(matches!(
            render_detail(Category::People, id(1), &Value::Null, false),
            Err(HolocronError::MissingData(Category::People))
        ));
    }

    #[test]
    fn favorite_control_reflects_state() {
        let on = render_favorite_control(Category::People, id(1), "Luke", true);
        let off = render_favorite_control(Category::People, id(1), "Luke", false);
        assert!(on.contains("favorite-toggle is-favorite"));
        assert!(on.contains(FAVORITE_ON_ICON));
        assert!(!off.contains("is-favorite"));
        assert!(off.contains(FAVORITE_OFF_ICON));
    }

    #[test]
    fn favorites_grouped_by_first_seen_category() {
        let records = vec![
            FavoriteRecord::new(Category::People, id(1), "Luke"),
            FavoriteRecord::new(Category::Planets, id(1), "Tatooine"),
            FavoriteRecord::new(Category::People, id(4), "Vader"),
        ];
        let groups = group_favorites(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Category::People);
        let names: Vec<_> = groups[0].1.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Luke", "Vader"]);
        assert_eq!(groups[1].0, Category::Planets);

        let html = render_favorites(&records);
        assert_eq!(html.matches("<section class=\"favorites-group\"").count(), 2);
        assert!(!html.contains("glow-hover"));
        let luke = html.find("Luke").unwrap();
        let vader = html.find("Vader").unwrap();
        let tatooine = html.find("Tatooine").unwrap();
        assert!(luke < vader && vader < tatooine);
    }

    #[test]
    fn empty_favorites_message() {
        let html = render_favorites(&[]);
        assert!(html.contains("empty-state"));
        assert!(!html.contains("favorites-group"));
    }

    #[test]
    fn not_found_escapes_path() {
        let html = render_not_found("/<script>");
        assert!(html.contains("&lt;script&gt;"));
    }
}
