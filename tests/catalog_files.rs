//! Loading catalogs from disk and driving a controller with them.
use std::fs;

use folio::effects::NoEffects;
use folio::surface::Controls;
use folio::{CardDeck, Catalog, FilterBar, ViewController};
use tempfile::TempDir;

const TOML_CATALOG: &str = r#"
title = "Workshop"
controls = ["search", "filters", "pagination", "crystal ball"]

[[cards]]
title = "Old news"
category = "Tech"
date = "2023-01-05"

[[cards]]
title = "Fresh news"
excerpt = "Just in"
category = "tech"
date = "2024-03-01"

[[cards]]
title = "Gardening"
category = "Life"
date = "March 2, 2024"
"#;

const HTML_CATALOG: &str = r#"<html>
<head><title>Exported</title></head>
<body>
  <button id="menuToggle"></button>
  <button class="filter-btn active" data-filter="all">All</button>
  <button class="filter-btn" data-filter="life">Life</button>
  <article class="blog-card" data-category="life" data-date="2024-01-01">
    <h3 class="blog-title">New year</h3>
    <p class="blog-excerpt">Plans</p>
  </article>
  <article class="blog-card" data-category="life" data-date="2024-06-01">
    <h3 class="blog-title">Summer</h3>
  </article>
</body>
</html>"#;

#[test]
fn toml_catalog_loads_with_derived_defaults()
{
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("workshop.toml");
    fs::write(&path, TOML_CATALOG).unwrap();

    let catalog = Catalog::load(&path).unwrap();

    assert_eq!(catalog.title, "Workshop");
    assert_eq!(catalog.cards.len(), 3);
    assert_eq!(catalog.filters, vec!["all", "Tech", "Life"]);
    assert_eq!(catalog.categories, vec!["Tech", "Life"]);
    assert_eq!(
        catalog.controls,
        Controls::SEARCH | Controls::FILTERS | Controls::PAGINATION
    );
}

#[test]
fn html_catalog_is_chosen_by_extension()
{
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export.HTML");
    fs::write(&path, HTML_CATALOG).unwrap();

    let catalog = Catalog::load(&path).unwrap();

    assert_eq!(catalog.title, "Exported");
    assert_eq!(catalog.filters, vec!["all", "life"]);
    // No category cards on the page, so the menu offers the card categories
    assert_eq!(catalog.categories, vec!["life"]);
    assert!(catalog.controls.contains(Controls::NAV_MENU));
}

#[test]
fn missing_file_is_an_error()
{
    let dir = TempDir::new().unwrap();

    let result = Catalog::load(&dir.path().join("absent.toml"));

    assert!(result.is_err());
}

#[test]
fn malformed_toml_is_an_error()
{
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[cards]]\nexcerpt = \"no title\"\n").unwrap();

    let error = Catalog::load(&path).unwrap_err();

    assert!(format!("{error:#}").contains("broken.toml"));
}

#[test]
fn loaded_catalog_drives_the_controller()
{
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("workshop.toml");
    fs::write(&path, TOML_CATALOG).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    let mut controller = ViewController::new(
        CardDeck::new(catalog.cards),
        FilterBar::new(catalog.filters),
        NoEffects,
    );

    let titles = |controller: &ViewController<CardDeck, NoEffects>| {
        controller
            .listing()
            .cards
            .iter()
            .map(|card| card.title.clone())
            .collect::<Vec<_>>()
    };

    assert_eq!(titles(&controller), vec!["Gardening", "Fresh news", "Old news"]);

    // "Tech" and "tech" are one category
    controller.press_filter(1);
    assert_eq!(controller.filters().active(), Some(1));
    assert_eq!(titles(&controller), vec!["Fresh news", "Old news"]);

    controller.search("just");
    assert_eq!(titles(&controller), vec!["Fresh news"]);
}
