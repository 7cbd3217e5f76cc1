use keyhints::dom::dom_model::Rect;
use keyhints::dom::static_page::{ElementSpec, PageSpec, StaticPage};

/// A slot on a grid that fits hundreds of elements in the default viewport.
pub fn slot(i: usize) -> Rect {
    Rect::new(10.0 + 25.0 * (i % 30) as f64, 10.0 + 50.0 * (i / 30) as f64, 40.0, 20.0)
}

pub fn link(i: usize, text: &str) -> ElementSpec {
    ElementSpec::link(text).at(slot(i))
}

/// `count` visible links titled `link 0`, `link 1`, ...
pub fn links(count: usize) -> PageSpec {
    (0..count).fold(PageSpec::new(), |page, i| {
        page.element(link(i, &format!("link {}", i)))
    })
}

pub fn links_page(count: usize) -> StaticPage {
    StaticPage::new(&links(count))
}

/// Visible links with the given texts, in order.
pub fn texts_page(texts: &[&str]) -> StaticPage {
    let spec = texts
        .iter()
        .enumerate()
        .fold(PageSpec::new(), |page, (i, text)| page.element(link(i, text)));
    StaticPage::new(&spec)
}

pub fn page_of(elements: Vec<ElementSpec>) -> StaticPage {
    let spec = elements
        .into_iter()
        .fold(PageSpec::new(), |page, element| page.element(element));
    StaticPage::new(&spec)
}

/// A search form with one query field named `q` and a submit button.
pub fn search_form(method: &str) -> ElementSpec {
    ElementSpec::new("form")
        .attr("method", method)
        .attr("action", "/search")
        .child(ElementSpec::input("text").attr("name", "q").at(slot(0)))
        .child(ElementSpec::input("submit").attr("value", "Go").at(slot(1)))
}
