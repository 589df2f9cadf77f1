use std::collections::BTreeMap;

/// Attribute marking an anchor as an in-app link.
const APP_LINK_ATTR: &str = "data-link";

/// Minimal DOM element: a tag, its attributes and its ancestor chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub parent: Option<Box<Element>>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// `<a data-link href="{path}">`.
    pub fn app_link(path: impl Into<String>) -> Self {
        Self::new("a")
            .with_attr(APP_LINK_ATTR, "")
            .with_attr("href", path)
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_parent(mut self, parent: Element) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn href(&self) -> Option<&str> {
        self.attr("href")
    }

    /// Matches `a[data-link]`.
    pub fn is_app_link(&self) -> bool {
        self.tag.eq_ignore_ascii_case("a") && self.attributes.contains_key(APP_LINK_ATTR)
    }

    /// Nearest inclusive ancestor matching `a[data-link]`.
    pub fn closest_link(&self) -> Option<&Element> {
        let mut current = Some(self);
        while let Some(element) = current {
            if element.is_app_link() {
                return Some(element);
            }
            current = element.parent.as_deref();
        }
        None
    }
}
