//! Fragment-style navigation between screens.
//!
//! Paths look like browser hash fragments (`#/games?genre=RPG`) even
//! though nothing here touches a browser: the format survived the move
//! to the terminal so saved links and muscle memory keep working. The
//! router owns the active controller and guarantees the old one is torn
//! down before the next one is built.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::views::View;

/// Parsed navigation fragment: a normalized path plus query params.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub path: String,
    pub params: HashMap<String, String>,
}

impl Fragment {
    /// Parses `#/<path>[?k=v&k2=v2]`. The leading `#` is optional and an
    /// empty fragment yields an empty path for the router to default.
    /// Keys and values are percent-decoded; a pair without `=` decodes
    /// to an empty value.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (raw, None),
        };
        let mut params = HashMap::new();
        if let Some(query) = query {
            for pair in query.split('&').filter(|pair| !pair.is_empty()) {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                params.insert(percent_decode(key), percent_decode(value));
            }
        }
        Fragment {
            path: path.to_string(),
            params,
        }
    }
}

/// Decodes `%XX` escapes, leaving malformed escapes in place rather
/// than failing the whole navigation.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let (Some(hi), Some(lo)) = (
                bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16)),
                bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16)),
            ) {
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

pub type ViewFactory = Box<dyn Fn(&HashMap<String, String>) -> Box<dyn View>>;

pub struct RouteEntry {
    pub path: &'static str,
    /// Translation key for the sidebar label.
    pub label_key: &'static str,
    factory: ViewFactory,
}

pub struct Router {
    routes: Vec<RouteEntry>,
    current: Option<Box<dyn View>>,
    active_path: String,
    default_path: String,
}

impl Router {
    pub fn new(default_path: impl Into<String>) -> Self {
        Router {
            routes: Vec::new(),
            current: None,
            active_path: String::new(),
            default_path: default_path.into(),
        }
    }

    pub fn register(
        &mut self,
        path: &'static str,
        label_key: &'static str,
        factory: ViewFactory,
    ) {
        self.routes.push(RouteEntry {
            path,
            label_key,
            factory,
        });
    }

    /// Registered routes in registration order, for the sidebar.
    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    pub fn active_path(&self) -> &str {
        &self.active_path
    }

    pub fn current_view(&self) -> Option<&dyn View> {
        self.current.as_deref()
    }

    pub fn current_view_mut(&mut self) -> Option<&mut (dyn View + 'static)> {
        self.current.as_deref_mut()
    }

    /// Handles one navigation event. The current controller is always
    /// destroyed before the next one is constructed, including when the
    /// target is the path already active. Unknown paths redirect to the
    /// default path, silently dropping their params.
    pub fn navigate(&mut self, raw: &str) {
        let fragment = Fragment::parse(raw);
        let mut path = if fragment.path.is_empty() {
            self.default_path.clone()
        } else {
            fragment.path
        };
        let mut params = fragment.params;

        if let Some(mut old) = self.current.take() {
            old.destroy();
        }

        loop {
            if let Some(entry) = self.routes.iter().find(|entry| entry.path == path) {
                debug!(target: "router", "navigating to {path}");
                let mut view = (entry.factory)(&params);
                view.render();
                self.current = Some(view);
                self.active_path = path;
                return;
            }
            if path == self.default_path {
                // The default route itself is unregistered; nothing to
                // show.
                warn!(target: "router", "default path {path} has no route");
                self.active_path.clear();
                return;
            }
            warn!(target: "router", "unknown route {path}, redirecting to {}", self.default_path);
            path = self.default_path.clone();
            params = HashMap::new();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_path() {
        let fragment = Fragment::parse("#/games");
        assert_eq!(fragment.path, "/games");
        assert!(fragment.params.is_empty());
    }

    #[test]
    fn test_parse_without_hash_prefix() {
        assert_eq!(Fragment::parse("/orders").path, "/orders");
    }

    #[test]
    fn test_parse_empty_fragment() {
        assert_eq!(Fragment::parse(""), Fragment::default());
        assert_eq!(Fragment::parse("#").path, "");
    }

    #[test]
    fn test_parse_query_pairs() {
        let fragment = Fragment::parse("#/games?genre=RPG&page=2");
        assert_eq!(fragment.path, "/games");
        assert_eq!(fragment.params.get("genre").map(String::as_str), Some("RPG"));
        assert_eq!(fragment.params.get("page").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_parse_percent_decodes_keys_and_values() {
        let fragment = Fragment::parse("#/games?name=Half%20Life&caf%C3%A9=oui");
        assert_eq!(
            fragment.params.get("name").map(String::as_str),
            Some("Half Life")
        );
        assert_eq!(fragment.params.get("café").map(String::as_str), Some("oui"));
    }

    #[test]
    fn test_parse_value_less_pair() {
        let fragment = Fragment::parse("#/games?flag");
        assert_eq!(fragment.params.get("flag").map(String::as_str), Some(""));
    }

    #[test]
    fn test_malformed_escape_kept_literally() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("a%2"), "a%2");
    }
}
