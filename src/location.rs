use crate::query;
use std::fmt;
use url::Url;

/// The path and search portion of a page location.
///
/// This stands in for the browser's `window.location`. It is read before a navigation and
/// replaced by the navigation. `search` is either empty or starts with `?`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "RawLocation")]
pub struct Location {
    pathname: String,
    search: String,
}

#[derive(serde::Deserialize)]
struct RawLocation {
    pathname: String,
    #[serde(default)]
    search: String,
}

impl From<RawLocation> for Location {
    fn from(raw: RawLocation) -> Self {
        Self::new(raw.pathname, raw.search)
    }
}

impl Location {
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        let mut search = search.into();
        if !search.is_empty() && !search.starts_with('?') {
            search.insert(0, '?');
        }
        Self {
            pathname: pathname.into(),
            search,
        }
    }

    pub fn from_url(url: &Url) -> Self {
        Self {
            pathname: url.path().to_owned(),
            // `http://h/p?` has an empty query, `window.location.search` reports that as "".
            search: url
                .query()
                .filter(|q| !q.is_empty())
                .map(|q| format!("?{q}"))
                .unwrap_or_default(),
        }
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// The target to navigate to: `pathname + search`.
    pub fn href(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }

    #[must_use]
    pub fn with_pathname(&self, pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: self.search.clone(),
        }
    }

    #[must_use]
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self::new(self.pathname.clone(), search)
    }

    /// Sets `key` to `value` in this location's search, see [`query::upsert`].
    #[must_use]
    pub fn upsert(&self, key: &str, value: Option<&str>) -> Self {
        self.with_search(query::upsert(&self.search, key, value))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pathname)?;
        f.write_str(&self.search)
    }
}

impl From<&Url> for Location {
    fn from(url: &Url) -> Self {
        Self::from_url(url)
    }
}

#[cfg(test)]
mod tests {
    use super::Location;
    use assertr::prelude::*;
    use url::Url;

    #[test]
    fn search_gets_leading_question_mark() {
        let location = Location::new("/data", "a=1");
        assert_that(location.search()).is_equal_to("?a=1");
        assert_that(location.href()).is_equal_to("/data?a=1".to_owned());
    }

    #[test]
    fn empty_search_stays_empty() {
        let location = Location::new("/data", "");
        assert_that(location.href()).is_equal_to("/data".to_owned());
    }

    #[test]
    fn from_url_splits_path_and_query() {
        let url = Url::parse("http://127.0.0.1:3000/explore?x=1&y=2#top").unwrap();
        let location = Location::from_url(&url);
        assert_that(location.pathname()).is_equal_to("/explore");
        assert_that(location.search()).is_equal_to("?x=1&y=2");

        let url = Url::parse("http://127.0.0.1:3000/").unwrap();
        assert_that(Location::from(&url)).is_equal_to(Location::new("/", ""));
    }

    #[test]
    fn from_url_treats_empty_query_as_absent() {
        let url = Url::parse("http://127.0.0.1:3000/p?").unwrap();
        let location = Location::from_url(&url);
        assert_that(location.search()).is_equal_to("");
        assert_that(location.upsert("a", Some("1")).href()).is_equal_to("/p?a=1".to_owned());
    }

    #[test]
    fn deserializing_normalizes_search() {
        let location: Location =
            serde_json::from_str(r#"{"pathname":"/p","search":"a=1"}"#).unwrap();
        assert_that(location.search()).is_equal_to("?a=1");
        assert_that(location.upsert("b", Some("2")).href()).is_equal_to("/p?a=1&b=2".to_owned());

        let location: Location = serde_json::from_str(r#"{"pathname":"/p"}"#).unwrap();
        assert_that(location).is_equal_to(Location::new("/p", ""));
    }

    #[test]
    fn serialization_keeps_fields() {
        let location = Location::new("/p", "?a=1");
        let json = serde_json::to_string(&location).unwrap();
        assert_that(json.as_str()).is_equal_to(r#"{"pathname":"/p","search":"?a=1"}"#);
        let back: Location = serde_json::from_str(&json).unwrap();
        assert_that(back).is_equal_to(location);
    }

    #[test]
    fn upsert_keeps_pathname() {
        let location = Location::new("/explore", "?x=1").upsert("y", Some("2"));
        assert_that(location.to_string()).is_equal_to("/explore?x=1&y=2".to_owned());
    }
}
