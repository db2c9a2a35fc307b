use axum::http::{header, HeaderMap, HeaderValue};
use axum_extra::extract::cookie::CookieJar;
use quill_client::KeyValueStore;

/// Attributes for every cookie the site writes.
#[derive(Clone, Debug)]
pub struct CookiePolicy {
    pub secure: bool,
    pub max_age_secs: u64,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            secure: true,
            max_age_secs: 604800,
        }
    }
}

/// Client storage backed by the browser's cookies: reads come from the
/// request, writes are collected and sent back as `Set-Cookie` headers.
#[derive(Clone, Debug)]
pub struct CookieStore {
    jar: CookieJar,
    changes: Vec<(String, Option<String>)>,
    policy: CookiePolicy,
}

impl CookieStore {
    pub fn from_headers(headers: &HeaderMap, policy: CookiePolicy) -> Self {
        Self {
            jar: CookieJar::from_headers(headers),
            changes: Vec::new(),
            policy,
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// One `Set-Cookie` value per touched key, last write wins.
    pub fn set_cookie_headers(&self) -> Vec<HeaderValue> {
        let mut seen: Vec<&str> = Vec::new();
        let mut values = Vec::new();

        for (name, value) in self.changes.iter().rev() {
            if seen.contains(&name.as_str()) {
                continue;
            }
            seen.push(name.as_str());

            let cookieValue = match value {
                Some(v) => self.render(name, v, self.policy.max_age_secs),
                None => self.render(name, "", 0),
            };
            if let Ok(headerValue) = HeaderValue::from_str(&cookieValue) {
                values.push(headerValue);
            }
        }

        values.reverse();
        values
    }

    /// Appends the pending `Set-Cookie` headers to `headers`.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for value in self.set_cookie_headers() {
            headers.append(header::SET_COOKIE, value);
        }
    }

    fn render(&self, name: &str, value: &str, maxAge: u64) -> String {
        let secure = if self.policy.secure { "; Secure" } else { "" };
        format!("{name}={value}; HttpOnly{secure}; SameSite=Strict; Path=/; Max-Age={maxAge}")
    }
}

impl KeyValueStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        if let Some((_, value)) = self.changes.iter().rev().find(|(name, _)| name == key) {
            return value.clone();
        }
        self.jar
            .get(key)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }

    fn set(&mut self, key: &str, value: &str) {
        self.changes.push((key.to_string(), Some(value.to_string())));
    }

    fn remove(&mut self, key: &str) {
        self.changes.push((key.to_string(), None));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn reads_request_cookies() {
        let store = CookieStore::from_headers(
            &request_with("token=abc.def.ghi; liked_post_3=1"),
            CookiePolicy::default(),
        );

        assert_eq!(store.get("token").as_deref(), Some("abc.def.ghi"));
        assert_eq!(store.get("liked_post_3").as_deref(), Some("1"));
        assert!(store.get("missing").is_none());
        assert!(!store.has_changes());
    }

    #[test]
    fn writes_shadow_request_and_render_once() {
        let mut store = CookieStore::from_headers(
            &request_with("token=old"),
            CookiePolicy {
                secure: false,
                max_age_secs: 60,
            },
        );

        store.set("token", "new");
        store.remove("token");
        store.set("dark_mode", "0");

        assert!(store.get("token").is_none());
        assert_eq!(
            store.set_cookie_headers(),
            vec![
                HeaderValue::from_static("token=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0"),
                HeaderValue::from_static("dark_mode=0; HttpOnly; SameSite=Strict; Path=/; Max-Age=60"),
            ]
        );
    }

    #[test]
    fn secure_flag_follows_policy() {
        let mut store = CookieStore::from_headers(&HeaderMap::new(), CookiePolicy::default());
        store.set("token", "t");

        let mut headers = HeaderMap::new();
        store.apply(&mut headers);
        assert_eq!(
            headers.get(header::SET_COOKIE).unwrap(),
            "token=t; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age=604800"
        );
    }
}
