use valentine_core::Rect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Window};

const LOG_PREFIX: &str = "[valentine]";

fn tagged(s: &str) -> JsValue {
    JsValue::from_str(&format!("{LOG_PREFIX} {s}"))
}

/// Report a recoverable problem (bad config, failed fetch) on the console.
pub fn warn(s: &str) {
    web_sys::console::warn_1(&tagged(s));
}

pub fn log(s: &str) {
    web_sys::console::log_1(&tagged(s));
}

/// Wall clock in milliseconds, shared by event handlers and the frame loop.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Bounding box of the element with `id`, or `None` if it is not in the page.
pub fn element_rect(document: &Document, id: &str) -> Option<Rect> {
    let el = document.get_element_by_id(id)?;
    let r = el.get_bounding_client_rect();
    Some(Rect::new(r.left(), r.top(), r.width(), r.height()))
}

/// Build an absolute URL for an asset, taking into account the optional
/// `window.__BASE_URL` which is set by the host page.
pub fn asset_url(path: &str) -> String {
    let base = web_sys::window()
        .and_then(|w| {
            let v = js_sys::Reflect::get(&w, &JsValue::from_str("__BASE_URL")).ok()?;
            v.as_string()
        })
        .unwrap_or_else(|| "/".to_string());
    join_base(&base, path)
}

fn join_base(base: &str, path: &str) -> String {
    let p = path.trim();
    if p.starts_with("http://") || p.starts_with("https://") || p.starts_with("data:") {
        return p.to_string();
    }
    let base = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    };
    let p = p.trim_start_matches('/');
    format!("{}{}", base, p)
}

async fn fetch_text(window: &Window, url: &str) -> Result<String, String> {
    let value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|_| "network error".to_string())?;
    let resp: web_sys::Response = value
        .dyn_into()
        .map_err(|_| "not a Response".to_string())?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    let body = resp.text().map_err(|_| "body unavailable".to_string())?;
    wasm_bindgen_futures::JsFuture::from(body)
        .await
        .ok()
        .and_then(|v| v.as_string())
        .ok_or_else(|| "body is not text".to_string())
}

/// First URL in `urls` that yields a text body. Each miss is warned about.
pub async fn fetch_text_with_fallbacks(window: &Window, urls: &[&str]) -> Option<String> {
    for url in urls {
        match fetch_text(window, url).await {
            Ok(text) => return Some(text),
            Err(why) => warn(&format!("Fetching {url} failed: {why}")),
        }
    }
    None
}

/// Value of `key` in a `location.search` string, percent-decoded. A bare key
/// yields an empty string.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| match pair.split_once('=') {
            Some((k, v)) if k == key => Some(url_decode(v)),
            None if pair == key => Some(String::new()),
            _ => None,
        })
}

fn url_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_encoding::percent_decode_str(&s)
        .decode_utf8_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_param_lookup() {
        let q = "?seed=42&config=pink%20theme&empty=";
        assert_eq!(get_query_param(q, "seed").as_deref(), Some("42"));
        assert_eq!(get_query_param(q, "config").as_deref(), Some("pink theme"));
        assert_eq!(get_query_param(q, "empty").as_deref(), Some(""));
        assert_eq!(get_query_param(q, "missing"), None);
        assert_eq!(get_query_param("?a=b+c", "a").as_deref(), Some("b c"));
        assert_eq!(get_query_param("?flag&seed=7", "flag").as_deref(), Some(""));
        assert_eq!(get_query_param("?flag&seed=7", "seed").as_deref(), Some("7"));
        assert_eq!(get_query_param("?x=%3D1", "x").as_deref(), Some("=1"));
    }

    #[test]
    fn base_joining() {
        assert_eq!(join_base("/", "config/a.json"), "/config/a.json");
        assert_eq!(join_base("/app", "/config/a.json"), "/app/config/a.json");
        assert_eq!(join_base("/app/", "x.json"), "/app/x.json");
        assert_eq!(
            join_base("/app/", "https://cdn.example/x.json"),
            "https://cdn.example/x.json"
        );
    }
}
