use valentine_core::Config;
use wasm_bindgen::JsValue;
use web_sys::Window;

use crate::constants::{CONFIG_DIR, HOST_CONFIG_KEY};
use crate::utils::{asset_url, fetch_text_with_fallbacks, get_query_param, log, warn};

fn describe_error(source: &str, e: &serde_json::Error) -> String {
    use serde_json::error::Category;
    let kind = match e.classify() {
        Category::Syntax => "malformed JSON",
        Category::Eof => "truncated JSON",
        Category::Data => "unexpected value",
        Category::Io => "read error",
    };
    format!(
        "Ignoring config from {source}: {kind} at line {} column {}",
        e.line(),
        e.column()
    )
}

fn parse(source: &str, text: &str) -> Option<Config> {
    match Config::from_json(text) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn(&describe_error(source, &e));
            None
        }
    }
}

fn query(window: &Window, key: &str) -> Option<String> {
    let search = window.location().search().ok()?;
    get_query_param(&search, key)
}

/// Inline config the host page may set on `window.__VALENTINE_CONFIG`, either
/// as an object or as a JSON string.
fn host_config_json(window: &Window) -> Option<String> {
    let v = js_sys::Reflect::get(window, &JsValue::from_str(HOST_CONFIG_KEY)).ok()?;
    if v.is_undefined() || v.is_null() {
        return None;
    }
    if let Some(s) = v.as_string() {
        return Some(s);
    }
    js_sys::JSON::stringify(&v).ok().map(String::from)
}

/// Resolve the session config. Later sources replace earlier ones:
/// defaults, then the host hook, then `?config=<name>`.
pub async fn load_config(window: &Window) -> Config {
    let mut cfg = Config::default();
    if let Some(text) = host_config_json(window)
        && let Some(c) = parse(HOST_CONFIG_KEY, &text)
    {
        cfg = c;
    }
    if let Some(name) = query(window, "config") {
        let file = if name.ends_with(".json") {
            name.clone()
        } else {
            format!("{CONFIG_DIR}/{name}.json")
        };
        match fetch_text_with_fallbacks(window, &[&asset_url(&file), &file]).await {
            Some(text) => {
                if let Some(c) = parse(&file, &text) {
                    log(&format!("Loaded config {file}"));
                    cfg = c;
                }
            }
            None => warn(&format!("Config {file} could not be fetched")),
        }
    }
    cfg
}

/// PRNG seed: `?seed=<u64>` when present, otherwise derived from the clock and
/// `Math.random`.
pub fn session_seed(window: &Window) -> u64 {
    if let Some(raw) = query(window, "seed") {
        match raw.trim().parse::<u64>() {
            Ok(seed) => return seed,
            Err(_) => warn(&format!("Invalid seed {raw:?}, using a random one")),
        }
    }
    let noise = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
    noise ^ (js_sys::Date::now() as u64).rotate_left(32)
}
