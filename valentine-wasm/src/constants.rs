/// Element ids the host page is expected to provide.
pub const BG_HEARTS_ID: &str = "bgHearts";
pub const PROMPT_ID: &str = "prompt";
pub const BTN_YES_ID: &str = "btnYes";
pub const BTN_NO_ID: &str = "btnNo";
pub const NO_PLACEHOLDER_ID: &str = "noPlaceholder";
pub const SUCCESS_ID: &str = "success";
pub const CONFETTI_ID: &str = "confetti";

/// Host page hook holding an inline JSON config object.
pub const HOST_CONFIG_KEY: &str = "__VALENTINE_CONFIG";
/// Directory (relative to the base URL) searched for `?config=<name>`.
pub const CONFIG_DIR: &str = "config";
