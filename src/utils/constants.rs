// Claves de localStorage compartidas por toda la app

pub const KEY_ACCESS_TOKEN: &str = "access_token";
pub const KEY_REFRESH_TOKEN: &str = "refresh_token";
pub const KEY_USER_ROLE: &str = "user_role";
pub const KEY_LAST_ROUTE: &str = "last_route";
pub const KEY_FORCE_RELOAD_AFTER_AUTH: &str = "force_reload_after_auth";
pub const KEY_PWA_PROMPT_DISMISSED: &str = "pwa_prompt_dismissed";
