pub mod api_client;
pub mod token_store;
pub mod notify;
pub mod install_prompt;

pub use api_client::{ApiClient, ApiError, AuthApi, OrdersApi};
pub use install_prompt::InstallPromptService;
pub use notify::{Notice, NoticeLevel, Notifier, ToastNotifier};
pub use token_store::{LocalTokenStore, StoredCredentials, TokenStore};
