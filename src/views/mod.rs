pub mod admin_customers;
pub mod admin_distributors;
pub mod admin_orders;
pub mod login;
pub mod order_detail;
pub mod order_new;
pub mod orders;
pub mod shell;
pub mod toast;

pub use admin_customers::render_admin_customers;
pub use admin_distributors::render_admin_distributors;
pub use admin_orders::render_admin_orders;
pub use login::render_login;
pub use order_detail::render_order_detail;
pub use order_new::render_order_new;
pub use orders::render_orders;
pub use shell::{render_loading_screen, render_shell};
pub use toast::render_toasts;
