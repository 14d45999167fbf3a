mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod app_layout;
pub use app_layout::{AppLayoutView, NavTarget};

mod home;
pub use home::HomeView;

mod login;
pub use login::LoginView;

mod user_form;
pub use user_form::{UserEditDialog, UserFormMode, UserFormView};

mod user_list;
pub use user_list::UserListView;

mod product_form;
pub use product_form::{ProductEditDialog, ProductFormView};

mod product_list;
pub use product_list::ProductListView;
