mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod shell;
pub use shell::Shell;

mod home;
pub use home::{Home, NotFound};

mod users;
pub use users::{Clients, NewClient, NewUser, Users};

mod products;
pub use products::{NewProduct, Products};
