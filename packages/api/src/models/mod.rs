//! Data models exchanged with the remote API.

mod de;
mod product;
mod report;
mod user;

pub use product::{Category, ImageUpload, Product, ProductDraft};
pub use report::{ClientDue, MonthlyClientCount, PaymentCounts};
pub use user::{Credentials, Role, User};
