use dioxus::prelude::*;
use ui::views::{ProductFormView, ProductListView};

#[component]
pub fn Products() -> Element {
    rsx! {
        ProductListView {}
    }
}

#[component]
pub fn NewProduct() -> Element {
    rsx! {
        ProductFormView {}
    }
}
