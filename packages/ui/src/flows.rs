//! Async flows shared by the views.
//!
//! Each flow validates first and only then talks to the API, moving the form
//! or list through its states around the call. State is reached through
//! [`StateCell`] so the same flow runs against a component `Signal` and
//! against a plain `&mut` in tests. No borrow is held across an `.await`.

use std::future::Future;

use api::{ApiClient, ApiError, HttpBackend, User};
use dioxus::prelude::*;

use crate::form::{FieldSpec, FormError, ProductField, ProductForm, UserField, UserForm};
use crate::listing::{Identified, ListState, Searchable};

/// Somewhere a `T` can be updated in place.
pub trait StateCell<T> {
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R;
}

impl<T: 'static> StateCell<T> for Signal<T> {
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut *self.write())
    }
}

impl<T> StateCell<T> for &mut T {
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        f(self)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError<F: FieldSpec> {
    #[error(transparent)]
    Form(#[from] FormError<F>),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Create the user described by `form`. Returns the server's message.
pub async fn submit_user<B: HttpBackend>(
    client: &ApiClient<B>,
    mut form: impl StateCell<UserForm>,
) -> Result<String, SubmitError<UserField>> {
    let user = form.update(|f| f.begin_submit())?;
    let result = client.create_user(&user).await;
    form.update(|f| f.finish(result.is_ok()));
    Ok(result?)
}

/// Save changes to the user `form` was opened on. Returns the server's
/// message and the record as saved.
pub async fn save_user_changes<B: HttpBackend>(
    client: &ApiClient<B>,
    mut form: impl StateCell<UserForm>,
) -> Result<(String, User), SubmitError<UserField>> {
    let user = form.update(|f| f.begin_submit())?;
    let result = client.update_user(&user).await;
    form.update(|f| f.finish(result.is_ok()));
    Ok((result?, user))
}

/// Create the product described by `form`, image included.
pub async fn submit_product<B: HttpBackend>(
    client: &ApiClient<B>,
    mut form: impl StateCell<ProductForm>,
) -> Result<String, SubmitError<ProductField>> {
    let draft = form.update(|f| f.begin_create())?;
    let result = client.create_product(&draft).await;
    form.update(|f| f.finish(result.is_ok()));
    Ok(result?)
}

/// Save changes to the product `form` was opened on.
pub async fn save_product_changes<B: HttpBackend>(
    client: &ApiClient<B>,
    mut form: impl StateCell<ProductForm>,
) -> Result<String, SubmitError<ProductField>> {
    let (product, image) = form.update(|f| f.begin_update())?;
    let result = client.update_product(&product, image.as_ref()).await;
    form.update(|f| f.finish(result.is_ok()));
    Ok(result?)
}

/// Fill `list` from `fetch`, going through `Loading`.
pub async fn load_list<T, Fut>(mut list: impl StateCell<ListState<T>>, fetch: Fut)
where
    T: Searchable + Identified + Clone,
    Fut: Future<Output = Result<Vec<T>, ApiError>>,
{
    list.update(|l| l.set_loading());
    match fetch.await {
        Ok(items) => list.update(|l| l.set_items(items)),
        Err(e) => {
            tracing::error!("failed to load list: {}", e);
            list.update(|l| l.set_failed(e.user_message()));
        }
    }
}

/// Await `delete` and, once it succeeds, drop `id` from `list`.
pub async fn delete_and_remove<T, Fut>(
    mut list: impl StateCell<ListState<T>>,
    id: i64,
    delete: Fut,
) -> Result<String, ApiError>
where
    T: Searchable + Identified + Clone,
    Fut: Future<Output = Result<String, ApiError>>,
{
    let msg = delete.await?;
    list.update(|l| l.remove(id));
    Ok(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{Category, Failure, ImageUpload, MemoryBackend, Method, Product, Role};
    use store::SearchScope;

    use crate::form::{PRODUCT_REQUIRED, REGISTRATION_REQUIRED, USER_REQUIRED};

    fn client() -> (MemoryBackend, ApiClient<MemoryBackend>) {
        let backend = MemoryBackend::new();
        (backend.clone(), ApiClient::new(backend))
    }

    fn client_form() -> UserForm {
        let mut form = UserForm::new(Role::Client, &USER_REQUIRED);
        form.set(UserField::FirstName, "Maria");
        form.set(UserField::LastName, "Quispe");
        form.set(UserField::Dni, "45678912");
        form.set(UserField::Address, "Av. Sol 123");
        form.set(UserField::Phone, "987654321");
        form.set(UserField::Mail, "maria@mail.com");
        form.set(UserField::Password, "secreto");
        form
    }

    fn registration_form() -> UserForm {
        let filled = client_form();
        let mut form = UserForm::registration();
        for field in USER_REQUIRED {
            form.set(field, filled.fields.value(field));
        }
        form.set(UserField::BirthDate, "1995-04-12");
        form
    }

    fn product(name: &str) -> Product {
        Product {
            name: name.to_string(),
            description: "Botella".to_string(),
            nutritional_information: "100 kcal".to_string(),
            category: Category::Yogurt,
            price: 10.0,
            stock: 5,
            ..Product::default()
        }
    }

    #[tokio::test]
    async fn test_missing_field_never_reaches_network() {
        let (backend, client) = client();
        let mut form = client_form();
        form.set(UserField::Mail, "");

        let err = submit_user(&client, &mut form).await.unwrap_err();
        assert_eq!(
            err,
            SubmitError::Form(FormError::Missing(vec![UserField::Mail]))
        );
        assert!(backend.requests().is_empty());
        assert!(!form.fields.is_submitting());
    }

    #[tokio::test]
    async fn test_any_missing_user_field_never_reaches_network() {
        let (backend, client) = client();
        for (required, make) in [
            (&USER_REQUIRED[..], client_form as fn() -> UserForm),
            (&REGISTRATION_REQUIRED[..], registration_form),
        ] {
            for &field in required {
                let mut form = make();
                form.set(field, "");
                let err = submit_user(&client, &mut form).await.unwrap_err();
                assert_eq!(
                    err,
                    SubmitError::Form(FormError::Missing(vec![field])),
                    "{field:?}"
                );
                assert!(!form.fields.is_submitting(), "{field:?}");
            }
        }
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_any_missing_product_field_never_reaches_network() {
        let (backend, client) = client();
        for field in PRODUCT_REQUIRED {
            let mut form = ProductForm::new();
            form.set(ProductField::Name, "Fresa");
            form.set(ProductField::Description, "Botella");
            form.set(ProductField::NutritionalInformation, "100 kcal");
            form.set(ProductField::Price, "10");
            form.set(ProductField::Stock, "5");
            form.set_image(ImageUpload::new("f.png", Some("image/png".into()), vec![7]));
            form.set(field, "");

            let err = submit_product(&client, &mut form).await.unwrap_err();
            assert_eq!(
                err,
                SubmitError::Form(FormError::Missing(vec![field])),
                "{field:?}"
            );

            let mut edit = ProductForm::for_edit(&product("Fresa"));
            edit.set(field, "  ");
            assert!(save_product_changes(&client, &mut edit).await.is_err(), "{field:?}");
        }
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_submit_user_resets_on_success() {
        let (backend, client) = client();
        let mut form = client_form();

        let msg = submit_user(&client, &mut form).await.unwrap();
        assert_eq!(msg, "Usuario registrado correctamente");
        assert_eq!(form.fields.value(UserField::FirstName), "");
        assert_eq!(backend.users()[0].rol, Role::Client);
    }

    #[tokio::test]
    async fn test_submit_user_keeps_values_on_rejection() {
        let (backend, client) = client();
        let mut form = client_form();
        backend.fail_next(Failure::Reject("El usuario ya existe".into()));

        let err = submit_user(&client, &mut form).await.unwrap_err();
        assert_eq!(
            err,
            SubmitError::Api(ApiError::Rejected("El usuario ya existe".into()))
        );
        assert_eq!(form.fields.value(UserField::Dni), "45678912");
        assert!(!form.fields.is_submitting());
    }

    #[tokio::test]
    async fn test_save_user_changes() {
        let (backend, client) = client();
        submit_user(&client, &mut client_form()).await.unwrap();
        let stored = backend.users().remove(0);

        let mut form = UserForm::for_edit(&stored);
        form.set(UserField::Address, "Jr. Cusco 9");
        let (_, saved) = save_user_changes(&client, &mut form).await.unwrap();
        assert_eq!(saved.id_user, stored.id_user);
        assert_eq!(backend.users()[0].address, "Jr. Cusco 9");
        assert_eq!(backend.users()[0].password, "secreto");
    }

    #[tokio::test]
    async fn test_submit_product_without_image_sends_nothing() {
        let (backend, client) = client();
        let mut form = ProductForm::new();
        form.set(ProductField::Name, "Fresa");
        form.set(ProductField::Description, "Botella");
        form.set(ProductField::NutritionalInformation, "100 kcal");
        form.set(ProductField::Price, "10");
        form.set(ProductField::Stock, "5");

        let err = submit_product(&client, &mut form).await.unwrap_err();
        assert_eq!(err, SubmitError::Form(FormError::Image));
        assert!(backend.requests().is_empty());

        form.set_image(ImageUpload::new("f.png", Some("image/png".into()), vec![7]));
        submit_product(&client, &mut form).await.unwrap();
        assert_eq!(backend.products().len(), 1);
        assert_eq!(form, ProductForm::new());
    }

    #[tokio::test]
    async fn test_save_product_changes_keeps_image() {
        let (backend, client) = client();
        let id = backend.seed_product(Product {
            url_image: "https://cdn/fresa.png".into(),
            ..product("Fresa")
        });
        let stored = backend.products().remove(0);

        let mut form = ProductForm::for_edit(&stored);
        form.set(ProductField::Price, "11.5");
        save_product_changes(&client, &mut form).await.unwrap();

        let saved = backend.products().remove(0);
        assert_eq!(saved.id_product, Some(id));
        assert_eq!(saved.price, 11.5);
        assert_eq!(saved.url_image, "https://cdn/fresa.png");
    }

    #[tokio::test]
    async fn test_load_list_failure_is_reported() {
        let (backend, client) = client();
        backend.fail_next(Failure::Transport("offline".into()));
        let mut list: ListState<User> = ListState::new(9, SearchScope::Collection);

        load_list(&mut list, client.list_users()).await;
        assert_eq!(
            list.load_state(),
            &crate::listing::LoadState::Failed(api::GENERIC_FAILURE_MESSAGE.into())
        );
    }

    #[tokio::test]
    async fn test_delete_and_remove_issues_one_delete() {
        let (backend, client) = client();
        for name in ["Fresa", "Durazno", "Lucuma"] {
            backend.seed_product(product(name));
        }
        let mut list = ListState::new(9, SearchScope::Collection);
        load_list(&mut list, client.list_products()).await;
        assert_eq!(list.items().len(), 3);

        let msg = delete_and_remove(&mut list, 2, client.delete_product(2))
            .await
            .unwrap();
        assert_eq!(msg, "Producto eliminado correctamente");
        assert_eq!(backend.request_count(Method::Delete), 1);
        let names: Vec<_> = list.items().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Fresa", "Lucuma"]);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_row() {
        let (backend, client) = client();
        backend.seed_product(product("Fresa"));
        let mut list = ListState::new(9, SearchScope::Collection);
        load_list(&mut list, client.list_products()).await;

        backend.fail_next(Failure::Reject("No se puede eliminar".into()));
        let err = delete_and_remove(&mut list, 1, client.delete_product(1))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "No se puede eliminar");
        assert_eq!(list.items().len(), 1);
    }
}
