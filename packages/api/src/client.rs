//! # Typed client for the remote API
//!
//! [`ApiClient`] exposes one async method per remote operation. Each method
//! issues exactly one request through its [`HttpBackend`] and returns
//! `Result<T, ApiError>`: there is no "success: false" value to check, a
//! rejected call is always [`ApiError::Rejected`] with the server's message.
//! Mutations return the server's confirmation message.
//!
//! | Method | Request |
//! |--------|---------|
//! | [`list_users`](ApiClient::list_users) | `GET /user` |
//! | [`create_user`](ApiClient::create_user) | `POST /user/insert` (JSON) |
//! | [`update_user`](ApiClient::update_user) | `PUT /user/update` (JSON) |
//! | [`delete_user`](ApiClient::delete_user) | `DELETE /user/Delete/{id}` |
//! | [`login`](ApiClient::login) | `POST /user/login` (JSON) |
//! | [`list_products`](ApiClient::list_products) | `GET /product` |
//! | [`create_product`](ApiClient::create_product) | `POST /product/insert` (multipart) |
//! | [`update_product`](ApiClient::update_product) | `PUT /product/Update` (multipart) |
//! | [`delete_product`](ApiClient::delete_product) | `DELETE /product/Delete/{id}` |
//! | [`payment_counts`](ApiClient::payment_counts) | `GET /report/payment-counts` |
//! | [`client_dues`](ApiClient::client_dues) | `GET /report/client-due` |
//! | [`client_counts_by_month`](ApiClient::client_counts_by_month) | `GET /report/client-counts` |

use serde::de::DeserializeOwned;

use crate::backend::{ApiRequest, HttpBackend, Method};
use crate::envelope::{decode, Accepted};
use crate::models::{
    ClientDue, Credentials, ImageUpload, MonthlyClientCount, PaymentCounts, Product,
    ProductDraft, User,
};
use crate::ApiError;

/// API client over an abstract transport.
#[derive(Debug, Clone)]
pub struct ApiClient<B: HttpBackend> {
    backend: B,
}

impl<B: HttpBackend> ApiClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Accepted<T>, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        let response = self.backend.send(request).await?;
        let result = decode(response);
        if let Err(ref e) = result {
            tracing::warn!("{} {} -> {}", method, path, e);
        }
        result
    }

    async fn mutate(&self, request: ApiRequest) -> Result<String, ApiError> {
        Ok(self.call::<serde_json::Value>(request).await?.msg)
    }

    fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(value).map_err(|e| ApiError::InvalidRequest(e.to_string()))
    }

    // -- users --------------------------------------------------------------

    /// Every record of the users table, system users and clients alike.
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(self
            .call::<Vec<User>>(ApiRequest::get("/user"))
            .await?
            .data
            .unwrap_or_default())
    }

    pub async fn create_user(&self, user: &User) -> Result<String, ApiError> {
        let body = Self::to_json(user)?;
        self.mutate(ApiRequest::json(Method::Post, "/user/insert", body))
            .await
    }

    /// Replace a user record. The user must carry its `IdUser`.
    pub async fn update_user(&self, user: &User) -> Result<String, ApiError> {
        if user.id_user.is_none() {
            return Err(ApiError::InvalidRequest(
                "cannot update a user without IdUser".to_string(),
            ));
        }
        let body = Self::to_json(user)?;
        self.mutate(ApiRequest::json(Method::Put, "/user/update", body))
            .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<String, ApiError> {
        self.mutate(ApiRequest::delete(format!("/user/Delete/{id}")))
            .await
    }

    /// Check credentials and return the matching profile.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let body = Self::to_json(credentials)?;
        self.call::<User>(ApiRequest::json(Method::Post, "/user/login", body))
            .await?
            .into_data()
    }

    // -- products -----------------------------------------------------------

    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self
            .call::<Vec<Product>>(ApiRequest::get("/product"))
            .await?
            .data
            .unwrap_or_default())
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> Result<String, ApiError> {
        self.mutate(ApiRequest::multipart(
            Method::Post,
            "/product/insert",
            draft.form_parts(),
        ))
        .await
    }

    /// Replace a product's fields, and its image when `image` is given.
    pub async fn update_product(
        &self,
        product: &Product,
        image: Option<&ImageUpload>,
    ) -> Result<String, ApiError> {
        if product.id_product.is_none() {
            return Err(ApiError::InvalidRequest(
                "cannot update a product without IdProduct".to_string(),
            ));
        }
        self.mutate(ApiRequest::multipart(
            Method::Put,
            "/product/Update",
            product.form_parts(image),
        ))
        .await
    }

    pub async fn delete_product(&self, id: i64) -> Result<String, ApiError> {
        self.mutate(ApiRequest::delete(format!("/product/Delete/{id}")))
            .await
    }

    // -- reports ------------------------------------------------------------

    pub async fn payment_counts(&self) -> Result<PaymentCounts, ApiError> {
        self.call(ApiRequest::get("/report/payment-counts"))
            .await?
            .into_data()
    }

    pub async fn client_dues(&self) -> Result<Vec<ClientDue>, ApiError> {
        Ok(self
            .call::<Vec<ClientDue>>(ApiRequest::get("/report/client-due"))
            .await?
            .data
            .unwrap_or_default())
    }

    pub async fn client_counts_by_month(&self) -> Result<Vec<MonthlyClientCount>, ApiError> {
        Ok(self
            .call::<Vec<MonthlyClientCount>>(ApiRequest::get("/report/client-counts"))
            .await?
            .data
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FormPart, RequestBody};
    use crate::memory::{Failure, MemoryBackend};
    use crate::models::{Category, Role};

    fn client() -> ApiClient<MemoryBackend> {
        ApiClient::new(MemoryBackend::new())
    }

    fn user(first: &str, dni: &str, rol: Role) -> User {
        User {
            id_user: None,
            first_name: first.to_string(),
            last_name: "Perez".to_string(),
            dni: dni.to_string(),
            address: "Av. Grau 100".to_string(),
            phone: "987654321".to_string(),
            mail: format!("{}@mail.com", first.to_lowercase()),
            password: "clave123".to_string(),
            rol,
            birth_date: None,
        }
    }

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Yogurt de fresa".to_string(),
            description: "Botella de 1 litro".to_string(),
            nutritional_information: "110 kcal por porción".to_string(),
            category: Category::Yogurt,
            price: 12.5,
            stock: 30,
            image: ImageUpload::new("fresa.png", Some("image/png".to_string()), vec![137, 80]),
        }
    }

    #[tokio::test]
    async fn test_user_crud() {
        let client = client();
        assert!(client.list_users().await.unwrap().is_empty());

        let msg = client.create_user(&user("Maria", "45678912", Role::Client)).await.unwrap();
        assert_eq!(msg, "Usuario registrado correctamente");

        let mut users = client.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        let id = users[0].id_user.unwrap();

        users[0].address = "Jr. Nuevo 5".to_string();
        client.update_user(&users[0]).await.unwrap();
        assert_eq!(client.list_users().await.unwrap()[0].address, "Jr. Nuevo 5");

        client.delete_user(id).await.unwrap();
        assert!(client.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_user_sends_json_to_insert() {
        let client = client();
        client.create_user(&user("Ana", "11111111", Role::SystemUser)).await.unwrap();

        let requests = client.backend().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "/user/insert");
        let RequestBody::Json(ref body) = requests[0].body else {
            panic!("expected JSON body");
        };
        assert_eq!(body["FirstName"], "Ana");
        assert_eq!(body["Rol"], 0);
        assert!(body.get("IdUser").is_none());
    }

    #[tokio::test]
    async fn test_rejections_surface_as_errors() {
        let client = client();
        client.create_user(&user("Maria", "45678912", Role::Client)).await.unwrap();

        let err = client
            .create_user(&user("Maria", "45678912", Role::Client))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Rejected("El usuario ya existe".to_string()));

        let err = client.delete_user(999).await.unwrap_err();
        assert_eq!(err, ApiError::Rejected("Usuario no encontrado".to_string()));

        let err = client.delete_product(999).await.unwrap_err();
        assert_eq!(err, ApiError::Rejected("Producto no encontrado".to_string()));
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let client = client();
        client.backend().fail_next(Failure::Transport("offline".to_string()));
        assert_eq!(
            client.list_products().await.unwrap_err(),
            ApiError::Transport("offline".to_string())
        );

        client.backend().fail_next(Failure::Reject("Mantenimiento".to_string()));
        assert_eq!(
            client.list_users().await.unwrap_err(),
            ApiError::Rejected("Mantenimiento".to_string())
        );

        // Back to normal afterwards.
        assert!(client.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_every_operation_surfaces_rejection() {
        let client = client();
        let user_id = client.backend().seed_user(user("Maria", "45678912", Role::Client));
        client.create_product(&draft()).await.unwrap();
        let product = client.list_products().await.unwrap().remove(0);
        let stored_user = client.list_users().await.unwrap().remove(0);
        let product_id = product.id_product.unwrap();
        let image = ImageUpload::new("nueva.jpg", Some("image/jpeg".to_string()), vec![1]);
        let credentials = Credentials {
            user_request: "maria@mail.com".to_string(),
            password: "clave123".to_string(),
        };
        let sent_before = client.backend().requests().len();

        macro_rules! assert_rejected {
            ($op:literal, $call:expr) => {{
                let msg = format!("{} rechazado", $op);
                client.backend().fail_next(Failure::Reject(msg.clone()));
                let err = $call.await.map(|_| ()).unwrap_err();
                assert_eq!(err, ApiError::Rejected(msg), "{}", $op);
            }};
        }

        assert_rejected!("list_users", client.list_users());
        assert_rejected!("create_user", client.create_user(&user("Ana", "11111111", Role::Client)));
        assert_rejected!("update_user", client.update_user(&stored_user));
        assert_rejected!("delete_user", client.delete_user(user_id));
        assert_rejected!("login", client.login(&credentials));
        assert_rejected!("list_products", client.list_products());
        assert_rejected!("create_product", client.create_product(&draft()));
        assert_rejected!("update_product", client.update_product(&product, None));
        assert_rejected!("update_product_image", client.update_product(&product, Some(&image)));
        assert_rejected!("delete_product", client.delete_product(product_id));
        assert_rejected!("payment_counts", client.payment_counts());
        assert_rejected!("client_dues", client.client_dues());
        assert_rejected!("client_counts_by_month", client.client_counts_by_month());

        assert_eq!(client.backend().requests().len(), sent_before + 13);
        // Nothing was applied.
        assert_eq!(client.backend().users().len(), 1);
        assert_eq!(client.backend().products().len(), 1);
    }

    #[tokio::test]
    async fn test_update_without_id_is_not_sent() {
        let client = client();
        let err = client
            .update_user(&user("Luis", "22222222", Role::Client))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));

        let err = client
            .update_product(&Product::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));

        assert!(client.backend().requests().is_empty());
    }

    #[tokio::test]
    async fn test_product_roundtrip() {
        let client = client();
        let draft = draft();
        client.create_product(&draft).await.unwrap();

        let products = client.list_products().await.unwrap();
        assert_eq!(products.len(), 1);
        let created = &products[0];
        assert!(created.id_product.is_some());
        assert!(!created.url_image.is_empty());
        assert_eq!(created.name, draft.name);
        assert_eq!(created.description, draft.description);
        assert_eq!(created.nutritional_information, draft.nutritional_information);
        assert_eq!(created.category, draft.category);
        assert_eq!(created.price, draft.price);
        assert_eq!(created.stock, draft.stock);

        let RequestBody::Multipart(ref parts) = client.backend().requests()[0].body else {
            panic!("expected multipart body");
        };
        assert!(parts.iter().any(|p| matches!(p, FormPart::File { name, .. } if name == "file")));
    }

    #[tokio::test]
    async fn test_product_update_keeps_image_unless_replaced() {
        let client = client();
        client.create_product(&draft()).await.unwrap();
        let mut product = client.list_products().await.unwrap().remove(0);
        let original_url = product.url_image.clone();

        product.stock = 5;
        product.category = Category::Mermelada;
        client.update_product(&product, None).await.unwrap();
        let updated = client.list_products().await.unwrap().remove(0);
        assert_eq!(updated.stock, 5);
        assert_eq!(updated.category, Category::Mermelada);
        assert_eq!(updated.url_image, original_url);

        let image = ImageUpload::new("nueva.jpg", Some("image/jpeg".to_string()), vec![1]);
        client.update_product(&updated, Some(&image)).await.unwrap();
        let replaced = client.list_products().await.unwrap().remove(0);
        assert_ne!(replaced.url_image, original_url);
        assert!(replaced.url_image.ends_with("nueva.jpg"));
    }

    #[tokio::test]
    async fn test_login() {
        let client = client();
        client.backend().seed_user(user("Maria", "45678912", Role::SystemUser));

        let profile = client
            .login(&Credentials {
                user_request: "maria@mail.com".to_string(),
                password: "clave123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(profile.first_name, "Maria");

        let err = client
            .login(&Credentials {
                user_request: "45678912".to_string(),
                password: "mala".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected("Usuario o contraseña incorrectos".to_string())
        );
    }

    #[tokio::test]
    async fn test_reports() {
        let client = client();
        client.backend().seed_user(user("Maria", "45678912", Role::Client));
        client.backend().seed_user(user("Ana", "11111111", Role::SystemUser));
        client.backend().set_payment_count(4);
        client.backend().set_client_counts(vec![MonthlyClientCount {
            month: "2024-03".to_string(),
            count: 2,
        }]);

        let counts = client.payment_counts().await.unwrap();
        assert_eq!(counts.client_count, 1);
        assert_eq!(counts.product_count, 0);
        assert_eq!(counts.payment_count, 4);

        let months = client.client_counts_by_month().await.unwrap();
        assert_eq!(months[0].month_label(), "marzo");
        assert!(client.client_dues().await.unwrap().is_empty());
    }
}
