//! # In-memory API emulation
//!
//! [`MemoryBackend`] answers the same routes as the remote API from tables
//! held in memory, with the same envelope and status codes. It records every
//! request it receives, so tests can assert how many calls a flow made, and it
//! can be told to fail the next request at the transport or API level.
//!
//! Clones share state, mirroring how every `ApiClient` in the app talks to the
//! one remote server.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use serde_json::{json, Value};

use crate::backend::{ApiRequest, ApiResponse, FormPart, HttpBackend, Method, RequestBody};
use crate::envelope::Envelope;
use crate::models::{
    Category, ClientDue, Credentials, ImageUpload, MonthlyClientCount, Product, Role, User,
};
use crate::ApiError;

/// A failure to inject into the next request.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// The request never reaches the server.
    Transport(String),
    /// The server answers `success: false` with this message.
    Reject(String),
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    products: Vec<Product>,
    next_user_id: i64,
    next_product_id: i64,
    payment_count: i64,
    client_dues: Vec<ClientDue>,
    client_counts: Vec<MonthlyClientCount>,
    requests: Vec<ApiRequest>,
    fail_next: Option<Failure>,
}

/// In-memory HttpBackend for testing.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

fn reply<T: Serialize>(status: u16, envelope: &Envelope<T>) -> ApiResponse {
    ApiResponse {
        status,
        body: serde_json::to_string(envelope).unwrap_or_default(),
    }
}

fn ok(msg: &str) -> ApiResponse {
    reply::<Value>(200, &Envelope::ok(msg, None))
}

fn ok_data<T: Serialize>(data: T) -> ApiResponse {
    reply(200, &Envelope::ok("", Some(data)))
}

fn rejected(status: u16, msg: &str) -> ApiResponse {
    reply::<Value>(status, &Envelope::rejected(msg))
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert a user directly, assigning an id when it has none.
    pub fn seed_user(&self, mut user: User) -> i64 {
        let mut state = self.state();
        let id = match user.id_user {
            Some(id) => id,
            None => {
                state.next_user_id += 1;
                state.next_user_id
            }
        };
        state.next_user_id = state.next_user_id.max(id);
        user.id_user = Some(id);
        state.users.push(user);
        id
    }

    /// Insert a product directly, assigning an id when it has none.
    pub fn seed_product(&self, mut product: Product) -> i64 {
        let mut state = self.state();
        let id = match product.id_product {
            Some(id) => id,
            None => {
                state.next_product_id += 1;
                state.next_product_id
            }
        };
        state.next_product_id = state.next_product_id.max(id);
        product.id_product = Some(id);
        state.products.push(product);
        id
    }

    pub fn set_payment_count(&self, count: i64) {
        self.state().payment_count = count;
    }

    pub fn set_client_dues(&self, dues: Vec<ClientDue>) {
        self.state().client_dues = dues;
    }

    pub fn set_client_counts(&self, counts: Vec<MonthlyClientCount>) {
        self.state().client_counts = counts;
    }

    /// Fail the next request, then go back to normal.
    pub fn fail_next(&self, failure: Failure) {
        self.state().fail_next = Some(failure);
    }

    pub fn users(&self) -> Vec<User> {
        self.state().users.clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.state().products.clone()
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state().requests.clone()
    }

    pub fn request_count(&self, method: Method) -> usize {
        self.state()
            .requests
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let segments: Vec<&str> = request
            .path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match (request.method, segments.as_slice()) {
            (Method::Get, ["user"]) => ok_data(self.users()),
            (Method::Post, ["user", "insert"]) => self.insert_user(&request.body),
            (Method::Put, ["user", "update"]) => self.update_user(&request.body),
            (Method::Delete, ["user", "Delete", id]) => self.delete_user(id),
            (Method::Post, ["user", "login"]) => self.login(&request.body),
            (Method::Get, ["product"]) => ok_data(self.products()),
            (Method::Post, ["product", "insert"]) => self.insert_product(&request.body),
            (Method::Put, ["product", "Update"]) => self.update_product(&request.body),
            (Method::Delete, ["product", "Delete", id]) => self.delete_product(id),
            (Method::Get, ["report", "payment-counts"]) => {
                let state = self.state();
                let client_count = state.users.iter().filter(|u| u.rol == Role::Client).count();
                ok_data(json!({
                    "clientCount": client_count,
                    "productCount": state.products.len(),
                    "paymentCount": state.payment_count,
                }))
            }
            (Method::Get, ["report", "client-due"]) => ok_data(self.state().client_dues.clone()),
            (Method::Get, ["report", "client-counts"]) => {
                ok_data(self.state().client_counts.clone())
            }
            _ => rejected(404, "Ruta no encontrada"),
        }
    }

    fn insert_user(&self, body: &RequestBody) -> ApiResponse {
        let Some(user) = json_body::<User>(body) else {
            return rejected(400, "Datos de usuario inválidos");
        };
        let duplicate = self
            .state()
            .users
            .iter()
            .any(|u| u.dni == user.dni || u.mail.eq_ignore_ascii_case(&user.mail));
        if duplicate {
            return rejected(400, "El usuario ya existe");
        }
        self.seed_user(User {
            id_user: None,
            ..user
        });
        ok("Usuario registrado correctamente")
    }

    fn update_user(&self, body: &RequestBody) -> ApiResponse {
        let Some(user) = json_body::<User>(body) else {
            return rejected(400, "Datos de usuario inválidos");
        };
        let mut state = self.state();
        match state
            .users
            .iter_mut()
            .find(|u| u.id_user.is_some() && u.id_user == user.id_user)
        {
            Some(existing) => {
                *existing = user;
                ok("Usuario actualizado correctamente")
            }
            None => rejected(404, "Usuario no encontrado"),
        }
    }

    fn delete_user(&self, id: &str) -> ApiResponse {
        let Ok(id) = id.parse::<i64>() else {
            return rejected(400, "Id inválido");
        };
        let mut state = self.state();
        let before = state.users.len();
        state.users.retain(|u| u.id_user != Some(id));
        if state.users.len() < before {
            ok("Usuario eliminado correctamente")
        } else {
            rejected(404, "Usuario no encontrado")
        }
    }

    fn login(&self, body: &RequestBody) -> ApiResponse {
        let Some(credentials) = json_body::<Credentials>(body) else {
            return rejected(400, "Credenciales inválidas");
        };
        let state = self.state();
        let found = state.users.iter().find(|u| {
            (u.mail.eq_ignore_ascii_case(&credentials.user_request)
                || u.dni == credentials.user_request)
                && u.password == credentials.password
        });
        match found {
            Some(user) => reply(200, &Envelope::ok("Bienvenido", Some(user.clone()))),
            None => rejected(401, "Usuario o contraseña incorrectos"),
        }
    }

    fn insert_product(&self, body: &RequestBody) -> ApiResponse {
        let fields = match product_from_parts(body) {
            Ok(fields) => fields,
            Err(msg) => return rejected(400, &msg),
        };
        let (mut product, image) = fields;
        let Some(image) = image else {
            return rejected(400, "La imagen es obligatoria");
        };
        let mut state = self.state();
        state.next_product_id += 1;
        let id = state.next_product_id;
        product.id_product = Some(id);
        product.url_image = image_url(id, &image);
        state.products.push(product);
        ok("Producto registrado correctamente")
    }

    fn update_product(&self, body: &RequestBody) -> ApiResponse {
        let (product, image) = match product_from_parts(body) {
            Ok(fields) => fields,
            Err(msg) => return rejected(400, &msg),
        };
        let Some(id) = product.id_product else {
            return rejected(400, "IdProduct es obligatorio");
        };
        let mut state = self.state();
        match state.products.iter_mut().find(|p| p.id_product == Some(id)) {
            Some(existing) => {
                let url_image = match &image {
                    Some(image) => image_url(id, image),
                    None => existing.url_image.clone(),
                };
                *existing = Product {
                    url_image,
                    ..product
                };
                ok("Producto actualizado correctamente")
            }
            None => rejected(404, "Producto no encontrado"),
        }
    }

    fn delete_product(&self, id: &str) -> ApiResponse {
        let Ok(id) = id.parse::<i64>() else {
            return rejected(400, "Id inválido");
        };
        let mut state = self.state();
        let before = state.products.len();
        state.products.retain(|p| p.id_product != Some(id));
        if state.products.len() < before {
            ok("Producto eliminado correctamente")
        } else {
            rejected(404, "Producto no encontrado")
        }
    }
}

fn json_body<T: serde::de::DeserializeOwned>(body: &RequestBody) -> Option<T> {
    match body {
        RequestBody::Json(value) => serde_json::from_value(value.clone()).ok(),
        _ => None,
    }
}

fn image_url(id: i64, image: &ImageUpload) -> String {
    format!("memory://product/{id}/{}", image.file_name)
}

fn product_from_parts(body: &RequestBody) -> Result<(Product, Option<ImageUpload>), String> {
    let RequestBody::Multipart(parts) = body else {
        return Err("Se esperaba multipart/form-data".to_string());
    };
    let text = |key: &str| {
        parts.iter().find_map(|p| match p {
            FormPart::Text { name, value } if name == key => Some(value.clone()),
            _ => None,
        })
    };
    let image = parts.iter().find_map(|p| match p {
        FormPart::File { name, upload } if name == "file" => Some(upload.clone()),
        _ => None,
    });
    let required = |key: &str| text(key).ok_or_else(|| format!("{key} es obligatorio"));

    let id_product = match text("IdProduct") {
        Some(id) => Some(id.parse::<i64>().map_err(|_| "IdProduct inválido".to_string())?),
        None => None,
    };
    let category = required("Category")?;
    let price = required("Price")?;
    let stock = required("Stock")?;
    let product = Product {
        id_product,
        name: required("Name")?,
        description: required("Description")?,
        nutritional_information: required("NutritionalInformation")?,
        category: Category::parse(&category).ok_or("Categoría inválida")?,
        price: price.parse().map_err(|_| "Precio inválido".to_string())?,
        stock: stock.parse().map_err(|_| "Stock inválido".to_string())?,
        url_image: String::new(),
    };
    Ok((product, image))
}

impl HttpBackend for MemoryBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let failure = {
            let mut state = self.state();
            state.requests.push(request.clone());
            state.fail_next.take()
        };
        match failure {
            Some(Failure::Transport(msg)) => Err(ApiError::Transport(msg)),
            Some(Failure::Reject(msg)) => Ok(rejected(500, &msg)),
            None => Ok(self.handle(&request)),
        }
    }
}
