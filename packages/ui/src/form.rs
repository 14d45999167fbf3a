//! # Form state
//!
//! [`FormState`] holds the text values of a form, their per-field errors and
//! the submission phase. Field errors are recomputed on every [`FormState::set`];
//! [`FormState::begin_submit`] re-checks everything and refuses to move to
//! [`FormPhase::Submitting`] while a required field is empty or a field is
//! invalid, so a blocked form never reaches the network.
//!
//! [`UserForm`] and [`ProductForm`] layer the entity-specific parts on top: which
//! fields are required, how values become a [`User`] or a [`ProductDraft`], and
//! for products the image that travels as a file part.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use api::{Category, ImageUpload, Product, ProductDraft, Role, User};

use crate::validation::{validate_product_field, validate_user_field};

pub const IMAGE_REQUIRED_MESSAGE: &str = "Selecciona una imagen";
pub const IMAGE_TYPE_MESSAGE: &str = "El archivo debe ser una imagen";

/// A form field: knows its label and how to validate a value.
pub trait FieldSpec: Copy + Eq + Hash + Debug + 'static {
    fn label(self) -> &'static str;
    fn validate(self, value: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError<F: FieldSpec> {
    #[error("required fields are empty: {0:?}")]
    Missing(Vec<F>),
    #[error("fields are invalid: {0:?}")]
    Invalid(Vec<F>),
    #[error("image is missing or not an image")]
    Image,
    #[error("a submission is already in flight")]
    Busy,
}

impl<F: FieldSpec> FormError<F> {
    /// Spanish text for the warning shown to the user.
    pub fn user_message(&self) -> String {
        let labels = |fields: &[F]| {
            fields
                .iter()
                .map(|f| f.label())
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self {
            FormError::Missing(fields) => {
                format!("Complete los campos obligatorios: {}", labels(fields))
            }
            FormError::Invalid(fields) => format!("Revise los campos: {}", labels(fields)),
            FormError::Image => IMAGE_REQUIRED_MESSAGE.to_string(),
            FormError::Busy => "Espere a que termine el envío anterior".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState<F: FieldSpec> {
    required: Vec<F>,
    values: HashMap<F, String>,
    errors: HashMap<F, String>,
    phase: FormPhase,
}

impl<F: FieldSpec> FormState<F> {
    pub fn new(required: &[F]) -> Self {
        Self {
            required: required.to_vec(),
            values: HashMap::new(),
            errors: HashMap::new(),
            phase: FormPhase::Editing,
        }
    }

    /// Prefill values without flagging anything yet.
    pub fn with_values(required: &[F], values: impl IntoIterator<Item = (F, String)>) -> Self {
        let mut state = Self::new(required);
        state.values.extend(values);
        state
    }

    pub fn is_required(&self, field: F) -> bool {
        self.required.contains(&field)
    }

    pub fn value(&self, field: F) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn error(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    fn check(&self, field: F, value: &str) -> Option<String> {
        if value.trim().is_empty() && !self.is_required(field) {
            None
        } else {
            field.validate(value)
        }
    }

    /// Store a value and recompute that field's error.
    pub fn set(&mut self, field: F, value: impl Into<String>) {
        let value = value.into();
        match self.check(field, &value) {
            Some(message) => self.errors.insert(field, message),
            None => self.errors.remove(&field),
        };
        self.values.insert(field, value);
    }

    pub fn missing_required(&self) -> Vec<F> {
        self.required
            .iter()
            .copied()
            .filter(|f| self.value(*f).trim().is_empty())
            .collect()
    }

    /// Validate every known field, record the errors, and enter `Submitting`.
    pub fn begin_submit(&mut self) -> Result<(), FormError<F>> {
        if self.is_submitting() {
            return Err(FormError::Busy);
        }

        let mut fields: Vec<F> = self.required.clone();
        fields.extend(self.values.keys().copied().filter(|f| !self.required.contains(f)));
        self.errors = fields
            .iter()
            .filter_map(|f| self.check(*f, self.value(*f)).map(|e| (*f, e)))
            .collect();

        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(FormError::Missing(missing));
        }
        if !self.errors.is_empty() {
            let invalid = fields
                .into_iter()
                .filter(|f| self.errors.contains_key(f))
                .collect();
            return Err(FormError::Invalid(invalid));
        }
        self.phase = FormPhase::Submitting;
        Ok(())
    }

    /// Back to `Editing`. A successful submission also clears every value.
    pub fn finish(&mut self, succeeded: bool) {
        self.phase = FormPhase::Editing;
        if succeeded {
            self.values.clear();
            self.errors.clear();
        }
    }
}

// -- users ------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    FirstName,
    LastName,
    Dni,
    Address,
    Phone,
    Mail,
    Password,
    BirthDate,
}

impl FieldSpec for UserField {
    fn label(self) -> &'static str {
        match self {
            UserField::FirstName => "Nombres",
            UserField::LastName => "Apellidos",
            UserField::Dni => "DNI",
            UserField::Address => "Dirección",
            UserField::Phone => "Teléfono",
            UserField::Mail => "Correo electrónico",
            UserField::Password => "Contraseña",
            UserField::BirthDate => "Fecha de nacimiento",
        }
    }

    fn validate(self, value: &str) -> Option<String> {
        validate_user_field(self, value)
    }
}

/// Required on the admin "new user" and "new client" forms.
pub const USER_REQUIRED: [UserField; 7] = [
    UserField::FirstName,
    UserField::LastName,
    UserField::Dni,
    UserField::Address,
    UserField::Phone,
    UserField::Mail,
    UserField::Password,
];

/// Self-registration also asks for the birth date.
pub const REGISTRATION_REQUIRED: [UserField; 8] = [
    UserField::FirstName,
    UserField::LastName,
    UserField::Dni,
    UserField::Address,
    UserField::Phone,
    UserField::Mail,
    UserField::Password,
    UserField::BirthDate,
];

/// Editing keeps the stored password when the field is left blank.
pub const USER_EDIT_REQUIRED: [UserField; 6] = [
    UserField::FirstName,
    UserField::LastName,
    UserField::Dni,
    UserField::Address,
    UserField::Phone,
    UserField::Mail,
];

/// A user form, either creating a record with `role` or editing `base`.
#[derive(Debug, Clone, PartialEq)]
pub struct UserForm {
    pub fields: FormState<UserField>,
    role: Role,
    base: Option<User>,
}

impl UserForm {
    pub fn new(role: Role, required: &[UserField]) -> Self {
        Self {
            fields: FormState::new(required),
            role,
            base: None,
        }
    }

    pub fn registration() -> Self {
        Self::new(Role::SystemUser, &REGISTRATION_REQUIRED)
    }

    pub fn for_edit(user: &User) -> Self {
        let values = [
            (UserField::FirstName, user.first_name.clone()),
            (UserField::LastName, user.last_name.clone()),
            (UserField::Dni, user.dni.clone()),
            (UserField::Address, user.address.clone()),
            (UserField::Phone, user.phone.clone()),
            (UserField::Mail, user.mail.clone()),
            (UserField::BirthDate, user.birth_date_input()),
        ];
        Self {
            fields: FormState::with_values(&USER_EDIT_REQUIRED, values),
            role: user.rol,
            base: Some(user.clone()),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn editing(&self) -> Option<&User> {
        self.base.as_ref()
    }

    pub fn set(&mut self, field: UserField, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    /// Validate and build the record to send.
    pub fn begin_submit(&mut self) -> Result<User, FormError<UserField>> {
        self.fields.begin_submit()?;
        let value = |f| self.fields.value(f).trim().to_string();
        let base = self.base.clone().unwrap_or_default();
        let password = match self.fields.value(UserField::Password) {
            p if p.trim().is_empty() => base.password.clone(),
            p => p.to_string(),
        };
        let birth_date = Some(value(UserField::BirthDate))
            .filter(|d| !d.is_empty())
            .or(base.birth_date.clone());
        Ok(User {
            id_user: base.id_user,
            first_name: value(UserField::FirstName),
            last_name: value(UserField::LastName),
            dni: value(UserField::Dni),
            address: value(UserField::Address),
            phone: value(UserField::Phone),
            mail: value(UserField::Mail),
            password,
            rol: self.role,
            birth_date,
        })
    }

    pub fn finish(&mut self, succeeded: bool) {
        if self.base.is_some() {
            self.fields.phase = FormPhase::Editing;
        } else {
            self.fields.finish(succeeded);
        }
    }
}

// -- products -----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Name,
    Description,
    NutritionalInformation,
    Category,
    Price,
    Stock,
}

impl FieldSpec for ProductField {
    fn label(self) -> &'static str {
        match self {
            ProductField::Name => "Nombre",
            ProductField::Description => "Descripción",
            ProductField::NutritionalInformation => "Información nutricional",
            ProductField::Category => "Categoría",
            ProductField::Price => "Precio",
            ProductField::Stock => "Stock",
        }
    }

    fn validate(self, value: &str) -> Option<String> {
        validate_product_field(self, value)
    }
}

pub const PRODUCT_REQUIRED: [ProductField; 6] = [
    ProductField::Name,
    ProductField::Description,
    ProductField::NutritionalInformation,
    ProductField::Category,
    ProductField::Price,
    ProductField::Stock,
];

/// A product form. Creating requires an image; editing keeps the stored one
/// unless a replacement is chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub fields: FormState<ProductField>,
    image: Option<ImageUpload>,
    image_error: Option<String>,
    base: Option<Product>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductForm {
    pub fn new() -> Self {
        Self {
            fields: FormState::with_values(
                &PRODUCT_REQUIRED,
                [(ProductField::Category, Category::default().to_string())],
            ),
            image: None,
            image_error: None,
            base: None,
        }
    }

    pub fn for_edit(product: &Product) -> Self {
        let values = [
            (ProductField::Name, product.name.clone()),
            (ProductField::Description, product.description.clone()),
            (
                ProductField::NutritionalInformation,
                product.nutritional_information.clone(),
            ),
            (ProductField::Category, product.category.to_string()),
            (ProductField::Price, product.price.to_string()),
            (ProductField::Stock, product.stock.to_string()),
        ];
        Self {
            fields: FormState::with_values(&PRODUCT_REQUIRED, values),
            image: None,
            image_error: None,
            base: Some(product.clone()),
        }
    }

    pub fn editing(&self) -> Option<&Product> {
        self.base.as_ref()
    }

    pub fn set(&mut self, field: ProductField, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    pub fn image_error(&self) -> Option<&str> {
        self.image_error.as_deref()
    }

    /// Accept a chosen file; anything that is not an image is refused.
    pub fn set_image(&mut self, upload: ImageUpload) {
        if upload.is_image() {
            self.image = Some(upload);
            self.image_error = None;
        } else {
            self.image = None;
            self.image_error = Some(IMAGE_TYPE_MESSAGE.to_string());
        }
    }

    fn check_image(&mut self) -> Result<(), FormError<ProductField>> {
        if self.image.is_none() && self.base.is_none() {
            self.image_error
                .get_or_insert_with(|| IMAGE_REQUIRED_MESSAGE.to_string());
        }
        if self.image_error.is_some() {
            return Err(FormError::Image);
        }
        Ok(())
    }

    fn text(&self, field: ProductField) -> String {
        self.fields.value(field).trim().to_string()
    }

    fn numbers(&self) -> Result<(Category, f64, i64), FormError<ProductField>> {
        let category = Category::parse(self.fields.value(ProductField::Category))
            .ok_or(FormError::Invalid(vec![ProductField::Category]))?;
        let price = self
            .text(ProductField::Price)
            .parse()
            .map_err(|_| FormError::Invalid(vec![ProductField::Price]))?;
        let stock = self
            .text(ProductField::Stock)
            .parse()
            .map_err(|_| FormError::Invalid(vec![ProductField::Stock]))?;
        Ok((category, price, stock))
    }

    fn validate_all(&mut self) -> Result<(Category, f64, i64), FormError<ProductField>> {
        let fields = self.fields.begin_submit();
        let image = self.check_image();
        if let Err(e) = fields {
            return Err(e);
        }
        if let Err(e) = image.and_then(|_| self.numbers().map(|_| ())) {
            self.fields.phase = FormPhase::Editing;
            return Err(e);
        }
        self.numbers()
    }

    /// Validate a new product and build its draft, image included.
    pub fn begin_create(&mut self) -> Result<ProductDraft, FormError<ProductField>> {
        let (category, price, stock) = self.validate_all()?;
        let Some(image) = self.image.clone() else {
            self.fields.phase = FormPhase::Editing;
            return Err(FormError::Image);
        };
        Ok(ProductDraft {
            name: self.text(ProductField::Name),
            description: self.text(ProductField::Description),
            nutritional_information: self.text(ProductField::NutritionalInformation),
            category,
            price,
            stock,
            image,
        })
    }

    /// Validate changes to the product being edited. Returns the updated
    /// record and the replacement image, if one was chosen.
    pub fn begin_update(
        &mut self,
    ) -> Result<(Product, Option<ImageUpload>), FormError<ProductField>> {
        let (category, price, stock) = self.validate_all()?;
        let base = self.base.clone().unwrap_or_default();
        let product = Product {
            name: self.text(ProductField::Name),
            description: self.text(ProductField::Description),
            nutritional_information: self.text(ProductField::NutritionalInformation),
            category,
            price,
            stock,
            ..base
        };
        Ok((product, self.image.clone()))
    }

    /// A created product resets the form; an edit keeps its values.
    pub fn finish(&mut self, succeeded: bool) {
        if succeeded && self.base.is_none() {
            *self = Self::new();
        } else {
            self.fields.phase = FormPhase::Editing;
        }
    }
}
