//! # Listing state
//!
//! [`ListState`] owns a fetched collection together with its load state, the
//! current 1-based page and the search term. Pages have a fixed size; the page
//! count is `ceil(N / size)` and zero for an empty collection.
//!
//! Search is a case-insensitive substring match over every field a record
//! exposes through [`Searchable`]. Its scope is configurable:
//!
//! - [`SearchScope::Collection`] filters the whole collection, then paginates
//!   the matches.
//! - [`SearchScope::Page`] slices the current page first and filters only
//!   those rows, so matches on other pages stay hidden.

use api::{Product, User};
use store::SearchScope;

/// A record that can be matched against a search term.
pub trait Searchable {
    /// Every field value, rendered as text.
    fn search_fields(&self) -> Vec<String>;

    fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|v| v.to_lowercase().contains(&term))
    }
}

/// A record with a server-assigned id.
pub trait Identified {
    fn id(&self) -> Option<i64>;
}

/// Everything shown in the table. The password and the role flag are left out.
impl Searchable for User {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id_user.map(|id| id.to_string()).unwrap_or_default(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.dni.clone(),
            self.address.clone(),
            self.phone.clone(),
            self.mail.clone(),
            self.birth_date.clone().unwrap_or_default(),
        ]
    }
}

impl Identified for User {
    fn id(&self) -> Option<i64> {
        self.id_user
    }
}

/// Everything shown on the card except the image URL.
impl Searchable for Product {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id_product.map(|id| id.to_string()).unwrap_or_default(),
            self.name.clone(),
            self.description.clone(),
            self.nutritional_information.clone(),
            self.category.to_string(),
            self.price.to_string(),
            self.stock.to_string(),
        ]
    }
}

impl Identified for Product {
    fn id(&self) -> Option<i64> {
        self.id_product
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    items: Vec<T>,
    load: LoadState,
    page: usize,
    page_size: usize,
    search: String,
    scope: SearchScope,
}

fn page_count_for(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size)
}

impl<T: Searchable + Identified + Clone> ListState<T> {
    pub fn new(page_size: usize, scope: SearchScope) -> Self {
        Self {
            items: Vec::new(),
            load: LoadState::Loading,
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            scope,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn set_loading(&mut self) {
        self.load = LoadState::Loading;
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.load = LoadState::Ready;
        self.clamp_page();
    }

    /// Keep whatever was loaded before; only the state changes.
    pub fn set_failed(&mut self, message: impl Into<String>) {
        self.load = LoadState::Failed(message.into());
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn scope(&self) -> SearchScope {
        self.scope
    }

    /// Rows that paginate: the whole collection, or the matches when the
    /// search covers the collection.
    fn paginated_len(&self) -> usize {
        match self.scope {
            SearchScope::Collection => self.items.iter().filter(|i| i.matches(&self.search)).count(),
            SearchScope::Page => self.items.len(),
        }
    }

    pub fn page_count(&self) -> usize {
        page_count_for(self.paginated_len(), self.page_size)
    }

    /// Jump to `page`, clamped to `1..=page_count` (page 1 when empty).
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count().max(1));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Any change of the search term goes back to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    fn clamp_page(&mut self) {
        self.set_page(self.page);
    }

    fn window<'a>(&self, rows: impl Iterator<Item = &'a T>) -> impl Iterator<Item = &'a T>
    where
        T: 'a,
    {
        rows.skip((self.page - 1) * self.page_size).take(self.page_size)
    }

    /// The rows to display for the current page and search term.
    pub fn visible(&self) -> Vec<&T> {
        match self.scope {
            SearchScope::Collection => self
                .window(self.items.iter().filter(|i| i.matches(&self.search)))
                .collect(),
            SearchScope::Page => self
                .window(self.items.iter())
                .filter(|i| i.matches(&self.search))
                .collect(),
        }
    }

    /// Drop the record with `id`, keeping the current page in range.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let Some(index) = self.items.iter().position(|i| i.id() == Some(id)) else {
            return false;
        };
        self.items.remove(index);
        self.clamp_page();
        true
    }

    /// Replace the record sharing `item`'s id.
    pub fn replace(&mut self, item: T) -> bool {
        let id = item.id();
        match self.items.iter_mut().find(|i| id.is_some() && i.id() == id) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Role;

    fn user(id: i64, first: &str, last: &str) -> User {
        User {
            id_user: Some(id),
            first_name: first.to_string(),
            last_name: last.to_string(),
            dni: format!("{:08}", id),
            mail: format!("{}{}@mail.com", first.to_lowercase(), id),
            rol: Role::Client,
            ..User::default()
        }
    }

    /// Ten clients; "Maria" is on page 1 and page 2.
    fn clients() -> Vec<User> {
        let mut users: Vec<User> = (1..=10).map(|i| user(i, "Cliente", "Perez")).collect();
        users[0] = user(1, "Maria", "Lopez");
        users[9] = user(10, "MARIA", "Huaman");
        users
    }

    fn ids(rows: &[&User]) -> Vec<i64> {
        rows.iter().filter_map(|u| u.id_user).collect()
    }

    #[test]
    fn test_search_skips_hidden_fields() {
        let mut maria = user(1, "Maria", "Lopez");
        maria.password = "fresa2024".to_string();
        assert!(maria.matches("lopez"));
        assert!(maria.matches("00000001"));
        assert!(!maria.matches("fresa2024"));

        let product = api::Product {
            id_product: Some(3),
            name: "Yogurt de fresa".to_string(),
            url_image: "https://cdn/durazno.png".to_string(),
            ..api::Product::default()
        };
        assert!(product.matches("FRESA"));
        assert!(!product.matches("durazno"));
    }

    #[test]
    fn test_starts_loading_on_page_one() {
        let list: ListState<User> = ListState::new(9, SearchScope::Collection);
        assert_eq!(list.load_state(), &LoadState::Loading);
        assert_eq!(list.page(), 1);
        assert_eq!(list.page_count(), 0);
        assert!(list.visible().is_empty());
    }

    #[test]
    fn test_page_count_is_ceiling() {
        let mut list = ListState::new(9, SearchScope::Collection);
        for (n, pages) in [(0, 0), (1, 1), (9, 1), (10, 2), (18, 2), (19, 3)] {
            list.set_items((1..=n).map(|i| user(i, "A", "B")).collect());
            assert_eq!(list.page_count(), pages as usize, "n = {n}");
        }
    }

    #[test]
    fn test_pages_are_full_except_last() {
        let mut list = ListState::new(9, SearchScope::Collection);
        list.set_items(clients());
        assert_eq!(list.visible().len(), 9);
        list.next_page();
        assert_eq!(list.page(), 2);
        assert_eq!(ids(&list.visible()), vec![10]);
        list.next_page();
        assert_eq!(list.page(), 2);
        list.set_page(0);
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_collection_search_finds_every_match() {
        let mut list = ListState::new(9, SearchScope::Collection);
        list.set_items(clients());
        list.next_page();
        list.set_search("maria");
        assert_eq!(list.page(), 1);
        assert_eq!(ids(&list.visible()), vec![1, 10]);
        assert_eq!(list.page_count(), 1);
    }

    #[test]
    fn test_page_search_only_sees_current_page() {
        let mut list = ListState::new(9, SearchScope::Page);
        list.set_items(clients());
        list.set_search("maria");
        assert_eq!(ids(&list.visible()), vec![1]);
        assert_eq!(list.page_count(), 2);
        list.next_page();
        assert_eq!(ids(&list.visible()), vec![10]);
    }

    #[test]
    fn test_search_matches_any_field() {
        let mut list = ListState::new(9, SearchScope::Collection);
        list.set_items(clients());
        list.set_search("00000004");
        assert_eq!(ids(&list.visible()), vec![4]);
        list.set_search("HUAMAN");
        assert_eq!(ids(&list.visible()), vec![10]);
        list.set_search("   ");
        assert_eq!(list.visible().len(), 9);
    }

    #[test]
    fn test_remove_clamps_page() {
        let mut list = ListState::new(9, SearchScope::Collection);
        list.set_items(clients());
        list.set_page(2);
        assert!(list.remove(10));
        assert_eq!(list.items().len(), 9);
        assert_eq!(list.page(), 1);
        assert!(!list.remove(10));
        assert_eq!(list.items().len(), 9);
    }

    #[test]
    fn test_failed_keeps_items() {
        let mut list = ListState::new(9, SearchScope::Collection);
        list.set_items(clients());
        list.set_failed("sin conexión");
        assert_eq!(list.load_state(), &LoadState::Failed("sin conexión".into()));
        assert_eq!(list.items().len(), 10);
    }

    #[test]
    fn test_replace_by_id() {
        let mut list = ListState::new(9, SearchScope::Collection);
        list.set_items(clients());
        assert!(list.replace(user(4, "Rosa", "Diaz")));
        assert_eq!(list.items()[3].first_name, "Rosa");
        assert!(!list.replace(user(99, "Nadie", "Nunca")));
    }

    #[test]
    fn test_product_search_includes_category() {
        let mut list = ListState::new(9, SearchScope::Collection);
        list.set_items(vec![
            Product {
                id_product: Some(1),
                name: "Fresa".into(),
                category: api::Category::Yogurt,
                ..Product::default()
            },
            Product {
                id_product: Some(2),
                name: "Durazno".into(),
                category: api::Category::Mermelada,
                ..Product::default()
            },
        ]);
        list.set_search("mermelada");
        assert_eq!(list.visible().len(), 1);
        assert_eq!(list.visible()[0].id_product, Some(2));
    }
}
