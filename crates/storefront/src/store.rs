//! The storefront's single state owner.
//!
//! [`Storefront`] owns the catalog, the cart and the durable storage backend.
//! Every cart mutation goes through it and is persisted before it becomes
//! visible, so the stored cart never lags the in-memory one.

use tiny_shop_core::ProductId;
use tracing::{debug, info, instrument, warn};

use crate::cart::{AddOutcome, Cart, CartLine};
use crate::catalog::Catalog;
use crate::storage::{LocalStorage, StorageError};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// Catalog, cart and storage, owned together.
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    storage: Box<dyn LocalStorage>,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("catalog", &self.catalog)
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Build the state from whatever cart `storage` holds.
    ///
    /// The catalog starts empty and loading. See [`restore_cart`] for how a
    /// missing or unreadable cart is handled.
    #[must_use]
    pub fn restore(storage: Box<dyn LocalStorage>) -> Self {
        let cart = restore_cart(storage.as_ref());
        Self {
            catalog: Catalog::new(),
            cart,
            storage,
        }
    }

    /// The product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Mutable access for the catalog loader.
    pub const fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The storage backend.
    #[must_use]
    pub fn storage(&self) -> &dyn LocalStorage {
        self.storage.as_ref()
    }

    /// Add one unit of the catalog product `id` to the cart.
    ///
    /// Returns `Ok(None)` without touching the cart or storage when `id` is
    /// not in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated cart cannot be persisted. The
    /// in-memory cart is left as it was.
    #[instrument(skip(self))]
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<Option<AddOutcome>, StorageError> {
        let Some(product) = self.catalog.find(id) else {
            debug!("add ignored: product not in catalog");
            return Ok(None);
        };

        let mut next = self.cart.clone();
        let outcome = next.add(product);
        self.commit(next)?;

        debug!(?outcome, "added to cart");
        Ok(Some(outcome))
    }

    /// Remove the cart line for `id`, if any.
    ///
    /// The cart is persisted even when nothing was removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated cart cannot be persisted. The
    /// in-memory cart is left as it was.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: ProductId) -> Result<bool, StorageError> {
        let mut next = self.cart.clone();
        let removed = next.remove(id);
        self.commit(next)?;

        debug!(removed, "remove from cart");
        Ok(removed)
    }

    /// Write the current cart to storage as a full replacement.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the write fails.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        write_cart(self.storage.as_mut(), &self.cart)
    }

    /// Make `next` the current cart and persist it, restoring the previous
    /// cart if the write fails.
    fn commit(&mut self, next: Cart) -> Result<(), StorageError> {
        let previous = std::mem::replace(&mut self.cart, next);
        if let Err(e) = self.persist() {
            self.cart = previous;
            return Err(e);
        }
        Ok(())
    }
}

fn write_cart(storage: &mut dyn LocalStorage, cart: &Cart) -> Result<(), StorageError> {
    let value = serde_json::to_string(cart)?;
    storage.set_item(CART_STORAGE_KEY, &value)
}

/// Read the stored cart.
///
/// Empty storage gives an empty cart. A storage read error or a value that
/// does not parse is logged and also gives an empty cart; the bad value is
/// overwritten by the next successful persist. Parsed lines are normalized
/// with [`Cart::from_lines`].
#[must_use]
pub fn restore_cart(storage: &dyn LocalStorage) -> Cart {
    let raw = match storage.get_item(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("no stored cart");
            return Cart::new();
        }
        Err(e) => {
            warn!(error = %e, "could not read stored cart, starting empty");
            return Cart::new();
        }
    };

    match serde_json::from_str::<Vec<CartLine>>(&raw) {
        Ok(lines) => {
            let cart = Cart::from_lines(lines);
            let totals = cart.totals();
            info!(
                lines = cart.lines().len(),
                item_count = totals.item_count,
                total = %totals.total,
                "cart restored"
            );
            cart
        }
        Err(e) => {
            warn!(error = %e, "stored cart is malformed, starting empty");
            Cart::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use tiny_shop_core::{Price, Product};

    fn product(id: i32, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::new(price.parse().unwrap()).unwrap(),
            description: format!("About product {id}"),
            image: format!("https://img.example/{id}.jpg"),
            category: String::new(),
        }
    }

    fn store_with_catalog(storage: impl LocalStorage + 'static, products: Vec<Product>) -> Storefront {
        let mut store = Storefront::restore(Box::new(storage));
        *store.catalog_mut() = Catalog::ready(products);
        store
    }

    fn stored_cart(store: &Storefront) -> Option<String> {
        store.storage().get_item(CART_STORAGE_KEY).unwrap()
    }

    /// Storage whose writes always fail.
    struct ReadOnlyStorage(MemoryStorage);

    impl LocalStorage for ReadOnlyStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get_item(key)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                path: "readonly".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn test_empty_storage_restores_empty_cart() {
        let store = Storefront::restore(Box::new(MemoryStorage::new()));
        assert!(store.cart().is_empty());
        assert_eq!(store.cart().totals().total.to_fixed(), "0.00");
        assert_eq!(store.cart().item_count(), 0);
    }

    #[test]
    fn test_malformed_storage_restores_empty_cart() {
        let store = Storefront::restore(Box::new(MemoryStorage::with_item(
            CART_STORAGE_KEY,
            "{not json",
        )));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_restore_normalizes_lines() {
        let stored = r#"[
            {"id":1,"title":"A","price":1.5,"description":"","image":"","quantity":1},
            {"id":2,"title":"B","price":2,"description":"","image":"","quantity":0},
            {"id":1,"title":"A","price":1.5,"description":"","image":"","quantity":2}
        ]"#;
        let store = Storefront::restore(Box::new(MemoryStorage::with_item(
            CART_STORAGE_KEY,
            stored,
        )));

        assert_eq!(store.cart().lines().len(), 1);
        assert_eq!(store.cart().item_count(), 3);
    }

    #[test]
    fn test_add_scenario_persists_each_step() {
        let mut store = store_with_catalog(MemoryStorage::new(), vec![product(1, "9.99")]);
        let id = ProductId::new(1);

        assert_eq!(store.add_to_cart(id).unwrap(), Some(AddOutcome::Inserted));
        assert_eq!(store.cart().total().to_fixed(), "9.99");

        assert_eq!(
            store.add_to_cart(id).unwrap(),
            Some(AddOutcome::Incremented(2))
        );
        assert_eq!(store.cart().total().to_fixed(), "19.98");
        let persisted: Vec<CartLine> = serde_json::from_str(&stored_cart(&store).unwrap()).unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].quantity, 2);

        assert!(store.remove_from_cart(id).unwrap());
        assert!(store.cart().is_empty());
        assert_eq!(stored_cart(&store).as_deref(), Some("[]"));
    }

    #[test]
    fn test_add_unknown_product_is_noop() {
        let mut store = store_with_catalog(MemoryStorage::new(), vec![product(1, "1.00")]);

        assert_eq!(store.add_to_cart(ProductId::new(99)).unwrap(), None);
        assert!(store.cart().is_empty());
        assert_eq!(stored_cart(&store), None);
    }

    #[test]
    fn test_remove_unknown_product_is_noop() {
        let mut store = store_with_catalog(MemoryStorage::new(), vec![product(1, "1.00")]);
        store.add_to_cart(ProductId::new(1)).unwrap();
        let before = store.cart().clone();

        assert!(!store.remove_from_cart(ProductId::new(7)).unwrap());
        assert_eq!(store.cart(), &before);
    }

    #[test]
    fn test_persisted_cart_round_trips() {
        let mut store = store_with_catalog(
            MemoryStorage::new(),
            vec![product(1, "109.95"), product(2, "22.3")],
        );
        store.add_to_cart(ProductId::new(2)).unwrap();
        store.add_to_cart(ProductId::new(1)).unwrap();
        store.add_to_cart(ProductId::new(2)).unwrap();

        let storage = MemoryStorage::with_item(CART_STORAGE_KEY, &stored_cart(&store).unwrap());
        let restored = restore_cart(&storage);

        assert_eq!(&restored, store.cart());
    }

    #[test]
    fn test_restore_huge_price_cart_does_not_panic() {
        let stored = r#"[{"id":1,"title":"Yacht","price":50000000000000000000000000000,"description":"","image":"","quantity":2}]"#;
        let store = Storefront::restore(Box::new(MemoryStorage::with_item(
            CART_STORAGE_KEY,
            stored,
        )));

        assert_eq!(store.cart().item_count(), 2);
        assert_eq!(
            store.cart().total().to_fixed(),
            "79228162514264337593543950335.00"
        );
    }

    #[test]
    fn test_persist_writes_current_cart() {
        let mut store = Storefront::restore(Box::new(MemoryStorage::new()));
        assert_eq!(stored_cart(&store), None);

        store.persist().unwrap();
        assert_eq!(stored_cart(&store).as_deref(), Some("[]"));
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let mut store = store_with_catalog(
            ReadOnlyStorage(MemoryStorage::new()),
            vec![product(1, "1.00")],
        );

        let result = store.add_to_cart(ProductId::new(1));

        assert!(matches!(result, Err(StorageError::Io { .. })));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_cart_survives_catalog_price_change() {
        let mut store = store_with_catalog(MemoryStorage::new(), vec![product(1, "5.00")]);
        store.add_to_cart(ProductId::new(1)).unwrap();

        *store.catalog_mut() = Catalog::ready(vec![product(1, "8.00")]);
        store.add_to_cart(ProductId::new(1)).unwrap();

        assert_eq!(store.cart().total().to_fixed(), "10.00");
    }
}
