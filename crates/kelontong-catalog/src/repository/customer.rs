//! # Customer Repository
//!
//! Registered customers. Checkout reads them; nothing here writes loyalty
//! points or spend totals.

use tracing::debug;

use kelontong_core::validation::validate_search_query;
use kelontong_core::Customer;

use crate::error::{CatalogError, CatalogResult};

/// Repository for customers.
#[derive(Debug, Clone, Default)]
pub struct CustomerRepository {
    customers: Vec<Customer>,
}

impl CustomerRepository {
    pub fn new() -> Self {
        CustomerRepository::default()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Like [`get_by_id`](Self::get_by_id) but a miss is an error.
    pub fn require(&self, id: &str) -> CatalogResult<&Customer> {
        self.get_by_id(id)
            .ok_or_else(|| CatalogError::not_found("Customer", id))
    }

    pub fn list(&self) -> &[Customer] {
        &self.customers
    }

    pub fn count(&self) -> usize {
        self.customers.len()
    }

    /// Case-insensitive match on name, or substring match on phone.
    pub fn search(&self, query: &str) -> CatalogResult<Vec<&Customer>> {
        let needle = validate_search_query(query)?.to_lowercase();
        Ok(self
            .customers
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle) || c.phone.contains(&needle))
            .collect())
    }

    /// Inserts a customer. Ids are unique.
    pub fn insert(&mut self, customer: Customer) -> CatalogResult<()> {
        if self.get_by_id(&customer.id).is_some() {
            return Err(CatalogError::duplicate("customer id", &customer.id));
        }
        debug!(id = %customer.id, "Inserting customer");
        self.customers.push(customer);
        Ok(())
    }
}
