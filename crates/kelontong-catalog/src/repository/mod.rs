//! # Repository Module
//!
//! In-memory repositories for Kelontong POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  kasir command                                                         │
//! │       │                                                                 │
//! │       │  catalog.products().search(&query)                             │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── search(&self, query)                                              │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&mut self, product)                                        │
//! │  └── apply_movement(&mut self, movement)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Product> in catalog order                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Products, search, stock movements
//! - [`CategoryRepository`](category::CategoryRepository) - Product categories
//! - [`CustomerRepository`](customer::CustomerRepository) - Registered customers
//! - [`TransactionLog`](transaction::TransactionLog) - Completed sales

pub mod category;
pub mod customer;
pub mod product;
pub mod transaction;
