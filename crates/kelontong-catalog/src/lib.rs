//! # kelontong-catalog: Store Data for Kelontong POS
//!
//! This crate holds the store's products, categories, customers and
//! completed transactions in memory, and applies stock movements to them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Kelontong POS Data Flow                            │
//! │                                                                         │
//! │  kasir command (search_products)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 kelontong-catalog (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Catalog     │    │  Repositories │    │    Seed      │  │   │
//! │  │   │  (store.rs)   │    │ (product.rs)  │    │ (seed.rs)    │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ One handle    │◄───│ ProductRepo   │    │ 5 categories │  │   │
//! │  │   │ per session   │    │ CustomerRepo  │    │ 12 products  │  │   │
//! │  │   │               │    │ TransactionLog│    │ 3 customers  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kelontong-core (queries, stock planning, reports)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The [`Catalog`] handle
//! - [`repository`] - Repository implementations (product, customer, ...)
//! - [`seed`] - Starter data
//! - [`error`] - Catalog error types
//!
//! ## Usage
//!
//! ```rust
//! use kelontong_catalog::Catalog;
//!
//! let catalog = Catalog::sample();
//! let indomie = catalog.products().get_by_barcode("8992388888881").unwrap();
//! assert_eq!(indomie.id, "p001");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CatalogError, CatalogResult};
pub use store::Catalog;

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::customer::CustomerRepository;
pub use repository::product::ProductRepository;
pub use repository::transaction::TransactionLog;
